use encoding_rs::GB18030;

/// Decode captured tool output. UTF-8 first, then GB18030 for consoles
/// running a legacy Chinese code page.
///
/// The capture ring drops bytes from the front, so the buffer may start in
/// the middle of a UTF-8 character. Up to three leading continuation bytes
/// are skipped before deciding the text is not UTF-8.
pub fn decode_output(bytes: &[u8]) -> String {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    let cut = bytes
        .iter()
        .take(3)
        .take_while(|b| is_continuation(**b))
        .count();
    if cut > 0 {
        if let Ok(s) = std::str::from_utf8(&bytes[cut..]) {
            return s.to_string();
        }
    }

    let (text, _, _) = GB18030.decode(bytes);
    text.into_owned()
}

fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}
