use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tokio::task::JoinHandle;

use crate::error::ToolInvocationError;
use crate::util::RingBytes;

/// Drain `rd` into `ring` one whole line at a time, so stdout and stderr
/// pumps sharing a ring never split each other's lines.
pub(crate) fn pump<R>(
    mut rd: R,
    ring: Arc<RingBytes>,
    program: String,
    label: &'static str,
) -> JoinHandle<Result<u64, ToolInvocationError>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; 16 * 1024];
        let mut total = 0u64;
        let mut line_buf: Vec<u8> = Vec::with_capacity(8 * 1024);

        loop {
            let n = rd
                .read(&mut buf)
                .await
                .map_err(|e| ToolInvocationError::StreamIo {
                    program: program.clone(),
                    stream: label,
                    source: e,
                })?;
            if n == 0 {
                break;
            }
            total += n as u64;

            line_buf.extend_from_slice(&buf[..n]);
            while let Some(pos) = line_buf.iter().position(|&b| b == b'\n') {
                let one = line_buf.drain(..=pos).collect::<Vec<u8>>();
                ring.push(&one);
                tracing::trace!(
                    program = %program,
                    stream = label,
                    line = %String::from_utf8_lossy(trim_newline(&one))
                );
            }
        }

        // EOF flush: keep the last partial line if it doesn't end with '\n'.
        if !line_buf.is_empty() {
            ring.push(&line_buf);
            tracing::trace!(
                program = %program,
                stream = label,
                line = %String::from_utf8_lossy(&line_buf)
            );
        }

        Ok(total)
    })
}

fn trim_newline(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
