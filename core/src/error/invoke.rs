use thiserror::Error;

/// Failure of a single external tool invocation.
#[derive(Error, Debug)]
pub enum ToolInvocationError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("`{program}` {stream} read failed: {source}")]
    StreamIo {
        program: String,
        stream: &'static str,
        source: std::io::Error,
    },

    #[error("waiting on `{program}` failed: {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },

    #[error("`{program}` exited with {}: {output}", exit_label(.code))]
    NonZeroExit {
        program: String,
        code: Option<i32>,
        output: String,
    },

    #[error("`{program}` finished but its output could not be used: {message}")]
    Finish { program: String, message: String },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_zero_exit_display_carries_output() {
        let err = ToolInvocationError::NonZeroExit {
            program: "java".into(),
            code: Some(3),
            output: "Exception in thread main".into(),
        };
        let text = err.to_string();
        assert!(text.contains("java"));
        assert!(text.contains("status 3"));
        assert!(text.contains("Exception in thread main"));
    }

    #[test]
    fn signal_exit_is_labelled() {
        let err = ToolInvocationError::NonZeroExit {
            program: "codeql".into(),
            code: None,
            output: String::new(),
        };
        assert!(err.to_string().contains("terminated by signal"));
    }
}
