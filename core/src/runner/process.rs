use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::ToolInvocationError;
use crate::util::RingBytes;

use super::decode::decode_output;
use super::io_pump::pump;
use super::traits::ToolInvoker;
use super::types::ToolInvocation;

/// Spawns real child processes and captures stdout and stderr merged.
///
/// There is no timeout: a tool that never exits holds its worker forever.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    capture_bytes: usize,
}

impl ProcessInvoker {
    pub fn new(capture_bytes: usize) -> Self {
        Self {
            capture_bytes: capture_bytes.max(1),
        }
    }
}

impl Default for ProcessInvoker {
    fn default() -> Self {
        Self::new(1024 * 1024)
    }
}

#[async_trait]
impl ToolInvoker for ProcessInvoker {
    async fn invoke(&self, invocation: &ToolInvocation) -> Result<String, ToolInvocationError> {
        let program = invocation.program.clone();
        tracing::debug!(command = %invocation, "spawning tool");

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .envs(invocation.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &invocation.cwd {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|source| ToolInvocationError::Spawn {
            program: program.clone(),
            source,
        })?;

        let ring = RingBytes::new(self.capture_bytes);
        let out_task = child
            .stdout
            .take()
            .map(|rd| pump(rd, ring.clone(), program.clone(), "stdout"));
        let err_task = child
            .stderr
            .take()
            .map(|rd| pump(rd, ring.clone(), program.clone(), "stderr"));

        let status = child.wait().await.map_err(|source| ToolInvocationError::Wait {
            program: program.clone(),
            source,
        })?;

        for task in [out_task, err_task].into_iter().flatten() {
            match task.await {
                Ok(res) => {
                    res?;
                }
                Err(join_err) => {
                    return Err(ToolInvocationError::StreamIo {
                        program: program.clone(),
                        stream: "pump",
                        source: std::io::Error::other(join_err.to_string()),
                    });
                }
            }
        }

        let output = decode_output(&ring.to_bytes());
        if status.success() {
            tracing::debug!(program = %program, bytes = output.len(), "tool exited cleanly");
            Ok(output)
        } else {
            Err(ToolInvocationError::NonZeroExit {
                program,
                code: status.code(),
                output,
            })
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> ToolInvocation {
        ToolInvocation::new("sh").arg("-c").arg(script)
    }

    #[tokio::test]
    async fn success_returns_merged_output() {
        let inv = ProcessInvoker::default();
        let out = inv.invoke(&sh("echo to-out; echo to-err 1>&2")).await.unwrap();
        assert!(out.contains("to-out"));
        assert!(out.contains("to-err"));
    }

    #[tokio::test]
    async fn non_zero_exit_carries_code_and_output() {
        let inv = ProcessInvoker::default();
        let err = inv
            .invoke(&sh("echo broken jar 1>&2; exit 3"))
            .await
            .unwrap_err();
        match err {
            ToolInvocationError::NonZeroExit { code, output, .. } => {
                assert_eq!(code, Some(3));
                assert!(output.contains("broken jar"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let inv = ProcessInvoker::default();
        let err = inv
            .invoke(&ToolInvocation::new("/definitely/not/here/n1ght-tool"))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolInvocationError::Spawn { .. }));
        assert!(err.to_string().contains("n1ght-tool"));
    }

    #[tokio::test]
    async fn runs_in_requested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let inv = ProcessInvoker::default();
        let out = inv
            .invoke(&sh("pwd").current_dir(dir.path()))
            .await
            .unwrap();
        let expected = dir.path().canonicalize().unwrap();
        assert_eq!(
            std::path::Path::new(out.trim()).canonicalize().unwrap(),
            expected
        );
    }

    #[tokio::test]
    async fn capture_keeps_only_the_tail() {
        let inv = ProcessInvoker::new(6);
        let out = inv.invoke(&sh("printf 'abcdef\\nxyz\\n'")).await.unwrap();
        assert_eq!(out, "f\nxyz\n");
    }

    #[tokio::test]
    async fn truncated_utf8_error_text_survives() {
        let inv = ProcessInvoker::new(12);
        let err = inv
            .invoke(&sh("printf '编译失败\\n'; exit 1"))
            .await
            .unwrap_err();
        match err {
            ToolInvocationError::NonZeroExit { output, .. } => {
                assert_eq!(output, "译失败\n");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
