//! Host shell launcher shared by every backend
//!
//! Backends reduce a request to one shell line (plus an optional native cwd);
//! this module runs it and captures bounded output.

use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use crate::types::{ExecError, ExecutionLimits, ExecutionResult};

/// A fully composed shell line and where to run it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellInvocation {
    pub line: String,
    /// Native working directory; `None` runs in the server's own cwd
    pub cwd: Option<PathBuf>,
}

#[cfg(unix)]
const HOST_SHELL: (&str, &str) = ("/bin/sh", "-c");

#[cfg(windows)]
const HOST_SHELL: (&str, &str) = ("cmd", "/C");

/// Replace every `"` with `\"` so the text can sit inside a double-quoted
/// shell word. Nothing else is escaped.
pub fn escape_double_quotes(command: &str) -> String {
    command.replace('"', "\\\"")
}

/// Run a composed line through the host shell and wait for it to finish
pub async fn run(
    invocation: &ShellInvocation,
    limits: &ExecutionLimits,
) -> Result<ExecutionResult, ExecError> {
    let (program, flag) = HOST_SHELL;

    let mut cmd = Command::new(program);
    cmd.arg(flag);
    #[cfg(windows)]
    cmd.raw_arg(&invocation.line);
    #[cfg(not(windows))]
    cmd.arg(&invocation.line);

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if let Some(dir) = &invocation.cwd {
        cmd.current_dir(dir);
    }

    let launch_error = |source| ExecError::Launch {
        program: program.to_string(),
        source,
    };

    let mut child = cmd.spawn().map_err(launch_error)?;
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let max_bytes = limits.max_output_bytes;

    let collect = async {
        let (stdout, stderr) = tokio::join!(
            read_capped(stdout, max_bytes),
            read_capped(stderr, max_bytes)
        );
        let status = child.wait().await?;
        Ok::<_, io::Error>((status, stdout?, stderr?))
    };

    let (status, (stdout, stdout_truncated), (stderr, stderr_truncated)) =
        match limits.timeout_secs {
            Some(secs) => {
                // On expiry the collect future is dropped and kill_on_drop reaps the child
                tokio::time::timeout(Duration::from_secs(secs), collect)
                    .await
                    .map_err(|_elapsed| ExecError::Timeout(secs))?
                    .map_err(ExecError::Output)?
            }
            None => collect.await.map_err(ExecError::Output)?,
        };

    Ok(ExecutionResult {
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
        exit_code: status.code(),
        truncated: stdout_truncated || stderr_truncated,
    })
}

/// Keep at most `max_bytes` of a stream, draining the rest
///
/// The remainder is discarded as it arrives so the child never stalls on a
/// full pipe and memory stays bounded by `max_bytes`.
async fn read_capped<R>(reader: Option<R>, max_bytes: usize) -> io::Result<(Vec<u8>, bool)>
where
    R: AsyncRead + Unpin,
{
    let Some(mut reader) = reader else {
        return Ok((Vec::new(), false));
    };

    let mut kept = Vec::new();
    (&mut reader)
        .take((max_bytes as u64).saturating_add(1))
        .read_to_end(&mut kept)
        .await?;

    let truncated = kept.len() > max_bytes;
    if truncated {
        kept.truncate(max_bytes);
        tokio::io::copy(&mut reader, &mut tokio::io::sink()).await?;
    }

    Ok((kept, truncated))
}
