use crate::errors::ClientError;
use crate::models::ShareRequest;
use std::io::ErrorKind;
use tokio::process::Command;
use tracing::debug;

const STDERR_MARKER: &str = "\n--- STDERR ---\n";

/// Runs `command` and returns its stdout, with stderr appended after a marker
/// line when the command wrote any. A non-zero exit status is not an error.
pub async fn capture(command: &[String]) -> Result<String, ClientError> {
    let (program, args) = command.split_first().ok_or(ClientError::EmptyCommand)?;
    debug!(%program, ?args, "running command");

    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|err| match err.kind() {
            ErrorKind::NotFound => ClientError::CommandNotFound(program.clone()),
            _ => ClientError::Spawn(err),
        })?;

    let mut content = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.stderr.is_empty() {
        content.push_str(STDERR_MARKER);
        content.push_str(&String::from_utf8_lossy(&output.stderr));
    }
    Ok(content)
}

pub fn share_request(command: &[String], content: String, hidden: bool) -> ShareRequest {
    ShareRequest {
        content,
        command: Some(command.join(" ")),
        is_hidden: hidden,
    }
}
