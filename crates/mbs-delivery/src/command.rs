//! User command sink.
//!
//! The command template may reference the output document as `{file}`. The
//! expanded template is split on whitespace into a program and its
//! arguments; no shell is involved.

use std::path::Path;
use std::process::Command;
use std::thread;

use crate::error::{DeliveryError, Result};

/// Placeholder replaced by the output document path.
pub const FILE_PLACEHOLDER: &str = "{file}";

/// Whether to wait for the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Start the command and return; completion is only logged.
    #[default]
    Background,
    /// Wait for the command and fail on a non-zero exit.
    Sync,
}

/// What happened when the command was run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Sync mode: the command exited successfully.
    Completed,
    /// Background mode: the command was started.
    Started { pid: u32 },
}

/// Expand `{file}` and split the command line into program and arguments.
pub fn render_command(template: &str, path: &Path) -> Result<Vec<String>> {
    let expanded = template.replace(FILE_PLACEHOLDER, &path.to_string_lossy());
    let parts: Vec<String> = expanded.split_whitespace().map(str::to_string).collect();
    if parts.is_empty() {
        return Err(DeliveryError::EmptyCommand);
    }
    Ok(parts)
}

/// Runs a user command against the output document.
#[derive(Debug, Clone)]
pub struct CommandSink {
    template: String,
    mode: ExecutionMode,
}

impl CommandSink {
    pub fn new(template: impl Into<String>, mode: ExecutionMode) -> Self {
        Self {
            template: template.into(),
            mode,
        }
    }

    /// Run the command for the document at `path`.
    pub fn run(&self, path: &Path) -> Result<CommandOutcome> {
        let parts = render_command(&self.template, path)?;
        let command_line = parts.join(" ");
        let mut command = Command::new(&parts[0]);
        command.args(&parts[1..]);

        match self.mode {
            ExecutionMode::Sync => {
                tracing::info!(command = %command_line, "running command synchronously");
                let output = command.output().map_err(|source| DeliveryError::Spawn {
                    command: command_line.clone(),
                    source,
                })?;
                if !output.status.success() {
                    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
                    combined.push_str(&String::from_utf8_lossy(&output.stderr));
                    return Err(DeliveryError::CommandFailed {
                        command: command_line,
                        status: output.status.to_string(),
                        output: combined,
                    });
                }
                tracing::info!(command = %command_line, "command completed successfully");
                Ok(CommandOutcome::Completed)
            }
            ExecutionMode::Background => {
                let mut child = command.spawn().map_err(|source| DeliveryError::Spawn {
                    command: command_line.clone(),
                    source,
                })?;
                let pid = child.id();
                tracing::info!(command = %command_line, pid, "started command in background");

                // Detached watcher; the child keeps running if the process exits first.
                thread::spawn(move || match child.wait() {
                    Ok(status) if status.success() => {
                        tracing::info!(
                            command = %command_line,
                            "background command completed successfully"
                        );
                    }
                    Ok(status) => {
                        tracing::warn!(
                            command = %command_line,
                            %status,
                            "background command failed"
                        );
                    }
                    Err(error) => {
                        tracing::warn!(
                            command = %command_line,
                            %error,
                            "background command failed"
                        );
                    }
                });
                Ok(CommandOutcome::Started { pid })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::{NamedTempFile, TempDir};

    use super::*;

    #[test]
    fn test_render_command_expands_placeholder() {
        let parts = render_command(
            "import-mbs --input {file} --tag {file}",
            Path::new("downloads/mbs_20240301.json"),
        )
        .unwrap();
        assert_eq!(
            parts,
            vec![
                "import-mbs",
                "--input",
                "downloads/mbs_20240301.json",
                "--tag",
                "downloads/mbs_20240301.json"
            ]
        );
    }

    #[test]
    fn test_render_command_rejects_blank() {
        assert!(matches!(
            render_command("   ", Path::new("x.json")),
            Err(DeliveryError::EmptyCommand)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_sync_command_status() {
        let ok = CommandSink::new("true {file}", ExecutionMode::Sync)
            .run(Path::new("mbs_20240301.json"));
        assert_eq!(ok.unwrap(), CommandOutcome::Completed);

        let failed = CommandSink::new("false {file}", ExecutionMode::Sync)
            .run(Path::new("mbs_20240301.json"));
        assert!(matches!(failed, Err(DeliveryError::CommandFailed { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_sync_command_reads_document() {
        let mut document = NamedTempFile::new().unwrap();
        document.write_all(br#"{"MBS_Items": []}"#).unwrap();
        let sink = CommandSink::new("grep -q MBS_Items {file}", ExecutionMode::Sync);
        let outcome = sink.run(document.path()).unwrap();
        assert_eq!(outcome, CommandOutcome::Completed);

        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("mbs_20240301.json");
        match sink.run(&missing) {
            Err(DeliveryError::CommandFailed { command, .. }) => {
                assert!(command.ends_with("mbs_20240301.json"));
            }
            other => panic!("expected command failure, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_background_command_starts() {
        let outcome = CommandSink::new("true", ExecutionMode::Background)
            .run(Path::new("mbs_20240301.json"))
            .unwrap();
        assert!(matches!(outcome, CommandOutcome::Started { .. }));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let sink = CommandSink::new(
            "definitely-not-a-real-program-mbs {file}",
            ExecutionMode::Sync,
        );
        let result = sink.run(Path::new("x.json"));
        assert!(matches!(result, Err(DeliveryError::Spawn { .. })));
    }
}
