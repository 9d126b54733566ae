//! Running external commands for `run_command()`.

use std::process::Command;

/// Exit status and captured output of a finished command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: i64,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("empty command")]
    Empty,
    #[error("failed to run '{cmd}': {source}")]
    Spawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },
}

/// Executes commands on behalf of build files.
pub trait CommandRunner {
    fn run(&mut self, argv: &[String], env: &[(String, String)]) -> Result<CommandOutput, RunError>;
}

/// Runs commands as child processes.
#[derive(Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&mut self, argv: &[String], env: &[(String, String)]) -> Result<CommandOutput, RunError> {
        let (cmd, args) = argv.split_first().ok_or(RunError::Empty)?;
        tracing::debug!(cmd, ?args, "running command");

        let output = Command::new(cmd)
            .args(args)
            .envs(env.iter().map(|(k, v)| (k, v)))
            .output()
            .map_err(|source| RunError::Spawn {
                cmd: cmd.clone(),
                source,
            })?;

        Ok(CommandOutput {
            status: output.status.code().map_or(-1, i64::from),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
