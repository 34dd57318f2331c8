use gamma_core::backend::flatten_prompt;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use super::BackendError;

/// Google's `gemini` command-line tool.
#[derive(Debug, Clone)]
pub struct Gemini {
    /// Explicit executable; `gemini` (or `gemini.cmd`) from `PATH` when `None`.
    pub program: Option<PathBuf>,
    pub model: String,
}

impl Gemini {
    fn resolve_program(&self) -> Result<PathBuf, BackendError> {
        if let Some(program) = &self.program {
            return Ok(program.clone());
        }

        which::which("gemini")
            .or_else(|_| which::which("gemini.cmd"))
            .map_err(|_| BackendError::MissingExecutable {
                program: "gemini (install with `npm i -g @google/gemini-cli`)".to_string(),
            })
    }

    /// Run `gemini -p <prompt> -m <model>` and return its stdout.
    pub async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let program = self.resolve_program()?;

        let output = Command::new(&program)
            .arg("-p")
            .arg(flatten_prompt(prompt))
            .arg("-m")
            .arg(&self.model)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| BackendError::process(&program, e))?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(BackendError::Exit {
                program: "Gemini CLI".to_string(),
                status: output.status,
                stderr: if stderr.is_empty() {
                    "(no details)".to_string()
                } else {
                    stderr
                },
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            return Err(BackendError::EmptyOutput {
                program: "Gemini CLI".to_string(),
                stderr: if stderr.is_empty() {
                    "(no output from Gemini)".to_string()
                } else {
                    stderr
                },
            });
        }

        Ok(stdout)
    }
}
