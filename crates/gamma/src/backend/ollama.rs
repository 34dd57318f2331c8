use gamma_core::backend::parse_ollama_list;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::BackendError;

/// Local model served through the `ollama` command.
#[derive(Debug, Clone)]
pub struct Ollama {
    pub program: PathBuf,
    pub model: String,
    pub timeout: Duration,
}

impl Ollama {
    /// Pipe `prompt` into `ollama run <model>` and return its stdout.
    ///
    /// The whole exchange, including writing the prompt, must finish within
    /// `timeout`; the child is killed otherwise.
    pub async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let mut child = Command::new(&self.program)
            .arg("run")
            .arg(&self.model)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BackendError::process(&self.program, e))?;

        let stdin = child.stdin.take();
        let input = format!("{prompt}\n");

        let exchange = async move {
            if let Some(mut stdin) = stdin {
                match stdin.write_all(input.as_bytes()).await {
                    // The model may exit before reading everything; its
                    // status and stderr tell the real story.
                    Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                    Err(e) => return Err(e),
                    Ok(()) => {}
                }
            }
            child.wait_with_output().await
        };

        let output = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| BackendError::Timeout {
                program: self.program.display().to_string(),
                seconds: self.timeout.as_secs(),
            })?
            .map_err(|e| BackendError::process(&self.program, e))?;

        if !output.status.success() {
            return Err(BackendError::Exit {
                program: self.program.display().to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Names of the installed models, as reported by `ollama list`.
    pub async fn list_models(&self) -> Result<Vec<String>, BackendError> {
        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.program)
                .arg("list")
                .stdin(Stdio::null())
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| BackendError::Timeout {
            program: self.program.display().to_string(),
            seconds: self.timeout.as_secs(),
        })?
        .map_err(|e| BackendError::process(&self.program, e))?;

        if !output.status.success() {
            return Err(BackendError::Exit {
                program: self.program.display().to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(parse_ollama_list(&String::from_utf8_lossy(&output.stdout)))
    }
}
