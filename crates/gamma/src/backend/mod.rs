mod gemini;
mod ollama;
mod openai;

pub use gemini::Gemini;
pub use ollama::Ollama;
pub use openai::OpenAi;

use gamma_core::backend::{
    BackendChoice, DEFAULT_GEMINI_MODEL, DEFAULT_OLLAMA_MODEL, DEFAULT_OPENAI_MODEL,
};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::time::Duration;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Failure of a single backend call.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("{program} not found in PATH")]
    MissingExecutable { program: String },

    #[error("Failed to run {program}: {source}")]
    Process {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} error ({status}):\n{stderr}")]
    Exit {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("{program} did not provide an answer:\n{stderr}")]
    EmptyOutput { program: String, stderr: String },

    #[error("{program} did not answer within {seconds} seconds")]
    Timeout { program: String, seconds: u64 },

    #[error("OpenAI error: {0}")]
    Api(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),
}

impl BackendError {
    /// Classify an I/O error raised while starting or talking to a process.
    fn process(program: &Path, source: std::io::Error) -> Self {
        let program = program.display().to_string();

        if source.kind() == std::io::ErrorKind::NotFound {
            BackendError::MissingExecutable { program }
        } else {
            BackendError::Process { program, source }
        }
    }
}

/// Backend executables, credentials and defaults.
#[derive(Debug, Clone, clap::Args)]
pub struct BackendOptions {
    /// Ollama executable used for local models
    #[arg(long, env = "GAMMA_OLLAMA_BIN", default_value = "ollama")]
    pub ollama_bin: PathBuf,

    /// Seconds to wait for the local model before giving up
    #[arg(long, env = "GAMMA_OLLAMA_TIMEOUT", default_value = "60")]
    pub ollama_timeout: u64,

    /// Local model used when the request names none
    #[arg(long, env = "GAMMA_OLLAMA_MODEL", default_value = DEFAULT_OLLAMA_MODEL)]
    pub ollama_model: String,

    /// Gemini CLI executable (looked up in PATH when omitted)
    #[arg(long, env = "GAMMA_GEMINI_BIN")]
    pub gemini_bin: Option<PathBuf>,

    /// Gemini model used when the request names none
    #[arg(long, env = "GAMMA_GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    /// OpenAI API key used when the request carries none
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// OpenAI-compatible API base URL
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_OPENAI_BASE_URL)]
    pub openai_base_url: String,

    /// OpenAI chat model
    #[arg(long, env = "GAMMA_OPENAI_MODEL", default_value = DEFAULT_OPENAI_MODEL)]
    pub openai_model: String,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            ollama_bin: PathBuf::from("ollama"),
            ollama_timeout: 60,
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            gemini_bin: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
        }
    }
}

impl BackendOptions {
    /// The local model runner, using `model` or the configured default.
    pub fn ollama(&self, model: Option<&str>) -> Ollama {
        Ollama {
            program: self.ollama_bin.clone(),
            model: model.unwrap_or(&self.ollama_model).to_string(),
            timeout: Duration::from_secs(self.ollama_timeout),
        }
    }
}

/// Per-request overrides of the configured defaults.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub model: Option<String>,
    pub api_key: Option<String>,
}

/// One text-generation mechanism, ready to take a prompt.
#[derive(Debug, Clone)]
pub enum Backend {
    Ollama(Ollama),
    OpenAi(OpenAi),
    Gemini(Gemini),
}

impl Backend {
    /// Build the backend for `choice` from the configuration and request overrides.
    pub fn select(
        choice: BackendChoice,
        selection: &Selection,
        options: &BackendOptions,
    ) -> Result<Self, BackendError> {
        let model = selection.model.as_deref().filter(|m| !m.trim().is_empty());

        match choice {
            BackendChoice::Ollama => Ok(Backend::Ollama(options.ollama(model))),
            BackendChoice::OpenAi => {
                let api_key = selection
                    .api_key
                    .as_deref()
                    .filter(|k| !k.trim().is_empty())
                    .or(options.openai_api_key.as_deref())
                    .ok_or_else(|| {
                        BackendError::MissingCredentials(
                            "an OpenAI API key is required for the openai backend".to_string(),
                        )
                    })?;

                Ok(Backend::OpenAi(OpenAi {
                    base_url: options.openai_base_url.clone(),
                    api_key: api_key.trim().to_string(),
                    model: options.openai_model.clone(),
                }))
            }
            BackendChoice::Gemini => Ok(Backend::Gemini(Gemini {
                program: options.gemini_bin.clone(),
                model: model.unwrap_or(&options.gemini_model).to_string(),
            })),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Ollama(_) => "Ollama",
            Backend::OpenAi(_) => "OpenAI",
            Backend::Gemini(_) => "Gemini",
        }
    }

    /// Send `prompt` and return the raw response text.
    pub async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        match self {
            Backend::Ollama(backend) => backend.generate(prompt).await,
            Backend::OpenAi(backend) => backend.generate(prompt).await,
            Backend::Gemini(backend) => backend.generate(prompt).await,
        }
    }
}
