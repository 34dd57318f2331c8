use crate::backend::{Backend, BackendError, BackendOptions, Selection};
use crate::prelude::{eprintln, println, *};
use gamma_core::backend::BackendChoice;
use gamma_core::project::{existing_object_file, write_object_file};
use gamma_core::quiz::{build_prompt, extract_gml, validate_gml, Difficulty, QuizRequest, SchemaIssue};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum BackendArg {
    /// Local model through `ollama run`
    Ollama,
    /// OpenAI chat-completions API
    Openai,
    /// Google Gemini CLI
    Gemini,
}

impl From<BackendArg> for BackendChoice {
    fn from(b: BackendArg) -> Self {
        match b {
            BackendArg::Ollama => BackendChoice::Ollama,
            BackendArg::Openai => BackendChoice::OpenAi,
            BackendArg::Gemini => BackendChoice::Gemini,
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct GenerateOptions {
    /// Topic the questions should cover
    pub topic: String,

    /// Difficulty level: easy, medium or hard
    #[arg(short, long, default_value = "medium")]
    pub difficulty: Difficulty,

    /// Backend that generates the questions
    #[arg(short, long, value_enum, env = "GAMMA_BACKEND", default_value = "ollama")]
    pub backend: BackendArg,

    /// Model for the ollama or gemini backend (defaults per backend)
    #[arg(short, long)]
    pub model: Option<String>,

    /// OpenAI API key (falls back to OPENAI_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// GameMaker project folder to write into (requires --object)
    #[arg(long, requires = "object")]
    pub project_dir: Option<PathBuf>,

    /// Object folder whose Create_0.gml is overwritten (requires --project-dir)
    #[arg(long, requires = "project_dir")]
    pub object: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[clap(flatten)]
    pub backends: BackendOptions,
}

/// Quiz code produced by one backend call.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedGml {
    pub code: String,
    /// Whether the code was cut out of a larger response.
    pub matched: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<SchemaIssue>,
}

/// Prompt the backend for a quiz and normalize its answer.
///
/// Extraction misses and schema findings are logged, never fatal.
pub async fn generate_gml_data(
    backend: &Backend,
    request: &QuizRequest,
) -> Result<GeneratedGml, BackendError> {
    let prompt = build_prompt(request);

    log::info!(
        "Generating {} questions on '{}' with {}",
        request.difficulty,
        request.topic,
        backend.name()
    );

    let raw = backend.generate(&prompt).await?;
    log::debug!("{} raw output:\n{raw}", backend.name());

    let extraction = extract_gml(&raw);
    if !extraction.matched {
        log::warn!("LLM response does not contain an expected GML segment.");
    }

    let issues = validate_gml(&extraction.code);
    for issue in &issues {
        log::warn!("Generated GML: {issue}");
    }

    Ok(GeneratedGml {
        code: extraction.code,
        matched: extraction.matched,
        issues,
    })
}

pub async fn run(options: GenerateOptions, global: crate::Global) -> Result<()> {
    // Resolve the target first so a bad path fails before the model runs.
    let target = match (&options.project_dir, &options.object) {
        (Some(project_dir), Some(object)) => Some(existing_object_file(project_dir, object)?),
        _ => None,
    };

    let selection = Selection {
        model: options.model,
        api_key: options.api_key,
    };
    let backend = Backend::select(options.backend.into(), &selection, &options.backends)?;

    if global.verbose {
        eprintln!("Backend: {}", backend.name());
    }

    let request = QuizRequest {
        topic: options.topic,
        difficulty: options.difficulty,
    };

    let generated = generate_gml_data(&backend, &request).await?;

    if let Some(path) = &target {
        write_object_file(path, &generated.code)?;
        eprintln!("GML file successfully created/overwritten: {}", path.display());
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&generated)?);
    } else {
        println!("{}", generated.code);
    }

    Ok(())
}
