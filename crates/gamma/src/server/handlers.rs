use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use gamma_core::backend::BackendChoice;
use gamma_core::project::{existing_object_file, list_objects as list_object_folders, write_object_file};
use gamma_core::quiz::{strip_blank_lines, Difficulty, QuizRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::Config;
use crate::backend::{Backend, Selection};
use crate::error::Error;
use crate::generate::generate_gml_data;

const INDEX_HTML: &str = include_str!("../../assets/index.html");
const STYLES_CSS: &str = include_str!("../../assets/styles.css");
const SCRIPT_JS: &str = include_str!("../../assets/script.js");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn styles() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], STYLES_CSS)
}

pub async fn script() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript")], SCRIPT_JS)
}

#[derive(Debug, Deserialize)]
pub struct ListObjectsRequest {
    #[serde(default)]
    project_dir: String,
}

pub async fn list_objects(
    State(config): State<Arc<Config>>,
    body: Result<Json<ListObjectsRequest>, JsonRejection>,
) -> Result<Json<Vec<String>>, Error> {
    let Json(request) = body.map_err(|e| Error::Validation(format!("Invalid request: {e}")))?;

    let project_dir = request.project_dir.trim();
    if project_dir.is_empty() {
        return Err(Error::Validation(
            "Please enter the project directory.".to_string(),
        ));
    }

    let objects = list_object_folders(&config.resolve(project_dir))?;
    Ok(Json(objects))
}

/// Installed local models. Failures are logged and produce an empty list so
/// the page still loads without Ollama.
pub async fn list_models(State(config): State<Arc<Config>>) -> Json<Vec<String>> {
    match config.backends.ollama(None).list_models().await {
        Ok(models) => Json(models),
        Err(e) => {
            log::error!("Error when retrieving the Ollama models: {e}");
            Json(Vec::new())
        }
    }
}

/// Text fields and optional upload of the generate form.
#[derive(Debug, Default)]
struct GenerateForm {
    project_dir: String,
    object_name: String,
    topic: String,
    difficulty: String,
    backend: String,
    api_key: String,
    gemini_model: String,
    ollama_model: String,
    questions_file: Option<Vec<u8>>,
}

impl GenerateForm {
    async fn read(mut multipart: Multipart) -> Result<Self, Error> {
        let invalid = |e: axum::extract::multipart::MultipartError| {
            Error::Validation(format!("Invalid form data: {e}"))
        };

        let mut form = GenerateForm::default();

        while let Some(field) = multipart.next_field().await.map_err(invalid)? {
            let name = field.name().unwrap_or_default().to_string();

            if name == "questions_file" {
                // Browsers send an unnamed empty part when no file was picked.
                let has_file = field.file_name().is_some_and(|f| !f.is_empty());
                let bytes = field.bytes().await.map_err(invalid)?;
                if has_file {
                    form.questions_file = Some(bytes.to_vec());
                }
                continue;
            }

            let slot = match name.as_str() {
                "project_dir" => &mut form.project_dir,
                "object_name" => &mut form.object_name,
                "topic" => &mut form.topic,
                "difficulty" => &mut form.difficulty,
                "backend" => &mut form.backend,
                "api_key" => &mut form.api_key,
                "gemini_model" => &mut form.gemini_model,
                "ollama_model" => &mut form.ollama_model,
                other => {
                    log::debug!("Ignoring unknown form field '{other}'");
                    continue;
                }
            };
            *slot = field.text().await.map_err(invalid)?.trim().to_string();
        }

        Ok(form)
    }

    fn selection(&self, choice: BackendChoice) -> Selection {
        match choice {
            BackendChoice::Ollama => Selection {
                model: non_empty(&self.ollama_model),
                api_key: None,
            },
            BackendChoice::Gemini => Selection {
                model: non_empty(&self.gemini_model),
                api_key: None,
            },
            BackendChoice::OpenAi => Selection {
                model: None,
                api_key: non_empty(&self.api_key),
            },
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    status: &'static str,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    gml_code: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

pub async fn generate_gml(
    State(config): State<Arc<Config>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>, Error> {
    let multipart = multipart.map_err(|e| Error::Validation(format!("Invalid form data: {e}")))?;
    let form = GenerateForm::read(multipart).await?;

    if form.project_dir.is_empty() || form.object_name.is_empty() {
        return Err(Error::Validation(
            "Project directory and object folder must be specified.".to_string(),
        ));
    }

    let path = existing_object_file(&config.resolve(&form.project_dir), &form.object_name)?;

    if let Some(bytes) = form.questions_file {
        let raw = String::from_utf8(bytes)
            .map_err(|_| Error::Validation("Uploaded file is not valid UTF-8.".to_string()))?;

        write_object_file(&path, &strip_blank_lines(&raw))?;
        log::info!("Uploaded questions written to {}", path.display());

        return Ok(Json(GenerateResponse {
            status: "File successfully uploaded and GML overwritten",
            path: path.display().to_string(),
            gml_code: None,
            warnings: Vec::new(),
        }));
    }

    if form.topic.is_empty() {
        return Err(Error::Validation("Please enter a topic.".to_string()));
    }

    let difficulty: Difficulty = form.difficulty.parse().map_err(Error::Validation)?;
    let choice: BackendChoice = form.backend.parse().map_err(Error::Validation)?;
    let backend = Backend::select(choice, &form.selection(choice), &config.backends)?;

    let request = QuizRequest {
        topic: form.topic,
        difficulty,
    };
    let generated = generate_gml_data(&backend, &request).await?;

    write_object_file(&path, &generated.code)?;
    log::info!("Generated GML written to {}", path.display());

    Ok(Json(GenerateResponse {
        status: "GML file successfully created/overwritten",
        path: path.display().to_string(),
        gml_code: Some(generated.code),
        warnings: generated.issues.iter().map(ToString::to_string).collect(),
    }))
}
