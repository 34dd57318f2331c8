mod cli;
mod handlers;

pub use cli::ServeOptions;

use crate::backend::BackendOptions;
use crate::prelude::{eprintln, *};
use axum::{
    routing::{get, post},
    Router,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Settings shared, read-only, by every request.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base for project paths given relative to the server.
    pub workdir: PathBuf,
    pub backends: BackendOptions,
}

impl Config {
    /// Resolve a project directory from a request against the working directory.
    pub fn resolve(&self, project_dir: &str) -> PathBuf {
        let path = Path::new(project_dir);

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workdir.join(path)
        }
    }
}

/// The web front-end: static page plus the three JSON endpoints.
pub struct Server {
    addr: String,
    config: Arc<Config>,
}

impl Server {
    pub fn new(options: ServeOptions) -> Self {
        Self {
            addr: format!("{}:{}", options.host, options.port),
            config: Arc::new(Config {
                workdir: options.workdir,
                backends: options.backends,
            }),
        }
    }

    pub fn router(&self) -> Router {
        router(self.config.clone())
    }

    pub async fn run(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .map_err(|e| eyre!("Failed to bind to {}: {}", self.addr, e))?;

        log::info!("gamma listening on http://{}", self.addr);
        log::debug!("Project paths resolve against {}", self.config.workdir.display());

        axum::serve(listener, self.router())
            .await
            .map_err(|e| eyre!("Server error: {e}"))?;

        Ok(())
    }
}

pub fn router(config: Arc<Config>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/styles.css", get(handlers::styles))
        .route("/script.js", get(handlers::script))
        .route("/list-objects", post(handlers::list_objects))
        .route("/models", get(handlers::list_models))
        .route("/generate-gml", post(handlers::generate_gml))
        .layer(cors)
        .with_state(config)
}

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!(
            "Starting gamma on {}:{} (workdir {})",
            options.host,
            options.port,
            options.workdir.display()
        );
    }

    Server::new(options).run().await
}
