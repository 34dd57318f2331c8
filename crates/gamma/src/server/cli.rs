use crate::backend::BackendOptions;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub struct ServeOptions {
    /// Port to listen on
    #[arg(short, long, env = "GAMMA_PORT", default_value = "5000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "GAMMA_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Directory that relative project paths are resolved against
    #[arg(long, env = "GAMMA_WORKDIR", default_value = ".")]
    pub workdir: PathBuf,

    #[clap(flatten)]
    pub backends: BackendOptions,
}
