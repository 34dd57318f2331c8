use crate::prelude::*;
use clap::Parser;

mod backend;
mod error;
mod generate;
mod models;
mod prelude;
mod server;

#[cfg(test)]
mod test_support;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Generate GameMaker quiz questions with a local model, the OpenAI API or the Gemini CLI"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "GAMMA_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Serve the web front-end
    Serve(crate::server::ServeOptions),

    /// Generate quiz GML from the command line
    Generate(crate::generate::GenerateOptions),

    /// List locally installed Ollama models
    Models(crate::models::ModelsOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let app = App::parse();

    let default_level = if app.global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match app.command {
        SubCommands::Serve(options) => crate::server::run(options, app.global).await,
        SubCommands::Generate(options) => crate::generate::run(options, app.global).await,
        SubCommands::Models(options) => crate::models::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
