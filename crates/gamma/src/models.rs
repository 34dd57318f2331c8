use crate::backend::BackendOptions;
use crate::prelude::{eprintln, println, *};

#[derive(Debug, clap::Args)]
pub struct ModelsOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[clap(flatten)]
    pub backends: BackendOptions,
}

pub async fn run(options: ModelsOptions, global: crate::Global) -> Result<()> {
    let ollama = options.backends.ollama(None);

    if global.verbose {
        eprintln!("Listing models with {}", ollama.program.display());
    }

    let models = ollama
        .list_models()
        .await
        .context("Failed to list local models")?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&models)?);
        return Ok(());
    }

    if models.is_empty() {
        println!("No local models installed.");
        return Ok(());
    }

    let mut table = new_table();
    table.set_titles(prettytable::row!["#", "MODEL"]);
    for (index, model) in models.iter().enumerate() {
        table.add_row(prettytable::row![index + 1, model]);
    }
    table.printstd();

    Ok(())
}
