mod assistant;
mod config;
mod llm;
mod product;
mod prompt;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use assistant::Assistant;
use config::Config;
use llm::{GenerationParams, WatsonxClient};
use product::ProductRecord;

#[derive(Parser)]
#[command(name = "shopscout", about = "LLM-backed shopping search helper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a location to an ISO 3166-1 alpha-2 country code
    Country {
        /// Free-text location, e.g. "Austin, Texas"
        location: String,
    },
    /// Refine a raw shopping query into a structured product search
    Refine {
        /// Raw user query
        query: String,
        /// Location context for the search
        #[arg(short, long, default_value = "")]
        location: String,
    },
    /// Build a comparison table and summary from a JSON product list
    Compare {
        /// Path to a JSON array of product records
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let llm = WatsonxClient::new(
        &config.watsonx_url,
        &config.watsonx_api_key,
        &config.watsonx_project_id,
        GenerationParams {
            model_id: config.model_id.clone(),
            max_new_tokens: config.max_new_tokens,
            repetition_penalty: config.repetition_penalty,
            ..GenerationParams::default()
        },
    );
    let assistant = Assistant::new(llm);

    match cli.command {
        Commands::Country { location } => match assistant.resolve_country(&location).await {
            Some(code) => println!("{}", code),
            None => println!("No valid country code for {:?}", location),
        },
        Commands::Refine { query, location } => {
            let refined = assistant.refine_query(&query, &location).await?;
            println!("Refined Query: {}", refined.refined_query);
            println!("Additional Info: {}", refined.additional_info);
        }
        Commands::Compare { path } => {
            let raw = std::fs::read_to_string(&path)
                .context(format!("Failed to read product file: {}", path))?;
            let products: Vec<ProductRecord> = serde_json::from_str(&raw)
                .context(format!("Failed to parse product file: {}", path))?;

            let result = assistant.compare(&products, None, None).await;
            println!("{}\n\n{}", result.table, result.summary);
        }
    }

    Ok(())
}
