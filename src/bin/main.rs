//! SerpApi CLI - Command-line interface for the google-search-results client
//!
//! Runs searches against any supported engine, looks up locations, shows
//! account details and fetches archived searches.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use google_search_results::{
    troubleshooting_info, ClientConfig, SearchQuery, SerpClient, SerpError, SerpResponse,
    ValueExt,
};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "serpapi")]
#[command(about = "Search engine results from the SerpApi service")]
#[command(version)]
struct Cli {
    /// SerpApi key
    #[arg(long, global = true, env = "SERPAPI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Service base URL
    #[arg(long, global = true, env = "SERPAPI_BASE_URL", default_value = "https://serpapi.com")]
    base_url: String,

    /// Request timeout in milliseconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a search
    Search {
        /// Search query
        query: String,

        /// Search engine (google, bing, baidu, yahoo, ...)
        #[arg(short, long, default_value = "google")]
        engine: String,

        /// Location to search from
        #[arg(short, long)]
        location: Option<String>,

        /// Extra request parameters as key=value
        #[arg(short, long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,

        /// Print the HTML results page instead of JSON
        #[arg(long)]
        html: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Look up supported locations
    Location {
        /// Free-text location
        query: String,

        /// Maximum number of locations
        #[arg(short, long, default_value = "5")]
        limit: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Show account information for the API key
    Account,
    /// Fetch a previous search by id
    Archive {
        /// The search_metadata.id of the original search
        id: String,

        /// Print the archived HTML page instead of JSON
        #[arg(long)]
        html: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(ValueEnum, Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got `{s}`")),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = ClientConfig::new().with_base_url(cli.base_url);
    if let Some(api_key) = cli.api_key {
        config = config.with_api_key(api_key);
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(timeout);
    }
    let client = SerpClient::new(config).context("invalid client configuration")?;

    let outcome = match cli.command {
        Commands::Search {
            query,
            engine,
            location,
            params,
            html,
            format,
        } => handle_search(&client, query, engine, location, params, html, format).await,
        Commands::Location {
            query,
            limit,
            format,
        } => handle_location(&client, &query, limit, format).await,
        Commands::Account => handle_account(&client).await,
        Commands::Archive { id, html, format } => handle_archive(&client, &id, html, format).await,
    };

    if let Err(error) = outcome {
        eprintln!("{} {}", "Error:".bold().red(), error);
        eprintln!("{} {}", "Troubleshooting:".bold(), troubleshooting_info(&error));
        bail!("request failed");
    }

    Ok(())
}

async fn handle_search(
    client: &SerpClient,
    query: String,
    engine: String,
    location: Option<String>,
    params: Vec<(String, String)>,
    html: bool,
    format: OutputFormat,
) -> Result<(), SerpError> {
    let mut search = SearchQuery::with_text(engine.as_str().into(), &query);
    if let Some(location) = location {
        search = search.param("location", location);
    }
    for (key, value) in params {
        search = search.param(key, value);
    }

    if html {
        println!("{}", client.get_html(&search).await?);
        return Ok(());
    }

    let rsp = client.get_json(&search).await?;
    display_search(&rsp, &format)
}

async fn handle_location(
    client: &SerpClient,
    query: &str,
    limit: usize,
    format: OutputFormat,
) -> Result<(), SerpError> {
    let locations = client.get_location(query, limit).await?;

    match format {
        OutputFormat::Json => print_json(&Value::Array(locations)),
        OutputFormat::Table => {
            println!("{} {}", "Locations matching".bold(), query.bold().blue());
            println!("{}", "─".repeat(80).dimmed());
            for location in &locations {
                let name = location.str_at("canonical_name").or_else(|_| location.str_at("name"))?;
                let google_id = location
                    .f64_at("google_id")
                    .map(|id| format!("{id:.0}"))
                    .unwrap_or_else(|_| "-".to_string());
                println!("{} {}", google_id.yellow(), name);
            }
            Ok(())
        }
    }
}

async fn handle_account(client: &SerpClient) -> Result<(), SerpError> {
    let account = client.get_account().await?;
    println!("{}", "Account".bold().blue());
    println!("{}", "─".repeat(80).dimmed());
    for (key, value) in &account {
        if key == "api_key" {
            continue;
        }
        println!("{}: {}", key.bold(), scalar(value));
    }
    Ok(())
}

async fn handle_archive(
    client: &SerpClient,
    id: &str,
    html: bool,
    format: OutputFormat,
) -> Result<(), SerpError> {
    if html {
        println!("{}", client.get_search_archive_html(id).await?);
        return Ok(());
    }

    let rsp = client.get_search_archive(id).await?;
    display_search(&rsp, &format)
}

fn display_search(rsp: &SerpResponse, format: &OutputFormat) -> Result<(), SerpError> {
    match format {
        OutputFormat::Json => print_json(&Value::Object(rsp.clone())),
        OutputFormat::Table => {
            let metadata = rsp.object_at("search_metadata")?;
            println!(
                "{} {}",
                "Search".bold(),
                metadata.str_at("id").unwrap_or("-").bold().blue()
            );
            println!("{}", "─".repeat(80).dimmed());

            let results = match rsp.array_at("organic_results") {
                Ok(results) => results.as_slice(),
                Err(SerpError::MissingField(_)) => &[],
                Err(error) => return Err(error),
            };

            for (i, result) in results.iter().enumerate() {
                println!("{}. {}", (i + 1).to_string().bold(), result.str_at("title")?.bold());
                if let Ok(link) = result.str_at("link") {
                    println!("   🔗 {}", link.blue().underline());
                }
                if let Ok(snippet) = result.str_at("snippet") {
                    let truncated = match snippet.char_indices().nth(200) {
                        Some((idx, _)) => format!("{}...", &snippet[..idx]),
                        None => snippet.to_string(),
                    };
                    println!("   📄 {}", truncated.italic());
                }
                println!();
            }

            println!("{} {}", "Total results:".bold(), results.len().to_string().bold());
            Ok(())
        }
    }
}

fn print_json(value: &Value) -> Result<(), SerpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| SerpError::DecodeError(e.to_string()))?;
    println!("{text}");
    Ok(())
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
