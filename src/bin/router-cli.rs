use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use trie_router::config::{build_router, load_config, ConfigError};

#[derive(Parser)]
#[command(name = "router-cli")]
#[command(about = "Check, resolve and inspect trie-router route tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a route file and summarize it
    Check { file: PathBuf },
    /// Resolve a request against a route file without starting a server
    Resolve {
        file: PathBuf,
        method: String,
        path: String,
    },
    /// List the routes loaded by a running server
    Inspect {
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file } => Ok(check(&file)),
        Commands::Resolve { file, method, path } => resolve(&file, &method, &path),
        Commands::Inspect { url } => {
            let res = reqwest::get(format!("{}/_router/routes", url.trim_end_matches('/'))).await?;
            match print_response(res).await? {
                true => Ok(ExitCode::SUCCESS),
                false => Ok(ExitCode::FAILURE),
            }
        }
    }
}

fn check(file: &Path) -> ExitCode {
    let config = match load_config(file) {
        Ok(config) => config,
        Err(ConfigError::Validation(errors)) => {
            eprintln!("{} error(s) in {}:", errors.len(), file.display());
            for error in errors {
                eprintln!("  - {error}");
            }
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match build_router(&config) {
        Ok(router) => {
            println!("{}: {} route(s)", file.display(), router.len());
            for method in router.methods() {
                let count = router.trie(method).map_or(0, |trie| trie.len());
                println!("  {method:<8} {count}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn resolve(file: &Path, method: &str, path: &str) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = load_config(file)?;
    let router = build_router(&config)?;

    match router.at(method, path) {
        Some(found) => {
            let doc = json!({
                "route": found.value.name,
                "method": found.value.method,
                "pattern": found.value.path,
                "status": found.value.status,
                "params": found.params,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("no route");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Prints a JSON response. Returns `false` when the server answered with an error status.
async fn print_response(res: reqwest::Response) -> Result<bool, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(false);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(true)
}
