//! Structify Server CLI
//!
//! Starts the HTTP server for the text structuring service.

use anyhow::Context;
use std::env;
use std::process;
use structify_server::config::ServerConfig;
use structify_server::start_server;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        let config_path = &args[2];
        ServerConfig::from_file(config_path)
            .with_context(|| format!("loading config from '{config_path}'"))?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else if let Ok(config_path) = env::var("STRUCTIFY_CONFIG") {
        ServerConfig::from_file(&config_path)
            .with_context(|| format!("loading config from '{config_path}'"))?
    } else {
        eprintln!("Warning: No config file specified, using default test configuration");
        eprintln!("Usage: structify-server --config <path-to-config.toml>");
        eprintln!();
        let mut config = ServerConfig::default_test_config();
        config.apply_env_overrides();
        config
    };

    start_server(config).await.context("server exited")?;

    Ok(())
}

fn print_help() {
    println!("Structify Server - Unstructured Text to Structured JSON");
    println!();
    println!("USAGE:");
    println!("    structify-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    STRUCTIFY_CONFIG           Config file path (when --config is absent)");
    println!("    STRUCTIFY_BIND_ADDRESS     Override bind address");
    println!("    STRUCTIFY_BIND_PORT        Override bind port");
    println!("    STRUCTIFY_LLM_ENDPOINT     Override LLM endpoint");
    println!("    STRUCTIFY_LLM_MODEL        Override LLM model");
    println!("    STRUCTIFY_LLM_API_KEY      Override LLM API key");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - bind_address: IP address to bind (e.g., '127.0.0.1')");
    println!("    - bind_port: Port number (e.g., 8080)");
    println!("    - [llm]: endpoint, model, api_key");
    println!("    - [engine]: max_text_length, completion_timeout_secs,");
    println!("      schema_name, examples_separator, [engine.synthesizer]");
    println!();
}
