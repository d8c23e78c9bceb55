//! Formforge CLI
//!
//! Command-line companion for the Formforge API.
//!
//! # Usage
//!
//! ```bash
//! formforge projects list
//! formforge projects get 9b2d...
//! formforge config init --file-type ts --dir src/components
//! formforge add 9b2d...
//! formforge projects list --format json
//! ```

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "formforge")]
#[command(author = "Formforge")]
#[command(version = "0.1.0")]
#[command(about = "Formforge Command Line Interface", long_about = None)]
struct Cli {
    /// API endpoint URL
    #[arg(long, env = "FORMFORGE_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    /// Bearer token for authentication
    #[arg(long, env = "FORMFORGE_TOKEN")]
    token: Option<String>,

    /// Output format
    #[arg(long, short, default_value = "table")]
    format: output::OutputFormat,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage form projects
    Projects {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Scaffold a form component for a project
    Add {
        /// Project id to embed in the component
        project_id: String,
    },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// List all projects
    List,
    /// Get project details
    Get { id: String },
    /// Create a new project
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List submissions for a project
    Responses { id: String },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Create the scaffold preference file (form.config.json)
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
        /// File extension for scaffolded components
        #[arg(long, value_enum, default_value = "js")]
        file_type: config::FileType,
        /// Directory scaffolded components go into
        #[arg(long, value_enum, default_value = "components")]
        dir: config::DirPref,
    },
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = config::Config::load(cli.profile.as_deref()).unwrap_or_default();
    let token = cli.token.or(config.token);
    let api_url = if cli.api_url == "http://localhost:8080" {
        config.api_url.unwrap_or(cli.api_url)
    } else {
        cli.api_url
    };

    let client = commands::ApiClient::new(&api_url, token.as_deref());

    let result = match cli.command {
        Commands::Projects { action } => commands::projects::handle(action, &client, cli.format).await,
        Commands::Add { project_id } => commands::add::handle(&project_id).await,
        Commands::Config { action } => commands::config::handle(action).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
