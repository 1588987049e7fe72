//! Linkhoard CLI - save links, import GitHub stars, and serve the JSON API.

mod commands;
mod config;
mod progress;
mod shutdown;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use console::Term;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "linkhoard")]
#[command(version)]
#[command(about = "A personal link aggregator")]
#[command(
    long_about = "Linkhoard saves websites, posts from X/Twitter and starred GitHub \
repositories as deduplicated items. It can run as a local CLI against the item \
store or serve the same operations as a token-authenticated JSON API."
)]
#[command(after_long_help = r#"EXAMPLES
    Save a link:
        $ linkhoard add https://blog.rust-lang.org/

    Import a file of URLs (one per line):
        $ linkhoard import bookmarks.txt

    Import a user's GitHub stars:
        $ linkhoard github stars octocat

    Create an API token and start the server:
        $ linkhoard token create --label laptop
        $ linkhoard serve --bind 0.0.0.0:8080

    Generate shell completions:
        $ linkhoard completions bash > ~/.local/share/bash-completion/completions/linkhoard

CONFIGURATION
    Linkhoard reads configuration from:
      1. ~/.config/linkhoard/config.toml (or $XDG_CONFIG_HOME/linkhoard/config.toml)
      2. ./linkhoard.toml
      3. Environment variables (LINKHOARD_* prefix, e.g., LINKHOARD_GITHUB_TOKEN)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    LINKHOARD_DATABASE_URL    Database connection string (default: ~/.local/state/linkhoard/linkhoard.db)
    LINKHOARD_USER_ID         User that CLI commands act as
    LINKHOARD_GITHUB_TOKEN    GitHub personal access token
    LINKHOARD_ENRICH_KEY      Anthropic API key for tweet context
    LINKHOARD_HTTP_TIMEOUT    Outbound request timeout in seconds (default: 15)
    LINKHOARD_HTTP_RATE       Outbound requests per second (default: 10)
    LINKHOARD_SERVER_BIND     API listen address (default: 127.0.0.1:8080)
"#)]
struct Cli {
    /// User to act as (overrides LINKHOARD_USER_ID)
    #[arg(short, long, global = true)]
    user: Option<Uuid>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Save a single URL
    Add {
        /// URL of a website or X/Twitter post
        url: String,
    },
    /// Save every URL in a file (one per line, `#` starts a comment)
    Import {
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// GitHub operations
    Github {
        #[command(subcommand)]
        action: GithubAction,
    },
    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
    /// Serve the JSON API
    Serve {
        /// Address to listen on (default from config or 127.0.0.1:8080)
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Rollback the last migration
    Down,
    /// Show migration status
    Status,
    /// Fresh install - drop all tables and reapply migrations
    Fresh,
}

#[derive(Subcommand)]
enum GithubAction {
    /// Import a user's starred repositories
    Stars {
        /// GitHub username whose stars to import
        username: String,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Create a token for the current user (printed once)
    Create {
        /// Label to recognize the token by
        #[arg(short, long, default_value = "cli")]
        label: String,
    },
    /// Revoke a token by id
    Revoke { id: Uuid },
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Display as a formatted table (default)
    #[default]
    Table,
    /// Display as JSON
    Json,
}

/// Create the parent directory of a `sqlite://` database file.
fn ensure_sqlite_dir(database_url: &str) -> std::io::Result<()> {
    let Some(db_path) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    // Strip query parameters (e.g., ?mode=rwc) before path operations
    let db_path = db_path.split('?').next().unwrap_or(db_path);
    let db_path = std::path::Path::new(db_path);

    if db_path.is_relative() && !db_path.as_os_str().is_empty() {
        tracing::warn!(
            "Database path '{}' is relative - behavior depends on current directory. \
             Consider using an absolute path.",
            db_path.display()
        );
    }

    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Structured logging when not attached to a TTY. The server always logs.
    let cli = Cli::parse();
    if !Term::stdout().is_term() || matches!(cli.command, Commands::Serve { .. }) {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("linkhoard=info,linkhoard_cli=info"),
        };

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    let config = config::Config::load();

    if let Commands::Completions { shell } = &cli.command {
        commands::meta::handle_completions(*shell)?;
        return Ok(());
    }

    let database_url = config
        .database_url()
        .ok_or("Could not determine a database URL. Set LINKHOARD_DATABASE_URL.")?;
    ensure_sqlite_dir(&database_url)?;

    if let Commands::Migrate { action } = cli.command {
        return commands::migrate::handle_migrate(action, &database_url).await;
    }

    let db = Arc::new(linkhoard::connect_and_migrate(&database_url).await?);

    match cli.command {
        Commands::Add { url } => {
            let user_id = config.user_id(cli.user)?;
            let transport = commands::shared::build_transport(&config)?;
            let ingestor = commands::shared::build_ingestor(db, &config, transport);
            commands::add::handle_add(&ingestor, &url, user_id).await?;
        }
        Commands::Import { file, output } => {
            let user_id = config.user_id(cli.user)?;
            let transport = commands::shared::build_transport(&config)?;
            let ingestor = commands::shared::build_ingestor(db, &config, transport);
            commands::import::handle_import(&ingestor, &file, user_id, output).await?;
        }
        Commands::Github { action } => {
            let user_id = config.user_id(cli.user)?;
            let transport = commands::shared::build_transport(&config)?;
            let syncer = commands::shared::build_stars_syncer(db, &config, transport);
            commands::github::handle_github(action, &syncer, user_id).await?;
        }
        Commands::Token { action } => {
            commands::token::handle_token(action, &db, &config, cli.user).await?;
        }
        Commands::Serve { bind } => {
            let transport = commands::shared::build_transport(&config)?;
            let ingestor =
                commands::shared::build_ingestor(Arc::clone(&db), &config, transport.clone());
            let stars = commands::shared::build_stars_syncer(db, &config, transport);
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            commands::serve::handle_serve(ingestor, stars, &bind).await?;
        }
        Commands::Migrate { .. } | Commands::Completions { .. } => {}
    }

    Ok(())
}
