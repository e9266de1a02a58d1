//! `plantlab` — CLI client for the PlantLab API.
//!
//! Manages contexts, authentication, entity records, and the derived
//! batch view. Think of it as `kubectl` for the lab.

mod commands;

use clap::{Parser, Subcommand};

/// PlantLab CLI tool.
#[derive(Parser, Debug)]
#[command(name = "plantlab", about = "PlantLab CLI client")]
struct Cli {
    /// Path to client config file (default: ~/.plantlab/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage contexts.
    #[command(name = "context")]
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },

    /// Switch the current context.
    #[command(name = "use")]
    Use {
        #[command(subcommand)]
        what: UseWhat,
    },

    /// Login to the current context's server.
    Login {
        /// Username.
        #[arg(long)]
        user: Option<String>,
        /// Password (not recommended — use interactive prompt).
        #[arg(long)]
        password: Option<String>,
    },

    /// Logout — clear token from current context.
    Logout,

    /// List records of an entity.
    Get {
        /// Entity name (e.g. subculturing, shifting, operators).
        entity: String,
        /// First filter value (usually a YYYY-MM-DD date or crop name).
        #[arg(long)]
        field1: Option<String>,
        /// Second filter value (usually a batch name).
        #[arg(long)]
        field2: Option<String>,
    },

    /// Create a record from field values.
    Add {
        /// Entity name.
        entity: String,
        /// Field assignments, repeatable: --set transferDate=2024-01-05.
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },

    /// Find a record by filter pair and update it.
    Edit {
        /// Entity name.
        entity: String,
        /// First filter value (date for most entities).
        #[arg(long)]
        date: String,
        /// Second filter value (batch name for most entities).
        #[arg(long)]
        value: String,
        /// Field assignments, repeatable.
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },

    /// Delete a record.
    Delete {
        /// Entity name.
        entity: String,
        /// Record ID.
        id: i64,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Show filter options for an entity.
    Options {
        /// Entity name.
        entity: String,
        /// Restrict second-field options to this first-field value.
        #[arg(long)]
        date: Option<String>,
    },

    /// Show the derived batch list.
    Batches {
        /// Use the outdoor-ready view instead of active indoor batches.
        #[arg(long = "outdoor-ready")]
        outdoor_ready: bool,
        /// Derive the list client-side from the indoor record tables
        /// instead of the server's batch endpoints.
        #[arg(long, conflicts_with = "outdoor_ready")]
        derived: bool,
        /// Keep polling and reprint when the list changes.
        #[arg(long)]
        watch: bool,
    },

    /// Check server status.
    Status,

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ContextAction {
    /// Register a new context.
    Create {
        /// Context name.
        name: String,
        /// API base URL (e.g. http://localhost:3001/api).
        #[arg(long)]
        server: Option<String>,
    },
    /// List all contexts.
    List,
    /// Set properties on a context.
    Set {
        name: String,
        #[arg(long)]
        server: Option<String>,
    },
    /// Delete a context.
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
enum UseWhat {
    /// Switch to a context.
    Context { name: String },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(plantlab_client::ClientConfig::default_path);

    let json_output = cli.output == "json";

    match cli.command {
        Commands::Context { action } => match action {
            ContextAction::Create { name, server } => {
                commands::context::create(&name, server.as_deref(), &config_path)?;
            }
            ContextAction::List => {
                commands::context::list(&config_path)?;
            }
            ContextAction::Set { name, server } => {
                commands::context::set(&name, server.as_deref(), &config_path)?;
            }
            ContextAction::Delete { name } => {
                commands::context::delete(&name, &config_path)?;
            }
        },

        Commands::Use { what } => match what {
            UseWhat::Context { name } => {
                commands::context::use_context(&name, &config_path)?;
            }
        },

        Commands::Login { user, password } => {
            let username = match user {
                Some(u) => u,
                None => {
                    eprint!("Username: ");
                    let mut s = String::new();
                    std::io::stdin().read_line(&mut s)?;
                    s.trim().to_string()
                }
            };
            let password = match password {
                Some(p) => p,
                None => rpassword::prompt_password("Password: ")?,
            };
            commands::login::login(&username, &password, &config_path)?;
        }

        Commands::Logout => {
            commands::login::logout(&config_path)?;
        }

        Commands::Get { entity, field1, field2 } => {
            commands::resource::get(
                &entity,
                field1.as_deref(),
                field2.as_deref(),
                json_output,
                &config_path,
            )?;
        }

        Commands::Add { entity, set } => {
            commands::resource::add(&entity, &set, &config_path)?;
        }

        Commands::Edit { entity, date, value, set } => {
            commands::resource::edit(&entity, &date, &value, &set, &config_path)?;
        }

        Commands::Delete { entity, id, yes } => {
            if !yes {
                eprint!("Delete {} record {}? [y/N]: ", entity, id);
                let mut s = String::new();
                std::io::stdin().read_line(&mut s)?;
                if !s.trim().eq_ignore_ascii_case("y") {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            commands::resource::delete(&entity, id, &config_path)?;
        }

        Commands::Options { entity, date } => {
            commands::resource::options(&entity, date.as_deref(), json_output, &config_path)?;
        }

        Commands::Batches { outdoor_ready, derived, watch } => {
            commands::batches::run(outdoor_ready, derived, watch, json_output, &config_path)?;
        }

        Commands::Status => {
            commands::resource::status(&config_path)?;
        }

        Commands::Version => {
            println!("plantlab cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
