use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use walkbook_core::{parse_walk_time, validate_walk_time, NewOrder};
use walkbook_daemon::config::DaemonConfig;
use walkbook_storage::Bookings;
use walkbook_storage_sqlite::SqliteOrderStore;

#[derive(Parser)]
#[command(name = "walkbook", version)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "WALKBOOK_DB", default_value = "walkbook.db")]
    db: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create or migrate the database and write a default walkbook.toml beside it
    Init,

    /// Book a walk (same rules as the HTTP API)
    Book {
        #[arg(long)]
        apartment: i64,
        #[arg(long)]
        pet_name: String,
        #[arg(long)]
        pet_breed: String,
        #[arg(long, value_parser = walk_time_arg)]
        walk_time: NaiveDateTime,
    },

    /// List the orders for a day (YYYY-MM-DD)
    List {
        #[arg(long)]
        day: String,
    },

    /// Check a walk time without booking it
    Check {
        #[arg(long, value_parser = walk_time_arg)]
        walk_time: NaiveDateTime,
    },
}

fn walk_time_arg(s: &str) -> Result<NaiveDateTime, String> {
    parse_walk_time(s).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Init => {
            SqliteOrderStore::open(&cli.db)?;
            let cfg_path = config_path_for(&cli.db);
            if cfg_path.exists() {
                println!("Config already present at {}", cfg_path.display());
            } else {
                let cfg = DaemonConfig {
                    db_path: cli.db.display().to_string(),
                    ..Default::default()
                };
                cfg.save_to(&cfg_path)?;
                println!("Wrote {}", cfg_path.display());
            }
            println!("Initialized walkbook db at {}", cli.db.display());
        }
        Command::Book {
            apartment,
            pet_name,
            pet_breed,
            walk_time,
        } => {
            let bookings = Bookings::new(SqliteOrderStore::open(&cli.db)?);
            let order = bookings.accept(NewOrder {
                apartment_number: apartment,
                pet_name,
                pet_breed,
                walk_time,
            })?;
            println!("{}", serde_json::to_string_pretty(&order)?);
        }
        Command::List { day } => {
            let bookings = Bookings::new(SqliteOrderStore::open(&cli.db)?);
            let orders = bookings.list_for_day(&day)?;
            println!("{}", serde_json::to_string_pretty(&orders)?);
        }
        Command::Check { walk_time } => {
            validate_walk_time(&walk_time).with_context(|| format!("walk time {walk_time}"))?;
            println!("ok");
        }
    }

    Ok(())
}

fn config_path_for(db: &Path) -> PathBuf {
    match db.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join("walkbook.toml"),
        _ => PathBuf::from("walkbook.toml"),
    }
}
