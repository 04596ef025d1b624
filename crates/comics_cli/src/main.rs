//! Command-line probe for the comics catalog core.
//!
//! # Responsibility
//! - Verify `comics_core` linkage and storage bootstrap from a shell.
//! - Seed and list a catalog database for quick local sanity checks.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use comics_core::db::{open_db, open_db_in_memory};
use comics_core::{
    default_log_level, init_logging, parse_release_date, AuthorId, ComicListQuery, ComicOrder,
    PageQuery,
};
use log::{info, warn};
use rusqlite::Connection;
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "comics")]
#[command(about = "Comics catalog storage probe", long_about = None)]
struct Cli {
    /// SQLite database file; an in-memory catalog is used when omitted
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error); only valid together with --log-dir
    #[arg(long, global = true, requires = "log_dir")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print core health and version
    Ping,
    /// Insert the Stan Lee / Marvel / Superhero example catalog
    SeedDemo,
    /// List comics, newest release first unless another order is given
    List {
        /// Only comics by this author id
        #[arg(long)]
        author: Option<AuthorId>,
        #[arg(long, value_enum)]
        order: Option<OrderArg>,
        #[arg(long)]
        limit: Option<u32>,
        /// Only comics released on or after this YYYY-MM-DD date
        #[arg(long, value_parser = parse_release_date)]
        since: Option<NaiveDate>,
        /// Only comics released before this YYYY-MM-DD date
        #[arg(long, value_parser = parse_release_date)]
        before: Option<NaiveDate>,
    },
    /// List comics released in the last ten years, newest first
    Recent,
    /// Delete an author and every comic that references it
    DeleteAuthor { id: AuthorId },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderArg {
    Newest,
    Oldest,
    Title,
}

impl From<OrderArg> for ComicOrder {
    fn from(value: OrderArg) -> Self {
        match value {
            OrderArg::Newest => ComicOrder::ReleaseDateDesc,
            OrderArg::Oldest => ComicOrder::ReleaseDateAsc,
            OrderArg::Title => ComicOrder::TitleAsc,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let command = cli.command.name();
    if let Err(e) = run(cli) {
        warn!("event=cli_{command} module=cli status=error");
        log::logger().flush();
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    info!("event=cli_{command} module=cli status=ok");
    log::logger().flush();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    match cli.command {
        Commands::Ping => {
            println!("comics_core ping={}", comics_core::ping());
            println!("comics_core version={}", comics_core::core_version());
            Ok(())
        }
        Commands::SeedDemo => commands::seed_demo(&open_connection(cli.db.as_ref())?),
        Commands::List {
            author,
            order,
            limit,
            since,
            before,
        } => {
            let query = ComicListQuery {
                author_id: author,
                released_on_or_after: since,
                released_before: before,
                order: order.map(ComicOrder::from),
                page: PageQuery { limit, offset: 0 },
                ..ComicListQuery::default()
            };
            commands::list(&open_connection(cli.db.as_ref())?, &query)
        }
        Commands::Recent => {
            commands::recent(&open_connection(cli.db.as_ref())?, Local::now().date_naive())
        }
        Commands::DeleteAuthor { id } => {
            commands::delete_author(&open_connection(cli.db.as_ref())?, id)
        }
    }
}

impl Commands {
    /// Event suffix used in `event=cli_<name>` log lines.
    fn name(&self) -> &'static str {
        match self {
            Self::Ping => "ping",
            Self::SeedDemo => "seed_demo",
            Self::List { .. } => "list",
            Self::Recent => "recent",
            Self::DeleteAuthor { .. } => "delete_author",
        }
    }
}

fn open_connection(path: Option<&PathBuf>) -> Result<Connection, Box<dyn std::error::Error>> {
    let conn = match path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    Ok(conn)
}
