//! Command-line front end for the SkillRank core.
//!
//! # Responsibility
//! - Resolve configuration from file and flags.
//! - Open the store explicitly and drive ranking/message use-cases.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::warn;
use skillrank_core::db::open_from_config;
use skillrank_core::{
    core_version, init_from_config, load_config, MessageService, RankingFilter, RankingService,
    RankingServiceError, SkillRankConfig, SqliteMessageRepository, SqliteRankingStore,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skillrank")]
#[command(author, version, about = "Record skill rankings and compute averages")]
struct Cli {
    /// Path to TOML config file
    #[arg(short, long, global = true, env = "SKILLRANK_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file (in-memory when omitted)
    #[arg(long, global = true, env = "SKILLRANK_DB")]
    db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the sample Java rankings
    Seed,

    /// Record one ranking
    Add {
        subject: String,
        observer: String,
        skill: String,
        value: i32,
    },

    /// Print the truncated average ranking for a subject and skill
    Average { subject: String, skill: String },

    /// Print count/sum/min/max for a subject and skill
    Summary {
        subject: String,
        skill: String,
        #[arg(long)]
        json: bool,
    },

    /// List rankings, optionally filtered
    List {
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        observer: Option<String>,
        #[arg(long)]
        skill: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// Save or list messages
    Message {
        #[command(subcommand)]
        command: MessageCommand,
    },

    /// Display version information
    Version,
}

#[derive(Subcommand)]
enum MessageCommand {
    /// Save one message
    Save { text: String },
    /// List all messages
    List {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    init_from_config(&config.logging)
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;

    if let Commands::Version = cli.command {
        println!("skillrank {}", core_version());
        return Ok(());
    }

    if let Some(notice) = in_memory_notice(&config) {
        eprintln!("warning: {notice}");
        warn!("event=cli_start module=cli status=warn reason=in_memory_database");
    }
    let conn = open_from_config(&config.database).context("failed to open database")?;

    match cli.command {
        Commands::Message { command } => {
            let service = MessageService::new(SqliteMessageRepository::new(&conn));
            run_message_command(&service, command)
        }
        command => {
            let mut service = RankingService::new(SqliteRankingStore::new(conn));
            run_ranking_command(&mut service, command)
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<SkillRankConfig> {
    let mut config = match cli.config.as_deref() {
        Some(path) => load_config(path)?,
        None => SkillRankConfig::default(),
    };

    if let Some(db) = cli.db.clone() {
        config.database.path = Some(db);
    }
    if let Some(level) = cli.log_level.clone() {
        config.logging.level = Some(level);
    }
    if let Some(dir) = cli.log_dir.clone() {
        config.logging.dir = Some(dir);
    }
    Ok(config)
}

/// Explains why data does not persist when no database file is configured.
fn in_memory_notice(config: &SkillRankConfig) -> Option<&'static str> {
    match config.database.path {
        Some(_) => None,
        None => Some(
            "no database file configured (--db, SKILLRANK_DB or [database].path); \
             using an in-memory database that is discarded on exit",
        ),
    }
}

fn run_ranking_command(
    service: &mut RankingService<SqliteRankingStore>,
    command: Commands,
) -> Result<()> {
    match command {
        Commands::Seed => {
            let seeded = service.populate_sample_data()?;
            println!("seeded {} rankings", seeded.len());
        }
        Commands::Add {
            subject,
            observer,
            skill,
            value,
        } => {
            let ranking = service.add_ranking(&subject, &observer, &skill, value)?;
            println!("added ranking {}", ranking.id);
        }
        Commands::Average { subject, skill } => {
            match service.average_ranking_for(&subject, &skill) {
                Ok(average) => println!("{average}"),
                Err(RankingServiceError::NoRankings { .. }) => {
                    println!("no rankings for {subject} in {skill}");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Commands::Summary {
            subject,
            skill,
            json,
        } => {
            let summary = service.ranking_summary(&subject, &skill)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                let average = summary
                    .average()
                    .map_or_else(|| "-".to_string(), |value| value.to_string());
                println!(
                    "count={} sum={} average={}",
                    summary.count, summary.sum, average
                );
            }
        }
        Commands::List {
            subject,
            observer,
            skill,
            json,
        } => {
            let filter = RankingFilter {
                subject,
                observer,
                skill,
            };
            let rankings = service.find_rankings(&filter)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rankings)?);
            } else {
                for ranking in rankings {
                    println!(
                        "{}\t{}\t{}\t{}\t{}",
                        ranking.id,
                        ranking.subject.name,
                        ranking.observer.name,
                        ranking.skill.name,
                        ranking.value
                    );
                }
            }
        }
        Commands::Message { .. } | Commands::Version => {}
    }
    Ok(())
}

fn run_message_command(
    service: &MessageService<SqliteMessageRepository<'_>>,
    command: MessageCommand,
) -> Result<()> {
    match command {
        MessageCommand::Save { text } => {
            let message = service.save_message(text)?;
            println!("saved message {}", message.id);
        }
        MessageCommand::List { json } => {
            let messages = service.list_messages()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&messages)?);
            } else {
                for message in messages {
                    println!("{}\t{}", message.id, message.text);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{in_memory_notice, resolve_config, Cli, Commands};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config_defaults() {
        let cli = Cli::parse_from([
            "skillrank",
            "--db",
            "/tmp/ranks.db",
            "--log-level",
            "warn",
            "average",
            "J. C. Smell",
            "Java",
        ]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.database.path, Some(PathBuf::from("/tmp/ranks.db")));
        assert_eq!(config.logging.level.as_deref(), Some("warn"));
        assert!(matches!(cli.command, Commands::Average { .. }));
    }

    #[test]
    fn in_memory_database_is_reported_until_a_file_is_configured() {
        let cli = Cli::parse_from(["skillrank", "seed"]);
        let mut config = resolve_config(&cli).unwrap();
        config.database.path = None;
        let notice = in_memory_notice(&config).unwrap();
        assert!(notice.contains("--db"));

        config.database.path = Some(PathBuf::from("/tmp/ranks.db"));
        assert!(in_memory_notice(&config).is_none());
    }
}
