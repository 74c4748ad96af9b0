//! Command-line surface of the `homework` binary.

use crate::api::DEFAULT_API_URL;
use clap::{Args, Parser, Subcommand};
use homework_core::{HomeworkId, NewHomework};
use homework_server::{ServerConfig, DEFAULT_BIND_ADDR, DEFAULT_DB_FILE_NAME};
use std::path::PathBuf;

/// Level used by client commands when none is configured.
pub const CLIENT_LOG_LEVEL: &str = "warn";

/// Top-level CLI parser for the `homework` binary.
#[derive(Debug, Parser)]
#[command(name = "homework", version, about = "Homework diary server and client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the homework API used by client commands
    #[arg(long, global = true, env = "HOMEWORK_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true, env = "HOMEWORK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rotated log files (stderr when unset)
    #[arg(long, global = true, env = "HOMEWORK_LOG_DIR")]
    pub log_dir: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API over a SQLite diary
    Serve(ServeArgs),
    /// Show all homework, incomplete first, by due date
    List,
    /// Add a homework entry
    Add(AddArgs),
    /// Mark an entry as completed
    Done {
        id: HomeworkId,
        /// Mark the entry as not completed instead
        #[arg(long)]
        undo: bool,
    },
    /// Delete an entry
    Rm { id: HomeworkId },
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to listen on (`host:port`)
    #[arg(long, env = "HOMEWORK_BIND", default_value = DEFAULT_BIND_ADDR)]
    pub bind: String,

    /// SQLite diary file
    #[arg(long = "db", env = "HOMEWORK_DB_PATH", default_value = DEFAULT_DB_FILE_NAME)]
    pub db_path: PathBuf,

    /// Insert sample entries when the diary is empty
    #[arg(long, env = "HOMEWORK_SEED_SAMPLES")]
    pub seed_samples: bool,

    /// Reject new entries missing a due date, subject or title
    #[arg(long, env = "HOMEWORK_STRICT")]
    pub strict: bool,
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            bind_addr: args.bind,
            db_path: args.db_path,
            strict_validation: args.strict,
            seed_samples: args.seed_samples,
        }
    }
}

/// Fields are optional here so missing ones surface as a validation error
/// naming all of them, not as a clap usage error.
#[derive(Debug, Clone, Default, Args)]
pub struct AddArgs {
    /// Due date, `YYYY-MM-DD`
    #[arg(long)]
    pub due: Option<String>,

    #[arg(long)]
    pub subject: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    /// Kind of work, e.g. Practice or Theory
    #[arg(long = "type")]
    pub kind: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

impl From<AddArgs> for NewHomework {
    fn from(args: AddArgs) -> Self {
        Self {
            date_due: args.due,
            subject: args.subject,
            title: args.title,
            kind: args.kind,
            description: args.description,
        }
    }
}

impl Cli {
    /// Level to initialize logging with.
    ///
    /// `serve` defaults to the build-mode level; client commands stay quiet.
    pub fn effective_log_level(&self) -> String {
        match (&self.log_level, &self.command) {
            (Some(level), _) => level.clone(),
            (None, Commands::Serve(_)) => homework_core::default_log_level().to_string(),
            (None, _) => CLIENT_LOG_LEVEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AddArgs, Cli, Commands, CLIENT_LOG_LEVEL};
    use clap::{CommandFactory, Parser};
    use homework_core::{NewHomework, RequiredField};
    use homework_server::ServerConfig;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_flags_map_to_server_config() {
        let cli = Cli::try_parse_from([
            "homework",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--db",
            "/tmp/diary.sqlite",
            "--strict",
        ])
        .expect("cli should parse");

        let Commands::Serve(args) = cli.command else {
            panic!("expected serve command");
        };
        let config = ServerConfig::from(args);
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.db_path.to_str(), Some("/tmp/diary.sqlite"));
        assert!(config.strict_validation);
        assert!(!config.seed_samples);
    }

    #[test]
    fn add_with_missing_fields_still_parses() {
        let cli = Cli::try_parse_from(["homework", "add", "--subject", "Math"])
            .expect("cli should parse");
        let Commands::Add(args) = cli.command else {
            panic!("expected add command");
        };

        let draft = NewHomework::from(args);
        assert_eq!(
            draft.missing_required(),
            vec![RequiredField::DateDue, RequiredField::Title]
        );
    }

    #[test]
    fn add_type_flag_maps_to_kind() {
        let args = AddArgs {
            kind: Some("Theory".to_string()),
            ..AddArgs::default()
        };
        assert_eq!(NewHomework::from(args).kind.as_deref(), Some("Theory"));
    }

    #[test]
    fn done_and_rm_take_integer_ids() {
        let cli = Cli::try_parse_from(["homework", "done", "4", "--undo"])
            .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Done { id: 4, undo: true }));

        let cli = Cli::try_parse_from(["homework", "rm", "9"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::Rm { id: 9 }));

        assert!(Cli::try_parse_from(["homework", "rm", "abc"]).is_err());
    }

    #[test]
    fn explicit_log_level_wins_over_command_default() {
        let cli = Cli::try_parse_from(["homework", "list", "--log-level", "debug"])
            .expect("cli should parse");
        assert_eq!(cli.effective_log_level(), "debug");

        let cli = Cli::try_parse_from(["homework", "rm", "1"]).expect("cli should parse");
        if std::env::var_os("HOMEWORK_LOG_LEVEL").is_none() {
            assert_eq!(cli.effective_log_level(), CLIENT_LOG_LEVEL);
        }
    }
}
