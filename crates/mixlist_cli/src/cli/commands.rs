//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use mixlist_core::{
    AppConfig, EditorField, EditorSession, ImageRetention, NumericPolicy, RecordId, RecordKind,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mixlist")]
#[command(about = "People, food and quotes in one local list", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database file (overrides MIXLIST_DB_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Directory that receives copied food images (overrides MIXLIST_IMAGE_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub image_dir: Option<PathBuf>,

    /// Log directory (overrides MIXLIST_LOG_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Numeric input handling: lenient (bad input becomes 0) or strict
    #[arg(long, global = true, value_name = "POLICY")]
    pub numeric: Option<NumericPolicy>,

    /// Image handling when an edit picks no new image: preserve or clear
    #[arg(long, global = true, value_name = "POLICY")]
    pub image_retention: Option<ImageRetention>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Applies flag overrides on top of environment configuration.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(db) = &self.db {
            config.db_path = db.clone();
        }
        if let Some(dir) = &self.image_dir {
            config.image_dir = dir.clone();
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = dir.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(policy) = self.numeric {
            config.numeric_policy = policy;
        }
        if let Some(retention) = self.image_retention {
            config.image_retention = retention;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show every record: people, then food, then quotes
    List {
        /// Print the aggregated list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a record (kind: user, food, quote)
    Add {
        kind: RecordKind,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Update a record; omitted fields keep their stored values
    Edit {
        kind: RecordKind,

        id: RecordId,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Show one record
    Show {
        kind: RecordKind,

        id: RecordId,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete one record
    Delete { kind: RecordKind, id: RecordId },

    /// Fetch one random quote and store it
    FetchQuote,

    /// Delete every record of every kind
    Clear,

    /// List the editor fields of a kind
    Fields { kind: RecordKind },
}

/// Editor field values passed as flags.
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    /// Name (user, food)
    #[arg(long)]
    pub name: Option<String>,

    /// Age (user)
    #[arg(long)]
    pub age: Option<String>,

    /// Calorie count (food)
    #[arg(long)]
    pub calories: Option<String>,

    /// Quote text (quote)
    #[arg(long)]
    pub text: Option<String>,

    /// Quote author (quote)
    #[arg(long)]
    pub author: Option<String>,

    /// Image file to copy into the image directory (food)
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,
}

impl FieldArgs {
    /// Copies provided values into the session.
    ///
    /// Returns the flags that do not apply to the session's kind; those are
    /// left untouched.
    pub fn apply(&self, session: &mut EditorSession) -> Vec<&'static str> {
        let visible = session.visible_fields();
        let mut ignored = Vec::new();

        let text_flags = [
            (EditorField::Name, "--name", &self.name),
            (EditorField::Age, "--age", &self.age),
            (EditorField::Calories, "--calories", &self.calories),
            (EditorField::QuoteText, "--text", &self.text),
            (EditorField::Author, "--author", &self.author),
        ];
        for (field, flag, value) in text_flags {
            let Some(value) = value else { continue };
            if visible.contains(&field) {
                session.fields_mut().set(field, value.as_str());
            } else {
                ignored.push(flag);
            }
        }

        if let Some(image) = &self.image {
            if visible.contains(&EditorField::Image) {
                session.select_image(image.clone());
            } else {
                ignored.push("--image");
            }
        }

        ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use mixlist_core::EditorOptions;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn kind_accepts_person_alias() {
        let cli = Cli::try_parse_from(["mixlist", "fields", "person"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Fields {
                kind: RecordKind::Person
            }
        ));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(Cli::try_parse_from(["mixlist", "add", "car"]).is_err());
    }

    #[test]
    fn global_flags_override_config() {
        let cli = Cli::try_parse_from([
            "mixlist",
            "list",
            "--db",
            "/tmp/x.sqlite3",
            "--numeric",
            "strict",
            "--image-retention",
            "clear",
        ])
        .unwrap();
        let mut config = AppConfig::with_data_dir("/data");
        cli.apply_overrides(&mut config);

        assert_eq!(config.db_path, PathBuf::from("/tmp/x.sqlite3"));
        assert_eq!(config.numeric_policy, NumericPolicy::Strict);
        assert_eq!(config.image_retention, ImageRetention::Clear);
        assert_eq!(config.image_dir, PathBuf::from("/data/images"));
    }

    #[test]
    fn apply_reports_flags_foreign_to_kind() {
        let args = FieldArgs {
            name: Some("Alice".to_string()),
            calories: Some("100".to_string()),
            image: Some(PathBuf::from("/tmp/a.png")),
            ..FieldArgs::default()
        };
        let mut session = EditorSession::create(RecordKind::Person, EditorOptions::default());

        let ignored = args.apply(&mut session);

        assert_eq!(ignored, vec!["--calories", "--image"]);
        assert_eq!(session.fields().name, "Alice");
        assert_eq!(session.fields().calories, "");
        assert!(session.preview_image().is_none());
    }
}
