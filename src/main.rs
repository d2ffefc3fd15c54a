//! # Media Labeler CLI (`mlabel`)
//!
//! The `mlabel` binary runs one labeling pass per invocation: it lists a
//! directory, reloads the assignment document, applies the requested
//! changes and, for `apply`, saves them.
//!
//! ## Usage
//!
//! ```bash
//! mlabel --config ./config/mlabel.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `mlabel show <dir>` | Show one page of media with current labels |
//! | `mlabel labels <dir>` | List the vocabulary and label usage |
//! | `mlabel apply <dir>` | Add/remove/rename labels, select labels, save |
//! | `mlabel stats <dir>` | Labeling progress and document overview |
//! | `mlabel export <dir>` | Files grouped by label as JSON |
//! | `mlabel completions <shell>` | Print a shell completion script |
//!
//! ## Examples
//!
//! ```bash
//! # Second page of images in ./photos/cats
//! mlabel show ./photos/cats --page 2
//!
//! # Define labels and label two files in one pass
//! mlabel apply ./photos/cats --add cat --add dog --set a.jpg=cat --set b.jpg=dog
//!
//! # Rename a label everywhere it is used
//! mlabel apply ./photos/cats --rename cat=feline
//!
//! # Label videos in the combined layout
//! mlabel apply ./clips --kind video --add intro --set c.mp4=intro
//! ```

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use media_labeler::apply::{self, ApplyRequest};
use media_labeler::core::MediaType;
use media_labeler::{config, export, labels, show, stats};

/// Media Labeler CLI: assign one label per image or video in a directory.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. A missing file falls back to the defaults.
#[derive(Parser)]
#[command(
    name = "mlabel",
    about = "Media Labeler: assign one label per image or video, persisted per directory",
    version,
    long_about = "Media Labeler keeps a label vocabulary and one label per media file. \
    Assignments are stored in a JSON document chosen by the configured storage variant \
    and survive across sessions; the vocabulary is rebuilt on every pass."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/mlabel.toml`.
    #[arg(long, global = true, default_value = "./config/mlabel.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Media type selector for the combined storage variant.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Image,
    Video,
}

impl From<KindArg> for MediaType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Image => MediaType::Image,
            KindArg::Video => MediaType::Video,
        }
    }
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Show one page of media files with their current labels.
    ///
    /// Pages hold 15 files and are numbered from 1. Out-of-range pages
    /// are clamped.
    Show {
        /// Directory to label.
        dir: PathBuf,

        /// Media type (combined variant only).
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        /// Page number, starting at 1.
        #[arg(long, default_value = "1")]
        page: usize,

        /// Print the page as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the label vocabulary with usage counts.
    Labels {
        /// Directory to label.
        dir: PathBuf,

        /// Media type (combined variant only).
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Run a labeling pass and save it.
    ///
    /// Vocabulary additions and removals apply first, then selections.
    /// A rename is applied at save time and rewrites every entry that
    /// carries the old label.
    Apply {
        /// Directory to label.
        dir: PathBuf,

        /// Media type (combined variant only).
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        /// Add a label to the vocabulary (repeatable).
        #[arg(long)]
        add: Vec<String>,

        /// Remove a label that no file uses (repeatable).
        #[arg(long)]
        remove: Vec<String>,

        /// Rename a label as `OLD=NEW`.
        ///
        /// Splits at the first `=`, so `OLD` cannot contain `=`; `NEW` may.
        #[arg(long, value_parser = parse_key_val)]
        rename: Option<(String, String)>,

        /// Select a label for a file as `FILE=LABEL`. Use `FILE=` or
        /// `FILE=NO LABEL` to clear it.
        #[arg(long = "set", value_parser = parse_key_val)]
        set: Vec<(String, String)>,

        /// Restrict selectable labels (comma-separated).
        #[arg(long, value_delimiter = ',')]
        choices: Vec<String>,

        /// Print the document that would be written without saving.
        #[arg(long)]
        dry_run: bool,
    },

    /// Show labeling progress for a directory.
    Stats {
        /// Directory to label.
        dir: PathBuf,

        /// Media type (combined variant only).
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Export files grouped by label as JSON.
    Export {
        /// Directory to label.
        dir: PathBuf,

        /// Media type (combined variant only).
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Parse a `key=value` pair for `--rename` and `--set` arguments.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{}'", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "mlabel", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::load_or_minimal(&cli.config)?;
    env_logger::Builder::new()
        .filter_level(cfg.log.level.to_level_filter())
        .parse_env("RUST_LOG")
        .init();
    log::debug!("config: {:?}", cfg);

    match cli.command {
        Commands::Show {
            dir,
            kind,
            page,
            json,
        } => {
            show::run_show(&cfg, &dir, kind.map(Into::into), page, json)?;
        }
        Commands::Labels { dir, kind } => {
            labels::run_labels(&cfg, &dir, kind.map(Into::into))?;
        }
        Commands::Apply {
            dir,
            kind,
            add,
            remove,
            rename,
            set,
            choices,
            dry_run,
        } => {
            let request = ApplyRequest {
                add,
                remove,
                rename,
                set,
                choices,
                dry_run,
            };
            apply::run_apply(&cfg, &dir, kind.map(Into::into), &request)?;
        }
        Commands::Stats { dir, kind } => {
            stats::run_stats(&cfg, &dir, kind.map(Into::into))?;
        }
        Commands::Export { dir, kind, output } => {
            export::run_export(&cfg, &dir, kind.map(Into::into), output.as_deref())?;
        }
        Commands::Completions { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val_splits_at_first_equals() {
        assert_eq!(
            parse_key_val("cat=feline").unwrap(),
            ("cat".to_string(), "feline".to_string())
        );
        assert_eq!(
            parse_key_val("a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
        assert_eq!(parse_key_val("a.jpg=").unwrap(), ("a.jpg".to_string(), String::new()));
        assert!(parse_key_val("no-separator").is_err());
    }
}
