//! motag command-line tool
//!
//! Adds media-overlay class/id markers to XHTML files and removes them again.
//!
//! - `motag annotate chapter.xhtml -i`
//! - `motag deannotate chapter.xhtml -o clean.xhtml --keep-id`
//!
//! The rewritten document goes to stdout unless `-o` or `-i` is given; the
//! decision log always goes to stderr.

mod report;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use motag_core::{Config, DeannotateOptions, Reconciler, Severity};

/// Add or remove media-overlay class/id markers on XHTML documents
#[derive(Parser, Debug)]
#[command(name = "motag")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Annotate a chapter in place
    motag annotate -i chapter1.xhtml

    # Only paragraphs and spans, with zero-padded ids
    motag --tags p,span --id-format 'f%06d' --id-pattern '^f[0-9]{6}$' annotate chapter1.xhtml

    # Strip the markers but keep the generated ids
    motag deannotate --keep-id chapter1.xhtml -o clean.xhtml

    # Read from stdin, print only warnings as JSON
    cat chapter1.xhtml | motag --json --level warn annotate -
"#)]
struct Cli {
    /// TOML file with any of: tags, mo_class, nomo_class, id_pattern, id_format
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,

    /// Print the log as a JSON array instead of colored lines
    #[arg(long, global = true)]
    json: bool,

    /// Lowest severity to print (info or warn)
    #[arg(long, global = true, default_value = "info", value_name = "LEVEL")]
    level: Severity,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Give eligible elements the managed class and a generated id
    Annotate {
        #[command(flatten)]
        io: Io,
    },

    /// Remove the managed class and generated ids
    Deannotate {
        #[command(flatten)]
        io: Io,

        /// Leave the managed class in place
        #[arg(long)]
        keep_class: bool,

        /// Leave generated ids in place
        #[arg(long)]
        keep_id: bool,
    },
}

/// Where the document comes from and where it goes.
#[derive(Args, Debug)]
struct Io {
    /// Input document, or `-` for stdin
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Write the result to this file instead of stdout
    #[arg(short, long, value_name = "PATH", conflicts_with = "in_place")]
    output: Option<PathBuf>,

    /// Overwrite the input file with the result
    #[arg(short, long)]
    in_place: bool,
}

/// Per-field overrides on top of the configuration file.
#[derive(Args, Debug, Default)]
struct Overrides {
    /// Comma-separated tag names to process
    #[arg(long, global = true, value_delimiter = ',', value_name = "TAGS")]
    tags: Option<Vec<String>>,

    /// Class marking managed elements
    #[arg(long, global = true, value_name = "CLASS")]
    mo_class: Option<String>,

    /// Class marking excluded elements
    #[arg(long, global = true, value_name = "CLASS")]
    nomo_class: Option<String>,

    /// Regular expression recognizing generated ids
    #[arg(long, global = true, value_name = "REGEX")]
    id_pattern: Option<String>,

    /// printf-style template for generated ids
    #[arg(long, global = true, value_name = "FORMAT")]
    id_format: Option<String>,
}

impl Overrides {
    fn apply(&self, config: &mut Config) {
        if let Some(tags) = &self.tags {
            config.tags.clone_from(tags);
        }
        if let Some(mo_class) = &self.mo_class {
            config.mo_class.clone_from(mo_class);
        }
        if let Some(nomo_class) = &self.nomo_class {
            config.nomo_class.clone_from(nomo_class);
        }
        if let Some(id_pattern) = &self.id_pattern {
            config.id_pattern.clone_from(id_pattern);
        }
        if let Some(id_format) = &self.id_format {
            config.id_format.clone_from(id_format);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), &cli.overrides)?;
    let reconciler = Reconciler::new(&config).context("invalid configuration")?;

    let (io_args, outcome) = match &cli.command {
        Command::Annotate { io } => {
            let markup = read_input(&io.input)?;
            let outcome = reconciler
                .annotate(&markup)
                .with_context(|| format!("failed to annotate {}", io.input.display()))?;
            (io, outcome)
        }
        Command::Deannotate {
            io,
            keep_class,
            keep_id,
        } => {
            let markup = read_input(&io.input)?;
            let options = DeannotateOptions {
                remove_class: !keep_class,
                remove_id: !keep_id,
            };
            let outcome = reconciler
                .deannotate(&markup, options)
                .with_context(|| format!("failed to deannotate {}", io.input.display()))?;
            (io, outcome)
        }
    };

    let stderr = io::stderr();
    let mut err = stderr.lock();
    if cli.json {
        report::write_json(&mut err, &outcome.log, cli.level)?;
    } else {
        report::write_text(&mut err, &outcome, cli.level, report::use_color())?;
    }

    write_output(io_args, &outcome.markup)
}

/// Load the configuration file, if any, and apply command-line overrides.
fn load_config(path: Option<&Path>, overrides: &Overrides) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => Config::default(),
    };
    overrides.apply(&mut config);
    Ok(config)
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if is_stdin(path) {
        let mut markup = String::new();
        let _ = io::stdin()
            .read_to_string(&mut markup)
            .context("failed to read stdin")?;
        return Ok(markup);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_output(io_args: &Io, markup: &str) -> anyhow::Result<()> {
    let target = if io_args.in_place {
        if is_stdin(&io_args.input) {
            bail!("--in-place needs a file, not stdin");
        }
        Some(io_args.input.as_path())
    } else {
        io_args.output.as_deref()
    };

    match target {
        Some(path) => {
            fs::write(path, markup).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(markup.as_bytes())
                .and_then(|()| out.flush())
                .context("failed to write stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "motag",
            "deannotate",
            "--keep-id",
            "--tags",
            "p,li",
            "--level",
            "warn",
            "book.xhtml",
        ])
        .unwrap();

        assert_eq!(cli.level, Severity::Warn);
        assert_eq!(
            cli.overrides.tags.as_deref(),
            Some(&["p".to_string(), "li".to_string()][..])
        );
        match cli.command {
            Command::Deannotate {
                io,
                keep_class,
                keep_id,
            } => {
                assert_eq!(io.input, PathBuf::from("book.xhtml"));
                assert!(!keep_class);
                assert!(keep_id);
            }
            Command::Annotate { .. } => panic!("expected deannotate"),
        }
    }

    #[test]
    fn test_output_and_in_place_conflict() {
        let result = Cli::try_parse_from(["motag", "annotate", "-i", "-o", "x", "a.xhtml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_replace_only_given_fields() {
        let mut config = Config::default();
        let overrides = Overrides {
            tags: Some(vec!["p".to_string()]),
            id_format: Some("f%06d".to_string()),
            ..Overrides::default()
        };
        overrides.apply(&mut config);

        assert_eq!(config.tags, ["p"]);
        assert_eq!(config.id_format, "f%06d");
        assert_eq!(config.mo_class, "mo");
        assert_eq!(config.id_pattern, Config::default().id_pattern);
    }
}
