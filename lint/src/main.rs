//! @ai:module:intent CLI entry point for the TODO task linter
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on config, linter, validator, output

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use todo_task_lint::{
    linter, output, Document, LintResult, OptionOverrides, OutputFormat, ProjectId, RuleOptions,
    Severity, Validator, DEFAULT_CONFIG_FILE, RULE_DESCRIPTION, RULE_ID,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "todo-task-lint")]
#[command(author, version, about = RULE_DESCRIPTION)]
#[command(long_about = format!("{RULE_DESCRIPTION}\n\nRule `{RULE_ID}`: TODO/FIXME comments must carry a task ID and a description."))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint a comment manifest or a directory of manifests
    Check {
        /// Path to a manifest file or directory (`-` reads a manifest from stdin)
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        rules: RuleArgs,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Validate a single comment body (`-` reads it from stdin)
    Comment {
        /// Comment text without delimiters
        text: String,

        #[command(flatten)]
        rules: RuleArgs,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Write the default options file
    Init {
        /// Output path for the options file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
struct RuleArgs {
    /// Options file (TOML), defaults to ./todo-task.toml when present
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Only accept task IDs with this project prefix, e.g. AB
    #[arg(long)]
    project_id: Option<String>,

    /// Require the task ID directly after TODO/FIXME (`--project-id-first=false` to disable)
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    project_id_first: Option<bool>,

    /// Minimum description length, 0 disables the check
    #[arg(long)]
    min_description_length: Option<usize>,

    /// Report violations as errors (failing the run) or warnings
    #[arg(long, value_enum)]
    severity: Option<SeverityArg>,
}

impl RuleArgs {
    fn resolve(&self) -> todo_task_lint::Result<RuleOptions> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        let base = match &self.config {
            Some(path) => RuleOptions::load(path)?,
            None if default_path.is_file() => RuleOptions::load(default_path)?,
            None => RuleOptions::default(),
        };

        let overrides = OptionOverrides {
            project_id: self.project_id.clone().map(ProjectId::new).transpose()?,
            project_id_first: self.project_id_first,
            min_description_length: self.min_description_length,
            severity: self.severity.map(Into::into),
        };

        Ok(base.merge_overrides(overrides))
    }

    fn validator(&self) -> todo_task_lint::Result<Validator> {
        let options = self.resolve()?;
        tracing::debug!("Rule options: {:?}", options);
        Validator::new(&options)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SeverityArg {
    Error,
    Warn,
}

impl From<SeverityArg> for Severity {
    fn from(s: SeverityArg) -> Self {
        match s {
            SeverityArg::Error => Severity::Error,
            SeverityArg::Warn => Severity::Warning,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

fn lint_path(path: &Path, validator: &Validator) -> todo_task_lint::Result<LintResult> {
    if path == Path::new("-") {
        let content = std::io::read_to_string(std::io::stdin())?;
        let document = Document::from_json_str(&content)?;
        Ok(linter::lint_document(&document, validator))
    } else if path.is_file() {
        linter::lint_file(path, validator)
    } else {
        linter::lint_directory(path, validator)
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("todo_task_lint=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            path,
            rules,
            format,
        } => {
            let result = rules
                .validator()
                .and_then(|validator| lint_path(&path, &validator));

            match result {
                Ok(lint_result) => {
                    tracing::info!(
                        "Checked {} comments in {} files",
                        lint_result.comments_checked,
                        lint_result.files_checked
                    );
                    println!("{}", output::format_lint_result(&lint_result, format.into()));

                    if lint_result.passed() {
                        ExitCode::SUCCESS
                    } else {
                        ExitCode::from(1)
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::from(2)
                }
            }
        }

        Commands::Comment {
            text,
            rules,
            format,
        } => {
            let body = if text == "-" {
                match std::io::read_to_string(std::io::stdin()) {
                    Ok(buf) => buf,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        return ExitCode::from(2);
                    }
                }
            } else {
                text
            };

            match rules.validator() {
                Ok(validator) => {
                    let violation = validator.validate(&body);
                    println!("{}", output::format_violation(violation.as_ref(), format.into()));

                    let fails = validator.options().severity == Severity::Error;
                    if violation.is_some() && fails {
                        ExitCode::from(1)
                    } else {
                        ExitCode::SUCCESS
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::from(2)
                }
            }
        }

        Commands::Init { output, force } => {
            if output.exists() && !force {
                eprintln!(
                    "Error: {} already exists (use --force to overwrite)",
                    output.display()
                );
                return ExitCode::from(2);
            }

            match RuleOptions::default().save(&output) {
                Ok(()) => {
                    println!("Wrote {}", output.display());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::from(2)
                }
            }
        }
    }
}
