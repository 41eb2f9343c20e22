use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use dj_cli::bootstrap::{self, RuntimeConfig};
use dj_cli::config::{AppConfig, InputKindConfig};
use dj_cli::{commands, logging};
use dj_core::core::DialogueId;
use dj_export::ExportFilter;

#[derive(Parser)]
#[command(name = "dj", about = "Group dialogue turns by dialogue id and export them as JSON")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to the configuration file [default: dj.toml, if present].
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Read the dataset from a CSV file instead of the configured input.
    #[arg(long, global = true, conflicts_with = "input_sqlite")]
    input_csv: Option<PathBuf>,

    /// Read the dataset from a SQLite database instead of the configured input.
    #[arg(long, global = true)]
    input_sqlite: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Group the dataset and write it as JSON (the default).
    Export(ExportArgs),
    /// Validate configuration and exit.
    Validate,
    /// Print the ungrouped dataset as a JSON array.
    Records,
    /// Print the turns of a single dialogue.
    Show {
        #[arg(allow_negative_numbers = true)]
        dialogue: DialogueId,
    },
    /// Append the rows of a CSV file to a SQLite database.
    Import {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        db: PathBuf,
    },
}

#[derive(Args, Default)]
struct ExportArgs {
    /// Output file.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Create missing parent directories of the output file.
    #[arg(long)]
    create_dirs: bool,
    /// Only export these dialogues (repeatable).
    #[arg(long = "dialogue", allow_negative_numbers = true)]
    dialogues: Vec<DialogueId>,
}

fn main() {
    let cli = Cli::parse();

    let config_path = AppConfig::locate(cli.config.as_deref());
    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => fail(format!("Error reading config: {e:#}")),
    };
    apply_input_overrides(&mut config, &cli);

    let command = cli.command.unwrap_or(Command::Export(ExportArgs::default()));
    if let Command::Export(args) = &command {
        apply_output_overrides(&mut config, args);
    }

    let runtime = match bootstrap::into_runtime(config) {
        Ok(runtime) => runtime,
        Err(e) => fail(format!("Config invalid: {e}")),
    };
    if let Err(e) = logging::init(&runtime.log_level, runtime.log_format) {
        fail(format!("Error: {e}"));
    }

    match command {
        Command::Export(args) => run_export(&runtime, args),
        Command::Validate => {
            let label = config_path
                .as_deref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "defaults".to_owned());
            println!("{}", format!("Config valid: {label}").bright_green());
        }
        Command::Records => match commands::render_records(&runtime) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(format!("Error: {e:#}")),
        },
        Command::Show { dialogue } => match commands::render_dialogue(&runtime, dialogue) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(format!("Error: {e:#}")),
        },
        Command::Import { csv, db } => match commands::import_csv(&csv, &db) {
            Ok(rows) => println!(
                "{}",
                format!("Imported {rows} rows into {}", db.display()).bright_green()
            ),
            Err(e) => fail(format!("Error: {e:#}")),
        },
    }
}

fn run_export(runtime: &RuntimeConfig, args: ExportArgs) {
    let filter = ExportFilter {
        dialogues: (!args.dialogues.is_empty()).then_some(args.dialogues),
    };

    match commands::run_export(runtime, &filter) {
        Ok(summary) => println!(
            "{}",
            format!(
                "Wrote {} dialogues ({} records) to {}",
                summary.dialogues,
                summary.records,
                summary.path.display()
            )
            .bright_green()
        ),
        Err(e) => fail(format!("Error: {e:#}")),
    }
}

fn apply_input_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(path) = &cli.input_csv {
        config.input.kind = InputKindConfig::Csv;
        config.input.path = Some(path.clone());
    } else if let Some(path) = &cli.input_sqlite {
        config.input.kind = InputKindConfig::Sqlite;
        config.input.path = Some(path.clone());
    }
}

fn apply_output_overrides(config: &mut AppConfig, args: &ExportArgs) {
    if let Some(path) = &args.output {
        config.output.path = path.clone();
    }
    if args.create_dirs {
        config.output.create_dirs = true;
    }
}

fn fail(message: String) -> ! {
    eprintln!("{}", message.red());
    std::process::exit(1);
}
