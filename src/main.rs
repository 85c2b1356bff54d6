use clap::{Parser, Subcommand};
use colored::Colorize;
use jira_dashboard::cli;
use jira_dashboard::dashboard::DEFAULT_OUTPUT;
use jira_dashboard::locale::SUPPORTED_LOCALES;
use jira_dashboard::sample::DEFAULT_SAMPLE;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jira-dashboard")]
#[command(about = "Build an SLA dashboard sheet with live formulas from a Jira ticket export")]
#[command(long_about = "Jira Dashboard - SLA summary for Jira ticket exports

Reads an Excel export of tickets, renames its first sheet to 'Base_Dados'
and (re)creates a 'Dashboard' sheet with live formulas:

  Total Tickets        COUNTA over column A (header excluded)
  Tickets Out of SLA   COUNTIF column G = \"Fora do SLA\"
  % Out of SLA         out-of-SLA / total, 0 when there are no tickets
  Average Delay Days   AVERAGE over column F

COMMANDS:
  run      - Build the dashboard workbook
  inspect  - Show the dashboard formulas of a built workbook and their values
  sample   - Write a small sample ticket export

EXAMPLES:
  jira-dashboard run chamados.xlsx
  jira-dashboard run chamados.xlsx reports/Dashboard.xlsx --locale pt
  jira-dashboard inspect reports/Dashboard.xlsx --locale pt

Logging goes to stderr; tune it with RUST_LOG (e.g. RUST_LOG=jira_dashboard=debug).")]
#[command(version)]
struct Cli {
    /// Show verbose output and debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Build the dashboard workbook.

The input is edited in place: styles, column widths, merged cells and
other sheets are kept. The output file is overwritten if it exists;
missing parent directories are created. Formulas are written as text and
computed by the spreadsheet application when the file is opened.

LOCALES:
  en  COUNTA / COUNTIF / AVERAGE / IF, arguments separated by ','
  pt  CONT.VALORES / CONT.SE / MÉDIA / SE, arguments separated by ';'")]
    /// Build the dashboard workbook
    Run {
        /// Path to the Jira export (.xlsx)
        input: PathBuf,

        /// Output Excel file path (.xlsx)
        #[arg(default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Locale for formula function names
        #[arg(
            short,
            long,
            default_value = "en",
            env = "JIRA_DASHBOARD_LOCALE",
            value_parser = SUPPORTED_LOCALES
        )]
        locale: String,
    },

    /// Show the dashboard formulas of a built workbook and what they evaluate to
    Inspect {
        /// Path to a workbook produced by `run`
        file: PathBuf,

        /// Locale the formulas were written in (also picks the captions)
        #[arg(
            short,
            long,
            default_value = "en",
            env = "JIRA_DASHBOARD_LOCALE",
            value_parser = SUPPORTED_LOCALES
        )]
        locale: String,
    },

    /// Write a sample ticket export (5 tickets, 3 out of SLA)
    Sample {
        /// Output Excel file path (.xlsx)
        #[arg(default_value = DEFAULT_SAMPLE)]
        output: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "jira_dashboard=debug"
    } else {
        "jira_dashboard=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            input,
            output,
            locale,
        } => cli::run(input, output, locale, cli.verbose),

        Commands::Inspect { file, locale } => cli::inspect(file, locale),

        Commands::Sample { output } => cli::sample(output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".bold().red(), e);
            ExitCode::FAILURE
        }
    }
}
