use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use reader_attendance::{analyze, ingest, report, weeks_in_month, YearMonth};

mod logging;

#[derive(Parser)]
#[command(name = "reader-attendance")]
#[command(about = "Monthly full-attendance check for library borrowing logs", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every borrowing month of a reader as full or partial
    Analyze {
        /// Borrowing log as CSV with a `borrow_date` column
        #[arg(long)]
        csv: PathBuf,
        /// Reader name for the report title; defaults to the most frequent name in the log
        #[arg(long)]
        reader: Option<String>,
        #[arg(long, value_enum, env = "READER_ATTENDANCE_FORMAT", default_value_t = Format::Markdown)]
        format: Format,
        /// Write the report here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List the ISO weeks overlapping a month
    Weeks {
        /// Month as YYYY-MM
        #[arg(long)]
        month: YearMonth,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Markdown,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Analyze {
            csv,
            reader,
            format,
            out,
        } => {
            let rows = ingest::read_borrow_csv(&csv)?;
            let events = ingest::to_events(&rows);
            let result = analyze(&events)
                .with_context(|| format!("attendance analysis failed for {}", csv.display()))?;
            tracing::info!(
                full = result.total_full_attendance_count,
                partial = result.partial_attendance_months.len(),
                "analysis complete"
            );

            let rendered = match format {
                Format::Markdown => {
                    let reader = reader.or_else(|| ingest::primary_reader_name(&rows));
                    report::build_report(reader.as_deref(), &result)
                }
                Format::Json => serde_json::to_string_pretty(&result)?,
            };

            match out {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Report written to {}.", path.display());
                }
                None => println!("{rendered}"),
            }
        }
        Commands::Weeks { month } => {
            let weeks = weeks_in_month(month.year(), month.month())?;
            for week in weeks {
                println!("{week}");
            }
        }
    }

    Ok(())
}
