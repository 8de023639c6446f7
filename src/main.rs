use std::path::PathBuf;

use anyhow::{Context, Result};
use bdaycal_core::ConvertOptions;
use bdaycal_core::config::Config;
use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use tracing::info;

/// Default log level for our own crates when RUST_LOG is unset
const LOG_DIRECTIVES: [&str; 2] = ["bdaycal=info", "bdaycal_core=info"];

#[derive(Parser)]
#[command(name = "bdaycal")]
#[command(about = "Create a yearly birthday calendar (.ics) from a contacts export (.vcf)")]
struct Cli {
    /// vCard file to read contacts from
    input: PathBuf,

    /// iCalendar file to write
    output: PathBuf,

    /// Text appended to each name in the event title (default: "Geburtstag")
    #[arg(short, long)]
    title: Option<String>,

    /// Year to place events in and compute ages against (default: current year)
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=9999))]
    year: Option<i32>,

    /// Calendar display name
    #[arg(long)]
    name: Option<String>,

    /// Config file to use instead of ~/.config/bdaycal/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging()?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let options = ConvertOptions {
        title_suffix: cli.title.unwrap_or(config.title_suffix),
        calendar_name: cli.name.or(config.calendar_name),
        ..ConvertOptions::new(reference_date(cli.year)?)
    };
    info!("Using reference year {}", options.today.year());

    let conversion = bdaycal_core::convert_file(&cli.input, &cli.output, &options)
        .with_context(|| {
            format!(
                "Failed to convert {} to {}",
                cli.input.display(),
                cli.output.display()
            )
        })?;

    println!(
        "Wrote {} birthday(s) to {} ({} without year, {} contact(s) skipped)",
        conversion.events.len(),
        cli.output.display(),
        conversion.notices.len(),
        conversion.skipped
    );

    Ok(())
}

/// Initialize the logging system
fn initialize_logging() -> Result<()> {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        for directive in LOG_DIRECTIVES {
            filter = filter.add_directive(directive.parse()?);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Today's local date, moved into `year` when one is given
fn reference_date(year: Option<i32>) -> Result<NaiveDate> {
    let today = Local::now().date_naive();

    match year {
        None => Ok(today),
        Some(year) => today
            .with_year(year)
            .or_else(|| NaiveDate::from_ymd_opt(year, 1, 1))
            .with_context(|| format!("Invalid reference year {year}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_all_options() {
        let cli = Cli::try_parse_from([
            "bdaycal",
            "contacts.vcf",
            "birthdays.ics",
            "--title",
            "Birthday",
            "--year",
            "2025",
            "--name",
            "Birthdays",
        ])
        .unwrap();

        assert_eq!(cli.input, PathBuf::from("contacts.vcf"));
        assert_eq!(cli.output, PathBuf::from("birthdays.ics"));
        assert_eq!(cli.title.as_deref(), Some("Birthday"));
        assert_eq!(cli.year, Some(2025));
        assert_eq!(cli.name.as_deref(), Some("Birthdays"));
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_cli_rejects_out_of_range_year() {
        assert!(Cli::try_parse_from(["bdaycal", "a.vcf", "b.ics", "--year", "0"]).is_err());
    }

    #[test]
    fn test_reference_date_uses_given_year() {
        assert_eq!(reference_date(Some(2025)).unwrap().year(), 2025);
        assert_eq!(reference_date(Some(1)).unwrap().year(), 1);
    }
}
