mod render;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use birdlie_engine::{
    compute_span_best_days_with_options, compute_span_stats_with_options, month_grid,
    CalendarOptions, Group, MonthLocale, MonthWindow, Span, SpanDuration, WeekStartDay,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::render::Format;

#[derive(Parser)]
#[command(name = "birdlie")]
#[command(about = "Evaluate a trip group's availability calendar", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = Format::Text)]
    format: Format,

    /// Language for month labels
    #[arg(long, value_enum, global = true, default_value_t = LocaleArg::De)]
    locale: LocaleArg,

    /// First day of the week in calendar grids
    #[arg(long, value_enum, global = true, default_value_t = WeekStartArg::Monday)]
    week_start: WeekStartArg,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-day votes, percentages and highlights for each month of a span
    Stats(SnapshotArgs),
    /// Days on which the most members are fully free
    BestDays(SnapshotArgs),
    /// Week-by-week layout of one month
    Grid {
        /// Zero-based month index (0 = January) or month name
        #[arg(long, value_parser = parse_month)]
        month: u32,
        #[arg(long)]
        year: i32,
    },
    /// The months covered by a span
    Span(SpanArgs),
}

#[derive(Args)]
struct SpanArgs {
    /// Zero-based start month (0 = January) or month name ("Dezember")
    #[arg(long, value_parser = parse_month)]
    start_month: u32,

    #[arg(long)]
    start_year: i32,

    /// "1", "2", "1 Monat" or "2 Monate"
    #[arg(long, default_value = "1")]
    duration: SpanDuration,
}

impl SpanArgs {
    fn span(&self) -> Result<Span> {
        Span::new(self.start_month, self.start_year, self.duration).context("invalid span")
    }
}

#[derive(Args)]
struct SnapshotArgs {
    /// Group snapshot JSON file, or "-" for stdin
    #[arg(long, default_value = "-")]
    snapshot: PathBuf,

    #[command(flatten)]
    span: SpanArgs,
}

#[derive(Clone, Copy, ValueEnum)]
enum LocaleArg {
    De,
    En,
}

#[derive(Clone, Copy, ValueEnum)]
enum WeekStartArg {
    Monday,
    Sunday,
}

impl Cli {
    fn options(&self) -> CalendarOptions {
        CalendarOptions {
            week_start: match self.week_start {
                WeekStartArg::Monday => WeekStartDay::Monday,
                WeekStartArg::Sunday => WeekStartDay::Sunday,
            },
            locale: match self.locale {
                LocaleArg::De => MonthLocale::German,
                LocaleArg::En => MonthLocale::English,
            },
        }
    }
}

/// Accepts a zero-based index or a German or English month name.
fn parse_month(s: &str) -> std::result::Result<u32, String> {
    if let Ok(index) = s.parse::<u32>() {
        return Ok(index);
    }
    [MonthLocale::German, MonthLocale::English]
        .into_iter()
        .find_map(|locale| locale.month_index(s))
        .ok_or_else(|| format!("unknown month '{s}'"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = cli.options();
    let output = match &cli.command {
        Commands::Stats(args) => {
            let group = load_group(&args.snapshot)?;
            let months = compute_span_stats_with_options(&group, &args.span.span()?, &options);
            render::stats(&group, &months, cli.format)?
        }
        Commands::BestDays(args) => {
            let group = load_group(&args.snapshot)?;
            let months = compute_span_best_days_with_options(&group, &args.span.span()?, &options);
            render::best_days(&months, cli.format)?
        }
        Commands::Grid { month, year } => {
            let window = MonthWindow::new(*month, *year).context("invalid month")?;
            render::grid(&month_grid(window, options.week_start), &options, cli.format)?
        }
        Commands::Span(args) => render::span(&args.span()?, &options, cli.format)?,
    };
    print!("{output}");
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "birdlie=debug,birdlie_engine=debug,warn"
    } else {
        "birdlie=info,warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_group(path: &Path) -> Result<Group> {
    let json = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read snapshot from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?
    };
    let group = Group::from_json(&json).context("failed to parse group snapshot")?;
    tracing::info!(code = group.code(), members = group.members().len(), "snapshot loaded");
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_index_or_name() {
        assert_eq!(parse_month("3"), Ok(3));
        assert_eq!(parse_month("Dezember"), Ok(11));
        assert_eq!(parse_month("march"), Ok(2));
        assert_eq!(parse_month("Mai"), Ok(4));
        assert!(parse_month("Smarch").is_err());
    }
}
