use analytics::{AnalyticsEngine, ClassificationThresholds, ReportSink};
use api_client::YahooClient;
use clap::{Parser, Subcommand, ValueEnum};
use configuration::{AnalysisArgs, Settings};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::time::Duration;

mod analysis;
mod logging;
mod render;

use analysis::{AnalysisOutcome, run_analysis};
use render::{JsonSink, TerminalSink, write_insufficient_data};

/// Tickers offered by default: a broad index, large caps and two crypto assets.
const SUGGESTED_TICKERS: [&str; 6] = ["^GSPC", "AAPL", "GOOG", "TSLA", "BTC-USD", "ETH-USD"];

/// The main entry point for the Normality application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // NORMALITY__* overrides may live in a .env file; it is optional.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let Cli { config, command } = Cli::parse();

    // Execute the appropriate command
    match command {
        Commands::Analyze(args) => handle_analyze(&config, args).await,
        Commands::Tickers => {
            for ticker in SUGGESTED_TICKERS {
                println!("{ticker}");
            }
            Ok(())
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Do stock returns follow a normal distribution? Measures the skew and
/// excess kurtosis of log returns.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file (optional).
    #[arg(long, global = true, default_value = configuration::DEFAULT_CONFIG_FILE)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download prices and report the shape of their return distribution.
    Analyze(AnalyzeArgs),
    /// List the suggested tickers.
    Tickers,
}

#[derive(Parser)]
struct AnalyzeArgs {
    #[command(flatten)]
    analysis: AnalysisArgs,

    /// How to render the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

// ==============================================================================
// Analyze Command Logic
// ==============================================================================

/// Handles the orchestration of one analysis run.
async fn handle_analyze(config_path: &str, args: AnalyzeArgs) -> anyhow::Result<()> {
    let mut settings = configuration::load_config(config_path)?;
    args.analysis.apply(&mut settings.analysis)?;
    settings.validate()?;

    let _log_guard = logging::init(&settings.logging)?;
    // Logging depends on the settings, so the load itself is reported here.
    tracing::info!(
        config = config_path,
        ticker = %settings.analysis.ticker,
        interval = %settings.analysis.interval,
        start = %settings.analysis.start_date,
        end = %settings.analysis.end_date,
        "Starting analysis."
    );

    let engine = build_engine(&settings);
    let source = YahooClient::new(&settings.data_source)?;
    let request = settings.analysis.price_request();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!(
        "Fetching {} {} prices from {} to {}...",
        request.ticker, request.interval, request.start, request.end
    ));

    let outcome = run_analysis(&source, &request, &engine).await;
    spinner.finish_and_clear();

    let stdout = io::stdout().lock();
    match outcome? {
        AnalysisOutcome::Completed(report) => {
            let mut sink: Box<dyn ReportSink<Error = io::Error>> = match args.format {
                OutputFormat::Table => Box::new(TerminalSink::new(stdout)),
                OutputFormat::Json => Box::new(JsonSink::new(stdout)),
            };
            sink.render(&report)?;
        }
        AnalysisOutcome::InsufficientData { required, actual } => {
            let mut stdout = stdout;
            write_insufficient_data(&mut stdout, required, actual)?;
        }
    }

    Ok(())
}

fn build_engine(settings: &Settings) -> AnalyticsEngine {
    let stats = &settings.statistics;
    AnalyticsEngine::new()
        .with_min_sample_size(stats.min_sample_size)
        .with_histogram_bins(stats.histogram_bins)
        .with_thresholds(ClassificationThresholds {
            skew: stats.skew_threshold,
            kurtosis: stats.kurtosis_threshold,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_analyze_with_overrides() {
        let cli = Cli::try_parse_from([
            "normality",
            "analyze",
            "--ticker",
            "ETH-USD",
            "--interval",
            "1mo",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.analysis.ticker.as_deref(), Some("ETH-USD"));
                assert_eq!(args.format, OutputFormat::Json);
            }
            Commands::Tickers => panic!("expected analyze"),
        }
        assert_eq!(cli.config, configuration::DEFAULT_CONFIG_FILE);
    }

    #[test]
    fn engine_follows_statistics_settings() {
        let mut settings = Settings::default();
        settings.statistics.min_sample_size = 50;
        assert_eq!(build_engine(&settings).min_sample_size(), 50);
    }
}
