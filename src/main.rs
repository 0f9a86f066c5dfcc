use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use tweet_normalizer::app::CleanUseCase;
use tweet_normalizer::config::{CleaningConfig, Config};
use tweet_normalizer::logging;
use tweet_normalizer::metrics;
use tweet_normalizer::pipeline::TextNormalizer;
use tweet_normalizer::resources::Resources;

#[derive(Parser)]
#[command(name = "tweet_normalizer")]
#[command(about = "Normalize tweets for sentiment analysis")]
#[command(version = "0.1.0")]
struct Cli {
    /// Config file (defaults to $TWEET_NORMALIZER_CONFIG, then ./normalizer.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for log files
    #[arg(long, global = true, default_value = "logs")]
    log_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a labelled CSV file into an aligned texts/labels dataset
    Clean {
        /// Input CSV file
        #[arg(long)]
        input: PathBuf,
        /// Output directory (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Worker threads, 0 for one per core (overrides config)
        #[arg(long)]
        threads: Option<usize>,
        #[command(flatten)]
        cleaning: CleaningFlags,
    },
    /// Normalize a single text and print the result
    Text {
        text: String,
        #[command(flatten)]
        cleaning: CleaningFlags,
    },
    /// Print the text after every pipeline stage
    Trace {
        text: String,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        cleaning: CleaningFlags,
    },
}

/// Flags that switch optional stages on. They only ever enable a stage the
/// config file left off.
#[derive(Args)]
struct CleaningFlags {
    #[arg(long)]
    handle_negation: bool,
    #[arg(long)]
    remove_all_stopwords: bool,
    #[arg(long)]
    lemmatize: bool,
    #[arg(long)]
    keep_negation_marker: bool,
}

impl CleaningFlags {
    fn apply(&self, config: &mut CleaningConfig) {
        config.handle_negation |= self.handle_negation;
        config.remove_all_stopwords |= self.remove_all_stopwords;
        config.lemmatize |= self.lemmatize;
        config.keep_negation_marker |= self.keep_negation_marker;
    }
}

fn build_normalizer(config: &Config) -> Result<TextNormalizer> {
    let resources =
        Resources::shared(&config.resources).context("Failed to load normalization resources")?;
    Ok(TextNormalizer::new(config.cleaning, resources))
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let _guard = logging::init_logging(&cli.log_dir);

    let mut config = Config::resolve(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Clean {
            input,
            output,
            threads,
            cleaning,
        } => {
            cleaning.apply(&mut config.cleaning);
            if let Some(output) = output {
                config.output.directory = output;
            }
            if let Some(threads) = threads {
                config.batch.threads = threads;
            }

            metrics::init_metrics();
            info!(input = %input.display(), cleaning = ?config.cleaning, "Starting clean run");

            let run = CleanUseCase::new(config)
                .run(&input)
                .map_err(|e| {
                    error!("Clean run failed: {}", e);
                    e
                })
                .with_context(|| format!("Failed to clean {}", input.display()))?;

            let report = &run.manifest.report;
            println!("📊 Run {}", run.manifest.run_id);
            println!("   Rows read: {}", report.total);
            println!("   Kept: {}", report.kept);
            println!("   Dropped (empty): {}", report.dropped_empty);
            println!("   Invalid: {}", report.invalid);
            for path in &run.manifest.outputs {
                println!("   Output file: {}", path.display());
            }
        }
        Commands::Text { text, cleaning } => {
            cleaning.apply(&mut config.cleaning);
            let normalizer = build_normalizer(&config)?;
            println!("{}", normalizer.normalize(&text));
        }
        Commands::Trace {
            text,
            json,
            cleaning,
        } => {
            cleaning.apply(&mut config.cleaning);
            let normalizer = build_normalizer(&config)?;
            let trace = normalizer.trace(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&trace)?);
            } else {
                println!("{:<32} {:?}", "input", text);
                for step in &trace {
                    println!("{:<32} {:?}", step.stage.name(), step.text);
                }
            }
        }
    }

    Ok(())
}
