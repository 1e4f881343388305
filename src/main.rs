use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use ottl_rs::filter::{standard_enums, FilterConfigLoader, FilterProcessor, Record, RecordPaths};
use ottl_rs::ottl::{FunctionRegistry, TelemetrySettings};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

const CHANNEL_CAPACITY: usize = 1024;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile every rule of a filter config and report errors
    Check {
        /// Path to the filter config
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Filter JSON-lines records, printing the ones no rule drops
    Filter {
        /// Path to the filter config
        #[arg(short, long)]
        config: PathBuf,

        /// JSON-lines input, one record per line
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Evaluate a single condition against one JSON record
    Eval {
        /// The condition to evaluate
        #[arg(short, long)]
        condition: String,

        /// The record, as a JSON object
        #[arg(short, long, default_value = "{}")]
        record: String,
    },
}

fn load_processor(config: &Path) -> anyhow::Result<FilterProcessor> {
    let def = FilterConfigLoader::new()
        .load(config)
        .with_context(|| format!("failed to load {}", config.display()))?;
    Ok(FilterProcessor::from_config(&def)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Check { config } => {
            let processor = load_processor(&config)?;
            for rule in processor.rules() {
                println!("ok: {}", rule.name);
            }
        }
        Commands::Filter { config, input } => {
            let processor = Arc::new(load_processor(&config)?);
            let content = tokio::fs::read_to_string(&input)
                .await
                .with_context(|| format!("failed to read {}", input.display()))?;

            let (in_tx, in_rx) = mpsc::channel(CHANNEL_CAPACITY);
            let (out_tx, mut out_rx) = mpsc::channel::<Record>(CHANNEL_CAPACITY);

            let worker = {
                let processor = Arc::clone(&processor);
                tokio::spawn(async move { processor.run(in_rx, out_tx).await })
            };
            let printer = tokio::spawn(async move {
                while let Some(record) = out_rx.recv().await {
                    println!("{}", record.to_json());
                }
            });

            for (n, line) in content.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let record = Record::parse_line(line)
                    .with_context(|| format!("{}:{}", input.display(), n + 1))?;
                in_tx.send(record).await?;
            }
            drop(in_tx);

            let stats = worker.await?;
            printer.await?;
            for (rule, count) in &stats.dropped {
                log::info!("Rule '{}' dropped {} records", rule, count);
            }
        }
        Commands::Eval { condition, record } => {
            let record = Record::parse_line(&record).context("--record must be a JSON object")?;
            let parser = ottl_rs::ottl::Parser::<Record>::new(
                FunctionRegistry::new(),
                RecordPaths,
                standard_enums(),
                TelemetrySettings::new("eval"),
            );
            let evaluate = parser.parse_condition(&condition)?;
            println!("{}", evaluate(&record));
        }
    }

    Ok(())
}
