use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dedupx::{Canonicalizer, Record, Schema, StringDistance, StringMetric};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Merge clusters of duplicate records into canonical records
#[derive(Parser, Debug)]
#[command(name = "dedupx")]
#[command(about = "Canonical record synthesis for entity resolution", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build one canonical record per cluster
    Canonical {
        /// JSON file holding an array of clusters, each an array of records
        #[arg(short, long)]
        clusters: PathBuf,

        /// JSON schema file (array of field definitions)
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// How to choose among equally central values
        #[arg(long, value_enum, default_value_t = TieBreakArg::First)]
        tie_break: TieBreakArg,

        /// Metric of the default comparator for undeclared fields
        #[arg(long, value_enum, default_value_t = MetricArg::Levenshtein)]
        metric: MetricArg,

        /// Fail on fields the schema does not declare instead of using the default comparator
        #[arg(long)]
        no_default_comparator: bool,
    },

    /// List the blocking and indexed predicates a schema generates
    Predicates {
        /// JSON schema file (array of field definitions)
        #[arg(short, long)]
        schema: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TieBreakArg {
    First,
    Longest,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MetricArg {
    Levenshtein,
    Trigram,
    Jaccard,
}

impl From<MetricArg> for StringMetric {
    fn from(metric: MetricArg) -> Self {
        match metric {
            MetricArg::Levenshtein => StringMetric::Levenshtein,
            MetricArg::Trigram => StringMetric::Trigram,
            MetricArg::Jaccard => StringMetric::Jaccard,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Canonical {
            clusters: clusters_path,
            schema,
            tie_break,
            metric,
            no_default_comparator,
        } => {
            let schema = match schema {
                Some(path) => load_schema(&path)?,
                None => Schema::default(),
            };
            info!("Schema declares {} field(s)", schema.len());

            let mut canonicalizer = Canonicalizer::new(schema)
                .with_default_comparator(Arc::new(StringDistance::new(metric.into())));
            if no_default_comparator {
                canonicalizer = canonicalizer.without_default_comparator();
            }
            if let TieBreakArg::Longest = tie_break {
                canonicalizer = canonicalizer.with_tie_break(dedupx::PreferLongest);
            }

            let file = File::open(&clusters_path)
                .with_context(|| format!("opening clusters file {:?}", clusters_path))?;
            let clusters: Vec<Vec<Record>> = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing clusters file {:?}", clusters_path))?;
            info!("Loaded {} cluster(s)", clusters.len());

            let canonical = canonicalizer.canonical_records(&clusters)?;
            write_json(&canonical)?;
            info!("Wrote {} canonical record(s)", canonical.len());
        }
        Command::Predicates { schema } => {
            let schema = load_schema(&schema)?;
            let output = serde_json::json!({
                "blocking": schema.blocking_predicates(),
                "indexed": schema.indexed_predicates(),
            });
            write_json(&output)?;
        }
    }

    Ok(())
}

fn load_schema(path: &Path) -> anyhow::Result<Schema> {
    Schema::from_path(path).with_context(|| format!("loading schema {:?}", path))
}

fn write_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
