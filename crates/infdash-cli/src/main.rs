mod report;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use infdash_analytics::{
    analyze_file, prepare_dataset, run_pipeline, NormalizeOptions, PipelineOptions, Table,
};
use infdash_core::{load_cost_table, AppConfig, CostTable, Sentiment};
use infdash_sentiment::{FusionEngine, KeywordClassifier};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "infdash")]
#[command(about = "Influencer sentiment and ROI analysis")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score a posts CSV, derive engagement and ROI, and write the processed file
    Analyze {
        /// Input CSV with a comment or text column
        #[arg(long)]
        input: PathBuf,

        /// Where to write the processed CSV
        #[arg(long, default_value = "processed_influencer_data.csv")]
        output: PathBuf,

        /// YAML cost table (overrides INFDASH_COST_TABLE_PATH)
        #[arg(long)]
        cost_table: Option<PathBuf>,
    },
    /// Print a markdown report for a posts CSV without writing files
    Report {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        cost_table: Option<PathBuf>,

        /// Number of influencers to list (defaults to INFDASH_TOP_N)
        #[arg(long)]
        top: Option<usize>,

        /// Emit JSON instead of markdown
        #[arg(long)]
        json: bool,
    },
    /// Reduce a raw social-media export to the analysis input layout
    Prepare {
        #[arg(long)]
        input: PathBuf,

        #[arg(long, default_value = "influencer_data.csv")]
        output: PathBuf,

        #[arg(long)]
        cost_table: Option<PathBuf>,
    },
    /// Label each non-blank line of a text file with the keyword classifier
    Classify {
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = infdash_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::debug!(parallel = config.parallel, top_n = config.top_n, "configuration loaded");

    match cli.command {
        Some(Commands::Analyze {
            input,
            output,
            cost_table,
        }) => run_analyze(&config, &input, &output, cost_table.as_deref()),
        Some(Commands::Report {
            input,
            cost_table,
            top,
            json,
        }) => run_report(
            &config,
            &input,
            cost_table.as_deref(),
            top.unwrap_or(config.top_n),
            json,
        ),
        Some(Commands::Prepare {
            input,
            output,
            cost_table,
        }) => run_prepare(&config, &input, &output, cost_table.as_deref()),
        Some(Commands::Classify { input }) => run_classify(&input),
        None => {
            println!("infdash: no command given; see `infdash --help`");
            Ok(())
        }
    }
}

/// Pick the cost table: `--cost-table`, then `INFDASH_COST_TABLE_PATH`, then
/// the built-in table with the configured fallback.
fn resolve_cost_table(flag: Option<&Path>, config: &AppConfig) -> anyhow::Result<CostTable> {
    if let Some(path) = flag.or(config.cost_table_path.as_deref()) {
        let table = load_cost_table(path)?;
        tracing::info!(
            path = %path.display(),
            entries = table.len(),
            fallback = table.fallback_cost(),
            "loaded cost table"
        );
        return Ok(table);
    }
    Ok(CostTable::builtin().with_fallback(config.fallback_cost))
}

fn pipeline_options(config: &AppConfig) -> PipelineOptions {
    PipelineOptions {
        normalize: NormalizeOptions {
            require_influencer: config.require_influencer,
        },
        parallel: config.parallel,
    }
}

fn run_analyze(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    cost_table: Option<&Path>,
) -> anyhow::Result<()> {
    let costs = resolve_cost_table(cost_table, config)?;
    let engine = FusionEngine::default();
    let out = analyze_file(input, output, &costs, &engine, &pipeline_options(config))?;

    println!("Processed {} rows -> {}", out.records.len(), output.display());
    println!();
    print!("{}", report::influencer_table(&out.influencers, usize::MAX));
    println!();
    println!("{}", report::best_line(out.best.as_ref()));
    if out.fallbacks.rows > 0 {
        println!("{}", report::fallback_line(&out.fallbacks));
    }
    Ok(())
}

fn run_report(
    config: &AppConfig,
    input: &Path,
    cost_table: Option<&Path>,
    top: usize,
    json: bool,
) -> anyhow::Result<()> {
    let costs = resolve_cost_table(cost_table, config)?;
    let table = Table::read_csv(input)?;
    let out = run_pipeline(table, &costs, &FusionEngine::default(), &pipeline_options(config))?;

    if json {
        let body = report::ReportJson::new(&out, top);
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print!("{}", report::render_markdown(&out, input, top));
    }
    Ok(())
}

fn run_prepare(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    cost_table: Option<&Path>,
) -> anyhow::Result<()> {
    let costs = resolve_cost_table(cost_table, config)?;
    let raw = Table::read_csv(input)?;
    let prepared = prepare_dataset(&raw, &costs)?;
    prepared.write_csv(output)?;
    println!("Prepared {} rows -> {}", prepared.len(), output.display());
    Ok(())
}

fn run_classify(input: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(input)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", input.display()))?;
    for label in classify_lines(&text, &KeywordClassifier::new()) {
        println!("{label}");
    }
    Ok(())
}

/// One label per non-blank line of `text`, in order.
fn classify_lines(text: &str, classifier: &KeywordClassifier) -> Vec<Sentiment> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| classifier.classify(l))
        .collect()
}
