use anyhow::{Context, Result};
use catalog_insights::config::{DATASET_FILE, DEFAULT_ROWS};
use catalog_insights::{Analyzer, PipelineConfig, SampleGenerator, Visualizer};
use clap::{CommandFactory, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run_args: RunArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a synthetic titles dataset to CSV
    Generate(RunArgs),
    /// Run the filter/group/aggregate queries and save the derived CSV files
    Analyze(RunArgs),
    /// Render the eight standard charts as PNG files
    Visualize(RunArgs),
    /// Generate (unless the dataset already exists), analyze and visualize in one go (the default)
    All(RunArgs),
}

#[derive(Parser, Debug, Clone)]
struct RunArgs {
    /// Path to the titles CSV file
    #[arg(short, long, default_value = DATASET_FILE)]
    data: PathBuf,

    /// Directory the derived CSV files and charts are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Number of synthetic records to generate
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Seed for reproducible generation
    #[arg(long)]
    seed: Option<u64>,

    /// Never fetch the dataset over the network
    #[arg(long)]
    offline: bool,

    /// Also export the analysis summary to this JSON file
    #[arg(long)]
    output_json: Option<PathBuf>,
}

impl RunArgs {
    fn config(&self) -> PipelineConfig {
        PipelineConfig::new()
            .dataset_path(&self.data)
            .output_dir(&self.output_dir)
            .offline(self.offline)
    }
}

fn run_generate(args: &RunArgs) -> Result<()> {
    let mut generator = SampleGenerator::new(args.rows);
    if let Some(seed) = args.seed {
        generator = generator.seed(seed);
    }
    generator
        .write_csv(&args.data)
        .with_context(|| format!("writing {}", args.data.display()))?;
    Ok(())
}

fn run_analyze(args: &RunArgs) -> Result<()> {
    let Some(summary) = Analyzer::new(args.config()).run_analysis()? else {
        return Ok(());
    };

    if let Some(path) = &args.output_json {
        fs::write(path, summary.to_json()?)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "analysis summary exported");
        println!("Analysis summary written to {}", path.display());
    }
    Ok(())
}

fn run_visualize(args: &RunArgs) -> Result<()> {
    Visualizer::new(args.config()).create_all_visualizations()?;
    Ok(())
}

fn run_all(args: &RunArgs) -> Result<()> {
    if args.data.exists() {
        info!(path = %args.data.display(), "dataset present, not regenerating");
        println!(
            "Using existing dataset '{}' (skipping generation)",
            args.data.display()
        );
    } else {
        run_generate(args)?;
    }
    println!();
    run_analyze(args)?;
    println!();
    run_visualize(args)
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Some(Commands::Generate(args)) => run_generate(args),
        Some(Commands::Analyze(args)) => run_analyze(args),
        Some(Commands::Visualize(args)) => run_visualize(args),
        Some(Commands::All(args)) => run_all(args),
        None => run_all(&cli.run_args),
    };
    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        let mut cmd = Cli::command();
        let _ = cmd.print_help();
        std::process::exit(1);
    }
}
