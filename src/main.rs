use clap::{Parser, Subcommand};
use sortbench::{
    app::{App, IngestSummary},
    average,
    engine::{build_concurrent, Diagnostic, DiagnosticSink, LogSink},
    error::user_friendly_message,
    generate::DatasetGenerator,
    report::{render_report, render_skipped_rows, Report},
    EngineConfig, Result, TimeUnit,
};
use std::path::PathBuf;

/// Sorting benchmark aggregator
#[derive(Parser)]
#[command(name = "sortbench", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Benchmark result CSV; repeat to average several runs
    #[arg(long = "source", short = 's', global = true)]
    sources: Vec<PathBuf>,

    /// Presentation unit (ns, us, ms, s, min, h)
    #[arg(long, short = 'u', global = true)]
    unit: Option<TimeUnit>,
}

#[derive(Subcommand)]
enum Command {
    /// Browse tables and averages in the terminal
    View,
    /// Print every table and the averages as text
    Report {
        /// Also write a JSON report to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Write input datasets for every configured size
    Generate {
        /// Output directory
        #[arg(long)]
        out: PathBuf,
        /// Seed for reproducible datasets
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load_from(path)?,
        None => EngineConfig::load()?,
    };

    if !cli.sources.is_empty() {
        config = config.with_sources(cli.sources.clone());
    }
    if let Some(unit) = cli.unit {
        config = config.with_unit(unit);
    }

    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    if let Some(Command::Generate { out, seed }) = &cli.command {
        let mut generator = match seed {
            Some(seed) => DatasetGenerator::with_seed(*seed),
            None => DatasetGenerator::new(),
        };
        let written = generator.write_all(out, &config.axes.sizes)?;
        println!("Wrote {} datasets to {}", written.len(), out.display());
        return Ok(());
    }

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let collection = build_concurrent(&config.sources, &config.axes, &mut diagnostics).await?;
    let averages = average(&collection, &config.axes)?;

    let mut sink = LogSink::default();
    for diagnostic in &diagnostics {
        sink.emit(diagnostic.clone());
    }

    match cli.command {
        Some(Command::Report { json }) => {
            print!("{}", render_report(&config.axes, &collection, &averages, config.unit));
            print!("{}", render_skipped_rows(&diagnostics));
            if let Some(path) = json {
                Report::new(&config.axes, &collection, &averages, config.unit).write_json(&path)?;
                println!("JSON report written to {}", path.display());
            }
            Ok(())
        }
        _ => {
            let summary = IngestSummary {
                rows_skipped: sink.rows_skipped,
                sources_failed: sink.sources_failed,
            };
            let mut app = App::new(config.axes, collection, averages, config.unit, summary);
            app.run()
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("{}", user_friendly_message(&e));
        std::process::exit(1);
    }
}
