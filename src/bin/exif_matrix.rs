use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};

use exif_matrix::{
    ExiftoolTagger, GeneratorConfig, NoopTagger, OrientationTagger, is_exiftool_on_path,
};

#[derive(Parser, Debug)]
#[command(name = "exif-matrix", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the fixture tree and its note files (requires `exiftool`
    /// on PATH unless --skip-tagging is set).
    Generate(GenerateArgs),
    /// List the fixture matrix without writing anything.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Directory the matrix tree is written under.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    #[command(flatten)]
    matrix: MatrixArgs,

    /// Leaf-note body line count after which appends stop.
    #[arg(long, default_value_t = exif_matrix::DEFAULT_STABILIZE_THRESHOLD)]
    stabilize_threshold: usize,

    /// Checkerboard cell edge in pixels.
    #[arg(long, default_value_t = 48)]
    cell_size: u32,

    /// Write fixtures without tagging orientation metadata.
    #[arg(long, default_value_t = false)]
    skip_tagging: bool,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    #[command(flatten)]
    matrix: MatrixArgs,

    /// Emit the matrix as JSON instead of one path per line.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug)]
struct MatrixArgs {
    /// Base edge lengths the size cross-product is drawn from.
    #[arg(long, value_delimiter = ',', default_values_t = [768u32, 1024])]
    dimensions: Vec<u32>,

    /// Maximum allowed aspect-ratio skew max(w/h, h/w).
    #[arg(long, default_value_t = 4.0)]
    max_skew: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = GeneratorConfig {
        root: args.root,
        base_dimensions: args.matrix.dimensions,
        max_skew: args.matrix.max_skew,
        stabilize_threshold: args.stabilize_threshold,
        cell_size: args.cell_size,
    };

    let tagger: Box<dyn OrientationTagger> = if args.skip_tagging {
        Box::new(NoopTagger)
    } else {
        // Probe up front so a missing tool fails before any file is written.
        if !is_exiftool_on_path() {
            bail!("exiftool is required for orientation tagging, but was not found on PATH");
        }
        Box::new(ExiftoolTagger)
    };

    let summary = exif_matrix::run(&config, tagger.as_ref())?;
    eprintln!(
        "wrote {} fixtures, merged {} leaf references",
        summary.fixtures_written, summary.leaf_references_merged
    );
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let config = GeneratorConfig {
        base_dimensions: args.matrix.dimensions,
        max_skew: args.matrix.max_skew,
        ..GeneratorConfig::default()
    };
    let fixtures = exif_matrix::plan(&config)?;

    if args.json {
        serde_json::to_writer_pretty(std::io::stdout().lock(), &fixtures)?;
        println!();
    } else {
        for fixture in &fixtures {
            println!("{}", fixture.relative_path);
        }
    }
    Ok(())
}
