use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, ValueEnum};
use device_bezel_rs::image_pipeline::{
    BezelCompositePipeline, BezelSet, CompositeConfig, Destination, PngCompression,
};
use device_bezel_rs::logger;
use tracing::{error, info};

/// Place screenshots inside device bezel templates.
#[derive(Parser, Debug)]
#[command(name = "device-bezel", version, about)]
#[command(group(ArgGroup::new("destination").args(["in_place", "output", "output_file"])))]
struct Cli {
    /// Bezel template PNG with a transparent screen; pass one portrait and/or one landscape template
    #[arg(long = "bezel", required = true, value_name = "PNG")]
    bezels: Vec<PathBuf>,

    /// Overwrite the input files
    #[arg(long)]
    in_place: bool,

    /// Directory to write `<name>.png` results into
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Exact output path (single input only)
    #[arg(long, value_name = "PNG")]
    output_file: Option<PathBuf>,

    /// PNG compression level
    #[arg(long, value_enum, default_value_t = CompressionArg::Default)]
    compression: CompressionArg,

    /// Maximum number of screenshots processed at once
    #[arg(long, short = 'j', value_name = "N")]
    jobs: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Screenshot files
    #[arg(required = true, value_name = "FILES")]
    files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompressionArg {
    Fast,
    Default,
    Best,
}

impl From<CompressionArg> for PngCompression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Fast => PngCompression::Fast,
            CompressionArg::Default => PngCompression::Default,
            CompressionArg::Best => PngCompression::Best,
        }
    }
}

impl Cli {
    fn destination(&self) -> Result<Destination> {
        if self.in_place {
            Ok(Destination::InPlace)
        } else if let Some(dir) = &self.output {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating output directory {}", dir.display()))?;
            Ok(Destination::Directory(dir.clone()))
        } else if let Some(file) = &self.output_file {
            Ok(Destination::File(file.clone()))
        } else {
            Ok(Destination::Suffixed)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let destination = cli.destination()?;

    let config = CompositeConfig::builder()
        .compression(cli.compression.into())
        .max_parallel(cli.jobs)
        .build();
    let pipeline = BezelCompositePipeline::new(config);

    let mut bezels = BezelSet::new();
    for path in &cli.bezels {
        let template = pipeline
            .read_template_file(path)
            .with_context(|| format!("loading bezel template {}", path.display()))?;
        let orientation = bezels.insert(template);
        info!(path = %path.display(), ?orientation, "Loaded bezel template");
    }

    let report = pipeline.process_batch(&cli.files, &bezels, &destination)?;

    for (input, output) in &report.succeeded {
        println!("{} -> {}", input.display(), output.display());
    }
    for (input, e) in &report.failed {
        eprintln!("failed: {}: {}", input.display(), e);
    }

    Ok(report.is_success())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
