use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinegrade::models::{AppConfig, LutRequest, SourceImage, TransferMethod};
use cinegrade::services::ArtifactClient;

#[derive(Parser)]
#[command(name = "cinegrade")]
#[command(about = "Snapshot & export toolkit for AI color-grading sessions")]
struct Cli {
    /// Path to config.yaml
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the processing service address
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a target image toward the look of a reference image
    Process {
        /// Image to grade
        #[arg(short, long)]
        target: PathBuf,

        /// Image supplying the look
        #[arg(short, long)]
        reference: PathBuf,

        /// Transfer method: histogram, reinhard, covariance or kmeans
        #[arg(short, long, default_value = "histogram", value_parser = parse_method)]
        method: TransferMethod,

        /// Skip the luminance-preserving pass
        #[arg(long)]
        no_preserve_luminance: bool,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Generate a .cube 3D-LUT from a reference image
    Lut {
        /// Image supplying the look
        #[arg(short, long)]
        reference: PathBuf,

        /// Transfer method: histogram, reinhard, covariance or kmeans
        #[arg(short, long, default_value = "histogram", value_parser = parse_method)]
        method: TransferMethod,

        /// Blend intensity between 0 and 1
        #[arg(short, long, default_value_t = 1.0)]
        intensity: f32,

        /// Skip the luminance-preserving pass
        #[arg(long)]
        no_preserve_luminance: bool,

        /// Output file path (default: cinematic_<method>.cube)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_method(s: &str) -> Result<TransferMethod, String> {
    s.parse()
}

fn load_image(path: &Path) -> anyhow::Result<SourceImage> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(SourceImage::new(file_name, bytes))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinegrade=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config);
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    let client = ArtifactClient::from_config(&config);

    match cli.command {
        Commands::Process {
            target,
            reference,
            method,
            no_preserve_luminance,
            output,
        } => {
            let target = load_image(&target)?;
            let reference = load_image(&reference)?;

            tracing::info!(%method, service = client.base_url(), "Processing");
            let bytes = client
                .process(&target, &reference, method, !no_preserve_luminance)
                .await?;

            std::fs::write(&output, &bytes)?;
            tracing::info!(path = %output.display(), bytes = bytes.len(), "Wrote processed image");
        }
        Commands::Lut {
            reference,
            method,
            intensity,
            no_preserve_luminance,
            output,
        } => {
            let request = LutRequest {
                reference: load_image(&reference)?,
                method,
                preserve_luminance: !no_preserve_luminance,
                intensity: intensity.clamp(0.0, 1.0),
            };

            tracing::info!(%method, intensity = request.intensity, "Generating LUT");
            let bytes = client.generate_lut(&request).await?;

            let output = output.unwrap_or_else(|| PathBuf::from(format!("cinematic_{method}.cube")));
            std::fs::write(&output, &bytes)?;
            tracing::info!(path = %output.display(), bytes = bytes.len(), "Wrote LUT");
        }
    }

    Ok(())
}
