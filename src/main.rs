use anyhow::{bail, Context};
use clap::Parser;
use script_narrator::domain::voice::VOICE_PRESETS;
use script_narrator::infrastructure::config::{Config, ConfigOverrides, LogFormat};
use script_narrator::NarrationPipeline;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Narrate a script into a single audio file through a Chatterbox TTS server
#[derive(Parser)]
#[command(name = "script-narrator", version)]
struct Cli {
    /// Script to narrate, or `-` to read it from stdin
    #[arg(required_unless_present = "list_voices")]
    script: Option<String>,

    /// Output file; `.mp3` is transcoded with ffmpeg, `.wav` is merged in memory
    #[arg(required_unless_present = "list_voices")]
    output: Option<PathBuf>,

    /// Print the built-in voice presets and exit
    #[arg(long)]
    list_voices: bool,

    /// Chatterbox server URL [env: CHATTERBOX_URL]
    #[arg(long)]
    backend_url: Option<String>,

    /// Per-request timeout in seconds [env: TTS_REQUEST_TIMEOUT_SECS]
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Voice preset name [env: VOICE_PRESET]
    #[arg(long)]
    voice: Option<String>,

    #[arg(long)]
    temperature: Option<f32>,

    #[arg(long)]
    top_p: Option<f32>,

    #[arg(long)]
    min_p: Option<f32>,

    #[arg(long)]
    top_k: Option<u32>,

    #[arg(long)]
    exaggeration: Option<f32>,

    #[arg(long)]
    cfg_weight: Option<f32>,

    /// Target unit length in characters [env: MAX_SEGMENT_LENGTH]
    #[arg(long)]
    max_segment_length: Option<usize>,

    /// Backend request-size ceiling in characters [env: TTS_TRANSPORT_LIMIT]
    #[arg(long)]
    transport_limit: Option<usize>,

    /// Pause between synthesis requests [env: TTS_REQUEST_DELAY_MS]
    #[arg(long)]
    delay_ms: Option<u64>,

    /// ffmpeg binary [env: FFMPEG_PATH]
    #[arg(long)]
    ffmpeg: Option<PathBuf>,

    /// Directory for temporary segment files [env: NARRATOR_TEMP_DIR]
    #[arg(long)]
    temp_dir: Option<PathBuf>,

    /// `pretty` or `json` [env: LOG_FORMAT]
    #[arg(long)]
    log_format: Option<LogFormat>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            backend_url: self.backend_url.clone(),
            request_timeout: self.timeout_secs.map(Duration::from_secs),
            voice_preset: self.voice.clone(),
            temperature: self.temperature,
            top_p: self.top_p,
            min_p: self.min_p,
            top_k: self.top_k,
            exaggeration: self.exaggeration,
            cfg_weight: self.cfg_weight,
            max_unit_length: self.max_segment_length,
            transport_limit: self.transport_limit,
            inter_request_delay: self.delay_ms.map(Duration::from_millis),
            ffmpeg_path: self.ffmpeg.clone(),
            temp_dir: self.temp_dir.clone(),
            log_format: self.log_format,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.list_voices {
        println!("{}", serde_json::to_string_pretty(VOICE_PRESETS)?);
        return Ok(());
    }

    // Load configuration
    let config = Config::resolve(cli.overrides()).context("failed to load configuration")?;

    // Initialize logging
    init_logging(&config);

    let (Some(script_arg), Some(output)) = (cli.script, cli.output) else {
        bail!("a script and an output path are required");
    };

    let script = read_script(&script_arg).await?;

    tracing::info!(
        backend_url = %config.backend_url,
        voice_preset = %config.voice.preset,
        max_unit_length = config.max_unit_length,
        output = %output.display(),
        "Starting narration job"
    );

    let pipeline = NarrationPipeline::from_config(config)?;

    let readiness = pipeline.check_readiness().await;
    if !readiness.backend_ready() {
        tracing::warn!("TTS backend is not reporting healthy, continuing anyway");
    }

    let summary = pipeline.run(&script, &output).await?;

    if !summary.failed_units.is_empty() {
        tracing::warn!(
            failed_units = ?summary.failed_units,
            "Some units could not be synthesized and are missing from the output"
        );
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

async fn read_script(arg: &str) -> anyhow::Result<String> {
    if arg == "-" {
        let mut script = String::new();
        tokio::io::stdin()
            .read_to_string(&mut script)
            .await
            .context("failed to read script from stdin")?;
        return Ok(script);
    }

    tokio::fs::read_to_string(arg)
        .await
        .with_context(|| format!("failed to read script {}", arg))
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "script_narrator=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
