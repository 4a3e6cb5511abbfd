use crate::domain::segment::DEFAULT_MAX_UNIT_LENGTH;
use crate::domain::synthesis::DEFAULT_TRANSPORT_LIMIT;
use crate::domain::voice::{VoiceConfig, VoiceConfigError, DEFAULT_PRESET};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;
const DEFAULT_REQUEST_DELAY_MS: u64 = 500;
const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("invalid voice configuration: {0}")]
    Voice(#[from] VoiceConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format {:?}, expected pretty or json", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Settings for one narration job, resolved once at job start.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub backend_url: String,
    pub request_timeout: Duration,
    pub voice: VoiceConfig,
    pub max_unit_length: usize,
    pub transport_limit: usize,
    pub inter_request_delay: Duration,
    pub ffmpeg_path: PathBuf,
    pub temp_dir: PathBuf,
    pub log_format: LogFormat,
}

/// Explicit values that win over the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub backend_url: Option<String>,
    pub request_timeout: Option<Duration>,
    pub voice_preset: Option<String>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub min_p: Option<f32>,
    pub top_k: Option<u32>,
    pub exaggeration: Option<f32>,
    pub cfg_weight: Option<f32>,
    pub max_unit_length: Option<usize>,
    pub transport_limit: Option<usize>,
    pub inter_request_delay: Option<Duration>,
    pub ffmpeg_path: Option<PathBuf>,
    pub temp_dir: Option<PathBuf>,
    pub log_format: Option<LogFormat>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            voice: VoiceConfig::preset(DEFAULT_PRESET),
            max_unit_length: DEFAULT_MAX_UNIT_LENGTH,
            transport_limit: DEFAULT_TRANSPORT_LIMIT,
            inter_request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
            ffmpeg_path: PathBuf::from(DEFAULT_FFMPEG_PATH),
            temp_dir: env::temp_dir(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Environment (after loading `.env`) over compiled-in defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Explicit overrides over environment over defaults
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::from_env()?.with_overrides(overrides)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let voice = VoiceConfig {
            preset: lookup("VOICE_PRESET").unwrap_or(defaults.voice.preset),
            temperature: parse(&lookup, "VOICE_TEMPERATURE")?,
            top_p: parse(&lookup, "VOICE_TOP_P")?,
            min_p: parse(&lookup, "VOICE_MIN_P")?,
            top_k: parse(&lookup, "VOICE_TOP_K")?,
            exaggeration: parse(&lookup, "VOICE_EXAGGERATION")?,
            cfg_weight: parse(&lookup, "VOICE_CFG_WEIGHT")?,
        };

        let log_format = parse(&lookup, "LOG_FORMAT")?.unwrap_or(defaults.log_format);

        let config = Config {
            backend_url: lookup("CHATTERBOX_URL").unwrap_or(defaults.backend_url),
            request_timeout: parse::<u64, _>(&lookup, "TTS_REQUEST_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            voice,
            max_unit_length: parse(&lookup, "MAX_SEGMENT_LENGTH")?
                .unwrap_or(defaults.max_unit_length),
            transport_limit: parse(&lookup, "TTS_TRANSPORT_LIMIT")?
                .unwrap_or(defaults.transport_limit),
            inter_request_delay: parse::<u64, _>(&lookup, "TTS_REQUEST_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.inter_request_delay),
            ffmpeg_path: lookup("FFMPEG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.ffmpeg_path),
            temp_dir: lookup("NARRATOR_TEMP_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.temp_dir),
            log_format,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(backend_url) = overrides.backend_url {
            self.backend_url = backend_url;
        }
        if let Some(timeout) = overrides.request_timeout {
            self.request_timeout = timeout;
        }
        if let Some(preset) = overrides.voice_preset {
            self.voice.preset = preset;
        }
        self.voice.temperature = overrides.temperature.or(self.voice.temperature);
        self.voice.top_p = overrides.top_p.or(self.voice.top_p);
        self.voice.min_p = overrides.min_p.or(self.voice.min_p);
        self.voice.top_k = overrides.top_k.or(self.voice.top_k);
        self.voice.exaggeration = overrides.exaggeration.or(self.voice.exaggeration);
        self.voice.cfg_weight = overrides.cfg_weight.or(self.voice.cfg_weight);
        if let Some(max_unit_length) = overrides.max_unit_length {
            self.max_unit_length = max_unit_length;
        }
        if let Some(transport_limit) = overrides.transport_limit {
            self.transport_limit = transport_limit;
        }
        if let Some(delay) = overrides.inter_request_delay {
            self.inter_request_delay = delay;
        }
        if let Some(ffmpeg_path) = overrides.ffmpeg_path {
            self.ffmpeg_path = ffmpeg_path;
        }
        if let Some(temp_dir) = overrides.temp_dir {
            self.temp_dir = temp_dir;
        }
        if let Some(log_format) = overrides.log_format {
            self.log_format = log_format;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_unit_length == 0 {
            return Err(ConfigError::Zero("MAX_SEGMENT_LENGTH"));
        }
        if self.transport_limit == 0 {
            return Err(ConfigError::Zero("TTS_TRANSPORT_LIMIT"));
        }
        self.voice.validate()?;
        Ok(())
    }
}

fn parse<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::Invalid {
                key,
                value,
                reason: e.to_string(),
            }),
    }
}
