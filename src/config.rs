use clap::{Args, Parser, ValueEnum};

pub const DEFAULT_GCM_ENDPOINT: &str = "https://gcm-http.googleapis.com/gcm/send";

#[derive(Clone, Debug, Parser)]
pub struct Config {
    #[command(flatten)]
    pub gcm: GcmConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct GcmConfig {
    /// Server API key used to authorize requests to GCM
    #[arg(long, env = "GCM_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// GCM HTTP send endpoint
    #[arg(long, env = "GCM_ENDPOINT", default_value = DEFAULT_GCM_ENDPOINT)]
    pub endpoint: String,

    /// Request timeout in seconds
    #[arg(long, env = "GCM_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// How long GCM should keep an undelivered message, in seconds
    #[arg(long, env = "GCM_TIME_TO_LIVE")]
    pub time_to_live: Option<u32>,

    /// Ask GCM to validate packets without delivering them
    #[arg(long, env = "GCM_DRY_RUN", default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// OTLP HTTP endpoint for traces and metrics (disabled when unset)
    #[arg(long, env = "GCM_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Log output format
    #[arg(long, env = "GCM_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}
