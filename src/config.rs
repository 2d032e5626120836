use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_api_host")]
    pub host: String,
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

fn default_api_host() -> String {
    "0.0.0.0".to_string()
}

fn default_api_port() -> u16 {
    8000
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SeedConfig {
    pub reports_path: Option<String>,
}

// ============================================================
// Risk Scoring Config
// ============================================================

/// Every anomaly threshold, bonus weight, and level cut point in one place.
#[derive(Debug, Deserialize, Clone)]
pub struct RiskConfig {
    #[serde(default = "default_flag_window_minutes")]
    pub flag_window_minutes: i64,
    #[serde(default = "default_suspicious_window_hours")]
    pub suspicious_window_hours: i64,
    #[serde(default = "default_spike_min_reports")]
    pub spike_min_reports: usize,
    #[serde(default = "default_burst_min_reports")]
    pub burst_min_reports: usize,
    #[serde(default = "default_spike_bonus")]
    pub spike_bonus: f64,
    #[serde(default = "default_burst_bonus")]
    pub burst_bonus: f64,
    #[serde(default = "default_repeated_message_bonus")]
    pub repeated_message_bonus: f64,
    #[serde(default = "default_suspicious_activity_bonus")]
    pub suspicious_activity_bonus: f64,
    #[serde(default = "default_volume_weight")]
    pub volume_weight: f64,
    #[serde(default = "default_min_suspicious_signals")]
    pub min_suspicious_signals: usize,
    #[serde(default = "default_high_threshold")]
    pub high_threshold: f64,
    #[serde(default = "default_medium_threshold")]
    pub medium_threshold: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            flag_window_minutes: 60,
            suspicious_window_hours: 48,
            spike_min_reports: 3,
            burst_min_reports: 5,
            spike_bonus: 0.15,
            burst_bonus: 0.15,
            repeated_message_bonus: 0.10,
            suspicious_activity_bonus: 0.20,
            volume_weight: 0.1,
            min_suspicious_signals: 2,
            high_threshold: 0.66,
            medium_threshold: 0.33,
        }
    }
}

fn default_flag_window_minutes() -> i64 {
    60
}

fn default_suspicious_window_hours() -> i64 {
    48
}

fn default_spike_min_reports() -> usize {
    3
}

fn default_burst_min_reports() -> usize {
    5
}

fn default_spike_bonus() -> f64 {
    0.15
}

fn default_burst_bonus() -> f64 {
    0.15
}

fn default_repeated_message_bonus() -> f64 {
    0.10
}

fn default_suspicious_activity_bonus() -> f64 {
    0.20
}

fn default_volume_weight() -> f64 {
    0.1
}

fn default_min_suspicious_signals() -> usize {
    2
}

fn default_high_threshold() -> f64 {
    0.66
}

fn default_medium_threshold() -> f64 {
    0.33
}

impl Config {
    pub fn load(path: &str) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("Failed to read config file '{}': {}", path, e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| eyre::eyre!("Failed to parse config file '{}': {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> eyre::Result<()> {
        let risk = &self.risk;
        if risk.flag_window_minutes <= 0 || risk.suspicious_window_hours <= 0 {
            return Err(eyre::eyre!("Anomaly windows must be positive"));
        }
        if risk.spike_min_reports == 0 || risk.burst_min_reports < risk.spike_min_reports {
            return Err(eyre::eyre!(
                "burst_min_reports ({}) must be >= spike_min_reports ({}, nonzero)",
                risk.burst_min_reports,
                risk.spike_min_reports
            ));
        }
        if !(1..=5).contains(&risk.min_suspicious_signals) {
            return Err(eyre::eyre!(
                "min_suspicious_signals must be between 1 and 5, got {}",
                risk.min_suspicious_signals
            ));
        }
        if risk.high_threshold <= risk.medium_threshold {
            return Err(eyre::eyre!(
                "high_threshold ({}) must exceed medium_threshold ({})",
                risk.high_threshold,
                risk.medium_threshold
            ));
        }
        Ok(())
    }
}
