use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct PredictorSettings {
    pub decay_factor: f64,
    pub grace_hours: i64,
    pub step_hours: f64,
    pub search_ceiling_hours: f64,
    pub no_more_hits_bound_hours: u32,
}

impl Default for PredictorSettings {
    fn default() -> Self {
        Self {
            decay_factor: 0.99,
            grace_hours: 24,
            step_hours: 0.5,
            search_ceiling_hours: 200.0,
            no_more_hits_bound_hours: 1000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistorySettings {
    pub data_dir: PathBuf,
    pub log_key: &'static str,
}

impl Default for HistorySettings {
    fn default() -> Self {
        let data_dir = std::env::var("WAR_DATA_DIR").unwrap_or_else(|_| "data".to_string());
        Self {
            data_dir: PathBuf::from(data_dir),
            log_key: "current_war",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TornSettings {
    pub api_base_url: &'static str,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub default_target: f64,
}

impl Default for TornSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.torn.com/v2",
            user_agent: "WarForecast/1.0",
            timeout_secs: 30,
            default_target: 3000.0,
        }
    }
}

impl TornSettings {
    pub fn api_key(&self) -> Option<String> {
        std::env::var("TORN_API_KEY").ok().filter(|k| !k.is_empty())
    }

    pub fn faction_id(&self) -> Option<i64> {
        std::env::var("FACTION_ID").ok().and_then(|id| id.trim().parse().ok())
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub predictor: PredictorSettings,
    pub history: HistorySettings,
    pub torn: TornSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            predictor: PredictorSettings::default(),
            history: HistorySettings::default(),
            torn: TornSettings::default(),
        }
    }
}
