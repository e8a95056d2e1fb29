use serde::{Deserialize, Serialize};

/// `GET /faction/?selections=wars` response
#[derive(Debug, Deserialize, Serialize)]
pub struct FactionWarsResponse {
    #[serde(default)]
    pub wars: Option<FactionWars>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct FactionWars {
    #[serde(default)]
    pub ranked: Option<RankedWar>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RankedWar {
    pub war_id: i64,
    pub start: i64,
    pub end: Option<i64>,
    pub target: Option<f64>,
    #[serde(default)]
    pub factions: Vec<WarFaction>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WarFaction {
    pub id: i64,
    pub name: String,
    pub score: f64,
}

/// Torn reports failures in the body with a 200 status
#[derive(Debug, Deserialize, Serialize)]
pub struct ApiError {
    pub code: i64,
    pub error: String,
}
