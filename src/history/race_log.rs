use serde::{Deserialize, Serialize};

use crate::prediction::{Forecast, RaceSnapshot};

pub type RaceId = i64;

/// Race id used for predictions made from manual input
pub const MANUAL_RACE_ID: RaceId = 0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceIdentity {
    pub race_id: RaceId,
    pub participants: [String; 2],
    pub start_timestamp: i64,
}

impl RaceIdentity {
    /// Identity for a manual prediction: start is back-dated from the hour
    pub fn manual(now: i64, current_hour: f64) -> Self {
        Self {
            race_id: MANUAL_RACE_ID,
            participants: ["Manual Input".to_string(), "Manual Input".to_string()],
            start_timestamp: now - (current_hour * 3600.0) as i64,
        }
    }
}

// Field names match the log files the chart renderer already reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "timestamp")]
    pub observed_at: i64,
    pub current_hour: f64,
    pub your_score: f64,
    pub lead: f64,
    pub target: f64,
    pub predicted_end: f64,
}

impl HistoryEntry {
    pub fn from_forecast(observed_at: i64, snapshot: &RaceSnapshot, forecast: &Forecast) -> Self {
        Self {
            observed_at,
            current_hour: snapshot.current_hour,
            your_score: snapshot.your_score,
            lead: snapshot.current_lead,
            target: forecast.starting_goal,
            predicted_end: forecast.result.war_end_hour,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceLog {
    #[serde(rename = "war_id")]
    pub race_id: RaceId,
    #[serde(rename = "factions")]
    pub participants: [String; 2],
    #[serde(rename = "start")]
    pub start_timestamp: i64,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl RaceLog {
    pub fn new(identity: &RaceIdentity) -> Self {
        Self {
            race_id: identity.race_id,
            participants: identity.participants.clone(),
            start_timestamp: identity.start_timestamp,
            history: Vec::new(),
        }
    }

    /// Append an entry. `observed_at` never goes backwards within a log.
    pub fn push(&mut self, mut entry: HistoryEntry) {
        if let Some(last) = self.history.last() {
            entry.observed_at = entry.observed_at.max(last.observed_at);
        }
        self.history.push(entry);
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.history.last()
    }
}

/// Append `entry` to `existing`, or start a fresh log when there is none or
/// it belongs to a different race.
pub fn apply_entry(
    existing: Option<RaceLog>,
    identity: &RaceIdentity,
    entry: HistoryEntry,
) -> RaceLog {
    let mut log = match existing {
        Some(log) if log.race_id == identity.race_id => log,
        _ => RaceLog::new(identity),
    };
    log.push(entry);
    log
}
