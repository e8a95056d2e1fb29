use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use std::path::Path;

use crate::api::{LiveWarData, TornClient, live_credentials};
use crate::config::settings::AppConfig;
use crate::history::{HistoryEntry, HistoryLogger, RaceIdentity, RaceLog};
use crate::prediction::{
    self, CurvePoint, Forecast, GoalSource, NoMoreHitsOutcome, RaceSnapshot,
};

/// A forecast together with the inputs it was computed from
#[derive(Debug, Clone)]
pub struct ForecastReport {
    pub identity: RaceIdentity,
    pub snapshot: RaceSnapshot,
    pub forecast: Forecast,
    /// Number of entries in the race log after recording, if recorded
    pub logged_entries: Option<usize>,
}

pub struct ForecastService {
    config: AppConfig,
    logger: HistoryLogger,
}

impl ForecastService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let logger = HistoryLogger::new(&config.history)?;
        Ok(Self { config, logger })
    }

    pub fn with_logger(config: AppConfig, logger: HistoryLogger) -> Self {
        Self { config, logger }
    }

    /// Forecast from hand-entered numbers, logged under the manual race id
    pub fn predict_manual(&self, snapshot: RaceSnapshot, record: bool) -> Result<ForecastReport> {
        let now = Utc::now().timestamp();
        let identity = RaceIdentity::manual(now, snapshot.current_hour);
        self.predict_and_record(identity, snapshot, record)
    }

    /// Fetch the live war, forecast it and log it under the war's id
    pub async fn predict_live(
        &self,
        goal_override: Option<f64>,
    ) -> Result<(LiveWarData, ForecastReport)> {
        let live = self.fetch_live_war().await?;
        let snapshot = live.snapshot(goal_override);
        let report = self.predict_and_record(live.identity.clone(), snapshot, true)?;
        Ok((live, report))
    }

    pub fn no_more_hits(
        &self,
        current_hour: f64,
        current_lead: f64,
        goal: GoalSource,
    ) -> Result<NoMoreHitsOutcome> {
        let outcome = prediction::estimate_no_more_hits_from(
            current_hour,
            current_lead,
            &goal,
            &self.config.predictor,
        )?;
        Ok(outcome)
    }

    pub fn curve(&self, report: &ForecastReport) -> Result<Vec<CurvePoint>> {
        let points = prediction::project_curve(
            report.snapshot.current_hour,
            report.snapshot.current_lead,
            report.forecast.starting_goal,
            report.forecast.result.war_end_hour,
            &self.config.predictor,
        )?;
        Ok(points)
    }

    pub fn write_curve(&self, report: &ForecastReport, path: &Path) -> Result<usize> {
        let points = self.curve(report)?;
        let json = serde_json::to_string_pretty(&points).context("Failed to serialize curve")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write curve to {}", path.display()))?;
        info!("Wrote {} curve points to {}", points.len(), path.display());
        Ok(points.len())
    }

    pub fn history(&self) -> Result<Option<RaceLog>> {
        self.logger.load()
    }

    fn predict_and_record(
        &self,
        identity: RaceIdentity,
        snapshot: RaceSnapshot,
        record: bool,
    ) -> Result<ForecastReport> {
        let forecast = prediction::forecast(&snapshot, &self.config.predictor)?;

        let logged_entries = if record {
            let entry = HistoryEntry::from_forecast(Utc::now().timestamp(), &snapshot, &forecast);
            Some(self.logger.record(&identity, entry)?.history.len())
        } else {
            None
        };

        Ok(ForecastReport {
            identity,
            snapshot,
            forecast,
            logged_entries,
        })
    }

    async fn fetch_live_war(&self) -> Result<LiveWarData> {
        let settings = &self.config.torn;
        let credentials = live_credentials(settings.api_key(), settings.faction_id())?;

        let client = TornClient::new(settings.clone())?;
        client.fetch_ranked_war(&credentials).await
    }
}
