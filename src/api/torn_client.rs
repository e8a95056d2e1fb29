use anyhow::{Context, Result, bail};
use log::{debug, info};

use super::models::{FactionWarsResponse, RankedWar};
use crate::config::settings::TornSettings;
use crate::history::RaceIdentity;
use crate::http::HttpClient;
use crate::prediction::{GoalSource, RaceSnapshot};

/// A live ranked war as seen from the tracked faction
#[derive(Debug, Clone, PartialEq)]
pub struct LiveWarData {
    pub identity: RaceIdentity,
    pub current_hour: f64,
    pub your_score: f64,
    pub current_lead: f64,
    /// Target reported by the API, already decayed
    pub current_target: f64,
}

impl LiveWarData {
    /// Snapshot for the predictor. An explicit goal overrides inference but
    /// the observed target is still passed along for display.
    pub fn snapshot(&self, goal_override: Option<f64>) -> RaceSnapshot {
        let goal = match goal_override {
            Some(goal) => GoalSource::Explicit {
                goal,
                observed_target: Some(self.current_target),
            },
            None => GoalSource::inferred(self.current_target),
        };

        RaceSnapshot {
            current_hour: self.current_hour,
            current_lead: self.current_lead,
            your_score: self.your_score,
            goal,
        }
    }
}

/// Key and tracked faction needed for the live feed
#[derive(Debug, Clone, PartialEq)]
pub struct LiveCredentials {
    pub api_key: String,
    pub faction_id: i64,
}

pub fn live_credentials(
    api_key: Option<String>,
    faction_id: Option<i64>,
) -> Result<LiveCredentials> {
    let api_key = api_key.context("TORN_API_KEY is not set")?;
    let faction_id = faction_id.context("FACTION_ID is not set or not a number")?;
    Ok(LiveCredentials {
        api_key,
        faction_id,
    })
}

/// Torn API client for the faction's current ranked war
pub struct TornClient {
    client: HttpClient,
    settings: TornSettings,
}

impl TornClient {
    pub fn new(settings: TornSettings) -> Result<Self> {
        let client = HttpClient::new(settings.user_agent, settings.timeout_secs)?;
        Ok(Self { client, settings })
    }

    pub async fn fetch_ranked_war(&self, credentials: &LiveCredentials) -> Result<LiveWarData> {
        let faction_id = credentials.faction_id;
        let url = self.build_wars_url(&credentials.api_key);
        info!("Fetching ranked war for faction {}", faction_id);

        let response = self.client.get(&url).await?;
        if !response.status().is_success() {
            bail!("Torn API returned status: {}", response.status());
        }

        let body: FactionWarsResponse = response
            .json()
            .await
            .context("Failed to parse Torn wars response")?;

        let now = chrono::Utc::now().timestamp();
        map_ranked_war(body, faction_id, now, self.settings.default_target)
    }

    fn build_wars_url(&self, api_key: &str) -> String {
        format!(
            "{}/faction/?selections=wars&key={}",
            self.settings.api_base_url, api_key
        )
    }
}

/// Turn a wars response into live data for `faction_id`, with the war clock
/// measured at `now` (epoch seconds).
pub fn map_ranked_war(
    body: FactionWarsResponse,
    faction_id: i64,
    now: i64,
    default_target: f64,
) -> Result<LiveWarData> {
    if let Some(error) = body.error {
        bail!("Torn API error {}: {}", error.code, error.error);
    }

    let war = body
        .wars
        .and_then(|wars| wars.ranked)
        .context("No ranked war found")?;

    map_war(war, faction_id, now, default_target)
}

fn map_war(war: RankedWar, faction_id: i64, now: i64, default_target: f64) -> Result<LiveWarData> {
    if war.factions.len() != 2 {
        bail!(
            "Expected exactly 2 factions in war data, got {}",
            war.factions.len()
        );
    }

    let (yours, enemy) = if war.factions[0].id == faction_id {
        (&war.factions[0], &war.factions[1])
    } else if war.factions[1].id == faction_id {
        (&war.factions[1], &war.factions[0])
    } else {
        bail!("Faction {} is not part of ranked war {}", faction_id, war.war_id);
    };

    let current_hour = round_to_tenth((now - war.start) as f64 / 3600.0);
    debug!(
        "War {}: {} {} vs {} {} at hour {}",
        war.war_id, yours.name, yours.score, enemy.name, enemy.score, current_hour
    );

    Ok(LiveWarData {
        identity: RaceIdentity {
            race_id: war.war_id,
            participants: [yours.name.clone(), enemy.name.clone()],
            start_timestamp: war.start,
        },
        current_hour,
        your_score: yours.score,
        current_lead: yours.score - enemy.score,
        current_target: war.target.unwrap_or(default_target),
    })
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: i64 = 1_700_000_000;

    fn response(json: &str) -> FactionWarsResponse {
        serde_json::from_str(json).unwrap()
    }

    fn ranked_war_json(target: &str) -> String {
        format!(
            r#"{{
                "wars": {{
                    "ranked": {{
                        "war_id": 24410,
                        "start": {START},
                        "end": 0,
                        {target}
                        "winner": null,
                        "factions": [
                            {{"id": 111, "name": "Enemy", "score": 1800, "chain": 40}},
                            {{"id": 222, "name": "Us", "score": 2300, "chain": 12}}
                        ]
                    }},
                    "raids": [],
                    "territory": []
                }}
            }}"#
        )
    }

    #[test]
    fn test_maps_tracked_faction() {
        let body = response(&ranked_war_json(r#""target": 2659,"#));
        let now = START + 36 * 3600 + 1800;

        let live = map_ranked_war(body, 222, now, 3000.0).unwrap();

        assert_eq!(live.identity.race_id, 24410);
        assert_eq!(live.identity.participants, ["Us".to_string(), "Enemy".to_string()]);
        assert_eq!(live.current_hour, 36.5);
        assert_eq!(live.your_score, 2300.0);
        assert_eq!(live.current_lead, 500.0);
        assert_eq!(live.current_target, 2659.0);
    }

    #[test]
    fn test_missing_target_uses_default() {
        let body = response(&ranked_war_json(""));

        let live = map_ranked_war(body, 111, START + 7200, 3000.0).unwrap();

        assert_eq!(live.current_target, 3000.0);
        assert_eq!(live.current_lead, -500.0);
    }

    #[test]
    fn test_no_ranked_war() {
        let body = response(r#"{"wars": {"ranked": null, "raids": []}}"#);
        let err = map_ranked_war(body, 1, START, 3000.0).unwrap_err();
        assert!(err.to_string().contains("No ranked war"));
    }

    #[test]
    fn test_api_error_body() {
        let body = response(r#"{"error": {"code": 2, "error": "Incorrect key"}}"#);
        let err = map_ranked_war(body, 1, START, 3000.0).unwrap_err();
        assert!(err.to_string().contains("Incorrect key"));
    }

    fn war_with_factions(factions: &str) -> FactionWarsResponse {
        let ranked = format!(r#"{{"war_id": 1, "start": {START}, "factions": [{factions}]}}"#);
        response(&format!(r#"{{"wars": {{"ranked": {ranked}}}}}"#))
    }

    #[test]
    fn test_single_faction_is_rejected() {
        let body = war_with_factions(r#"{"id": 222, "name": "Us", "score": 10}"#);

        let err = map_ranked_war(body, 222, START + 3600, 3000.0).unwrap_err();

        assert!(err.to_string().contains("Expected exactly 2 factions"));
    }

    #[test]
    fn test_three_factions_are_rejected() {
        let body = war_with_factions(
            r#"{"id": 1, "name": "A", "score": 10},
               {"id": 2, "name": "B", "score": 20},
               {"id": 3, "name": "C", "score": 30}"#,
        );

        let err = map_ranked_war(body, 1, START + 3600, 3000.0).unwrap_err();

        assert!(err.to_string().contains("got 3"));
    }

    #[test]
    fn test_missing_api_key_is_reported() {
        let err = live_credentials(None, Some(222)).unwrap_err();
        assert_eq!(err.to_string(), "TORN_API_KEY is not set");
    }

    #[test]
    fn test_missing_faction_is_reported() {
        let err = live_credentials(Some("key".to_string()), None).unwrap_err();
        assert_eq!(err.to_string(), "FACTION_ID is not set or not a number");
    }

    #[test]
    fn test_credentials_pass_through() {
        let credentials = live_credentials(Some("key".to_string()), Some(222)).unwrap();
        assert_eq!(credentials.api_key, "key");
        assert_eq!(credentials.faction_id, 222);
    }

    #[test]
    fn test_unknown_faction_is_rejected() {
        let body = response(&ranked_war_json(""));
        assert!(map_ranked_war(body, 999, START, 3000.0).is_err());
    }

    #[test]
    fn test_snapshot_prefers_override() {
        let body = response(&ranked_war_json(r#""target": 2659,"#));
        let live = map_ranked_war(body, 222, START + 40 * 3600, 3000.0).unwrap();

        assert_eq!(live.snapshot(None).goal, GoalSource::inferred(2659.0));
        assert_eq!(
            live.snapshot(Some(3000.0)).goal,
            GoalSource::Explicit {
                goal: 3000.0,
                observed_target: Some(2659.0)
            }
        );
    }
}
