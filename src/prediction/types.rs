use serde::{Deserialize, Serialize};

pub type Hours = f64;
pub type Score = f64;

/// Where the undecayed starting goal comes from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GoalSource {
    /// Caller-supplied goal. An observed decayed target, when known, is only
    /// inverted for display and never replaces the goal.
    Explicit {
        goal: Score,
        observed_target: Option<Score>,
    },
    /// Recover the goal from a target that has already decayed
    InferFromDecayedTarget { current_target: Score },
}

impl GoalSource {
    pub fn explicit(goal: Score) -> Self {
        GoalSource::Explicit {
            goal,
            observed_target: None,
        }
    }

    pub fn inferred(current_target: Score) -> Self {
        GoalSource::InferFromDecayedTarget { current_target }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaceSnapshot {
    pub current_hour: Hours,
    /// Positive when the tracked side is ahead
    pub current_lead: Score,
    pub your_score: Score,
    pub goal: GoalSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub war_end_hour: Hours,
    pub hours_remaining: Hours,
    pub your_final_score: i64,
    pub opponent_final_score: i64,
    pub final_lead: i64,
}

/// Goal actually used for a prediction, plus the inferred value for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalResolution {
    pub starting_goal: Score,
    pub inferred_goal: Option<Score>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub result: PredictionResult,
    pub starting_goal: Score,
    pub inferred_goal: Option<Score>,
    /// Decayed target at the snapshot hour
    pub current_target: Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NoMoreHitsOutcome {
    Ends {
        end_hour: Hours,
        hours_remaining: Hours,
        target_at_end: Score,
    },
    /// Tied race: decay alone has no crossing to find
    ZeroLead,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub hour: Hours,
    pub lead: Score,
    pub target: Score,
}
