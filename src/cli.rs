use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::prediction::GoalSource;

#[derive(Parser, Debug)]
#[command(author, version, about = "ranked war outcome forecaster")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Predict the war end from manual inputs
    Predict {
        /// Hours since the war started (e.g. 36.5)
        #[arg(long)]
        hour: f64,
        /// Current lead, negative when behind
        #[arg(long, allow_negative_numbers = true)]
        lead: f64,
        /// Your current total score
        #[arg(long)]
        score: f64,
        #[command(flatten)]
        goal: GoalArgs,
        /// Write the projected lead/target curve as JSON
        #[arg(long)]
        curve_out: Option<PathBuf>,
        /// Do not record the prediction in the war log
        #[arg(long)]
        no_log: bool,
    },
    /// Predict the war end from live Torn API data
    Auto {
        /// Override the starting target instead of inferring it
        #[arg(long)]
        goal: Option<f64>,
        /// Write the projected lead/target curve as JSON
        #[arg(long)]
        curve_out: Option<PathBuf>,
    },
    /// Hour at which decay alone ends the war if nobody scores again
    NoMoreHits {
        /// Hours since the war started
        #[arg(long)]
        hour: f64,
        /// Current lead, negative when behind
        #[arg(long, allow_negative_numbers = true)]
        lead: f64,
        #[command(flatten)]
        goal: GoalArgs,
    },
    /// Show the current war log
    History,
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
#[group(required = true, multiple = true)]
pub struct GoalArgs {
    /// Original, undecayed target score (usually 3000)
    #[arg(long)]
    pub goal: Option<f64>,
    /// Target as shown right now, already decayed; used to infer the goal
    #[arg(long)]
    pub target: Option<f64>,
}

impl GoalArgs {
    pub fn source(&self) -> GoalSource {
        match (self.goal, self.target) {
            (Some(goal), observed_target) => GoalSource::Explicit {
                goal,
                observed_target,
            },
            (None, Some(current_target)) => GoalSource::inferred(current_target),
            // clap requires one of the two; a zero goal is rejected downstream
            (None, None) => GoalSource::explicit(0.0),
        }
    }
}
