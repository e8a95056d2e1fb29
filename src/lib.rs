pub mod api;
pub mod cli;
pub mod config;
pub mod history;
pub mod http;
pub mod prediction;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use std::path::Path;

use crate::cli::{Command, GoalArgs};
use crate::config::settings::AppConfig;
use crate::prediction::RaceSnapshot;
use crate::services::{ForecastService, report};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_predict(
    hour: f64,
    lead: f64,
    score: f64,
    goal: &GoalArgs,
    curve_out: Option<&Path>,
    record: bool,
) -> Result<()> {
    let service = ForecastService::new(AppConfig::new())?;
    let snapshot = RaceSnapshot {
        current_hour: hour,
        current_lead: lead,
        your_score: score,
        goal: goal.source(),
    };

    let report = service.predict_manual(snapshot, record)?;
    print!("{}", report::render_forecast(&report));

    if let Some(path) = curve_out {
        service.write_curve(&report, path)?;
    }
    Ok(())
}

pub fn handle_auto(goal: Option<f64>, curve_out: Option<&Path>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ForecastService::new(AppConfig::new())?;
        let (live, report) = service.predict_live(goal).await?;

        print!("{}", report::render_live_header(&live));
        print!("{}", report::render_forecast(&report));

        if let Some(path) = curve_out {
            service.write_curve(&report, path)?;
        }
        Ok::<(), anyhow::Error>(())
    })
}

pub fn handle_no_more_hits(hour: f64, lead: f64, goal: &GoalArgs) -> Result<()> {
    let service = ForecastService::new(AppConfig::new())?;
    let outcome = service.no_more_hits(hour, lead, goal.source())?;
    print!("{}", report::render_no_more_hits(&outcome));
    Ok(())
}

pub fn handle_history() -> Result<()> {
    let service = ForecastService::new(AppConfig::new())?;
    let log = service.history()?;
    print!("{}", report::render_history(log.as_ref()));
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
