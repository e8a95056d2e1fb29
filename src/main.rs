use anyhow::Result;

use war_forecast::cli::Command;
use war_forecast::{
    handle_auto, handle_completions, handle_history, handle_no_more_hits, handle_predict, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Predict {
            hour,
            lead,
            score,
            goal,
            curve_out,
            no_log,
        } => handle_predict(*hour, *lead, *score, goal, curve_out.as_deref(), !*no_log),
        Command::Auto { goal, curve_out } => handle_auto(*goal, curve_out.as_deref()),
        Command::NoMoreHits { hour, lead, goal } => handle_no_more_hits(*hour, *lead, goal),
        Command::History => handle_history(),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
