mod report;
mod scenarios;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;

use drillwise_engine::{DrillEngine, ScenarioGraph, Session, greedy_script};
use report::{BestStepRecord, RunReport, StepRecord, render_console, render_json, render_markdown};
use scenarios::{CliScenarioSource, bundled_names};

#[derive(Debug, Parser)]
#[command(name = "drillwise", version)]
#[command(about = "Run branching-scenario drills from the command line")]
struct Args {
    /// Bundled scenario to run
    #[arg(long, default_value = "fire")]
    scenario: String,

    /// Path to an external scenario JSON file (takes precedence over --scenario)
    #[arg(long)]
    file: Option<PathBuf>,

    /// List bundled scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Comma-separated choice indices to play (e.g. 0,2,1)
    #[arg(long)]
    choices: Option<String>,

    /// Follow the computed best path instead of a scripted choice list
    #[arg(long)]
    auto: bool,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json", "markdown"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print feedback after every applied choice
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_scenarios {
        println!("{}", "Bundled scenarios:".bold());
        for name in bundled_names() {
            println!("  {name}");
        }
        return Ok(());
    }

    let label = args.file.as_ref().map_or_else(
        || args.scenario.clone(),
        |path| path.display().to_string(),
    );
    let engine = DrillEngine::new(CliScenarioSource {
        file: args.file.clone(),
    });
    let graph = engine
        .load(&args.scenario)
        .with_context(|| format!("loading scenario '{label}'"))?;
    log::info!(
        "loaded scenario '{}' ({} nodes, max score {})",
        graph.title,
        graph.nodes.len(),
        graph.max_possible_score
    );

    let script = if args.auto {
        greedy_script(&graph)
    } else if let Some(raw) = args.choices.as_deref() {
        parse_choice_list(raw)?
    } else {
        bail!("nothing to play: pass --choices 0,1,... or --auto");
    };

    let run = play_script(&engine, Arc::clone(&graph), &script, args.verbose)?;

    let rendered = match args.report.as_str() {
        "json" => render_json(&run)?,
        "markdown" => render_markdown(&run),
        _ => render_console(&run),
    };
    match &args.output {
        Some(path) => std::fs::write(path, &rendered)
            .with_context(|| format!("writing report to {}", path.display()))?,
        None => print!("{rendered}"),
    }

    if !run.passed {
        std::process::exit(1);
    }
    Ok(())
}

/// Parse a comma-separated list of choice indices.
fn parse_choice_list(raw: &str) -> Result<Vec<usize>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .with_context(|| format!("invalid choice index '{part}'"))
        })
        .collect()
}

/// Play a scripted run to completion and assemble its report.
fn play_script(
    engine: &DrillEngine<CliScenarioSource>,
    graph: Arc<ScenarioGraph>,
    script: &[usize],
    verbose: bool,
) -> Result<RunReport> {
    let mut session = Session::start(Arc::clone(&graph));
    let mut steps = Vec::with_capacity(script.len());

    for (position, &index) in script.iter().enumerate() {
        let node_id = session.current_node_id().clone();
        let choice_text = session
            .current_node()
            .and_then(|node| node.choice(index))
            .map(|choice| choice.text.clone())
            .unwrap_or_default();

        let outcome = session
            .apply_choice(index)
            .with_context(|| format!("choice #{position} (index {index}) at '{node_id}'"))?;

        if verbose && !outcome.feedback.is_empty() {
            println!("{} {}", "»".dimmed(), outcome.feedback);
        }

        steps.push(StepRecord {
            node_id: node_id.0,
            choice_text,
            xp_delta: outcome.xp_delta,
            feedback: outcome.feedback.clone(),
        });
        session = outcome.session;
    }

    if !session.is_finished() {
        bail!(
            "script ended before a terminal node (stopped at '{}')",
            session.current_node_id()
        );
    }

    let (drill_score, path_report) = engine.debrief(&session)?;
    let badge_label = graph
        .badge_label(drill_score.badge)
        .map(|label| label.label.clone());
    let best_path = path_report
        .steps()
        .map(|(step, status)| BestStepRecord {
            node_id: step.node_id.0.clone(),
            choice_text: step.choice_text.clone(),
            status,
        })
        .collect();

    Ok(RunReport {
        scenario: graph.title.clone(),
        steps,
        final_node: session.current_node_id().0.clone(),
        accumulated_score: session.accumulated_score(),
        percentage: drill_score.percentage,
        passed: drill_score.passed,
        badge: drill_score.badge,
        badge_label,
        best_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use drillwise_engine::StepStatus;

    fn load(name: &str) -> Arc<ScenarioGraph> {
        DrillEngine::new(CliScenarioSource::default())
            .load(name)
            .unwrap()
    }

    #[test]
    fn choice_list_parses_with_whitespace() {
        assert_eq!(parse_choice_list("0, 2 ,1").unwrap(), vec![0, 2, 1]);
        assert_eq!(parse_choice_list("").unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn choice_list_rejects_garbage_with_context() {
        let err = parse_choice_list("0,two").unwrap_err();
        assert!(err.to_string().contains("two"));
    }

    #[test]
    fn greedy_script_plays_to_a_perfect_pass() {
        let engine = DrillEngine::new(CliScenarioSource::default());
        for name in bundled_names() {
            let graph = load(name);
            let script = greedy_script(&graph);
            let run = play_script(&engine, graph, &script, false).unwrap();
            assert_eq!(run.percentage, 100, "scenario {name}");
            assert!(run.passed, "scenario {name}");
            assert!(
                run.best_path
                    .iter()
                    .all(|step| step.status == StepStatus::Followed),
                "scenario {name}"
            );
        }
    }

    #[test]
    fn failing_run_reports_zero_and_misses() {
        let engine = DrillEngine::new(CliScenarioSource::default());
        let graph = load("fire");
        // Straight into the "false alarm" ending.
        let run = play_script(&engine, graph, &[2], false).unwrap();
        assert_eq!(run.percentage, 0);
        assert!(!run.passed);
        assert!(run.best_path.iter().any(|step| step.status == StepStatus::Missed));
    }

    #[test]
    fn incomplete_script_is_an_error() {
        let engine = DrillEngine::new(CliScenarioSource::default());
        let graph = load("fire");
        let err = play_script(&engine, graph, &[0], false).unwrap_err();
        assert!(err.to_string().contains("terminal"));
    }
}
