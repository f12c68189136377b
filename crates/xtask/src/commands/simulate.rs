//! Run AI-controlled turns on a scenario file
//!
//! Loads a RON scenario, plays every actor with the decision engine for a
//! number of rounds and prints what each one did.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use serde::Serialize;

use combat_runtime::{AiConfig, Archetype, TurnSummary, take_turn};
use game_content::ScenarioLoader;
use game_core::{Encounter, EntityId, Position, TeamId};

/// Run AI-controlled turns on a scenario file
#[derive(Parser)]
pub struct Simulate {
    /// Scenario file (RON)
    #[arg(short, long, value_name = "FILE")]
    scenario: PathBuf,

    /// AI configuration file (TOML); defaults apply when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the archetype (default, berserker, defensive)
    #[arg(short, long, value_parser = parse_archetype)]
    archetype: Option<Archetype>,

    /// Number of rounds to play
    #[arg(short, long, default_value_t = 3)]
    rounds: u32,

    /// Log every evaluated candidate at info level
    #[arg(short, long)]
    verbose: bool,

    /// Print a JSON report instead of the summary view
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    scenario: String,
    archetype: Archetype,
    rounds_played: u32,
    turns: Vec<TurnReport>,
    actors: Vec<ActorReport>,
}

#[derive(Serialize)]
struct TurnReport {
    round: u32,
    #[serde(flatten)]
    summary: TurnSummary,
}

#[derive(Serialize)]
struct ActorReport {
    id: EntityId,
    name: String,
    team: TeamId,
    position: Position,
    hit_points: u32,
    max_hit_points: u32,
}

fn parse_archetype(value: &str) -> Result<Archetype, String> {
    value.parse().map_err(|_| {
        let names: Vec<String> = Archetype::all().iter().map(ToString::to_string).collect();
        format!("unknown archetype '{}', expected one of: {}", value, names.join(", "))
    })
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let spec = ScenarioLoader::load(&self.scenario)?;
        let mut encounter = spec
            .build()
            .with_context(|| format!("Failed to build scenario '{}'", spec.name))?;

        let mut config = match &self.config {
            Some(path) => AiConfig::load(path)
                .with_context(|| format!("Failed to load AI config: {}", path.display()))?,
            None => AiConfig::default(),
        };
        if let Some(archetype) = self.archetype {
            if config.weights.is_some() {
                tracing::info!("--archetype {} replaces the explicit weight table", archetype);
            }
            config.archetype = archetype;
            config.weights = None;
        }
        config.verbose |= self.verbose;

        tracing::info!(
            "simulating '{}' for {} round(s) as {} ({} evaluation)",
            spec.name,
            self.rounds,
            config.archetype,
            config.strategy
        );

        let first_round = encounter.round();
        let turns = play(&mut encounter, &config, self.rounds);
        let report = Report {
            scenario: spec.name.clone(),
            archetype: config.archetype,
            rounds_played: turns.last().map_or(0, |turn| turn.round - first_round + 1),
            turns,
            actors: actor_reports(&encounter),
        };

        if self.json {
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize report to JSON")?;
            println!("{}", json);
        } else {
            print_summary(&report, encounter.is_over());
        }
        Ok(())
    }
}

fn play(encounter: &mut Encounter, config: &AiConfig, rounds: u32) -> Vec<TurnReport> {
    let last_round = encounter.round() + rounds;
    let turn_cap = encounter.order().len() * rounds as usize;
    let mut turns = Vec::new();

    while turns.len() < turn_cap && encounter.round() < last_round && !encounter.is_over() {
        let round = encounter.round();
        let summary = take_turn(encounter, config);
        turns.push(TurnReport { round, summary });
    }
    turns
}

fn actor_reports(encounter: &Encounter) -> Vec<ActorReport> {
    encounter
        .order()
        .iter()
        .filter_map(|id| encounter.world().actor(*id))
        .map(|actor| ActorReport {
            id: actor.id,
            name: actor.name.clone(),
            team: actor.team,
            position: actor.position,
            hit_points: actor.hit_points.current,
            max_hit_points: actor.hit_points.maximum,
        })
        .collect()
}

fn print_summary(report: &Report, over: bool) {
    println!("{}", style(format!("=== {} ===", report.scenario)).bold().green());
    println!("{} {}", style("Archetype:").bold().cyan(), report.archetype);
    println!("{} {}", style("Turns:").bold().cyan(), report.turns.len());
    println!();

    let mut round = None;
    for turn in &report.turns {
        if round != Some(turn.round) {
            round = Some(turn.round);
            println!("{}", style(format!("Round {}:", turn.round)).bold().yellow());
        }

        let Some(actor) = turn.summary.actor else {
            continue;
        };
        let name = report
            .actors
            .iter()
            .find(|entry| entry.id == actor)
            .map_or("?", |entry| entry.name.as_str());
        println!("  {} ({})", style(name).bold(), actor);

        for decision in &turn.summary.decisions {
            let result = match (&decision.outcome, &decision.error) {
                (Some(outcome), _) => format!("{:?}", outcome),
                (None, Some(error)) => style(format!("failed: {}", error)).red().to_string(),
                (None, None) => String::new(),
            };
            println!(
                "    {} -> {} from {} [score {}] {}",
                decision.action, decision.target, decision.standing, decision.total, result
            );
        }
        println!("    {}", style(turn.summary.end_reason).dim());
    }
    println!();

    println!("{}", style("Actors:").bold().yellow());
    for actor in &report.actors {
        let hp = format!("{}/{}", actor.hit_points, actor.max_hit_points);
        let hp = if actor.hit_points == 0 {
            style(hp).red()
        } else {
            style(hp).green()
        };
        println!(
            "  {} ({}, team {}) at {} - HP {}",
            actor.name, actor.id, actor.team, actor.position, hp
        );
    }

    if over {
        println!();
        println!("{}", style("Encounter over").bold().magenta());
    }
}
