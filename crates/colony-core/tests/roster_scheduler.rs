//! Roster scheduling through the full engine tick.

use colony_core::components::{memory_keys, BodyPart::*, Position, Role, WorkerSpec};
use colony_core::sandbox::{Command, Sandbox, ScenarioConfig};
use colony_core::{ColonyEngine, ColonyState, ColonyWorld, Config, SpawnOutcome};
use colony_events::Activity;

fn config(roster: Vec<WorkerSpec>, spawn_energy: u32) -> Config {
    Config {
        roster,
        scenario: ScenarioConfig::empty()
            .with_spawn("HQ", Position::new(25, 25), spawn_energy)
            .with_controller("ctrl", Position::new(40, 10), 1)
            .with_source("src-a", Position::new(10, 10)),
        ..Config::default()
    }
}

fn m1() -> WorkerSpec {
    WorkerSpec::new("M1", Role::Miner, vec![Work, Work, Move, Move])
}

#[test]
fn test_m1_is_requested_with_exact_body_and_memory() {
    let config = config(vec![m1()], 300);
    let mut engine = ColonyEngine::new(&config);
    let mut world = Sandbox::new(&config.scenario);

    let outcome = world.step(&mut engine, ColonyState::new());

    assert_eq!(outcome.creation_requests.len(), 1);
    let request = &outcome.creation_requests[0];
    assert_eq!(request.name, "M1");
    assert_eq!(request.body, vec![Work, Work, Move, Move]);
    assert_eq!(request.outcome, SpawnOutcome::Success);
    assert_eq!(request.memory.get(memory_keys::ROLE), Some("Miner"));
    assert_eq!(request.memory.len(), 1);

    // The seeded record is what the engine persists for the new agent
    assert_eq!(outcome.state.memory("M1"), Some(&request.memory));
    assert!(!outcome.shortage);

    let created: Vec<_> = world
        .journal()
        .iter()
        .filter(|e| matches!(e.command, Command::CreateAgent { .. }))
        .collect();
    assert_eq!(created.len(), 1);
}

#[test]
fn test_absent_entry_gets_exactly_one_request_every_tick() {
    let config = config(vec![m1()], 0);
    let mut engine = ColonyEngine::new(&config);
    let mut world = Sandbox::new(&config.scenario);
    let mut state = ColonyState::new();

    for _ in 0..5 {
        let outcome = world.step(&mut engine, state);
        state = outcome.state;
        assert_eq!(outcome.creation_requests.len(), 1);
        assert_eq!(outcome.creation_requests[0].outcome, SpawnOutcome::InsufficientEnergy);
        assert!(outcome.shortage);
    }
    assert!(state.memory("M1").is_none());
}

#[test]
fn test_no_respawn_entry_is_never_requested() {
    let config = config(vec![m1().keep_spawning(false)], 300);
    let mut engine = ColonyEngine::new(&config);
    let mut world = Sandbox::new(&config.scenario);
    let mut state = ColonyState::new();

    for _ in 0..50 {
        let outcome = world.step(&mut engine, state);
        state = outcome.state;
        assert!(outcome.creation_requests.is_empty());
        assert_eq!(outcome.report.activities_for("M1"), vec![&Activity::NotRespawning]);
    }
    assert!(world.agent("M1").is_none());
}

#[test]
fn test_agent_is_respawned_after_expiry() {
    let config = config(
        vec![m1().with_memory(memory_keys::SOURCE_ID, "src-a")],
        300,
    );
    let mut engine = ColonyEngine::new(&config);
    let mut world = Sandbox::new(&config.scenario);
    let mut state = ColonyState::new();
    let mut requests = 0;

    // 12 ticks of spawning plus a full lifetime, then some
    for _ in 0..1600 {
        let outcome = world.step(&mut engine, state);
        state = outcome.state;
        requests += outcome.creation_requests.iter().filter(|r| r.outcome == SpawnOutcome::Success).count();
    }

    assert_eq!(requests, 2);
    assert!(world.agent("M1").is_some());
    assert_eq!(state.memory("M1").unwrap().get(memory_keys::SOURCE_ID), Some("src-a"));
    assert_eq!(world.agents().len(), 1);
}
