//! Tests for transport

use super::*;
use crate::test_utils::test_helpers::{Call, FakeRunner, FakeTerminal, Harness, bare_linux};

fn always(_caps: &Capabilities, _config: &Config) -> bool {
    true
}

fn never(_caps: &Capabilities, _config: &Config) -> bool {
    false
}

fn pipe(name: &'static str, applies: Predicate) -> Candidate {
    Candidate {
        name,
        applies,
        strategy: Strategy::Pipe(ExternalCommand::new(name)),
    }
}

fn tier(name: &'static str, candidates: Vec<Candidate>) -> Tier {
    Tier { name, candidates }
}

#[test]
fn test_select_returns_first_applicable() {
    let harness = Harness::new(bare_linux());
    let tier = tier("t", vec![pipe("a", never), pipe("b", always), pipe("c", always)]);

    let selected = tier.select(&harness.caps, &harness.config).unwrap();
    assert_eq!(selected.name, "b");
}

#[test]
fn test_tier_without_applicable_candidate_is_skipped() {
    let mut harness = Harness::new(bare_linux());
    let tiers = vec![tier("first", vec![pipe("a", never)]), tier("second", vec![pipe("b", always)])];

    let report = run_chain(&tiers, &mut harness.context(), &Payload::new("x"));

    assert_eq!(report.attempts[0].outcome, Outcome::NotApplicable);
    assert_eq!(report.attempts[0].candidate, None);
    assert_eq!(report.winner(), Some("b"));
    assert_eq!(report.attempted(), vec!["b"]);
    assert_eq!(harness.runner.programs(), vec!["b"]);
}

#[test]
fn test_chain_stops_at_first_success() {
    let mut harness = Harness::new(bare_linux());
    let tiers = vec![tier("first", vec![pipe("a", always)]), tier("second", vec![pipe("b", always)])];

    let report = run_chain(&tiers, &mut harness.context(), &Payload::new("x"));

    assert_eq!(report.attempts.len(), 1);
    assert_eq!(report.winner(), Some("a"));
    assert_eq!(harness.runner.programs(), vec!["a"]);
}

#[test]
fn test_failure_inside_tier_does_not_try_sibling() {
    let mut harness = Harness::new(bare_linux()).with_runner(FakeRunner::new().fail("a"));
    let tiers = vec![
        tier("first", vec![pipe("a", always), pipe("a2", always)]),
        tier("second", vec![pipe("b", always)]),
    ];

    let report = run_chain(&tiers, &mut harness.context(), &Payload::new("x"));

    assert_eq!(report.attempts[0].outcome, Outcome::Failed);
    assert!(matches!(
        report.attempts[0].error,
        Some(TermclipError::ExitStatus { .. })
    ));
    assert_eq!(report.winner(), Some("b"));
    assert_eq!(harness.runner.programs(), vec!["a", "b"]);
}

#[test]
fn test_all_failing_has_no_winner() {
    let mut harness =
        Harness::new(bare_linux()).with_runner(FakeRunner::new().fail("a").unspawnable("b"));
    let tiers = vec![tier("first", vec![pipe("a", always)]), tier("second", vec![pipe("b", always)])];

    let report = run_chain(&tiers, &mut harness.context(), &Payload::new("x"));

    assert_eq!(report.winner(), None);
    assert_eq!(report.attempted(), vec!["a", "b"]);
    assert!(matches!(
        report.attempts[1].error,
        Some(TermclipError::Spawn { .. })
    ));
}

#[test]
fn test_detached_helper_counts_as_success() {
    let mut harness = Harness::new(bare_linux()).with_runner(FakeRunner::new().detach("a"));
    let tiers = vec![tier("only", vec![pipe("a", always)])];

    let report = run_chain(&tiers, &mut harness.context(), &Payload::new("x"));

    assert_eq!(report.winner(), Some("a"));
}

#[test]
fn test_pipe_text_replaces_invalid_utf8() {
    let mut harness = Harness::new(bare_linux());
    let tiers = vec![tier(
        "only",
        vec![Candidate {
            name: "text",
            applies: always,
            strategy: Strategy::PipeText(ExternalCommand::new("text")),
        }],
    )];

    run_chain(&tiers, &mut harness.context(), &Payload::new(vec![b'o', 0xfe, b'k']));

    match &harness.runner.calls[0] {
        Call::Feed { input, .. } => assert_eq!(input, "o\u{fffd}k".as_bytes()),
        other => panic!("unexpected call {:?}", other),
    }
}

#[test]
fn test_osc52_strategy_reports_truncation() {
    let mut config = Config::default();
    config.copy.osc52_max_b64 = 4;
    let mut harness = Harness::new(bare_linux()).with_config(config);
    let tiers = vec![tier(
        "only",
        vec![Candidate {
            name: "osc52",
            applies: always,
            strategy: Strategy::Osc52,
        }],
    )];

    let report = run_chain(&tiers, &mut harness.context(), &Payload::new("hello"));

    assert_eq!(report.winner(), Some("osc52"));
    assert!(report.truncated);
    assert_eq!(harness.terminal.writes, vec![b"\x1b]52;c;aGVs\x1b\\".to_vec()]);
}

#[test]
fn test_osc52_strategy_fails_without_terminal() {
    let mut harness = Harness::new(bare_linux()).with_terminal(FakeTerminal::unavailable());
    let tiers = vec![tier(
        "only",
        vec![Candidate {
            name: "osc52",
            applies: always,
            strategy: Strategy::Osc52,
        }],
    )];

    let report = run_chain(&tiers, &mut harness.context(), &Payload::new("hello"));

    assert_eq!(report.attempts[0].outcome, Outcome::Failed);
    assert!(matches!(
        report.attempts[0].error,
        Some(TermclipError::NoTerminal)
    ));
}
