use std::collections::BTreeSet;

use super::runtime_test_support::*;
use super::*;
use crate::chooser::SeededChooser;

fn intent(b: &AstBuilder, name: &str, priority: i64, precondition: bool) -> AstNode {
    let action = b.statements(vec![say(b, name)]);
    b.function(name, priority, Some(b.boolean(precondition)), action)
}

#[test]
fn highest_priority_always_wins() {
    for seed in 0..32u32 {
        let b = AstBuilder::new();
        let functions = vec![
            intent(&b, "low_a", 1, true),
            intent(&b, "low_b", 1, true),
            intent(&b, "high", 2, true),
        ];
        let mut session = TestSession::new(b.script(b.block(Vec::new(), functions)))
            .with_chooser(SeededChooser::new(seed));
        assert_eq!(session.text("hi").as_deref(), Some("high"), "seed {}", seed);
    }
}

#[test]
fn ties_reach_every_candidate() {
    let b = AstBuilder::new();
    let functions = vec![
        intent(&b, "low", 1, true),
        intent(&b, "left", 2, true),
        intent(&b, "right", 2, true),
    ];
    let script = b.script(b.block(Vec::new(), functions));

    let mut first = TestSession::new(script.clone()).with_chooser(ScriptedChooser(vec![0]));
    assert_eq!(first.text("hi").as_deref(), Some("left"));
    let mut second = TestSession::new(script.clone()).with_chooser(ScriptedChooser(vec![1]));
    assert_eq!(second.text("hi").as_deref(), Some("right"));

    let seen = (0..64u32)
        .filter_map(|seed| {
            TestSession::new(script.clone())
                .with_chooser(SeededChooser::new(seed))
                .text("hi")
        })
        .collect::<BTreeSet<_>>();
    assert_eq!(
        seen,
        BTreeSet::from(["left".to_string(), "right".to_string()])
    );
}

#[test]
fn main_wins_regardless_of_other_priorities() {
    let b = AstBuilder::new();
    let functions = vec![
        intent(&b, "urgent", 100, true),
        b.function(MAIN, 0, None, b.statements(vec![say(&b, "main")])),
    ];
    let mut session = TestSession::new(b.script(b.block(Vec::new(), functions)));
    assert_eq!(session.text("hi").as_deref(), Some("main"));
}

#[test]
fn false_preconditions_are_never_selected() {
    let b = AstBuilder::new();
    let functions = vec![intent(&b, "blocked", 9, false), intent(&b, "open", 1, true)];
    let mut session = TestSession::new(b.script(b.block(Vec::new(), functions)));
    assert_eq!(session.text("hi").as_deref(), Some("open"));
}

#[test]
fn negative_priority_never_qualifies() {
    let b = AstBuilder::new();
    let functions = vec![intent(&b, "neg", -1, true)];
    let mut session = TestSession::new(b.script(b.block(Vec::new(), functions)));
    let error = session
        .turn_with("hi", &[])
        .expect_err("negative priority should not qualify");
    assert_eq!(error.code, "ENGINE_NO_ELIGIBLE_INTENT");
}

#[test]
fn zero_priority_qualifies_over_negative() {
    let b = AstBuilder::new();
    let functions = vec![intent(&b, "neg", -3, true), intent(&b, "zero", 0, true)];
    let mut session = TestSession::new(b.script(b.block(Vec::new(), functions)));
    assert_eq!(session.text("hi").as_deref(), Some("zero"));
}

#[test]
fn no_eligible_intent_is_a_defined_error() {
    let b = AstBuilder::new();
    let functions = vec![intent(&b, "a", 1, false), intent(&b, "b", 2, false)];
    let mut session = TestSession::new(b.script(b.block(Vec::new(), functions)));
    let error = session
        .turn_with("hi", &[])
        .expect_err("nothing should qualify");
    assert_eq!(error.code, "ENGINE_NO_ELIGIBLE_INTENT");

    let b = AstBuilder::new();
    let mut empty = TestSession::new(b.script(b.block(Vec::new(), Vec::new())));
    let error = empty.turn_with("hi", &[]).expect_err("empty block");
    assert_eq!(error.code, "ENGINE_NO_ELIGIBLE_INTENT");
}

#[test]
fn slot_precondition_gates_selection_without_error() {
    let b = AstBuilder::new();
    let weather = b.function(
        "weather",
        5,
        Some(b.slot("city")),
        b.statements(vec![say(&b, "weather")]),
    );
    let fallback = intent(&b, "fallback", 1, true);
    let script = b.script(b.block(Vec::new(), vec![weather, fallback]));

    let mut without = TestSession::new(script.clone());
    assert_eq!(without.text("hi").as_deref(), Some("fallback"));

    let mut with = TestSession::new(script);
    let slots = vec![Slot::new("city", "Oslo")];
    let result = with
        .turn_with("weather in oslo", &slots)
        .expect("turn should pass")
        .expect("weather should emit");
    assert_eq!(result.response_text, "weather");
}

#[test]
fn top_level_assignments_run_before_selection() {
    let b = AstBuilder::new();
    let greeting = b.assign("greeting", b.string("hello"));
    let gated = b.function(
        "greet",
        1,
        Some(b.condition(
            Comparison::Equal,
            b.var("greeting"),
            b.string("hello"),
        )),
        b.statements(vec![say(&b, "greeted")]),
    );
    let mut session = TestSession::new(b.script(b.block(vec![greeting], vec![gated])));

    assert_eq!(session.text("hi").as_deref(), Some("greeted"));
    assert_eq!(session.var("greeting"), Some(&Value::from("hello")));
}

#[test]
fn main_with_false_precondition_ends_quietly() {
    let b = AstBuilder::new();
    let main = b.function(
        MAIN,
        0,
        Some(b.boolean(false)),
        b.statements(vec![say(&b, "never")]),
    );
    let mut session = TestSession::new(b.script(b.block(Vec::new(), vec![main])));
    assert!(session.turn("hi").is_none());
}
