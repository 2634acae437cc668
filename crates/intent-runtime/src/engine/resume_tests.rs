use super::runtime_test_support::*;
use super::*;

#[test]
fn checkpoint_decides_skip_resume_or_run_per_statement() {
    let b = AstBuilder::new();
    let before = b.assign("before", b.number(1.0));
    let at = b.assign("at", b.number(2.0));
    let after = b.assign("after", b.number(3.0));
    let at_id = at.id;
    let mut session = TestSession::new(main_script(&b, vec![before, at, after]));
    session.checkpoint = Checkpoint::At(at_id);

    assert!(session.turn("resume").is_none());
    assert!(session.var("before").is_none());
    assert_eq!(session.var("at"), Some(&Value::Number(2.0)));
    assert_eq!(session.var("after"), Some(&Value::Number(3.0)));
}

#[test]
fn every_checkpoint_position_partitions_statements() {
    let b = AstBuilder::new();
    let names = ["s0", "s1", "s2", "s3"];
    let statements = names
        .iter()
        .map(|name| b.assign(name, b.boolean(true)))
        .collect::<Vec<_>>();
    let ids = statements.iter().map(|node| node.id).collect::<Vec<_>>();
    let script = main_script(&b, statements);

    for (checkpoint_index, checkpoint) in ids.iter().enumerate() {
        let mut session = TestSession::new(script.clone());
        session.checkpoint = Checkpoint::At(*checkpoint);
        assert!(session.turn("resume").is_none());
        for (index, name) in names.iter().enumerate() {
            assert_eq!(
                session.var(name).is_some(),
                index >= checkpoint_index,
                "checkpoint {} statement {}",
                checkpoint,
                name
            );
        }
    }
}

#[test]
fn replay_never_reapplies_completed_assignments() {
    let b = AstBuilder::new();
    let bump = b.assign("count", b.add(b.var("count"), b.number(1.0)));
    let question = b.assign("reply", b.operation(ask(&b, "Go on?", "command"), SEND));
    let report = b.system_operand(
        ResourceKind::Responder,
        vec![("text", b.add(b.string("count "), b.var("count")))],
    );
    let send = b.operation(report, SEND);
    let mut session = TestSession::new(main_script(&b, vec![bump, question, send]));
    session.environment.assign("count", Value::Number(0.0));

    assert_eq!(session.text("start").as_deref(), Some("Go on?"));
    assert_eq!(session.text("yes").as_deref(), Some("count 1"));
    assert_eq!(session.var("count"), Some(&Value::Number(1.0)));
}

#[test]
fn send_after_the_resumed_statement_surfaces_in_the_same_turn() {
    let b = AstBuilder::new();
    let question = b.operation(ask(&b, "Ready?", "command"), SEND);
    let follow_up = b.assign("note", b.operation(ask(&b, "Noted.", "command"), SEND));
    let mut session = TestSession::new(main_script(&b, vec![question, follow_up]));

    session.turn("hi").expect("question should emit");
    let second = session.turn("go").expect("follow-up should emit");
    assert_eq!(second.response_text, "Noted.");
    assert!(session.var("note").is_none());
}

#[test]
fn send_assignment_stores_text_while_a_checkpoint_is_pending() {
    let b = AstBuilder::new();
    let stored = b.assign("note", b.operation(ask(&b, "kept", "command"), SEND));
    let mut session = TestSession::new(main_script(&b, vec![stored]));
    session.checkpoint = Checkpoint::At(NodeId(0));

    assert!(session.turn("go").is_none());
    assert_eq!(session.var("note"), Some(&Value::from("kept")));
}

#[test]
fn while_loop_resumes_inside_its_body() {
    let b = AstBuilder::new();
    let items = b.assign("items", b.array(Vec::new()));
    let counter = b.assign("i", b.number(0.0));
    let cond = b.condition(Comparison::Less, b.var("i"), b.number(2.0));
    let body = b.statements(vec![
        b.assign("item", b.operation(ask(&b, "Item?", "command"), SEND)),
        b.property(b.var("items"), "append", b.var("item")),
        b.assign("i", b.add(b.var("i"), b.number(1.0))),
    ]);
    let looped = b.while_loop(cond, body);
    let report = b.system_operand(
        ResourceKind::Responder,
        vec![("text", b.add(b.string("got "), b.var("items")))],
    );
    let send = b.operation(report, SEND);
    let mut session = TestSession::new(main_script(&b, vec![items, counter, looped, send]));

    assert_eq!(session.text("list").as_deref(), Some("Item?"));
    assert_eq!(session.text("apple").as_deref(), Some("Item?"));
    assert_eq!(session.text("pear").as_deref(), Some("got [apple, pear]"));
}

#[test]
fn for_loop_resumes_on_the_element_it_suspended_at() {
    let b = AstBuilder::new();
    let chosen = b.assign("chosen", b.array(Vec::new()));
    let menu = b.assign("menu", b.array(vec![b.string("tea"), b.string("cake")]));
    let prompt = b.system_operand(
        ResourceKind::Responder,
        vec![
            (
                "text",
                b.add(b.add(b.string("Want "), b.var("item")), b.string("?")),
            ),
            ("user_action", b.string("confirm")),
        ],
    );
    let question = b.assign("answer", b.operation(prompt, SEND));
    let keep = b.conditional(vec![(
        b.condition(Comparison::Equal, b.var("answer"), b.boolean(true)),
        b.statements(vec![b.property(b.var("chosen"), "append", b.var("item"))]),
    )]);
    let looped = b.for_loop("item", b.var("menu"), b.statements(vec![question, keep]));
    let report = b.system_operand(
        ResourceKind::Responder,
        vec![("text", b.add(b.string("chosen "), b.var("chosen")))],
    );
    let send = b.operation(report, SEND);
    let mut session = TestSession::new(main_script(&b, vec![chosen, menu, looped, send]));

    assert_eq!(session.text("order").as_deref(), Some("Want tea?"));
    assert_eq!(session.text("yes").as_deref(), Some("Want cake?"));
    assert_eq!(session.text("no").as_deref(), Some("chosen [tea]"));
}

#[test]
fn for_loop_with_repeated_elements_finishes() {
    let b = AstBuilder::new();
    let letters = b.array(vec![b.string("a"), b.string("b"), b.string("a")]);
    let announce = b.system_operand(
        ResourceKind::Responder,
        vec![("text", b.add(b.string("item "), b.var("item")))],
    );
    let body = b.statements(vec![b.operation(announce, SEND)]);
    let looped = b.for_loop("item", letters, body);
    let mut session = TestSession::new(main_script(&b, vec![looped]));

    let transcript = (0..4).map(|_| session.text("ok")).collect::<Vec<_>>();
    assert_eq!(
        transcript,
        vec![
            Some("item a".to_string()),
            Some("item b".to_string()),
            Some("item a".to_string()),
            None,
        ]
    );
    assert_eq!(session.environment.len(), 1);
    assert_eq!(session.var("item"), Some(&Value::from("a")));
}

#[test]
fn resumed_session_survives_a_fresh_resource_table() {
    let b = AstBuilder::new();
    let question = b.assign("ok", b.operation(ask(&b, "Continue?", "confirm"), SEND));
    let mut session = TestSession::new(main_script(&b, vec![question]));

    session.turn("hi").expect("question should emit");
    session.resources = ResourceTable::new();
    assert!(session.turn("yes").is_none());
    assert_eq!(session.var("ok"), Some(&Value::Bool(true)));
}
