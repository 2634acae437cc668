use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

use intent_api::script_to_json;
use intent_core::{AstBuilder, Comparison, ResourceKind, Script};

fn temp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be monotonic")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("intent-cli-smoke-{}-{}", name, nanos));
    fs::create_dir_all(&dir).expect("temp dir should be created");
    dir
}

fn order_script() -> Script {
    let b = AstBuilder::new();
    let question = b.system_operand(
        ResourceKind::Responder,
        vec![
            ("text", b.string("Place the order?")),
            ("user_action", b.string("confirm")),
        ],
    );
    let ask = b.assign("ok", b.operation(question, "send"));
    let reply = |text: &str| {
        b.operation(
            b.system_operand(ResourceKind::Responder, vec![("text", b.string(text))]),
            "send",
        )
    };
    let branch = b.conditional(vec![
        (
            b.condition(Comparison::Equal, b.var("ok"), b.boolean(true)),
            b.statements(vec![reply("Ordered")]),
        ),
        (b.boolean(true), b.statements(vec![reply("Cancelled")])),
    ]);
    let main = b.function("main", 0, None, b.statements(vec![ask, branch]));
    b.script(b.block(Vec::new(), vec![main]))
}

fn run_turn(scripts_dir: &Path, state_in: Option<&Path>, state_out: &Path, message: &str) -> Output {
    let bin = env!("CARGO_BIN_EXE_intent-cli");
    let mut command = Command::new(bin);
    command
        .arg("turn")
        .arg("--scripts-dir")
        .arg(scripts_dir)
        .arg("--state-out")
        .arg(state_out)
        .arg("--message")
        .arg(message)
        .arg("--seed")
        .arg("3");
    if let Some(state_in) = state_in {
        command.arg("--state-in").arg(state_in);
    }
    command.output().expect("cli should execute")
}

fn stdout_of(output: &Output) -> String {
    if !output.status.success() {
        panic!(
            "turn failed\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn confirm_conversation_runs_across_processes() {
    let dir = temp_dir("confirm");
    let json = script_to_json(&order_script()).expect("script should encode");
    fs::write(dir.join("main.intent.json"), json).expect("script should be written");
    let first_state = dir.join("state-1.json");
    let second_state = dir.join("state-2.json");
    let third_state = dir.join("state-3.json");

    let first = stdout_of(&run_turn(&dir, None, &first_state, "pizza"));
    assert!(first.contains("RESULT:OK"));
    assert!(first.contains("EVENT:REPLY"));
    assert!(first.contains("TEXT_JSON:\"Place the order?\""));
    assert!(first.contains("ACTION:confirm"));
    assert!(first_state.exists());

    let second = stdout_of(&run_turn(&dir, Some(&first_state), &second_state, "yes"));
    assert!(second.contains("TEXT_JSON:\"Ordered\""));
    assert!(second.contains("ACTION:inform"));

    let third = stdout_of(&run_turn(&dir, Some(&second_state), &third_state, "thanks"));
    assert!(third.contains("EVENT:END"));
    assert!(third.contains("CHECKPOINT:-1"));
}

#[test]
fn missing_scripts_dir_reports_error_lines() {
    let dir = temp_dir("missing");
    let output = run_turn(&dir.join("absent"), None, &dir.join("state.json"), "hi");
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("RESULT:ERROR"));
    assert!(stdout.contains("ERROR_CODE:CLI_SOURCE_NOT_FOUND"));
}
