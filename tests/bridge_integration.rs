//! Integration tests driving the bridge client against the mock bridge binary.
//!
//! **Requires the `test-mock-bridge` feature to build the mock binary.**
//!
//!   cargo test --features test-mock-bridge -- bridge_integration
//!
//! The mock bridge is in tests/mock_bridge.rs; the scenario is passed where
//! the prompt would normally go.

use std::path::PathBuf;

use chatfold::bridge::client;
use chatfold::config::Config;
use chatfold::engine::{Engine, MessageBlock};
use chatfold::output::logger::RawLog;

/// Navigate from the test binary to the Cargo `target/debug` (or
/// `target/release`) directory.
///
/// Test binaries live at `target/debug/deps/<test-binary-name>`; walking up
/// two levels gives `target/debug/`, which is where Cargo places
/// `[[example]]` outputs under `examples/`.
fn target_dir() -> PathBuf {
    let exe = std::env::current_exe().expect("could not locate test binary");
    exe.parent()
        .and_then(|p| p.parent())
        .map(PathBuf::from)
        .expect("could not navigate to target directory from current_exe")
}

/// Path to the compiled `mock-bridge` example binary.
fn mock_bridge_path() -> PathBuf {
    target_dir().join("examples").join("mock-bridge")
}

fn mock_config(request_id: &str) -> Config {
    Config {
        bridge_cmd: mock_bridge_path().to_string_lossy().to_string(),
        bridge_args: vec![],
        model: None,
        log_raw: false,
        request_id: request_id.to_string(),
    }
}

/// Run the client against the mock bridge and return the folded engine.
fn run_scenario(scenario: &str) -> Engine {
    let config = mock_config("req-itest001");
    let mut engine = Engine::new();
    let mut log = RawLog::disabled();
    client::run(&config, scenario, &mut engine, &mut log, &mut |_| {})
        .expect("mock bridge run failed");
    engine
}

fn text_contents(engine: &Engine) -> Vec<String> {
    engine
        .transcript()
        .iter()
        .flat_map(|m| m.blocks.clone())
        .filter_map(|b| match b {
            MessageBlock::Text { content } => Some(content),
            _ => None,
        })
        .collect()
}

#[test]
fn basic_stream_folds_into_a_single_message() {
    let engine = run_scenario("basic");

    assert_eq!(engine.session_id(), Some("s-mock-1"));
    assert_eq!(
        engine.active_request(),
        None,
        "active request cleared once the stream ends"
    );

    let transcript = engine.transcript();
    assert_eq!(transcript.len(), 1, "one turn, one message");
    assert_eq!(
        transcript[0].blocks,
        vec![
            MessageBlock::Thinking {
                content: "planning the answer".to_string()
            },
            MessageBlock::Text {
                content: "hello from the mock bridge".to_string()
            },
            MessageBlock::ToolUse {
                content: String::new(),
                tool_name: "Bash".to_string(),
                tool_input: r#"{"command":"ls -la"}"#.to_string(),
            },
        ]
    );
}

#[test]
fn stale_request_events_are_dropped() {
    let engine = run_scenario("stale");

    assert_eq!(
        engine.session_id(),
        Some("s-live"),
        "stale session announcement must not win"
    );
    assert_eq!(text_contents(&engine), vec!["live text"]);
    assert!(
        engine
            .transcript()
            .iter()
            .all(|m| m.blocks.iter().all(|b| !b.is_error())),
        "the stale error result must have no observable effect"
    );
}

#[test]
fn nonzero_exit_surfaces_as_an_interrupted_block() {
    let engine = run_scenario("interrupt");

    let transcript = engine.transcript();
    assert_eq!(transcript.len(), 1);
    let blocks = &transcript[0].blocks;
    assert_eq!(blocks.len(), 2, "partial text plus the synthesized error");
    assert_eq!(
        blocks[0],
        MessageBlock::Text {
            content: "partial answer".to_string()
        }
    );
    assert_eq!(
        blocks[1],
        MessageBlock::Error {
            content: "Interrupted".to_string()
        },
        "exit status 143 maps through the error formatter"
    );
}

#[test]
fn unknown_error_strings_pass_through_verbatim() {
    let engine = run_scenario("error-event");

    let transcript = engine.transcript();
    assert_eq!(transcript.len(), 1);
    assert_eq!(
        transcript[0].blocks.last(),
        Some(&MessageBlock::Error {
            content: "upstream connection lost".to_string()
        })
    );
}

#[test]
fn junk_lines_are_skipped_without_losing_events() {
    let engine = run_scenario("noise");

    assert_eq!(text_contents(&engine), vec!["signal"]);
    let transcript = engine.transcript();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].blocks.len(), 1, "unknown event types ignored");
}

#[test]
fn logged_stream_replays_to_the_same_transcript() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let log_path = tmp.path().join("stream.jsonl");

    // Live run, logging the raw stream.
    let config = mock_config("req-itest002");
    let mut live = Engine::new();
    let mut log = RawLog::at(&log_path);
    client::run(&config, "basic", &mut live, &mut log, &mut |_| {})
        .expect("mock bridge run failed");
    drop(log);

    // Passive replay of the log with no active request.
    let mut replayed = Engine::new();
    let reader = std::io::BufReader::new(std::fs::File::open(&log_path).expect("open log"));
    client::fold_reader(reader, &mut replayed, &mut |_| {}).expect("replay failed");

    assert_eq!(replayed.session_id(), live.session_id());
    let live_blocks: Vec<_> = live
        .transcript()
        .iter()
        .map(|m| m.blocks.clone())
        .collect();
    let replayed_blocks: Vec<_> = replayed
        .transcript()
        .iter()
        .map(|m| m.blocks.clone())
        .collect();
    assert_eq!(replayed_blocks, live_blocks);
}
