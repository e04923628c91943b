//! Bridge process spawning and streaming.

use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

use crate::config::Config;
use crate::engine::Engine;
use crate::interrupt;
use crate::output::logger::RawLog;

use super::event::BridgeEvent;
use super::parser;

/// Build the CLI args vec for invoking the bridge command.
fn build_bridge_args(config: &Config, prompt: &str) -> Vec<String> {
    let mut args = vec![
        "--print".to_string(),
        "--verbose".to_string(),
        "--output-format".to_string(),
        "stream-json".to_string(),
    ];

    if let Some(model) = &config.model {
        args.push("--model".to_string());
        args.push(model.clone());
    }

    args.extend(config.bridge_args.iter().cloned());
    args.push(prompt.to_string());
    args
}

/// Spawn the bridge, stream its stdout into the engine, and surface a
/// nonzero exit as an error result event.
///
/// The per-run request id is exported to the child as `CHATFOLD_REQUEST_ID`
/// so request-aware bridges can tag their events; the engine's active
/// request is set to the same id before the first line is read and cleared
/// when the stream ends. `on_update` runs after every engine mutation.
pub fn run(
    config: &Config,
    prompt: &str,
    engine: &mut Engine,
    log: &mut RawLog,
    on_update: &mut dyn FnMut(&Engine),
) -> Result<()> {
    let args = build_bridge_args(config, prompt);

    let mut child = Command::new(&config.bridge_cmd)
        .args(&args)
        .env("CHATFOLD_REQUEST_ID", &config.request_id)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn bridge process '{}'", config.bridge_cmd))?;

    let stdout = child.stdout.take().context("failed to capture stdout")?;
    let stderr = child.stderr.take().context("failed to capture stderr")?;
    let stderr_thread = drain_stderr(stderr);

    interrupt::clear_interrupt();
    engine.set_active_request(Some(config.request_id.clone()));

    let mut killed = false;
    for line in BufReader::new(stdout).lines() {
        let line = line.context("failed to read line from bridge stdout")?;
        log.append(&line);

        // First Ctrl+C: kill the bridge. Its death reaches the transcript
        // through the termination-string path below. Lines already emitted
        // keep folding so nothing delivered is lost.
        if interrupt::is_interrupted() && !killed {
            killed = true;
            let _ = child.kill();
        }

        match parser::parse_line(&line) {
            Ok(Some(event)) => {
                engine.handle_event(&event);
                on_update(engine);
            }
            Ok(None) => {}
            Err(_) => {
                // Ignore parse errors for non-JSON lines.
            }
        }
    }

    let status = child.wait().context("failed to wait for bridge process")?;
    let stderr_output = stderr_thread.join().unwrap_or_default();

    if !status.success() {
        let message = exit_message(&config.bridge_cmd, &status, &stderr_output);
        engine.handle_event(&BridgeEvent::process_error(message));
        on_update(engine);
    } else if !stderr_output.is_empty() && !crate::ui::is_active() {
        eprintln!("{stderr_output}");
    }

    engine.set_active_request(None);
    Ok(())
}

/// Fold an already-captured event stream (a log file, stdin) into the
/// engine. Passive consumption: the caller leaves the active request unset,
/// and non-JSON lines are skipped exactly as on the live path.
pub fn fold_reader<R: BufRead>(
    reader: R,
    engine: &mut Engine,
    on_update: &mut dyn FnMut(&Engine),
) -> Result<()> {
    for line in reader.lines() {
        let line = line.context("failed to read line from event stream")?;
        if let Ok(Some(event)) = parser::parse_line(&line) {
            engine.handle_event(&event);
            on_update(engine);
        }
    }
    Ok(())
}

/// Termination message fed to the engine when the bridge exits nonzero.
///
/// The error formatter's table is keyed on these strings; captured stderr
/// is appended for the pass-through case.
fn exit_message(command: &str, status: &ExitStatus, stderr: &str) -> String {
    let mut message = format!("{} exited: {}", command, describe_status(status));
    if !stderr.is_empty() {
        message.push_str(&format!("\nstderr: {}", stderr.trim_end()));
    }
    message
}

fn describe_status(status: &ExitStatus) -> String {
    if let Some(code) = status.code() {
        return format!("exit status {code}");
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return format!("signal: {signal}");
        }
    }

    status.to_string()
}

/// Drain stderr on a background thread to prevent pipe buffer deadlocks.
fn drain_stderr(mut stderr: std::process::ChildStderr) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = String::new();
        let _ = stderr.read_to_string(&mut buf);
        buf
    })
}
