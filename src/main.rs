//! Chatfold - terminal chat client for stream-json agent bridges

mod bridge;
mod cli;
mod config;
mod engine;
mod interrupt;
mod output;
mod ui;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;
use std::time::Instant;

use engine::Engine;
use output::formatter::TranscriptPrinter;
use output::logger::RawLog;
use ui::UiEvent;

fn main() -> ExitCode {
    match run() {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = cli::Args::parse_args();

    match args.command {
        Some(cli::Command::Run {
            prompt,
            bridge,
            model,
            no_ui,
            no_log,
        }) => {
            let file_config = config::discover_file_config()?;
            let config = config::Config::from_run_args(bridge, model, no_log, file_config)?;
            interrupt::register_signal_handler()?;

            let ui_guard = ui::start(ui::UiMode::resolve(no_ui));
            let mut engine = Engine::new();
            let mut log = if config.log_raw {
                RawLog::create()
            } else {
                RawLog::disabled()
            };

            let started = Instant::now();
            let outcome = if ui_guard.is_active() {
                ui::emit(UiEvent::StatusLine("Streaming".to_string()));
                let mut on_update = |engine: &Engine| publish_to_ui(engine);
                bridge::client::run(&config, &prompt, &mut engine, &mut log, &mut on_update)
            } else {
                let mut printer = TranscriptPrinter::new();
                let mut on_update =
                    |engine: &Engine| printer.print_new(&engine.transcript());
                bridge::client::run(&config, &prompt, &mut engine, &mut log, &mut on_update)
            };

            let failed = transcript_has_error(&engine);
            if ui_guard.is_active() {
                let status = if failed { "Failed" } else { "Done" };
                ui::emit(UiEvent::StatusLine(format!("{status} — press q to quit")));
                ui::emit(UiEvent::StreamEnded);
                ui::wait();
            } else if outcome.is_ok() && !failed {
                output::formatter::print_done(started.elapsed().as_secs());
            }

            // A spawn/stream failure surfaces after the terminal is restored.
            outcome?;

            if failed {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Some(cli::Command::Replay { file, no_ui }) => {
            let ui_guard = ui::start(ui::UiMode::resolve(no_ui));
            let mut engine = Engine::new();

            let outcome = {
                let mut ui_update = |engine: &Engine| publish_to_ui(engine);
                let mut printer = TranscriptPrinter::new();
                let mut plain_update =
                    |engine: &Engine| printer.print_new(&engine.transcript());
                let on_update: &mut dyn FnMut(&Engine) = if ui_guard.is_active() {
                    &mut ui_update
                } else {
                    &mut plain_update
                };

                match &file {
                    Some(path) => {
                        let reader = BufReader::new(File::open(path).with_context(|| {
                            format!("failed to open event log '{}'", path.display())
                        })?);
                        bridge::client::fold_reader(reader, &mut engine, on_update)
                    }
                    None => {
                        let stdin = std::io::stdin();
                        bridge::client::fold_reader(stdin.lock(), &mut engine, on_update)
                    }
                }
            };

            if ui_guard.is_active() {
                ui::emit(UiEvent::StatusLine("Replay — press q to quit".to_string()));
                ui::emit(UiEvent::StreamEnded);
                ui::wait();
            }

            outcome?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            // Bare `chatfold` with no subcommand prints help
            use clap::Parser;
            cli::Args::parse_from(["chatfold", "--help"]);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Push the engine's state to the TUI after a mutation.
fn publish_to_ui(engine: &Engine) {
    ui::emit(UiEvent::Transcript(engine.transcript()));
    if let Some(session_id) = engine.session_id() {
        ui::emit(UiEvent::SessionId(session_id.to_string()));
    }
}

fn transcript_has_error(engine: &Engine) -> bool {
    engine
        .transcript()
        .iter()
        .any(|message| message.blocks.iter().any(|block| block.is_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::event::{BridgeEvent, EventKind};

    #[test]
    fn transcript_error_detection() {
        let mut engine = Engine::new();
        assert!(!transcript_has_error(&engine));

        let mut text = BridgeEvent::of_kind(EventKind::Assistant);
        text.text = Some("fine".to_string());
        engine.handle_event(&text);
        assert!(!transcript_has_error(&engine));

        engine.handle_event(&BridgeEvent::process_error("boom".to_string()));
        assert!(transcript_has_error(&engine));
    }
}
