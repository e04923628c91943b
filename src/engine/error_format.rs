//! Maps known process-termination strings to short human messages.

/// Termination strings that mean the bridge was interrupted rather than
/// failed: SIGTERM exit code, and the kill signals the client itself sends.
const INTERRUPTED_MARKERS: &[&str] = &["exit status 143", "signal: 15", "signal: 9"];

/// Generic nonzero-exit marker.
const EXIT_MARKER: &str = "exit status";

/// Format a raw error string for display.
///
/// Pure, case-sensitive, exact-substring matching against a small fixed
/// table. Matching is intentionally narrow so unexpected process output is
/// surfaced verbatim rather than swallowed; the empty string passes through
/// as itself.
pub fn format_error(raw: &str) -> String {
    if INTERRUPTED_MARKERS.iter().any(|m| raw.contains(m)) {
        return "Interrupted".to_string();
    }
    if raw.contains(EXIT_MARKER) {
        return "Process error".to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigterm_exit_code_is_interrupted() {
        assert_eq!(
            format_error("claude exited: exit status 143"),
            "Interrupted"
        );
    }

    #[test]
    fn termination_by_signal_is_interrupted() {
        assert_eq!(format_error("claude exited: signal: 15"), "Interrupted");
        assert_eq!(format_error("claude exited: signal: 9"), "Interrupted");
    }

    #[test]
    fn generic_nonzero_exit_is_process_error() {
        assert_eq!(format_error("claude exited: exit status 1"), "Process error");
    }

    #[test]
    fn interrupted_wins_over_generic_exit() {
        // "exit status 143" also contains "exit status"; the narrow match
        // must be checked first.
        assert_eq!(format_error("exit status 143"), "Interrupted");
    }

    #[test]
    fn trailing_stderr_does_not_defeat_matching() {
        let raw = "claude exited: exit status 143\nstderr: terminated";
        assert_eq!(format_error(raw), "Interrupted");
    }

    #[test]
    fn unknown_strings_pass_through_verbatim() {
        assert_eq!(format_error("ENOENT: no such file"), "ENOENT: no such file");
    }

    #[test]
    fn empty_string_passes_through() {
        assert_eq!(format_error(""), "");
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(format_error("EXIT STATUS 143"), "EXIT STATUS 143");
    }
}
