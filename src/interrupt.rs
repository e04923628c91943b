//! Signal handling for cancelling the active bridge request.

use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Global interrupt flag, registered once with SIGINT.
static INTERRUPT_FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();

fn flag() -> &'static Arc<AtomicBool> {
    INTERRUPT_FLAG.get_or_init(|| Arc::new(AtomicBool::new(false)))
}

/// Register the SIGINT handler. Safe to call multiple times (only the first
/// call registers; subsequent calls are no-ops).
pub fn register_signal_handler() -> Result<()> {
    static REGISTERED: OnceLock<()> = OnceLock::new();
    if REGISTERED.set(()).is_err() {
        return Ok(());
    }

    let flag = flag();

    // First handler: set the flag on first Ctrl+C
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(flag))?;

    // Second handler: if the flag is already set (i.e. second Ctrl+C), force-exit
    let flag_clone = Arc::clone(flag);
    unsafe {
        signal_hook::low_level::register(signal_hook::consts::SIGINT, move || {
            if flag_clone.load(Ordering::SeqCst) {
                // Second Ctrl+C — hard exit
                std::process::exit(130);
            }
        })?;
    }

    Ok(())
}

/// Request an interrupt from inside the process.
///
/// Used by the TUI, where raw mode delivers Ctrl+C as a key event instead
/// of a signal.
pub fn request() {
    flag().store(true, Ordering::SeqCst);
}

/// Check whether the interrupt flag is set.
pub fn is_interrupted() -> bool {
    INTERRUPT_FLAG
        .get()
        .map(|f| f.load(Ordering::SeqCst))
        .unwrap_or(false)
}

/// Clear the interrupt flag so the next request starts clean.
pub fn clear_interrupt() {
    if let Some(flag) = INTERRUPT_FLAG.get() {
        flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_interrupted_does_not_panic_before_registration() {
        // The OnceLock may or may not be initialized depending on test
        // order; just verify the accessor is safe either way.
        let _ = is_interrupted();
    }
}
