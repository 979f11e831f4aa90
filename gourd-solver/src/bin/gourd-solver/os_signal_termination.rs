use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use gourd_solver::termination::TerminationCondition;
use log::debug;
use signal_hook::consts::SIGINT;
use signal_hook::consts::SIGTERM;

/// Stops the search after the process received SIGINT or SIGTERM. Clones share the flag, so every
/// worker of a parallel search sees the signal.
#[derive(Clone, Debug)]
pub(crate) struct OsSignal {
    received: Arc<AtomicBool>,
}

impl OsSignal {
    /// Registers the handlers; a signal only raises the flag, the search then stops at its next
    /// node.
    pub(crate) fn install() -> std::io::Result<OsSignal> {
        let received = Arc::new(AtomicBool::new(false));
        for signal in [SIGINT, SIGTERM] {
            let _ = signal_hook::flag::register(signal, Arc::clone(&received))?;
        }
        debug!("Listening for SIGINT and SIGTERM");

        Ok(OsSignal { received })
    }
}

impl TerminationCondition for OsSignal {
    fn should_stop(&mut self) -> bool {
        self.received.load(Ordering::Relaxed)
    }
}
