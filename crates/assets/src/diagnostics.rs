//! One-time asset diagnostics.
//!
//! The first time a persona's assets are touched, we log whether both files
//! were found — once per process, even under concurrent first use. This is
//! explicit state with init-once semantics rather than ambient module
//! state: whoever owns the store owns the flag.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// Process-scoped "have we reported on assets yet" flag.
#[derive(Debug, Default)]
pub struct LoadDiagnostics {
    reported: AtomicBool,
}

impl LoadDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report asset availability exactly once.
    ///
    /// The compare-exchange guarantees a single winner when two threads
    /// perform the first load simultaneously; every later call is a no-op.
    pub fn report_once(&self, kb_path: &Path, style_path: &Path) {
        if self
            .reported
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        let kb_ok = kb_path.exists();
        let style_ok = style_path.exists();
        if kb_ok && style_ok {
            info!(
                kb = %kb_path.display(),
                style = %style_path.display(),
                "Persona assets OK"
            );
        } else {
            warn!(
                kb = %kb_path.display(),
                kb_found = kb_ok,
                style = %style_path.display(),
                style_found = style_ok,
                "Persona assets missing"
            );
        }
    }

    /// Whether the one-time report has already fired.
    pub fn has_reported(&self) -> bool {
        self.reported.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[test]
    fn reports_only_once() {
        let diag = LoadDiagnostics::new();
        assert!(!diag.has_reported());

        diag.report_once(Path::new("/nonexistent/kb"), Path::new("/nonexistent/style"));
        assert!(diag.has_reported());

        // second call is a no-op, flag stays set
        diag.report_once(Path::new("/other/kb"), Path::new("/other/style"));
        assert!(diag.has_reported());
    }

    #[test]
    fn concurrent_first_use_reports_once() {
        let diag = Arc::new(LoadDiagnostics::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let diag = Arc::clone(&diag);
                std::thread::spawn(move || {
                    diag.report_once(
                        &PathBuf::from("/nonexistent/kb"),
                        &PathBuf::from("/nonexistent/style"),
                    );
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert!(diag.has_reported());
    }
}
