use parking_lot::RwLock;

/// Point-in-time view of the loading signal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingSnapshot {
    pub active: bool,
    pub progress_title: String,
    pub progress_total: u64,
    pub progress_current: u64,
}

impl LoadingSnapshot {
    /// Completed fraction in `0.0..=1.0`, or `None` when no total is tracked
    pub fn ratio(&self) -> Option<f64> {
        if self.progress_total == 0 {
            return None;
        }
        Some((self.progress_current as f64 / self.progress_total as f64).clamp(0.0, 1.0))
    }
}

/// Process-wide "busy" flag with optional progress counters.
///
/// Last writer wins: there is no reference counting between concurrent
/// operations.
pub struct LoadingSignal {
    state: RwLock<LoadingSnapshot>,
}

impl Default for LoadingSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingSignal {
    /// Starts active: session restore clears it once it has settled.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LoadingSnapshot {
                active: true,
                ..LoadingSnapshot::default()
            }),
        }
    }

    pub fn set_loading(&self, active: bool) {
        self.state.write().active = active;
    }

    pub fn set_progress(&self, title: impl Into<String>, total: u64, current: u64) {
        let mut state = self.state.write();
        state.progress_title = title.into();
        state.progress_total = total;
        state.progress_current = current;
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().active
    }

    pub fn snapshot(&self) -> LoadingSnapshot {
        self.state.read().clone()
    }
}
