//! One-shot loading gate.

/// Tracks whether the first refresh cycle has settled.
///
/// The gate starts closed (loading indicator shown, content hidden) and opens
/// once; after that every call is a no-op.
#[derive(Debug, Clone, Default)]
pub struct LoadingGate {
    completed: bool,
}

impl LoadingGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while the loading indicator should be shown.
    pub fn is_loading(&self) -> bool {
        !self.completed
    }

    /// Records a settled cycle. Returns true if this call opened the gate.
    ///
    /// The first cycle opens the gate even when every route failed, so that
    /// failures become visible instead of an endless loading screen.
    pub fn cycle_settled(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_opens_once() {
        let mut gate = LoadingGate::new();
        assert!(gate.is_loading());
        assert!(gate.cycle_settled());
        assert!(!gate.is_loading());
        assert!(!gate.cycle_settled());
        assert!(!gate.cycle_settled());
        assert!(!gate.is_loading());
    }

    #[test]
    fn test_gate_default_is_loading() {
        assert!(LoadingGate::default().is_loading());
    }
}
