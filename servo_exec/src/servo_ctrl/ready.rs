//! One-shot readiness signal.
//!
//! A [`ReadySignal`] is created alongside each controller and resolved exactly once when the
//! controller sets the PWM frequency during [`ServoCtrl::init`](super::ServoCtrl::init). Handles
//! can be cloned freely and held independently of the controller; a handle obtained after the
//! signal resolved still observes the outcome.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use conquer_once::OnceCell;
use std::sync::Arc;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Shared handle on a controller's readiness.
///
/// Resolves either to ready or to the hardware error which prevented the controller becoming
/// ready.
pub struct ReadySignal<E> {
    cell: Arc<OnceCell<Result<(), E>>>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<E> ReadySignal<E> {
    /// Create a new unresolved signal.
    pub fn new() -> Self {
        Self {
            cell: Arc::new(OnceCell::uninit()),
        }
    }

    /// Resolve the signal with the given outcome.
    ///
    /// Returns `false` and discards `outcome` if the signal had already been resolved.
    pub fn resolve(&self, outcome: Result<(), E>) -> bool {
        self.cell.try_init_once(move || outcome).is_ok()
    }

    /// `true` once the signal has been resolved, whatever the outcome.
    pub fn is_resolved(&self) -> bool {
        self.cell.is_initialized()
    }

    /// `true` if the signal resolved to ready.
    pub fn is_ready(&self) -> bool {
        matches!(self.cell.get(), Some(Ok(())))
    }

    /// The error the signal resolved to, if any.
    pub fn error(&self) -> Option<&E> {
        match self.cell.get() {
            Some(Err(e)) => Some(e),
            _ => None,
        }
    }

    /// The outcome of the signal, or `None` if it is unresolved.
    pub fn outcome(&self) -> Option<Result<(), &E>> {
        self.cell.get().map(|o| o.as_ref().map(|_| ()))
    }
}

impl<E> Clone for ReadySignal<E> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}

impl<E> Default for ReadySignal<E> {
    fn default() -> Self {
        Self::new()
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_resolves_once() {
        let signal: ReadySignal<&str> = ReadySignal::new();
        let early = signal.clone();

        assert!(!signal.is_resolved());
        assert_eq!(signal.outcome(), None);

        assert!(signal.resolve(Err("i2c")));
        assert!(!signal.resolve(Ok(())));

        // Handles taken before and after resolution agree
        let late = signal.clone();
        for s in [&early, &late].iter() {
            assert!(s.is_resolved());
            assert!(!s.is_ready());
            assert_eq!(s.error(), Some(&"i2c"));
            assert_eq!(s.outcome(), Some(Err(&"i2c")));
        }
    }

    #[test]
    fn test_ready() {
        let signal: ReadySignal<()> = ReadySignal::default();

        assert!(signal.resolve(Ok(())));
        assert!(signal.is_ready());
        assert!(signal.error().is_none());
        assert_eq!(signal.outcome(), Some(Ok(())));
    }
}
