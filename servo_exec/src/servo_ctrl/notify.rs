//! Completion callbacks for controller results.
//!
//! Every [`ServoCtrl`](super::ServoCtrl) operation returns its outcome directly. Callers which
//! also want a completion callback attach one with [`Notify::notify`], which is handed the same
//! result before it is returned, so both paths always observe the same outcome:
//!
//! ```ignore
//! let calib = servos
//!     .get_configuration(0)
//!     .notify(|r| if let Err(e) = r { warn!("{}", e) })?;
//! ```

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Attach a completion callback to a result.
pub trait Notify: Sized {
    /// Invoke `callback` with a reference to `self`, then return `self` unchanged.
    fn notify<F>(self, callback: F) -> Self
    where
        F: FnOnce(&Self);
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<T, E> Notify for Result<T, E> {
    fn notify<F>(self, callback: F) -> Self
    where
        F: FnOnce(&Self)
    {
        callback(&self);
        self
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_notify() {
        let mut seen = None;

        let res: Result<u8, &str> = Err("bad").notify(|r| seen = Some(r.clone()));

        assert_eq!(res, Err("bad"));
        assert_eq!(seen, Some(Err("bad")));
    }
}
