//! Busy Flag
//!
//! Shared "request in flight" indicator for the auth forms.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Set the flag until the returned guard drops
    pub fn hold(&self) -> BusyGuard {
        self.0.store(true, Ordering::Release);
        BusyGuard(self.0.clone())
    }
}

/// Clears the flag on drop, including when the request future is dropped
#[derive(Debug)]
pub struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_and_release() {
        let flag = BusyFlag::new();
        let observer = flag.clone();
        assert!(!observer.is_set());
        {
            let _guard = flag.hold();
            assert!(observer.is_set());
        }
        assert!(!observer.is_set());
    }
}
