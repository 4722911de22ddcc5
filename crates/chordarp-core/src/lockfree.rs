//! Lock-free primitives for real-time parameter exchange.

use std::sync::atomic::{AtomicU64, Ordering};

/// Cache-line aligned 64-bit word read once per block by the audio thread.
///
/// Several small values are packed into one word so a reader always sees a
/// consistent combination.
#[derive(Debug)]
#[repr(align(64))]
pub struct AtomicWord {
    value: AtomicU64,
}

impl AtomicWord {
    pub fn new(value: u64) -> Self {
        Self {
            value: AtomicU64::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }

    /// Read-modify-write without locking. Returns the new value.
    #[inline]
    pub fn update<F>(&self, mut f: F) -> u64
    where
        F: FnMut(u64) -> u64,
    {
        let mut current = self.get();
        loop {
            let next = f(current);
            match self.value.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return next,
                Err(actual) => current = actual,
            }
        }
    }
}

impl Clone for AtomicWord {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl Default for AtomicWord {
    fn default() -> Self {
        Self::new(0)
    }
}
