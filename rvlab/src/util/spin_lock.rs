//! Spinlocks over atomic swaps, for sharing state between interrupt
//! handlers and the main loop.
//!
//! The labs' recurring shape is a handler that produces a counter-and-flag
//! pair and a polling loop that consumes it. `SpinLock` makes that handoff
//! a compiler-checked unit instead of two bare globals: whoever holds the
//! guard sees both fields move together.
//!
//! Locking never blocks politely; it either succeeds or it doesn't. On the
//! single-hart board the discipline is:
//!
//! - interrupt handlers may `lock()` only state that thread code touches
//!   exclusively inside [`crate::irq::free`] windows, so the spin can
//!   never be entered;
//! - thread code may `try_lock()` anything, and must be prepared for
//!   `Contended` when it races a handler.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, Ordering};

/// A `T` that can't be accessed concurrently or reentrantly.
#[derive(Debug)]
pub struct SpinLock<T: ?Sized> {
    locked: AtomicBool,
    contents: UnsafeCell<T>,
}

// Safety: the lock hands out at most one &mut at a time.
unsafe impl<T: Send + ?Sized> Sync for SpinLock<T> {}

impl<T> SpinLock<T> {
    pub const fn new(contents: T) -> Self {
        SpinLock {
            locked: AtomicBool::new(false),
            contents: UnsafeCell::new(contents),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SpinLockError {
    /// Somebody else holds the guard right now.
    Contended,
}

impl<T: ?Sized + Send> SpinLock<T> {
    /// Attempts to take the lock without spinning.
    pub fn try_lock(&self) -> Result<SpinLockGuard<T>, SpinLockError> {
        if self.locked.swap(true, Ordering::Acquire) {
            Err(SpinLockError::Contended)
        } else {
            // We observed the false->true transition, so the contents are
            // ours until the guard drops.
            Ok(SpinLockGuard {
                locked: &self.locked,
                // Safety: the swap above is the exclusion proof.
                contents: unsafe { &mut *self.contents.get() },
            })
        }
    }

    /// Takes the lock, spinning until it's free. See the module docs for
    /// when spinning is and isn't allowed to happen.
    pub fn lock(&self) -> SpinLockGuard<T> {
        loop {
            match self.try_lock() {
                Ok(guard) => return guard,
                Err(SpinLockError::Contended) => continue,
            }
        }
    }
}

/// Exclusive access to the contents of a [`SpinLock`]; unlocks on drop.
#[must_use = "if dropped, the spinlock will immediately unlock"]
#[derive(Debug)]
pub struct SpinLockGuard<'a, T: ?Sized> {
    locked: &'a AtomicBool,
    contents: &'a mut T,
}

impl<'a, T: ?Sized> core::ops::Deref for SpinLockGuard<'a, T> {
    type Target = T;
    fn deref(&self) -> &T {
        self.contents
    }
}

impl<'a, T: ?Sized> core::ops::DerefMut for SpinLockGuard<'a, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.contents
    }
}

impl<'a, T: ?Sized> Drop for SpinLockGuard<'a, T> {
    fn drop(&mut self) {
        self.locked.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncontended_lock_and_mutate() {
        let lock = SpinLock::new(0u32);
        *lock.lock() += 1;
        assert_eq!(*lock.lock(), 1);
    }

    #[test]
    fn second_lock_is_contended_until_drop() {
        let lock = SpinLock::new(());
        let guard = lock.try_lock().unwrap();
        assert_eq!(lock.try_lock().unwrap_err(), SpinLockError::Contended);
        drop(guard);
        assert!(lock.try_lock().is_ok());
    }

    #[test]
    fn guard_sees_both_fields_together() {
        struct Ticks {
            count: u32,
            fresh: bool,
        }
        let shared = SpinLock::new(Ticks {
            count: 0,
            fresh: false,
        });

        {
            let mut t = shared.lock();
            t.count += 1;
            t.fresh = true;
        }

        let mut t = shared.lock();
        assert_eq!(t.count, 1);
        assert!(t.fresh);
        t.fresh = false;
    }
}
