use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

/// Widget state that host threads may mutate while the scheduler renders.
///
/// Every read-modify-write of a property and its dirty flag happens under the one lock, and
/// widgets hold the lock for the whole of `render`, so a mutation lands entirely before or
/// entirely after a paint.
#[derive(Debug, Default)]
pub struct Shared<T>(Arc<Mutex<T>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(Mutex::new(value)))
    }

    /// Locks the state. A panic on another thread does not poison it for the UI.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

/// Stores `value` in `slot`, keeping `rendered` only if the value did not change.
pub fn set_prop<T: PartialEq>(rendered: &mut bool, slot: &mut T, value: T) {
    *rendered = *rendered && *slot == value;
    *slot = value;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_values_stay_rendered() {
        let mut rendered = true;
        let mut text = String::from("a");
        set_prop(&mut rendered, &mut text, "a".to_string());
        assert!(rendered);
        set_prop(&mut rendered, &mut text, "b".to_string());
        assert!(!rendered);
        set_prop(&mut rendered, &mut text, "b".to_string());
        assert!(!rendered, "a pending repaint is never cancelled");
    }

    #[test]
    fn shared_state_crosses_threads() {
        let state = Shared::new(0u32);
        let remote = state.clone();
        std::thread::spawn(move || *remote.lock() += 5)
            .join()
            .unwrap();
        assert_eq!(*state.lock(), 5);
    }

    #[test]
    fn poisoned_lock_still_yields_state() {
        let state = Shared::new(1u32);
        let remote = state.clone();
        let _ = std::thread::spawn(move || {
            let _guard = remote.lock();
            panic!("worker died");
        })
        .join();
        assert_eq!(*state.lock(), 1);
    }
}
