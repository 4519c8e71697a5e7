//! Shared mutable widget state.

use std::sync::Arc;

use parking_lot::RwLock;

/// A cheaply clonable handle to shared widget state.
///
/// The widget and its caller hold the same live instance: a page transition
/// committed inside the widget is immediately observable through every clone
/// of the handle.
///
/// # Examples
///
/// ```
/// use pager_ui::State;
///
/// let count = State::new(0usize);
/// let alias = count.clone();
/// alias.with_mut(|value| *value += 1);
/// assert_eq!(count.get(), 1);
/// ```
#[derive(Debug, Default)]
pub struct State<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> State<T> {
    /// Wraps a value in a shared state handle.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Executes a closure with a shared reference to the stored value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Executes a closure with a mutable reference to the stored value.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Returns a clone of the stored value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(Clone::clone)
    }

    /// Replaces the stored value.
    pub fn set(&self, value: T) {
        self.with_mut(|slot| *slot = value);
    }
}
