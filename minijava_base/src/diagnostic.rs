//! A module for handling diagnostics reported by the lexer.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use derive_more::{Deref, DerefMut};

/// Represents a sink that diagnostics are reported to.
///
/// The lexer never prints anything on its own; every rich error it produces
/// goes through a `Handler`, and the caller decides whether to store, print,
/// or ignore it.
pub trait Handler<T> {
    /// Receives a diagnostic and handles it.
    fn receive(&self, diagnostic: T);
}

/// Is a [`Handler`] implementation that stores every diagnostic in a vector.
#[derive(Debug, Deref, DerefMut)]
pub struct Storage<T: Send + Sync> {
    diagnostics: RwLock<Vec<T>>,
}

impl<T: Send + Sync> Storage<T> {
    /// Creates a new empty [`Storage`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            diagnostics: RwLock::new(Vec::new()),
        }
    }

    /// Consumes the [`Storage`] and returns the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> { self.diagnostics.into_inner().unwrap() }

    /// Returns a read guard over the stored diagnostics.
    pub fn as_vec(&self) -> RwLockReadGuard<Vec<T>> { self.diagnostics.read().unwrap() }

    /// Returns a write guard over the stored diagnostics.
    pub fn as_vec_mut(&self) -> RwLockWriteGuard<Vec<T>> { self.diagnostics.write().unwrap() }
}

impl<T: Send + Sync> Default for Storage<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Send + Sync, U> Handler<U> for Storage<T>
where
    U: Into<T>,
{
    fn receive(&self, diagnostic: U) {
        self.diagnostics.write().unwrap().push(diagnostic.into());
    }
}

/// Is a [`Handler`] implementation that discards every diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Quiet;

impl<T> Handler<T> for Quiet {
    fn receive(&self, _diagnostic: T) {}
}
