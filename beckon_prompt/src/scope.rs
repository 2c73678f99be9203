// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Disposable resource scopes.
//!
//! A [`Scope`] owns signal connections, cleanup callbacks, and nested scopes that
//! belong to one lifetime (for example "the prompt is currently displayed").
//! Releasing a scope releases everything it owns, newest first, before returning.
//!
//! ```
//! use beckon_prompt::scope::Scope;
//! use beckon_prompt::signal::Signal;
//!
//! let hits = std::rc::Rc::new(std::cell::Cell::new(0));
//! let signal: Signal<()> = Signal::new();
//! let mut scope = Scope::new();
//!
//! let h = hits.clone();
//! scope.add(signal.connect(move |_| h.set(h.get() + 1)));
//! signal.fire(&());
//!
//! // A fresh session: everything from the previous one is gone first.
//! scope.replace();
//! signal.fire(&());
//! assert_eq!(hits.get(), 1);
//! assert_eq!(scope.generation(), 1);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::signal::Connection;

enum Resource {
    Connection(Connection),
    Cleanup(Box<dyn FnOnce()>),
    Child(Scope),
}

impl Resource {
    fn release(self) {
        match self {
            Self::Connection(mut conn) => conn.disconnect(),
            Self::Cleanup(f) => f(),
            Self::Child(mut scope) => scope.release(),
        }
    }
}

/// Owner of resources tied to one lifetime.
///
/// Every [`release`](Scope::release) bumps the scope's [`generation`](Scope::generation),
/// so callers can tag deferred work with the generation it was scheduled under
/// and recognize it as stale later.
#[derive(Default)]
pub struct Scope {
    resources: Vec<Resource>,
    generation: u64,
}

impl core::fmt::Debug for Scope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scope")
            .field("resources", &self.resources.len())
            .field("generation", &self.generation)
            .finish()
    }
}

impl Scope {
    /// Create an empty scope at generation `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a signal connection.
    pub fn add(&mut self, connection: Connection) {
        self.resources.push(Resource::Connection(connection));
    }

    /// Run `cleanup` when the scope is released.
    pub fn defer(&mut self, cleanup: impl FnOnce() + 'static) {
        self.resources.push(Resource::Cleanup(Box::new(cleanup)));
    }

    /// Adopt `child`; it is released together with this scope.
    pub fn nest(&mut self, child: Self) {
        self.resources.push(Resource::Child(child));
    }

    /// Create an empty nested scope owned by this one and return it for filling.
    pub fn child(&mut self) -> &mut Self {
        self.resources.push(Resource::Child(Self::new()));
        match self.resources.last_mut() {
            Some(Resource::Child(child)) => child,
            _ => unreachable!("a child scope was just pushed"),
        }
    }

    /// Release everything this scope owns, newest first.
    ///
    /// Resources added by cleanups while releasing are released as well.
    pub fn release(&mut self) {
        while let Some(resource) = self.resources.pop() {
            resource.release();
        }
        self.generation += 1;
    }

    /// Release the current contents and hand back the scope, empty, for the next lifetime.
    pub fn replace(&mut self) -> &mut Self {
        self.release();
        self
    }

    /// Number of directly owned resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true if the scope owns nothing.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Number of times this scope has been released.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        while let Some(resource) = self.resources.pop() {
            resource.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Signal;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::{Cell, RefCell};

    #[test]
    fn release_order_is_newest_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scope = Scope::new();
        for i in 0..3 {
            let l = log.clone();
            scope.defer(move || l.borrow_mut().push(i));
        }
        scope.release();
        assert_eq!(*log.borrow(), vec![2, 1, 0]);
        assert!(scope.is_empty());
    }

    #[test]
    fn replace_releases_previous_subscriptions() {
        let signal: Signal<()> = Signal::new();
        let hits = Rc::new(Cell::new(0));
        let mut scope = Scope::new();

        for _ in 0..3 {
            let fresh = scope.replace();
            let h = hits.clone();
            fresh.add(signal.connect(move |_| h.set(h.get() + 1)));
            assert_eq!(signal.len(), 1, "only the newest session is subscribed");
        }
        signal.fire(&());
        assert_eq!(hits.get(), 1, "no duplicate firing across sessions");
        assert_eq!(scope.generation(), 3);
    }

    #[test]
    fn nested_scopes_release_with_parent() {
        let signal: Signal<()> = Signal::new();
        let mut parent = Scope::new();
        parent.child().add(signal.connect(|_| {}));
        let mut adopted = Scope::new();
        adopted.add(signal.connect(|_| {}));
        parent.nest(adopted);
        assert_eq!(signal.len(), 2);
        parent.release();
        assert!(signal.is_empty());
    }

    #[test]
    fn drop_releases() {
        let signal: Signal<()> = Signal::new();
        {
            let mut scope = Scope::new();
            scope.add(signal.connect(|_| {}));
        }
        assert!(signal.is_empty());
    }
}
