// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synchronous multicast signals with disconnectable handles.
//!
//! ## Dispatch rules
//!
//! - [`Signal::fire`] calls handlers in connection order on the calling thread.
//! - The handler list is snapshotted before dispatch, so handlers may connect or
//!   disconnect (including themselves) while the signal is firing.
//! - A handler disconnected during dispatch is not called for the rest of that dispatch.
//! - Dropping a [`Connection`] disconnects it.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

type Handler<T> = Rc<dyn Fn(&T)>;

struct Slots<T> {
    next: u64,
    handlers: Vec<(u64, Handler<T>)>,
}

impl<T> Slots<T> {
    fn contains(&self, id: u64) -> bool {
        self.handlers.iter().any(|(i, _)| *i == id)
    }
}

trait Detach {
    fn detach(&self, id: u64);
    fn contains(&self, id: u64) -> bool;
}

impl<T> Detach for RefCell<Slots<T>> {
    fn detach(&self, id: u64) {
        // Handlers can be dropped from inside their own dispatch; the snapshot in
        // `fire` keeps the running closure alive.
        let removed = {
            let mut slots = self.borrow_mut();
            slots
                .handlers
                .iter()
                .position(|(i, _)| *i == id)
                .map(|pos| slots.handlers.remove(pos))
        };
        drop(removed);
    }

    fn contains(&self, id: u64) -> bool {
        self.borrow().contains(id)
    }
}

/// A multicast event source.
pub struct Signal<T> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T> core::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Signal")
            .field("handlers", &self.slots.borrow().handlers.len())
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Signal<T> {
    /// Create a signal with no handlers.
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next: 0,
                handlers: Vec::new(),
            })),
        }
    }

    /// Register `handler`. It stays connected until the returned [`Connection`] is dropped
    /// or disconnected.
    #[must_use = "dropping the connection disconnects the handler"]
    pub fn connect(&self, handler: impl Fn(&T) + 'static) -> Connection {
        let id = {
            let mut slots = self.slots.borrow_mut();
            let id = slots.next;
            slots.next += 1;
            slots.handlers.push((id, Rc::new(handler)));
            id
        };
        let detach: Rc<dyn Detach> = self.slots.clone();
        Connection {
            slot: Some((Rc::downgrade(&detach), id)),
        }
    }

    /// Call every connected handler with `value`.
    pub fn fire(&self, value: &T) {
        let snapshot: Vec<(u64, Handler<T>)> = self.slots.borrow().handlers.clone();
        for (id, handler) in snapshot {
            if self.slots.borrow().contains(id) {
                handler(value);
            }
        }
    }

    /// Number of connected handlers.
    pub fn len(&self) -> usize {
        self.slots.borrow().handlers.len()
    }

    /// Returns true if no handler is connected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle to a connected handler.
pub struct Connection {
    slot: Option<(Weak<dyn Detach>, u64)>,
}

impl core::fmt::Debug for Connection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Connection")
            .field("connected", &self.is_connected())
            .finish()
    }
}

impl Connection {
    /// Returns true while the handler is still registered with a live signal.
    pub fn is_connected(&self) -> bool {
        self.slot
            .as_ref()
            .and_then(|(weak, id)| weak.upgrade().map(|s| s.contains(*id)))
            .unwrap_or(false)
    }

    /// Disconnect the handler. Safe to call on an already disconnected handle.
    pub fn disconnect(&mut self) {
        if let Some((weak, id)) = self.slot.take()
            && let Some(slots) = weak.upgrade()
        {
            slots.detach(id);
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn fires_in_connection_order() {
        let signal: Signal<u32> = Signal::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let l1 = log.clone();
        let l2 = log.clone();
        let _a = signal.connect(move |v| l1.borrow_mut().push(("a", *v)));
        let _b = signal.connect(move |v| l2.borrow_mut().push(("b", *v)));
        signal.fire(&7);
        assert_eq!(*log.borrow(), [("a", 7), ("b", 7)]);
    }

    #[test]
    fn dropping_connection_disconnects() {
        let signal: Signal<()> = Signal::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let conn = signal.connect(move |_| h.set(h.get() + 1));
        assert!(conn.is_connected());
        signal.fire(&());
        drop(conn);
        signal.fire(&());
        assert_eq!(hits.get(), 1);
        assert!(signal.is_empty());
    }

    #[test]
    fn handler_disconnected_mid_dispatch_is_skipped() {
        let signal: Signal<()> = Signal::new();
        let second_hits = Rc::new(Cell::new(0));
        let victim: Rc<RefCell<Option<Connection>>> = Rc::new(RefCell::new(None));

        let v = victim.clone();
        let _first = signal.connect(move |_| {
            v.borrow_mut().take();
        });
        let h = second_hits.clone();
        *victim.borrow_mut() = Some(signal.connect(move |_| h.set(h.get() + 1)));

        signal.fire(&());
        assert_eq!(second_hits.get(), 0, "disconnected during dispatch");
        assert_eq!(signal.len(), 1);
    }

    #[test]
    fn handler_may_disconnect_itself() {
        let signal: Signal<()> = Signal::new();
        let hits = Rc::new(Cell::new(0));
        let own: Rc<RefCell<Option<Connection>>> = Rc::new(RefCell::new(None));
        let (o, h) = (own.clone(), hits.clone());
        *own.borrow_mut() = Some(signal.connect(move |_| {
            h.set(h.get() + 1);
            o.borrow_mut().take();
        }));
        signal.fire(&());
        signal.fire(&());
        assert_eq!(hits.get(), 1, "one-shot handler fires once");
    }

    #[test]
    fn connection_outliving_signal_is_inert() {
        let signal: Signal<()> = Signal::new();
        let mut conn = signal.connect(|_| {});
        drop(signal);
        assert!(!conn.is_connected());
        conn.disconnect();
    }
}
