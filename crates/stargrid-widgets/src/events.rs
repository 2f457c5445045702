#![forbid(unsafe_code)]

//! Domain events and scoped registration.
//!
//! Domain managers [`publish`](EventBus::publish) collection changes; each
//! interested grid holds a [`Registration`] and drains its queue when the
//! frame loop gets to it. Registration lifetime is ownership: dropping the
//! `Registration` unsubscribes, exactly once, with no paired
//! subscribe/unsubscribe calls to keep in sync.
//!
//! Everything runs on the UI thread, so the bus is `Rc`-based and `!Send`.

use crate::item::GridItem;
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::{Rc, Weak};

/// Identifier of one registration on a bus.
pub type SubId = u64;

/// Collection notifications a grid reacts to.
pub enum GridEvent<T: GridItem> {
    /// The backing collection changed; carries the new snapshot.
    CollectionChanged(Vec<T>),
    /// One item joined the collection.
    ItemAdded(T),
    /// One item was removed or died.
    ItemRemoved(T::Id),
    /// The user finished a drag-drop; carries the new item order.
    Reordered(Vec<T::Id>),
}

impl<T: GridItem + Clone> Clone for GridEvent<T> {
    fn clone(&self) -> Self {
        match self {
            Self::CollectionChanged(items) => Self::CollectionChanged(items.clone()),
            Self::ItemAdded(item) => Self::ItemAdded(item.clone()),
            Self::ItemRemoved(id) => Self::ItemRemoved(id.clone()),
            Self::Reordered(ids) => Self::Reordered(ids.clone()),
        }
    }
}

impl<T: GridItem> std::fmt::Debug for GridEvent<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CollectionChanged(items) => f
                .debug_tuple("CollectionChanged")
                .field(&items.len())
                .finish(),
            Self::ItemAdded(item) => f
                .debug_tuple("ItemAdded")
                .field(&item.item_id())
                .finish(),
            Self::ItemRemoved(id) => f.debug_tuple("ItemRemoved").field(id).finish(),
            Self::Reordered(ids) => f.debug_tuple("Reordered").field(ids).finish(),
        }
    }
}

struct BusInner<E> {
    next_id: SubId,
    queues: BTreeMap<SubId, VecDeque<E>>,
}

/// Single-threaded fan-out queue.
pub struct EventBus<E> {
    inner: Rc<RefCell<BusInner<E>>>,
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(BusInner {
                next_id: 0,
                queues: BTreeMap::new(),
            })),
        }
    }
}

impl<E: Clone> EventBus<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for every live registration.
    pub fn publish(&self, event: E) {
        let mut inner = self.inner.borrow_mut();
        for queue in inner.queues.values_mut() {
            queue.push_back(event.clone());
        }
    }

    /// Register interest. Events published from now on are queued for the
    /// returned registration until it is dropped.
    pub fn subscribe(&self) -> Registration<E> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.queues.insert(id, VecDeque::new());
        Registration {
            id,
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// Number of live registrations.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().queues.len()
    }
}

/// A live subscription. Dropping it unsubscribes.
pub struct Registration<E> {
    id: SubId,
    bus: Weak<RefCell<BusInner<E>>>,
}

impl<E> Registration<E> {
    #[inline]
    pub fn id(&self) -> SubId {
        self.id
    }

    /// Take every pending event, oldest first.
    ///
    /// Returns nothing once the bus itself is gone.
    pub fn drain(&self) -> Vec<E> {
        let Some(bus) = self.bus.upgrade() else {
            return Vec::new();
        };
        let mut inner = bus.borrow_mut();
        inner
            .queues
            .get_mut(&self.id)
            .map(|queue| queue.drain(..).collect())
            .unwrap_or_default()
    }

    /// Whether the bus is still alive.
    pub fn is_connected(&self) -> bool {
        self.bus.strong_count() > 0
    }
}

impl<E> Drop for Registration<E> {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.borrow_mut().queues.remove(&self.id);
        }
    }
}

impl<E> std::fmt::Debug for Registration<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .field("connected", &self.is_connected())
            .finish()
    }
}
