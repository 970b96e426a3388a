use tokio::sync::{broadcast, watch};

use super::mutation::{Mutation, MutationKind};


const MUTATION_CAPACITY: usize = 64;

/// Lock-guarded state shared by every holder of a store.
///
/// Reads and writes never suspend. Each write that changes the value wakes
/// state subscribers and publishes one [`Mutation`].
pub struct StateCell<T> {
    store_id: &'static str,
    state: watch::Sender<T>,
    mutations: broadcast::Sender<Mutation>,
}

impl<T> StateCell<T> {
    pub fn new(store_id: &'static str, initial: T) -> Self {
        let (state, _) = watch::channel(initial);
        let (mutations, _) = broadcast::channel(MUTATION_CAPACITY);
        StateCell { store_id, state, mutations }
    }

    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Runs `f` under the write lock. `f` returns the mutation to publish, or
    /// `None` when nothing changed.
    ///
    /// The mutation is broadcast before the lock is released, so events arrive
    /// in the same order the state changed.
    pub fn modify(&self, f: impl FnOnce(&mut T) -> Option<MutationKind>) -> bool {
        self.state.send_if_modified(|state| match f(state) {
            Some(kind) => {
                self.publish(kind);
                true
            }
            None => false,
        })
    }

    /// Swaps in `value` unless it equals the current state.
    pub fn replace(&self, value: T, kind: MutationKind) -> bool
    where
        T: PartialEq,
    {
        self.modify(|state| {
            if *state == value {
                return None;
            }
            *state = value;
            Some(kind)
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.state.subscribe()
    }

    pub fn mutations(&self) -> broadcast::Receiver<Mutation> {
        self.mutations.subscribe()
    }

    fn publish(&self, kind: MutationKind) {
        log::debug!("Mutation on store {}: {:?}", self.store_id, kind);
        // No listeners is fine.
        let _ = self.mutations.send(Mutation { store_id: self.store_id, kind });
    }
}

impl<T: Clone> StateCell<T> {
    pub fn snapshot(&self) -> T {
        self.state.borrow().clone()
    }
}
