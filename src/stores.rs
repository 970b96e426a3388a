pub mod author_key_store;
pub mod mutation;
pub mod profile_store;
pub mod state_cell;

use serde::de::DeserializeOwned;
use serde::Serialize;


/// A named state container that a [`StoreRegistry`](crate::registry::StoreRegistry)
/// hands out as a single shared instance per id.
pub trait Store: Send + Sync + 'static {
    /// Stable lookup name.
    const ID: &'static str;

    type State: Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Builds the store with default state.
    fn create() -> Self;

    fn state(&self) -> Self::State;

    /// Swaps the whole state in one step.
    fn replace_state(&self, state: Self::State);

    fn reset(&self);
}
