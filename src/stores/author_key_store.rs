use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};

use super::mutation::{Mutation, MutationKind};
use super::state_cell::StateCell;
use super::Store;


#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorKeyState {
    #[serde(rename = "authorKey", default)]
    pub author_key: String,
}

/// Holds the key of the profile author currently selected by the application.
pub struct AuthorKeyStore {
    cell: StateCell<AuthorKeyState>,
}

impl AuthorKeyStore {
    pub fn new() -> Self {
        AuthorKeyStore {
            cell: StateCell::new(Self::ID, AuthorKeyState::default()),
        }
    }

    pub fn get(&self) -> String {
        self.cell.read(|state| state.author_key.clone())
    }

    pub fn set(&self, value: impl Into<String>) {
        let value = value.into();
        self.cell.modify(|state| {
            if state.author_key == value {
                return None;
            }
            state.author_key = value;
            Some(MutationKind::Direct { field: "authorKey" })
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthorKeyState> {
        self.cell.subscribe()
    }

    pub fn mutations(&self) -> broadcast::Receiver<Mutation> {
        self.cell.mutations()
    }
}

impl Default for AuthorKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for AuthorKeyStore {
    const ID: &'static str = "author-key";

    type State = AuthorKeyState;

    fn create() -> Self {
        Self::new()
    }

    fn state(&self) -> AuthorKeyState {
        self.cell.snapshot()
    }

    fn replace_state(&self, state: AuthorKeyState) {
        self.cell.replace(state, MutationKind::Replace);
    }

    fn reset(&self) {
        self.cell.replace(AuthorKeyState::default(), MutationKind::Reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_empty() {
        let store = AuthorKeyStore::new();
        assert_eq!(store.get(), "");
    }

    #[test]
    fn test_set_then_get() {
        let store = AuthorKeyStore::new();
        store.set("BlossomiShymae");
        assert_eq!(store.get(), "BlossomiShymae");
        store.set("");
        assert_eq!(store.get(), "");
    }

    #[test]
    fn test_state_serializes_like_the_frontend() {
        let store = AuthorKeyStore::new();
        store.set("octocat");
        let json = serde_json::to_value(store.state()).unwrap();
        assert_eq!(json, serde_json::json!({ "authorKey": "octocat" }));
    }

    #[test]
    fn test_reset() {
        let store = AuthorKeyStore::new();
        let mut events = store.mutations();
        store.set("octocat");
        store.reset();
        assert_eq!(store.get(), "");
        assert_eq!(events.try_recv().unwrap().kind, MutationKind::Direct { field: "authorKey" });
        assert_eq!(events.try_recv().unwrap().kind, MutationKind::Reset);
    }
}
