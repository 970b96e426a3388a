use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{broadcast, watch};

use crate::errors::StoreError;
use crate::mappers::field_value_mapper;
use crate::models::field::{FieldValue, ProfileField};
use crate::models::profile::{Profile, ProfilePatch};

use super::mutation::{Mutation, MutationKind};
use super::state_cell::StateCell;
use super::Store;


#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileState {
    #[serde(default)]
    pub profile: Profile,
}

/// Holds the GitHub profile shown by the application.
pub struct ProfileStore {
    cell: StateCell<ProfileState>,
}

impl ProfileStore {
    pub fn new() -> Self {
        ProfileStore {
            cell: StateCell::new(Self::ID, ProfileState::default()),
        }
    }

    pub fn profile(&self) -> Profile {
        self.cell.read(|state| state.profile.clone())
    }

    pub fn get(&self, field: ProfileField) -> FieldValue {
        self.cell.read(|state| state.profile.get(field))
    }

    pub fn get_by_name(&self, name: &str) -> Result<FieldValue, StoreError> {
        Ok(self.get(name.parse()?))
    }

    /// Fails with [`StoreError::TypeMismatch`] when `value` is not the kind
    /// `field` holds. The record is unchanged in that case.
    pub fn set(&self, field: ProfileField, value: impl Into<FieldValue>) -> Result<(), StoreError> {
        let value = value.into();
        let mut result = Ok(());
        self.cell.modify(|state| match state.profile.set(field, value) {
            Ok(true) => Some(MutationKind::Direct { field: field.name() }),
            Ok(false) => None,
            Err(e) => {
                result = Err(e);
                None
            }
        });
        result
    }

    pub fn set_by_name(&self, name: &str, value: impl Into<FieldValue>) -> Result<(), StoreError> {
        self.set(name.parse()?, value)
    }

    pub fn set_json(&self, name: &str, value: &Value) -> Result<(), StoreError> {
        let field: ProfileField = name.parse()?;
        self.set(field, field_value_mapper::from_json(field, value)?)
    }

    /// Replaces all ten fields at once.
    pub fn replace_all(&self, profile: Profile) {
        log::debug!("Replacing profile, login: {}", profile.login);
        self.cell.replace(ProfileState { profile }, MutationKind::Replace);
    }

    /// Writes only the fields present in `patch`, in one step.
    pub fn patch(&self, patch: ProfilePatch) -> Vec<ProfileField> {
        let mut changed = Vec::new();
        self.cell.modify(|state| {
            changed = state.profile.apply(patch);
            (!changed.is_empty()).then(|| MutationKind::patch(&changed))
        });
        changed
    }

    /// Mutates the record in place under the store lock.
    ///
    /// `f` must not call back into this store: the lock is not reentrant and
    /// any read or write from inside `f` deadlocks.
    pub fn update<R>(&self, f: impl FnOnce(&mut Profile) -> R) -> R {
        let mut out = None;
        self.cell.modify(|state| {
            let before = state.profile.clone();
            out = Some(f(&mut state.profile));
            let changed = before.diff(&state.profile);
            (!changed.is_empty()).then(|| MutationKind::patch(&changed))
        });
        match out {
            Some(out) => out,
            None => unreachable!("modify runs its closure exactly once"),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ProfileState> {
        self.cell.subscribe()
    }

    pub fn mutations(&self) -> broadcast::Receiver<Mutation> {
        self.cell.mutations()
    }
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for ProfileStore {
    const ID: &'static str = "profile";

    type State = ProfileState;

    fn create() -> Self {
        Self::new()
    }

    fn state(&self) -> ProfileState {
        self.cell.snapshot()
    }

    fn replace_state(&self, state: ProfileState) {
        self.cell.replace(state, MutationKind::Replace);
    }

    fn reset(&self) {
        self.cell.replace(ProfileState::default(), MutationKind::Reset);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::field::FieldKind;

    #[test]
    fn test_octocat_scenario() {
        let store = ProfileStore::new();
        store.set(ProfileField::Login, "octocat").unwrap();
        store.set(ProfileField::Id, 583231_i64).unwrap();

        assert_eq!(store.get(ProfileField::Login), FieldValue::Text("octocat".into()));
        assert_eq!(store.get(ProfileField::Id), FieldValue::Integer(583231));
        let expected = Profile {
            login: "octocat".into(),
            id: 583231,
            ..Profile::default()
        };
        assert_eq!(store.profile(), expected);
    }

    #[test]
    fn test_set_by_name() {
        let store = ProfileStore::new();
        store.set_by_name("bio", "There once was...").unwrap();
        assert_eq!(store.get_by_name("bio").unwrap().as_str(), Some("There once was..."));

        let err = store.set_by_name("location", "San Francisco").unwrap_err();
        assert!(matches!(err, StoreError::UnknownField(_)));
    }

    #[test]
    fn test_mismatched_set_is_rejected_silently_for_observers() {
        let store = ProfileStore::new();
        let mut events = store.mutations();
        let err = store.set(ProfileField::Following, "many").unwrap_err();
        assert!(matches!(err, StoreError::TypeMismatch { expected: FieldKind::Integer, .. }));
        assert_eq!(store.profile(), Profile::default());
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_set_json() {
        let store = ProfileStore::new();
        store.set_json("followers", &json!(20)).unwrap();
        store.set_json("html_url", &json!("https://github.com/octocat")).unwrap();
        assert_eq!(store.get(ProfileField::Followers).as_i64(), Some(20));
        assert!(store.set_json("followers", &json!(null)).is_err());
    }

    #[test]
    fn test_patch_reports_changed_fields() {
        let store = ProfileStore::new();
        let mut events = store.mutations();
        let changed = store.patch(ProfilePatch {
            name: Some("The Octocat".into()),
            followers: Some(20),
            ..ProfilePatch::default()
        });
        assert_eq!(changed, vec![ProfileField::Name, ProfileField::Followers]);
        assert_eq!(
            events.try_recv().unwrap().kind,
            MutationKind::Patch { fields: vec!["name", "followers"] }
        );
        assert_eq!(store.profile().login, "");
    }

    #[test]
    fn test_update_in_place() {
        let store = ProfileStore::new();
        let mut events = store.mutations();
        let followers = store.update(|profile| {
            profile.followers += 1;
            profile.following += 2;
            profile.followers
        });
        assert_eq!(followers, 1);
        assert_eq!(
            events.try_recv().unwrap().kind,
            MutationKind::Patch { fields: vec!["followers", "following"] }
        );
    }

    #[test]
    fn test_reset() {
        let store = ProfileStore::new();
        store.set(ProfileField::Bio, "hi").unwrap();
        store.reset();
        assert_eq!(store.profile(), Profile::default());
    }

    #[test]
    fn test_whole_record_writes_without_change_are_silent() {
        let store = ProfileStore::new();
        let rx = store.subscribe();
        let mut events = store.mutations();

        store.reset();
        store.replace_all(Profile::default());
        store.replace_state(ProfileState::default());
        assert!(!rx.has_changed().unwrap());
        assert!(events.try_recv().is_err());

        store.replace_all(Profile { login: "octocat".into(), ..Profile::default() });
        assert!(rx.has_changed().unwrap());
        assert_eq!(events.try_recv().unwrap().kind, MutationKind::Replace);
    }
}
