//! Shared, named state for the profile card front end: the selected author
//! key and the GitHub profile being displayed.

pub mod errors;
pub mod mappers;
pub mod models;
pub mod registry;
pub mod stores;

pub use errors::StoreError;
pub use models::field::{FieldKind, FieldValue, ProfileField};
pub use models::profile::{Profile, ProfilePatch};
pub use registry::{use_author_key_store, use_profile_store, StoreEntry, StoreRegistry};
pub use stores::author_key_store::{AuthorKeyState, AuthorKeyStore};
pub use stores::mutation::{Mutation, MutationKind};
pub use stores::profile_store::{ProfileState, ProfileStore};
pub use stores::Store;
