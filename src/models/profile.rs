use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::models::field::{FieldKind, FieldValue, ProfileField};


/// A GitHub user profile as held by the profile store.
///
/// Every field is always present. Missing fields in a JSON document fall back
/// to their defaults when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub login: String,
    pub id: i64,
    pub avatar_url: String,
    pub html_url: String,
    pub name: String,
    pub bio: String,
    pub followers: i64,
    pub following: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl Profile {
    pub fn get(&self, field: ProfileField) -> FieldValue {
        match field {
            ProfileField::Id => FieldValue::Integer(self.id),
            ProfileField::Followers => FieldValue::Integer(self.followers),
            ProfileField::Following => FieldValue::Integer(self.following),
            ProfileField::Login => FieldValue::Text(self.login.clone()),
            ProfileField::AvatarUrl => FieldValue::Text(self.avatar_url.clone()),
            ProfileField::HtmlUrl => FieldValue::Text(self.html_url.clone()),
            ProfileField::Name => FieldValue::Text(self.name.clone()),
            ProfileField::Bio => FieldValue::Text(self.bio.clone()),
            ProfileField::CreatedAt => FieldValue::Text(self.created_at.clone()),
            ProfileField::UpdatedAt => FieldValue::Text(self.updated_at.clone()),
        }
    }

    /// Writes `value` into `field`, returning whether the stored value changed.
    ///
    /// The record is left untouched when the value kind does not match.
    pub fn set(&mut self, field: ProfileField, value: FieldValue) -> Result<bool, StoreError> {
        match value {
            FieldValue::Text(value) => {
                let slot = self.text_mut(field).ok_or(StoreError::TypeMismatch {
                    field: field.name(),
                    expected: FieldKind::Integer,
                    found: FieldKind::Text,
                })?;
                if *slot == value {
                    return Ok(false);
                }
                *slot = value;
            }
            FieldValue::Integer(value) => {
                let slot = self.integer_mut(field).ok_or(StoreError::TypeMismatch {
                    field: field.name(),
                    expected: FieldKind::Text,
                    found: FieldKind::Integer,
                })?;
                if *slot == value {
                    return Ok(false);
                }
                *slot = value;
            }
        }
        Ok(true)
    }

    /// Applies every present field of `patch`, returning the fields that changed.
    pub fn apply(&mut self, patch: ProfilePatch) -> Vec<ProfileField> {
        let before = self.clone();
        let ProfilePatch {
            login,
            id,
            avatar_url,
            html_url,
            name,
            bio,
            followers,
            following,
            created_at,
            updated_at,
        } = patch;

        if let Some(v) = login {
            self.login = v;
        }
        if let Some(v) = id {
            self.id = v;
        }
        if let Some(v) = avatar_url {
            self.avatar_url = v;
        }
        if let Some(v) = html_url {
            self.html_url = v;
        }
        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = bio {
            self.bio = v;
        }
        if let Some(v) = followers {
            self.followers = v;
        }
        if let Some(v) = following {
            self.following = v;
        }
        if let Some(v) = created_at {
            self.created_at = v;
        }
        if let Some(v) = updated_at {
            self.updated_at = v;
        }

        before.diff(self)
    }

    /// Fields whose values differ between `self` and `other`, in declaration order.
    pub fn diff(&self, other: &Profile) -> Vec<ProfileField> {
        ProfileField::ALL
            .into_iter()
            .filter(|field| self.get(*field) != other.get(*field))
            .collect()
    }

    fn text_mut(&mut self, field: ProfileField) -> Option<&mut String> {
        match field {
            ProfileField::Login => Some(&mut self.login),
            ProfileField::AvatarUrl => Some(&mut self.avatar_url),
            ProfileField::HtmlUrl => Some(&mut self.html_url),
            ProfileField::Name => Some(&mut self.name),
            ProfileField::Bio => Some(&mut self.bio),
            ProfileField::CreatedAt => Some(&mut self.created_at),
            ProfileField::UpdatedAt => Some(&mut self.updated_at),
            ProfileField::Id | ProfileField::Followers | ProfileField::Following => None,
        }
    }

    fn integer_mut(&mut self, field: ProfileField) -> Option<&mut i64> {
        match field {
            ProfileField::Id => Some(&mut self.id),
            ProfileField::Followers => Some(&mut self.followers),
            ProfileField::Following => Some(&mut self.following),
            _ => None,
        }
    }
}

/// A partial profile. Absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_empty() {
        let profile = Profile::default();
        for field in ProfileField::ALL {
            let expected = match field.kind() {
                FieldKind::Text => FieldValue::Text(String::new()),
                FieldKind::Integer => FieldValue::Integer(0),
            };
            assert_eq!(profile.get(field), expected, "{field}");
        }
    }

    #[test]
    fn test_set_reports_change() {
        let mut profile = Profile::default();
        assert!(profile.set(ProfileField::Login, "octocat".into()).unwrap());
        assert!(!profile.set(ProfileField::Login, "octocat".into()).unwrap());
        assert_eq!(profile.login, "octocat");
    }

    #[test]
    fn test_set_wrong_kind_leaves_record() {
        let mut profile = Profile::default();
        let err = profile.set(ProfileField::Followers, "lots".into()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::TypeMismatch { field: "followers", expected: FieldKind::Integer, found: FieldKind::Text }
        ));
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn test_negative_counts_accepted() {
        let mut profile = Profile::default();
        profile.set(ProfileField::Followers, FieldValue::Integer(-3)).unwrap();
        assert_eq!(profile.followers, -3);
    }

    #[test]
    fn test_apply_patch_returns_changed_fields() {
        let mut profile = Profile { login: "octocat".into(), ..Profile::default() };
        let changed = profile.apply(ProfilePatch {
            login: Some("octocat".into()),
            bio: Some("hi".into()),
            id: Some(583231),
            ..ProfilePatch::default()
        });
        assert_eq!(changed, vec![ProfileField::Id, ProfileField::Bio]);
        assert_eq!(profile.bio, "hi");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let profile: Profile = serde_json::from_str(r#"{"login":"octocat","followers":12}"#).unwrap();
        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.followers, 12);
        assert_eq!(profile.html_url, "");
        assert_eq!(profile.id, 0);
    }
}
