use std::fmt;
use std::str::FromStr;

use crate::errors::StoreError;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => f.write_str("text"),
            FieldKind::Integer => f.write_str("integer"),
        }
    }
}

/// One of the ten slots of a [`Profile`](super::profile::Profile).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Login,
    Id,
    AvatarUrl,
    HtmlUrl,
    Name,
    Bio,
    Followers,
    Following,
    CreatedAt,
    UpdatedAt,
}

impl ProfileField {
    pub const ALL: [ProfileField; 10] = [
        ProfileField::Login,
        ProfileField::Id,
        ProfileField::AvatarUrl,
        ProfileField::HtmlUrl,
        ProfileField::Name,
        ProfileField::Bio,
        ProfileField::Followers,
        ProfileField::Following,
        ProfileField::CreatedAt,
        ProfileField::UpdatedAt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ProfileField::Login => "login",
            ProfileField::Id => "id",
            ProfileField::AvatarUrl => "avatar_url",
            ProfileField::HtmlUrl => "html_url",
            ProfileField::Name => "name",
            ProfileField::Bio => "bio",
            ProfileField::Followers => "followers",
            ProfileField::Following => "following",
            ProfileField::CreatedAt => "created_at",
            ProfileField::UpdatedAt => "updated_at",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            ProfileField::Id | ProfileField::Followers | ProfileField::Following => FieldKind::Integer,
            _ => FieldKind::Text,
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProfileField {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| StoreError::UnknownField(s.to_string()))
    }
}

/// A value held by a profile field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Integer(_) => FieldKind::Integer,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            FieldValue::Integer(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(value) => Some(*value),
            FieldValue::Text(_) => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}
