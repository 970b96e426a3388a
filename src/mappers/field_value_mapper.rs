use serde_json::Value;

use crate::errors::StoreError;
use crate::models::field::{FieldKind, FieldValue, ProfileField};


// Map a JSON scalar onto the value kind `field` holds.
pub fn from_json(field: ProfileField, value: &Value) -> Result<FieldValue, StoreError> {
    match (field.kind(), value) {
        (FieldKind::Text, Value::String(s)) => Ok(FieldValue::Text(s.clone())),
        (FieldKind::Integer, Value::Number(n)) => match n.as_i64() {
            Some(n) => Ok(FieldValue::Integer(n)),
            None => Err(StoreError::InvalidValue {
                field: field.name(),
                value: n.to_string(),
            }),
        },
        (expected, other) => Err(StoreError::TypeMismatch {
            field: field.name(),
            expected,
            found: json_kind(other),
        }),
    }
}

// Map a command-line argument onto the value kind `field` holds.
pub fn from_arg(field: ProfileField, raw: &str) -> Result<FieldValue, StoreError> {
    match field.kind() {
        FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
        FieldKind::Integer => raw
            .trim()
            .parse::<i64>()
            .map(FieldValue::Integer)
            .map_err(|_| StoreError::InvalidValue {
                field: field.name(),
                value: raw.to_string(),
            }),
    }
}

pub fn to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Text(s) => Value::String(s.clone()),
        FieldValue::Integer(n) => Value::from(*n),
    }
}

fn json_kind(value: &Value) -> FieldKind {
    match value {
        Value::Number(_) => FieldKind::Integer,
        _ => FieldKind::Text,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_json_matching_kinds() {
        assert_eq!(from_json(ProfileField::Login, &json!("octocat")).unwrap(), FieldValue::Text("octocat".into()));
        assert_eq!(from_json(ProfileField::Id, &json!(583231)).unwrap(), FieldValue::Integer(583231));
    }

    #[test]
    fn test_from_json_rejects_wrong_kind() {
        let err = from_json(ProfileField::Id, &json!("583231")).unwrap_err();
        assert!(matches!(err, StoreError::TypeMismatch { field: "id", expected: FieldKind::Integer, .. }));

        let err = from_json(ProfileField::Bio, &json!(12)).unwrap_err();
        assert!(matches!(err, StoreError::TypeMismatch { field: "bio", found: FieldKind::Integer, .. }));
    }

    #[test]
    fn test_from_json_rejects_fractions() {
        let err = from_json(ProfileField::Followers, &json!(1.5)).unwrap_err();
        assert!(matches!(err, StoreError::InvalidValue { field: "followers", .. }));
    }

    #[test]
    fn test_from_arg() {
        assert_eq!(from_arg(ProfileField::Following, " -2 ").unwrap(), FieldValue::Integer(-2));
        assert_eq!(from_arg(ProfileField::CreatedAt, "yesterday").unwrap(), FieldValue::Text("yesterday".into()));
        assert!(matches!(
            from_arg(ProfileField::Id, "abc").unwrap_err(),
            StoreError::InvalidValue { field: "id", .. }
        ));
    }
}
