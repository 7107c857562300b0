use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

/// One field of a partial update.
///
/// Deserialize with `#[serde(default)]`: an absent key stays `Unchanged`,
/// `null` or an empty string becomes `Clear`, anything else is `Set`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    #[default]
    Unchanged,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    /// The new value, if one was supplied
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Apply to a nullable column value
    pub fn apply_to(self, target: &mut Option<T>) {
        match self {
            Patch::Unchanged => {}
            Patch::Clear => *target = None,
            Patch::Set(value) => *target = Some(value),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Null => Ok(Patch::Clear),
            Value::String(ref s) if s.is_empty() => Ok(Patch::Clear),
            other => serde_json::from_value(other)
                .map(Patch::Set)
                .map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[derive(Debug, Deserialize)]
    struct Update {
        #[serde(default)]
        name: Patch<String>,
        #[serde(default)]
        voice_id: Patch<Uuid>,
    }

    #[test]
    fn test_absent_is_unchanged() {
        let update: Update = serde_json::from_str("{}").unwrap();
        assert_eq!(update.name, Patch::Unchanged);
        assert_eq!(update.voice_id, Patch::Unchanged);
    }

    #[test]
    fn test_null_and_empty_string_clear() {
        let update: Update = serde_json::from_str(r#"{"name": null, "voice_id": ""}"#).unwrap();
        assert_eq!(update.name, Patch::Clear);
        assert_eq!(update.voice_id, Patch::Clear);
    }

    #[test]
    fn test_value_is_set() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"name": "After", "voice_id": "{}"}}"#, id);
        let update: Update = serde_json::from_str(&json).unwrap();
        assert_eq!(update.name, Patch::Set("After".to_string()));
        assert_eq!(update.voice_id, Patch::Set(id));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let result = serde_json::from_str::<Update>(r#"{"voice_id": "not-a-uuid"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_to() {
        let mut target = Some("old".to_string());
        Patch::Unchanged.apply_to(&mut target);
        assert_eq!(target.as_deref(), Some("old"));

        Patch::Set("new".to_string()).apply_to(&mut target);
        assert_eq!(target.as_deref(), Some("new"));

        Patch::Clear.apply_to(&mut target);
        assert!(target.is_none());
    }
}
