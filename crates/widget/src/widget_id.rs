use std::fmt;

/// Runtime identifier for a placed widget.
///
/// Ids are assigned when a widget is created or loaded and are never
/// persisted; the stored canvas is identified by position only.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(uuid::Uuid);

impl WidgetId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Create a WidgetId from a u128 (useful for tests).
    pub fn from_u128(value: u128) -> Self {
        Self(uuid::Uuid::from_u128(value))
    }

    /// Get the full UUID string.
    pub fn to_uuid_string(&self) -> String {
        self.0.to_string()
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WidgetId({})", &self.0.to_string()[..8])
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

impl serde::Serialize for WidgetId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for WidgetId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        uuid::Uuid::parse_str(&s)
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_short_form() {
        let id = WidgetId::from_u128(0x1234_5678_0000_0000_0000_0000_0000_0000);
        assert_eq!(id.to_string(), "12345678");
        assert_eq!(format!("{:?}", id), "WidgetId(12345678)");
    }

    #[test]
    fn new_ids_are_distinct() {
        assert_ne!(WidgetId::new(), WidgetId::new());
    }

    #[test]
    fn serializes_as_full_uuid_string() {
        let id = WidgetId::from_u128(42);
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::json!(id.to_uuid_string()));
        let back: WidgetId = serde_json::from_value(json).unwrap();
        assert_eq!(back, id);
    }
}
