use std::collections::BTreeMap;

use crate::error::ContentError;

/// Path of the localization table, relative to the viewer page.
pub const LOCALIZATIONS_PATH: &str = "Scripts/localizations.json";

/// Flat key → display string table (`item.minecraft.stone` → `Stone`).
///
/// A disabled table answers every lookup with the caller's fallback. Failing
/// to fetch or parse the table disables it for the session; nothing retries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Localizations {
    table: Option<BTreeMap<String, String>>,
}

impl Localizations {
    pub fn disabled() -> Self {
        Self { table: None }
    }

    pub fn from_map(table: BTreeMap<String, String>) -> Self {
        Self { table: Some(table) }
    }

    pub fn from_json_str(payload: &str) -> Result<Self, ContentError> {
        serde_json::from_str(payload)
            .map(Self::from_map)
            .map_err(ContentError::parse("localizations"))
    }

    /// Parses `payload`, or logs and returns a disabled table.
    pub fn from_json_or_disabled(payload: &str) -> Self {
        match Self::from_json_str(payload) {
            Ok(l) => l,
            Err(err) => {
                tracing::warn!(%err, "localizations unavailable; showing raw ids");
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.table.is_some()
    }

    /// Non-empty entry for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.table
            .as_ref()?
            .get(key)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn localize<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    pub fn localize_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.get(key).unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::Localizations;

    #[test]
    fn lookups_fall_back() {
        let l = Localizations::from_json_str(
            r#"{"item.minecraft.stone": "Stone", "item.minecraft.air": ""}"#,
        )
        .unwrap();
        assert!(l.is_enabled());
        assert_eq!(l.localize("item.minecraft.stone"), "Stone");
        assert_eq!(l.localize("item.minecraft.dirt"), "item.minecraft.dirt");
        assert_eq!(l.localize_or("item.minecraft.air", "air"), "air");
        assert_eq!(l.get("item.minecraft.air"), None);
    }

    #[test]
    fn malformed_table_disables_lookups() {
        let l = Localizations::from_json_or_disabled("<html>404</html>");
        assert!(!l.is_enabled());
        assert_eq!(l.localize_or("item.minecraft.stone", "stone"), "stone");
    }
}
