//! Player preference model
//!
//! Preferences are a mapping from a fixed, closed set of keys to arbitrary
//! scalar or structured values. The whitelist is the validation boundary:
//! a key outside it fails the whole update, never a partial merge.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// The closed set of preference keys the service accepts
pub const VALID_PREFERENCE_KEYS: [&str; 6] = [
    "notifications",
    "sounds",
    "music",
    "default_game",
    "num_of_players",
    "language",
];

/// The subset of the whitelist relevant to game setup
pub const GAME_PREFERENCE_KEYS: [&str; 3] = ["default_game", "num_of_players", "language"];

/// A single preference value
///
/// Values are dynamic: a preference may hold a boolean toggle, a number,
/// a string, or a nested structure. The sum type keeps serde round-trips
/// lossless while the key whitelist stays the only validation surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<PreferenceValue>),
    Map(BTreeMap<String, PreferenceValue>),
}

impl From<bool> for PreferenceValue {
    fn from(value: bool) -> Self {
        PreferenceValue::Bool(value)
    }
}

impl From<i64> for PreferenceValue {
    fn from(value: i64) -> Self {
        PreferenceValue::Int(value)
    }
}

impl From<&str> for PreferenceValue {
    fn from(value: &str) -> Self {
        PreferenceValue::Text(value.to_string())
    }
}

impl From<String> for PreferenceValue {
    fn from(value: String) -> Self {
        PreferenceValue::Text(value)
    }
}

/// A player's stored preference mapping
///
/// Invariant: every persisted key belongs to [`VALID_PREFERENCE_KEYS`].
/// The newtype keeps merge and filtering semantics next to the data so
/// callers cannot bypass the whitelist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences(BTreeMap<String, PreferenceValue>);

impl Preferences {
    /// Creates an empty preference mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// The default preferences assigned to a newly created profile
    pub fn defaults() -> Self {
        let mut preferences = BTreeMap::new();
        preferences.insert("notifications".to_string(), PreferenceValue::Bool(true));
        preferences.insert("sounds".to_string(), PreferenceValue::Bool(true));
        preferences.insert("music".to_string(), PreferenceValue::Bool(true));
        preferences.insert(
            "default_game".to_string(),
            PreferenceValue::Text("regular".to_string()),
        );
        Self(preferences)
    }

    /// Returns true if the given key is in the whitelist
    pub fn is_valid_key(key: &str) -> bool {
        VALID_PREFERENCE_KEYS.contains(&key)
    }

    /// Returns the stored value for a key, if present
    pub fn get(&self, key: &str) -> Option<&PreferenceValue> {
        self.0.get(key)
    }

    /// Returns true when no preferences are stored
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of stored preferences
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Borrows the underlying mapping
    pub fn as_map(&self) -> &BTreeMap<String, PreferenceValue> {
        &self.0
    }

    /// Consumes the wrapper and returns the underlying mapping
    pub fn into_map(self) -> BTreeMap<String, PreferenceValue> {
        self.0
    }

    /// Merges an incoming mapping into these preferences
    ///
    /// The merge is a pure union-with-override: existing keys mentioned in
    /// `incoming` are overwritten, new valid keys are added, keys not
    /// mentioned are preserved. The whole update is validated before any
    /// key is applied, so a rejected update leaves the stored mapping
    /// completely unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::InvalidPreference` if `incoming` is empty or
    /// contains any key outside the whitelist.
    pub fn merged_with(
        &self,
        incoming: &BTreeMap<String, PreferenceValue>,
    ) -> Result<Preferences, ProfileError> {
        if incoming.is_empty() {
            return Err(ProfileError::InvalidPreference(
                "Preferences cannot be empty".to_string(),
            ));
        }

        for key in incoming.keys() {
            if !Self::is_valid_key(key) {
                return Err(ProfileError::invalid_key(key));
            }
        }

        let mut merged = self.0.clone();
        for (key, value) in incoming {
            merged.insert(key.clone(), value.clone());
        }
        Ok(Preferences(merged))
    }

    /// Returns the subset of stored preferences whose keys are game keys
    pub fn game_preferences(&self) -> Preferences {
        let filtered = self
            .0
            .iter()
            .filter(|(key, _)| GAME_PREFERENCE_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Preferences(filtered)
    }
}

impl FromIterator<(String, PreferenceValue)> for Preferences {
    fn from_iter<I: IntoIterator<Item = (String, PreferenceValue)>>(iter: I) -> Self {
        Preferences(iter.into_iter().collect())
    }
}
