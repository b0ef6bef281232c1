use serde::{Deserialize, Serialize};
use tourease_storage::KeyValueStore;
use tracing::debug;

/// Storage key written by the signup flow
pub const USER_KEY: &str = "user";

/// Who just signed up, as far as this device remembers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Read the stored profile; anything unreadable is just "no profile"
pub fn load_profile<S: KeyValueStore + ?Sized>(storage: &S) -> Option<UserProfile> {
    let raw = storage.read(USER_KEY).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(profile) => Some(profile),
        Err(e) => {
            debug!("Ignoring malformed user profile: {}", e);
            None
        }
    }
}

/// "Welcome Jane!" or, failing that, "Welcome Traveler!"
pub fn welcome_message<S: KeyValueStore + ?Sized>(storage: &S) -> String {
    let name = load_profile(storage)
        .and_then(|p| p.name)
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Traveler".to_string());
    format!("Welcome {}!", name)
}
