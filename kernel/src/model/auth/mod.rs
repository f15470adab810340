pub mod event;

/// Opaque bearer credential handed to clients at login and resolved back to a
/// user id through the key-value store.
pub struct AccessToken(pub String);
