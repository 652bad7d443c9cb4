//! Application-wide constants.

/// The display name of the application.
pub const APP_NAME: &str = "OdontoChart";

/// The binary name of the terminal editor (used in command examples).
pub const APP_BINARY_NAME: &str = "odontochart";
