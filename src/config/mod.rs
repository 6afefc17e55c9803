mod settings;
mod validation;

pub use settings::{redact, resolve_connection_string, DatabaseSettings};
pub use validation::validate_database_settings;
