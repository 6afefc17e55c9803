use anyhow::{anyhow, Result};

use super::DatabaseSettings;

pub fn validate_database_settings(settings: &DatabaseSettings) -> Result<()> {
    let required = [
        ("DB_USER", &settings.user),
        ("DB_PASSWORD", &settings.password),
        ("DB_NAME", &settings.name),
    ];

    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(var, _)| *var)
        .collect();

    if !missing.is_empty() {
        return Err(anyhow!(
            "Required environment variable(s) not set: {} (or pass a connection string as the first argument)",
            missing.join(", ")
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> DatabaseSettings {
        DatabaseSettings {
            user: "postgres".to_string(),
            password: "secret".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            name: "games".to_string(),
        }
    }

    #[test]
    fn accepts_complete_settings() {
        assert!(validate_database_settings(&complete()).is_ok());
    }

    #[test]
    fn names_every_missing_variable() {
        let settings = DatabaseSettings {
            user: String::new(),
            name: "  ".to_string(),
            ..complete()
        };
        let message = validate_database_settings(&settings).unwrap_err().to_string();
        assert!(message.contains("DB_USER"));
        assert!(message.contains("DB_NAME"));
        assert!(!message.contains("DB_PASSWORD"));
    }
}
