use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("Database error while {context}: {source}")]
    Statement {
        context: String,
        statement: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("No row in {table} with natural key {key:?}")]
    MissingReference { table: &'static str, key: String },
    #[error("Invalid dataset:\n  {}", .0.join("\n  "))]
    InvalidDataset(Vec<String>),
    #[error("Failed to load dataset: {0}")]
    Dataset(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CatalogError {
    pub fn statement(context: impl Into<String>, statement: impl Into<String>, source: sqlx::Error) -> Self {
        CatalogError::Statement {
            context: context.into(),
            statement: statement.into(),
            source,
        }
    }

    /// SQLSTATE reported by the server, e.g. `23505` for a unique violation.
    pub fn code(&self) -> Option<String> {
        let source = match self {
            CatalogError::Connect(e) => e,
            CatalogError::Statement { source, .. } => source,
            _ => return None,
        };
        source
            .as_database_error()
            .and_then(|db| db.code())
            .map(|code| code.into_owned())
    }

    pub fn failed_statement(&self) -> Option<&str> {
        match self {
            CatalogError::Statement { statement, .. } => Some(statement),
            _ => None,
        }
    }

    /// Emits a single structured error event for this failure.
    pub fn log(&self) {
        let code = self.code();
        let code = code.as_deref().unwrap_or("-");
        let statement = self.failed_statement().unwrap_or("-");
        match self {
            CatalogError::Config(_) => error!(error = %self, code, statement, "Configuration error"),
            CatalogError::InvalidDataset(_) | CatalogError::Dataset(_) => {
                error!(error = %self, code, statement, "Dataset error")
            }
            _ => error!(error = %self, code, statement, "Database error"),
        }
    }
}

/// Runs `f` with a subscriber that writes plain-text events into a buffer.
#[cfg(test)]
pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let buffer = Capture(Arc::new(Mutex::new(Vec::new())));
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let output = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, output)
}
