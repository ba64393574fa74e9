use thiserror::Error;

pub type Result<T> = std::result::Result<T, AutofillError>;

#[derive(Debug, Error)]
pub enum AutofillError {
    /// Host page unreachable or the extraction call was rejected
    #[error("Field extraction failed: {0}")]
    Extraction(String),

    /// The fill call was rejected by the host page
    #[error("Value injection failed: {0}")]
    Injection(String),

    /// Malformed mapping entry supplied by the user
    #[error("Invalid mapping: {0}")]
    Validation(String),

    /// Node.js helper failed to spawn
    #[error("Failed to spawn {script} (is Node.js installed?): {source}")]
    SubprocessSpawn {
        script: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading from or writing to the helper process failed
    #[error("Browser session I/O: {0}")]
    SessionIo(String),

    /// Helper answered with ok=false or an unexpected payload
    #[error("Browser command '{command}' failed: {error}")]
    SessionProtocol { command: String, error: String },

    #[error("JSON parse error ({context}): {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialize error ({context}): {source}")]
    JsonSerialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Mapping file could not be read or written
    #[error("Mapping store error at {path}: {source}")]
    Store {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No scan results available; scan the page first")]
    NoScan,

    #[error("Fill plan was built from a different scan than the current one")]
    StalePlan,
}
