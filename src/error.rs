use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the parser and the corpus builder.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The file is not well-formed XML. The builder recovers from this by
    /// skipping the file without consuming a file id.
    #[error("failed to parse {}: {reason}", path.display())]
    MalformedDocument { path: PathBuf, reason: String },

    /// The file could not be read at all. Recovered like a malformed file.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The build root does not exist or is not a directory. Fatal for the
    /// whole build call; no partial result is meaningful.
    #[error("corpus root is not a directory: {}", .0.display())]
    DirectoryNotFound(PathBuf),
}
