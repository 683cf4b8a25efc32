use std::path::PathBuf;

/// Errors surfaced by the file entry point, destination resolution, client
/// construction, and the Notion API boundary.
///
/// Parsing itself is total and never produces one of these: every input
/// string yields a (possibly empty) block sequence.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input file path does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// No target was supplied, or the supplied reference was empty.
    #[error("either a parent URL, a database id, or a parent page id must be provided")]
    InvalidDestination,

    /// The destination URL matched none of the known Notion URL patterns.
    #[error("invalid Notion URL format: {url}")]
    InvalidUrl { url: String },

    /// No API token was available when constructing the client.
    #[error("NOTION_TOKEN is required; set it as an environment variable or pass it explicitly")]
    MissingCredential,

    /// Opaque pass-through of a transport or provider failure. Not
    /// interpreted or classified further, and never retried here.
    #[error("Notion API request failed: {message}")]
    RemoteOperationFailed { message: String },
}
