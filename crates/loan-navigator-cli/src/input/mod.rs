pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;
use tracing::debug;

/// Resolve a command's structured input: an explicit file first, then piped
/// stdin. `None` means the caller should fall back to individual flags.
pub fn resolve<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        debug!(path, "reading input file");
        return file::read_document(path).map(Some);
    }
    if let Some(value) = stdin::read_stdin()? {
        debug!("read input from stdin");
        return Ok(Some(value));
    }
    debug!("no structured input; using flags");
    Ok(None)
}
