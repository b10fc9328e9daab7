use std::path::Path;

use crate::collection::CollectionError;

/// "mkdir -p path" - makes all directories along a path
pub fn create_dirs<P>(path: P) -> Result<(), CollectionError>
where
    P: AsRef<Path>,
{
    let dirspath = path.as_ref();
    if dirspath.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dirspath).map_err(|e| {
        CollectionError::InvalidUserInput(format!(
            "error building output directory '{}': {e}",
            dirspath.display()
        ))
    })
}
