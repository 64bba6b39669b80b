//! Host-boundary artifact writer.
//!
//! The engine only produces in-memory artifacts; writing them out is the
//! host's concern and the single place the crate touches the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::GeneratorError;
use crate::types::GeneratedFile;

/// Write every artifact under `dir`, replacing files from earlier runs.
/// Returns the written paths in artifact order.
pub fn write_artifacts(dir: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>, GeneratorError> {
    fs::create_dir_all(dir).map_err(|source| GeneratorError::WriteArtifact {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = dir.join(&file.file_name);
        fs::write(&path, &file.contents).map_err(|source| GeneratorError::WriteArtifact {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }

    info!(count = written.len(), dir = %dir.display(), "wrote artifacts");
    Ok(written)
}
