//! Output directory preparation.

use std::io;
use std::path::{Path, PathBuf};

/// The output directory cannot be used. Checked before any network activity.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("{} is a file. Cannot proceed.", .0.display())]
    NotADirectory(PathBuf),
    #[error("cannot create output directory {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Creates `output_dir` (and its parents) when absent. An existing
/// non-directory at that path is an error.
pub async fn prepare_output_dir(output_dir: &Path) -> Result<(), SetupError> {
    match tokio::fs::metadata(output_dir).await {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => return Err(SetupError::NotADirectory(output_dir.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(SetupError::Create {
                path: output_dir.to_path_buf(),
                source,
            })
        }
    }

    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|source| SetupError::Create {
            path: output_dir.to_path_buf(),
            source,
        })?;
    tracing::info!("created output directory {}", output_dir.display());
    Ok(())
}
