//! Capability-scoped reader for the admin flag file.
//!
//! The file lives at `public/flag.txt` relative to the working directory, so
//! the server is expected to run from the crate directory (`backend/`), where
//! the bundled `public/flag.txt` sits. Started elsewhere, `/flag` answers 500;
//! `main` warns at startup when the file is not reachable. The reader opens
//! `public/` as a `cap_std` directory and reads a constant file name from it,
//! so no client input ever reaches the filesystem path.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::error;

use crate::domain::Error;
use crate::domain::ports::{FlagDocument, FlagSource};

const FLAG_DIR: &str = "public";
const FLAG_FILE_NAME: &str = "flag.txt";

/// Reads the flag from its fixed location.
#[derive(Debug, Clone)]
pub struct CapFlagSource {
    root: PathBuf,
}

impl CapFlagSource {
    /// Reader for the fixed deployment location.
    #[must_use]
    pub fn fixed() -> Self {
        Self {
            root: PathBuf::from(FLAG_DIR),
        }
    }

    /// Reader for a `flag.txt` inside `root` instead of `public/`.
    #[must_use]
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the flag is read from, as configured (possibly relative).
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `flag.txt` can currently be found under the root.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        Dir::open_ambient_dir(&self.root, ambient_authority())
            .and_then(|dir| dir.metadata(FLAG_FILE_NAME))
            .is_ok_and(|meta| meta.is_file())
    }
}

impl Default for CapFlagSource {
    fn default() -> Self {
        Self::fixed()
    }
}

#[async_trait]
impl FlagSource for CapFlagSource {
    async fn fetch(&self) -> Result<FlagDocument, Error> {
        let root = self.root.clone();
        let read = tokio::task::spawn_blocking(move || {
            let dir = Dir::open_ambient_dir(&root, ambient_authority())?;
            dir.read(FLAG_FILE_NAME)
        })
        .await
        .map_err(|err| {
            error!(error = %err, "flag read task failed");
            Error::internal("flag read task failed")
        })?;

        match read {
            Ok(contents) => Ok(FlagDocument {
                file_name: FLAG_FILE_NAME,
                contents,
            }),
            Err(err) => {
                error!(
                    error = %err,
                    dir = %self.root.display(),
                    file = FLAG_FILE_NAME,
                    "flag resource unreadable"
                );
                Err(Error::internal("flag resource unreadable"))
            }
        }
    }
}
