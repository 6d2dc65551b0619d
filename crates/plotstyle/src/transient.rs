//! The transient stylesheet file.
//!
//! File-based application writes the rendered style to a fixed path, asks
//! the runtime configuration to load it, and deletes it again. The file is
//! owned by a [`TransientStylesheet`] guard so it is removed on every exit
//! path: normal return, an error while loading, or a panic.
//!
//! The path is not randomized. Two processes applying styles against the
//! same scratch directory at the same time will race on it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Owns a stylesheet file on disk and deletes it when dropped.
#[derive(Debug)]
pub struct TransientStylesheet {
    path: PathBuf,
    armed: bool,
}

impl TransientStylesheet {
    /// Writes `contents` to `path`, replacing any stale file left there.
    pub fn create(path: impl Into<PathBuf>, contents: &str) -> io::Result<Self> {
        Self::create_with(path, |path| fs::write(path, contents))
    }

    /// Arms the guard before `write` runs, so a partly written file is
    /// removed when `write` fails.
    fn create_with<F>(path: impl Into<PathBuf>, write: F) -> io::Result<Self>
    where
        F: FnOnce(&Path) -> io::Result<()>,
    {
        let path = path.into();
        remove_if_present(&path)?;
        let file = Self { path, armed: true };
        write(&file.path)?;
        log::debug!("Wrote transient stylesheet {}", file.path.display());
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the file now, reporting any failure.
    pub fn close(mut self) -> io::Result<()> {
        self.armed = false;
        remove_if_present(&self.path)
    }
}

impl Drop for TransientStylesheet {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(err) = remove_if_present(&self.path) {
            log::warn!(
                "Failed to remove transient stylesheet {}: {}",
                self.path.display(),
                err
            );
        }
    }
}

/// Writes a transient stylesheet, runs `f` on its path, then deletes it.
///
/// The file is gone when this returns, whether `f` succeeded or not. On the
/// success path a failure to delete is returned as an error.
pub fn with_transient_stylesheet<T, E, F>(
    path: impl Into<PathBuf>,
    contents: &str,
    f: F,
) -> Result<T, E>
where
    F: FnOnce(&Path) -> Result<T, E>,
    E: From<io::Error>,
{
    let file = TransientStylesheet::create(path, contents)?;
    let value = f(file.path())?;
    file.close()?;
    Ok(value)
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
        _ => Ok(()),
    }
}
