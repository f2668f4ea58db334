//! Per-path write locks.
//!
//! Planned paths are disjoint, but extension correction can steer two URLs onto
//! the same file. Writers of one path take turns: each holds the path while it
//! checks for the file and writes it, so a later writer sees the earlier file
//! (and reuses it) or, if the earlier writer failed, writes its own body.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct PathClaims {
    held: Mutex<HashSet<PathBuf>>,
    released: Condvar,
}

/// Exclusive hold on one output path; released on drop.
#[derive(Debug)]
pub struct ClaimGuard<'a> {
    claims: &'a PathClaims,
    path: PathBuf,
}

impl PathClaims {
    fn lock(&self) -> MutexGuard<'_, HashSet<PathBuf>> {
        self.held.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Blocks until no other writer holds `path`, then holds it.
    pub fn hold(&self, path: &Path) -> ClaimGuard<'_> {
        let mut held = self.lock();
        while held.contains(path) {
            held = self
                .released
                .wait(held)
                .unwrap_or_else(PoisonError::into_inner);
        }
        held.insert(path.to_path_buf());
        ClaimGuard {
            claims: self,
            path: path.to_path_buf(),
        }
    }

    pub fn is_held(&self, path: &Path) -> bool {
        self.lock().contains(path)
    }
}

impl Drop for ClaimGuard<'_> {
    fn drop(&mut self) {
        self.claims.lock().remove(&self.path);
        self.claims.released.notify_all();
    }
}
