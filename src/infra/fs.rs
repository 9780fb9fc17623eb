//! Filesystem infrastructure — implements `LocalFs` and `FileHasher`.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use crate::application::ports::{FileHasher, LocalFs};

/// Production filesystem implementation.
pub struct StdFs;

impl LocalFs for StdFs {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading file {}", path.display()))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        std::fs::write(path, contents)
            .with_context(|| format!("writing file {}", path.display()))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("creating directory {}", path.display()))
    }

    fn make_tree_writable(&self, path: &Path) -> Result<()> {
        make_tree_writable(path)
    }
}

impl FileHasher for StdFs {
    fn sha256_file(&self, path: &Path) -> Result<String> {
        let file =
            std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let mut reader = std::io::BufReader::new(file);
        let mut hasher = Sha256::new();
        let mut buf = [0u8; 64 * 1024];
        loop {
            let n = reader
                .read(&mut buf)
                .with_context(|| format!("reading {}", path.display()))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(format!("{:x}", hasher.finalize()))
    }
}

fn make_tree_writable(path: &Path) -> Result<()> {
    let meta = std::fs::metadata(path)
        .with_context(|| format!("reading metadata of {}", path.display()))?;
    let mut perms = meta.permissions();
    if perms.readonly() {
        #[allow(clippy::permissions_set_readonly_false)]
        perms.set_readonly(false);
        std::fs::set_permissions(path, perms)
            .with_context(|| format!("making {} writable", path.display()))?;
    }
    if meta.is_dir() {
        for entry in std::fs::read_dir(path)
            .with_context(|| format!("listing directory {}", path.display()))?
        {
            let entry = entry.with_context(|| format!("listing directory {}", path.display()))?;
            make_tree_writable(&entry.path())?;
        }
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
