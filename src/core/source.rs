use anyhow::{Context, Result, bail};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Trait defining the file operations required by the engine.
/// This abstraction lets the traversal and the rewrite logic be tested
/// against an in-memory tree instead of the real filesystem.
pub trait SourceTree {
    /// Lists the regular files below `root`, depth-first, sorted by name
    /// within each directory. Directories for which `prune` returns `true`
    /// are not descended into.
    fn list_files(&self, root: &Path, prune: &dyn Fn(&str) -> bool) -> Result<Vec<PathBuf>>;

    /// Reads a whole file as text. Invalid UTF-8 sequences are dropped.
    fn read_file(&self, path: &Path) -> Result<String>;

    /// Replaces the content of a file.
    fn write_file(&mut self, path: &Path, content: &str) -> Result<()>;
}

/// Decodes bytes as UTF-8, discarding every invalid sequence instead of
/// failing or substituting a replacement character.
pub fn decode_utf8_dropping_invalid(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// The real filesystem.
pub struct DiskTree;

impl DiskTree {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DiskTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceTree for DiskTree {
    fn list_files(&self, root: &Path, prune: &dyn Fn(&str) -> bool) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            bail!("Root directory does not exist: {}", root.display());
        }
        if !root.is_dir() {
            bail!("Root is not a directory: {}", root.display());
        }

        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !(e.file_type().is_dir() && prune(&*e.file_name().to_string_lossy())));

        let mut files = Vec::new();
        for entry in walker {
            match entry {
                // `Path::is_file` follows symlinks, so a link to a regular
                // file is processed like the file itself.
                Ok(entry) if entry.path().is_file() => files.push(entry.into_path()),
                Ok(_) => {}
                Err(e) => {
                    // Log but don't fail on unreadable subdirectories
                    tracing::warn!("Error accessing path: {e}");
                }
            }
        }

        Ok(files)
    }

    fn read_file(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(decode_utf8_dropping_invalid(&bytes))
    }

    fn write_file(&mut self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// An in-memory tree of files keyed by path. Records every read and write so
/// tests can assert which files were touched.
#[derive(Debug, Default)]
pub struct MemoryTree {
    files: BTreeMap<PathBuf, Vec<u8>>,
    reads: RefCell<Vec<PathBuf>>,
    writes: Vec<PathBuf>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    pub fn content(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads.borrow().clone()
    }

    pub fn writes(&self) -> &[PathBuf] {
        &self.writes
    }
}

impl SourceTree for MemoryTree {
    fn list_files(&self, root: &Path, prune: &dyn Fn(&str) -> bool) -> Result<Vec<PathBuf>> {
        let files = self
            .files
            .keys()
            .filter(|path| {
                let Ok(relative) = path.strip_prefix(root) else {
                    return false;
                };
                // Every component but the last is a directory.
                match relative.parent() {
                    Some(dirs) => !dirs.iter().any(|dir| prune(&*dir.to_string_lossy())),
                    None => false,
                }
            })
            .cloned()
            .collect();
        Ok(files)
    }

    fn read_file(&self, path: &Path) -> Result<String> {
        self.reads.borrow_mut().push(path.to_path_buf());
        match self.files.get(path) {
            Some(bytes) => Ok(decode_utf8_dropping_invalid(bytes)),
            None => bail!("Failed to read {}: no such file", path.display()),
        }
    }

    fn write_file(&mut self, path: &Path, content: &str) -> Result<()> {
        self.writes.push(path.to_path_buf());
        self.files.insert(path.to_path_buf(), content.as_bytes().to_vec());
        Ok(())
    }
}
