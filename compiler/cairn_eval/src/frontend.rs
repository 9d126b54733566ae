//! Loading build files.
//!
//! `subdir()` and `subproject()` need the tree of another build file. The
//! evaluator asks its [`Frontend`] for it; parsing itself lives elsewhere.

use std::path::{Path, PathBuf};

use cairn_ir::{Ast, Source};
use rustc_hash::FxHashMap;

/// A loaded build file.
#[derive(Clone, Debug)]
pub struct Loaded {
    pub source: Source,
    pub ast: Ast,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Produces syntax trees for build files.
pub trait Frontend {
    fn load(&mut self, path: &Path) -> Result<Loaded, LoadError>;
}

/// Frontend serving pre-built trees from memory.
#[derive(Default)]
pub struct MemoryFrontend {
    files: FxHashMap<PathBuf, Loaded>,
}

impl MemoryFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `ast` as the contents of `path`.
    pub fn add(&mut self, path: impl Into<PathBuf>, text: &str, ast: Ast) -> &mut Self {
        let path = path.into();
        let source = Source::new(path.display().to_string(), text);
        self.files.insert(path, Loaded { source, ast });
        self
    }

    #[must_use]
    pub fn with(mut self, path: impl Into<PathBuf>, text: &str, ast: Ast) -> Self {
        self.add(path, text, ast);
        self
    }
}

impl Frontend for MemoryFrontend {
    fn load(&mut self, path: &Path) -> Result<Loaded, LoadError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(path.to_path_buf()))
    }
}
