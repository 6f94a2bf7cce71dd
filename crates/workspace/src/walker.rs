use ignore::{DirEntry, WalkBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Knobs for [`FileWalker`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkOptions {
    /// Directory names that are never entered
    pub ignored_dirs: BTreeSet<String>,

    /// Lowercase extensions (without dot) counted as source files
    pub source_extensions: Vec<String>,

    /// Walk dot-files and dot-directories
    pub include_hidden: bool,

    /// Honor .gitignore / git exclude files inside git repositories
    pub respect_gitignore: bool,

    /// Files above this many bytes are not loaded
    pub max_file_size: u64,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            ignored_dirs: IGNORED_DIRS.iter().map(|d| (*d).to_string()).collect(),
            source_extensions: SOURCE_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            include_hidden: false,
            respect_gitignore: true,
            max_file_size: MAX_FILE_SIZE_BYTES,
        }
    }
}

impl WalkOptions {
    pub fn is_source_path(&self, path: impl AsRef<Path>) -> bool {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.source_extensions.iter().any(|candidate| *candidate == ext)
            })
            .unwrap_or(false)
    }
}

/// A file yielded by the walker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedFile {
    /// Absolute (or root-joined) path on disk
    pub path: PathBuf,

    /// Path relative to the scan root, forward slashes
    pub relative: String,

    /// Number of directories between the scan root and the file
    pub depth: usize,
}

impl WalkedFile {
    fn new(root: &Path, path: &Path) -> Option<Self> {
        let relative = path.strip_prefix(root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if parts.is_empty() {
            return None;
        }
        Some(Self {
            path: path.to_path_buf(),
            depth: parts.len() - 1,
            relative: parts.join("/"),
        })
    }

    /// Parent directory relative to the scan root (`.` for the root itself)
    pub fn directory(&self) -> &str {
        parent_dir(&self.relative)
    }
}

/// Parent directory of a relative, forward-slash path (`.` at the top level)
pub fn parent_dir(relative: &str) -> &str {
    relative.rsplit_once('/').map(|(dir, _)| dir).unwrap_or(".")
}

/// Deterministic, ignore-aware directory walker
pub struct FileWalker {
    root: PathBuf,
    options: WalkOptions,
}

impl FileWalker {
    pub fn new(root: impl AsRef<Path>, options: WalkOptions) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            options,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// Every regular file under the root, in lexicographic order.
    ///
    /// A missing root yields nothing.
    pub fn walk(&self) -> impl Iterator<Item = WalkedFile> {
        let walk = if self.root.is_dir() {
            Some(self.builder().build())
        } else {
            log::debug!("Walk root {} is not a directory", self.root.display());
            None
        };
        let root = self.root.clone();

        walk.into_iter().flatten().filter_map(move |result| match result {
            Ok(entry) => {
                let file_type = entry.file_type()?;
                if !file_type.is_file() {
                    return None;
                }
                WalkedFile::new(&root, entry.path())
            }
            Err(e) => {
                log::warn!("Failed to read entry: {e}");
                None
            }
        })
    }

    /// Files whose extension is in the source allow-list
    pub fn source_files(&self) -> impl Iterator<Item = WalkedFile> + '_ {
        self.walk()
            .filter(move |file| self.options.is_source_path(&file.relative))
    }

    fn builder(&self) -> WalkBuilder {
        let ignored = Arc::new(self.options.ignored_dirs.clone());
        let respect_gitignore = self.options.respect_gitignore;

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .hidden(!self.options.include_hidden)
            .git_ignore(respect_gitignore)
            .git_global(respect_gitignore)
            .git_exclude(respect_gitignore)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b));
        builder.filter_entry(move |entry| !is_ignored_dir(entry, &ignored));
        builder
    }
}

fn is_ignored_dir(entry: &DirEntry, ignored: &BTreeSet<String>) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
    is_dir && ignored.contains(entry.file_name().to_string_lossy().as_ref())
}

const IGNORED_DIRS: &[&str] = &[
    // VCS
    ".git",
    ".hg",
    ".svn",
    // dependency caches
    "node_modules",
    "bower_components",
    ".venv",
    "venv",
    "__pycache__",
    ".cache",
    "vendor",
    // build output
    "dist",
    "build",
    "out",
    "target",
    "coverage",
    ".next",
    ".nuxt",
    ".turbo",
    ".svelte-kit",
    ".output",
    "storybook-static",
];

const SOURCE_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "mjs", "cjs", "vue", "svelte", "py", "rs", "go", "java", "kt",
    "rb", "php", "cs", "swift", "c", "h", "cpp", "hpp",
];

const MAX_FILE_SIZE_BYTES: u64 = 1_048_576; // 1 MB

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn walks_in_lexicographic_order_with_depth() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "b.ts");
        touch(temp.path(), "a/z.ts");
        touch(temp.path(), "a/b/c.ts");
        touch(temp.path(), "README.md");

        let walker = FileWalker::new(temp.path(), WalkOptions::default());
        let files: Vec<(String, usize)> = walker
            .source_files()
            .map(|f| (f.relative, f.depth))
            .collect();

        assert_eq!(
            files,
            vec![
                ("a/b/c.ts".to_string(), 2),
                ("a/z.ts".to_string(), 1),
                ("b.ts".to_string(), 0),
            ]
        );
    }

    #[test]
    fn skips_ignored_directories() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "node_modules/lib/index.js");
        touch(temp.path(), "dist/bundle.js");
        touch(temp.path(), "src/main.ts");

        let walker = FileWalker::new(temp.path(), WalkOptions::default());
        let files: Vec<String> = walker.walk().map(|f| f.relative).collect();

        assert_eq!(files, vec!["src/main.ts".to_string()]);
    }

    #[test]
    fn ignored_name_as_file_is_kept() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "src/build.ts");

        let walker = FileWalker::new(temp.path(), WalkOptions::default());
        assert_eq!(walker.source_files().count(), 1);
    }

    #[test]
    fn missing_root_yields_nothing() {
        let temp = tempdir().unwrap();
        let walker = FileWalker::new(temp.path().join("nope"), WalkOptions::default());
        assert_eq!(walker.walk().count(), 0);
    }

    #[test]
    fn parent_dir_of_top_level_file_is_dot() {
        assert_eq!(parent_dir("a.ts"), ".");
        assert_eq!(parent_dir("src/a/b.ts"), "src/a");
    }
}
