use crate::walker::WalkedFile;
use std::fs;
use thiserror::Error;

/// Bytes inspected for NUL when sniffing binary content
const BINARY_SNIFF_BYTES: usize = 8 * 1024;

/// Why a walked file was not loaded. None of these abort a scan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("unreadable: {0}")]
    Unreadable(String),

    #[error("binary content")]
    Binary,

    #[error("not valid UTF-8")]
    NotUtf8,

    #[error("too large ({size} bytes > {limit})")]
    TooLarge { size: u64, limit: u64 },
}

/// A decoded text file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the scan root, forward slashes
    pub relative: String,

    pub depth: usize,

    pub content: String,
}

impl SourceFile {
    /// Build an in-memory source file (used by analyzers and tests)
    pub fn new(relative: impl Into<String>, content: impl Into<String>) -> Self {
        let relative = relative.into();
        let depth = relative.matches('/').count();
        Self {
            relative,
            depth,
            content: content.into(),
        }
    }

    pub fn directory(&self) -> &str {
        crate::walker::parent_dir(&self.relative)
    }

    /// File name without directories
    pub fn file_name(&self) -> &str {
        self.relative
            .rsplit_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.relative)
    }
}

/// Read a walked file as UTF-8 text.
pub fn load_source(file: &WalkedFile, max_size: u64) -> Result<SourceFile, SkipReason> {
    let meta = fs::metadata(&file.path).map_err(|e| SkipReason::Unreadable(e.to_string()))?;
    if meta.len() > max_size {
        return Err(SkipReason::TooLarge {
            size: meta.len(),
            limit: max_size,
        });
    }

    let bytes = fs::read(&file.path).map_err(|e| SkipReason::Unreadable(e.to_string()))?;
    let sniff = &bytes[..bytes.len().min(BINARY_SNIFF_BYTES)];
    if sniff.contains(&0) {
        return Err(SkipReason::Binary);
    }

    let content = String::from_utf8(bytes).map_err(|_| SkipReason::NotUtf8)?;
    Ok(SourceFile {
        relative: file.relative.clone(),
        depth: file.depth,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::{FileWalker, WalkOptions};
    use std::fs;
    use tempfile::tempdir;

    fn walked(root: &std::path::Path) -> Vec<WalkedFile> {
        FileWalker::new(root, WalkOptions::default()).walk().collect()
    }

    #[test]
    fn loads_text_and_skips_binary() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.ts"), "export const a = 1;\n").unwrap();
        fs::write(temp.path().join("b.ts"), [0x41u8, 0x00, 0x42]).unwrap();
        fs::write(temp.path().join("c.ts"), [0xffu8, 0xfe, 0x41]).unwrap();

        let files = walked(temp.path());
        assert_eq!(files.len(), 3);

        let a = load_source(&files[0], 1024).unwrap();
        assert_eq!(a.relative, "a.ts");
        assert_eq!(a.content, "export const a = 1;\n");
        assert_eq!(load_source(&files[1], 1024), Err(SkipReason::Binary));
        assert_eq!(load_source(&files[2], 1024), Err(SkipReason::NotUtf8));
    }

    #[test]
    fn respects_size_limit() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("big.ts"), "x".repeat(64)).unwrap();
        let files = walked(temp.path());
        assert_eq!(
            load_source(&files[0], 10),
            Err(SkipReason::TooLarge { size: 64, limit: 10 })
        );
    }

    #[test]
    fn in_memory_file_knows_its_directory() {
        let file = SourceFile::new("src/utils/format-date.ts", "");
        assert_eq!(file.depth, 2);
        assert_eq!(file.directory(), "src/utils");
        assert_eq!(file.file_name(), "format-date.ts");
    }
}
