use std::collections::BTreeSet;

/// ESM TypeScript imports name the emitted `.js` file
const EMITTED_EXTENSION_SWAPS: &[(&str, &[&str])] = &[
    ("js", &["ts", "tsx"]),
    ("jsx", &["tsx"]),
    ("mjs", &["mts"]),
    ("cjs", &["cts"]),
];

/// Join `specifier` onto the importer's directory and fold `.`/`..`.
///
/// Returns `None` when the result would leave the root.
pub fn normalize(importer: &str, specifier: &str) -> Option<String> {
    let mut parts: Vec<&str> = importer.split('/').collect();
    parts.pop();

    for segment in specifier.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Resolve a relative specifier against the set of known files.
///
/// Lookup order: exact path, `path.<ext>` for every extension, emitted
/// `.js` swapped for its TypeScript source, then directory index files.
pub fn resolve_specifier(
    importer: &str,
    specifier: &str,
    known: &BTreeSet<String>,
    extensions: &[String],
) -> Option<String> {
    if matches!(specifier, "." | "..") || specifier.ends_with('/') {
        // Directory import; only index files can answer.
        let dir = normalize(importer, specifier).or_else(|| {
            // `.` from a top-level file names the root itself.
            (specifier == "." && !importer.contains('/')).then(String::new)
        })?;
        return resolve_index(&dir, known, extensions);
    }

    let base = normalize(importer, specifier)?;

    if known.contains(&base) {
        return Some(base);
    }

    for ext in extensions {
        let candidate = format!("{base}.{ext}");
        if known.contains(&candidate) {
            return Some(candidate);
        }
    }

    if let Some((stem, ext)) = base.rsplit_once('.') {
        if let Some((_, swaps)) = EMITTED_EXTENSION_SWAPS.iter().find(|(from, _)| *from == ext) {
            for swap in *swaps {
                let candidate = format!("{stem}.{swap}");
                if known.contains(&candidate) {
                    return Some(candidate);
                }
            }
        }
    }

    resolve_index(&base, known, extensions)
}

fn resolve_index(dir: &str, known: &BTreeSet<String>, extensions: &[String]) -> Option<String> {
    let prefix = if dir.is_empty() {
        String::new()
    } else {
        format!("{dir}/")
    };
    extensions
        .iter()
        .map(|ext| format!("{prefix}index.{ext}"))
        .chain(std::iter::once(format!("{prefix}__init__.py")))
        .find(|candidate| known.contains(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn known(paths: &[&str]) -> BTreeSet<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    fn exts() -> Vec<String> {
        ["ts", "tsx", "js", "py"].iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn normalizes_parent_segments() {
        assert_eq!(normalize("src/a/b.ts", "../c"), Some("src/c".to_string()));
        assert_eq!(normalize("src/a/b.ts", "./d/./e"), Some("src/a/d/e".to_string()));
        assert_eq!(normalize("a.ts", "./b"), Some("b".to_string()));
        assert_eq!(normalize("a.ts", "../b"), None);
        assert_eq!(normalize("src/a.ts", "../../b"), None);
    }

    #[test]
    fn tries_candidates_in_order() {
        let files = known(&["src/a.ts", "src/b.tsx", "src/c/index.ts", "src/d.ts", "pkg/__init__.py"]);
        let resolve = |spec: &str| resolve_specifier("src/main.ts", spec, &files, &exts());

        assert_eq!(resolve("./a.ts"), Some("src/a.ts".to_string()));
        assert_eq!(resolve("./a"), Some("src/a.ts".to_string()));
        assert_eq!(resolve("./b"), Some("src/b.tsx".to_string()));
        assert_eq!(resolve("./c"), Some("src/c/index.ts".to_string()));
        assert_eq!(resolve("./d.js"), Some("src/d.ts".to_string()));
        assert_eq!(resolve("../pkg"), Some("pkg/__init__.py".to_string()));
        assert_eq!(resolve("./missing"), None);
        assert_eq!(resolve("../../outside"), None);
    }

    #[test]
    fn directory_specifiers_use_index_files() {
        let files = known(&["src/index.ts", "src/a/b.ts", "index.js"]);
        assert_eq!(
            resolve_specifier("src/a/b.ts", "..", &files, &exts()),
            Some("src/index.ts".to_string())
        );
        assert_eq!(
            resolve_specifier("main.ts", ".", &files, &exts()),
            Some("index.js".to_string())
        );
    }
}
