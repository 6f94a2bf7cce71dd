use crate::language::Language;
use crate::manifest::{parse_manifest, ManifestKind, PackageManager};
use crate::walker::{FileWalker, WalkOptions, WalkedFile};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::Path;

/// One discovered project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    /// Root relative to the scan root; `.` for the top level
    pub root: String,

    /// Manifest file that opened the workspace
    pub manifest: String,

    pub language: Language,

    pub package_manager: PackageManager,

    /// Runtime and development dependencies merged
    pub dependencies: BTreeMap<String, String>,
}

impl Workspace {
    /// Whether a scan-root-relative path lives under this workspace root
    pub fn contains(&self, relative: &str) -> bool {
        self.root == "."
            || relative
                .strip_prefix(self.root.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Index of the innermost workspace containing `relative`
pub fn owner_index(workspaces: &[Workspace], relative: &str) -> Option<usize> {
    workspaces
        .iter()
        .enumerate()
        .filter(|(_, ws)| ws.contains(relative))
        .max_by_key(|(_, ws)| if ws.root == "." { 0 } else { ws.root.len() })
        .map(|(idx, _)| idx)
}

/// A manifest that could not be used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestWarning {
    pub path: String,
    pub reason: String,
}

/// Resolver output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub workspaces: Vec<Workspace>,
    pub warnings: Vec<ManifestWarning>,
}

/// Discovers workspaces (single project or monorepo) under a root
pub struct WorkspaceResolver {
    options: WalkOptions,
    skipped_dirs: BTreeSet<String>,
}

struct Candidate {
    dir: String,
    manifest: String,
    dependencies: BTreeMap<String, String>,
    package_manager: PackageManager,
    fallback_language: Language,
}

impl WorkspaceResolver {
    pub fn new(options: WalkOptions) -> Self {
        Self {
            options,
            skipped_dirs: BTreeSet::new(),
        }
    }

    /// Manifests under a directory with any of these names never open a
    /// workspace (test fixtures, mocks, generated trees).
    pub fn with_skipped_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skipped_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Walk `root` and resolve its workspaces.
    ///
    /// A missing root or a tree without manifests resolves to nothing.
    pub fn resolve(&self, root: &Path) -> Resolution {
        let files: Vec<WalkedFile> = FileWalker::new(root, self.options.clone()).walk().collect();
        self.resolve_walked(root, &files)
    }

    /// Resolve workspaces from an existing walk of `root`: `.` first, nested
    /// roots in walk order. Only manifest contents are read from disk.
    pub fn resolve_walked(&self, root: &Path, files: &[WalkedFile]) -> Resolution {
        let mut manifest_dirs: Vec<&str> = Vec::new();
        let mut manifests: HashMap<&str, Vec<ManifestKind>> = HashMap::new();
        let mut names_by_dir: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut sources: Vec<(&str, Language)> = Vec::new();

        for file in files {
            let dir = file.directory();
            let name = file
                .relative
                .rsplit('/')
                .next()
                .unwrap_or(file.relative.as_str());
            names_by_dir.entry(dir).or_default().push(name);

            if let Some(kind) = ManifestKind::from_file_name(name) {
                if self.is_skipped_dir(dir) {
                    log::debug!("Ignoring manifest {} in a skipped directory", file.relative);
                    continue;
                }
                let kinds = manifests.entry(dir).or_default();
                if kinds.is_empty() {
                    manifest_dirs.push(dir);
                }
                kinds.push(kind);
            } else if self.options.is_source_path(&file.relative) {
                sources.push((file.relative.as_str(), Language::from_path(&file.relative)));
            }
        }

        // Root first, the rest keep walk order.
        if let Some(pos) = manifest_dirs.iter().position(|d| *d == ".") {
            let root_dir = manifest_dirs.remove(pos);
            manifest_dirs.insert(0, root_dir);
        }

        let mut resolution = Resolution::default();
        let mut candidates = Vec::new();
        for dir in manifest_dirs {
            let mut kinds = manifests.remove(dir).unwrap_or_default();
            kinds.sort();
            let siblings = names_by_dir.get(dir).map(Vec::as_slice).unwrap_or_default();
            if let Some(candidate) =
                self.load_candidate(root, dir, &kinds, siblings, &mut resolution)
            {
                candidates.push(candidate);
            }
        }

        resolution.workspaces = assign_languages(candidates, &sources);
        log::info!(
            "Resolved {} workspace(s) under {}",
            resolution.workspaces.len(),
            root.display()
        );
        resolution
    }

    fn is_skipped_dir(&self, dir: &str) -> bool {
        dir != "." && dir.split('/').any(|part| self.skipped_dirs.contains(part))
    }

    fn load_candidate(
        &self,
        root: &Path,
        dir: &str,
        kinds: &[ManifestKind],
        siblings: &[&str],
        resolution: &mut Resolution,
    ) -> Option<Candidate> {
        let dir_path = if dir == "." {
            root.to_path_buf()
        } else {
            root.join(dir)
        };

        for kind in kinds {
            let path = dir_path.join(kind.file_name());
            let relative = join_relative(dir, kind.file_name());
            let parsed = fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|content| {
                    parse_manifest(*kind, &path, &content).map_err(|e| e.to_string())
                });

            match parsed {
                Ok(parsed) => {
                    let package_manager = PackageManager::from_lock_files(siblings.iter().copied())
                        .or(parsed.declared_manager)
                        .unwrap_or_else(|| kind.default_manager());
                    let fallback_language = if *kind == ManifestKind::PackageJson
                        && siblings.contains(&"tsconfig.json")
                    {
                        Language::TypeScript
                    } else {
                        kind.default_language()
                    };
                    return Some(Candidate {
                        dir: dir.to_string(),
                        manifest: kind.file_name().to_string(),
                        dependencies: parsed.dependencies,
                        package_manager,
                        fallback_language,
                    });
                }
                Err(reason) => {
                    log::warn!("Skipping manifest {relative}: {reason}");
                    resolution.warnings.push(ManifestWarning {
                        path: relative,
                        reason,
                    });
                }
            }
        }
        None
    }
}

fn join_relative(dir: &str, name: &str) -> String {
    if dir == "." {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// Pick each workspace's dominant source language among the files it owns.
fn assign_languages(candidates: Vec<Candidate>, sources: &[(&str, Language)]) -> Vec<Workspace> {
    let mut workspaces: Vec<Workspace> = candidates
        .iter()
        .map(|c| Workspace {
            root: c.dir.clone(),
            manifest: c.manifest.clone(),
            language: c.fallback_language,
            package_manager: c.package_manager,
            dependencies: c.dependencies.clone(),
        })
        .collect();

    let mut counts: Vec<BTreeMap<Language, usize>> = vec![BTreeMap::new(); workspaces.len()];
    for (relative, language) in sources {
        if *language == Language::Unknown {
            continue;
        }
        if let Some(idx) = owner_index(&workspaces, relative) {
            *counts[idx].entry(*language).or_insert(0) += 1;
        }
    }

    for ((workspace, candidate), counts) in workspaces.iter_mut().zip(&candidates).zip(counts) {
        workspace.language = dominant_language(&counts, candidate.fallback_language);
    }
    workspaces
}

fn dominant_language(counts: &BTreeMap<Language, usize>, fallback: Language) -> Language {
    let Some(max) = counts.values().copied().max() else {
        return fallback;
    };
    // TypeScript projects usually carry some JavaScript config files.
    let fallback_family = |language: Language| {
        language == fallback || (fallback.is_ecmascript() && language.is_ecmascript())
    };
    let tied: Vec<Language> = counts
        .iter()
        .filter(|(_, count)| **count == max)
        .map(|(language, _)| *language)
        .collect();
    if tied.contains(&fallback) {
        return fallback;
    }
    tied.iter()
        .copied()
        .find(|language| fallback_family(*language))
        .or_else(|| tied.first().copied())
        .unwrap_or(fallback)
}
