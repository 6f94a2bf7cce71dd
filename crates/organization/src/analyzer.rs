use crate::config::{OrganizationThresholds, SkipRule};
use crate::exports::{count_reexports, is_barrel_file, ExportShape};
use crate::naming::NamingConvention;
use crate::types::{
    sort_findings, CodeOrganizationStats, FindingType, OrganizationReport, Severity,
    StructuralFinding,
};
use audit_graph::GraphBuilder;
use audit_workspace::{owner_index, Language, SourceFile, WalkOptions, Workspace};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// Produces structural findings and whole-tree statistics
pub struct OrganizationAnalyzer {
    thresholds: OrganizationThresholds,
    skip: SkipRule,
    graph_builder: GraphBuilder,
}

impl Default for OrganizationAnalyzer {
    fn default() -> Self {
        Self::new(
            OrganizationThresholds::default(),
            SkipRule::default(),
            WalkOptions::default().source_extensions,
        )
    }
}

impl OrganizationAnalyzer {
    pub fn new(thresholds: OrganizationThresholds, skip: SkipRule, extensions: Vec<String>) -> Self {
        Self {
            thresholds,
            skip,
            graph_builder: GraphBuilder::new(extensions),
        }
    }

    pub fn thresholds(&self) -> &OrganizationThresholds {
        &self.thresholds
    }

    /// Analyze loaded source files.
    ///
    /// Files are attributed to their innermost workspace; files no workspace
    /// owns (or every file, when there are no workspaces) form one implicit
    /// partition rooted at the scan root.
    pub fn analyze(&self, files: &[SourceFile], workspaces: &[Workspace]) -> OrganizationReport {
        let mut stats = tree_stats(files);

        let analyzed: Vec<&SourceFile> = files
            .iter()
            .filter(|file| {
                let skipped = self.skip.skips(&file.relative, &file.content);
                if skipped {
                    log::debug!("Structural checks skip {}", file.relative);
                }
                !skipped
            })
            .collect();

        let mut findings = Vec::new();
        findings.extend(self.directory_findings(&analyzed));
        findings.extend(self.file_findings(&analyzed));
        findings.extend(self.nesting_findings(&analyzed, workspaces));

        let cycles = self.cycle_findings(&analyzed, workspaces);
        stats.circular_dependency_count = cycles.len();
        findings.extend(cycles);

        sort_findings(&mut findings);
        log::info!(
            "Organization analysis: {} files ({} analyzed), {} findings, {} cycles",
            stats.total_source_files,
            analyzed.len(),
            findings.len(),
            stats.circular_dependency_count
        );
        OrganizationReport { findings, stats }
    }

    /// god-directory, mixed-naming-convention and catch-all-directory
    fn directory_findings(&self, files: &[&SourceFile]) -> Vec<StructuralFinding> {
        let t = &self.thresholds;
        let mut by_dir: BTreeMap<&str, Vec<&SourceFile>> = BTreeMap::new();
        for &file in files {
            by_dir.entry(file.directory()).or_default().push(file);
        }

        let mut findings = Vec::new();
        for (dir, entries) in by_dir {
            let count = entries.len();

            if count > t.god_directory_warning {
                let severity = if count > t.god_directory_critical {
                    Severity::Critical
                } else {
                    Severity::Warning
                };
                findings.push(
                    StructuralFinding::new(
                        FindingType::GodDirectory,
                        severity,
                        vec![dir.to_string()],
                        format!("{dir} holds {count} source files directly"),
                    )
                    .with_meta("fileCount", count),
                );
            }

            if count >= t.naming_min_files {
                let conventions: BTreeSet<NamingConvention> = entries
                    .iter()
                    .filter_map(|file| NamingConvention::classify(file.file_name()))
                    .collect();
                if conventions.len() > 1 {
                    let names: Vec<&str> = conventions.iter().map(|c| c.as_str()).collect();
                    findings.push(
                        StructuralFinding::new(
                            FindingType::MixedNamingConvention,
                            Severity::Warning,
                            vec![dir.to_string()],
                            format!("{dir} mixes naming conventions: {}", names.join(", ")),
                        )
                        .with_meta("conventions", names),
                    );
                }
            }

            let dir_name = dir.rsplit('/').next().unwrap_or(dir);
            if t.catch_all_names.contains(dir_name) && count > t.catch_all_max_files {
                findings.push(
                    StructuralFinding::new(
                        FindingType::CatchAllDirectory,
                        Severity::Warning,
                        vec![dir.to_string()],
                        format!("{dir} is a catch-all directory with {count} files"),
                    )
                    .with_meta("fileCount", count),
                );
            }
        }
        findings
    }

    /// barrel-bloat and mixed-export-style
    fn file_findings(&self, files: &[&SourceFile]) -> Vec<StructuralFinding> {
        let t = &self.thresholds;
        files
            .par_iter()
            .filter_map(|file| {
                if is_barrel_file(file.file_name()) {
                    let reexports = count_reexports(&file.content);
                    return (reexports > t.barrel_max_reexports).then(|| {
                        StructuralFinding::new(
                            FindingType::BarrelBloat,
                            Severity::Warning,
                            vec![file.relative.clone()],
                            format!("{} re-exports {reexports} modules", file.relative),
                        )
                        .with_meta("reexportCount", reexports)
                    });
                }

                if !Language::from_path(&file.relative).is_ecmascript() {
                    return None;
                }
                let shape = ExportShape::of(&file.content);
                shape.is_mixed(t.mixed_export_min_named).then(|| {
                    StructuralFinding::new(
                        FindingType::BarrelBloat,
                        Severity::Warning,
                        vec![file.relative.clone()],
                        format!(
                            "{} mixes a default export with {} named exports",
                            file.relative, shape.named_exports
                        ),
                    )
                    .with_meta("issue", "mixed-export-style")
                    .with_meta("namedExports", shape.named_exports)
                })
            })
            .collect()
    }

    /// deep-nesting, reported at the first directory past the limit
    fn nesting_findings(&self, files: &[&SourceFile], workspaces: &[Workspace]) -> Vec<StructuralFinding> {
        let limit = self.thresholds.max_nesting_depth;
        let mut flagged: BTreeMap<String, usize> = BTreeMap::new();

        for file in files {
            let dir = file.directory();
            if dir == "." {
                continue;
            }
            let components: Vec<&str> = dir.split('/').collect();
            let source_root = source_root_len(&file.relative, &components, workspaces);
            let levels = components.len() - source_root;
            if levels > limit {
                let first = components[..source_root + limit + 1].join("/");
                let deepest = flagged.entry(first).or_insert(0);
                *deepest = (*deepest).max(levels);
            }
        }

        flagged
            .into_iter()
            .map(|(dir, levels)| {
                StructuralFinding::new(
                    FindingType::DeepNesting,
                    Severity::Warning,
                    vec![dir.clone()],
                    format!("{dir} is nested more than {limit} levels below its source root"),
                )
                .with_meta("depth", levels)
            })
            .collect()
    }

    /// circular-dependency, one graph per workspace
    fn cycle_findings(&self, files: &[&SourceFile], workspaces: &[Workspace]) -> Vec<StructuralFinding> {
        let mut partitions: BTreeMap<Option<usize>, Vec<&SourceFile>> = BTreeMap::new();
        for &file in files {
            partitions
                .entry(owner_index(workspaces, &file.relative))
                .or_default()
                .push(file);
        }

        let partitions: Vec<(String, Vec<&SourceFile>)> = partitions
            .into_iter()
            .map(|(owner, members)| {
                let root = owner
                    .and_then(|idx| workspaces.get(idx))
                    .map_or_else(|| ".".to_string(), |ws| ws.root.clone());
                (root, members)
            })
            .collect();

        partitions
            .par_iter()
            .flat_map_iter(|(root, members)| {
                let graph = self.graph_builder.build(members.iter().copied());
                graph.find_cycles().into_iter().map(move |cycle| {
                    let length = cycle.len();
                    StructuralFinding::new(
                        FindingType::CircularDependency,
                        Severity::Critical,
                        cycle.clone(),
                        format!("Import cycle: {} -> {}", cycle.join(" -> "), cycle[0]),
                    )
                    .with_meta("length", length)
                    .with_meta("workspace", root.clone())
                })
            })
            .collect()
    }
}

/// Components of `dir` that make up the file's source root
fn source_root_len(relative: &str, components: &[&str], workspaces: &[Workspace]) -> usize {
    let workspace_len = owner_index(workspaces, relative)
        .and_then(|idx| workspaces.get(idx))
        .filter(|ws| ws.root != ".")
        .map_or(0, |ws| ws.root.split('/').count());

    components
        .iter()
        .enumerate()
        .skip(workspace_len)
        .find(|(_, c)| **c == "src")
        .map_or(workspace_len, |(i, _)| i + 1)
}

fn tree_stats(files: &[SourceFile]) -> CodeOrganizationStats {
    let mut stats = CodeOrganizationStats {
        total_source_files: files.len(),
        ..Default::default()
    };
    for file in files {
        stats.max_directory_depth = stats.max_directory_depth.max(file.depth);
        if let Some(convention) = NamingConvention::classify(file.file_name()) {
            *stats.naming_conventions.entry(convention).or_insert(0) += 1;
        }
    }
    stats
}
