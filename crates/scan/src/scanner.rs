use crate::config::ScanConfig;
use crate::error::Result;
use crate::result::{ScanResult, ScanWarning};
use audit_organization::OrganizationAnalyzer;
use audit_patterns::{PatternCatalog, PatternMatcher};
use audit_workspace::{
    load_source, FileWalker, SkipReason, SourceFile, WalkedFile, WorkspaceResolver,
};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

/// Runs the whole audit core over one root
pub struct Scanner {
    config: ScanConfig,
    catalog: PatternCatalog,
    resolver: WorkspaceResolver,
    analyzer: OrganizationAnalyzer,
}

impl Scanner {
    /// Scanner with the built-in pattern catalog
    pub fn new(config: ScanConfig) -> Result<Self> {
        let catalog = PatternCatalog::builtin()?;
        Self::with_catalog(config, catalog)
    }

    pub fn with_catalog(config: ScanConfig, catalog: PatternCatalog) -> Result<Self> {
        config.validate()?;
        let resolver = WorkspaceResolver::new(config.walk.clone())
            .with_skipped_dirs(config.skip.directories.iter().cloned());
        let analyzer = OrganizationAnalyzer::new(
            config.thresholds.clone(),
            config.skip.clone(),
            config.walk.source_extensions.clone(),
        );
        Ok(Self {
            config,
            catalog,
            resolver,
            analyzer,
        })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// Scan `root`. A missing root gives an empty result; per-file and
    /// per-manifest problems become warnings.
    pub fn scan(&self, root: impl AsRef<Path>) -> ScanResult {
        let root = root.as_ref();
        if !root.is_dir() {
            log::warn!("Scan root {} is not a directory", root.display());
            return ScanResult::default();
        }
        let started = Instant::now();

        // One traversal feeds both workspace discovery and source loading.
        let walked: Vec<WalkedFile> = FileWalker::new(root, self.config.walk.clone())
            .walk()
            .collect();
        let resolution = self.resolver.resolve_walked(root, &walked);
        let mut warnings: Vec<ScanWarning> =
            resolution.warnings.into_iter().map(ScanWarning::from).collect();

        let sources: Vec<&WalkedFile> = walked
            .iter()
            .filter(|file| self.config.walk.is_source_path(&file.relative))
            .collect();
        let (files, skipped) = self.load_all(&sources);
        warnings.extend(skipped);
        warnings.sort();

        let contents: Vec<(&str, &str)> = files
            .iter()
            .map(|file| (file.relative.as_str(), file.content.as_str()))
            .collect();
        let detections = PatternMatcher::new(&self.catalog).scan_files(&contents);

        let report = self.analyzer.analyze(&files, &resolution.workspaces);

        log::info!(
            "Scanned {} in {:?}: {} files, {} workspaces, {} detections, {} findings, {} warnings",
            root.display(),
            started.elapsed(),
            files.len(),
            resolution.workspaces.len(),
            detections.len(),
            report.findings.len(),
            warnings.len()
        );

        ScanResult {
            detections,
            structural_findings: report.findings,
            code_organization_stats: report.stats,
            workspaces: resolution.workspaces,
            warnings,
        }
    }

    fn load_all(&self, walked: &[&WalkedFile]) -> (Vec<SourceFile>, Vec<ScanWarning>) {
        let max_size = self.config.walk.max_file_size;
        let loaded: Vec<std::result::Result<SourceFile, ScanWarning>> = walked
            .par_iter()
            .map(|file| {
                load_source(file, max_size).map_err(|reason| {
                    match reason {
                        SkipReason::Unreadable(_) => {
                            log::warn!("Skipping {}: {reason}", file.relative)
                        }
                        _ => log::debug!("Skipping {}: {reason}", file.relative),
                    }
                    ScanWarning {
                        path: file.relative.clone(),
                        reason: reason.to_string(),
                    }
                })
            })
            .collect();

        let mut files = Vec::with_capacity(loaded.len());
        let mut warnings = Vec::new();
        for entry in loaded {
            match entry {
                Ok(file) => files.push(file),
                Err(warning) => warnings.push(warning),
            }
        }
        (files, warnings)
    }
}

/// Scan `root` with the default configuration.
///
/// The built-in catalog and default config are always valid; should that
/// ever break, the failure is logged and the result is empty.
pub fn scan(root: impl AsRef<Path>) -> ScanResult {
    match Scanner::new(ScanConfig::default()) {
        Ok(scanner) => scanner.scan(root),
        Err(e) => {
            log::error!("Default scanner failed to build: {e}");
            ScanResult::default()
        }
    }
}
