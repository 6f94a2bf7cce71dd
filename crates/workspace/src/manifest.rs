use crate::error::{Result, WorkspaceError};
use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Manifest formats that open a workspace, in per-directory priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ManifestKind {
    PackageJson,
    Cargo,
    PyProject,
    GoMod,
}

impl ManifestKind {
    pub const ALL: [ManifestKind; 4] = [
        ManifestKind::PackageJson,
        ManifestKind::Cargo,
        ManifestKind::PyProject,
        ManifestKind::GoMod,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ManifestKind::PackageJson => "package.json",
            ManifestKind::Cargo => "Cargo.toml",
            ManifestKind::PyProject => "pyproject.toml",
            ManifestKind::GoMod => "go.mod",
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.file_name() == name)
    }

    pub fn default_manager(self) -> PackageManager {
        match self {
            ManifestKind::PackageJson => PackageManager::Npm,
            ManifestKind::Cargo => PackageManager::Cargo,
            ManifestKind::PyProject => PackageManager::Pip,
            ManifestKind::GoMod => PackageManager::Go,
        }
    }

    pub fn default_language(self) -> Language {
        match self {
            ManifestKind::PackageJson => Language::JavaScript,
            ManifestKind::Cargo => Language::Rust,
            ManifestKind::PyProject => Language::Python,
            ManifestKind::GoMod => Language::Go,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
    Cargo,
    Pip,
    Poetry,
    Uv,
    Pipenv,
    Go,
}

impl PackageManager {
    /// Parse a `packageManager` field such as `pnpm@8.15.0`
    pub fn from_declared(value: &str) -> Option<Self> {
        let name = value.split('@').next().unwrap_or_default().trim();
        match name.to_ascii_lowercase().as_str() {
            "npm" => Some(PackageManager::Npm),
            "yarn" => Some(PackageManager::Yarn),
            "pnpm" => Some(PackageManager::Pnpm),
            "bun" => Some(PackageManager::Bun),
            "poetry" => Some(PackageManager::Poetry),
            "uv" => Some(PackageManager::Uv),
            "pipenv" => Some(PackageManager::Pipenv),
            "pip" => Some(PackageManager::Pip),
            _ => None,
        }
    }

    /// Manager implied by the lock files beside a manifest; the first
    /// match in [`LOCK_FILES`] order wins.
    pub fn from_lock_files<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let present: Vec<&str> = names.into_iter().collect();
        LOCK_FILES
            .iter()
            .find(|(file, _)| present.contains(file))
            .map(|(_, manager)| *manager)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
            PackageManager::Cargo => "cargo",
            PackageManager::Pip => "pip",
            PackageManager::Poetry => "poetry",
            PackageManager::Uv => "uv",
            PackageManager::Pipenv => "pipenv",
            PackageManager::Go => "go",
        }
    }
}

/// Lock files in lookup order
pub const LOCK_FILES: &[(&str, PackageManager)] = &[
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
    ("package-lock.json", PackageManager::Npm),
    ("npm-shrinkwrap.json", PackageManager::Npm),
    ("poetry.lock", PackageManager::Poetry),
    ("uv.lock", PackageManager::Uv),
    ("Pipfile.lock", PackageManager::Pipenv),
];

/// Facts extracted from one manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedManifest {
    /// name → version requirement, runtime entries win over development ones
    pub dependencies: BTreeMap<String, String>,

    /// Manager named inside the manifest itself
    pub declared_manager: Option<PackageManager>,
}

impl ParsedManifest {
    fn merge_runtime(&mut self, entries: impl IntoIterator<Item = (String, String)>) {
        for (name, version) in entries {
            self.dependencies.insert(name, version);
        }
    }

    fn merge_dev(&mut self, entries: impl IntoIterator<Item = (String, String)>) {
        for (name, version) in entries {
            self.dependencies.entry(name).or_insert(version);
        }
    }
}

pub fn parse_manifest(kind: ManifestKind, path: &Path, content: &str) -> Result<ParsedManifest> {
    match kind {
        ManifestKind::PackageJson => parse_package_json(path, content),
        ManifestKind::Cargo => parse_cargo(path, content),
        ManifestKind::PyProject => parse_pyproject(path, content),
        ManifestKind::GoMod => parse_go_mod(path, content),
    }
}

fn parse_package_json(path: &Path, content: &str) -> Result<ParsedManifest> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|source| WorkspaceError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let Some(object) = value.as_object() else {
        return Err(WorkspaceError::InvalidManifest {
            path: path.to_path_buf(),
            reason: "top level is not an object".to_string(),
        });
    };

    let section = |key: &str| -> Vec<(String, String)> {
        object
            .get(key)
            .and_then(|v| v.as_object())
            .map(|deps| {
                deps.iter()
                    .map(|(name, version)| {
                        let version = version.as_str().unwrap_or("*").to_string();
                        (name.clone(), version)
                    })
                    .collect()
            })
            .unwrap_or_default()
    };

    let mut parsed = ParsedManifest {
        declared_manager: object
            .get("packageManager")
            .and_then(|v| v.as_str())
            .and_then(PackageManager::from_declared),
        ..Default::default()
    };
    parsed.merge_runtime(section("dependencies"));
    for key in ["peerDependencies", "optionalDependencies", "devDependencies"] {
        parsed.merge_dev(section(key));
    }
    Ok(parsed)
}

fn parse_toml(path: &Path, content: &str) -> Result<toml::Table> {
    content.parse::<toml::Table>().map_err(|source| WorkspaceError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

fn cargo_section(table: Option<&toml::Value>) -> Vec<(String, String)> {
    let Some(table) = table.and_then(|v| v.as_table()) else {
        return Vec::new();
    };
    table
        .iter()
        .map(|(name, spec)| {
            let version = match spec {
                toml::Value::String(version) => version.clone(),
                toml::Value::Table(detail) => {
                    if let Some(version) = detail.get("version").and_then(|v| v.as_str()) {
                        version.to_string()
                    } else if detail.get("workspace").and_then(|v| v.as_bool()) == Some(true) {
                        "workspace".to_string()
                    } else {
                        "*".to_string()
                    }
                }
                _ => "*".to_string(),
            };
            (name.clone(), version)
        })
        .collect()
}

fn parse_cargo(path: &Path, content: &str) -> Result<ParsedManifest> {
    let table = parse_toml(path, content)?;
    if !table.contains_key("package") && !table.contains_key("workspace") {
        return Err(WorkspaceError::InvalidManifest {
            path: path.to_path_buf(),
            reason: "neither [package] nor [workspace] present".to_string(),
        });
    }

    let mut parsed = ParsedManifest::default();
    parsed.merge_runtime(cargo_section(table.get("dependencies")));
    parsed.merge_dev(cargo_section(table.get("dev-dependencies")));
    parsed.merge_dev(cargo_section(table.get("build-dependencies")));
    parsed.merge_dev(cargo_section(
        table.get("workspace").and_then(|w| w.get("dependencies")),
    ));
    Ok(parsed)
}

/// Split a PEP 508 requirement (`requests[socks]>=2.0; python_version>'3'`)
fn split_requirement(requirement: &str) -> Option<(String, String)> {
    let requirement = requirement.split(';').next().unwrap_or_default().trim();
    let end = requirement
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        .unwrap_or(requirement.len());
    let name = requirement[..end].trim();
    if name.is_empty() {
        return None;
    }
    let mut rest = requirement[end..].trim();
    if rest.starts_with('[') {
        rest = rest.find(']').map(|i| rest[i + 1..].trim()).unwrap_or("");
    }
    let version = if rest.is_empty() { "*" } else { rest };
    Some((name.to_string(), version.to_string()))
}

fn poetry_section(table: Option<&toml::Value>) -> Vec<(String, String)> {
    cargo_section(table)
        .into_iter()
        .filter(|(name, _)| name != "python")
        .collect()
}

fn parse_pyproject(path: &Path, content: &str) -> Result<ParsedManifest> {
    let table = parse_toml(path, content)?;
    let mut parsed = ParsedManifest::default();

    let project = table.get("project");
    if let Some(deps) = project
        .and_then(|p| p.get("dependencies"))
        .and_then(|d| d.as_array())
    {
        parsed.merge_runtime(deps.iter().filter_map(|d| d.as_str()).filter_map(split_requirement));
    }
    if let Some(groups) = project
        .and_then(|p| p.get("optional-dependencies"))
        .and_then(|d| d.as_table())
    {
        for group in groups.values().filter_map(|g| g.as_array()) {
            parsed.merge_dev(group.iter().filter_map(|d| d.as_str()).filter_map(split_requirement));
        }
    }

    let poetry = table.get("tool").and_then(|t| t.get("poetry"));
    if poetry.is_some() {
        parsed.declared_manager = Some(PackageManager::Poetry);
    }
    parsed.merge_runtime(poetry_section(poetry.and_then(|p| p.get("dependencies"))));
    parsed.merge_dev(poetry_section(poetry.and_then(|p| p.get("dev-dependencies"))));
    if let Some(groups) = poetry
        .and_then(|p| p.get("group"))
        .and_then(|g| g.as_table())
    {
        for group in groups.values() {
            parsed.merge_dev(poetry_section(group.get("dependencies")));
        }
    }
    Ok(parsed)
}

fn parse_go_mod(path: &Path, content: &str) -> Result<ParsedManifest> {
    let mut has_module = false;
    let mut in_block = false;
    let mut parsed = ParsedManifest::default();

    for line in content.lines() {
        let line = line.split("//").next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("module ") {
            has_module = true;
            continue;
        }
        if in_block {
            if line == ")" {
                in_block = false;
            } else {
                parsed.merge_runtime(go_requirement(line));
            }
            continue;
        }
        if let Some(rest) = line.strip_prefix("require") {
            let rest = rest.trim();
            if rest == "(" {
                in_block = true;
            } else {
                parsed.merge_runtime(go_requirement(rest));
            }
        }
    }

    if !has_module {
        return Err(WorkspaceError::InvalidManifest {
            path: path.to_path_buf(),
            reason: "missing module directive".to_string(),
        });
    }
    Ok(parsed)
}

fn go_requirement(line: &str) -> Option<(String, String)> {
    let mut parts = line.split_whitespace();
    let name = parts.next()?;
    let version = parts.next().unwrap_or("*");
    Some((name.to_string(), version.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn p() -> &'static Path {
        Path::new("manifest")
    }

    #[test]
    fn package_json_merges_dev_dependencies() {
        let parsed = parse_manifest(
            ManifestKind::PackageJson,
            p(),
            r#"{
                "packageManager": "pnpm@8.15.0",
                "dependencies": { "react": "^18.2.0" },
                "devDependencies": { "react": "^17.0.0", "vitest": "^1.0.0" }
            }"#,
        )
        .unwrap();

        assert_eq!(parsed.declared_manager, Some(PackageManager::Pnpm));
        assert_eq!(parsed.dependencies.get("react").map(String::as_str), Some("^18.2.0"));
        assert_eq!(parsed.dependencies.get("vitest").map(String::as_str), Some("^1.0.0"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = parse_manifest(ManifestKind::PackageJson, p(), "{ not json").unwrap_err();
        assert!(matches!(err, WorkspaceError::Json { .. }));
    }

    #[test]
    fn cargo_reads_string_and_table_versions() {
        let parsed = parse_manifest(
            ManifestKind::Cargo,
            p(),
            r#"
[package]
name = "demo"

[dependencies]
serde = { version = "1.0", features = ["derive"] }
regex = "1.11"
local = { path = "../local" }

[dev-dependencies]
tempfile = "3"
"#,
        )
        .unwrap();

        let deps: Vec<(&str, &str)> = parsed
            .dependencies
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            deps,
            vec![("local", "*"), ("regex", "1.11"), ("serde", "1.0"), ("tempfile", "3")]
        );
    }

    #[test]
    fn pyproject_reads_pep621_and_poetry() {
        let parsed = parse_manifest(
            ManifestKind::PyProject,
            p(),
            r#"
[project]
dependencies = ["requests[socks]>=2.31; python_version > '3.8'", "rich"]

[tool.poetry.dependencies]
python = "^3.11"
httpx = "^0.27"
"#,
        )
        .unwrap();

        assert_eq!(parsed.declared_manager, Some(PackageManager::Poetry));
        assert_eq!(parsed.dependencies.get("requests").map(String::as_str), Some(">=2.31"));
        assert_eq!(parsed.dependencies.get("rich").map(String::as_str), Some("*"));
        assert_eq!(parsed.dependencies.get("httpx").map(String::as_str), Some("^0.27"));
        assert!(!parsed.dependencies.contains_key("python"));
    }

    #[test]
    fn go_mod_reads_require_block() {
        let parsed = parse_manifest(
            ManifestKind::GoMod,
            p(),
            "module example.com/app\n\ngo 1.22\n\nrequire (\n\tgithub.com/spf13/cobra v1.8.0\n\tgolang.org/x/sync v0.6.0 // indirect\n)\nrequire github.com/pkg/errors v0.9.1\n",
        )
        .unwrap();

        assert_eq!(parsed.dependencies.len(), 3);
        assert_eq!(
            parsed.dependencies.get("golang.org/x/sync").map(String::as_str),
            Some("v0.6.0")
        );
        assert!(parse_manifest(ManifestKind::GoMod, p(), "go 1.22\n").is_err());
    }

    #[test]
    fn declared_manager_parsing() {
        assert_eq!(PackageManager::from_declared("yarn@4.1.0"), Some(PackageManager::Yarn));
        assert_eq!(PackageManager::from_declared("something"), None);
    }

    #[test]
    fn lock_file_priority() {
        assert_eq!(PackageManager::from_lock_files(["bun.lockb"]), Some(PackageManager::Bun));
        assert_eq!(
            PackageManager::from_lock_files(["package-lock.json", "yarn.lock", "pnpm-lock.yaml"]),
            Some(PackageManager::Pnpm)
        );
        assert_eq!(PackageManager::from_lock_files(["Cargo.lock", "README.md"]), None);
    }
}
