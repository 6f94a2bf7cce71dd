use audit_workspace::Language;
use once_cell::sync::Lazy;
use regex::Regex;

/// A relative module specifier: `.`, `..`, `./x`, `../x/y`
const SPECIFIER: &str = r#"(\.{1,2}(?:/[^'"\n]{0,256})?)"#;

static ECMASCRIPT: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        // import x from './a'; export { y } from '../b'
        format!(r#"\b(?:import|export)\s[^'";]{{0,512}}?\bfrom\s*['"]{SPECIFIER}['"]"#),
        // import './polyfill'
        format!(r#"\bimport\s*['"]{SPECIFIER}['"]"#),
        // require('./a'), import('./a')
        format!(r#"\b(?:require|import)\s*\(\s*['"]{SPECIFIER}['"]\s*\)"#),
    ])
});

static PYTHON: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?m)^[^\S\n]*from[^\S\n]+(\.{1,8})([A-Za-z_][\w.]{0,255})?[^\S\n]+import[^\S\n]+([^\n#]{1,512})"
            .to_string(),
    ])
});

static C_INCLUDE: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[r#"(?m)^[^\S\n]*#[^\S\n]*include[^\S\n]*"(\.{1,2}/[^"\n]{1,256})""#.to_string()])
});

fn compile(sources: &[String]) -> Vec<Regex> {
    sources
        .iter()
        .filter_map(|source| match Regex::new(source) {
            Ok(re) => Some(re),
            Err(e) => {
                log::warn!("Import pattern failed to compile: {e}");
                None
            }
        })
        .collect()
}

/// Relative import specifiers written in `content`, in source order, deduplicated.
///
/// Python relative imports come back in slash form (`from ..a.b import c`
/// yields `../a/b`). Package imports are never returned.
pub fn extract_imports(path: &str, content: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = match Language::from_path(path) {
        Language::TypeScript | Language::JavaScript => ECMASCRIPT
            .iter()
            .flat_map(|re| re.captures_iter(content))
            .filter_map(|caps| {
                let m = caps.get(1)?;
                Some((m.start(), m.as_str().to_string()))
            })
            .collect(),
        Language::Python => PYTHON
            .iter()
            .flat_map(|re| re.captures_iter(content))
            .flat_map(|caps| {
                let start = caps.get(0).map_or(0, |m| m.start());
                python_specifiers(
                    caps.get(1).map_or("", |m| m.as_str()),
                    caps.get(2).map(|m| m.as_str()),
                    caps.get(3).map_or("", |m| m.as_str()),
                )
                .into_iter()
                .map(move |spec| (start, spec))
            })
            .collect(),
        Language::C | Language::Cpp => C_INCLUDE
            .iter()
            .flat_map(|re| re.captures_iter(content))
            .filter_map(|caps| {
                let m = caps.get(1)?;
                Some((m.start(), m.as_str().to_string()))
            })
            .collect(),
        _ => Vec::new(),
    };

    found.sort_by_key(|(offset, _)| *offset);
    let mut specifiers: Vec<String> = Vec::with_capacity(found.len());
    for (_, spec) in found {
        if !specifiers.contains(&spec) {
            specifiers.push(spec);
        }
    }
    specifiers
}

fn python_specifiers(dots: &str, module: Option<&str>, names: &str) -> Vec<String> {
    let base = match dots.len() {
        0 => return Vec::new(),
        1 => ".".to_string(),
        n => vec![".."; n - 1].join("/"),
    };

    if let Some(module) = module.filter(|m| !m.is_empty()) {
        return vec![format!("{base}/{}", module.replace('.', "/"))];
    }

    // `from . import a, b as c` imports sibling modules a and b.
    names
        .split(',')
        .filter_map(|name| {
            let name = name.trim().trim_start_matches('(').trim_end_matches(')').trim();
            let name = name.split_whitespace().next()?;
            let valid = name != "*"
                && name
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_');
            valid.then(|| format!("{base}/{name}"))
        })
        .collect()
}
