use once_cell::sync::Lazy;
use regex::Regex;

static REEXPORTS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        // export * from './a'; export * as b from './b'; export { c } from './c'
        r#"(?m)^[^\S\n]*export[^\S\n]+(?:type[^\S\n]+)?(?:\*(?:[^\S\n]+as[^\S\n]+[\w$]{1,128})?|\{[^}]{0,4096}\})[^\S\n]*from[^\S\n]*['"]"#,
        // from .models import User
        r"(?m)^[^\S\n]*from[^\S\n]+\.[\w.]{0,256}[^\S\n]+import[^\S\n]",
        // pub use self::a::B;
        r"(?m)^[^\S\n]*pub(?:\([^)\n]{0,64}\))?[^\S\n]+use[^\S\n]",
    ])
});

static DEFAULT_EXPORT: Lazy<Vec<Regex>> =
    Lazy::new(|| compile(&[r"(?m)^[^\S\n]*export[^\S\n]+default\b"]));

static NAMED_DECLARATION: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?m)^[^\S\n]*export[^\S\n]+(?:declare[^\S\n]+)?(?:async[^\S\n]+)?(?:const|let|var|function\*?|class|enum|interface|type|namespace|abstract[^\S\n]+class)[^\S\n]+[A-Za-z_$]",
    ])
});

/// `export { a, b as c };` without a `from` clause
static EXPORT_LIST: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[r"(?m)^[^\S\n]*export[^\S\n]*\{([^}]{0,4096})\}[^\S\n]*;?[^\S\n]*$"])
});

fn compile(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .filter_map(|source| match Regex::new(source) {
            Ok(re) => Some(re),
            Err(e) => {
                log::warn!("Export pattern failed to compile: {e}");
                None
            }
        })
        .collect()
}

/// `index.*`, `__init__.py` and `mod.rs` aggregate their siblings
pub fn is_barrel_file(file_name: &str) -> bool {
    file_name.split('.').next() == Some("index")
        || file_name == "__init__.py"
        || file_name == "mod.rs"
}

/// Re-export statements in a barrel file
pub fn count_reexports(content: &str) -> usize {
    REEXPORTS.iter().map(|re| re.find_iter(content).count()).sum()
}

/// Default and named export counts of a JS/TS module
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportShape {
    pub default_exports: usize,
    pub named_exports: usize,
}

impl ExportShape {
    pub fn of(content: &str) -> Self {
        let mut shape = ExportShape {
            default_exports: DEFAULT_EXPORT.iter().map(|re| re.find_iter(content).count()).sum(),
            named_exports: NAMED_DECLARATION
                .iter()
                .map(|re| re.find_iter(content).count())
                .sum(),
        };

        for caps in EXPORT_LIST.iter().flat_map(|re| re.captures_iter(content)) {
            let Some(list) = caps.get(1) else { continue };
            for item in list.as_str().split(',').map(str::trim).filter(|i| !i.is_empty()) {
                let exported_as = item.rsplit(char::is_whitespace).next().unwrap_or(item);
                if exported_as == "default" {
                    shape.default_exports += 1;
                } else {
                    shape.named_exports += 1;
                }
            }
        }
        shape
    }

    /// Exactly one default export beside at least `min_named` named ones
    pub fn is_mixed(&self, min_named: usize) -> bool {
        self.default_exports == 1 && self.named_exports >= min_named
    }
}
