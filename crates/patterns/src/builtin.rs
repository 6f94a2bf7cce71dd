//! Built-in detector definitions.
//!
//! Every "any character" window carries an explicit upper bound so that a
//! single large file cannot make one regex scan unboundedly far.

use crate::domain::Domain;
use crate::types::PatternDefinition;

const JS: &[&str] = &["**/*.{js,jsx,ts,tsx,mjs,cjs}"];
const PY: &[&str] = &["**/*.py"];

/// Definitions in a stable order.
pub fn builtin_definitions() -> Vec<PatternDefinition> {
    vec![
        // Date & time
        PatternDefinition::new(
            "date-format-manual",
            &[Domain::DateTime],
            "Date string assembled by hand from getFullYear/getMonth",
            JS,
            &[
                r"\.getFullYear\(\)[^\n]{0,160}\.getMonth\(\)\s*\+\s*1",
                r"String\(\s*[\w$]{1,40}\.get(?:Date|Month|Hours|Minutes)\(\)[^\n]{0,20}\)\.padStart\(\s*2",
            ],
            0.8,
        ),
        PatternDefinition::new(
            "relative-time-manual",
            &[Domain::DateTime, Domain::Utility],
            "Relative time (\"5 minutes ago\") computed with millisecond arithmetic",
            JS,
            &[
                r"(?:Date\.now\(\)|new Date\(\)\.getTime\(\))\s*-[^\n]{0,120}?/\s*\(?\s*(?:1000\s*\*\s*60|60\s*\*\s*1000|60000|3600000|86400000)",
                r#"(?:minutes?|hours?|days?) ago[`'"]"#,
            ],
            0.65,
        ),
        PatternDefinition::new(
            "date-arithmetic-manual",
            &[Domain::DateTime],
            "Calendar arithmetic through setDate/getDate or hard-coded day lengths",
            JS,
            &[
                r"\.setDate\(\s*[\w$]{1,40}\.getDate\(\)\s*[+-]",
                r"\*\s*24\s*\*\s*60\s*\*\s*60\s*\*\s*1000",
            ],
            0.6,
        ),
        // Validation & forms
        PatternDefinition::new(
            "email-regex-validation",
            &[Domain::Validation],
            "Hand-written e-mail regular expression",
            JS,
            &[
                r"/\^[^/\n]{0,120}@[^/\n]{0,120}\$/[a-z]{0,6}\s*\.test\(",
                r"(?i)const\s+[\w$]{0,30}email[\w$]{0,30}\s*=\s*/\^[^/\n]{0,120}@",
            ],
            0.75,
        ),
        PatternDefinition::new(
            "manual-type-validation",
            &[Domain::Validation],
            "Schema validation written as typeof checks and thrown errors",
            JS,
            &[
                r#"typeof\s+[\w$.]{1,80}\s*!==?\s*['"](?:string|number|boolean|object)['"][\s\S]{0,240}?throw\s+new\s+[\w$]{0,40}Error"#,
                r"errors\.push\([^\n]{0,80}(?:is required|must be|is invalid)",
            ],
            0.55,
        ),
        PatternDefinition::new(
            "form-state-manual",
            &[Domain::Forms, Domain::StateManagement],
            "Form values and errors tracked with ad-hoc useState hooks",
            JS,
            &[
                r"const\s+\[\s*(?:errors|formErrors|touched)\s*,\s*set[\w$]{1,40}\s*\]\s*=\s*useState",
                r"const\s+\[\s*(?:values|formData|formValues|formState)\s*,\s*set[\w$]{1,40}\s*\]\s*=\s*useState",
            ],
            0.7,
        ),
        // HTTP & data fetching
        PatternDefinition::new(
            "fetch-retry-loop",
            &[Domain::HttpClient],
            "Retry loop wrapped around fetch/axios",
            JS,
            &[
                r"(?:for|while)\s*\([^)\n]{0,120}(?:retry|retries|attempt)[^)\n]{0,120}\)[\s\S]{0,400}?\b(?:fetch|axios(?:\.[a-z]{3,7})?)\s*\(",
            ],
            0.7,
        ),
        PatternDefinition::new(
            "fetch-wrapper",
            &[Domain::HttpClient],
            "Custom request helper wrapping fetch",
            JS,
            &[
                r"(?i)(?:async\s+function\s+|const\s+)[\w$]{0,40}(?:request|fetcher|apiclient|httpclient|http)[\w$]{0,40}\s*(?:=\s*async\s*)?\([^)\n]{0,200}\)[\s\S]{0,300}?await\s+fetch\(",
            ],
            0.55,
        ),
        PatternDefinition::new(
            "hardcoded-api-url",
            &[Domain::HttpClient, Domain::Architecture],
            "Absolute URL passed straight to an HTTP call",
            JS,
            &[r#"\b(?:fetch|axios\.(?:get|post|put|patch|delete))\(\s*[`'"]https?://"#],
            0.5,
        ),
        PatternDefinition::new(
            "fetch-in-effect",
            &[Domain::DataFetching, Domain::HttpClient],
            "Server state loaded inside useEffect with manual loading flags",
            JS,
            &[
                r"useEffect\(\s*(?:async\s*)?\(\s*\)\s*=>\s*\{[\s\S]{0,400}?\bfetch\(",
                r"const\s+\[\s*(?:loading|isLoading)\s*,\s*set[\w$]{1,40}\s*\]\s*=\s*useState\(\s*(?:true|false)\s*\)[\s\S]{0,400}?\bfetch\(",
            ],
            0.65,
        ),
        PatternDefinition::new(
            "manual-request-cache",
            &[Domain::DataFetching, Domain::Utility],
            "Response cache kept in a module-level Map",
            JS,
            &[r"(?i)(?:const|let)\s+[\w$]{0,30}cache[\w$]{0,30}\s*(?::\s*Map<[^>\n]{0,80}>\s*)?=\s*new\s+Map\("],
            0.5,
        ),
        // State
        PatternDefinition::new(
            "event-emitter-store",
            &[Domain::StateManagement],
            "Global store built from a listener set and manual notification",
            JS,
            &[
                r"(?:listeners|subscribers)\s*(?::[^=\n]{0,80})?=\s*(?:new\s+Set\([^)\n]{0,40}\)|\[\s*\])[\s\S]{0,400}?(?:listeners|subscribers)\.forEach\(",
            ],
            0.6,
        ),
        PatternDefinition::new(
            "context-reducer-store",
            &[Domain::StateManagement],
            "App-wide store assembled from createContext and useReducer",
            JS,
            &[r"createContext\([\s\S]{0,600}?useReducer\("],
            0.55,
        ),
        // General utilities
        PatternDefinition::new(
            "debounce-manual",
            &[Domain::Utility],
            "Hand-rolled debounce",
            JS,
            &[
                r"clearTimeout\(\s*[\w$.]{1,40}\s*\)\s*;?\s*[\w$.]{1,40}\s*=\s*setTimeout\(",
                r"function\s+debounce\s*\(",
            ],
            0.8,
        ),
        PatternDefinition::new(
            "throttle-manual",
            &[Domain::Utility],
            "Hand-rolled throttle",
            JS,
            &[
                r"function\s+throttle\s*\(",
                r"(?:Date\.now|performance\.now)\(\)\s*-\s*last[\w$]{0,30}\s*[<>]=?",
            ],
            0.7,
        ),
        PatternDefinition::new(
            "deep-clone-json",
            &[Domain::Utility],
            "Deep clone through a JSON round trip",
            JS,
            &[r"JSON\.parse\(\s*JSON\.stringify\(", r"function\s+deepClone\s*\("],
            0.85,
        ),
        PatternDefinition::new(
            "deep-merge-manual",
            &[Domain::Utility],
            "Recursive object merge",
            JS,
            &[
                r"function\s+(?:deepMerge|mergeDeep|deepAssign)\s*\(",
                r"const\s+(?:deepMerge|mergeDeep|deepAssign)\s*=",
            ],
            0.7,
        ),
        PatternDefinition::new(
            "deep-equal-manual",
            &[Domain::Utility],
            "Recursive structural equality",
            JS,
            &[
                r"function\s+(?:deepEqual|isDeepEqual|deepCompare|isEqual)\s*\(",
                r"const\s+(?:deepEqual|isDeepEqual|deepCompare|isEqual)\s*=",
            ],
            0.7,
        ),
        // Crypto & identifiers
        PatternDefinition::new(
            "uuid-manual",
            &[Domain::Crypto, Domain::Utility],
            "Identifier generated from Math.random or a UUID template",
            JS,
            &[
                r#"['"`]xxxxxxxx-xxxx-4xxx-[xy]xxx-xxxxxxxxxxxx['"`]"#,
                r"Math\.random\(\)\.toString\(\s*(?:16|36)\s*\)\.(?:substr|substring|slice)\(",
            ],
            0.85,
        ),
        PatternDefinition::new(
            "string-hash-manual",
            &[Domain::Crypto],
            "Shift-and-subtract string hash",
            JS,
            &[
                r"\(\s*[\w$]{1,20}\s*<<\s*5\s*\)\s*-\s*[\w$]{1,20}",
                r"\bhash\s*=\s*hash\s*&\s*hash\b",
            ],
            0.6,
        ),
        // Parsing
        PatternDefinition::new(
            "csv-parse-manual",
            &[Domain::Parsing],
            "CSV parsed by splitting lines and commas",
            JS,
            &[
                r#"\.split\(\s*(?:['"](?:\\r)?\\n['"]|/(?:\\r)?\\n/[a-z]{0,3})\s*\)[\s\S]{0,300}?\.split\(\s*['"],['"]\s*\)"#,
            ],
            0.7,
        ),
        PatternDefinition::new(
            "query-string-manual",
            &[Domain::Parsing, Domain::HttpClient],
            "Query string parsed by hand",
            JS,
            &[
                r#"\.split\(\s*['"]&['"]\s*\)[\s\S]{0,200}?\.split\(\s*['"]=['"]\s*\)"#,
                r"location\.search\.(?:substring|slice|substr)\(\s*1\s*\)",
            ],
            0.65,
        ),
        PatternDefinition::new(
            "markdown-regex-render",
            &[Domain::Parsing],
            "Markdown rendered through chained regex replacements",
            JS,
            &[
                r"/\\\*\\\*\(\.[+*]\??\)\\\*\\\*/",
                r"\.replace\(\s*/\^#{1,6}\s?\(\.[+*]\??\)\$?/[a-z]{0,3}",
            ],
            0.6,
        ),
        PatternDefinition::new(
            "python-argv-parse",
            &[Domain::Parsing],
            "Command-line arguments read straight from sys.argv",
            PY,
            &[
                r"sys\.argv\[\s*[1-9]\s*\]",
                r"for\s+\w{1,20}\s+in\s+sys\.argv\[\s*1\s*:\s*\]",
            ],
            0.55,
        ),
        // Styling
        PatternDefinition::new(
            "classnames-manual",
            &[Domain::Styling],
            "Conditional class names joined by hand",
            JS,
            &[
                r#"\[[^\]\n]{0,300}\]\s*\.filter\(\s*Boolean\s*\)\s*\.join\(\s*['"] ['"]\s*\)"#,
                r#"className=\{`[^`\n]{0,200}\$\{[^}\n]{0,120}\?\s*['"][^'"\n]{0,60}['"]\s*:\s*['"]['"]\s*\}"#,
            ],
            0.6,
        ),
        // Internationalization
        PatternDefinition::new(
            "currency-format-manual",
            &[Domain::Internationalization, Domain::Utility],
            "Number/currency formatting with thousands-separator regex",
            JS,
            &[
                r"\\B\(\?=\(\\d\{3\}\)\+\(\?!\\d\)\)",
                r#"['"]\$['"]\s*\+\s*[\w$.]{1,60}\.toFixed\(\s*2\s*\)"#,
            ],
            0.65,
        ),
        PatternDefinition::new(
            "pluralization-manual",
            &[Domain::Internationalization],
            "Plural forms chosen with a count === 1 ternary",
            JS,
            &[
                r#"[\w$.]{1,40}\s*===?\s*1\s*\?\s*['"][^'"\n]{0,40}['"]\s*:\s*['"][^'"\n]{0,40}s['"]"#,
            ],
            0.5,
        ),
        PatternDefinition::new(
            "translation-dictionary",
            &[Domain::Internationalization],
            "Inline per-locale message dictionary",
            JS,
            &[
                r#"(?:translations|messages|locales|dictionary)\s*(?::[^=\n]{0,80})?=\s*\{\s*['"]?(?:en|en-US|en_US)['"]?\s*:\s*\{"#,
            ],
            0.6,
        ),
        // Logging
        PatternDefinition::new(
            "console-logger-wrapper",
            &[Domain::Logging],
            "Home-grown logger over console with level tables",
            JS,
            &[
                r"(?i)(?:LOG_LEVELS|logLevels|levels)\s*=\s*\{\s*(?:debug|trace|error)\s*:\s*\d",
                r"(?:const|function)\s+(?:createLogger|logger|log)\b[\s\S]{0,200}?console\.(?:log|info|warn|error|debug)\(",
            ],
            0.55,
        ),
        // Accessibility
        PatternDefinition::new(
            "focus-trap-manual",
            &[Domain::Accessibility],
            "Focus trap built from a focusable-elements selector",
            JS,
            &[
                r#"querySelectorAll\(\s*['"`][^'"`\n]{0,300}(?:button|\[href\])[^'"`\n]{0,300}tabindex"#,
            ],
            0.6,
        ),
        // Architecture
        PatternDefinition::new(
            "deep-relative-import",
            &[Domain::Architecture],
            "Import climbing three or more directories",
            JS,
            &[r#"(?:\bfrom\s*|\brequire\(\s*|\bimport\(\s*|\bimport\s+)['"](?:\.\./){3,16}"#],
            0.9,
        ),
        // Python HTTP
        PatternDefinition::new(
            "python-retry-loop",
            &[Domain::HttpClient],
            "Retry loop around requests calls",
            PY,
            &[
                r"for\s+\w{1,20}\s+in\s+range\([^)\n]{0,40}\)\s*:[\s\S]{0,400}?requests\.(?:get|post|put|patch|delete)\(",
            ],
            0.65,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PatternCatalog;
    use std::collections::HashSet;

    /// Unbounded "any character" or identifier windows
    const UNBOUNDED: &[&str] = &[".*", ".+", "]*", "]+", r"\w+", r"\w*", r"\S+", r"\S*"];

    #[test]
    fn builtin_catalog_compiles() {
        let catalog = PatternCatalog::builtin().expect("builtin catalog");
        assert_eq!(catalog.len(), builtin_definitions().len());
    }

    #[test]
    fn ids_are_unique_and_confidence_in_range() {
        let mut ids = HashSet::new();
        for def in builtin_definitions() {
            assert!(ids.insert(def.id.clone()), "duplicate id {}", def.id);
            assert!(
                (0.0..=1.0).contains(&def.confidence_base),
                "{} confidence {}",
                def.id,
                def.confidence_base
            );
            assert!(!def.file_patterns.is_empty(), "{} has no file patterns", def.id);
        }
    }

    #[test]
    fn every_live_domain_has_a_detector() {
        let covered: HashSet<Domain> = builtin_definitions().iter().map(|d| d.domain).collect();
        for domain in Domain::ALL {
            if domain.is_deferred() {
                continue;
            }
            assert!(covered.contains(&domain), "domain {domain} has no detector");
        }
    }

    #[test]
    fn match_windows_are_bounded() {
        for def in builtin_definitions() {
            for source in &def.code_patterns {
                for token in UNBOUNDED {
                    assert!(
                        !source.contains(token),
                        "{} uses unbounded window {token:?} in {source}",
                        def.id
                    );
                }
            }
        }
    }

    #[test]
    fn multi_domain_definitions_resolve_to_most_specific() {
        let defs = builtin_definitions();
        let domain_of = |id: &str| defs.iter().find(|d| d.id == id).map(|d| d.domain);
        assert_eq!(domain_of("hardcoded-api-url"), Some(Domain::HttpClient));
        assert_eq!(domain_of("fetch-in-effect"), Some(Domain::DataFetching));
        assert_eq!(domain_of("form-state-manual"), Some(Domain::Forms));
        assert_eq!(domain_of("currency-format-manual"), Some(Domain::Internationalization));
    }
}
