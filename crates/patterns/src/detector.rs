use crate::error::{PatternError, Result};
use regex::{Regex, RegexBuilder};

/// Compiled-program ceiling per regex. Bounded windows like `[\s\S]{0,400}`
/// expand into large automata, so this is deliberately above the default.
const REGEX_SIZE_LIMIT: usize = 32 * 1024 * 1024;

/// Byte offsets of a match inside the file content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

/// A predicate over (file path, file content) producing zero or one match.
///
/// The engine only depends on this trait, so AST-backed detectors can be
/// plugged in next to the regex ones.
pub trait Detector: Send + Sync {
    fn find(&self, path: &str, content: &str) -> Option<MatchSpan>;
}

/// Ordered list of regexes; the first one that matches reports the span.
#[derive(Debug, Clone)]
pub struct RegexDetector {
    patterns: Vec<Regex>,
}

impl RegexDetector {
    pub fn compile(id: &str, sources: &[String]) -> Result<Self> {
        if sources.is_empty() {
            return Err(PatternError::EmptyPattern(id.to_string()));
        }

        let patterns = sources
            .iter()
            .map(|source| {
                RegexBuilder::new(source)
                    .size_limit(REGEX_SIZE_LIMIT)
                    .build()
                    .map_err(|source| PatternError::InvalidRegex {
                        id: id.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Detector for RegexDetector {
    fn find(&self, _path: &str, content: &str) -> Option<MatchSpan> {
        self.patterns.iter().find_map(|regex| {
            regex.find(content).map(|m| MatchSpan {
                start: m.start(),
                end: m.end(),
            })
        })
    }
}
