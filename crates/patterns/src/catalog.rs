use crate::builtin::builtin_definitions;
use crate::detector::{Detector, RegexDetector};
use crate::domain::Domain;
use crate::error::{PatternError, Result};
use crate::types::PatternDefinition;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::fmt;

/// A definition together with its compiled file filter and detector
pub struct CatalogEntry {
    definition: PatternDefinition,
    files: GlobSet,
    detector: Box<dyn Detector>,
}

impl CatalogEntry {
    pub fn definition(&self) -> &PatternDefinition {
        &self.definition
    }

    /// Whether the entry applies to this relative, forward-slash path
    pub fn applies_to(&self, path: &str) -> bool {
        self.files.is_match(path)
    }

    pub fn detector(&self) -> &dyn Detector {
        self.detector.as_ref()
    }
}

impl fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("id", &self.definition.id)
            .field("domain", &self.definition.domain)
            .finish_non_exhaustive()
    }
}

/// Immutable, validated registry of detectors.
///
/// Built explicitly and handed to the matcher; there is no global catalog.
#[derive(Debug)]
pub struct PatternCatalog {
    entries: Vec<CatalogEntry>,
}

impl PatternCatalog {
    /// Validate and compile a list of regex-backed definitions.
    pub fn new(definitions: Vec<PatternDefinition>) -> Result<Self> {
        let mut entries = Vec::with_capacity(definitions.len());
        let mut seen = HashSet::new();

        for definition in definitions {
            Self::validate(&definition, &mut seen)?;
            let detector = RegexDetector::compile(&definition.id, &definition.code_patterns)?;
            let files = compile_globs(&definition)?;
            entries.push(CatalogEntry {
                definition,
                files,
                detector: Box::new(detector),
            });
        }

        Ok(Self { entries })
    }

    /// Register a definition backed by a custom detector.
    pub fn with_detector(
        mut self,
        definition: PatternDefinition,
        detector: Box<dyn Detector>,
    ) -> Result<Self> {
        let mut seen: HashSet<String> = self
            .entries
            .iter()
            .map(|entry| entry.definition.id.clone())
            .collect();
        Self::validate_identity(&definition, &mut seen)?;
        let files = compile_globs(&definition)?;
        self.entries.push(CatalogEntry {
            definition,
            files,
            detector,
        });
        Ok(self)
    }

    /// The built-in catalog.
    pub fn builtin() -> Result<Self> {
        Self::new(builtin_definitions())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// All definitions in registration order
    pub fn definitions(&self) -> Vec<&PatternDefinition> {
        self.entries.iter().map(|entry| &entry.definition).collect()
    }

    pub fn by_domain(&self, domain: Domain) -> Vec<&PatternDefinition> {
        self.entries
            .iter()
            .map(|entry| &entry.definition)
            .filter(|definition| definition.domain == domain)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn validate(definition: &PatternDefinition, seen: &mut HashSet<String>) -> Result<()> {
        Self::validate_identity(definition, seen)?;
        if definition.code_patterns.is_empty() {
            return Err(PatternError::EmptyPattern(definition.id.clone()));
        }
        Ok(())
    }

    fn validate_identity(definition: &PatternDefinition, seen: &mut HashSet<String>) -> Result<()> {
        if !seen.insert(definition.id.clone()) {
            return Err(PatternError::DuplicateId(definition.id.clone()));
        }
        let value = definition.confidence_base;
        if !(0.0..=1.0).contains(&value) {
            return Err(PatternError::ConfidenceOutOfRange {
                id: definition.id.clone(),
                value,
            });
        }
        Ok(())
    }
}

fn compile_globs(definition: &PatternDefinition) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in &definition.file_patterns {
        let glob = Glob::new(pattern).map_err(|source| PatternError::InvalidGlob {
            id: definition.id.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| PatternError::InvalidGlob {
        id: definition.id.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::MatchSpan;

    fn def(id: &str, confidence: f32) -> PatternDefinition {
        PatternDefinition::new(
            id,
            &[Domain::Utility],
            "test",
            &["**/*.ts"],
            &["needle"],
            confidence,
        )
    }

    struct AlwaysFirstByte;

    impl Detector for AlwaysFirstByte {
        fn find(&self, _path: &str, content: &str) -> Option<MatchSpan> {
            (!content.is_empty()).then_some(MatchSpan { start: 0, end: 1 })
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = PatternCatalog::new(vec![def("a", 0.5), def("a", 0.6)]).unwrap_err();
        assert!(matches!(err, PatternError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn rejects_out_of_range_confidence() {
        assert!(matches!(
            PatternCatalog::new(vec![def("a", 1.5)]),
            Err(PatternError::ConfidenceOutOfRange { .. })
        ));
        assert!(matches!(
            PatternCatalog::new(vec![def("a", -0.1)]),
            Err(PatternError::ConfidenceOutOfRange { .. })
        ));
        assert!(matches!(
            PatternCatalog::new(vec![def("a", f32::NAN)]),
            Err(PatternError::ConfidenceOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_invalid_glob() {
        let mut bad = def("a", 0.5);
        bad.file_patterns = vec!["**/{unclosed".to_string()];
        assert!(matches!(
            PatternCatalog::new(vec![bad]),
            Err(PatternError::InvalidGlob { .. })
        ));
    }

    #[test]
    fn globs_match_root_and_nested_files() {
        let catalog = PatternCatalog::new(vec![def("a", 0.5)]).unwrap();
        let entry = &catalog.entries()[0];
        assert!(entry.applies_to("main.ts"));
        assert!(entry.applies_to("src/deep/main.ts"));
        assert!(!entry.applies_to("src/main.py"));
    }

    #[test]
    fn custom_detectors_share_id_validation() {
        let catalog = PatternCatalog::new(vec![def("a", 0.5)]).unwrap();
        let err = catalog
            .with_detector(def("a", 0.5), Box::new(AlwaysFirstByte))
            .unwrap_err();
        assert!(matches!(err, PatternError::DuplicateId(_)));

        let catalog = PatternCatalog::new(vec![def("a", 0.5)])
            .unwrap()
            .with_detector(def("b", 0.5), Box::new(AlwaysFirstByte))
            .unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.entries()[1].detector().find("x.ts", "x").is_some());
    }

    #[test]
    fn by_domain_filters_definitions() {
        let mut http = def("b", 0.5);
        http.domain = Domain::HttpClient;
        let catalog = PatternCatalog::new(vec![def("a", 0.5), http]).unwrap();
        let ids: Vec<_> = catalog
            .by_domain(Domain::HttpClient)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b"]);
    }
}
