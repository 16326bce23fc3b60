//! Pattern catalog: the ordered skip and token patterns a scanner matches against
//!
//! A catalog is built once, is immutable afterwards and is shared by reference
//! with every scanner. Every pattern is compiled anchored, so it can only match
//! at the start of the region it is handed. Region bounds are opaque: `\A`, `^`
//! and `\b` see the region start as the start of the text.

pub mod lexicon;

use crate::config::compile_time::lexicon::{
    MAX_PATTERN_COUNT, MAX_PATTERN_LENGTH, REGEX_SIZE_LIMIT,
};
use crate::logging::codes;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

pub use lexicon::{load_lexicon, parse_lexicon, standard_lexicon, LexiconError};

/// Which of the two pattern lists a declaration belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Skip,
    Token,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternKind::Skip => write!(f, "skip"),
            PatternKind::Token => write!(f, "token"),
        }
    }
}

/// Catalog construction errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate skip name: {name}")]
    DuplicateSkip { name: String },

    #[error("duplicate token name: {name}")]
    DuplicateToken { name: String },

    #[error("no tokens specified")]
    NoTokens,

    #[error("too many patterns: {count} (max {MAX_PATTERN_COUNT})")]
    TooManyPatterns { count: usize },

    #[error("{kind} pattern {name} too long: {length} bytes (max {MAX_PATTERN_LENGTH})")]
    PatternTooLong {
        kind: PatternKind,
        name: String,
        length: usize,
    },

    #[error("invalid {kind} pattern {name}: {source}")]
    InvalidPattern {
        kind: PatternKind,
        name: String,
        #[source]
        source: regex::Error,
    },
}

impl CatalogError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            CatalogError::DuplicateSkip { .. } | CatalogError::DuplicateToken { .. } => {
                codes::lexicon::DUPLICATE_NAME
            }
            CatalogError::NoTokens => codes::lexicon::NO_TOKENS,
            CatalogError::TooManyPatterns { .. } => codes::lexicon::TOO_MANY_PATTERNS,
            CatalogError::PatternTooLong { .. } => codes::lexicon::PATTERN_TOO_LONG,
            CatalogError::InvalidPattern { .. } => codes::lexicon::INVALID_PATTERN,
        }
    }
}

/// Shared token name, used as the token kind of lexicon-built catalogs
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// One named pattern with its compiled, anchored matcher
#[derive(Debug, Clone)]
pub struct PatternEntry<T> {
    tag: T,
    name: String,
    matcher: Regex,
}

impl<T> PatternEntry<T> {
    pub fn tag(&self) -> &T {
        &self.tag
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source text of the pattern as declared
    pub fn pattern(&self) -> &str {
        // Strip the `\A(?:` ... `)` wrapper added at compile time
        let anchored = self.matcher.as_str();
        &anchored[5..anchored.len() - 1]
    }

    /// End offset of a match starting exactly at `start`, within `line[start..end]`
    pub fn match_at(&self, line: &str, start: usize, end: usize) -> Option<usize> {
        self.matcher
            .find(&line[start..end])
            .map(|found| start + found.end())
    }
}

fn compile_anchored(kind: PatternKind, name: &str, pattern: &str) -> Result<Regex, CatalogError> {
    RegexBuilder::new(&format!(r"\A(?:{})", pattern))
        .multi_line(true)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|source| CatalogError::InvalidPattern {
            kind,
            name: name.to_string(),
            source,
        })
}

/// Ordered skip and token patterns
#[derive(Debug, Clone)]
pub struct PatternCatalog<K> {
    skips: Vec<PatternEntry<String>>,
    values: Vec<PatternEntry<K>>,
}

impl<K> PatternCatalog<K> {
    pub fn builder() -> CatalogBuilder<K> {
        CatalogBuilder::new()
    }

    pub fn skip_patterns(&self) -> &[PatternEntry<String>] {
        &self.skips
    }

    pub fn value_patterns(&self) -> &[PatternEntry<K>] {
        &self.values
    }

    /// Total number of declared patterns
    pub fn len(&self) -> usize {
        self.skips.len() + self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Furthest non-empty skip match at `start`, trying every skip pattern
    pub fn furthest_skip(&self, line: &str, start: usize, end: usize) -> Option<usize> {
        self.skips
            .iter()
            .filter_map(|entry| entry.match_at(line, start, end))
            .filter(|&stop| stop > start)
            .max()
    }

    /// Longest token match at `start`; ties keep the first-declared pattern and
    /// empty matches never win
    pub fn longest_value_match(&self, line: &str, start: usize, end: usize) -> Option<(&K, usize)> {
        let mut match_end = start;
        let mut found = None;

        for entry in &self.values {
            if let Some(stop) = entry.match_at(line, start, end) {
                if stop > match_end {
                    match_end = stop;
                    found = Some(&entry.tag);
                }
            }
        }

        found.map(|tag| (tag, match_end))
    }
}

/// Collects declarations in order; all validation happens in `build`
pub struct CatalogBuilder<K> {
    skips: Vec<(String, String)>,
    values: Vec<(K, String, String)>,
}

impl<K> Default for CatalogBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> CatalogBuilder<K> {
    pub fn new() -> Self {
        Self {
            skips: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Declare a skip pattern; matches are discarded
    pub fn skip(mut self, name: &str, pattern: &str) -> Self {
        self.skips.push((name.to_string(), pattern.to_string()));
        self
    }

    /// Declare a token pattern producing tokens of `kind`
    pub fn token(mut self, kind: K, name: &str, pattern: &str) -> Self {
        self.values
            .push((kind, name.to_string(), pattern.to_string()));
        self
    }

    pub fn build(self) -> Result<PatternCatalog<K>, CatalogError> {
        let count = self.skips.len() + self.values.len();
        if count > MAX_PATTERN_COUNT {
            return Err(CatalogError::TooManyPatterns { count });
        }
        if self.values.is_empty() {
            return Err(CatalogError::NoTokens);
        }

        let mut seen = HashSet::new();
        let mut skips = Vec::with_capacity(self.skips.len());
        for (name, pattern) in self.skips {
            if !seen.insert(name.clone()) {
                return Err(CatalogError::DuplicateSkip { name });
            }
            check_length(PatternKind::Skip, &name, &pattern)?;
            let matcher = compile_anchored(PatternKind::Skip, &name, &pattern)?;
            skips.push(PatternEntry {
                tag: name.clone(),
                name,
                matcher,
            });
        }

        // Skip and token names live in separate namespaces
        let mut seen = HashSet::new();
        let mut values = Vec::with_capacity(self.values.len());
        for (kind, name, pattern) in self.values {
            if !seen.insert(name.clone()) {
                return Err(CatalogError::DuplicateToken { name });
            }
            check_length(PatternKind::Token, &name, &pattern)?;
            let matcher = compile_anchored(PatternKind::Token, &name, &pattern)?;
            values.push(PatternEntry {
                tag: kind,
                name,
                matcher,
            });
        }

        Ok(PatternCatalog { skips, values })
    }
}

fn check_length(kind: PatternKind, name: &str, pattern: &str) -> Result<(), CatalogError> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(CatalogError::PatternTooLong {
            kind,
            name: name.to_string(),
            length: pattern.len(),
        });
    }
    Ok(())
}
