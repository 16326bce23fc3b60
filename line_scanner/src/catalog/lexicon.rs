//! Lexicon loader
//!
//! Reads the lexical section of a grammar file into a `PatternCatalog<Symbol>`.
//! Each significant line declares one pattern:
//!
//! ```text
//! skip WHITESPACE '\s+'
//! token NUM '\d+'
//! IDENT "[a-z]\w*"
//! ```
//!
//! A single word declares a token. Processing stops at a line holding only `%`.

use super::{CatalogError, PatternCatalog, PatternKind, Symbol};
use crate::config::compile_time::lexicon::{
    MAX_LEXICON_LINES, MAX_PATTERN_COUNT, MAX_PATTERN_LENGTH,
};
use crate::logging::codes;
use crate::{log_debug, log_success, log_warning};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Built-in lexicon used when no lexicon file is configured
pub const STANDARD_LEXICON: &str = r#"# General-purpose lexicon
skip WHITESPACE '\s+'
skip HASH_COMMENT '#.*'
skip SLASH_COMMENT '//.*'

token NUM '\d+(?:\.\d+)?'
token IDENT '[A-Za-z_]\w*'
token STRING '"(?:[^"\\]|\\.)*"'
token LPAREN '\('
token RPAREN '\)'
token LBRACE '\{'
token RBRACE '\}'
token LBRACKET '\['
token RBRACKET '\]'
token COMMA ','
token SEMI ';'
token OPERATOR '[-+*/%=<>!&|^~?:.]+'
%
"#;

/// Lexicon errors; everything except I/O carries the 1-based lexicon line
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("Cannot read lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("lexicon has more than {MAX_LEXICON_LINES} lines")]
    TooLong,

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: &'static str },

    #[error("line {line}: duplicate {kind} name: {name} (first declared on line {first_line})")]
    DuplicateName {
        line: usize,
        kind: PatternKind,
        name: String,
        first_line: usize,
    },

    #[error("line {line}: too many patterns (max {MAX_PATTERN_COUNT})")]
    TooManyPatterns { line: usize },

    #[error("line {line}: pattern too long: {length} bytes (max {MAX_PATTERN_LENGTH})")]
    PatternTooLong { line: usize, length: usize },

    #[error("no tokens specified")]
    NoTokens,

    #[error("line {line}: {source}")]
    Catalog {
        line: usize,
        #[source]
        source: CatalogError,
    },
}

impl LexiconError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexiconError::Io { .. } => codes::lexicon::LEXICON_READ_FAILURE,
            LexiconError::TooLong => codes::lexicon::LEXICON_TOO_LONG,
            LexiconError::Syntax { .. } => codes::lexicon::SPECIFICATION_SYNTAX,
            LexiconError::DuplicateName { .. } => codes::lexicon::DUPLICATE_NAME,
            LexiconError::TooManyPatterns { .. } => codes::lexicon::TOO_MANY_PATTERNS,
            LexiconError::PatternTooLong { .. } => codes::lexicon::PATTERN_TOO_LONG,
            LexiconError::NoTokens => codes::lexicon::NO_TOKENS,
            LexiconError::Catalog { source, .. } => source.error_code(),
        }
    }

    /// Lexicon line the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            LexiconError::Syntax { line, .. }
            | LexiconError::DuplicateName { line, .. }
            | LexiconError::TooManyPatterns { line }
            | LexiconError::PatternTooLong { line, .. }
            | LexiconError::Catalog { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// One parsed declaration line
#[derive(Debug, PartialEq, Eq)]
struct Declaration<'a> {
    kind: PatternKind,
    name: &'a str,
    pattern: &'a str,
}

/// Read and parse a lexicon file
pub fn load_lexicon(path: &Path) -> Result<PatternCatalog<Symbol>, LexiconError> {
    let text = fs::read_to_string(path).map_err(|source| LexiconError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log_debug!("Loading lexicon", "path" => path.display());
    parse_lexicon(&text)
}

/// Catalog for the built-in general-purpose lexicon
pub fn standard_lexicon() -> Result<PatternCatalog<Symbol>, LexiconError> {
    parse_lexicon(STANDARD_LEXICON)
}

/// Parse lexicon text into a catalog
pub fn parse_lexicon(text: &str) -> Result<PatternCatalog<Symbol>, LexiconError> {
    let mut builder = PatternCatalog::builder();
    let mut skip_lines: HashMap<&str, usize> = HashMap::new();
    let mut token_lines: HashMap<&str, usize> = HashMap::new();

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        if raw == "%" {
            break;
        }
        if line_number > MAX_LEXICON_LINES {
            return Err(LexiconError::TooLong);
        }

        let Some(declaration) = parse_line(raw, line_number)? else {
            continue;
        };

        if skip_lines.len() + token_lines.len() >= MAX_PATTERN_COUNT {
            return Err(LexiconError::TooManyPatterns { line: line_number });
        }
        if declaration.pattern.len() > MAX_PATTERN_LENGTH {
            return Err(LexiconError::PatternTooLong {
                line: line_number,
                length: declaration.pattern.len(),
            });
        }

        let lines = match declaration.kind {
            PatternKind::Skip => &mut skip_lines,
            PatternKind::Token => &mut token_lines,
        };
        if let Some(&first_line) = lines.get(declaration.name) {
            return Err(LexiconError::DuplicateName {
                line: line_number,
                kind: declaration.kind,
                name: declaration.name.to_string(),
                first_line,
            });
        }
        lines.insert(declaration.name, line_number);

        builder = match declaration.kind {
            PatternKind::Skip => builder.skip(declaration.name, declaration.pattern),
            PatternKind::Token => builder.token(
                Symbol::new(declaration.name),
                declaration.name,
                declaration.pattern,
            ),
        };
    }

    if token_lines.is_empty() {
        return Err(LexiconError::NoTokens);
    }

    let catalog = builder.build().map_err(|source| {
        let line = match &source {
            CatalogError::InvalidPattern { kind, name, .. }
            | CatalogError::PatternTooLong { kind, name, .. } => match kind {
                PatternKind::Skip => skip_lines.get(name.as_str()),
                PatternKind::Token => token_lines.get(name.as_str()),
            },
            _ => None,
        };
        LexiconError::Catalog {
            line: line.copied().unwrap_or(0),
            source,
        }
    })?;

    log_success!(
        codes::success::CATALOG_BUILT,
        "Pattern catalog built",
        "skips" => catalog.skip_patterns().len(),
        "tokens" => catalog.value_patterns().len()
    );

    Ok(catalog)
}

/// Parse one lexicon line; `None` for blank, comment and directive lines
fn parse_line(raw: &str, line_number: usize) -> Result<Option<Declaration<'_>>, LexiconError> {
    let syntax = |message| LexiconError::Syntax {
        line: line_number,
        message,
    };

    let line = raw.trim_start();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let line = strip_trailing_comment(line).trim_end();

    if let Some(directive) = line.strip_prefix('!') {
        log_warning!(code = codes::lexicon::IGNORED_DIRECTIVE, "Lexicon directive ignored",
            "line" => line_number,
            "directive" => directive
        );
        return Ok(None);
    }

    let (rest, pattern) = split_pattern(line, '\'')
        .or_else(|| split_pattern(line, '"'))
        .ok_or_else(|| syntax("no legal pattern found"))?;

    if rest.contains(['\'', '"']) {
        return Err(syntax("puzzling skip/token pattern specification"));
    }

    let words: Vec<&str> = rest.split_whitespace().collect();
    let (kind, name) = match words.as_slice() {
        [] => return Err(syntax("no skip/token symbol")),
        [name] => (PatternKind::Token, *name),
        ["skip", name] => (PatternKind::Skip, *name),
        ["token", name] => (PatternKind::Token, *name),
        [_, _] => return Err(syntax("no skip/token specification found")),
        _ => return Err(syntax("illegal skip/token specification")),
    };

    Ok(Some(Declaration {
        kind,
        name,
        pattern,
    }))
}

/// Drop a trailing comment: whitespace followed by `#` and anything after it
fn strip_trailing_comment(line: &str) -> &str {
    for (index, ch) in line.char_indices() {
        if ch.is_whitespace() && line[index..].trim_start().starts_with('#') {
            return &line[..index];
        }
    }
    line
}

/// Split `words<ws>QpatternQ` into the words and the pattern, taking the
/// leftmost whitespace-quote pair so the pattern may contain the quote itself
fn split_pattern(line: &str, quote: char) -> Option<(&str, &str)> {
    let close = line.len().checked_sub(quote.len_utf8())?;
    if !line.ends_with(quote) {
        return None;
    }

    let (index, ch) = line.char_indices().find(|&(index, ch)| {
        let open = index + ch.len_utf8();
        ch.is_whitespace() && open < close && line[open..].starts_with(quote)
    })?;
    let pattern = &line[index + ch.len_utf8() + quote.len_utf8()..close];

    (!pattern.is_empty()).then_some((&line[..index], pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_parse_basic_lexicon() {
        let catalog = parse_lexicon(
            "skip WHITESPACE '\\s+'\ntoken NUM '\\d+'\nIDENT \"[a-z]+\"\n",
        )
        .unwrap();

        assert_eq!(catalog.skip_patterns().len(), 1);
        assert_eq!(catalog.value_patterns().len(), 2);
        assert_eq!(catalog.value_patterns()[0].tag(), &Symbol::new("NUM"));
        assert_eq!(catalog.value_patterns()[1].name(), "IDENT");
        assert_eq!(catalog.value_patterns()[1].pattern(), "[a-z]+");
    }

    #[test]
    fn test_percent_line_ends_lexicon() {
        let catalog = parse_lexicon("NUM '\\d+'\n%\nthis is grammar text\n").unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let catalog = parse_lexicon(
            "# leading comment\n\n   # indented comment\ntoken NUM '\\d+'   # trailing\n",
        )
        .unwrap();
        assert_eq!(catalog.value_patterns()[0].pattern(), "\\d+");
    }

    #[test]
    fn test_hash_inside_pattern_is_kept() {
        let catalog = parse_lexicon("skip COMMENT '#.*'\ntoken X 'x'\n").unwrap();
        assert_eq!(catalog.skip_patterns()[0].pattern(), "#.*");
    }

    #[test]
    fn test_pattern_may_contain_its_quote() {
        let catalog = parse_lexicon("token QUOTE ''[^']*''\n").unwrap();
        assert_eq!(catalog.value_patterns()[0].pattern(), "'[^']*'");
    }

    #[test]
    fn test_directive_lines_are_ignored() {
        let catalog = parse_lexicon("!debug=1\ntoken X 'x'\n").unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_syntax_errors_carry_line_numbers() {
        let error = parse_lexicon("token X 'x'\ntoken Y\n").unwrap_err();
        assert_matches!(
            error,
            LexiconError::Syntax { line: 2, message: "no legal pattern found" }
        );

        let error = parse_lexicon("to\"ken Y 'c'\n").unwrap_err();
        assert_matches!(
            error,
            LexiconError::Syntax { message: "puzzling skip/token pattern specification", .. }
        );

        let error = parse_lexicon("token Y Z 'c'\n").unwrap_err();
        assert_matches!(
            error,
            LexiconError::Syntax { message: "illegal skip/token specification", .. }
        );

        let error = parse_lexicon("keep Y 'c'\n").unwrap_err();
        assert_matches!(
            error,
            LexiconError::Syntax { message: "no skip/token specification found", .. }
        );

        let error = parse_lexicon(" 'c'\n").unwrap_err();
        assert_matches!(error, LexiconError::Syntax { message: "no legal pattern found", .. });
    }

    #[test]
    fn test_duplicate_names() {
        let error = parse_lexicon("token X 'x'\n\ntoken X 'y'\n").unwrap_err();
        assert_eq!(error.line(), Some(3));
        assert_matches!(
            &error,
            LexiconError::DuplicateName { kind: PatternKind::Token, first_line: 1, .. }
        );
        assert_eq!(error.error_code(), codes::lexicon::DUPLICATE_NAME);
    }

    #[test]
    fn test_no_tokens() {
        let error = parse_lexicon("skip WS ' '\n").unwrap_err();
        assert_matches!(error, LexiconError::NoTokens);
    }

    #[test]
    fn test_invalid_regex_reports_line() {
        let error = parse_lexicon("token X 'x'\ntoken BAD '(x'\n").unwrap_err();
        assert_eq!(error.line(), Some(2));
        assert_eq!(error.error_code(), codes::lexicon::INVALID_PATTERN);
    }

    #[test]
    fn test_load_lexicon_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "skip WS '\\s+'").unwrap();
        writeln!(file, "token WORD '\\w+'").unwrap();

        let catalog = load_lexicon(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_load_missing_lexicon() {
        let error = load_lexicon(Path::new("/nonexistent/grammar.lex")).unwrap_err();
        assert_matches!(error, LexiconError::Io { .. });
        assert_eq!(error.error_code(), codes::lexicon::LEXICON_READ_FAILURE);
    }

    #[test]
    fn test_standard_lexicon_builds() {
        let catalog = standard_lexicon().unwrap();
        assert_eq!(catalog.skip_patterns().len(), 3);
        assert!(catalog
            .value_patterns()
            .iter()
            .any(|entry| entry.name() == "STRING"));
    }

    #[test]
    fn test_split_pattern() {
        assert_eq!(split_pattern("token A 'a'", '\''), Some(("token A", "a")));
        assert_eq!(split_pattern("token A 'a'", '"'), None);
        assert_eq!(split_pattern("A ''", '\''), None);
        assert_eq!(split_pattern("A'a'", '\''), None);
    }
}
