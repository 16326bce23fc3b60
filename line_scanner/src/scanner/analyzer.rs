//! Longest-match scanner with one token of lookahead

use super::error::ScanError;
use super::source::LineSource;
use super::token::Token;
use crate::catalog::PatternCatalog;
use crate::config::runtime::ScannerPreferences;
use crate::logging::codes;
use crate::trace::TraceSink;
use crate::{log_debug, log_error};
use std::fmt;
use std::io::BufRead;

/// Turns a line source into tokens on demand.
///
/// The scanner keeps the current line (with a trailing `\n`), a cursor
/// `start..end` into it, and at most one recognized token that has not been
/// consumed yet. Asking for the current token twice returns the same token.
pub struct Scanner<'c, K, R> {
    catalog: &'c PatternCatalog<K>,
    source: LineSource<R>,
    buffer: Option<String>,
    line: u32,
    start: usize,
    end: usize,
    lookahead: Option<Token<K>>,
    failed: bool,
    log_refills: bool,
    log_tokens: bool,
}

impl<'c, 's, K> Scanner<'c, K, &'s [u8]>
where
    K: Clone + PartialEq + fmt::Display,
{
    /// Scanner over an in-memory string
    pub fn from_str(catalog: &'c PatternCatalog<K>, input: &'s str) -> Self {
        Self::new(catalog, input.as_bytes())
    }
}

impl<'c, K, R> Scanner<'c, K, R>
where
    K: Clone + PartialEq + fmt::Display,
    R: BufRead,
{
    pub fn new(catalog: &'c PatternCatalog<K>, reader: R) -> Self {
        Self::with_preferences(catalog, reader, &ScannerPreferences::default())
    }

    pub fn with_preferences(
        catalog: &'c PatternCatalog<K>,
        reader: R,
        preferences: &ScannerPreferences,
    ) -> Self {
        Self {
            catalog,
            source: LineSource::new(reader),
            buffer: None,
            line: 0,
            start: 0,
            end: 0,
            lookahead: None,
            failed: false,
            log_refills: preferences.log_line_refills,
            log_tokens: preferences.log_recognized_tokens,
        }
    }

    /// Number of the line most recently read (0 before the first read)
    pub fn line_number(&self) -> u32 {
        self.line
    }

    /// The next unconsumed token, scanning for it if needed; `None` at end of input
    pub fn current(&mut self) -> Result<Option<&Token<K>>, ScanError> {
        if self.lookahead.is_none() {
            match self.scan_next()? {
                Some(token) => self.lookahead = Some(token),
                None => return Ok(None),
            }
        }
        Ok(self.lookahead.as_ref())
    }

    /// Consume the current token, scanning for it first if needed.
    /// At end of input this does nothing.
    pub fn advance(&mut self) -> Result<(), ScanError> {
        if self.lookahead.is_none() {
            self.current()?;
        }
        self.lookahead = None;
        Ok(())
    }

    /// Consume the current token if it has kind `expected`, reporting it to
    /// `trace`. On a mismatch nothing is consumed.
    pub fn match_token(
        &mut self,
        expected: &K,
        trace: Option<&mut dyn TraceSink<K>>,
    ) -> Result<Token<K>, ScanError> {
        match self.current()? {
            None => return Err(ScanError::EndOfInput),
            Some(token) if token.kind() != expected => {
                log_debug!("Token mismatch", line = token.line(),
                    "expected" => expected,
                    "actual" => token.kind()
                );
                return Err(ScanError::MatchFailure {
                    expected: expected.to_string(),
                    actual: token.kind().to_string(),
                });
            }
            Some(_) => {}
        }

        let token = self.lookahead.take().ok_or(ScanError::EndOfInput)?;
        if let Some(trace) = trace {
            trace.token(&token);
        }
        Ok(token)
    }

    /// Pushback is not supported; always fails
    pub fn put(&mut self, _token: Token<K>) -> Result<(), ScanError> {
        Err(ScanError::UnsupportedOperation)
    }

    /// Load the next line when the current one is used up. Returns false at
    /// end of input.
    fn fill_buffer(&mut self) -> bool {
        if self.buffer.is_some() && self.start < self.end {
            return true;
        }

        match self.source.next_line(self.line) {
            Some(mut text) => {
                text.push('\n');
                self.line = self.line.saturating_add(1);
                self.start = 0;
                self.end = text.len();
                if self.log_refills {
                    log_debug!("Line buffered", line = self.line, "length" => self.end);
                }
                self.buffer = Some(text);
                true
            }
            None => {
                self.buffer = None;
                false
            }
        }
    }

    fn scan_next(&mut self) -> Result<Option<Token<K>>, ScanError> {
        // Skip until no skip pattern makes progress, refilling across lines
        loop {
            if !self.fill_buffer() {
                return Ok(None);
            }
            let Some(line) = self.buffer.as_deref() else {
                return Ok(None);
            };
            match self.catalog.furthest_skip(line, self.start, self.end) {
                Some(stop) => self.start = stop,
                None => break,
            }
        }

        let Some(line) = self.buffer.as_deref() else {
            return Ok(None);
        };

        match self.catalog.longest_value_match(line, self.start, self.end) {
            Some((kind, stop)) => {
                let token = Token::new(kind.clone(), &line[self.start..stop], self.line);
                self.start = stop;
                if self.log_tokens {
                    log_debug!("Token recognized", line = self.line,
                        "kind" => token.kind(),
                        "lexeme" => token.lexeme()
                    );
                }
                Ok(Some(token))
            }
            None => {
                let ch = line[self.start..].chars().next().unwrap_or('\n');
                let text = line.strip_suffix('\n').unwrap_or(line).to_string();
                log_error!(codes::scanning::ILLEGAL_CHARACTER, "Illegal character",
                    line = self.line,
                    "offset" => self.start
                );
                Err(ScanError::IllegalCharacter {
                    ch,
                    line: self.line,
                    text,
                })
            }
        }
    }
}

/// Yields tokens until end of input; stops after the first error
impl<'c, K, R> Iterator for Scanner<'c, K, R>
where
    K: Clone + PartialEq + fmt::Display,
    R: BufRead,
{
    type Item = Result<Token<K>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.current().map(|token| token.is_some()) {
            Ok(true) => self.lookahead.take().map(Ok),
            Ok(false) => None,
            Err(error) => {
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}
