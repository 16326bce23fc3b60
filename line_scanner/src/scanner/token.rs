//! Recognized tokens

use std::fmt;

/// One recognized unit of input: its kind, the exact matched text and the
/// 1-based line it was found on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token<K> {
    kind: K,
    lexeme: String,
    line: u32,
}

impl<K> Token<K> {
    pub fn new(kind: K, lexeme: &str, line: u32) -> Self {
        Self {
            kind,
            lexeme: lexeme.to_string(),
            line,
        }
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn into_lexeme(self) -> String {
        self.lexeme
    }
}

/// Displays the lexeme, so a token can stand in for its text
impl<K> fmt::Display for Token<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexeme)
    }
}
