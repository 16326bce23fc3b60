//! Scanning errors

use crate::logging::codes;

/// Everything that can stop a scan
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// The parser needed a token but the input was exhausted
    #[error("Premature end of input")]
    EndOfInput,

    #[error("illegal character {} on line {line}: \"{text}\"", render_char(.ch))]
    IllegalCharacter { ch: char, line: u32, text: String },

    #[error("match failure: expected token {expected}, got {actual}")]
    MatchFailure { expected: String, actual: String },

    #[error("put is not supported: the scanner has no pushback")]
    UnsupportedOperation,
}

impl ScanError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ScanError::EndOfInput => codes::scanning::PREMATURE_END,
            ScanError::IllegalCharacter { .. } => codes::scanning::ILLEGAL_CHARACTER,
            ScanError::MatchFailure { .. } => codes::scanning::MATCH_FAILURE,
            ScanError::UnsupportedOperation => codes::scanning::UNSUPPORTED_OPERATION,
        }
    }

    pub fn is_end_of_input(&self) -> bool {
        matches!(self, ScanError::EndOfInput)
    }
}

/// Printable ASCII is quoted, anything else shows its code point
fn render_char(ch: &char) -> String {
    if (' '..='~').contains(ch) {
        format!("'{}'", ch)
    } else {
        format!("(char){}", u32::from(*ch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_character_message() {
        let error = ScanError::IllegalCharacter {
            ch: '@',
            line: 1,
            text: "@".to_string(),
        };
        assert_eq!(error.to_string(), "illegal character '@' on line 1: \"@\"");
    }

    #[test]
    fn test_unprintable_character_message() {
        let error = ScanError::IllegalCharacter {
            ch: '\t',
            line: 2,
            text: "a\tb".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "illegal character (char)9 on line 2: \"a\tb\""
        );

        let error = ScanError::IllegalCharacter {
            ch: 'é',
            line: 1,
            text: "é".to_string(),
        };
        assert!(error.to_string().starts_with("illegal character (char)233 "));
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(ScanError::EndOfInput.to_string(), "Premature end of input");
        assert_eq!(
            ScanError::UnsupportedOperation.to_string(),
            "put is not supported: the scanner has no pushback"
        );
        assert_eq!(
            ScanError::MatchFailure {
                expected: "NUM".to_string(),
                actual: "IDENT".to_string(),
            }
            .to_string(),
            "match failure: expected token NUM, got IDENT"
        );
    }

    #[test]
    fn test_error_codes() {
        assert!(ScanError::EndOfInput.is_end_of_input());
        assert_eq!(
            ScanError::UnsupportedOperation.error_code(),
            codes::scanning::UNSUPPORTED_OPERATION
        );
    }
}
