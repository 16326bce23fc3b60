//! Consolidated error codes and classification system
//!
//! Single source of truth for all scanner codes, their metadata, and classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR003");
}

/// Lexicon (pattern catalog) error codes
pub mod lexicon {
    use super::Code;

    pub const SPECIFICATION_SYNTAX: Code = Code::new("E010");
    pub const DUPLICATE_NAME: Code = Code::new("E011");
    pub const INVALID_PATTERN: Code = Code::new("E012");
    pub const NO_TOKENS: Code = Code::new("E013");
    pub const TOO_MANY_PATTERNS: Code = Code::new("E014");
    pub const PATTERN_TOO_LONG: Code = Code::new("E015");
    pub const LEXICON_READ_FAILURE: Code = Code::new("E016");
    pub const LEXICON_TOO_LONG: Code = Code::new("E017");
    pub const IGNORED_DIRECTIVE: Code = Code::new("W011");
}

/// Scanning error codes
pub mod scanning {
    use super::Code;

    pub const ILLEGAL_CHARACTER: Code = Code::new("E020");
    pub const MATCH_FAILURE: Code = Code::new("E021");
    pub const PREMATURE_END: Code = Code::new("E022");
    pub const UNSUPPORTED_OPERATION: Code = Code::new("E023");
    pub const SOURCE_READ_FAILURE: Code = Code::new("W010");
}

/// Driver error codes
pub mod driver {
    use super::Code;

    pub const SYNTAX_ERROR: Code = Code::new("E030");
    pub const OUTPUT_FAILURE: Code = Code::new("E031");
}

/// Success and informational codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I000");
    pub const CATALOG_BUILT: Code = Code::new("I001");
    pub const INPUT_PARSED: Code = Code::new("I002");
    pub const RUN_COMPLETED: Code = Code::new("I003");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System errors
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report with the failing input",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check logging configuration and environment",
            ),
            ErrorMetadata::new(
                "ERR003",
                "System",
                Severity::High,
                false,
                true,
                "Runtime configuration could not be loaded",
                "Check the configuration file path and TOML syntax",
            ),
            // Lexicon errors
            ErrorMetadata::new(
                "E010",
                "Lexicon",
                Severity::High,
                false,
                true,
                "Malformed skip/token specification line",
                "Use `skip NAME 'regex'`, `token NAME 'regex'` or `NAME 'regex'`",
            ),
            ErrorMetadata::new(
                "E011",
                "Lexicon",
                Severity::High,
                false,
                true,
                "Skip or token name declared twice",
                "Rename or remove the duplicate declaration",
            ),
            ErrorMetadata::new(
                "E012",
                "Lexicon",
                Severity::High,
                false,
                true,
                "Pattern is not a valid regular expression",
                "Fix the regular expression syntax",
            ),
            ErrorMetadata::new(
                "E013",
                "Lexicon",
                Severity::High,
                false,
                true,
                "Lexicon declares no token patterns",
                "Declare at least one token pattern",
            ),
            ErrorMetadata::new(
                "E014",
                "Lexicon",
                Severity::High,
                false,
                true,
                "Lexicon declares more patterns than allowed",
                "Reduce the number of patterns or raise max_pattern_count",
            ),
            ErrorMetadata::new(
                "E015",
                "Lexicon",
                Severity::Medium,
                false,
                true,
                "Pattern text exceeds the configured maximum length",
                "Shorten the pattern or raise max_pattern_length",
            ),
            ErrorMetadata::new(
                "E016",
                "Lexicon",
                Severity::High,
                false,
                true,
                "Lexicon file could not be read",
                "Check the lexicon path and permissions",
            ),
            ErrorMetadata::new(
                "E017",
                "Lexicon",
                Severity::Medium,
                false,
                true,
                "Lexicon file has more lines than allowed",
                "Split the lexicon or raise max_lexicon_lines",
            ),
            ErrorMetadata::new(
                "W011",
                "Lexicon",
                Severity::Low,
                true,
                false,
                "Directive line in lexicon ignored",
                "Remove the directive; it has no effect on the scanner",
            ),
            // Scanning errors
            ErrorMetadata::new(
                "E020",
                "Scanning",
                Severity::Medium,
                false,
                false,
                "No token pattern matches the input",
                "Fix the input or extend the lexicon",
            ),
            ErrorMetadata::new(
                "E021",
                "Scanning",
                Severity::Medium,
                false,
                false,
                "Parser expected a different token kind",
                "Fix the input to follow the grammar",
            ),
            ErrorMetadata::new(
                "E022",
                "Scanning",
                Severity::Medium,
                false,
                false,
                "Input ended while the parser expected more tokens",
                "Complete the input",
            ),
            ErrorMetadata::new(
                "E023",
                "Scanning",
                Severity::High,
                false,
                true,
                "Token pushback requested but not supported",
                "Restructure the parser to use one-token lookahead",
            ),
            ErrorMetadata::new(
                "W010",
                "Scanning",
                Severity::Low,
                true,
                false,
                "Input source failed; treated as end of input",
                "Check the input encoding and source",
            ),
            // Driver errors
            ErrorMetadata::new(
                "E030",
                "Driver",
                Severity::Medium,
                false,
                false,
                "Grammar rejected the input",
                "Fix the input to follow the grammar",
            ),
            ErrorMetadata::new(
                "E031",
                "Driver",
                Severity::High,
                false,
                true,
                "Driver output could not be written",
                "Check the output stream",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
