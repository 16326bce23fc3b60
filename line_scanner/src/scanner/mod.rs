//! Line-buffered, regex-driven scanner
//!
//! The scanner reads its input one line at a time and turns it into tokens on
//! demand for a recursive-descent parser:
//!
//! - **Skip patterns** (whitespace, comments) are discarded; the scanner applies
//!   them until none makes progress, moving on to further lines as needed.
//! - **Token patterns** compete for the longest match at the cursor; on equal
//!   length the first-declared pattern wins and empty matches never win.
//! - **One token of lookahead**: `current` caches the recognized token until
//!   `advance` or `match_token` consumes it.
//!
//! Input that no token pattern matches yields `ScanError::IllegalCharacter`
//! naming the character, the line number and the line text.

mod analyzer;
pub mod error;
mod source;
pub mod token;

pub use analyzer::Scanner;
pub use error::ScanError;
pub use token::Token;
