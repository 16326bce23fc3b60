//! Command-line style driver: parse each input string with a grammar and
//! print `<input> -> <result>`

use crate::catalog::PatternCatalog;
use crate::config::runtime::ScannerPreferences;
use crate::logging::codes;
use crate::scanner::{ScanError, Scanner, Token};
use crate::trace::{as_sink, Trace};
use crate::{log_debug, log_error, log_success};
use std::fmt;
use std::io::{self, BufRead, Write};

/// Argument that turns tracing on for the inputs after it
pub const TRACE_FLAG: &str = "-t";

/// Why a grammar rejected its input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("{message}")]
    Syntax { message: String },
}

impl ParseError {
    pub fn syntax(message: impl Into<String>) -> Self {
        ParseError::Syntax {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ParseError::Scan(error) => error.error_code(),
            ParseError::Syntax { .. } => codes::driver::SYNTAX_ERROR,
        }
    }

    pub fn is_premature_end(&self) -> bool {
        matches!(self, ParseError::Scan(ScanError::EndOfInput))
    }
}

/// Driver errors; per-input parse failures are reported, not returned
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Cannot write output: {0}")]
    Output(#[from] io::Error),

    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl DriverError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            DriverError::Output(_) => codes::driver::OUTPUT_FAILURE,
            DriverError::Scan(error) => error.error_code(),
        }
    }
}

/// A recursive-descent parser entry point over a scanner
pub trait Grammar<K> {
    type Output: fmt::Display;

    fn parse<R: BufRead>(
        &self,
        scanner: &mut Scanner<'_, K, R>,
        trace: Option<&mut Trace<'_>>,
    ) -> Result<Self::Output, ParseError>;
}

/// Outcome counts for one driver run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub inputs: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} inputs: {} parsed, {} failed",
            self.inputs, self.succeeded, self.failed
        )
    }
}

pub struct Driver<'c, K, G> {
    catalog: &'c PatternCatalog<K>,
    grammar: G,
    scanner_preferences: ScannerPreferences,
}

impl<'c, K, G> Driver<'c, K, G>
where
    K: Clone + PartialEq + fmt::Display,
    G: Grammar<K>,
{
    pub fn new(catalog: &'c PatternCatalog<K>, grammar: G) -> Self {
        Self {
            catalog,
            grammar,
            scanner_preferences: ScannerPreferences::default(),
        }
    }

    pub fn with_scanner_preferences(mut self, preferences: ScannerPreferences) -> Self {
        self.scanner_preferences = preferences;
        self
    }

    /// Parse one input string with a fresh scanner
    pub fn parse_one(
        &self,
        input: &str,
        trace: Option<&mut Trace<'_>>,
    ) -> Result<G::Output, ParseError> {
        let mut scanner =
            Scanner::with_preferences(self.catalog, input.as_bytes(), &self.scanner_preferences);
        self.grammar.parse(&mut scanner, trace)
    }

    /// Parse every argument, printing `<input> -> <result>` for each.
    ///
    /// The first `-t` enables tracing for the inputs after it; later ones are
    /// parsed as ordinary inputs. A failing input does not stop the run.
    pub fn run<I, S, W>(&self, args: I, out: &mut W) -> Result<RunSummary, DriverError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        W: Write,
    {
        let mut tracing = false;
        let mut summary = RunSummary::default();

        for arg in args {
            let input = arg.as_ref();
            if input == TRACE_FLAG && !tracing {
                tracing = true;
                continue;
            }

            summary.inputs += 1;
            write!(out, "{} -> ", input)?;

            let outcome = if tracing {
                writeln!(out)?;
                let mut trace = Trace::new(&mut *out);
                self.parse_one(input, Some(&mut trace))
            } else {
                self.parse_one(input, None)
            };

            match outcome {
                Ok(result) => {
                    writeln!(out, "{}", result)?;
                    summary.succeeded += 1;
                    log_debug!("Input parsed", "input" => input);
                }
                Err(error) => {
                    writeln!(out, "{}", error)?;
                    summary.failed += 1;
                    log_error!(error.error_code(), "Input rejected",
                        "input" => input,
                        "reason" => error
                    );
                }
            }
        }

        log_success!(codes::success::RUN_COMPLETED, "Driver run completed",
            "inputs" => summary.inputs,
            "failed" => summary.failed
        );

        Ok(summary)
    }
}

/// Write every remaining token as `KIND: 'lexeme'`, one per line.
/// Returns the number of tokens written.
pub fn dump_tokens<K, R, W>(scanner: &mut Scanner<'_, K, R>, out: &mut W) -> Result<usize, DriverError>
where
    K: Clone + PartialEq + fmt::Display,
    R: BufRead,
    W: Write,
{
    let mut count = 0;
    while let Some(token) = scanner.current()? {
        writeln!(out, "{}: '{}'", token.kind(), token.lexeme())?;
        scanner.advance()?;
        count += 1;
    }
    log_success!(codes::success::INPUT_PARSED, "Token dump completed", "tokens" => count);
    Ok(count)
}

/// Built-in grammar that accepts any token sequence
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSequence;

/// Tokens rendered as `KIND 'lexeme'` separated by spaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenList<K>(pub Vec<Token<K>>);

impl<K: fmt::Display> fmt::Display for TokenList<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, token) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{} '{}'", token.kind(), token.lexeme())?;
        }
        Ok(())
    }
}

impl<K> Grammar<K> for TokenSequence
where
    K: Clone + PartialEq + fmt::Display,
{
    type Output = TokenList<K>;

    fn parse<R: BufRead>(
        &self,
        scanner: &mut Scanner<'_, K, R>,
        trace: Option<&mut Trace<'_>>,
    ) -> Result<Self::Output, ParseError> {
        let line = scanner.line_number();
        let mut trace = trace.map(|trace| trace.nonterm("<tokens>", line));
        let mut tokens = Vec::new();

        while let Some(kind) = scanner.current()?.map(|token| token.kind().clone()) {
            tokens.push(scanner.match_token(&kind, as_sink(&mut trace))?);
        }

        Ok(TokenList(tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{standard_lexicon, Symbol};
    use assert_matches::assert_matches;

    fn run(args: &[&str]) -> (String, RunSummary) {
        let catalog = standard_lexicon().unwrap();
        let driver = Driver::new(&catalog, TokenSequence);
        let mut out = Vec::new();
        let summary = driver.run(args.iter().copied(), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    /// Accepts exactly one NUM token
    struct SingleNumber;

    impl Grammar<Symbol> for SingleNumber {
        type Output = String;

        fn parse<R: BufRead>(
            &self,
            scanner: &mut Scanner<'_, Symbol, R>,
            trace: Option<&mut Trace<'_>>,
        ) -> Result<String, ParseError> {
            let mut trace = trace.map(|trace| trace.nonterm("<num>", 0));
            let token = scanner.match_token(&Symbol::new("NUM"), as_sink(&mut trace))?;
            if scanner.current()?.is_some() {
                return Err(ParseError::syntax("extra input after number"));
            }
            Ok(format!("number {}", token.lexeme()))
        }
    }

    #[test]
    fn test_token_sequence_output() {
        let (output, summary) = run(&["x = 42;"]);
        assert_eq!(
            output,
            "x = 42; -> IDENT 'x' OPERATOR '=' NUM '42' SEMI ';'\n"
        );
        assert_eq!(summary.inputs, 1);
        assert!(summary.all_succeeded());
    }

    #[test]
    fn test_illegal_character_is_reported_and_run_continues() {
        let (output, summary) = run(&["a @", "b"]);
        assert_eq!(
            output,
            "a @ -> illegal character '@' on line 1: \"a @\"\nb -> IDENT 'b'\n"
        );
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.succeeded, 1);
    }

    #[test]
    fn test_trace_flag_applies_to_later_inputs() {
        let (output, summary) = run(&["1", "-t", "2", "-t"]);
        assert_eq!(
            output,
            concat!(
                "1 -> NUM '1'\n",
                "2 -> \n",
                "0: <tokens>\n",
                "1: |    NUM \"2\"\n",
                "NUM '2'\n",
                "-t -> \n",
                "0: <tokens>\n",
                "1: |    OPERATOR \"-\"\n",
                "1: |    IDENT \"t\"\n",
                "OPERATOR '-' IDENT 't'\n",
            )
        );
        assert_eq!(summary.inputs, 3);
    }

    #[test]
    fn test_premature_end_of_input() {
        let catalog = standard_lexicon().unwrap();
        let driver = Driver::new(&catalog, SingleNumber);
        let mut out = Vec::new();
        let summary = driver.run(["7", "", "7 8", "x"], &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            concat!(
                "7 -> number 7\n",
                " -> Premature end of input\n",
                "7 8 -> extra input after number\n",
                "x -> match failure: expected token NUM, got IDENT\n",
            )
        );
        assert_eq!(summary.failed, 3);
    }

    #[test]
    fn test_parse_one_errors() {
        let catalog = standard_lexicon().unwrap();
        let driver = Driver::new(&catalog, SingleNumber);
        let error = driver.parse_one("", None).unwrap_err();
        assert!(error.is_premature_end());
        assert_eq!(error.error_code(), codes::scanning::PREMATURE_END);

        let error = driver.parse_one("1 2", None).unwrap_err();
        assert_matches!(error, ParseError::Syntax { .. });
        assert_eq!(error.error_code(), codes::driver::SYNTAX_ERROR);
    }

    #[test]
    fn test_dump_tokens() {
        let catalog = standard_lexicon().unwrap();
        let mut scanner = Scanner::from_str(&catalog, "f(x, 1) # note\n\"s\"\n");
        let mut out = Vec::new();
        let count = dump_tokens(&mut scanner, &mut out).unwrap();

        assert_eq!(count, 7);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "IDENT: 'f'\nLPAREN: '('\nIDENT: 'x'\nCOMMA: ','\nNUM: '1'\nRPAREN: ')'\nSTRING: '\"s\"'\n"
        );
    }

    #[test]
    fn test_dump_tokens_stops_on_illegal_character() {
        let catalog = standard_lexicon().unwrap();
        let mut scanner = Scanner::from_str(&catalog, "a $");
        let mut out = Vec::new();
        let error = dump_tokens(&mut scanner, &mut out).unwrap_err();
        assert_matches!(error, DriverError::Scan(ScanError::IllegalCharacter { ch: '$', .. }));
        assert_eq!(String::from_utf8(out).unwrap(), "IDENT: 'a'\n");
    }

    #[test]
    fn test_summary_display() {
        let summary = RunSummary {
            inputs: 3,
            succeeded: 2,
            failed: 1,
        };
        assert_eq!(summary.to_string(), "3 inputs: 2 parsed, 1 failed");
    }
}
