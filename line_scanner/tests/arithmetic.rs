//! A small recursive-descent grammar driven through the scanner:
//!
//! ```text
//! <expr> ::= <term> { (PLUS | MINUS) <term> }
//! <term> ::= NUM | LPAREN <expr> RPAREN
//! ```

use line_scanner::{
    as_sink, load_lexicon, Driver, Grammar, ParseError, PatternCatalog, ScanError, Scanner, Trace,
    TokenSequence,
};
use std::fmt;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Num,
    Plus,
    Minus,
    LParen,
    RParen,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Num => "NUM",
            Kind::Plus => "PLUS",
            Kind::Minus => "MINUS",
            Kind::LParen => "LPAREN",
            Kind::RParen => "RPAREN",
        };
        f.write_str(name)
    }
}

fn catalog() -> PatternCatalog<Kind> {
    PatternCatalog::builder()
        .skip("WHITESPACE", r"\s+")
        .token(Kind::Num, "NUM", r"\d+")
        .token(Kind::Plus, "PLUS", r"\+")
        .token(Kind::Minus, "MINUS", "-")
        .token(Kind::LParen, "LPAREN", r"\(")
        .token(Kind::RParen, "RPAREN", r"\)")
        .build()
        .unwrap()
}

struct Arithmetic;

impl Grammar<Kind> for Arithmetic {
    type Output = i64;

    fn parse<R: BufRead>(
        &self,
        scanner: &mut Scanner<'_, Kind, R>,
        trace: Option<&mut Trace<'_>>,
    ) -> Result<i64, ParseError> {
        let value = expr(scanner, trace)?;
        match scanner.current()? {
            None => Ok(value),
            Some(token) => Err(ParseError::syntax(format!(
                "unexpected {} on line {}",
                token.lexeme(),
                token.line()
            ))),
        }
    }
}

fn expr<R: BufRead>(
    scanner: &mut Scanner<'_, Kind, R>,
    trace: Option<&mut Trace<'_>>,
) -> Result<i64, ParseError> {
    let line = scanner.line_number();
    let mut trace = trace.map(|trace| trace.nonterm("<expr>", line));

    let mut value = term(scanner, trace.as_mut())?;
    loop {
        let op = match scanner.current()? {
            Some(token) if matches!(token.kind(), Kind::Plus | Kind::Minus) => *token.kind(),
            _ => break,
        };
        scanner.match_token(&op, as_sink(&mut trace))?;
        let rhs = term(scanner, trace.as_mut())?;
        value = if op == Kind::Plus {
            value + rhs
        } else {
            value - rhs
        };
    }
    Ok(value)
}

fn term<R: BufRead>(
    scanner: &mut Scanner<'_, Kind, R>,
    trace: Option<&mut Trace<'_>>,
) -> Result<i64, ParseError> {
    let line = scanner.line_number();
    let mut trace = trace.map(|trace| trace.nonterm("<term>", line));

    if scanner.current()?.map(|token| *token.kind()) == Some(Kind::LParen) {
        scanner.match_token(&Kind::LParen, as_sink(&mut trace))?;
        let value = expr(scanner, trace.as_mut())?;
        scanner.match_token(&Kind::RParen, as_sink(&mut trace))?;
        return Ok(value);
    }

    let token = scanner.match_token(&Kind::Num, as_sink(&mut trace))?;
    token
        .lexeme()
        .parse::<i64>()
        .map_err(|error| ParseError::syntax(error.to_string()))
}

fn run(args: &[&str]) -> String {
    let catalog = catalog();
    let driver = Driver::new(&catalog, Arithmetic);
    let mut out = Vec::new();
    driver.run(args.iter().copied(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn evaluates_each_input() {
    let output = run(&["1 + 2", "(4 - 1) + 10", "7"]);
    assert_eq!(output, "1 + 2 -> 3\n(4 - 1) + 10 -> 13\n7 -> 7\n");
}

#[test]
fn reports_each_failure_kind() {
    let output = run(&["1 +", "2 )", "1 $ 2", "(1 2"]);
    assert_eq!(
        output,
        concat!(
            "1 + -> Premature end of input\n",
            "2 ) -> unexpected ) on line 1\n",
            "1 $ 2 -> illegal character '$' on line 1: \"1 $ 2\"\n",
            "(1 2 -> match failure: expected token RPAREN, got NUM\n",
        )
    );
}

#[test]
fn traces_nonterminals_and_tokens() {
    let output = run(&["-t", "1 + (2)"]);
    assert_eq!(
        output,
        concat!(
            "1 + (2) -> \n",
            "0: <expr>\n",
            "0: | <term>\n",
            "1: | |    NUM \"1\"\n",
            "1: |    PLUS \"+\"\n",
            "1: | <term>\n",
            "1: | |    LPAREN \"(\"\n",
            "1: | | <expr>\n",
            "1: | | | <term>\n",
            "1: | | | |    NUM \"2\"\n",
            "1: | |    RPAREN \")\"\n",
            "3\n",
        )
    );
}

#[test]
fn spans_multiple_lines() {
    let catalog = catalog();
    let driver = Driver::new(&catalog, Arithmetic);

    assert_eq!(driver.parse_one("1 +\n\n  2\n", None), Ok(3));
    assert_eq!(
        driver.parse_one("1\n)", None),
        Err(ParseError::syntax("unexpected ) on line 2"))
    );
}

#[test]
fn failed_match_leaves_token_for_the_parser() {
    let catalog = catalog();
    let mut scanner = Scanner::from_str(&catalog, "( 5 )");

    assert_eq!(
        scanner.match_token(&Kind::Num, None),
        Err(ScanError::MatchFailure {
            expected: "NUM".to_string(),
            actual: "LPAREN".to_string(),
        })
    );
    assert_eq!(term(&mut scanner, None), Ok(5));
    assert_eq!(scanner.current(), Ok(None));
}

#[test]
fn lexicon_file_drives_the_token_sequence_grammar() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# arithmetic tokens").unwrap();
    writeln!(file, "skip WHITESPACE '\\s+'").unwrap();
    writeln!(file, "token NUM '\\d+'").unwrap();
    writeln!(file, "OP '[-+*/]'").unwrap();
    writeln!(file, "%").unwrap();
    writeln!(file, "<expr> ::= <NUM>").unwrap();

    let catalog = load_lexicon(file.path()).unwrap();
    let driver = Driver::new(&catalog, TokenSequence);
    let mut out = Vec::new();
    let summary = driver.run(["12 * 3", "x"], &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "12 * 3 -> NUM '12' OP '*' NUM '3'\nx -> illegal character 'x' on line 1: \"x\"\n"
    );
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);
}
