//! Parse tracing
//!
//! A trace prints every non-terminal a parser enters and every token it
//! consumes, indented by nesting depth:
//!
//! ```text
//! 1: <expr>
//! 1: | <term>
//! 1: |    NUM "7"
//! ```

use crate::scanner::Token;
use std::fmt;
use std::io::Write;

const INDENT: &str = "| ";

/// Receives the tokens a scanner consumes through `match_token`
pub trait TraceSink<K> {
    fn token(&mut self, token: &Token<K>);
}

/// Writes trace lines to an output stream; write failures are ignored
pub struct Trace<'w> {
    out: &'w mut dyn Write,
    depth: usize,
}

impl<'w> Trace<'w> {
    pub fn new(out: &'w mut dyn Write) -> Self {
        Self { out, depth: 0 }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Back to the outermost level, for reuse across inputs
    pub fn reset(&mut self) {
        self.depth = 0;
    }

    /// Report entering non-terminal `name` while on `line`, and return a trace
    /// one level deeper for its children
    pub fn nonterm(&mut self, name: &str, line: u32) -> Trace<'_> {
        let _ = writeln!(self.out, "{}: {}{}", line, self.indent(), name);
        Trace {
            out: &mut *self.out,
            depth: self.depth + 1,
        }
    }

    fn indent(&self) -> String {
        INDENT.repeat(self.depth)
    }
}

impl<K: fmt::Display> TraceSink<K> for Trace<'_> {
    fn token(&mut self, token: &Token<K>) {
        let _ = writeln!(
            self.out,
            "{}: {}   {} \"{}\"",
            token.line(),
            self.indent(),
            token.kind(),
            token.lexeme()
        );
    }
}

/// View an optional trace as the sink `Scanner::match_token` expects
pub fn as_sink<'a, 'w: 'a, K: fmt::Display>(
    trace: &'a mut Option<Trace<'w>>,
) -> Option<&'a mut dyn TraceSink<K>> {
    trace.as_mut().map(|trace| trace as &mut dyn TraceSink<K>)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_output() {
        let mut out = Vec::new();
        {
            let mut trace = Trace::new(&mut out);
            let mut expr = trace.nonterm("<expr>", 1);
            {
                let mut term = expr.nonterm("<term>", 1);
                term.token(&Token::new("NUM", "7", 1));
            }
            expr.token(&Token::new("PLUS", "+", 2));
        }

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1: <expr>\n1: | <term>\n1: | |    NUM \"7\"\n2: |    PLUS \"+\"\n"
        );
    }

    #[test]
    fn test_reset_returns_to_top_level() {
        let mut out = Vec::new();
        let mut trace = Trace::new(&mut out);
        trace.depth = 3;
        trace.reset();
        assert_eq!(trace.depth(), 0);
        assert_eq!(trace.nonterm("<x>", 4).depth(), 1);
    }

    #[test]
    fn test_as_sink() {
        let mut out = Vec::new();
        {
            let mut trace = Some(Trace::new(&mut out));
            if let Some(sink) = as_sink::<&str>(&mut trace) {
                sink.token(&Token::new("ID", "x", 1));
            }
            let mut none: Option<Trace<'_>> = None;
            assert!(as_sink::<&str>(&mut none).is_none());
        }
        assert_eq!(String::from_utf8(out).unwrap(), "1:    ID \"x\"\n");
    }
}
