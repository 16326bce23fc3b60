//! Line-at-a-time input source

use crate::log_warning;
use crate::logging::codes;
use std::io::BufRead;

/// Reads one line at a time with its terminator removed.
///
/// Exhaustion is sticky. A read fault (including invalid UTF-8) is reported as
/// a warning and then treated as end of input.
pub(crate) struct LineSource<R> {
    reader: R,
    exhausted: bool,
}

impl<R: BufRead> LineSource<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            exhausted: false,
        }
    }

    /// Next line without its `\n` or `\r\n`; `None` once the input is done.
    /// `after_line` is only used to place the warning on a read fault.
    pub(crate) fn next_line(&mut self, after_line: u32) -> Option<String> {
        if self.exhausted {
            return None;
        }

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => {
                self.exhausted = true;
                None
            }
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Some(line)
            }
            Err(error) => {
                log_warning!(code = codes::scanning::SOURCE_READ_FAILURE,
                    "Input source failed; treating as end of input",
                    "after_line" => after_line,
                    "error" => error
                );
                self.exhausted = true;
                None
            }
        }
    }
}
