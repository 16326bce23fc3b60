// Internal modules
pub mod catalog;
pub mod config;
pub mod driver;
#[macro_use]
pub mod logging;
pub mod scanner;
pub mod trace;

// Re-export key types for library consumers
pub use catalog::{
    load_lexicon, parse_lexicon, standard_lexicon, CatalogBuilder, CatalogError, LexiconError,
    PatternCatalog, PatternEntry, PatternKind, Symbol,
};
pub use config::{ConfigError, RuntimeConfig};
pub use driver::{
    dump_tokens, Driver, DriverError, Grammar, ParseError, RunSummary, TokenList, TokenSequence,
};
pub use scanner::{ScanError, Scanner, Token};
pub use trace::{as_sink, Trace, TraceSink};
