use line_scanner::config::RuntimeConfig;
use line_scanner::{
    dump_tokens, load_lexicon, logging, standard_lexicon, Driver, PatternCatalog, Scanner,
    Symbol, TokenSequence,
};
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Options that precede the inputs
#[derive(Debug, Default)]
struct Options {
    lexicon: Option<PathBuf>,
    config: Option<PathBuf>,
    scan: bool,
    help: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map(String::as_str).unwrap_or("lscan");
    let (options, inputs) = parse_options(&args[1.min(args.len())..]);

    if options.help {
        print_help(program_name);
        return Ok(());
    }

    let config = match &options.config {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };

    logging::config::init_runtime_preferences(config.logging.clone())?;
    logging::init_global_logging()?;

    let lexicon_path = options
        .lexicon
        .as_deref()
        .or(config.scanner.lexicon_path.as_deref());
    let catalog = build_catalog(lexicon_path)?;

    if options.scan {
        let stdin = io::stdin();
        let mut scanner = Scanner::with_preferences(&catalog, stdin.lock(), &config.scanner);
        let mut stdout = io::stdout().lock();
        if let Err(error) = dump_tokens(&mut scanner, &mut stdout) {
            stdout.flush()?;
            eprintln!("{}", error);
            std::process::exit(1);
        }
        return Ok(());
    }

    if inputs.is_empty() {
        eprintln!("Usage: {} [options] [-t] <input>...", program_name);
        eprintln!("       {} --help", program_name);
        std::process::exit(1);
    }

    let driver =
        Driver::new(&catalog, TokenSequence).with_scanner_preferences(config.scanner.clone());
    let mut stdout = io::stdout().lock();
    let summary = driver.run(inputs, &mut stdout)?;
    stdout.flush()?;

    if config.driver.report_summary {
        eprintln!("{}", summary);
    }
    if !summary.all_succeeded() {
        std::process::exit(1);
    }

    Ok(())
}

/// Split leading options from the inputs. Options end at `--` or at the first
/// argument that is not one.
fn parse_options(args: &[String]) -> (Options, &[String]) {
    let mut options = Options::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" => {
                options.help = true;
            }
            "--scan" => {
                options.scan = true;
            }
            "--lexicon" | "--config" => {
                if i + 1 < args.len() {
                    let path = Some(PathBuf::from(&args[i + 1]));
                    if args[i] == "--lexicon" {
                        options.lexicon = path;
                    } else {
                        options.config = path;
                    }
                    i += 1; // Skip the path argument
                } else {
                    eprintln!("Warning: {} requires a file path", args[i]);
                }
            }
            "--" => {
                i += 1;
                break;
            }
            other if other.starts_with("--") => {
                eprintln!("Warning: Unknown option '{}'", other);
            }
            _ => break,
        }
        i += 1;
    }

    (options, &args[i.min(args.len())..])
}

fn build_catalog(
    lexicon_path: Option<&Path>,
) -> Result<PatternCatalog<Symbol>, Box<dyn std::error::Error>> {
    let catalog = match lexicon_path {
        Some(path) => load_lexicon(path),
        None => standard_lexicon(),
    };

    catalog.map_err(|error| {
        logging::safe_log_error(error.error_code(), &error.to_string());
        error.into()
    })
}

fn print_help(program_name: &str) {
    println!("lscan v{}", env!("CARGO_PKG_VERSION"));
    println!("Longest-match line scanner driver");
    println!();
    println!("USAGE:");
    println!(
        "    {} [options] [-t] <input>...      # Scan and print each input",
        program_name
    );
    println!(
        "    {} [options] --scan              # Dump tokens read from stdin",
        program_name
    );
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --lexicon FILE      Build the pattern catalog from FILE");
    println!("    --config FILE       Load runtime preferences from a TOML file");
    println!("    --scan              Print every token of stdin as KIND: 'lexeme'");
    println!("    --                  End of options; everything after is an input");
    println!();
    println!("INPUTS:");
    println!("    Each input is scanned on its own and printed as '<input> -> <result>'.");
    println!("    The first -t turns on tracing for every input after it.");
    println!();
    println!("CONFIGURATION:");
    println!(
        "    {}",
        line_scanner::config::build_info::source_info()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn test_options_stop_at_first_input() {
        let args = strings(&["--lexicon", "g.lex", "-t", "1 + 2", "--scan"]);
        let (options, inputs) = parse_options(&args);
        assert_eq!(options.lexicon, Some(PathBuf::from("g.lex")));
        assert!(!options.scan);
        assert_eq!(inputs, &args[2..]);
    }

    #[test]
    fn test_double_dash_ends_options() {
        let args = strings(&["--scan", "--", "--help"]);
        let (options, inputs) = parse_options(&args);
        assert!(options.scan);
        assert!(!options.help);
        assert_eq!(inputs, &args[2..]);
    }

    #[test]
    fn test_missing_option_value() {
        let args = strings(&["--config"]);
        let (options, inputs) = parse_options(&args);
        assert!(options.config.is_none());
        assert!(inputs.is_empty());
    }
}
