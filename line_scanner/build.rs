// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    lexicon: LexiconLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct LexiconLimits {
    max_pattern_count: usize,
    max_pattern_length: usize,
    max_lexicon_lines: usize,
    regex_size_limit: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_log_message_length: usize,
    security_min_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=LSCAN_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=LSCAN_CONFIG_DIR");

    let profile = env::var("LSCAN_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("LSCAN_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Workspace root is the parent of the line_scanner directory
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_PATTERNS: usize = 65_536;
    const ABSOLUTE_MAX_REGEX_SIZE: usize = 1 << 30;

    if config.lexicon.max_pattern_count == 0 {
        panic!("LIMITS: max_pattern_count cannot be zero");
    }

    if config.lexicon.max_pattern_count > ABSOLUTE_MAX_PATTERNS {
        panic!("LIMITS: max_pattern_count exceeds absolute maximum");
    }

    if config.lexicon.regex_size_limit > ABSOLUTE_MAX_REGEX_SIZE {
        panic!("LIMITS: regex_size_limit exceeds absolute maximum");
    }

    if config.logging.security_min_log_level > 2 {
        panic!("LIMITS: security_min_log_level too high (max: 2)");
    }

    if profile == "production" && config.lexicon.max_pattern_length > 4096 {
        panic!("PRODUCTION: max_pattern_length too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod lexicon {{
        pub const MAX_PATTERN_COUNT: usize = {};
        pub const MAX_PATTERN_LENGTH: usize = {};
        pub const MAX_LEXICON_LINES: usize = {};
        pub const REGEX_SIZE_LIMIT: usize = {};
    }}

    pub mod logging {{
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        config.lexicon.max_pattern_count,
        config.lexicon.max_pattern_length,
        config.lexicon.max_lexicon_lines,
        config.lexicon.regex_size_limit,
        config.logging.max_log_message_length,
        config.logging.security_min_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}
