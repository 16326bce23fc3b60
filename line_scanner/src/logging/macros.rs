//! Type-safe logging macros using Code types with Display support
//!
//! Context values are `"key" => value` pairs where `value` implements `Display`.
//! Nothing is formatted unless the global service would accept the event.

// ============================================================================
// ERROR LOGGING MACROS
// ============================================================================

/// Log error with Code type - accepts Display types for context values
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr, line = $line:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::log_enabled($crate::logging::LogLevel::Error) {
            let event = $crate::logging::LogEvent::error($code, $message).with_line($line);
            $( let event = event.with_context($key, &format!("{}", $value)); )*
            $crate::logging::emit(event);
        }
    };

    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::log_enabled($crate::logging::LogLevel::Error) {
            let event = $crate::logging::LogEvent::error($code, $message);
            $( let event = event.with_context($key, &format!("{}", $value)); )*
            $crate::logging::emit(event);
        }
    };
}

// ============================================================================
// WARNING LOGGING MACROS
// ============================================================================

/// Log warning message, optionally with a specific code
#[macro_export]
macro_rules! log_warning {
    (code = $code:expr, $message:expr, line = $line:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::log_enabled($crate::logging::LogLevel::Warning) {
            let event = $crate::logging::LogEvent::warning_with_code($code, $message)
                .with_line($line);
            $( let event = event.with_context($key, &format!("{}", $value)); )*
            $crate::logging::emit(event);
        }
    };

    (code = $code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::log_enabled($crate::logging::LogLevel::Warning) {
            let event = $crate::logging::LogEvent::warning_with_code($code, $message);
            $( let event = event.with_context($key, &format!("{}", $value)); )*
            $crate::logging::emit(event);
        }
    };

    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::log_enabled($crate::logging::LogLevel::Warning) {
            let event = $crate::logging::LogEvent::warning($message);
            $( let event = event.with_context($key, &format!("{}", $value)); )*
            $crate::logging::emit(event);
        }
    };
}

// ============================================================================
// SUCCESS / INFO LOGGING MACROS
// ============================================================================

/// Log success with Code type - accepts Display types for context values
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::log_enabled($crate::logging::LogLevel::Info) {
            let event = $crate::logging::LogEvent::success($code, $message);
            $( let event = event.with_context($key, &format!("{}", $value)); )*
            $crate::logging::emit(event);
        }
    };
}

/// Log informational message - accepts Display types for context values
#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::log_enabled($crate::logging::LogLevel::Info) {
            let event = $crate::logging::LogEvent::info($message);
            $( let event = event.with_context($key, &format!("{}", $value)); )*
            $crate::logging::emit(event);
        }
    };
}

// ============================================================================
// DEBUG LOGGING MACROS
// ============================================================================

/// Log debug message - accepts Display types for context values
#[macro_export]
macro_rules! log_debug {
    ($message:expr, line = $line:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::log_enabled($crate::logging::LogLevel::Debug) {
            let event = $crate::logging::LogEvent::debug($message).with_line($line);
            $( let event = event.with_context($key, &format!("{}", $value)); )*
            $crate::logging::emit(event);
        }
    };

    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::log_enabled($crate::logging::LogLevel::Debug) {
            let event = $crate::logging::LogEvent::debug($message);
            $( let event = event.with_context($key, &format!("{}", $value)); )*
            $crate::logging::emit(event);
        }
    };
}
