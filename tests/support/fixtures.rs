//! Test fixtures and constants.

/// The canonical two-variable .env file.
pub const SAMPLE_ENV: &str = "FOO=bar\nNUM=42";

/// A .env file exercising the parser's edge cases.
pub const SAMPLE_ENV_COMPLEX: &str = r#"
# This is a comment
SIMPLE=value
QUOTED="quoted value"
SINGLE_QUOTED='single quoted'
ESCAPED="line1\nline2"
export EXPORTED=yes
"#;

/// Control-plane address nothing listens on.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9";
