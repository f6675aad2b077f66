//! Dotenv parsing.
//!
//! Turns decrypted `.env` bytes into ordered key-value pairs for the run
//! executor. The plaintext never touches disk.

use zeroize::Zeroizing;

/// One parsed variable. The value is wiped on drop.
pub type Var = (String, Zeroizing<String>);

/// Parse `KEY=VALUE` lines.
///
/// Blank lines and `#` comments are skipped, an optional `export ` prefix is
/// dropped, keys and values are trimmed. Matching surrounding quotes are
/// stripped; double-quoted values also unescape `\n`, `\r`, `\t`, `\"` and
/// `\\`. Lines without `=` or with an empty key are ignored. Later
/// duplicates win when handed to `Command::envs`.
pub fn parse(contents: &[u8]) -> Vec<Var> {
    let text = String::from_utf8_lossy(contents);
    let mut vars = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        vars.push((key.to_string(), Zeroizing::new(parse_value(value.trim()))));
    }

    vars
}

fn parse_value(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return unescape_double_quoted(&raw[1..raw.len() - 1]);
    }

    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return raw[1..raw.len() - 1].to_string();
    }

    raw.to_string()
}

fn unescape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
