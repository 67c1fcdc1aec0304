use std::sync::LazyLock;

use regex::Regex;

static ESCAPE_SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B\[[0-9;]*[A-Za-z]").expect("escape sequence pattern is valid")
});

/// Turns a raw chunk of child output into a log line.
///
/// Quotes and ANSI escape sequences are removed, literal `\n` becomes a
/// newline and the result is trimmed. Applying it twice changes nothing.
pub fn clean(raw: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(raw).replace('"', "");

    // Removing one sequence can expose another, e.g. "\x1B[\x1B[0m1m".
    while ESCAPE_SEQUENCE.is_match(&text) {
        text = ESCAPE_SEQUENCE.replace_all(&text, "").into_owned();
    }

    text.replace("\\n", "\n").trim().to_string()
}
