//! Post-processing of completion text before it is returned to the caller.

const FENCE: &str = "```";

/// Strip a leading and a trailing Markdown code fence (```` ``` ```` with an
/// optional language tag) plus surrounding whitespace. Everything between the
/// fences is returned verbatim.
pub fn clean_completion(text: &str) -> String {
    let mut body = text.trim();

    if let Some(first_line) = body.lines().next() {
        if is_fence(first_line) {
            body = body[first_line.len()..].trim_start();
        }
    }

    if let Some(last_line) = body.lines().next_back() {
        if is_fence(last_line) {
            body = body[..body.len() - last_line.len()].trim_end();
        }
    }

    body.to_string()
}

fn is_fence(line: &str) -> bool {
    match line.trim().strip_prefix(FENCE) {
        Some(tag) => tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')),
        None => false,
    }
}

/// Truncate `text` to at most `max_chars` characters for log output.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
