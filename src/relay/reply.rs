/// Turn a display response into a single IRC message line.
///
/// Lines are joined with spaces, CTCP delimiters and NULs are dropped, and
/// the result is cut to at most `max_len` bytes on a character boundary.
/// An empty response yields an empty line.
pub fn render_reply(response: &str, max_len: usize) -> String {
    let joined = response
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let clean: String = joined
        .chars()
        .filter(|c| !matches!(c, '\x01' | '\0'))
        .map(|c| if c == '\r' { ' ' } else { c })
        .collect();

    truncate(clean.trim_end(), max_len).to_string()
}

fn truncate(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text;
    }
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
