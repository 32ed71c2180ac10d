/// Marker added where a snippet was cut.
pub const ELLIPSIS: &str = "...";

/// Bounded excerpt of `text` centred on the first case-insensitive occurrence
/// of `query`. Offsets and lengths are counted in characters.
///
/// With an empty `text` or `query`, or no occurrence, the first `max_length`
/// characters are returned instead. Otherwise the window spans
/// `max(0, p - max_length/3) .. min(len, p + len(query) + max_length/3)`.
pub fn extract_snippet(text: &str, query: &str, max_length: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let needle: Vec<char> = query.chars().collect();
    if chars.is_empty() || needle.is_empty() {
        return head(&chars, max_length);
    }
    let Some(pos) = find_ignore_case(&chars, &needle) else {
        return head(&chars, max_length);
    };

    let margin = max_length / 3;
    let start = pos.saturating_sub(margin);
    let end = chars.len().min(pos + needle.len() + margin);

    let mut snippet = String::with_capacity(end - start + 2 * ELLIPSIS.len());
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.extend(&chars[start..end]);
    if end < chars.len() {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}

fn head(chars: &[char], max_length: usize) -> String {
    let mut out: String = chars.iter().take(max_length).collect();
    if chars.len() > max_length {
        out.push_str(ELLIPSIS);
    }
    out
}

fn find_ignore_case(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&start| {
        haystack[start..start + needle.len()]
            .iter()
            .zip(needle)
            .all(|(a, b)| chars_eq_ignore_case(*a, *b))
    })
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
