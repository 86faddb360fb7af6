use crate::block::Span;

/// Split a single line of block text into inline spans.
///
/// Scans left to right; at each position inline code wins over bold, and bold
/// over italic. A delimiter only opens a span when a closing delimiter follows
/// with non-empty content in between, otherwise it stays literal text.
pub fn parse_line(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut text = String::new();
    let mut pos = 0;

    while pos < line.len() {
        let rest = &line[pos..];

        if let Some((span, consumed)) = match_delimited(rest) {
            if !text.is_empty() {
                spans.push(Span::Text(std::mem::take(&mut text)));
            }
            spans.push(span);
            pos += consumed;
            continue;
        }

        // Not a span start: take one char as plain text
        let Some(ch) = rest.chars().next() else {
            break;
        };
        text.push(ch);
        pos += ch.len_utf8();
    }

    if !text.is_empty() {
        spans.push(Span::Text(text));
    }

    spans
}

/// Try each delimiter in precedence order at the start of `rest`.
/// Returns the span and the number of bytes it consumed.
fn match_delimited(rest: &str) -> Option<(Span, usize)> {
    if let Some((inner, consumed)) = enclosed(rest, "`") {
        return Some((Span::Code(inner.to_string()), consumed));
    }
    if let Some((inner, consumed)) = enclosed(rest, "**") {
        return Some((Span::Bold(inner.to_string()), consumed));
    }
    if let Some((inner, consumed)) = italic(rest) {
        return Some((Span::Italic(inner.to_string()), consumed));
    }
    None
}

/// Like `enclosed` for `*`, but a `**…**` pair inside the run is kept whole
/// instead of lending its first `*` as the closing delimiter.
fn italic(rest: &str) -> Option<(&str, usize)> {
    let body = rest.strip_prefix('*')?;
    let mut end = 0;

    while let Some(offset) = body[end..].find('*') {
        let star = end + offset;
        if let Some((_, consumed)) = enclosed(&body[star..], "**") {
            end = star + consumed;
            continue;
        }
        if star == 0 {
            return None;
        }
        return Some((&body[..star], star + 2));
    }

    None
}

/// Shortest non-empty run between `delim` at the start of `rest` and the next `delim`.
fn enclosed<'a>(rest: &'a str, delim: &str) -> Option<(&'a str, usize)> {
    let body = rest.strip_prefix(delim)?;
    let end = body.find(delim)?;
    if end == 0 {
        return None;
    }
    Some((&body[..end], delim.len() * 2 + end))
}
