use crate::block::{Block, List, ListItem, Span};
use crate::inline;

const FENCE: &str = "```";
const MAX_HEADING_LEVEL: usize = 3;

/// Parse markdown text into a list of blocks
pub fn parse(markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut state = ParseState::default();

    for line in markdown.lines() {
        process_line(line, &mut state, &mut blocks);
    }
    finish(&mut state, &mut blocks);

    blocks
}

#[derive(Default)]
struct ParseState<'a> {
    // Code fence state; open until a closing fence or end of input
    in_code_block: bool,
    code_language: Option<String>,
    code_content: String,

    // Lines of the paragraph being built
    paragraph: Vec<&'a str>,

    // Items of the list being built
    list_items: Vec<ListItem>,
}

/// How a single source line is classified outside of a code fence
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Fence { language: Option<&'a str> },
    Heading { level: u8, text: &'a str },
    ListItem(&'a str),
    Blank,
    Text(&'a str),
}

fn process_line<'a>(line: &'a str, state: &mut ParseState<'a>, blocks: &mut Vec<Block>) {
    let kind = classify(line);

    if state.in_code_block {
        if let Line::Fence { .. } = kind {
            state.in_code_block = false;
            let content = std::mem::take(&mut state.code_content);
            let language = state.code_language.take();
            blocks.push(Block::CodeBlock { language, content });
        } else {
            state.code_content.push_str(line);
            state.code_content.push('\n');
        }
        return;
    }

    match kind {
        Line::Fence { language } => {
            close_open_blocks(state, blocks);
            state.in_code_block = true;
            state.code_language = language.map(str::to_string);
            state.code_content.clear();
        }
        Line::Heading { level, text } => {
            close_open_blocks(state, blocks);
            blocks.push(Block::Heading {
                level,
                content: inline::parse_line(text),
            });
        }
        Line::ListItem(text) => {
            flush_paragraph(state, blocks);
            state.list_items.push(ListItem {
                content: inline::parse_line(text),
            });
        }
        Line::Blank => close_open_blocks(state, blocks),
        Line::Text(text) => {
            flush_list(state, blocks);
            state.paragraph.push(text);
        }
    }
}

/// End of input: an unterminated fence keeps everything after its opening line
fn finish(state: &mut ParseState<'_>, blocks: &mut Vec<Block>) {
    if state.in_code_block {
        state.in_code_block = false;
        let content = std::mem::take(&mut state.code_content);
        let language = state.code_language.take();
        blocks.push(Block::CodeBlock { language, content });
    } else {
        close_open_blocks(state, blocks);
    }
}

fn close_open_blocks(state: &mut ParseState<'_>, blocks: &mut Vec<Block>) {
    flush_paragraph(state, blocks);
    flush_list(state, blocks);
}

fn flush_paragraph(state: &mut ParseState<'_>, blocks: &mut Vec<Block>) {
    if state.paragraph.is_empty() {
        return;
    }

    let mut content = Vec::new();
    for (i, line) in state.paragraph.drain(..).enumerate() {
        if i > 0 {
            content.push(Span::LineBreak);
        }
        content.extend(inline::parse_line(line));
    }
    blocks.push(Block::Paragraph { content });
}

fn flush_list(state: &mut ParseState<'_>, blocks: &mut Vec<Block>) {
    if state.list_items.is_empty() {
        return;
    }

    let items = std::mem::take(&mut state.list_items);
    blocks.push(Block::List(List { items }));
}

fn classify(line: &str) -> Line<'_> {
    if line.trim().is_empty() {
        return Line::Blank;
    }
    if let Some(language) = fence_language(line) {
        return Line::Fence { language };
    }
    if let Some((level, text)) = heading(line) {
        return Line::Heading { level, text };
    }
    if let Some(text) = list_item(line) {
        return Line::ListItem(text);
    }
    Line::Text(line)
}

/// `Some(tag)` when the line is a fence delimiter; the tag itself is optional.
fn fence_language(line: &str) -> Option<Option<&str>> {
    let rest = line.trim_end().strip_prefix(FENCE)?;
    if rest.contains('`') {
        return None;
    }
    let tag = rest.trim();
    Some(if tag.is_empty() { None } else { Some(tag) })
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > MAX_HEADING_LEVEL {
        return None;
    }
    let text = marker_text(&line[hashes..])?;
    let level = u8::try_from(hashes).ok()?;
    Some((level, text))
}

fn list_item(line: &str) -> Option<&str> {
    marker_text(line.strip_prefix('-')?)
}

/// Text after a block marker: at least one whitespace char, then non-blank text.
fn marker_text(after_marker: &str) -> Option<&str> {
    if !after_marker.starts_with(char::is_whitespace) {
        return None;
    }
    let text = after_marker.trim();
    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::{Line, classify, parse};
    use crate::block::{Block, List, ListItem, Span};
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }

    fn item(s: &str) -> ListItem {
        ListItem {
            content: vec![text(s)],
        }
    }

    #[test]
    fn classify_lines() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify("   \t"), Line::Blank);
        assert_eq!(classify("```"), Line::Fence { language: None });
        assert_eq!(
            classify("```rust  "),
            Line::Fence {
                language: Some("rust")
            }
        );
        assert_eq!(classify("````"), Line::Text("````"));
        assert_eq!(classify("```inline```"), Line::Text("```inline```"));
        assert_eq!(
            classify("## Two"),
            Line::Heading {
                level: 2,
                text: "Two"
            }
        );
        assert_eq!(classify("#### Four"), Line::Text("#### Four"));
        assert_eq!(classify("#tag"), Line::Text("#tag"));
        assert_eq!(classify("#   "), Line::Text("#   "));
        assert_eq!(classify("# "), Line::Text("# "));
        assert_eq!(classify("#  \u{a0}x"), Line::Heading { level: 1, text: "x" });
        assert_eq!(classify("- item"), Line::ListItem("item"));
        assert_eq!(classify("---"), Line::Text("---"));
        assert_eq!(classify("-x"), Line::Text("-x"));
        assert_eq!(classify("#"), Line::Text("#"));
        assert_eq!(classify("-"), Line::Text("-"));
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse(""), vec![]);
        assert_eq!(parse("\n\n   \n"), vec![]);
    }

    #[test]
    fn heading_levels() {
        let blocks = parse("# One\n## Two\n### Three\n#### Four");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 1,
                    content: vec![text("One")]
                },
                Block::Heading {
                    level: 2,
                    content: vec![text("Two")]
                },
                Block::Heading {
                    level: 3,
                    content: vec![text("Three")]
                },
                Block::Paragraph {
                    content: vec![text("#### Four")]
                },
            ]
        );
    }

    #[test]
    fn contiguous_list_items_form_one_list() {
        assert_eq!(
            parse("- a\n- b\n\n- c"),
            vec![
                Block::List(List {
                    items: vec![item("a"), item("b")]
                }),
                Block::List(List {
                    items: vec![item("c")]
                }),
            ]
        );
    }

    #[test]
    fn paragraph_lines_keep_soft_breaks() {
        assert_eq!(
            parse("one\ntwo"),
            vec![Block::Paragraph {
                content: vec![text("one"), Span::LineBreak, text("two")]
            }]
        );
    }

    #[test]
    fn list_and_paragraph_close_each_other() {
        assert_eq!(
            parse("intro\n- a\nafter"),
            vec![
                Block::Paragraph {
                    content: vec![text("intro")]
                },
                Block::List(List {
                    items: vec![item("a")]
                }),
                Block::Paragraph {
                    content: vec![text("after")]
                },
            ]
        );
    }

    #[test]
    fn heading_interrupts_paragraph() {
        assert_eq!(
            parse("text\n# Head\nmore"),
            vec![
                Block::Paragraph {
                    content: vec![text("text")]
                },
                Block::Heading {
                    level: 1,
                    content: vec![text("Head")]
                },
                Block::Paragraph {
                    content: vec![text("more")]
                },
            ]
        );
    }

    #[test]
    fn code_fence_content_is_verbatim() {
        assert_eq!(
            parse("```rust\n# not a heading\n- not a list\n\n**raw**\n```"),
            vec![Block::CodeBlock {
                language: Some("rust".to_string()),
                content: "# not a heading\n- not a list\n\n**raw**\n".to_string(),
            }]
        );
    }

    #[test]
    fn code_fence_closes_open_paragraph() {
        assert_eq!(
            parse("before\n```\ncode\n```\nafter"),
            vec![
                Block::Paragraph {
                    content: vec![text("before")]
                },
                Block::CodeBlock {
                    language: None,
                    content: "code\n".to_string(),
                },
                Block::Paragraph {
                    content: vec![text("after")]
                },
            ]
        );
    }

    #[test]
    fn unterminated_fence_runs_to_end() {
        assert_eq!(
            parse("```\nfn main() {}\n\n# still code"),
            vec![Block::CodeBlock {
                language: None,
                content: "fn main() {}\n\n# still code\n".to_string(),
            }]
        );
        assert_eq!(
            parse("```"),
            vec![Block::CodeBlock {
                language: None,
                content: String::new(),
            }]
        );
    }

    #[test]
    fn crlf_line_endings() {
        assert_eq!(
            parse("# Title\r\n\r\nbody\r\n"),
            vec![
                Block::Heading {
                    level: 1,
                    content: vec![text("Title")]
                },
                Block::Paragraph {
                    content: vec![text("body")]
                },
            ]
        );
    }
}
