//! Line-based HTML re-indentation.
//!
//! This is a heuristic, not a markup-aware pretty printer: it never looks
//! inside `<pre>` or `<textarea>` and only reasons about one line at a time.

const INDENT: &str = "  ";

/// Put every tag on its own line and indent two spaces per nesting level.
///
/// Running it on its own output changes nothing.
pub fn format_html(html: &str) -> String {
    let spaced = html.replace("><", ">\n<");

    let mut depth = 0usize;
    let mut lines = Vec::new();

    for line in spaced.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            lines.push(String::new());
            continue;
        }

        if trimmed.starts_with("</") && !trimmed.contains("/>") {
            depth = depth.saturating_sub(1);
        }

        lines.push(format!("{}{}", INDENT.repeat(depth), trimmed));

        if opens_block(trimmed) {
            depth += 1;
        }
    }

    lines.join("\n")
}

fn opens_block(line: &str) -> bool {
    if !line.starts_with('<') || line.starts_with("</") || line.starts_with("<!") {
        return false;
    }
    if line.ends_with("/>") {
        return false;
    }

    let tag = tag_name(line);
    if tag.is_empty() || is_void(&tag) {
        return false;
    }

    // `<p>text</p>` on a single line opens and closes in place
    !line
        .to_ascii_lowercase()
        .ends_with(&format!("</{}>", tag))
}

fn tag_name(line: &str) -> String {
    line[1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_ascii_lowercase()
}

fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
