//! Best-effort CSS inlining.
//!
//! Rules are applied in source order and each one is appended to the
//! element's `style` attribute, so a later rule wins over an earlier one
//! regardless of selector specificity. This is a deliberate simplification
//! and not a cascade implementation.

use kuchiki::NodeRef;
use tracing::debug;
use twinpane_parser::dom;

/// One `selector { declarations }` block from a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    pub selector: String,
    pub declarations: String,
}

/// Split a stylesheet into rules with a brace-matching scan.
///
/// At-rules (`@media`, `@font-face`, `@import`, ...) and rules with nested
/// blocks are skipped.
pub fn parse_css_rules(css: &str) -> Vec<CssRule> {
    let css = strip_comments(css);
    let mut rules = Vec::new();
    let mut selector = String::new();
    let mut chars = css.chars();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                let (body, nested) = read_block(&mut chars);
                let sel = selector.trim();
                let declarations = body.trim();
                if !sel.is_empty() && !sel.starts_with('@') && !nested && !declarations.is_empty()
                {
                    rules.push(CssRule {
                        selector: sel.to_string(),
                        declarations: declarations.to_string(),
                    });
                }
                selector.clear();
            }
            ';' if selector.trim_start().starts_with('@') => selector.clear(),
            '}' => selector.clear(),
            _ => selector.push(c),
        }
    }

    rules
}

/// Read up to the brace closing an already-opened block.
///
/// Returns the block's text and whether it contained nested blocks.
fn read_block(chars: &mut std::str::Chars<'_>) -> (String, bool) {
    let mut body = String::new();
    let mut depth = 1usize;
    let mut nested = false;

    for c in chars.by_ref() {
        match c {
            '{' => {
                depth += 1;
                nested = true;
            }
            '}' => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
        body.push(c);
    }

    (body, nested)
}

fn strip_comments(css: &str) -> String {
    let mut output = String::with_capacity(css.len());
    let mut rest = css;

    while let Some(start) = rest.find("/*") {
        output.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => {
                rest = "";
                break;
            }
        }
    }
    output.push_str(rest);
    output
}

/// Move every `<style>` rule onto the elements it selects, then drop the
/// `<style>` elements. Selectors that fail to parse are skipped.
pub fn inline_css(document: &NodeRef) {
    let style_elements = dom::all_matches(document, "style");
    let stylesheet = style_elements
        .iter()
        .map(|style| style.text_contents())
        .collect::<Vec<_>>()
        .join("\n");

    for rule in parse_css_rules(&stylesheet) {
        let Ok(matches) = document.select(&rule.selector) else {
            debug!("skipping unsupported selector {:?}", rule.selector);
            continue;
        };

        for element in matches {
            let mut attributes = element.attributes.borrow_mut();
            let merged = match attributes.get("style") {
                Some(existing) if !existing.trim().is_empty() => format!(
                    "{}; {}",
                    existing.trim_end_matches(|c: char| c == ';' || c.is_whitespace()),
                    rule.declarations
                ),
                _ => rule.declarations.clone(),
            };
            attributes.insert("style", merged);
        }
    }

    for style in style_elements {
        style.detach();
    }
}
