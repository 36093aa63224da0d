//! Doc comment association.
//!
//! Go documentation is the comment group directly above a declaration with
//! no blank line in between. The syntax tree keeps comments as siblings of
//! the declarations they precede, so the group is found by stepping back
//! through siblings rather than by scanning byte offsets.

use tree_sitter::Node;

/// Documentation attached to `node`, with comment markers stripped.
/// Returns `None` when there is no doc comment or it is empty.
pub fn leading_doc(node: Node, source: &str) -> Option<String> {
    let mut group = Vec::new();
    let mut next_row = node.start_position().row;
    let mut current = node.prev_sibling();

    while let Some(prev) = current {
        if !prev.is_named() && is_terminator(prev, source) {
            current = prev.prev_sibling();
            continue;
        }
        if prev.kind() != "comment"
            || prev.end_position().row + 1 != next_row
            || !starts_line(prev, source)
        {
            break;
        }
        group.push(prev);
        next_row = prev.start_position().row;
        current = prev.prev_sibling();
    }

    group.reverse();
    let lines: Vec<String> = group
        .iter()
        .flat_map(|c| comment_lines(&source[c.byte_range()]))
        .collect();
    let text = lines.join("\n").trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// Statement terminators the grammar emits as anonymous tokens.
fn is_terminator(node: Node, source: &str) -> bool {
    source[node.byte_range()].trim().trim_matches(';').is_empty()
}

/// True when only whitespace precedes the node on its first line.
fn starts_line(node: Node, source: &str) -> bool {
    let start = node.start_byte();
    let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
    source[line_start..start].trim().is_empty()
}

/// Text lines of one comment: markers removed, the first space after `//`
/// dropped, trailing whitespace trimmed. Directives such as `//go:generate`
/// or `//nolint:errcheck` carry no documentation and yield nothing.
fn comment_lines(raw: &str) -> Vec<String> {
    if let Some(rest) = raw.strip_prefix("//") {
        if is_directive(rest) {
            return Vec::new();
        }
        let rest = rest.strip_prefix(' ').unwrap_or(rest);
        return vec![rest.trim_end().to_string()];
    }
    if let Some(body) = raw.strip_prefix("/*") {
        let body = body.strip_suffix("*/").unwrap_or(body);
        return body.lines().map(|l| l.trim_end().to_string()).collect();
    }
    vec![raw.trim_end().to_string()]
}

/// `//line` and `//word:...` forms, written without a space after the slashes.
fn is_directive(rest: &str) -> bool {
    if rest.starts_with("line ") {
        return true;
    }
    let Some((head, tail)) = rest.split_once(':') else {
        return false;
    };
    !head.is_empty()
        && head
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        && tail
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}
