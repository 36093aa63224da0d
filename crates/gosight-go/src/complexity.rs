//! Cyclomatic complexity and nesting depth for a single function body.

use gosight_core::types::NestedLiterals;
use tree_sitter::{Node, TreeCursor};

/// Statements that add a decision point.
const BRANCH_KINDS: &[&str] = &[
    "if_statement",
    "for_statement",
    "expression_switch_statement",
    "type_switch_statement",
    "select_statement",
];

/// Branches whose cases sit inside a brace-delimited body of their own.
/// Entering one of these opens two levels: the statement and that body.
const CASE_BODY_KINDS: &[&str] = &[
    "expression_switch_statement",
    "type_switch_statement",
    "select_statement",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionMetrics {
    pub complexity: u32,
    pub max_depth: u32,
}

/// Measure a function body. A declaration without a body has complexity 1
/// and depth 0.
///
/// Depth is tracked on the way down and restored on the way back up, so the
/// result is the deepest simultaneous nesting, not a running total.
pub fn measure(body: Option<Node>, nested_literals: NestedLiterals) -> FunctionMetrics {
    let mut walker = Walker {
        complexity: 1,
        max_depth: 0,
        nested_literals,
    };
    if let Some(body) = body {
        let mut cursor = body.walk();
        if cursor.goto_first_child() {
            walker.walk(&mut cursor);
        }
    }
    FunctionMetrics {
        complexity: walker.complexity,
        max_depth: walker.max_depth,
    }
}

struct Walker {
    complexity: u32,
    max_depth: u32,
    nested_literals: NestedLiterals,
}

impl Walker {
    /// Pre-order walk over the cursor's node and its following siblings.
    /// `levels` holds the depth each open level of siblings is entered at,
    /// so expression nesting never grows the call stack.
    fn walk(&mut self, cursor: &mut TreeCursor) {
        let mut levels: Vec<u32> = vec![0];
        loop {
            let depth = levels.last().copied().unwrap_or(0);
            if let Some(inner) = self.enter(cursor.node(), depth) {
                if cursor.goto_first_child() {
                    levels.push(inner);
                    continue;
                }
            }
            while !cursor.goto_next_sibling() {
                if levels.len() == 1 || !cursor.goto_parent() {
                    return;
                }
                levels.pop();
            }
        }
    }

    /// Account for `node` and return the depth its children start at, or
    /// `None` when the subtree is not measured.
    fn enter(&mut self, node: Node, depth: u32) -> Option<u32> {
        let kind = node.kind();
        if kind == "func_literal" && self.nested_literals == NestedLiterals::Skip {
            return None;
        }

        let depth = if BRANCH_KINDS.contains(&kind) {
            self.complexity += 1;
            if CASE_BODY_KINDS.contains(&kind) {
                depth + 2
            } else {
                depth + 1
            }
        } else if kind == "block" {
            depth + 1
        } else {
            depth
        };

        self.max_depth = self.max_depth.max(depth);
        Some(depth)
    }
}
