mod complexity;
mod doc;
mod render;

use std::path::Path;

use anyhow::{Context, Result};
use tree_sitter::{Language, Node, Parser, Query, QueryCursor, StreamingIterator};

use gosight_core::analyzer::{Extraction, LanguageAnalyzer, ParsedFile};
use gosight_core::error::AnalysisError;
use gosight_core::types::*;

/// Go language analyzer using tree-sitter.
pub struct GoAnalyzer {
    language: Language,
    package_query: Query,
    import_query: Query,
}

impl GoAnalyzer {
    pub fn new() -> Result<Self> {
        let language: Language = tree_sitter_go::LANGUAGE.into();

        let package_query = Query::new(
            &language,
            r#"
            (package_clause
              (package_identifier) @name)
            "#,
        )
        .context("failed to compile package query")?;

        let import_query = Query::new(
            &language,
            r#"
            (import_spec
              path: (_) @path)
            "#,
        )
        .context("failed to compile import query")?;

        Ok(Self {
            language,
            package_query,
            import_query,
        })
    }

    fn package_name(&self, parsed: &ParsedFile) -> String {
        capture_texts(&self.package_query, "name", parsed)
            .into_iter()
            .next()
            .unwrap_or_default()
    }

    fn imports(&self, parsed: &ParsedFile) -> Vec<String> {
        capture_texts(&self.import_query, "path", parsed)
            .into_iter()
            .map(|raw| raw.trim_matches(|c| c == '"' || c == '`').to_string())
            .collect()
    }
}

impl LanguageAnalyzer for GoAnalyzer {
    fn language(&self) -> &'static str {
        "go"
    }

    fn file_extensions(&self) -> &[&str] {
        &["go"]
    }

    fn is_test_file(&self, file_name: &str) -> bool {
        file_name.ends_with("_test.go")
    }

    fn parse_file(&self, path: &Path, content: &str) -> Result<ParsedFile, AnalysisError> {
        let parse_error = |line: usize, message: String| AnalysisError::Parse {
            path: path.to_path_buf(),
            line,
            message,
        };

        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| parse_error(1, format!("failed to set Go language: {e}")))?;
        let tree = parser
            .parse(content, None)
            .ok_or_else(|| parse_error(1, "parser returned no tree".to_string()))?;

        let root = tree.root_node();
        if let Some(bad) = first_error(root) {
            let message = if bad.is_missing() {
                format!("missing {}", bad.kind())
            } else {
                "syntax error".to_string()
            };
            return Err(parse_error(bad.start_position().row + 1, message));
        }

        let has_package = {
            let mut cursor = root.walk();
            let found = root
                .named_children(&mut cursor)
                .any(|n| n.kind() == "package_clause");
            found
        };
        if !has_package {
            return Err(parse_error(1, "missing package clause".to_string()));
        }

        Ok(ParsedFile {
            path: path.to_path_buf(),
            tree,
            content: content.to_string(),
        })
    }

    fn extract(&self, parsed: &ParsedFile, nested_literals: NestedLiterals) -> Extraction {
        let source = parsed.content.as_str();
        let root = parsed.tree.root_node();
        let mut extraction = Extraction {
            package: self.package_name(parsed),
            imports: self.imports(parsed),
            ..Default::default()
        };

        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            match node.kind() {
                "type_declaration" => extract_types(node, source, &mut extraction.types),
                "function_declaration" | "method_declaration" => {
                    if let Some(func) = extract_function(node, source, nested_literals) {
                        extraction.functions.push(func);
                    }
                }
                _ => {}
            }
        }

        extraction
    }
}

/// Struct and interface specs of one `type` declaration, grouped or not.
fn extract_types(decl: Node, source: &str, types: &mut Vec<TypeDeclaration>) {
    let mut cursor = decl.walk();
    let specs: Vec<Node> = decl
        .named_children(&mut cursor)
        .filter(|n| n.kind() == "type_spec")
        .collect();
    let single = specs.len() == 1;

    for spec in specs {
        let Some(definition) = render::type_shape(spec, source) else {
            continue;
        };
        let Some(name_node) = spec.child_by_field_name("name") else {
            continue;
        };
        let name = node_text(name_node, source);
        let doc = doc::leading_doc(spec, source)
            .or_else(|| single.then(|| doc::leading_doc(decl, source)).flatten());

        types.push(TypeDeclaration {
            exported: is_exported(&name),
            name,
            doc,
            definition,
        });
    }
}

fn extract_function(
    node: Node,
    source: &str,
    nested_literals: NestedLiterals,
) -> Option<FunctionDeclaration> {
    let name = node_text(node.child_by_field_name("name")?, source);
    let metrics = complexity::measure(node.child_by_field_name("body"), nested_literals);

    Some(FunctionDeclaration {
        exported: is_exported(&name),
        name,
        doc: doc::leading_doc(node, source),
        is_method: node.kind() == "method_declaration",
        signature: render::function_signature(node, source),
        start_line: node.start_position().row + 1,
        end_line: node.end_position().row + 1,
        complexity: metrics.complexity,
        max_depth: metrics.max_depth,
    })
}

/// Texts of every capture with the given name, in document order.
fn capture_texts(query: &Query, capture: &str, parsed: &ParsedFile) -> Vec<String> {
    let Some(idx) = query.capture_names().iter().position(|n| *n == capture) else {
        return Vec::new();
    };

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, parsed.tree.root_node(), parsed.content.as_bytes());
    let mut texts = Vec::new();
    while let Some(m) = matches.next() {
        for c in m.captures {
            if c.index as usize == idx {
                texts.push(node_text(c.node, &parsed.content));
            }
        }
    }
    texts
}

/// The first ERROR or MISSING node in document order. Only subtrees that
/// report an error are descended into.
fn first_error(root: Node) -> Option<Node> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

/// Go exports identifiers that start with an upper-case letter.
fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Extract text from a tree-sitter node.
fn node_text(node: Node, source: &str) -> String {
    source[node.byte_range()].to_string()
}
