//! Normalized text for function signatures and struct/interface shapes.

use tree_sitter::Node;

/// `func (r *T) Name[K comparable](a int, b ...string) (int, error)`
///
/// Works for both `function_declaration` and `method_declaration`.
pub fn function_signature(node: Node, source: &str) -> String {
    let mut sig = String::from("func ");
    if let Some(receiver) = node.child_by_field_name("receiver") {
        sig.push_str(&parameter_list(receiver, source));
        sig.push(' ');
    }
    if let Some(name) = node.child_by_field_name("name") {
        sig.push_str(text(name, source));
    }
    if let Some(tparams) = node.child_by_field_name("type_parameters") {
        sig.push_str(&normalize(text(tparams, source)));
    }
    match node.child_by_field_name("parameters") {
        Some(params) => sig.push_str(&parameter_list(params, source)),
        None => sig.push_str("()"),
    }
    if let Some(result) = node.child_by_field_name("result") {
        sig.push(' ');
        sig.push_str(&result_types(result, source));
    }
    sig
}

/// Shape text for a `type_spec`, or `None` when the type is neither a
/// struct nor an interface.
pub fn type_shape(spec: Node, source: &str) -> Option<String> {
    let name = text(spec.child_by_field_name("name")?, source);
    let tparams = spec
        .child_by_field_name("type_parameters")
        .map(|n| normalize(text(n, source)))
        .unwrap_or_default();
    let ty = spec.child_by_field_name("type")?;

    let (keyword, members) = match ty.kind() {
        "struct_type" => ("struct", struct_members(ty, source)),
        "interface_type" => ("interface", interface_members(ty, source)),
        _ => return None,
    };

    let mut out = format!("type {name}{tparams} {keyword} {{\n");
    for member in members {
        out.push('\t');
        out.push_str(&member);
        out.push('\n');
    }
    out.push('}');
    Some(out)
}

fn struct_members(struct_type: Node, source: &str) -> Vec<String> {
    let mut members = Vec::new();
    let mut cursor = struct_type.walk();
    let Some(list) = struct_type
        .named_children(&mut cursor)
        .find(|n| n.kind() == "field_declaration_list")
    else {
        return members;
    };

    let mut cursor = list.walk();
    for field in list.named_children(&mut cursor) {
        if field.kind() != "field_declaration" {
            continue;
        }
        let Some(ty) = field.child_by_field_name("type") else {
            continue;
        };
        let ty_text = normalize(text(ty, source));

        let mut name_cursor = field.walk();
        let names: Vec<&str> = field
            .children_by_field_name("name", &mut name_cursor)
            .map(|n| text(n, source))
            .collect();
        if names.is_empty() {
            // Embedded field; keep a leading `*` if present.
            members.push(normalize(&source[field.start_byte()..ty.end_byte()]));
        } else {
            members.extend(names.into_iter().map(|n| format!("{n} {ty_text}")));
        }
    }
    members
}

fn interface_members(interface_type: Node, source: &str) -> Vec<String> {
    let mut members = Vec::new();
    let mut cursor = interface_type.walk();
    for elem in interface_type.named_children(&mut cursor) {
        match elem.kind() {
            "method_elem" => {
                let mut line = elem
                    .child_by_field_name("name")
                    .map(|n| text(n, source).to_string())
                    .unwrap_or_default();
                match elem.child_by_field_name("parameters") {
                    Some(params) => line.push_str(&parameter_list(params, source)),
                    None => line.push_str("()"),
                }
                if let Some(result) = elem.child_by_field_name("result") {
                    line.push(' ');
                    line.push_str(&result_types(result, source));
                }
                members.push(line);
            }
            "type_elem" => members.push(normalize(text(elem, source))),
            _ => {}
        }
    }
    members
}

/// `(a int, b int, opts ...Option)` with grouped names expanded.
fn parameter_list(list: Node, source: &str) -> String {
    let mut params = Vec::new();
    let mut cursor = list.walk();
    for param in list.named_children(&mut cursor) {
        let variadic = match param.kind() {
            "parameter_declaration" => false,
            "variadic_parameter_declaration" => true,
            _ => continue,
        };
        let Some(ty) = param.child_by_field_name("type") else {
            continue;
        };
        let ty_text = if variadic {
            format!("...{}", normalize(text(ty, source)))
        } else {
            normalize(text(ty, source))
        };

        let mut name_cursor = param.walk();
        let names: Vec<&str> = param
            .children_by_field_name("name", &mut name_cursor)
            .map(|n| text(n, source))
            .collect();
        if names.is_empty() {
            params.push(ty_text);
        } else {
            params.extend(names.into_iter().map(|n| format!("{n} {ty_text}")));
        }
    }
    format!("({})", params.join(", "))
}

/// Result types only, one per value. Parenthesized when there are two or
/// more values.
fn result_types(result: Node, source: &str) -> String {
    if result.kind() != "parameter_list" {
        return normalize(text(result, source));
    }

    let mut types = Vec::new();
    let mut cursor = result.walk();
    for param in result.named_children(&mut cursor) {
        if param.kind() != "parameter_declaration" {
            continue;
        }
        let Some(ty) = param.child_by_field_name("type") else {
            continue;
        };
        let ty_text = normalize(text(ty, source));
        let mut name_cursor = param.walk();
        let count = param
            .children_by_field_name("name", &mut name_cursor)
            .count()
            .max(1);
        types.extend((0..count).map(|_| ty_text.clone()));
    }

    match types.len() {
        0 => String::new(),
        1 => types.remove(0),
        _ => format!("({})", types.join(", ")),
    }
}

fn text<'a>(node: Node, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

/// Collapse every whitespace run to a single space.
fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::{Parser, Tree};

    fn parse(src: &str) -> Tree {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .unwrap();
        parser.parse(src, None).unwrap()
    }

    fn signature(src: &str) -> String {
        let tree = parse(src);
        let root = tree.root_node();
        let mut cursor = root.walk();
        let func = root
            .named_children(&mut cursor)
            .find(|n| n.kind() == "function_declaration" || n.kind() == "method_declaration")
            .expect("source should declare a function");
        function_signature(func, src)
    }

    fn shape(src: &str) -> Option<String> {
        let tree = parse(src);
        let root = tree.root_node();
        let mut cursor = root.walk();
        let decl = root
            .named_children(&mut cursor)
            .find(|n| n.kind() == "type_declaration")
            .expect("source should declare a type");
        let mut decl_cursor = decl.walk();
        let spec = decl
            .named_children(&mut decl_cursor)
            .find(|n| n.kind() == "type_spec")
            .expect("declaration should have a spec");
        type_shape(spec, src)
    }

    #[test]
    fn test_plain_function() {
        assert_eq!(signature("package a\nfunc Run() {}\n"), "func Run()");
    }

    #[test]
    fn test_grouped_parameters_expanded() {
        assert_eq!(
            signature("package a\nfunc Add(a, b int, name string) int { return a }\n"),
            "func Add(a int, b int, name string) int"
        );
    }

    #[test]
    fn test_multiple_results_parenthesized() {
        assert_eq!(
            signature("package a\nfunc Open(path string) (*File, error) { return nil, nil }\n"),
            "func Open(path string) (*File, error)"
        );
    }

    #[test]
    fn test_named_results_render_types() {
        assert_eq!(
            signature("package a\nfunc Div(a, b int) (q, r int) { return }\n"),
            "func Div(a int, b int) (int, int)"
        );
        assert_eq!(
            signature("package a\nfunc Close() (err error) { return }\n"),
            "func Close() error"
        );
    }

    #[test]
    fn test_method_receiver() {
        assert_eq!(
            signature("package a\nfunc (s *Server) Serve(addr string) error { return nil }\n"),
            "func (s *Server) Serve(addr string) error"
        );
        assert_eq!(
            signature("package a\nfunc (Server) Name() string { return \"\" }\n"),
            "func (Server) Name() string"
        );
    }

    #[test]
    fn test_unnamed_and_variadic_parameters() {
        assert_eq!(
            signature("package a\nfunc Log(string, ...interface{})\n"),
            "func Log(string, ...interface{})"
        );
        assert_eq!(
            signature("package a\nfunc Printf(format string, args ...any) {}\n"),
            "func Printf(format string, args ...any)"
        );
    }

    #[test]
    fn test_type_parameters() {
        assert_eq!(
            signature("package a\nfunc Map[T, U any](xs []T, f func(T) U) []U { return nil }\n"),
            "func Map[T, U any](xs []T, f func(T) U) []U"
        );
    }

    #[test]
    fn test_whitespace_collapsed_in_types() {
        assert_eq!(
            signature("package a\nfunc F(m map[string]   struct {\n\tx int\n}) {}\n"),
            "func F(m map[string] struct { x int })"
        );
    }

    #[test]
    fn test_struct_shape() {
        let src = "package a\ntype User struct {\n\tID, Age int\n\tName string `json:\"name\"`\n\t*Base\n\tio.Reader\n}\n";
        assert_eq!(
            shape(src).as_deref(),
            Some("type User struct {\n\tID int\n\tAge int\n\tName string\n\t*Base\n\tio.Reader\n}")
        );
    }

    #[test]
    fn test_empty_struct_shape() {
        assert_eq!(
            shape("package a\ntype Empty struct{}\n").as_deref(),
            Some("type Empty struct {\n}")
        );
    }

    #[test]
    fn test_interface_shape() {
        let src = "package a\ntype Store interface {\n\tio.Closer\n\tGet(key string) ([]byte, error)\n\tLen() int\n}\n";
        assert_eq!(
            shape(src).as_deref(),
            Some("type Store interface {\n\tio.Closer\n\tGet(key string) ([]byte, error)\n\tLen() int\n}")
        );
    }

    #[test]
    fn test_generic_struct_shape() {
        assert_eq!(
            shape("package a\ntype Box[T any] struct {\n\tv T\n}\n").as_deref(),
            Some("type Box[T any] struct {\n\tv T\n}")
        );
    }

    #[test]
    fn test_other_shapes_omitted() {
        assert_eq!(shape("package a\ntype ID int\n"), None);
        assert_eq!(shape("package a\ntype Handler func(int) error\n"), None);
    }
}
