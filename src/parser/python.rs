// Python parser using tree-sitter

use crate::error::{Error, Result};
use crate::parser::annotation::{named_children, render_annotation, ANY};
use crate::parser::ast::*;
use crate::parser::docstring::{clean_docstring, parse_string_literal};
use indexmap::IndexMap;
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Parser for Python source files
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    /// Create a new Python parser
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let language = tree_sitter_python::language();
        parser
            .set_language(&language)
            .map_err(|e| Error::parser(format!("Failed to set Python language: {}", e)))?;
        Ok(Self { parser })
    }

    /// Read and parse a Python file
    pub fn parse_file(&mut self, path: &Path, relative_path: &str) -> Result<FileDoc> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
        })?;

        self.parse_source(&source, path, relative_path)
    }

    /// Parse Python source code.
    ///
    /// Any syntax error makes the whole file fail; the caller decides what to
    /// do with a file that cannot be documented.
    pub fn parse_source(&mut self, source: &str, path: &Path, relative_path: &str) -> Result<FileDoc> {
        let source = normalize_source(source);
        let tree = self
            .parser
            .parse(&source, None)
            .ok_or_else(|| Error::parse(path, "parser produced no syntax tree"))?;

        let root = tree.root_node();
        if let Some((bad, reason)) = first_invalid(&root) {
            let pos = bad.start_position();
            return Err(Error::parse(
                path,
                format!("{} at line {}, column {}", reason, pos.row + 1, pos.column + 1),
            ));
        }

        let source = source.as_bytes();
        let mut file = FileDoc::new(relative_path);
        file.module_docstring = extract_docstring(&root, source).filter(|doc| !doc.is_empty());

        // Only direct children of the module count
        for statement in named_children(&root) {
            let Some(def) = definition(&statement) else {
                continue;
            };
            match def.kind() {
                "class_definition" => {
                    if let Some((name, class)) = parse_class(&def, source) {
                        file.classes.insert(name, class);
                    }
                }
                "function_definition" => {
                    if let Some((name, func)) = parse_function(&def, source) {
                        file.functions.insert(name, func);
                    }
                }
                _ => {}
            }
        }

        Ok(file)
    }
}

/// Drop a UTF-8 BOM and fold CRLF line endings
fn normalize_source(source: &str) -> String {
    source.trim_start_matches('\u{feff}').replace("\r\n", "\n")
}

/// First node in document order that Python 3 would reject.
///
/// Besides ERROR and MISSING nodes this catches what the grammar accepts but
/// the language does not: Python 2 `print`/`exec` statements and a required
/// positional parameter after a defaulted one.
fn first_invalid<'t>(node: &Node<'t>) -> Option<(Node<'t>, &'static str)> {
    match node.kind() {
        _ if node.is_error() || node.is_missing() => return Some((*node, "invalid syntax")),
        "print_statement" => return Some((*node, "Python 2 print statement")),
        "exec_statement" => return Some((*node, "Python 2 exec statement")),
        "parameters" | "lambda_parameters" => {
            if let Some(param) = misplaced_required_parameter(node) {
                return Some((param, "non-default argument follows default argument"));
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_invalid(&child) {
            return Some(found);
        }
    }
    None
}

/// A positional parameter without a default that follows one with a default
fn misplaced_required_parameter<'t>(params: &Node<'t>) -> Option<Node<'t>> {
    let mut seen_default = false;
    let mut cursor = params.walk();

    for child in params.children(&mut cursor) {
        match child.kind() {
            "default_parameter" | "typed_default_parameter" => seen_default = true,
            "identifier" if seen_default => return Some(child),
            "typed_parameter" => {
                let target = named_children(&child).into_iter().next();
                match target.map(|t| t.kind()) {
                    Some("identifier") if seen_default => return Some(child),
                    Some("list_splat_pattern") | Some("dictionary_splat_pattern") => break,
                    _ => {}
                }
            }
            "list_splat_pattern" | "dictionary_splat_pattern" | "keyword_separator" | "*" => break,
            _ => {}
        }
    }
    None
}

/// Unwrap decorated definitions to the class or function they decorate
fn definition<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    match node.kind() {
        "class_definition" | "function_definition" => Some(*node),
        "decorated_definition" => node.child_by_field_name("definition"),
        _ => None,
    }
}

/// Docstring of a module or block: a lone string literal as first statement
fn extract_docstring(body: &Node, source: &[u8]) -> Option<String> {
    let statements = named_children(body);
    let first = statements.first()?;
    if first.kind() != "expression_statement" {
        return None;
    }

    match named_children(first).as_slice() {
        [literal] => literal_value(literal, source).map(|doc| clean_docstring(&doc)),
        _ => None,
    }
}

/// Value of a plain string literal, following implicit concatenation and
/// parentheses
fn literal_value(node: &Node, source: &[u8]) -> Option<String> {
    match node.kind() {
        "string" => {
            let lit = parse_string_literal(node.utf8_text(source).ok()?)?;
            lit.is_plain().then_some(lit.value)
        }
        "parenthesized_expression" => match named_children(node).as_slice() {
            [inner] => literal_value(inner, source),
            _ => None,
        },
        "concatenated_string" => named_children(node)
            .iter()
            .map(|part| literal_value(part, source))
            .collect(),
        _ => None,
    }
}

/// Parse a class definition into its name and documentation
fn parse_class(node: &Node, source: &[u8]) -> Option<(String, ClassDoc)> {
    let name = node.child_by_field_name("name")?.utf8_text(source).ok()?.to_string();
    let mut class = ClassDoc::default();

    if let Some(body) = node.child_by_field_name("body") {
        class.docstring = extract_docstring(&body, source);

        for member in named_children(&body) {
            let Some(def) = definition(&member) else {
                continue;
            };
            if def.kind() != "function_definition" {
                continue;
            }
            if let Some((method_name, method)) = parse_function(&def, source) {
                class.methods.insert(method_name, method);
            }
        }
    }

    Some((name, class))
}

/// Parse a function definition into its name and documentation
fn parse_function(node: &Node, source: &[u8]) -> Option<(String, FunctionDoc)> {
    let name = node.child_by_field_name("name")?.utf8_text(source).ok()?.to_string();

    let func = FunctionDoc {
        docstring: node
            .child_by_field_name("body")
            .and_then(|body| extract_docstring(&body, source)),
        args: node
            .child_by_field_name("parameters")
            .map(|params| parse_parameters(&params, source))
            .unwrap_or_default(),
        return_type: node
            .child_by_field_name("return_type")
            .map(|ret| render_annotation(&ret, source)),
        is_async: has_async_keyword(node),
    };

    Some((name, func))
}

/// Check if a function_definition node has an async keyword
fn has_async_keyword(node: &Node) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| child.kind() == "async");
    found
}

/// Collect positional parameters with their rendered types.
///
/// Stops at `*` or `*args`: everything after is keyword-only or `**kwargs`.
fn parse_parameters(node: &Node, source: &[u8]) -> IndexMap<String, String> {
    let mut args = IndexMap::new();
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        match child.kind() {
            "identifier" => {
                if let Ok(name) = child.utf8_text(source) {
                    args.insert(name.to_string(), ANY.to_string());
                }
            }
            "typed_parameter" => {
                let Some(target) = named_children(&child).into_iter().next() else {
                    continue;
                };
                match target.kind() {
                    "identifier" => {
                        if let Ok(name) = target.utf8_text(source) {
                            args.insert(name.to_string(), annotated_type(&child, source));
                        }
                    }
                    "list_splat_pattern" => break,
                    _ => {}
                }
            }
            "default_parameter" | "typed_default_parameter" => {
                let Some(name_node) = child.child_by_field_name("name") else {
                    continue;
                };
                if name_node.kind() != "identifier" {
                    continue;
                }
                if let Ok(name) = name_node.utf8_text(source) {
                    args.insert(name.to_string(), annotated_type(&child, source));
                }
            }
            "list_splat_pattern" | "keyword_separator" | "*" => break,
            _ => {}
        }
    }

    args
}

fn annotated_type(param: &Node, source: &[u8]) -> String {
    param
        .child_by_field_name("type")
        .map_or_else(|| ANY.to_string(), |ty| render_annotation(&ty, source))
}
