// Rendering of type annotation nodes into type strings
//
// Rendering is approximate: a handful of node shapes are
// recognised and everything else becomes `Any`. It never fails.

use super::docstring::parse_string_literal;
use tree_sitter::Node;

/// Fallback for unannotated parameters and unrecognised annotations
pub const ANY: &str = "Any";

/// Render an annotation node as a type string
pub fn render_annotation(node: &Node, source: &[u8]) -> String {
    match node.kind() {
        // Wrappers that carry no meaning of their own
        "type" | "parenthesized_expression" => match named_children(node).first() {
            Some(inner) => render_annotation(inner, source),
            None => ANY.to_string(),
        },
        "identifier" => node_text(node, source).unwrap_or(ANY).to_string(),
        "none" => "None".to_string(),
        "true" => "True".to_string(),
        "false" => "False".to_string(),
        "ellipsis" => "Ellipsis".to_string(),
        "integer" => node_text(node, source).map_or_else(|| ANY.to_string(), render_integer),
        "float" => node_text(node, source).map_or_else(|| ANY.to_string(), render_float),
        "string" => render_string(node, source),
        "concatenated_string" => render_concatenated(node, source),
        "generic_type" => {
            let children = named_children(node);
            let base = children.iter().find(|c| c.kind() != "type_parameter");
            let params = children.iter().find(|c| c.kind() == "type_parameter");
            match (base, params) {
                (Some(base), Some(params)) => format!(
                    "{}[{}]",
                    render_annotation(base, source),
                    render_slice(&named_children(params), source)
                ),
                _ => ANY.to_string(),
            }
        }
        "subscript" => {
            let Some(value) = node.child_by_field_name("value") else {
                return ANY.to_string();
            };
            let mut cursor = node.walk();
            let slice: Vec<Node> = node.children_by_field_name("subscript", &mut cursor).collect();
            format!(
                "{}[{}]",
                render_annotation(&value, source),
                render_slice(&slice, source)
            )
        }
        "union_type" => match named_children(node).as_slice() {
            [left, right] => render_union(left, right, source),
            _ => ANY.to_string(),
        },
        "binary_operator" => {
            let is_or = node
                .child_by_field_name("operator")
                .is_some_and(|op| op.kind() == "|");
            match (
                is_or,
                node.child_by_field_name("left"),
                node.child_by_field_name("right"),
            ) {
                (true, Some(left), Some(right)) => render_union(&left, &right, source),
                _ => ANY.to_string(),
            }
        }
        "list" => format!("[{}]", render_elements(&named_children(node), source)),
        "tuple" => format!("({})", render_elements(&named_children(node), source)),
        _ => ANY.to_string(),
    }
}

/// Several subscript arguments form a tuple, so `Dict[str, int]` renders as
/// `Dict[(str, int)]`
fn render_slice(items: &[Node], source: &[u8]) -> String {
    match items {
        [] => ANY.to_string(),
        [single] => render_annotation(single, source),
        many => format!("({})", render_elements(many, source)),
    }
}

fn render_union(left: &Node, right: &Node, source: &[u8]) -> String {
    format!(
        "Union[{}, {}]",
        render_annotation(left, source),
        render_annotation(right, source)
    )
}

fn render_elements(items: &[Node], source: &[u8]) -> String {
    items
        .iter()
        .map(|item| render_annotation(item, source))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_string(node: &Node, source: &[u8]) -> String {
    let Some(text) = node_text(node, source) else {
        return ANY.to_string();
    };
    match parse_string_literal(text) {
        Some(lit) if lit.is_formatted => ANY.to_string(),
        Some(lit) if lit.is_bytes => text.to_string(),
        Some(lit) => lit.value,
        None => ANY.to_string(),
    }
}

fn render_concatenated(node: &Node, source: &[u8]) -> String {
    let mut value = String::new();
    for part in named_children(node) {
        let Some(lit) = node_text(&part, source).and_then(parse_string_literal) else {
            return ANY.to_string();
        };
        if lit.is_formatted {
            return ANY.to_string();
        }
        if lit.is_bytes {
            return node_text(node, source).unwrap_or(ANY).to_string();
        }
        value.push_str(&lit.value);
    }
    value
}

/// Integer literals render as their decimal value
fn render_integer(text: &str) -> String {
    let cleaned = text.replace('_', "");
    let lower = cleaned.to_ascii_lowercase();

    let parsed = if let Some(digits) = lower.strip_prefix("0x") {
        u128::from_str_radix(digits, 16).ok()
    } else if let Some(digits) = lower.strip_prefix("0o") {
        u128::from_str_radix(digits, 8).ok()
    } else if let Some(digits) = lower.strip_prefix("0b") {
        u128::from_str_radix(digits, 2).ok()
    } else {
        lower.parse::<u128>().ok()
    };

    parsed.map(|v| v.to_string()).unwrap_or(cleaned)
}

/// Float literals render the way Python prints the value: shortest
/// round-trip digits, positional between 1e-4 and 1e16, otherwise scientific
/// with a signed two-digit exponent
fn render_float(text: &str) -> String {
    let cleaned = text.replace('_', "");
    let Ok(value) = cleaned.parse::<f64>() else {
        return cleaned;
    };
    if value.is_infinite() {
        return "inf".to_string();
    }

    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return cleaned;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return cleaned;
    };

    if (-4..16).contains(&exponent) {
        let positional = value.to_string();
        if positional.contains('.') {
            positional
        } else {
            format!("{}.0", positional)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

fn node_text<'s>(node: &Node, source: &'s [u8]) -> Option<&'s str> {
    node.utf8_text(source).ok()
}

/// Named children without comments
pub(crate) fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    children
}
