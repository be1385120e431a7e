// Markdown rendering of extracted documentation

use crate::extract::Documentation;
use crate::parser::FunctionDoc;

/// Render documentation as a single Markdown document.
///
/// Layout per file: `## path`, optional module docstring, then classes with
/// their methods, then top-level functions, all in insertion order.
pub fn render_markdown(docs: &Documentation) -> String {
    let mut md = String::new();
    md.push_str(&format!("# {}\n\n", docs.title));

    for (path, file) in &docs.files {
        md.push_str(&format!("## {}\n\n", path));

        if let Some(doc) = non_empty(file.module_docstring.as_deref()) {
            md.push_str("### Module Documentation\n\n");
            md.push_str(&format!("{}\n\n", doc));
        }

        for (class_name, class) in &file.classes {
            md.push_str(&format!("### Class: {}\n\n", class_name));
            push_docstring(&mut md, class.docstring.as_deref());

            for (method_name, method) in &class.methods {
                md.push_str(&format!("#### {}\n\n", method_name));
                push_callable(&mut md, method_name, method, "*Async method*");
            }
        }

        for (func_name, func) in &file.functions {
            md.push_str(&format!("### Function: {}\n\n", func_name));
            push_callable(&mut md, func_name, func, "*Async function*");
        }
    }

    md
}

fn push_callable(md: &mut String, name: &str, func: &FunctionDoc, async_marker: &str) {
    if func.is_async {
        md.push_str(&format!("{}\n\n", async_marker));
    }
    md.push_str(&format!("```python\n{}\n```\n\n", func.signature(name)));
    push_docstring(md, func.docstring.as_deref());
}

fn push_docstring(md: &mut String, docstring: Option<&str>) {
    if let Some(doc) = non_empty(docstring) {
        md.push_str(&format!("{}\n\n", doc));
    }
}

fn non_empty(doc: Option<&str>) -> Option<&str> {
    doc.filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ClassDoc, FileDoc};

    fn function(args: &[(&str, &str)], ret: Option<&str>, doc: Option<&str>) -> FunctionDoc {
        FunctionDoc {
            docstring: doc.map(String::from),
            args: args
                .iter()
                .map(|(name, ty)| (name.to_string(), ty.to_string()))
                .collect(),
            return_type: ret.map(String::from),
            is_async: false,
        }
    }

    #[test]
    fn test_empty_documentation_is_title_only() {
        let docs = Documentation::new("Project Documentation");
        assert_eq!(render_markdown(&docs), "# Project Documentation\n\n");
    }

    #[test]
    fn test_empty_file_section() {
        let mut docs = Documentation::new("Project Documentation");
        docs.files.insert("empty.py".to_string(), FileDoc::new("empty.py"));
        assert_eq!(
            render_markdown(&docs),
            "# Project Documentation\n\n## empty.py\n\n"
        );
    }

    #[test]
    fn test_full_layout() {
        let mut class = ClassDoc {
            docstring: Some("A stack.".to_string()),
            ..ClassDoc::default()
        };
        class.methods.insert(
            "push".to_string(),
            function(&[("self", "Any"), ("item", "int")], None, Some("Push an item.")),
        );
        let mut pop = function(&[("self", "Any")], Some("int"), None);
        pop.is_async = true;
        class.methods.insert("pop".to_string(), pop);

        let mut file = FileDoc::new("pkg/stack.py");
        file.module_docstring = Some("Stack utilities.".to_string());
        file.classes.insert("Stack".to_string(), class);
        file.functions.insert(
            "build".to_string(),
            function(&[("n", "Any")], Some("Stack"), Some("Build a stack.")),
        );

        let mut docs = Documentation::new("Project Documentation");
        docs.files.insert("pkg/stack.py".to_string(), file);

        let expected = "\
# Project Documentation

## pkg/stack.py

### Module Documentation

Stack utilities.

### Class: Stack

A stack.

#### push

```python
push(self: Any, item: int)
```

Push an item.

#### pop

*Async method*

```python
pop(self: Any) -> int
```

### Function: build

```python
build(n: Any) -> Stack
```

Build a stack.

";
        assert_eq!(render_markdown(&docs), expected);
    }

    #[test]
    fn test_async_function_marker() {
        let mut func = function(&[], None, None);
        func.is_async = true;
        let mut file = FileDoc::new("a.py");
        file.functions.insert("tick".to_string(), func);
        let mut docs = Documentation::new("T");
        docs.files.insert("a.py".to_string(), file);

        let md = render_markdown(&docs);
        assert!(md.contains("### Function: tick\n\n*Async function*\n\n```python\ntick()\n```\n\n"));
    }

    #[test]
    fn test_empty_docstrings_skipped() {
        let mut file = FileDoc::new("a.py");
        file.classes.insert(
            "Empty".to_string(),
            ClassDoc {
                docstring: Some(String::new()),
                ..ClassDoc::default()
            },
        );
        let mut docs = Documentation::new("T");
        docs.files.insert("a.py".to_string(), file);

        assert_eq!(render_markdown(&docs), "# T\n\n## a.py\n\n### Class: Empty\n\n");
    }

    #[test]
    fn test_files_keep_insertion_order() {
        let mut docs = Documentation::new("T");
        docs.files.insert("z.py".to_string(), FileDoc::new("z.py"));
        docs.files.insert("a.py".to_string(), FileDoc::new("a.py"));

        let md = render_markdown(&docs);
        let z = md.find("## z.py").unwrap();
        let a = md.find("## a.py").unwrap();
        assert!(z < a);
    }
}
