// Documentation model extracted from Python source files
//
// Every mapping is an IndexMap so iteration follows declaration order. A name
// defined twice in one scope keeps its first position and its last value.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Documentation for one source file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FileDoc {
    /// Path relative to the scan root, `/`-separated
    pub relative_path: String,
    /// Module-level docstring
    pub module_docstring: Option<String>,
    /// Top-level classes by name
    pub classes: IndexMap<String, ClassDoc>,
    /// Top-level functions by name
    pub functions: IndexMap<String, FunctionDoc>,
}

impl FileDoc {
    /// Create an empty file doc
    pub fn new(relative_path: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            ..Self::default()
        }
    }

    /// Check if the file yielded no documentation at all
    pub fn is_empty(&self) -> bool {
        self.module_docstring.is_none() && self.classes.is_empty() && self.functions.is_empty()
    }

    /// Number of methods across all classes
    pub fn method_count(&self) -> usize {
        self.classes.values().map(|c| c.methods.len()).sum()
    }
}

/// Documentation for a class
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClassDoc {
    pub docstring: Option<String>,
    /// Methods defined directly in the class body
    pub methods: IndexMap<String, FunctionDoc>,
}

/// Documentation for a function or method
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FunctionDoc {
    pub docstring: Option<String>,
    /// Positional parameters mapped to their rendered type
    pub args: IndexMap<String, String>,
    pub return_type: Option<String>,
    pub is_async: bool,
}

impl FunctionDoc {
    /// Render the call signature: `name(a: int, b: Any) -> str`
    pub fn signature(&self, name: &str) -> String {
        let args = self
            .args
            .iter()
            .map(|(arg, ty)| format!("{}: {}", arg, ty))
            .collect::<Vec<_>>()
            .join(", ");

        match &self.return_type {
            Some(ret) => format!("{}({}) -> {}", name, args, ret),
            None => format!("{}({})", name, args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_doc_new_is_empty() {
        let file = FileDoc::new("pkg/mod.py");
        assert_eq!(file.relative_path, "pkg/mod.py");
        assert!(file.is_empty());
    }

    #[test]
    fn test_file_doc_with_docstring_not_empty() {
        let mut file = FileDoc::new("a.py");
        file.module_docstring = Some("Docs.".to_string());
        assert!(!file.is_empty());
    }

    #[test]
    fn test_method_count() {
        let mut class = ClassDoc::default();
        class.methods.insert("a".to_string(), FunctionDoc::default());
        class.methods.insert("b".to_string(), FunctionDoc::default());
        let mut file = FileDoc::new("a.py");
        file.classes.insert("A".to_string(), class);
        file.classes.insert("B".to_string(), ClassDoc::default());
        assert_eq!(file.method_count(), 2);
    }

    #[test]
    fn test_signature_without_return() {
        let mut func = FunctionDoc::default();
        func.args.insert("self".to_string(), "Any".to_string());
        func.args.insert("x".to_string(), "int".to_string());
        assert_eq!(func.signature("run"), "run(self: Any, x: int)");
    }

    #[test]
    fn test_signature_with_return() {
        let mut func = FunctionDoc::default();
        func.return_type = Some("List[str]".to_string());
        assert_eq!(func.signature("names"), "names() -> List[str]");
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut file = FileDoc::new("a.py");
        file.functions.insert("first".to_string(), FunctionDoc::default());
        file.functions.insert("second".to_string(), FunctionDoc::default());
        let redefined = FunctionDoc {
            is_async: true,
            ..FunctionDoc::default()
        };
        file.functions.insert("first".to_string(), redefined);

        let names: Vec<&String> = file.functions.keys().collect();
        assert_eq!(names, vec!["first", "second"]);
        assert!(file.functions["first"].is_async);
    }
}
