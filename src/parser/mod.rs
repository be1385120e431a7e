// Parser module for extracting documentation from Python source files

pub mod annotation;
pub mod ast;
pub mod docstring;
mod python;

pub use annotation::{render_annotation, ANY};
pub use ast::*;
pub use python::PythonParser;
