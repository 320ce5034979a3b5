//! Declaration summaries: AST-based extraction of top-level Go declarations
//!
//! Turns the bytes of one source unit into one line per declaration, block bodies
//! collapsed to a placeholder.
//!
//! ## Architecture
//!
//! ```text
//! decls/
//! ├── mod.rs         - Entry point, pipeline wiring
//! ├── common.rs      - Shared tree helpers
//! ├── parse.rs       - tree-sitter parsing and file-level syntax checks
//! ├── filter.rs      - Import dropping and group flattening
//! ├── render.rs      - gofmt-style printing of specs, signatures and bodies
//! ├── expr.rs        - gofmt-style printing of expressions and types
//! └── truncate.rs    - One-line summaries
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use godecls_lib::decls::summarize;
//!
//! let lines = summarize("<no filename>", b"package main\nfunc main() {}\n")?;
//! assert_eq!(lines, vec!["func main() {...}\n"]);
//! ```

pub mod common;
pub mod expr;
pub mod filter;
pub mod parse;
pub mod render;
pub mod truncate;

pub use filter::{Declaration, DeclarationItem, Keyword};
pub use parse::SyntaxTree;
pub use truncate::PLACEHOLDER;

use crate::error::Error;

/// Summarize every top-level declaration of one source unit.
///
/// Each returned line ends with a single `\n`. Nothing is returned for a unit that
/// fails: either every declaration is summarized or the unit's error is.
pub fn summarize(name: &str, bytes: &[u8]) -> Result<Vec<String>, Error> {
    let tree = parse::parse(name, bytes)?;
    let declarations = filter::declarations(&tree);
    let items = filter::items(&declarations);

    let mut lines = Vec::with_capacity(items.len());
    for item in &items {
        let rendered = render::render(&tree, item)?;
        lines.push(truncate::truncate(&rendered));
    }
    tracing::debug!(unit = name, declarations = lines.len(), "summarized source unit");
    Ok(lines)
}
