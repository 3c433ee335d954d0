//! quill_ast: Token kinds and the expression tree.
//!
//! Token kinds are closed enums so that adding a grammar form is a
//! compile-time-checked change. Expression nodes are allocated in a bump
//! arena by the parser and reference their children through `&'a` links;
//! dropping the arena drops the whole tree.

pub mod node;
pub mod syntax_kind;
pub mod visitor;

// Re-export key types
pub use node::*;
pub use syntax_kind::*;
pub use visitor::ExpressionVisitor;
