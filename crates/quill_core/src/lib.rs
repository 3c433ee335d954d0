//! quill_core: Core utilities shared by the quill scanner and parser.
//!
//! Provides source positions, text spans, the line map used to turn byte
//! offsets into line/column pairs, and identifier interning.

pub mod intern;
pub mod text;

pub use intern::{Symbol, SymbolInterner};
pub use text::{LineMap, SourcePosition, TextPos, TextRange};
