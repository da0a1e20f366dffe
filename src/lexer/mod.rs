// Lexer module for the PromQL analyzer
// Contains nom parsers for individual tokens/lexemes and the scanners built on them

pub mod duration;
pub mod identifier;
pub mod scan;
pub mod string;
pub mod whitespace;

pub use duration::*;
pub use scan::*;
pub use string::*;
pub use whitespace::*;
