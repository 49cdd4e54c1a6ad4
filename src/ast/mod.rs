/// AST (Abstract Syntax Tree) module
/// Contains the tree produced by a parse
///
/// Submodules:
/// - ast: The node type, its `{token, child, ...}` rendering and infix rendering
pub mod ast;
