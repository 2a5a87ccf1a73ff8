/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Node kinds, spans and the root `AST` container
/// - expressions: Expression nodes and operator tables
/// - statements: Items, blocks and statement nodes
/// - types: Type annotations and literal tags
/// - visitor: Read-only traversal
/// - printer: Canonical source printer
pub mod ast;
pub mod expressions;
pub mod printer;
pub mod statements;
pub mod types;
pub mod visitor;

#[cfg(test)]
mod tests;
