/// AST (Abstract Syntax Tree) module
/// Contains the expression tree, the type system and the arena owning both
///
/// Submodules:
/// - ast: Expression kinds, structural equality and hashing
/// - context: Arena of types and expressions, stable handles
/// - operators: Unary and binary operators
/// - printer: S-expression dump of expression trees
/// - types: Type representations and their relations
pub mod ast;
pub mod context;
pub mod operators;
pub mod printer;
pub mod types;
