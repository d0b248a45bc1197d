/*! Typed IR and JavaScript output AST.
 *
 * The backend sits between a fully resolved program and a JavaScript printer. This crate holds
 * both ends of that bridge: the tree-shaped IR handed over by the type checker, with declarations
 * addressed by stable arena ids, and the append-only output AST the translator populates.
 */

pub mod builder;
pub mod declarations;
pub mod js;
pub mod module;
pub mod nodes;
pub mod types;

pub use builder::{ClassBuilder, FunctionBuilder, ModuleBuilder};
pub use declarations::{
    DeclId, Declaration, DeclarationKind, DeclarationTable, FunctionInfo, ModuleId, Visibility,
};
pub use js::{
    JsBinaryOperator, JsBlock, JsExpression, JsFunction, JsProgramFragment, JsScope, JsStatement,
    JsUnaryOperator, JsVar,
};
pub use module::{IrBuiltins, IrFunction, IrModule, ModuleImport};
pub use nodes::{
    IrBlock, IrCall, IrConst, IrConstant, IrGetValue, IrNode, IrNodeKind, IrReturn,
    IrSetVariable, IrVariable, IrWhileLoop,
};
pub use types::IrType;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IrError {
    #[error("Unknown declaration: {0}")]
    UnknownDeclaration(DeclId),
    #[error("Declaration '{0}' is not a function")]
    NotAFunction(String),
    #[error("Declaration '{0}' has no value type")]
    NoValueType(String),
    #[error("Malformed IR: {0}")]
    Malformed(String),
    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IrError>;

#[cfg(test)]
mod tests;
