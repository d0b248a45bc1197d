use jsir_core::{IrError, IrNodeKind, IrType};
use thiserror::Error;

/// Compiler-internal failures. Each one means an upstream phase handed over malformed IR;
/// the fragment being built must be discarded.
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("No conversion from {from} to {to} in {declaration}")]
    NoConversion {
        from: IrType,
        to: IrType,
        declaration: String,
    },

    #[error("{node} node used as {position} in {declaration} produced no value")]
    MissingValue {
        node: IrNodeKind,
        position: &'static str,
        declaration: String,
    },

    #[error("Empty block in {declaration}")]
    EmptyBlock { declaration: String },

    #[error("Intrinsic for '{callee}' failed: {message}")]
    Intrinsic { callee: String, message: String },

    #[error(transparent)]
    Ir(#[from] IrError),
}

pub type Result<T> = std::result::Result<T, TranslateError>;
