use crate::declarations::DeclId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Static source type attached to every value-producing IR node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrType {
    Unit,
    Boolean,
    Char,
    Int,
    Long,
    Double,
    String,
    Any,
    Nothing,
    Class(DeclId),
    Nullable(Box<IrType>),
}

impl IrType {
    pub fn nullable(self) -> Self {
        match self {
            IrType::Nullable(_) => self,
            other => IrType::Nullable(Box::new(other)),
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, IrType::Nullable(_))
    }

    pub fn non_null(&self) -> &IrType {
        match self {
            IrType::Nullable(inner) => inner.non_null(),
            other => other,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            IrType::Boolean | IrType::Char | IrType::Int | IrType::Long | IrType::Double
        )
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, IrType::Unit)
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Unit => write!(f, "Unit"),
            IrType::Boolean => write!(f, "Boolean"),
            IrType::Char => write!(f, "Char"),
            IrType::Int => write!(f, "Int"),
            IrType::Long => write!(f, "Long"),
            IrType::Double => write!(f, "Double"),
            IrType::String => write!(f, "String"),
            IrType::Any => write!(f, "Any"),
            IrType::Nothing => write!(f, "Nothing"),
            IrType::Class(id) => write!(f, "class_{}", id.0),
            IrType::Nullable(inner) => write!(f, "{}?", inner),
        }
    }
}
