use jsir_core::{IrType, JsExpression};

/// A translated expression paired with the static source type it was produced for.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedExpression {
    pub expression: JsExpression,
    pub ty: IrType,
}

impl TypedExpression {
    pub fn new(expression: JsExpression, ty: IrType) -> Self {
        Self { expression, ty }
    }

    pub fn retyped(self, ty: IrType) -> Self {
        Self {
            expression: self.expression,
            ty,
        }
    }
}
