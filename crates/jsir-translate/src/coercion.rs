use crate::typed::TypedExpression;
use jsir_core::{DeclarationTable, IrType, JsExpression, JsUnaryOperator};

/// Adapts the runtime representation of a value to a target static type.
///
/// Implementations must be pure and return the value untouched when its type already equals
/// the target. `None` means the two types have no conversion; the caller treats that as an
/// internal error.
pub trait Coercion {
    fn coerce(
        &self,
        value: TypedExpression,
        target: &IrType,
        declarations: &DeclarationTable,
    ) -> Option<TypedExpression>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCoercion;

impl Coercion for StandardCoercion {
    fn coerce(
        &self,
        value: TypedExpression,
        target: &IrType,
        declarations: &DeclarationTable,
    ) -> Option<TypedExpression> {
        if &value.ty == target {
            return Some(value);
        }

        match (&value.ty, target) {
            (IrType::Nothing, _) => return Some(value.retyped(target.clone())),
            (IrType::Unit, _) => {
                return matches!(target.non_null(), IrType::Any | IrType::Unit)
                    .then(|| value.retyped(target.clone()));
            }
            (_, IrType::Unit) => {
                let expression = JsExpression::prefix(JsUnaryOperator::Void, value.expression);
                return Some(TypedExpression::new(expression, IrType::Unit));
            }
            _ => {}
        }

        let source = value.ty.non_null();
        let destination = target.non_null();

        let expression = match (source, destination) {
            (IrType::Char, IrType::Char) if !value.ty.is_nullable() => box_char(value.expression),
            (IrType::Char, IrType::Char) => unbox_char(value.expression),
            (a, b) if a == b => value.expression,
            (IrType::Char, IrType::Any) => box_char(value.expression),
            (IrType::Any, IrType::Char) => unbox_char(value.expression),
            (IrType::Int, IrType::Long) => JsExpression::invoke(
                JsExpression::path(&["Kotlin", "Long", "fromInt"]),
                vec![value.expression],
            ),
            (IrType::Int, IrType::Double) => value.expression,
            (_, IrType::Any) | (IrType::Any, _) => value.expression,
            (IrType::Class(class), IrType::Class(superclass))
                if declarations.is_subclass_of(*class, *superclass) =>
            {
                value.expression
            }
            _ => return None,
        };

        Some(TypedExpression::new(expression, target.clone()))
    }
}

fn box_char(expression: JsExpression) -> JsExpression {
    JsExpression::invoke(JsExpression::path(&["Kotlin", "toBoxedChar"]), vec![expression])
}

fn unbox_char(expression: JsExpression) -> JsExpression {
    JsExpression::invoke(JsExpression::path(&["Kotlin", "unboxChar"]), vec![expression])
}
