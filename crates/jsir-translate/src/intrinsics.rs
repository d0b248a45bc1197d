use crate::{
    context::TranslationContext,
    errors::{Result, TranslateError},
    typed::TypedExpression,
};
use jsir_core::{DeclId, IrCall, JsBinaryOperator, JsExpression};
use std::collections::HashMap;

/// Hand-written lowering for a known declaration.
///
/// Receives the receivers and arguments already translated, in evaluation order, with every
/// argument coerced to its parameter type. The result is returned to the caller unmodified.
pub trait Intrinsic {
    fn apply(
        &self,
        context: &mut TranslationContext<'_>,
        call: &IrCall,
        dispatch_receiver: Option<TypedExpression>,
        extension_receiver: Option<TypedExpression>,
        arguments: Vec<TypedExpression>,
    ) -> Result<TypedExpression>;
}

struct FnIntrinsic<F>(F);

impl<F> Intrinsic for FnIntrinsic<F>
where
    F: Fn(
        &mut TranslationContext<'_>,
        &IrCall,
        Option<TypedExpression>,
        Option<TypedExpression>,
        Vec<TypedExpression>,
    ) -> Result<TypedExpression>,
{
    fn apply(
        &self,
        context: &mut TranslationContext<'_>,
        call: &IrCall,
        dispatch_receiver: Option<TypedExpression>,
        extension_receiver: Option<TypedExpression>,
        arguments: Vec<TypedExpression>,
    ) -> Result<TypedExpression> {
        (self.0)(context, call, dispatch_receiver, extension_receiver, arguments)
    }
}

#[derive(Default)]
pub struct IntrinsicTable {
    intrinsics: HashMap<DeclId, Box<dyn Intrinsic>>,
}

impl IntrinsicTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, declaration: DeclId, intrinsic: impl Intrinsic + 'static) -> &mut Self {
        self.intrinsics.insert(declaration, Box::new(intrinsic));
        self
    }

    pub fn register_fn<F>(&mut self, declaration: DeclId, lowering: F) -> &mut Self
    where
        F: Fn(
                &mut TranslationContext<'_>,
                &IrCall,
                Option<TypedExpression>,
                Option<TypedExpression>,
                Vec<TypedExpression>,
            ) -> Result<TypedExpression>
            + 'static,
    {
        self.register(declaration, FnIntrinsic(lowering))
    }

    pub fn get(&self, declaration: DeclId) -> Option<&dyn Intrinsic> {
        self.intrinsics.get(&declaration).map(|intrinsic| intrinsic.as_ref())
    }

    pub fn contains(&self, declaration: DeclId) -> bool {
        self.intrinsics.contains_key(&declaration)
    }

    pub fn len(&self) -> usize {
        self.intrinsics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intrinsics.is_empty()
    }
}

/// Lowers `a.op(b)` (or the extension form `op(a, b)`) to a native binary operator.
pub struct BinaryOperatorIntrinsic {
    pub operator: JsBinaryOperator,
}

impl BinaryOperatorIntrinsic {
    pub fn new(operator: JsBinaryOperator) -> Self {
        Self { operator }
    }
}

impl Intrinsic for BinaryOperatorIntrinsic {
    fn apply(
        &self,
        context: &mut TranslationContext<'_>,
        call: &IrCall,
        dispatch_receiver: Option<TypedExpression>,
        extension_receiver: Option<TypedExpression>,
        arguments: Vec<TypedExpression>,
    ) -> Result<TypedExpression> {
        let mut operands = dispatch_receiver
            .into_iter()
            .chain(extension_receiver)
            .chain(arguments);

        match (operands.next(), operands.next(), operands.next()) {
            (Some(left), Some(right), None) => Ok(TypedExpression::new(
                JsExpression::binary(self.operator, left.expression, right.expression),
                call.ty.clone(),
            )),
            _ => Err(TranslateError::Intrinsic {
                callee: context.name_of(call.callee)?,
                message: format!("'{}' expects exactly two operands", self.operator.symbol()),
            }),
        }
    }
}
