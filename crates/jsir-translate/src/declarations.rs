use crate::{context::TranslationContext, errors::Result, expression::ExpressionTranslator};
use jsir_core::{IrFunction, IrNode, JsBlock, JsFunction, JsStatement};
use tracing::debug;

/// Lowers a function body and appends `function name(params) { ... }` to the fragment's
/// declaration block.
///
/// The final value of the body becomes the return value unless the function returns `Unit`, in
/// which case it is kept as an expression statement.
pub fn translate_function(context: &mut TranslationContext<'_>, function: &IrFunction) -> Result<()> {
    let declarations = context.declarations();
    let info = declarations.function(function.declaration)?;
    let name = context.name_of(function.declaration)?;
    let params = info
        .params
        .iter()
        .map(|&param| context.name_of(param))
        .collect::<Result<Vec<_>>>()?;
    debug!(function = %name, params = params.len(), "translating function");

    let (result, statements) = context.nested_declaration(function.declaration, |context| {
        context.with_statements(Vec::new(), |context| -> Result<()> {
            let statements = match &function.body {
                IrNode::Block(block) => block.statements.as_slice(),
                body => std::slice::from_ref(body),
            };
            let mut translator = ExpressionTranslator::new(context);
            let Some(value) = translator.translate_sequence(statements)? else {
                return Ok(());
            };
            if info.return_type.is_unit() {
                context.add_statement(JsStatement::Expression(value.expression));
            } else {
                let value = context.coerce(value, &info.return_type)?;
                context.add_statement(JsStatement::Return(Some(value.expression)));
            }
            Ok(())
        })
    });
    result?;

    context
        .declaration_statements()
        .push(JsStatement::Function(JsFunction {
            name: Some(name),
            params,
            body: JsBlock { statements },
        }));
    Ok(())
}
