/*! Lower typed IR into the JavaScript output AST.
 *
 * Translation is a single recursive walk. A [`TranslationContext`] carries the scoped state
 * (statement sink, enclosing declaration, alias table) and the [`ExpressionTranslator`] visitor
 * lowers calls, blocks, variables, reads, loops and constants against it. Statements a node needs
 * before its value can be read are appended to the current sink; the value itself comes back as a
 * [`TypedExpression`].
 */

pub mod coercion;
pub mod config;
pub mod context;
pub mod declarations;
pub mod errors;
pub mod expression;
pub mod intrinsics;
pub mod naming;
pub mod typed;

pub use coercion::{Coercion, StandardCoercion};
pub use config::TranslationConfig;
pub use context::TranslationContext;
pub use declarations::translate_function;
pub use errors::{Result, TranslateError};
pub use expression::ExpressionTranslator;
pub use intrinsics::{BinaryOperatorIntrinsic, Intrinsic, IntrinsicTable};
pub use naming::{DefaultNaming, NamingContext};
pub use typed::TypedExpression;

use jsir_core::{IrFunction, IrNode, JsProgramFragment};

/// Translates functions into the declaration block and top-level statements into the
/// initializer block of a new fragment.
///
/// Any error leaves the fragment unusable and nothing is returned.
#[tracing::instrument(skip_all, fields(module = %config.module.name, functions = functions.len()))]
pub fn translate_fragment(
    config: &TranslationConfig<'_>,
    functions: &[IrFunction],
    initializer: &[IrNode],
) -> Result<JsProgramFragment> {
    let mut fragment = JsProgramFragment::new();
    {
        let mut context = TranslationContext::new(config, &mut fragment);
        for function in functions {
            translate_function(&mut context, function)?;
        }
        let mut translator = ExpressionTranslator::new(&mut context);
        for statement in initializer {
            translator.translate_statement(statement)?;
        }
        context.finish();
    }
    tracing::debug!(
        declarations = fragment.declaration_block.statements.len(),
        initializer = fragment.initializer_block.statements.len(),
        "fragment translated"
    );
    Ok(fragment)
}

/// Translates every function body and the initializer of the configured module.
pub fn translate_module(config: &TranslationConfig<'_>) -> Result<JsProgramFragment> {
    translate_fragment(config, &config.module.functions, &config.module.initializer)
}

#[cfg(test)]
mod tests;
