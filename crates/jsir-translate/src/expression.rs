use crate::{
    context::TranslationContext,
    errors::{Result, TranslateError},
    typed::TypedExpression,
};
use jsir_core::{
    IrBlock, IrCall, IrConst, IrConstant, IrGetValue, IrNode, IrVariable, IrWhileLoop, JsBlock,
    JsExpression, JsStatement,
};
use tracing::{debug, trace};

/// Lowers IR expressions and statements into the context's current sink.
///
/// `translate` yields `Some` for nodes that produce a value and `None` both for pure statements
/// (variables, loops) and for node kinds this translator does not cover.
pub struct ExpressionTranslator<'c, 'a> {
    context: &'c mut TranslationContext<'a>,
}

impl<'c, 'a> ExpressionTranslator<'c, 'a> {
    pub fn new(context: &'c mut TranslationContext<'a>) -> Self {
        Self { context }
    }

    pub fn translate(&mut self, node: &IrNode) -> Result<Option<TypedExpression>> {
        trace!(kind = %node.kind(), "translating node");
        match node {
            IrNode::Call(call) => self.translate_call(call).map(Some),
            IrNode::Block(block) => self.translate_block(block),
            IrNode::Variable(variable) => {
                self.translate_variable(variable)?;
                Ok(None)
            }
            IrNode::GetValue(get) => self.translate_get_value(get).map(Some),
            IrNode::WhileLoop(loop_) => {
                self.translate_while_loop(loop_)?;
                Ok(None)
            }
            IrNode::Const(constant) => Ok(translate_const(constant)),
            // Covered by a fuller dispatcher composed on top of this one.
            IrNode::SetVariable(_) | IrNode::Return(_) | IrNode::Break | IrNode::Continue => {
                Ok(None)
            }
        }
    }

    /// Translates a node sitting where a value is required.
    pub fn translate_value(
        &mut self,
        node: &IrNode,
        position: &'static str,
    ) -> Result<TypedExpression> {
        match self.translate(node)? {
            Some(value) => Ok(value),
            None => Err(self.context.missing_value(node.kind(), position)),
        }
    }

    /// Translates a node whose value, if any, is discarded.
    pub fn translate_statement(&mut self, node: &IrNode) -> Result<()> {
        if let Some(value) = self.translate(node)? {
            self.context
                .add_statement(JsStatement::Expression(value.expression));
        }
        Ok(())
    }

    /// Translates a statement sequence in the current sink; the last statement's value is the
    /// result.
    pub fn translate_sequence(&mut self, statements: &[IrNode]) -> Result<Option<TypedExpression>> {
        let Some((last, leading)) = statements.split_last() else {
            return Ok(None);
        };
        for statement in leading {
            self.translate_statement(statement)?;
        }
        self.translate(last)
    }

    fn translate_call(&mut self, call: &IrCall) -> Result<TypedExpression> {
        let config = self.context.config();
        let declarations = self.context.declarations();
        let function = declarations.function(call.callee)?;

        let dispatch_receiver = call
            .dispatch_receiver
            .as_deref()
            .map(|receiver| self.translate_value(receiver, "dispatch receiver"))
            .transpose()?;
        let extension_receiver = call
            .extension_receiver
            .as_deref()
            .map(|receiver| self.translate_value(receiver, "extension receiver"))
            .transpose()?;

        let mut arguments = Vec::with_capacity(function.params.len());
        for (index, &parameter) in function.params.iter().enumerate() {
            let parameter_type = declarations.value_type(parameter)?;
            let value = match call.value_argument(index) {
                Some(argument) => self.translate_value(argument, "argument")?,
                None => TypedExpression::new(JsExpression::void_zero(), parameter_type.clone()),
            };
            arguments.push(self.context.coerce(value, parameter_type)?);
        }

        if let Some(intrinsic) = config.intrinsics.get(call.callee) {
            debug!(callee = %call.callee, "lowering call through intrinsic");
            return intrinsic.apply(
                self.context,
                call,
                dispatch_receiver,
                extension_receiver,
                arguments,
            );
        }

        let qualifier = match dispatch_receiver {
            Some(receiver) => {
                JsExpression::member(receiver.expression, self.context.name_of(call.callee)?)
            }
            None => self.context.translate_as_value_reference(call.callee)?,
        };

        let all_arguments = extension_receiver
            .into_iter()
            .chain(arguments)
            .map(|argument| argument.expression)
            .collect();

        Ok(TypedExpression::new(
            JsExpression::invoke(qualifier, all_arguments),
            call.ty.clone(),
        ))
    }

    fn translate_block(&mut self, block: &IrBlock) -> Result<Option<TypedExpression>> {
        if block.statements.is_empty() {
            return Err(TranslateError::EmptyBlock {
                declaration: self.context.describe_location(),
            });
        }

        // The enclosing sink is detached while the block body is translated, so appending the
        // finished block here lands it at the position it was opened at.
        let (result, statements) = self.context.with_statements(Vec::new(), |context| {
            ExpressionTranslator::new(context).translate_sequence(&block.statements)
        });
        self.context
            .add_statement(JsStatement::Block(JsBlock { statements }));
        result
    }

    fn translate_variable(&mut self, variable: &IrVariable) -> Result<()> {
        let declarations = self.context.declarations();
        let ty = declarations.value_type(variable.declaration)?;
        let name = self.context.name_of(variable.declaration)?;

        let initializer = match variable.initializer.as_deref() {
            Some(initializer) => {
                let value = self.translate_value(initializer, "variable initializer")?;
                Some(self.context.coerce(value, ty)?.expression)
            }
            None => None,
        };

        self.context.add_statement(JsStatement::var(name, initializer));
        Ok(())
    }

    fn translate_get_value(&mut self, get: &IrGetValue) -> Result<TypedExpression> {
        let expression = self.context.translate_as_value_reference(get.declaration)?;
        Ok(TypedExpression::new(expression, get.ty.clone()))
    }

    fn translate_while_loop(&mut self, loop_: &IrWhileLoop) -> Result<()> {
        let bool_type = &self.context.config().builtins().bool_type;

        let (condition, condition_statements) =
            self.context.with_statements(Vec::new(), |context| {
                let value =
                    ExpressionTranslator::new(context).translate_value(&loop_.condition, "loop condition")?;
                context.coerce(value, bool_type)
            });
        let condition = condition?;

        let (body, mut body_statements) = self.context.with_statements(Vec::new(), |context| {
            match loop_.body.as_deref() {
                Some(body) => ExpressionTranslator::new(context).translate_statement(body),
                None => Ok(()),
            }
        });
        body?;

        let statement = if condition_statements.is_empty() {
            let body = match body_statements.len() {
                0 => JsStatement::Empty,
                1 => body_statements.remove(0),
                _ => JsStatement::block(body_statements),
            };
            JsStatement::while_loop(condition.expression, body)
        } else {
            trace!(
                pre_statements = condition_statements.len(),
                "condition needs statements, lowering to guarded infinite loop"
            );
            let mut statements = condition_statements;
            statements.push(JsStatement::if_then(
                JsExpression::not(condition.expression),
                JsStatement::Break(None),
            ));
            statements.extend(body_statements);
            JsStatement::while_loop(
                JsExpression::BooleanLiteral(true),
                JsStatement::block(statements),
            )
        };

        self.context.add_statement(statement);
        Ok(())
    }
}

fn translate_const(constant: &IrConstant) -> Option<TypedExpression> {
    let expression = match &constant.value {
        IrConst::String(value) => JsExpression::string(value.clone()),
        IrConst::Int(value) => JsExpression::IntLiteral(*value),
        IrConst::Long(_)
        | IrConst::Boolean(_)
        | IrConst::Char(_)
        | IrConst::Double(_)
        | IrConst::Null => return None,
    };
    Some(TypedExpression::new(expression, constant.ty.clone()))
}
