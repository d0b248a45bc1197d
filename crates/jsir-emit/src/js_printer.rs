use crate::{
    config::{EmitterConfig, OutputStyle},
    emitter::{EmitContext, EmitResult, Emitter},
};
use jsir_core::js::{
    JsBinaryOperator, JsBlock, JsExpression, JsFunction, JsProgramFragment, JsStatement,
    JsUnaryOperator, JsVar,
};
use std::io::Write;

pub struct JsPrinter {
    config: EmitterConfig,
}

impl JsPrinter {
    pub fn new(config: EmitterConfig) -> Self {
        Self { config }
    }

    pub fn pretty() -> Self {
        Self::new(EmitterConfig::default())
    }

    pub fn compact() -> Self {
        Self::new(EmitterConfig::compact())
    }

    pub fn print_fragment(&self, fragment: &JsProgramFragment) -> String {
        let statements: Vec<&JsStatement> = fragment
            .declaration_block
            .statements
            .iter()
            .chain(fragment.initializer_block.statements.iter())
            .collect();
        self.print_all(statements)
    }

    pub fn print_statements(&self, statements: &[JsStatement]) -> String {
        self.print_all(statements.iter().collect())
    }

    pub fn print_statement(&self, statement: &JsStatement) -> String {
        let mut writer = self.writer();
        writer.statement(statement);
        writer.out
    }

    pub fn print_expression(&self, expression: &JsExpression) -> String {
        let mut writer = self.writer();
        writer.expression(expression);
        writer.out
    }

    fn print_all(&self, statements: Vec<&JsStatement>) -> String {
        let mut writer = self.writer();
        for (index, statement) in statements.into_iter().enumerate() {
            if index > 0 {
                writer.newline();
            }
            writer.statement(statement);
        }
        if self.config.style == OutputStyle::Pretty && !writer.out.is_empty() {
            writer.out.push('\n');
        }
        writer.out
    }

    fn writer(&self) -> JsWriter {
        JsWriter {
            out: String::new(),
            context: EmitContext::with_indent(self.config.indent_style.to_string()),
            style: self.config.style,
            use_colors: self.config.use_colors,
        }
    }
}

impl Emitter for JsPrinter {
    type Item = JsProgramFragment;

    fn emit<W: Write>(
        &self,
        item: &Self::Item,
        writer: &mut W,
        _context: &mut EmitContext,
    ) -> EmitResult {
        writer.write_all(self.print_fragment(item).as_bytes())?;
        Ok(())
    }
}

struct JsWriter {
    out: String,
    context: EmitContext,
    style: OutputStyle,
    use_colors: bool,
}

impl JsWriter {
    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn keyword(&mut self, keyword: &str) {
        if self.use_colors {
            use colored::Colorize;
            let highlighted = keyword.blue().bold().to_string();
            self.out.push_str(&highlighted);
        } else {
            self.out.push_str(keyword);
        }
    }

    fn newline(&mut self) {
        match self.style {
            OutputStyle::Compact => self.out.push(' '),
            OutputStyle::Pretty => {
                self.out.push('\n');
                let indent = self.context.get_indent();
                self.out.push_str(&indent);
            }
        }
    }

    fn statement(&mut self, statement: &JsStatement) {
        match statement {
            JsStatement::Expression(expression) => {
                self.expression(expression);
                self.push(";");
            }
            JsStatement::Vars(vars) => self.vars(vars),
            JsStatement::While { condition, body } => {
                self.keyword("while");
                self.push(" (");
                self.expression(condition);
                self.push(")");
                self.body(body);
            }
            JsStatement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.keyword("if");
                self.push(" (");
                self.expression(condition);
                self.push(")");
                self.body(then_branch);
                if let Some(else_branch) = else_branch {
                    self.push(" ");
                    self.keyword("else");
                    self.body(else_branch);
                }
            }
            JsStatement::Break(label) => self.jump("break", label.as_deref()),
            JsStatement::Continue(label) => self.jump("continue", label.as_deref()),
            JsStatement::Return(value) => {
                self.keyword("return");
                if let Some(value) = value {
                    self.push(" ");
                    self.expression(value);
                }
                self.push(";");
            }
            JsStatement::Block(block) => self.block(block),
            JsStatement::Function(function) => self.function(function),
            JsStatement::Empty => self.push(";"),
        }
    }

    fn jump(&mut self, keyword: &str, label: Option<&str>) {
        self.keyword(keyword);
        if let Some(label) = label {
            self.push(" ");
            self.push(label);
        }
        self.push(";");
    }

    fn vars(&mut self, vars: &[JsVar]) {
        self.keyword("var");
        self.push(" ");
        for (index, var) in vars.iter().enumerate() {
            if index > 0 {
                self.push(", ");
            }
            self.push(&var.name);
            if let Some(initializer) = &var.initializer {
                self.push(" = ");
                self.expression(initializer);
            }
        }
        self.push(";");
    }

    // Loop and branch bodies stay on the header line.
    fn body(&mut self, body: &JsStatement) {
        if let JsStatement::Empty = body {
            self.push(";");
        } else {
            self.push(" ");
            self.statement(body);
        }
    }

    fn block(&mut self, block: &JsBlock) {
        if block.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.context.indent();
        for statement in &block.statements {
            self.newline();
            self.statement(statement);
        }
        self.context.dedent();
        self.newline();
        self.push("}");
    }

    fn function(&mut self, function: &JsFunction) {
        self.keyword("function");
        if let Some(name) = &function.name {
            self.push(" ");
            self.push(name);
        }
        self.push("(");
        self.push(&function.params.join(", "));
        self.push(") ");
        self.block(&function.body);
    }

    fn expression(&mut self, expression: &JsExpression) {
        match expression {
            JsExpression::NameRef { name, qualifier } => {
                if let Some(qualifier) = qualifier {
                    self.operand(qualifier, needs_parens_as_qualifier(qualifier));
                    self.push(".");
                }
                self.push(name);
            }
            JsExpression::Invocation {
                qualifier,
                arguments,
            } => {
                self.operand(qualifier, needs_parens_as_qualifier(qualifier));
                self.push("(");
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        self.push(", ");
                    }
                    let is_comma = matches!(
                        argument,
                        JsExpression::Binary {
                            operator: JsBinaryOperator::Comma,
                            ..
                        }
                    );
                    self.operand(argument, is_comma);
                }
                self.push(")");
            }
            JsExpression::Prefix { operator, operand } => {
                self.push(operator.symbol());
                if operator.is_keyword() {
                    self.push(" ");
                }
                self.operand(operand, needs_parens_as_prefix_operand(operator, operand));
            }
            JsExpression::Binary {
                operator,
                left,
                right,
            } => {
                self.operand(left, matches!(**left, JsExpression::Binary { .. }));
                if *operator != JsBinaryOperator::Comma {
                    self.push(" ");
                }
                self.push(operator.symbol());
                self.push(" ");
                self.operand(right, matches!(**right, JsExpression::Binary { .. }));
            }
            JsExpression::StringLiteral(value) => {
                let quoted = serde_json::to_string(value).unwrap_or_else(|_| format!("{:?}", value));
                self.push(&quoted);
            }
            JsExpression::IntLiteral(value) => self.push(&value.to_string()),
            JsExpression::NumberLiteral(value) => self.push(&value.to_string()),
            JsExpression::BooleanLiteral(value) => self.push(if *value { "true" } else { "false" }),
            JsExpression::Null => self.push("null"),
            JsExpression::This => self.push("this"),
        }
    }

    fn operand(&mut self, expression: &JsExpression, parenthesize: bool) {
        if parenthesize {
            self.push("(");
            self.expression(expression);
            self.push(")");
        } else {
            self.expression(expression);
        }
    }
}

fn needs_parens_as_qualifier(expression: &JsExpression) -> bool {
    matches!(
        expression,
        JsExpression::Prefix { .. }
            | JsExpression::Binary { .. }
            | JsExpression::IntLiteral(_)
            | JsExpression::NumberLiteral(_)
    )
}

/// Symbolic operators must not fuse with a leading sign of their operand (`-(-x)`, not `--x`).
fn needs_parens_as_prefix_operand(operator: &JsUnaryOperator, operand: &JsExpression) -> bool {
    match operand {
        JsExpression::Binary { .. } => true,
        _ if operator.is_keyword() => false,
        JsExpression::Prefix { .. } => true,
        JsExpression::IntLiteral(value) => *value < 0,
        JsExpression::NumberLiteral(value) => value.is_sign_negative(),
        _ => false,
    }
}
