//! Mutable state threaded through one translation pass.
//!
//! A [`TranslationContext`] owns three pieces of scoped state: the statement sink new output
//! statements are appended to, the declaration whose body is being translated, and the alias
//! table. Each is changed only through a closure-taking method that installs a guard; the guard
//! puts the previous state back when it is dropped, so the stacks stay balanced on success, on
//! an early `?` return and while unwinding from a panic.

use crate::{
    config::TranslationConfig,
    errors::{Result, TranslateError},
    naming::{DefaultNaming, NamingContext},
    typed::TypedExpression,
};
use jsir_core::{
    DeclId, DeclarationTable, IrModule, IrNodeKind, IrType, JsExpression, JsProgramFragment,
    JsStatement,
};
use std::collections::HashMap;
use std::mem;

pub struct TranslationContext<'a> {
    config: &'a TranslationConfig<'a>,
    fragment: &'a mut JsProgramFragment,
    naming: Box<dyn NamingContext + 'a>,
    statements: Vec<JsStatement>,
    current_declaration: Option<DeclId>,
    aliases: HashMap<DeclId, JsExpression>,
}

impl<'a> TranslationContext<'a> {
    pub fn new(config: &'a TranslationConfig<'a>, fragment: &'a mut JsProgramFragment) -> Self {
        let naming = DefaultNaming::new(config.module, config.scope.clone());
        Self::with_naming(config, fragment, Box::new(naming))
    }

    pub fn with_naming(
        config: &'a TranslationConfig<'a>,
        fragment: &'a mut JsProgramFragment,
        naming: Box<dyn NamingContext + 'a>,
    ) -> Self {
        Self {
            config,
            fragment,
            naming,
            statements: Vec::new(),
            current_declaration: None,
            aliases: HashMap::new(),
        }
    }

    pub fn config(&self) -> &'a TranslationConfig<'a> {
        self.config
    }

    pub fn module(&self) -> &'a IrModule {
        self.config.module
    }

    pub fn declarations(&self) -> &'a DeclarationTable {
        &self.config.module.declarations
    }

    /// Statements in the current sink.
    pub fn statements(&self) -> &[JsStatement] {
        &self.statements
    }

    pub fn current_declaration(&self) -> Option<DeclId> {
        self.current_declaration
    }

    pub fn alias(&self, declaration: DeclId) -> Option<&JsExpression> {
        self.aliases.get(&declaration)
    }

    pub fn aliases(&self) -> &HashMap<DeclId, JsExpression> {
        &self.aliases
    }

    /// Top-level declaration block of the fragment being populated.
    pub fn declaration_statements(&mut self) -> &mut Vec<JsStatement> {
        &mut self.fragment.declaration_block.statements
    }

    pub fn add_statement(&mut self, statement: JsStatement) {
        self.statements.push(statement);
    }

    pub fn add_statements(&mut self, statements: impl IntoIterator<Item = JsStatement>) {
        self.statements.extend(statements);
    }

    /// Runs `action` with `statements` as the sink and hands the filled sink back.
    ///
    /// The caller's sink is detached for the duration and reattached afterwards, never merged
    /// with the new one.
    pub fn with_statements<T>(
        &mut self,
        statements: Vec<JsStatement>,
        action: impl FnOnce(&mut Self) -> T,
    ) -> (T, Vec<JsStatement>) {
        let mut scope = StatementScope::enter(self, statements);
        let result = action(&mut *scope.context);
        let statements = scope.exit();
        (result, statements)
    }

    /// Runs `action` with `declaration` as the enclosing declaration.
    pub fn nested_declaration<T>(
        &mut self,
        declaration: DeclId,
        action: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let scope = DeclarationScope::enter(self, declaration);
        action(&mut *scope.context)
    }

    /// Runs `action` with each declaration read through its substitute expression.
    ///
    /// Afterwards every entry holds its previous alias again, or no alias if it had none.
    pub fn with_aliases<T>(
        &mut self,
        aliases: impl IntoIterator<Item = (DeclId, JsExpression)>,
        action: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let scope = AliasScope::enter(self, aliases);
        action(&mut *scope.context)
    }

    /// Whether code being translated belongs to an inline function callable from other modules.
    ///
    /// The nearest function among the enclosing declarations decides; declarations further out
    /// are not consulted.
    pub fn is_public_inline_function(&self) -> bool {
        let Some(current) = self.current_declaration else {
            return false;
        };
        let declarations = self.declarations();
        declarations
            .ancestors(current)
            .find_map(|declaration| declaration.as_function().map(|info| (declaration.id, info)))
            .is_some_and(|(id, info)| info.is_inline && declarations.is_effectively_public(id))
    }

    pub fn name_of(&mut self, declaration: DeclId) -> Result<String> {
        self.naming.name(declaration)
    }

    pub fn translate_as_value_reference(&mut self, declaration: DeclId) -> Result<JsExpression> {
        if let Some(alias) = self.aliases.get(&declaration) {
            return Ok(alias.clone());
        }
        self.naming.value_reference(declaration)
    }

    pub fn get_inner_reference(&mut self, declaration: DeclId) -> Result<JsExpression> {
        let path = self.naming.inner_name(declaration)?;
        Ok(JsExpression::path(&path))
    }

    pub fn coerce(&self, value: TypedExpression, target: &IrType) -> Result<TypedExpression> {
        let from = value.ty.clone();
        self.config
            .coercion
            .coerce(value, target, self.declarations())
            .ok_or_else(|| TranslateError::NoConversion {
                from,
                to: target.clone(),
                declaration: self.describe_location(),
            })
    }

    pub fn missing_value(&self, node: IrNodeKind, position: &'static str) -> TranslateError {
        TranslateError::MissingValue {
            node,
            position,
            declaration: self.describe_location(),
        }
    }

    /// Dotted path of the enclosing declaration, for diagnostics.
    pub fn describe_location(&self) -> String {
        let Some(current) = self.current_declaration else {
            return "<top level>".to_string();
        };
        let mut names: Vec<&str> = self
            .declarations()
            .ancestors(current)
            .map(|declaration| declaration.name.as_str())
            .collect();
        if names.is_empty() {
            return current.to_string();
        }
        names.reverse();
        names.join(".")
    }

    /// Moves the top-level sink into the fragment's initializer block.
    pub fn finish(mut self) {
        let statements = mem::take(&mut self.statements);
        self.fragment.initializer_block.statements.extend(statements);
    }
}

struct StatementScope<'c, 'a> {
    context: &'c mut TranslationContext<'a>,
    saved: Option<Vec<JsStatement>>,
}

impl<'c, 'a> StatementScope<'c, 'a> {
    fn enter(context: &'c mut TranslationContext<'a>, statements: Vec<JsStatement>) -> Self {
        let saved = mem::replace(&mut context.statements, statements);
        Self {
            context,
            saved: Some(saved),
        }
    }

    fn exit(mut self) -> Vec<JsStatement> {
        let saved = self.saved.take().unwrap_or_default();
        mem::replace(&mut self.context.statements, saved)
    }
}

impl Drop for StatementScope<'_, '_> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.context.statements = saved;
        }
    }
}

struct DeclarationScope<'c, 'a> {
    context: &'c mut TranslationContext<'a>,
    previous: Option<DeclId>,
}

impl<'c, 'a> DeclarationScope<'c, 'a> {
    fn enter(context: &'c mut TranslationContext<'a>, declaration: DeclId) -> Self {
        let previous = context.current_declaration.replace(declaration);
        Self { context, previous }
    }
}

impl Drop for DeclarationScope<'_, '_> {
    fn drop(&mut self) {
        self.context.current_declaration = self.previous;
    }
}

struct AliasScope<'c, 'a> {
    context: &'c mut TranslationContext<'a>,
    backup: Vec<(DeclId, Option<JsExpression>)>,
}

impl<'c, 'a> AliasScope<'c, 'a> {
    fn enter(
        context: &'c mut TranslationContext<'a>,
        aliases: impl IntoIterator<Item = (DeclId, JsExpression)>,
    ) -> Self {
        let backup = aliases
            .into_iter()
            .map(|(declaration, alias)| (declaration, context.aliases.insert(declaration, alias)))
            .collect();
        Self { context, backup }
    }
}

impl Drop for AliasScope<'_, '_> {
    fn drop(&mut self) {
        // Reverse order so a declaration listed twice ends up with its oldest alias.
        for (declaration, previous) in self.backup.drain(..).rev() {
            match previous {
                Some(alias) => {
                    self.context.aliases.insert(declaration, alias);
                }
                None => {
                    self.context.aliases.remove(&declaration);
                }
            }
        }
    }
}
