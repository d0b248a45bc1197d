use crate::errors::Result;
use indexmap::IndexMap;
use jsir_core::{DeclId, Declaration, IrModule, JsExpression, JsScope};
use std::collections::HashMap;

/// Assigns output identifiers to declarations and builds references to them.
pub trait NamingContext {
    /// Identifier assigned to the declaration. Stable for the life of the context.
    fn name(&mut self, declaration: DeclId) -> Result<String>;

    /// Fully qualified path of the declaration, outermost segment first.
    fn inner_name(&mut self, declaration: DeclId) -> Result<Vec<String>>;

    /// Canonical expression reading the declaration from code in the current module.
    fn value_reference(&mut self, declaration: DeclId) -> Result<JsExpression>;
}

/// Uniquifies top-level names against the module scope and local names against the scope
/// of their enclosing function. Class members keep their source name.
pub struct DefaultNaming<'m> {
    module: &'m IrModule,
    scope: JsScope,
    local_scopes: HashMap<DeclId, JsScope>,
    names: IndexMap<DeclId, String>,
}

impl<'m> DefaultNaming<'m> {
    /// Top-level names of the module are claimed up front, so a local named earlier can never
    /// take an identifier a later top-level reference needs.
    pub fn new(module: &'m IrModule, scope: JsScope) -> Self {
        let mut naming = Self {
            module,
            scope,
            local_scopes: HashMap::new(),
            names: IndexMap::new(),
        };
        for declaration in module.declarations.iter() {
            if declaration.is_local()
                || declaration.module != module.id
                || naming.is_member(declaration)
            {
                continue;
            }
            let name = naming.fresh(declaration);
            naming.names.insert(declaration.id, name);
        }
        naming
    }

    pub fn assigned(&self) -> impl Iterator<Item = (&DeclId, &String)> {
        self.names.iter()
    }

    fn is_member(&self, declaration: &Declaration) -> bool {
        declaration
            .containing
            .and_then(|container| self.module.declarations.get(container).ok())
            .is_some_and(|container| container.is_class())
    }

    fn enclosing_function(&self, declaration: &Declaration) -> Option<DeclId> {
        declaration.containing.and_then(|container| {
            self.module
                .declarations
                .ancestors(container)
                .find(|ancestor| ancestor.is_function())
                .map(|function| function.id)
        })
    }

    fn module_alias(&self, declaration: &Declaration) -> String {
        let name = self
            .module
            .imported_module(declaration.module)
            .map(str::to_string)
            .unwrap_or_else(|| format!("module_{}", declaration.module.0));
        format!("$module${}", sanitize(&name))
    }

    fn fresh(&mut self, declaration: &Declaration) -> String {
        let base = sanitize(&declaration.name);

        if self.is_member(declaration) || declaration.module != self.module.id {
            return base;
        }

        match (declaration.is_local(), self.enclosing_function(declaration)) {
            (true, Some(function)) => {
                let global = &self.scope;
                let local = self
                    .local_scopes
                    .entry(function)
                    .or_insert_with(|| JsScope::new(format!("function {}", function)));
                let name = unique(&base, |candidate| {
                    global.contains(candidate) || local.contains(candidate)
                });
                local.declare(name.clone());
                name
            }
            _ => {
                let name = unique(&base, |candidate| self.scope.contains(candidate));
                self.scope.declare(name.clone());
                name
            }
        }
    }
}

impl<'m> NamingContext for DefaultNaming<'m> {
    fn name(&mut self, declaration: DeclId) -> Result<String> {
        if let Some(name) = self.names.get(&declaration) {
            return Ok(name.clone());
        }
        let module = self.module;
        let resolved = module.declarations.get(declaration)?;
        let name = self.fresh(resolved);
        self.names.insert(declaration, name.clone());
        Ok(name)
    }

    fn inner_name(&mut self, declaration: DeclId) -> Result<Vec<String>> {
        let module = self.module;
        let resolved = module.declarations.get(declaration)?;
        let mut path = match resolved.containing {
            Some(container) if self.is_member(resolved) => self.inner_name(container)?,
            _ if resolved.module != self.module.id => vec![self.module_alias(resolved)],
            _ => Vec::new(),
        };
        path.push(self.name(declaration)?);
        Ok(path)
    }

    fn value_reference(&mut self, declaration: DeclId) -> Result<JsExpression> {
        let module = self.module;
        let resolved = module.declarations.get(declaration)?;
        if resolved.is_local() {
            return Ok(JsExpression::name(self.name(declaration)?));
        }
        if self.is_member(resolved) {
            return Ok(JsExpression::member(JsExpression::This, self.name(declaration)?));
        }
        Ok(JsExpression::path(&self.inner_name(declaration)?))
    }
}

fn unique(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    (0..)
        .map(|suffix| format!("{}_{}", base, suffix))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

fn sanitize(name: &str) -> String {
    let mut sanitized: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();
    if sanitized.is_empty() || sanitized.starts_with(|c: char| c.is_ascii_digit()) {
        sanitized.insert(0, '_');
    }
    sanitized
}
