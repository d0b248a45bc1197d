use crate::{
    coercion::{Coercion, StandardCoercion},
    intrinsics::IntrinsicTable,
};
use jsir_core::{IrBuiltins, IrModule, JsScope};

/// Everything one translation context reads but never changes.
pub struct TranslationConfig<'m> {
    pub module: &'m IrModule,
    pub scope: JsScope,
    pub intrinsics: IntrinsicTable,
    pub coercion: Box<dyn Coercion>,
}

impl<'m> TranslationConfig<'m> {
    pub fn new(module: &'m IrModule) -> Self {
        Self {
            module,
            scope: JsScope::root(format!("module {}", module.name)),
            intrinsics: IntrinsicTable::new(),
            coercion: Box::new(StandardCoercion),
        }
    }

    pub fn with_scope(mut self, scope: JsScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_intrinsics(mut self, intrinsics: IntrinsicTable) -> Self {
        self.intrinsics = intrinsics;
        self
    }

    pub fn with_coercion(mut self, coercion: impl Coercion + 'static) -> Self {
        self.coercion = Box::new(coercion);
        self
    }

    pub fn builtins(&self) -> &'m IrBuiltins {
        &self.module.builtins
    }
}
