use crate::{
    declarations::{DeclId, DeclarationKind, DeclarationTable, FunctionInfo, ModuleId, Visibility},
    module::{IrFunction, IrModule, ModuleImport},
    nodes::IrNode,
    types::IrType,
};

/// Incrementally assembles an [`IrModule`] and its declaration table.
pub struct ModuleBuilder {
    module: IrModule,
}

impl ModuleBuilder {
    pub fn new(name: &str) -> Self {
        Self::with_id(ModuleId(0), name)
    }

    pub fn with_id(id: ModuleId, name: &str) -> Self {
        Self {
            module: IrModule::new(id, name),
        }
    }

    pub fn id(&self) -> ModuleId {
        self.module.id
    }

    pub fn function(&mut self, name: &str) -> FunctionBuilder<'_> {
        let module = self.module.id;
        FunctionBuilder {
            table: &mut self.module.declarations,
            module,
            name: name.to_string(),
            params: Vec::new(),
            return_type: IrType::Unit,
            is_inline: false,
            visibility: Visibility::Public,
            containing: None,
        }
    }

    pub fn class(&mut self, name: &str) -> ClassBuilder<'_> {
        let module = self.module.id;
        ClassBuilder {
            table: &mut self.module.declarations,
            module,
            name: name.to_string(),
            supertypes: Vec::new(),
            visibility: Visibility::Public,
            containing: None,
        }
    }

    pub fn local_variable(&mut self, name: &str, ty: IrType, container: DeclId) -> DeclId {
        self.module.declarations.add(
            name,
            DeclarationKind::Variable { ty, mutable: false },
            Visibility::Local,
            Some(container),
            self.module.id,
        )
    }

    pub fn property(&mut self, name: &str, ty: IrType, container: Option<DeclId>) -> DeclId {
        self.module.declarations.add(
            name,
            DeclarationKind::Property { ty },
            Visibility::Public,
            container,
            self.module.id,
        )
    }

    pub fn param(&self, function: DeclId, index: usize) -> Option<DeclId> {
        self.module
            .declarations
            .function(function)
            .ok()
            .and_then(|info| info.params.get(index).copied())
    }

    /// Registers another module whose declarations this one references.
    pub fn import(&mut self, name: &str) -> ModuleId {
        let next = self
            .module
            .imports
            .iter()
            .map(|import| import.id.0)
            .chain(std::iter::once(self.module.id.0))
            .max()
            .unwrap_or(0)
            + 1;
        let id = ModuleId(next);
        self.module.imports.push(ModuleImport {
            id,
            name: name.to_string(),
        });
        id
    }

    pub fn initializer(&mut self, statement: IrNode) -> &mut Self {
        self.module.initializer.push(statement);
        self
    }

    pub fn body(&mut self, declaration: DeclId, body: IrNode) -> &mut Self {
        self.module.functions.push(IrFunction { declaration, body });
        self
    }

    pub fn declarations(&self) -> &DeclarationTable {
        &self.module.declarations
    }

    pub fn build(self) -> IrModule {
        self.module
    }
}

pub struct FunctionBuilder<'a> {
    table: &'a mut DeclarationTable,
    module: ModuleId,
    name: String,
    params: Vec<(String, IrType)>,
    return_type: IrType,
    is_inline: bool,
    visibility: Visibility,
    containing: Option<DeclId>,
}

impl<'a> FunctionBuilder<'a> {
    pub fn param(mut self, name: &str, ty: IrType) -> Self {
        self.params.push((name.to_string(), ty));
        self
    }

    pub fn returns(mut self, ty: IrType) -> Self {
        self.return_type = ty;
        self
    }

    pub fn inline(mut self) -> Self {
        self.is_inline = true;
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn member_of(mut self, container: DeclId) -> Self {
        self.containing = Some(container);
        self
    }

    /// Declares the function as living in another module.
    pub fn in_module(mut self, module: ModuleId) -> Self {
        self.module = module;
        self
    }

    pub fn build(self) -> DeclId {
        let function = self.table.add(
            self.name,
            DeclarationKind::Function(FunctionInfo {
                params: Vec::new(),
                return_type: self.return_type,
                is_inline: self.is_inline,
            }),
            self.visibility,
            self.containing,
            self.module,
        );

        let params: Vec<DeclId> = self
            .params
            .into_iter()
            .map(|(name, ty)| {
                self.table.add(
                    name,
                    DeclarationKind::ValueParameter { ty },
                    Visibility::Local,
                    Some(function),
                    self.module,
                )
            })
            .collect();

        if let Ok(declaration) = self.table.get_mut(function) {
            if let DeclarationKind::Function(info) = &mut declaration.kind {
                info.params = params;
            }
        }

        function
    }
}

pub struct ClassBuilder<'a> {
    table: &'a mut DeclarationTable,
    module: ModuleId,
    name: String,
    supertypes: Vec<DeclId>,
    visibility: Visibility,
    containing: Option<DeclId>,
}

impl<'a> ClassBuilder<'a> {
    pub fn extends(mut self, supertype: DeclId) -> Self {
        self.supertypes.push(supertype);
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn member_of(mut self, container: DeclId) -> Self {
        self.containing = Some(container);
        self
    }

    pub fn build(self) -> DeclId {
        self.table.add(
            self.name,
            DeclarationKind::Class {
                supertypes: self.supertypes,
            },
            self.visibility,
            self.containing,
            self.module,
        )
    }
}
