use crate::{
    declarations::{DeclId, DeclarationTable, ModuleId},
    nodes::IrNode,
    types::IrType,
    Result,
};
use serde::{Deserialize, Serialize};

/// Handles for the built-in types the translator asks for by role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrBuiltins {
    pub bool_type: IrType,
    pub unit_type: IrType,
    pub any_type: IrType,
    pub nothing_type: IrType,
}

impl Default for IrBuiltins {
    fn default() -> Self {
        Self {
            bool_type: IrType::Boolean,
            unit_type: IrType::Unit,
            any_type: IrType::Any,
            nothing_type: IrType::Nothing,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrModule {
    pub id: ModuleId,
    pub name: String,
    pub declarations: DeclarationTable,
    #[serde(default)]
    pub builtins: IrBuiltins,
    #[serde(default)]
    pub functions: Vec<IrFunction>,
    /// Top-level statements run when the module is loaded.
    #[serde(default)]
    pub initializer: Vec<IrNode>,
    #[serde(default)]
    pub imports: Vec<ModuleImport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleImport {
    pub id: ModuleId,
    pub name: String,
}

impl IrModule {
    pub fn new(id: ModuleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            declarations: DeclarationTable::new(),
            builtins: IrBuiltins::default(),
            functions: Vec::new(),
            initializer: Vec::new(),
            imports: Vec::new(),
        }
    }

    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn imported_module(&self, id: ModuleId) -> Option<&str> {
        self.imports
            .iter()
            .find(|import| import.id == id)
            .map(|import| import.name.as_str())
    }

    pub fn function_body(&self, declaration: DeclId) -> Option<&IrFunction> {
        self.functions
            .iter()
            .find(|function| function.declaration == declaration)
    }
}

/// A function declaration together with its body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrFunction {
    pub declaration: DeclId,
    pub body: IrNode,
}
