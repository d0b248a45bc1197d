use crate::{types::IrType, IrError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arena index of a declaration. Identity for alias and naming tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclId(pub u32);

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decl#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Protected,
    Internal,
    Private,
    Local,
}

impl Visibility {
    pub fn is_exported(&self) -> bool {
        matches!(self, Visibility::Public | Visibility::Protected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub params: Vec<DeclId>,
    pub return_type: IrType,
    pub is_inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclarationKind {
    Function(FunctionInfo),
    ValueParameter { ty: IrType },
    Variable { ty: IrType, mutable: bool },
    Property { ty: IrType },
    Class { supertypes: Vec<DeclId> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub id: DeclId,
    pub name: String,
    pub kind: DeclarationKind,
    pub visibility: Visibility,
    pub containing: Option<DeclId>,
    pub module: ModuleId,
}

impl Declaration {
    pub fn as_function(&self) -> Option<&FunctionInfo> {
        match &self.kind {
            DeclarationKind::Function(info) => Some(info),
            _ => None,
        }
    }

    pub fn is_function(&self) -> bool {
        self.as_function().is_some()
    }

    pub fn is_class(&self) -> bool {
        matches!(self.kind, DeclarationKind::Class { .. })
    }

    /// Type of the value a reference to this declaration produces.
    pub fn value_type(&self) -> Option<&IrType> {
        match &self.kind {
            DeclarationKind::ValueParameter { ty }
            | DeclarationKind::Variable { ty, .. }
            | DeclarationKind::Property { ty } => Some(ty),
            DeclarationKind::Function(_) | DeclarationKind::Class { .. } => None,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(
            self.kind,
            DeclarationKind::ValueParameter { .. } | DeclarationKind::Variable { .. }
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeclarationTable {
    declarations: Vec<Declaration>,
}

impl DeclarationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        name: impl Into<String>,
        kind: DeclarationKind,
        visibility: Visibility,
        containing: Option<DeclId>,
        module: ModuleId,
    ) -> DeclId {
        let id = DeclId(self.declarations.len() as u32);
        self.declarations.push(Declaration {
            id,
            name: name.into(),
            kind,
            visibility,
            containing,
            module,
        });
        id
    }

    pub fn get(&self, id: DeclId) -> Result<&Declaration> {
        self.declarations
            .get(id.0 as usize)
            .ok_or(IrError::UnknownDeclaration(id))
    }

    pub fn get_mut(&mut self, id: DeclId) -> Result<&mut Declaration> {
        self.declarations
            .get_mut(id.0 as usize)
            .ok_or(IrError::UnknownDeclaration(id))
    }

    pub fn function(&self, id: DeclId) -> Result<&FunctionInfo> {
        let declaration = self.get(id)?;
        declaration
            .as_function()
            .ok_or_else(|| IrError::NotAFunction(declaration.name.clone()))
    }

    pub fn value_type(&self, id: DeclId) -> Result<&IrType> {
        let declaration = self.get(id)?;
        declaration
            .value_type()
            .ok_or_else(|| IrError::NoValueType(declaration.name.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// The declaration itself followed by each of its containers, innermost first.
    pub fn ancestors(&self, id: DeclId) -> Ancestors<'_> {
        Ancestors {
            table: self,
            next: Some(id),
        }
    }

    /// Visible outside the defining module: every link of the containment chain is exported.
    pub fn is_effectively_public(&self, id: DeclId) -> bool {
        self.ancestors(id)
            .all(|declaration| declaration.visibility.is_exported())
    }

    pub fn is_subclass_of(&self, class: DeclId, superclass: DeclId) -> bool {
        if class == superclass {
            return true;
        }
        let mut pending = vec![class];
        let mut visited = Vec::new();
        while let Some(current) = pending.pop() {
            if visited.contains(&current) {
                continue;
            }
            visited.push(current);
            if let Ok(Declaration {
                kind: DeclarationKind::Class { supertypes },
                ..
            }) = self.get(current)
            {
                if supertypes.contains(&superclass) {
                    return true;
                }
                pending.extend(supertypes.iter().copied());
            }
        }
        false
    }
}

pub struct Ancestors<'a> {
    table: &'a DeclarationTable,
    next: Option<DeclId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Declaration;

    fn next(&mut self) -> Option<Self::Item> {
        let declaration = self.table.get(self.next?).ok()?;
        self.next = declaration.containing;
        Some(declaration)
    }
}
