use crate::{declarations::DeclId, types::IrType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expression and statement nodes of the IR tree.
///
/// The set is closed; consumers match exhaustively or through an explicit default arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IrNode {
    Call(IrCall),
    Block(IrBlock),
    Variable(IrVariable),
    GetValue(IrGetValue),
    WhileLoop(IrWhileLoop),
    Const(IrConstant),
    SetVariable(IrSetVariable),
    Return(IrReturn),
    Break,
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrNodeKind {
    Call,
    Block,
    Variable,
    GetValue,
    WhileLoop,
    Const,
    SetVariable,
    Return,
    Break,
    Continue,
}

impl fmt::Display for IrNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IrNodeKind::Call => "call",
            IrNodeKind::Block => "block",
            IrNodeKind::Variable => "variable",
            IrNodeKind::GetValue => "get_value",
            IrNodeKind::WhileLoop => "while_loop",
            IrNodeKind::Const => "const",
            IrNodeKind::SetVariable => "set_variable",
            IrNodeKind::Return => "return",
            IrNodeKind::Break => "break",
            IrNodeKind::Continue => "continue",
        };
        write!(f, "{}", name)
    }
}

impl IrNode {
    pub fn kind(&self) -> IrNodeKind {
        match self {
            IrNode::Call(_) => IrNodeKind::Call,
            IrNode::Block(_) => IrNodeKind::Block,
            IrNode::Variable(_) => IrNodeKind::Variable,
            IrNode::GetValue(_) => IrNodeKind::GetValue,
            IrNode::WhileLoop(_) => IrNodeKind::WhileLoop,
            IrNode::Const(_) => IrNodeKind::Const,
            IrNode::SetVariable(_) => IrNodeKind::SetVariable,
            IrNode::Return(_) => IrNodeKind::Return,
            IrNode::Break => IrNodeKind::Break,
            IrNode::Continue => IrNodeKind::Continue,
        }
    }

    pub fn get_value(declaration: DeclId, ty: IrType) -> Self {
        IrNode::GetValue(IrGetValue { declaration, ty })
    }

    pub fn string(value: impl Into<String>) -> Self {
        IrNode::Const(IrConstant {
            value: IrConst::String(value.into()),
            ty: IrType::String,
        })
    }

    pub fn int(value: i32) -> Self {
        IrNode::Const(IrConstant {
            value: IrConst::Int(value),
            ty: IrType::Int,
        })
    }

    pub fn constant(value: IrConst, ty: IrType) -> Self {
        IrNode::Const(IrConstant { value, ty })
    }

    pub fn block(statements: Vec<IrNode>, ty: IrType) -> Self {
        IrNode::Block(IrBlock { statements, ty })
    }

    pub fn variable(declaration: DeclId, initializer: Option<IrNode>) -> Self {
        IrNode::Variable(IrVariable {
            declaration,
            initializer: initializer.map(Box::new),
        })
    }

    pub fn while_loop(condition: IrNode, body: Option<IrNode>) -> Self {
        IrNode::WhileLoop(IrWhileLoop {
            condition: Box::new(condition),
            body: body.map(Box::new),
        })
    }

    pub fn set_variable(declaration: DeclId, value: IrNode) -> Self {
        IrNode::SetVariable(IrSetVariable {
            declaration,
            value: Box::new(value),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrCall {
    pub callee: DeclId,
    pub ty: IrType,
    pub dispatch_receiver: Option<Box<IrNode>>,
    pub extension_receiver: Option<Box<IrNode>>,
    /// Positional value arguments; `None` (or a short vector) marks an omitted argument.
    pub arguments: Vec<Option<IrNode>>,
}

impl IrCall {
    pub fn new(callee: DeclId, ty: IrType) -> Self {
        Self {
            callee,
            ty,
            dispatch_receiver: None,
            extension_receiver: None,
            arguments: Vec::new(),
        }
    }

    pub fn with_dispatch_receiver(mut self, receiver: IrNode) -> Self {
        self.dispatch_receiver = Some(Box::new(receiver));
        self
    }

    pub fn with_extension_receiver(mut self, receiver: IrNode) -> Self {
        self.extension_receiver = Some(Box::new(receiver));
        self
    }

    pub fn with_argument(mut self, argument: IrNode) -> Self {
        self.arguments.push(Some(argument));
        self
    }

    pub fn with_omitted_argument(mut self) -> Self {
        self.arguments.push(None);
        self
    }

    pub fn value_argument(&self, index: usize) -> Option<&IrNode> {
        self.arguments.get(index).and_then(|argument| argument.as_ref())
    }
}

impl From<IrCall> for IrNode {
    fn from(call: IrCall) -> Self {
        IrNode::Call(call)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrBlock {
    pub statements: Vec<IrNode>,
    pub ty: IrType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrVariable {
    pub declaration: DeclId,
    pub initializer: Option<Box<IrNode>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrGetValue {
    pub declaration: DeclId,
    pub ty: IrType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrWhileLoop {
    pub condition: Box<IrNode>,
    pub body: Option<Box<IrNode>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrConstant {
    pub value: IrConst,
    pub ty: IrType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IrConst {
    String(String),
    Int(i32),
    Long(i64),
    Boolean(bool),
    Char(char),
    Double(f64),
    Null,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrSetVariable {
    pub declaration: DeclId,
    pub value: Box<IrNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrReturn {
    pub target: DeclId,
    pub value: Option<Box<IrNode>>,
}
