//! JavaScript output AST.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JsUnaryOperator {
    Void,
    Not,
    Neg,
    Typeof,
}

impl JsUnaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            JsUnaryOperator::Void => "void",
            JsUnaryOperator::Not => "!",
            JsUnaryOperator::Neg => "-",
            JsUnaryOperator::Typeof => "typeof",
        }
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, JsUnaryOperator::Void | JsUnaryOperator::Typeof)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JsBinaryOperator {
    Assign,
    Comma,
    Add,
    Sub,
    Mul,
    Lt,
    Gt,
    RefEq,
    RefNeq,
    And,
    Or,
}

impl JsBinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            JsBinaryOperator::Assign => "=",
            JsBinaryOperator::Comma => ",",
            JsBinaryOperator::Add => "+",
            JsBinaryOperator::Sub => "-",
            JsBinaryOperator::Mul => "*",
            JsBinaryOperator::Lt => "<",
            JsBinaryOperator::Gt => ">",
            JsBinaryOperator::RefEq => "===",
            JsBinaryOperator::RefNeq => "!==",
            JsBinaryOperator::And => "&&",
            JsBinaryOperator::Or => "||",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JsExpression {
    NameRef {
        name: String,
        qualifier: Option<Box<JsExpression>>,
    },
    Invocation {
        qualifier: Box<JsExpression>,
        arguments: Vec<JsExpression>,
    },
    Prefix {
        operator: JsUnaryOperator,
        operand: Box<JsExpression>,
    },
    Binary {
        operator: JsBinaryOperator,
        left: Box<JsExpression>,
        right: Box<JsExpression>,
    },
    StringLiteral(String),
    IntLiteral(i32),
    NumberLiteral(f64),
    BooleanLiteral(bool),
    Null,
    This,
}

impl JsExpression {
    pub fn name(name: impl Into<String>) -> Self {
        JsExpression::NameRef {
            name: name.into(),
            qualifier: None,
        }
    }

    pub fn member(qualifier: JsExpression, name: impl Into<String>) -> Self {
        JsExpression::NameRef {
            name: name.into(),
            qualifier: Some(Box::new(qualifier)),
        }
    }

    /// Dotted reference such as `Kotlin.Long.fromInt`.
    pub fn path<S: AsRef<str>>(segments: &[S]) -> Self {
        let mut iter = segments.iter();
        let first = iter
            .next()
            .map(|segment| JsExpression::name(segment.as_ref()))
            .unwrap_or(JsExpression::This);
        iter.fold(first, |qualifier, segment| {
            JsExpression::member(qualifier, segment.as_ref())
        })
    }

    pub fn invoke(qualifier: JsExpression, arguments: Vec<JsExpression>) -> Self {
        JsExpression::Invocation {
            qualifier: Box::new(qualifier),
            arguments,
        }
    }

    pub fn prefix(operator: JsUnaryOperator, operand: JsExpression) -> Self {
        JsExpression::Prefix {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn binary(operator: JsBinaryOperator, left: JsExpression, right: JsExpression) -> Self {
        JsExpression::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(operand: JsExpression) -> Self {
        Self::prefix(JsUnaryOperator::Not, operand)
    }

    /// `void 0`, the side-effect free spelling of `undefined`.
    pub fn void_zero() -> Self {
        Self::prefix(JsUnaryOperator::Void, JsExpression::IntLiteral(0))
    }

    pub fn string(value: impl Into<String>) -> Self {
        JsExpression::StringLiteral(value.into())
    }

    pub fn is_void_zero(&self) -> bool {
        matches!(
            self,
            JsExpression::Prefix { operator: JsUnaryOperator::Void, operand }
                if **operand == JsExpression::IntLiteral(0)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsVar {
    pub name: String,
    pub initializer: Option<JsExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JsStatement {
    Expression(JsExpression),
    Vars(Vec<JsVar>),
    While {
        condition: JsExpression,
        body: Box<JsStatement>,
    },
    If {
        condition: JsExpression,
        then_branch: Box<JsStatement>,
        else_branch: Option<Box<JsStatement>>,
    },
    Break(Option<String>),
    Continue(Option<String>),
    Return(Option<JsExpression>),
    Block(JsBlock),
    Function(JsFunction),
    Empty,
}

impl JsStatement {
    pub fn var(name: impl Into<String>, initializer: Option<JsExpression>) -> Self {
        JsStatement::Vars(vec![JsVar {
            name: name.into(),
            initializer,
        }])
    }

    pub fn while_loop(condition: JsExpression, body: JsStatement) -> Self {
        JsStatement::While {
            condition,
            body: Box::new(body),
        }
    }

    pub fn if_then(condition: JsExpression, then_branch: JsStatement) -> Self {
        JsStatement::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: None,
        }
    }

    pub fn block(statements: Vec<JsStatement>) -> Self {
        JsStatement::Block(JsBlock { statements })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsBlock {
    pub statements: Vec<JsStatement>,
}

impl JsBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsFunction {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: JsBlock,
}

/// Unit of output handed to the printer: top-level declarations plus initialization code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsProgramFragment {
    pub declaration_block: JsBlock,
    pub initializer_block: JsBlock,
}

impl JsProgramFragment {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Names already taken in a JavaScript scope; the parent chain models nesting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsScope {
    pub description: String,
    names: IndexSet<String>,
    parent: Option<Box<JsScope>>,
}

const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "export", "extends", "finally", "for", "function", "if", "import", "in",
    "instanceof", "let", "new", "return", "super", "switch", "this", "throw", "try", "typeof",
    "var", "void", "while", "with", "yield", "undefined", "arguments", "eval", "Kotlin",
];

impl JsScope {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            names: IndexSet::new(),
            parent: None,
        }
    }

    /// Root scope with the JavaScript reserved words already taken.
    pub fn root(description: impl Into<String>) -> Self {
        let mut scope = Self::new(description);
        for word in RESERVED_WORDS {
            scope.declare(*word);
        }
        scope
    }

    pub fn child(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            names: IndexSet::new(),
            parent: Some(Box::new(self)),
        }
    }

    pub fn declare(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.contains(name))
    }

    pub fn parent(&self) -> Option<&JsScope> {
        self.parent.as_deref()
    }
}
