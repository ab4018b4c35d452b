//! Syntax tree for the generated TypeScript module
//!
//! Emitters build these nodes; only the printer turns them into text.

/// Built-in keyword types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Any,
    Boolean,
    Never,
    Number,
    String,
    Undefined,
    Void,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Any => "any",
            Keyword::Boolean => "boolean",
            Keyword::Never => "never",
            Keyword::Number => "number",
            Keyword::String => "string",
            Keyword::Undefined => "undefined",
            Keyword::Void => "void",
        }
    }
}

/// Type expression
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    Keyword(Keyword),

    /// The `null` literal type
    Null,

    /// `Name` or `Name<Args>`
    Reference { name: String, args: Vec<TypeNode> },

    /// `typeof name`
    Query(String),

    /// `T[]`
    Array(Box<TypeNode>),

    Union(Vec<TypeNode>),

    Intersection(Vec<TypeNode>),

    /// `(a: A, b: B) => R`
    Function { params: Vec<Parameter>, ret: Box<TypeNode> },

    /// `{ a: A; b?: B; }`
    Literal(Vec<PropertySignature>),

    /// `Check extends Extends ? True : False`
    Conditional {
        check: Box<TypeNode>,
        extends: Box<TypeNode>,
        true_type: Box<TypeNode>,
        false_type: Box<TypeNode>,
    },

    /// `infer Name`
    Infer(String),
}

impl TypeNode {
    pub fn keyword(keyword: Keyword) -> Self {
        TypeNode::Keyword(keyword)
    }

    pub fn reference(name: impl Into<String>) -> Self {
        TypeNode::Reference {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeNode>) -> Self {
        TypeNode::Reference {
            name: name.into(),
            args,
        }
    }

    pub fn query(name: impl Into<String>) -> Self {
        TypeNode::Query(name.into())
    }

    pub fn array(item: TypeNode) -> Self {
        TypeNode::Array(Box::new(item))
    }

    /// `base | null`
    pub fn nullable(base: TypeNode) -> Self {
        TypeNode::Union(vec![base, TypeNode::Null])
    }
}

/// Member of an interface or type literal
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySignature {
    pub name: PropertyName,
    pub optional: bool,
    pub ty: TypeNode,
}

impl PropertySignature {
    pub fn new(name: impl Into<String>, optional: bool, ty: TypeNode) -> Self {
        Self {
            name: PropertyName::Identifier(name.into()),
            optional,
            ty,
        }
    }

    pub fn computed(name: impl Into<String>, ty: TypeNode) -> Self {
        Self {
            name: PropertyName::Computed(name.into()),
            optional: false,
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyName {
    Identifier(String),
    /// `["string literal"]`
    Computed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: Option<TypeNode>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeNode) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
        }
    }
}

/// `Name extends Constraint`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameter {
    pub name: String,
    pub constraint: Option<TypeNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(String),

    /// `object.property`
    Member { object: Box<Expr>, property: String },

    /// `expr as T`
    As { expr: Box<Expr>, ty: TypeNode },

    /// `(params): Ret => { body }`
    Arrow {
        params: Vec<Parameter>,
        ret: Option<TypeNode>,
        body: Vec<Stmt>,
    },

    Jsx(JsxElement),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier(name.into())
    }

    pub fn member(object: Expr, property: impl Into<String>) -> Self {
        Expr::Member {
            object: Box::new(object),
            property: property.into(),
        }
    }

    pub fn cast(expr: Expr, ty: TypeNode) -> Self {
        Expr::As {
            expr: Box::new(expr),
            ty,
        }
    }
}

/// `<namespace:name attr={..}>{..}</namespace:name>`
#[derive(Debug, Clone, PartialEq)]
pub struct JsxElement {
    pub namespace: String,
    pub name: String,
    pub attributes: Vec<JsxAttribute>,
    /// Each child is printed as a `{expression}` container
    pub children: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsxAttribute {
    pub name: String,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `import { a, b } from "source";`
    Import { names: Vec<String>, source: String },

    TypeAlias {
        export: bool,
        name: String,
        params: Vec<TypeParameter>,
        ty: TypeNode,
    },

    Interface {
        export: bool,
        name: String,
        members: Vec<PropertySignature>,
    },

    /// String-valued enum
    Enum {
        export: bool,
        name: String,
        members: Vec<(String, String)>,
    },

    Const {
        export: bool,
        name: String,
        ty: Option<TypeNode>,
        init: Expr,
    },

    /// `target = value;`
    Assign { target: Expr, value: Expr },

    Return(Expr),

    /// `declare global { .. }`
    DeclareGlobal(Vec<Stmt>),

    Namespace { name: String, body: Vec<Stmt> },

    /// Leading block comment attached to a statement, printed as `/*text*/`
    Commented { comment: String, stmt: Box<Stmt> },
}

/// Ordered statements making up one generated file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceFile {
    pub statements: Vec<Stmt>,
}

impl SourceFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stmt: Stmt) {
        self.statements.push(stmt);
    }

    pub fn extend(&mut self, stmts: impl IntoIterator<Item = Stmt>) {
        self.statements.extend(stmts);
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
