use serde::{Deserialize, Serialize};

/// Namespace prefix the parser puts on selector functions it synthesizes
/// (`builtin.children`, `builtin.item`).
pub const BUILTIN_PREFIX: &str = "builtin.";

/// A node of a parsed path expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Expression {
    /// Literal value (`'Quantity'`, `1`, `true`)
    Constant(Literal),

    /// Root/identity reference (`$this`, or the implicit focus of a path)
    Axis(Axis),

    /// Member access (`focus.name`)
    Child {
        focus: Box<Expression>,
        #[serde(default)]
        operator: MemberOperator,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },

    /// Infix operation (`a | b`, `value as Quantity`)
    Binary {
        operator: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// Function invocation, optionally on a receiver (`value.as(Quantity)`)
    Call {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        focus: Option<Box<Expression>>,
        function: String,
        #[serde(default)]
        arguments: Vec<Expression>,
    },

    /// Environment variable reference (`%resource`)
    Variable { name: String },
}

/// Literal constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Literal {
    String(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    This,
    That,
    Index,
    Total,
}

/// How a member-access node selects from its focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberOperator {
    /// Direct children, optionally filtered to one named member
    #[default]
    Children,
    /// All descendants
    Descendants,
}

/// Infix operators of the path language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    #[serde(rename = "as")]
    As,
    #[serde(rename = "is")]
    Is,
    #[serde(rename = "|")]
    Union,
    #[serde(rename = "=", alias = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "~")]
    Equivalent,
    #[serde(rename = "!~")]
    NotEquivalent,
    #[serde(rename = "and")]
    And,
    #[serde(rename = "or")]
    Or,
    #[serde(rename = "xor")]
    Xor,
    #[serde(rename = "implies")]
    Implies,
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "div")]
    IntegerDivide,
    #[serde(rename = "mod")]
    Modulo,
    #[serde(rename = "&")]
    Concatenate,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessThanOrEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "contains")]
    Contains,
}

impl BinaryOperator {
    /// Source spelling of the operator
    pub fn symbol(&self) -> &'static str {
        use BinaryOperator::*;

        match self {
            As => "as",
            Is => "is",
            Union => "|",
            Equal => "=",
            NotEqual => "!=",
            Equivalent => "~",
            NotEquivalent => "!~",
            And => "and",
            Or => "or",
            Xor => "xor",
            Implies => "implies",
            Add => "+",
            Subtract => "-",
            Multiply => "*",
            Divide => "/",
            IntegerDivide => "div",
            Modulo => "mod",
            Concatenate => "&",
            LessThan => "<",
            LessThanOrEqual => "<=",
            GreaterThan => ">",
            GreaterThanOrEqual => ">=",
            In => "in",
            Contains => "contains",
        }
    }
}

impl Expression {
    /// The implicit `$this` focus every path starts from
    pub fn this() -> Self {
        Expression::Axis(Axis::This)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::Constant(Literal::String(value.into()))
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable { name: name.into() }
    }

    /// Build a dotted member path (`Observation.value.code`) rooted at `$this`.
    /// Empty segments are skipped.
    pub fn path(dotted: &str) -> Self {
        dotted
            .split('.')
            .filter(|segment| !segment.is_empty())
            .fold(Expression::this(), |focus, name| focus.child(name))
    }

    /// Access the member `name` of this expression
    pub fn child(self, name: impl Into<String>) -> Self {
        Expression::Child {
            focus: Box::new(self),
            operator: MemberOperator::Children,
            name: Some(name.into()),
        }
    }

    /// Invoke `function` with this expression as the receiver
    pub fn call(self, function: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Expression::Call {
            focus: Some(Box::new(self)),
            function: function.into(),
            arguments,
        }
    }

    pub fn binary(self, operator: BinaryOperator, right: Expression) -> Self {
        Expression::Binary {
            operator,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    pub fn union(self, right: Expression) -> Self {
        self.binary(BinaryOperator::Union, right)
    }

    /// Operands of a binary node (left, right) or the argument list of a call
    pub fn arguments(&self) -> Vec<&Expression> {
        match self {
            Expression::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            Expression::Call { arguments, .. } => arguments.iter().collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Expression::Constant(_))
    }

    pub fn as_str_literal(&self) -> Option<&str> {
        match self {
            Expression::Constant(Literal::String(value)) => Some(value),
            _ => None,
        }
    }

    /// Short name of the node kind, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Constant(_) => "constant",
            Expression::Axis(_) => "axis",
            Expression::Child { .. } => "child",
            Expression::Binary { .. } => "binary",
            Expression::Call { .. } => "call",
            Expression::Variable { .. } => "variable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_nests_outermost_member_last() {
        let expr = Expression::path("Patient.name");

        match expr {
            Expression::Child { focus, name, .. } => {
                assert_eq!(name.as_deref(), Some("name"));
                match *focus {
                    Expression::Child { focus, name, .. } => {
                        assert_eq!(name.as_deref(), Some("Patient"));
                        assert_eq!(*focus, Expression::this());
                    }
                    other => panic!("Expected child, got {:?}", other),
                }
            }
            other => panic!("Expected child, got {:?}", other),
        }
    }

    #[test]
    fn test_arguments_of_binary_are_ordered() {
        let expr = Expression::path("a").union(Expression::path("b"));
        let args = expr.arguments();

        assert_eq!(args.len(), 2);
        assert_eq!(*args[0], Expression::path("a"));
        assert_eq!(*args[1], Expression::path("b"));
    }

    #[test]
    fn test_string_literal_access() {
        assert_eq!(Expression::string("Quantity").as_str_literal(), Some("Quantity"));
        assert_eq!(Expression::Constant(Literal::Integer(1)).as_str_literal(), None);
        assert!(Expression::Constant(Literal::Boolean(true)).is_constant());
    }

    #[test]
    fn test_deserialize_tree() {
        let json = r#"{
            "call": {
                "focus": { "child": { "focus": { "axis": "this" }, "name": "value" } },
                "function": "as",
                "arguments": [ { "constant": { "string": "Quantity" } } ]
            }
        }"#;

        let expr: Expression = serde_json::from_str(json).unwrap();
        assert_eq!(
            expr,
            Expression::path("value").call("as", vec![Expression::string("Quantity")])
        );
    }

    #[test]
    fn test_operator_serializes_as_symbol() {
        let json = serde_json::to_string(&BinaryOperator::NotEqual).unwrap();
        assert_eq!(json, r#""!=""#);

        let op: BinaryOperator = serde_json::from_str(r#""|""#).unwrap();
        assert_eq!(op, BinaryOperator::Union);
    }

    #[test]
    fn test_double_equals_reads_as_equality() {
        let op: BinaryOperator = serde_json::from_str(r#""==""#).unwrap();
        assert_eq!(op, BinaryOperator::Equal);

        let op: BinaryOperator = serde_json::from_str(r#""=""#).unwrap();
        assert_eq!(op, BinaryOperator::Equal);
        assert_eq!(serde_json::to_string(&op).unwrap(), r#""=""#);
    }
}
