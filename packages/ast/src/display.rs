use crate::ast::{Axis, Expression, Literal, MemberOperator, BUILTIN_PREFIX};
use std::fmt::{self, Display, Formatter};

/// Renders trees back into path-language syntax. Used for error messages and
/// diagnostics, so the output favours readability over exact round-tripping.
impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Constant(literal) => write!(f, "{}", literal),

            Expression::Axis(axis) => write!(f, "{}", axis),

            Expression::Child {
                focus,
                operator,
                name,
            } => {
                write_focus(f, focus)?;
                match (operator, name) {
                    (MemberOperator::Children, Some(name)) => f.write_str(name),
                    (MemberOperator::Children, None) => f.write_str("children()"),
                    (MemberOperator::Descendants, _) => f.write_str("descendants()"),
                }
            }

            Expression::Binary {
                operator,
                left,
                right,
            } => {
                write_operand(f, left)?;
                write!(f, " {} ", operator.symbol())?;
                write_operand(f, right)
            }

            Expression::Call {
                focus,
                function,
                arguments,
            } => {
                let name = function.strip_prefix(BUILTIN_PREFIX).unwrap_or(function);

                if let (Some(focus), "item") = (focus, name) {
                    write_operand(f, focus)?;
                    f.write_str("[")?;
                    write_list(f, arguments)?;
                    return f.write_str("]");
                }

                if let Some(focus) = focus {
                    write_focus(f, focus)?;
                }
                write!(f, "{}(", name)?;
                write_list(f, arguments)?;
                f.write_str(")")
            }

            Expression::Variable { name } => write!(f, "%{}", name),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(value) => {
                f.write_str("'")?;
                for c in value.chars() {
                    match c {
                        '\'' => f.write_str("\\'")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\r' => f.write_str("\\r")?,
                        '\t' => f.write_str("\\t")?,
                        _ => write!(f, "{}", c)?,
                    }
                }
                f.write_str("'")
            }
            Literal::Integer(value) => write!(f, "{}", value),
            Literal::Decimal(value) => write!(f, "{}", value),
            Literal::Boolean(value) => f.write_str(if *value { "true" } else { "false" }),
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::This => "$this",
            Axis::That => "$that",
            Axis::Index => "$index",
            Axis::Total => "$total",
        })
    }
}

/// Writes `focus.` unless the focus is the implicit root, which paths omit
fn write_focus(f: &mut Formatter<'_>, focus: &Expression) -> fmt::Result {
    match focus {
        Expression::Axis(Axis::This) | Expression::Axis(Axis::That) => Ok(()),
        other => {
            write_operand(f, other)?;
            f.write_str(".")
        }
    }
}

fn write_operand(f: &mut Formatter<'_>, operand: &Expression) -> fmt::Result {
    if matches!(operand, Expression::Binary { .. }) {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

fn write_list(f: &mut Formatter<'_>, items: &[Expression]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::ast::{BinaryOperator, Expression, Literal};

    #[test]
    fn test_render_path() {
        assert_eq!(Expression::path("Patient.name.given").to_string(), "Patient.name.given");
    }

    #[test]
    fn test_render_cast_call() {
        let expr = Expression::path("Observation.value")
            .call("as", vec![Expression::string("Quantity")]);

        assert_eq!(expr.to_string(), "Observation.value.as('Quantity')");
    }

    #[test]
    fn test_render_nested_binary() {
        let expr = Expression::path("Observation.value")
            .binary(BinaryOperator::As, Expression::string("Period"))
            .union(Expression::path("Observation.effective"));

        assert_eq!(
            expr.to_string(),
            "(Observation.value as 'Period') | Observation.effective"
        );
    }

    #[test]
    fn test_render_builtin_item_as_indexer() {
        let expr = Expression::path("Patient.name").call(
            "builtin.item",
            vec![Expression::Constant(Literal::Integer(0))],
        );

        assert_eq!(expr.to_string(), "Patient.name[0]");
    }

    #[test]
    fn test_render_escapes_quotes() {
        assert_eq!(Expression::string("it's").to_string(), r"'it\'s'");
    }

    #[test]
    fn test_render_variable() {
        assert_eq!(
            Expression::variable("resource").child("id").to_string(),
            "%resource.id"
        );
    }
}
