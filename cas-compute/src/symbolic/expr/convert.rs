//! Conversion from the parser's AST into [`SymExpr`].

use cas_error::Error;
use cas_parser::parser::{
    ast::{Call, Equation, Expr as AstExpr, Literal},
    token::op::{BinOpKind, UnaryOpKind},
};
use crate::{
    primitive::{float_from_str, int_from_str},
    symbolic::error::{InvalidNumber, UnknownFunction, WrongArgumentCount},
};
use super::{Special, SymExpr, PI};

/// The functions known to the engine, with the number of arguments each accepts.
///
/// `log` also accepts a second argument, the base of the logarithm.
pub const FUNCTIONS: &[(&str, usize)] = &[
    ("sin", 1), ("cos", 1), ("tan", 1), ("sec", 1), ("csc", 1), ("cot", 1),
    ("asin", 1), ("acos", 1), ("atan", 1),
    ("sinh", 1), ("cosh", 1), ("tanh", 1),
    ("exp", 1), ("ln", 1), ("log", 1), ("sqrt", 1), ("abs", 1),
];

/// Alternative spellings accepted for some functions.
const ALIASES: &[(&str, &str)] = &[
    ("arcsin", "asin"),
    ("arccos", "acos"),
    ("arctan", "atan"),
];

/// Converts a parsed expression into a [`SymExpr`]. No simplification is done.
///
/// Named constants are resolved here: `e` and `E` become `exp(1)`, `pi` stays a symbol and `oo`
/// becomes positive infinity.
pub fn from_ast(expr: &AstExpr) -> Result<SymExpr, Error> {
    match expr {
        AstExpr::Literal(literal) => match literal {
            Literal::Integer(int) => int_from_str(&int.value)
                .map(SymExpr::integer)
                .ok_or_else(|| Error::new(vec![int.span.clone()], InvalidNumber {
                    literal: int.value.clone(),
                })),
            Literal::Float(float) => float_from_str(&float.value)
                .map(SymExpr::float)
                .ok_or_else(|| Error::new(vec![float.span.clone()], InvalidNumber {
                    literal: float.value.clone(),
                })),
            Literal::Symbol(sym) => Ok(match sym.name.as_str() {
                "e" | "E" => SymExpr::call1("exp", SymExpr::one()),
                "oo" => SymExpr::Special(Special::Infinity),
                PI => SymExpr::symbol(PI),
                name => SymExpr::symbol(name),
            }),
        },
        AstExpr::Paren(paren) => from_ast(paren.innermost()),
        AstExpr::Call(call) => from_call(call),
        AstExpr::Unary(unary) => match unary.op.kind {
            // treat this as -1 * operand
            UnaryOpKind::Neg => Ok(-from_ast(&unary.operand)?),
        },
        AstExpr::Binary(bin) => {
            let lhs = from_ast(&bin.lhs)?;
            let rhs = from_ast(&bin.rhs)?;
            Ok(match bin.op.kind {
                BinOpKind::Exp => lhs.pow(rhs),
                BinOpKind::Mul => lhs * rhs,
                BinOpKind::Div => lhs / rhs,
                BinOpKind::Add => lhs + rhs,
                BinOpKind::Sub => lhs - rhs,
            })
        },
    }
}

/// Converts both sides of an equation. The right-hand side is [`None`] if the equation has no `=`.
pub fn from_equation(equation: &Equation) -> Result<(SymExpr, Option<SymExpr>), Error> {
    let lhs = from_ast(&equation.lhs)?;
    let rhs = equation.rhs.as_ref().map(from_ast).transpose()?;
    Ok((lhs, rhs))
}

/// Converts a function call, resolving aliases and rewriting `sqrt` and `log` into powers and
/// natural logarithms.
fn from_call(call: &Call) -> Result<SymExpr, Error> {
    let name = ALIASES.iter()
        .find(|(alias, _)| *alias == call.name.name)
        .map(|(_, name)| *name)
        .unwrap_or(call.name.name.as_str());

    let Some((_, arity)) = FUNCTIONS.iter().find(|(known, _)| *known == name) else {
        let suggestions = FUNCTIONS.iter()
            .map(|(known, _)| *known)
            .filter(|known| levenshtein::levenshtein(known, name) <= 2)
            .map(str::to_string)
            .collect();
        return Err(Error::new(vec![call.name.span.clone()], UnknownFunction {
            name: name.to_string(),
            suggestions,
        }));
    };

    let args = call.args.iter().map(from_ast).collect::<Result<Vec<_>, _>>()?;
    let accepts = |n: usize| n == *arity || (name == "log" && n == 2);
    if !accepts(args.len()) {
        return Err(Error::new(vec![call.span.clone()], WrongArgumentCount {
            name: name.to_string(),
            expected: if name == "log" { "1 or 2".to_string() } else { arity.to_string() },
            given: args.len(),
        }));
    }

    let mut args = args.into_iter();
    let Some(arg) = args.next() else {
        return Ok(SymExpr::call(name, Vec::new()));
    };
    Ok(match (name, args.next()) {
        ("sqrt", _) => arg.sqrt(),
        ("log", Some(base)) => SymExpr::call1("ln", arg) / SymExpr::call1("ln", base),
        ("log", None) => SymExpr::call1("ln", arg),
        (name, _) => SymExpr::call1(name, arg),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cas_parser::parser::Parser;
    use pretty_assertions::assert_eq;

    fn convert(input: &str) -> Result<SymExpr, Error> {
        let ast = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        from_ast(&ast)
    }

    #[test]
    fn constants() {
        assert_eq!(convert("e").unwrap(), SymExpr::call1("exp", SymExpr::one()));
        assert_eq!(convert("E").unwrap(), SymExpr::call1("exp", SymExpr::one()));
        assert_eq!(convert("pi").unwrap(), SymExpr::symbol(PI));
        assert_eq!(convert("oo").unwrap(), SymExpr::Special(Special::Infinity));
    }

    #[test]
    fn sqrt_and_log() {
        let x = SymExpr::symbol("x");
        assert_eq!(convert("sqrt(x)").unwrap(), x.clone().sqrt());
        assert_eq!(convert("log(x)").unwrap(), SymExpr::call1("ln", x.clone()));
        assert_eq!(
            convert("log(x, 2)").unwrap(),
            SymExpr::call1("ln", x) * SymExpr::call1("ln", SymExpr::integer(2)).recip(),
        );
    }

    #[test]
    fn unknown_function() {
        let err = convert("sni(x)").unwrap_err();
        assert_eq!(err.spans, vec![0..3]);
        let kind = err.downcast_ref::<UnknownFunction>().unwrap();
        assert_eq!(kind.name, "sni");
        assert!(kind.suggestions.contains(&"sin".to_string()));
    }

    #[test]
    fn implicit_call_is_unknown_function() {
        let err = convert("x(x+1)").unwrap_err();
        assert!(err.is::<UnknownFunction>());
    }

    #[test]
    fn wrong_argument_count() {
        let err = convert("sin(x, y)").unwrap_err();
        assert!(err.is::<WrongArgumentCount>());
    }
}
