//! Propagation of undefined values.

use crate::symbolic::{
    expr::{Primary, Special, SymExpr},
    simplify::step::Step,
    step_collector::StepCollector,
};

/// `nan + a = nan`, `nan * a = nan`, `f(nan) = nan`, etc.
pub fn propagate_undefined(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let undefined = |e: &SymExpr| matches!(e, SymExpr::Special(Special::Undefined));
    let has_undefined_child = match expr {
        SymExpr::Add(children) | SymExpr::Mul(children) => children.iter().any(undefined),
        SymExpr::Primary(Primary::Call(_, args)) => args.iter().any(undefined),
        SymExpr::Exp(base, exp) => undefined(base) || undefined(exp),
        SymExpr::Primary(_) | SymExpr::Special(_) => false,
    };

    if has_undefined_child {
        step_collector.push(Step::PropagateUndefined);
        Some(SymExpr::Special(Special::Undefined))
    } else {
        None
    }
}

/// Applies all rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    propagate_undefined(expr, step_collector)
}
