//! The rewrite steps taken while normalizing an expression.

/// A rewrite applied by one of the simplification [`rules`](super::rules).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A `nan` operand makes the whole node `nan`.
    PropagateUndefined,

    /// `a + (b + c) = a + b + c`
    FlattenAdd,

    /// Infinite terms absorb finite terms, and `oo - oo = nan`.
    AddInfinities,

    /// `2 + 3 = 5`
    AddNumbers,

    /// `2x + 3x = 5x`
    CombineLikeTerms,

    /// Terms were put in canonical order.
    SortTerms,

    /// `a * (b * c) = a * b * c`
    FlattenMul,

    /// `2 * oo = oo`, `0 * oo = nan`
    MultiplyInfinities,

    /// `0 * a = 0`
    MultiplyZero,

    /// `2 * 3 = 6`
    MultiplyNumbers,

    /// `x * x^2 = x^3`
    CombineLikeFactors,

    /// `exp(a) * exp(b) = exp(a + b)`
    CombineExponentials,

    /// `2(x + 1) = 2x + 2`
    DistributeCoefficient,

    /// Factors were put in canonical order.
    SortFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `1^a = 1`
    OneToPower,

    /// `0^a = 0` for positive `a`
    ZeroToPower,

    /// `2^3 = 8`
    EvaluatePower,

    /// `sqrt(8) = 2sqrt(2)`
    ExtractRoot,

    /// `(a^b)^c = a^(bc)` for integer `c`
    PowerOfPower,

    /// `(ab)^c = a^c b^c`
    PowerOfProduct,

    /// `exp(a)^b = exp(ab)`
    PowerOfExponential,

    /// `oo^2 = oo`, `2^oo = oo`
    PowerInfinities,

    /// A function was evaluated at a point where its value is known exactly.
    EvaluateFunction,

    /// A function was evaluated numerically at a floating-point argument.
    EvaluateFunctionNumerically,

    /// `sin(-x) = -sin(x)`, `cos(-x) = cos(x)`
    FunctionParity,

    /// `exp(ln(a)) = a`, `ln(exp(a)) = a`
    InverseFunctions,
}
