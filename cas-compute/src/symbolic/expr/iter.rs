use super::{Primary, SymExpr};

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first).
///
/// The arguments of a function call are children of the call, so `sin(x)` yields `x` and then
/// `sin(x)`.
///
/// This iterator is created by [`SymExpr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a SymExpr>,
    last_visited: Option<&'a SymExpr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a SymExpr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a SymExpr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression matches the last visited expression.
    fn is_last_visited(&self, expr: &'a SymExpr) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, expr),
            None => false,
        }
    }

    /// Visits the parent once its last child was visited, otherwise schedules the children.
    fn descend(&mut self, children: &'a [SymExpr]) -> Option<Option<&'a SymExpr>> {
        match children.last() {
            Some(last) if !self.is_last_visited(last) => {
                for child in children.iter().rev() {
                    self.stack.push(child);
                }
                None
            },
            _ => Some(self.visit()),
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a SymExpr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            match expr {
                SymExpr::Primary(Primary::Call(_, args)) => {
                    if let Some(visited) = self.descend(args) {
                        return visited;
                    }
                },
                SymExpr::Primary(_) | SymExpr::Special(_) => return self.visit(),
                SymExpr::Add(children) | SymExpr::Mul(children) => {
                    if let Some(visited) = self.descend(children) {
                        return visited;
                    }
                },
                SymExpr::Exp(lhs, rhs) => {
                    if self.is_last_visited(rhs) {
                        return self.visit();
                    }
                    self.stack.push(rhs);
                    self.stack.push(lhs);
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn visits_call_arguments() {
        let x = SymExpr::symbol("x");
        let expr = SymExpr::call1("sin", x.clone() * SymExpr::integer(2)).pow(SymExpr::integer(3));
        let visited = expr.post_order_iter().map(|e| e.to_string()).collect::<Vec<_>>();
        assert_eq!(visited, vec!["x", "2", "x*2", "sin(x*2)", "3", "sin(x*2)^3"]);
    }
}
