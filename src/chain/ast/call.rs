//! Call-chain stages
//!
//! A [CallChain] is a non-empty, head-first list of [Call]s applied left to right.
//! [FilterMapCall] is the canonical accumulator the folding engine threads through a
//! chain: exactly one filter followed by exactly one map.

use crate::chain::ast::expression::Expression;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between stages in serialized chains
pub const PIPE: &str = "%>%";

/// A single `map{...}` or `filter{...}` stage
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Call {
    Map(Expression),
    Filter(Expression),
}

impl Call {
    pub fn expression(&self) -> &Expression {
        match self {
            Call::Map(expr) | Call::Filter(expr) => expr,
        }
    }

    /// Substitute `replacement` for the element inside the wrapped expression
    pub fn substitute(&self, replacement: &Expression) -> Call {
        match self {
            Call::Map(expr) => Call::Map(expr.substitute(replacement)),
            Call::Filter(expr) => Call::Filter(expr.substitute(replacement)),
        }
    }

    /// Check the stage contract: filters must be boolean, maps arithmetic
    pub fn is_well_typed(&self) -> bool {
        match self {
            Call::Map(expr) => expr.is_arithmetic(),
            Call::Filter(expr) => expr.is_boolean(),
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Call::Map(expr) => write!(f, "map{{{}}}", expr),
            Call::Filter(expr) => write!(f, "filter{{{}}}", expr),
        }
    }
}

/// A head-first sequence of stages
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallChain {
    Call(Call),
    Chain { head: Call, tail: Box<CallChain> },
}

impl CallChain {
    pub fn chain(head: Call, tail: CallChain) -> Self {
        CallChain::Chain {
            head,
            tail: Box::new(tail),
        }
    }

    /// Build a chain from stages in application order.
    ///
    /// Returns `None` for an empty list.
    pub fn from_calls(calls: Vec<Call>) -> Option<CallChain> {
        let mut calls = calls.into_iter().rev();
        let last = CallChain::Call(calls.next()?);
        Some(calls.fold(last, |tail, head| CallChain::chain(head, tail)))
    }

    /// Iterate over the stages, head first
    pub fn calls(&self) -> Calls<'_> {
        Calls { next: Some(self) }
    }

    pub fn len(&self) -> usize {
        self.calls().count()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for CallChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, call) in self.calls().enumerate() {
            if i > 0 {
                f.write_str(PIPE)?;
            }
            write!(f, "{}", call)?;
        }
        Ok(())
    }
}

/// Iterator returned by [CallChain::calls]
pub struct Calls<'a> {
    next: Option<&'a CallChain>,
}

impl<'a> Iterator for Calls<'a> {
    type Item = &'a Call;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next.take()? {
            CallChain::Call(call) => Some(call),
            CallChain::Chain { head, tail } => {
                self.next = Some(&**tail);
                Some(head)
            }
        }
    }
}

/// The canonical filter + map pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterMapCall {
    /// Predicate of the filter stage
    pub filter: Expression,
    /// Transform of the map stage
    pub map: Expression,
}

impl FilterMapCall {
    pub fn new(filter: Expression, map: Expression) -> Self {
        FilterMapCall { filter, map }
    }

    /// Fold seed: unconstrained filter, identity map
    pub fn identity() -> Self {
        FilterMapCall::new(Expression::Element, Expression::Element)
    }

    /// True while no filter has been folded in
    pub fn has_sentinel_filter(&self) -> bool {
        self.filter == Expression::Element
    }

    pub fn to_call_chain(&self) -> CallChain {
        CallChain::chain(
            Call::Filter(self.filter.clone()),
            CallChain::Call(Call::Map(self.map.clone())),
        )
    }
}

impl fmt::Display for FilterMapCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "filter{{{}}}{}map{{{}}}", self.filter, PIPE, self.map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ast::expression::Op;
    use Expression::{Constant, Element};

    fn gt(n: i32) -> Expression {
        Expression::binary(Element, Op::GT, Constant(n))
    }

    #[test]
    fn test_call_display() {
        assert_eq!(Call::Map(Element).to_string(), "map{element}");
        assert_eq!(Call::Filter(gt(3)).to_string(), "filter{(element>3)}");
    }

    #[test]
    fn test_chain_from_calls() {
        let chain = CallChain::from_calls(vec![
            Call::Map(Element),
            Call::Filter(gt(1)),
            Call::Map(Constant(2)),
        ])
        .unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.to_string(), "map{element}%>%filter{(element>1)}%>%map{2}");
        assert_eq!(chain.calls().next(), Some(&Call::Map(Element)));
        assert_eq!(CallChain::from_calls(vec![]), None);
    }

    #[test]
    fn test_single_call_chain() {
        let chain = CallChain::Call(Call::Filter(gt(0)));
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.to_string(), "filter{(element>0)}");
    }

    #[test]
    fn test_well_typed() {
        assert!(Call::Map(Element).is_well_typed());
        assert!(!Call::Filter(Element).is_well_typed());
        assert!(Call::Filter(gt(0)).is_well_typed());
        assert!(!Call::Map(gt(0)).is_well_typed());
    }

    #[test]
    fn test_filter_map_call() {
        let pair = FilterMapCall::identity();
        assert!(pair.has_sentinel_filter());

        let pair = FilterMapCall::new(gt(0), Constant(-1));
        assert!(!pair.has_sentinel_filter());
        assert_eq!(pair.to_string(), "filter{(element>0)}%>%map{(-1)}");
        assert_eq!(pair.to_call_chain().to_string(), pair.to_string());
    }
}
