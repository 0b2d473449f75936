//! The six built-in simplifier passes

use crate::chain::ast::{Expression, FilterMapCall};
use crate::chain::simplify::isolate::isolate_offsets;
use crate::chain::simplify::merge::merge_comparisons;
use crate::chain::simplify::SimplifyPass;

/// Replace the sentinel filter `element` with `(element=element)`
pub struct MaterializeTautology;

impl SimplifyPass for MaterializeTautology {
    fn name(&self) -> &str {
        "materialize-tautology"
    }

    fn apply(&self, pair: &FilterMapCall) -> FilterMapCall {
        if pair.has_sentinel_filter() {
            FilterMapCall::new(Expression::tautology(), pair.map.clone())
        } else {
            pair.clone()
        }
    }

    fn description(&self) -> &str {
        "A chain without filters keeps every element"
    }
}

/// Evaluate constant arithmetic in both expressions
pub struct FoldConstants;

impl SimplifyPass for FoldConstants {
    fn name(&self) -> &str {
        "fold-constants"
    }

    fn apply(&self, pair: &FilterMapCall) -> FilterMapCall {
        FilterMapCall::new(pair.filter.evaluate_constants(), pair.map.evaluate_constants())
    }

    fn description(&self) -> &str {
        "Evaluate + - * over constant operands"
    }
}

/// Move constants to the right-hand side of filter nodes
pub struct NormalizeOperands;

impl SimplifyPass for NormalizeOperands {
    fn name(&self) -> &str {
        "normalize-operands"
    }

    fn apply(&self, pair: &FilterMapCall) -> FilterMapCall {
        FilterMapCall::new(pair.filter.normalize_operand_order(), pair.map.clone())
    }

    fn description(&self) -> &str {
        "Swap constant-first filter nodes, flipping < and >"
    }
}

/// Move `+ c` / `- c` offsets across filter comparisons
pub struct IsolateOffsets;

impl SimplifyPass for IsolateOffsets {
    fn name(&self) -> &str {
        "isolate-offsets"
    }

    fn apply(&self, pair: &FilterMapCall) -> FilterMapCall {
        FilterMapCall::new(isolate_offsets(&pair.filter), pair.map.clone())
    }

    fn description(&self) -> &str {
        "Rewrite ((x+c1)<c2) as (x<c2-c1)"
    }
}

/// Merge conjoined element comparisons and absorb contradictions
pub struct MergeComparisons;

impl SimplifyPass for MergeComparisons {
    fn name(&self) -> &str {
        "merge-comparisons"
    }

    fn apply(&self, pair: &FilterMapCall) -> FilterMapCall {
        FilterMapCall::new(merge_comparisons(&pair.filter), pair.map.clone())
    }

    fn description(&self) -> &str {
        "Combine (element op n) constraints joined by &"
    }
}

/// Reset the map to `element` when the filter can never pass
pub struct PropagateFalse;

impl SimplifyPass for PropagateFalse {
    fn name(&self) -> &str {
        "propagate-false"
    }

    fn apply(&self, pair: &FilterMapCall) -> FilterMapCall {
        if pair.filter.is_contradiction() {
            FilterMapCall::new(pair.filter.clone(), Expression::Element)
        } else {
            pair.clone()
        }
    }

    fn description(&self) -> &str {
        "An always-false filter makes the map unreachable"
    }
}
