//! Chain-folding engine
//!
//! Reduces a call chain of any length to one [FilterMapCall] by threading an accumulator
//! through the stages, head first:
//!
//!     map{e}     the running map becomes `e` applied after it: `e[element := map]`
//!     filter{p}  the predicate is rewritten to observe the mapped value,
//!                `p[element := map]`, then conjoined onto the running filter with `&`
//!                (or replaces it while the filter is still the sentinel `element`)
//!
//! Folding is order dependent and not associative: a chain can only be split into a
//! prefix and a suffix, with the suffix folded from the prefix's state (see [fold_from]).
//!
//! The result may still carry the sentinel filter. Turning it into a tautology is the
//! first simplifier pass.

use crate::chain::ast::{Call, CallChain, Expression, FilterMapCall, Op};
use tracing::trace;

/// Fold one stage into the accumulator
pub fn update_state(call: &Call, state: &FilterMapCall) -> FilterMapCall {
    match call {
        Call::Map(expr) => FilterMapCall::new(state.filter.clone(), expr.substitute(&state.map)),
        Call::Filter(expr) => {
            let predicate = expr.substitute(&state.map);
            let filter = if state.has_sentinel_filter() {
                predicate
            } else {
                Expression::binary(state.filter.clone(), Op::AND, predicate)
            };
            FilterMapCall::new(filter, state.map.clone())
        }
    }
}

/// Fold a chain starting from an existing accumulator
pub fn fold_from(chain: &CallChain, state: FilterMapCall) -> FilterMapCall {
    chain.calls().fold(state, |state, call| {
        let next = update_state(call, &state);
        trace!(%call, state = %next, "folded stage");
        next
    })
}

/// Fold a chain from the identity seed
pub fn fold(chain: &CallChain) -> FilterMapCall {
    fold_from(chain, FilterMapCall::identity())
}
