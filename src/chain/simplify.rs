//! Algebraic simplifier for canonical filter + map pairs
//!
//! The simplifier is an ordered list of passes, each a pure function from one
//! [FilterMapCall] to the next. The default order is fixed and each pass runs once:
//!
//! 1. [MaterializeTautology]: a sentinel filter becomes `(element=element)`
//! 2. [FoldConstants]: constant arithmetic is evaluated in filter and map
//! 3. [NormalizeOperands]: constants move to the right of filter nodes
//! 4. [IsolateOffsets]: `((x+c1)<c2)` becomes `(x<c2-c1)` in the filter
//! 5. [MergeComparisons]: pairs of `(element op n)` under `&` merge or contradict
//! 6. [PropagateFalse]: a contradicted filter resets the map to `element`
//!
//! Every pass reaches its normal form in one application, so running the default list
//! twice gives the same pair as running it once.
//!
//! Passes implement [SimplifyPass] and are held by a [Simplifier], the same shape as a
//! formatter registry: callers may assemble a custom list, but the defaults are what
//! [crate::compile] uses.

pub mod isolate;
pub mod merge;
pub mod passes;

pub use passes::{
    FoldConstants, IsolateOffsets, MaterializeTautology, MergeComparisons, NormalizeOperands,
    PropagateFalse,
};

use crate::chain::ast::FilterMapCall;
use tracing::debug;

/// A single rewrite over the canonical pair
pub trait SimplifyPass: Send + Sync {
    /// The name of this pass (e.g., "fold-constants")
    fn name(&self) -> &str;

    /// Rewrite the pair
    fn apply(&self, pair: &FilterMapCall) -> FilterMapCall;

    /// Optional description of this pass
    fn description(&self) -> &str {
        ""
    }
}

/// Ordered list of simplifier passes
pub struct Simplifier {
    passes: Vec<Box<dyn SimplifyPass>>,
}

impl Simplifier {
    /// Create a simplifier with no passes
    pub fn new() -> Self {
        Simplifier { passes: Vec::new() }
    }

    /// Append a pass to the end of the list
    pub fn register<P: SimplifyPass + 'static>(&mut self, pass: P) {
        self.passes.push(Box::new(pass));
    }

    /// The full six-pass pipeline
    pub fn with_defaults() -> Self {
        let mut simplifier = Self::new();
        simplifier.register(MaterializeTautology);
        simplifier.register(FoldConstants);
        simplifier.register(NormalizeOperands);
        simplifier.register(IsolateOffsets);
        simplifier.register(MergeComparisons);
        simplifier.register(PropagateFalse);
        simplifier
    }

    /// Only the tautology pass, which every emitted pair needs
    pub fn fold_only() -> Self {
        let mut simplifier = Self::new();
        simplifier.register(MaterializeTautology);
        simplifier
    }

    /// Names of the registered passes, in run order
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    /// Run every pass once, in order
    pub fn run(&self, pair: &FilterMapCall) -> FilterMapCall {
        self.passes.iter().fold(pair.clone(), |current, pass| {
            let next = pass.apply(&current);
            if next != current {
                debug!(pass = pass.name(), result = %next, "simplifier pass rewrote pair");
            }
            next
        })
    }
}

impl Default for Simplifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Run the default passes over a pair
pub fn simplify(pair: &FilterMapCall) -> FilterMapCall {
    Simplifier::with_defaults().run(pair)
}
