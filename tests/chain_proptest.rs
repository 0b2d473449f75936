//! Property-based tests over generated, well-typed call chains

use chainfold::chain::ast::{Call, CallChain, Expression, Op};
use chainfold::chain::folding::{fold, fold_from};
use chainfold::chain::lexing::tokenize;
use chainfold::chain::parsing::parse;
use chainfold::compile;
use proptest::prelude::*;

fn arithmetic_strategy() -> impl Strategy<Value = Expression> {
    let leaf = prop_oneof![
        Just(Expression::Element),
        (-50i32..50).prop_map(Expression::Constant),
    ];
    leaf.prop_recursive(3, 12, 2, |inner| {
        (
            inner.clone(),
            prop_oneof![Just(Op::PLUS), Just(Op::MINUS), Just(Op::TIMES)],
            inner,
        )
            .prop_map(|(left, op, right)| Expression::binary(left, op, right))
    })
}

fn comparison_strategy() -> impl Strategy<Value = Expression> {
    (
        arithmetic_strategy(),
        prop_oneof![Just(Op::GT), Just(Op::LT), Just(Op::EQ)],
        arithmetic_strategy(),
    )
        .prop_map(|(left, op, right)| Expression::binary(left, op, right))
}

fn boolean_strategy() -> impl Strategy<Value = Expression> {
    comparison_strategy().prop_recursive(2, 8, 2, |inner| {
        (
            inner.clone(),
            prop_oneof![Just(Op::AND), Just(Op::OR)],
            inner,
        )
            .prop_map(|(left, op, right)| Expression::binary(left, op, right))
    })
}

fn call_strategy() -> impl Strategy<Value = Call> {
    prop_oneof![
        arithmetic_strategy().prop_map(Call::Map),
        boolean_strategy().prop_map(Call::Filter),
    ]
}

fn calls_strategy() -> impl Strategy<Value = Vec<Call>> {
    prop::collection::vec(call_strategy(), 1..6)
}

/// A chain of at least two calls plus a split point strictly inside it
fn split_strategy() -> impl Strategy<Value = (Vec<Call>, usize)> {
    prop::collection::vec(call_strategy(), 2..6).prop_flat_map(|calls| {
        let len = calls.len();
        (Just(calls), 1..len)
    })
}

proptest! {
    #[test]
    fn test_display_parse_roundtrip(calls in calls_strategy()) {
        let chain = CallChain::from_calls(calls).unwrap();
        let text = chain.to_string();
        let reparsed = parse(&text).unwrap();
        prop_assert_eq!(&reparsed, &chain);
        prop_assert_eq!(reparsed.to_string(), text);
    }

    #[test]
    fn test_generated_chains_compile(calls in calls_strategy()) {
        let chain = CallChain::from_calls(calls).unwrap();
        let output = compile(&chain.to_string());
        prop_assert!(output.starts_with("filter{"), "unexpected output {}", output);
        prop_assert!(output.contains("}%>%map{"), "missing separator in {}", output);
    }

    #[test]
    fn test_compile_is_idempotent(calls in calls_strategy()) {
        let chain = CallChain::from_calls(calls).unwrap();
        let once = compile(&chain.to_string());
        prop_assert_eq!(compile(&once), once);
    }

    #[test]
    fn test_fold_splits_at_any_point((calls, split) in split_strategy()) {
        let whole = CallChain::from_calls(calls.clone()).unwrap();
        let prefix = CallChain::from_calls(calls[..split].to_vec()).unwrap();
        let suffix = CallChain::from_calls(calls[split..].to_vec()).unwrap();
        prop_assert_eq!(fold_from(&suffix, fold(&prefix)), fold(&whole));
    }

    #[test]
    fn test_tokenize_never_panics(input in "\\PC*") {
        let _tokens = tokenize(&input);
        let _output = compile(&input);
    }
}
