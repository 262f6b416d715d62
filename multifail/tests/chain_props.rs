use multifail::{Failure, FailureKind, RootFailure, build};
use proptest::prelude::*;

fn root(message: Option<&String>) -> RootFailure {
    match message {
        Some(text) => RootFailure::new(text.as_str()),
        None => RootFailure::anonymous(),
    }
}

fn failure(message: Option<&String>) -> Failure {
    root(message).into()
}

fn with_depth(message: Option<&String>, depth: usize) -> Failure {
    let below = (0..depth).rev().fold(None, |inner: Option<Failure>, level| {
        let node = RootFailure::new(format!("deep-{level}"));
        Some(match inner {
            Some(cause) => node.with_cause(cause).into(),
            None => node.into(),
        })
    });
    match below {
        Some(cause) => root(message).with_cause(cause).into(),
        None => failure(message),
    }
}

fn arb_messages() -> impl Strategy<Value = Vec<Option<String>>> {
    proptest::collection::vec(proptest::option::of("[a-z ]{0,8}"), 0..8)
}

fn messages(f: &Failure) -> Vec<String> {
    f.chain().map(ToString::to_string).collect()
}

proptest! {
    #[test]
    fn chain_surfaces_every_input_in_order(
        inputs in arb_messages(),
        summary in proptest::option::of("[a-z]{0,6}"),
    ) {
        let failures: Vec<Failure> = inputs.iter().map(|m| failure(m.as_ref())).collect();
        let out = build(summary.as_deref(), failures);

        match inputs.len() {
            0 => prop_assert!(out.is_none()),
            1 => {
                let out = out.expect("single failure");
                prop_assert_eq!(out.kind(), FailureKind::Root);
                prop_assert_eq!(out.message(), inputs[0].as_deref());
            }
            k => {
                let out = out.expect("composite");
                let mut expected = vec![format!(
                    "{} - Multi[{k}]...",
                    summary.as_deref().unwrap_or_default()
                )];
                for (i, m) in inputs[..k - 1].iter().enumerate() {
                    expected.push(match m {
                        Some(text) => format!("...[{}/{k}] {text}", i + 1),
                        None => format!("...[{}/{k}]", i + 1),
                    });
                }
                expected.push(inputs[k - 1].clone().unwrap_or_default());

                prop_assert_eq!(messages(&out), expected);
                let composite = out.as_composite().expect("composite");
                prop_assert_eq!(composite.len(), k);
            }
        }
    }

    #[test]
    fn chain_length_tracks_last_failure_depth(
        inputs in proptest::collection::vec(proptest::option::of("[a-z]{1,4}"), 2..6),
        depth in 0usize..4,
    ) {
        let k = inputs.len();
        let mut failures: Vec<Failure> = inputs[..k - 1].iter().map(|m| failure(m.as_ref())).collect();
        failures.push(with_depth(inputs[k - 1].as_ref(), depth));

        let out = build(None, failures).expect("composite");
        // composite, k-1 links, the last failure, its own chain
        prop_assert_eq!(out.chain().count(), 1 + (k - 1) + 1 + depth);

        let mut links = out.chain().skip(1).take(k - 1);
        prop_assert!(links.all(|e| e
            .downcast_ref::<Failure>()
            .is_some_and(Failure::is_message_carrier)));
    }

    #[test]
    fn building_twice_is_deterministic(inputs in arb_messages(), summary in "[a-z]{0,6}") {
        let first = build(Some(summary.as_str()), inputs.iter().map(|m| failure(m.as_ref())));
        let second = build(Some(summary.as_str()), inputs.iter().map(|m| failure(m.as_ref())));
        prop_assert_eq!(
            first.as_ref().map(Failure::report),
            second.as_ref().map(Failure::report)
        );
    }
}
