//! Collapse a batch of failures into zero, one, or a composite failure.
//!
//! - No failures: nothing to report.
//! - One failure: handed back unchanged, so a lone root cause is never masked.
//! - Two or more: a [`CompositeFailure`] chaining all of them.

use std::sync::Arc;

use crate::failure::{CompositeFailure, Failure, RootFailure};

/// Aggregate `failures` without propagating anything.
///
/// `message` only contributes to a composite's summary; it is ignored when
/// fewer than two failures are supplied.
///
/// ```
/// use multifail::{build, Failure};
///
/// assert!(build(Some("batch"), Vec::<Failure>::new()).is_none());
///
/// let lone = build(Some("batch"), [Failure::new("x")]).unwrap();
/// assert_eq!(lone.to_string(), "x");
///
/// let many = build(Some("batch"), [Failure::new("x"), Failure::new("y")]).unwrap();
/// assert_eq!(many.to_string(), "batch - Multi[2]...");
/// ```
pub fn build<I>(message: Option<&str>, failures: I) -> Option<Failure>
where
    I: IntoIterator,
    I::Item: Into<Failure>,
{
    let mut failures = failures.into_iter().map(Into::into);
    let first = failures.next()?;
    let Some(second) = failures.next() else {
        #[cfg(feature = "tracing")]
        tracing::trace!(failure = %first, "single failure passed through");
        return Some(first);
    };

    let mut linked = vec![Arc::new(first)];
    let mut last = Arc::new(second);
    for failure in failures {
        linked.push(std::mem::replace(&mut last, Arc::new(failure)));
    }

    let composite = CompositeFailure::assemble(message, linked, last);
    #[cfg(feature = "tracing")]
    tracing::debug!(
        count = composite.len(),
        summary = composite.summary(),
        "aggregated failures"
    );
    Some(Failure::Composite(composite))
}

/// Aggregate `failures` underneath a caller-chosen outer failure.
///
/// When a composite results, returns a copy of `root` whose cause is that
/// composite (replacing any cause `root` already had); the composite's summary
/// uses `root`'s message. With fewer than two failures returns `None` and
/// `root` is left as it was.
pub fn build_with_root<I>(root: &RootFailure, failures: I) -> Option<Failure>
where
    I: IntoIterator,
    I::Item: Into<Failure>,
{
    match build(root.message(), failures)? {
        composite @ Failure::Composite(_) => Some(root.clone().with_cause(composite).into()),
        _ => None,
    }
}

/// Aggregate `failures` and return the result as an error, if there is one.
///
/// # Errors
/// Returns exactly what [`build`] would produce whenever it produces anything.
pub fn raise_if_any<I>(message: Option<&str>, failures: I) -> Result<(), Failure>
where
    I: IntoIterator,
    I::Item: Into<Failure>,
{
    raise(build(message, failures))
}

/// Aggregate `failures` under `root` and return the result as an error, if
/// there is one.
///
/// # Errors
/// Returns exactly what [`build_with_root`] would produce whenever it produces
/// anything.
pub fn raise_with_root_if_any<I>(root: &RootFailure, failures: I) -> Result<(), Failure>
where
    I: IntoIterator,
    I::Item: Into<Failure>,
{
    raise(build_with_root(root, failures))
}

fn raise(failure: Option<Failure>) -> Result<(), Failure> {
    match failure {
        Some(failure) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(failure = %failure, "raising failure");
            Err(failure)
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(failure: &Failure) -> Vec<String> {
        failure.chain().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_input_builds_nothing() {
        assert!(build(Some("m"), Vec::<Failure>::new()).is_none());
        assert!(build(None, std::iter::empty::<Failure>()).is_none());
        let absent: Option<Vec<Failure>> = None;
        assert!(build(Some("m"), absent.into_iter().flatten()).is_none());
    }

    #[test]
    fn accepts_root_failures_directly() {
        let out = build(None, [RootFailure::new("a"), RootFailure::new("b")])
            .expect("two failures aggregate");
        assert_eq!(messages(&out), vec![" - Multi[2]...", "...[1/2] a", "b"]);
    }

    #[test]
    fn two_failures_chain_through_one_link() {
        let out = build(Some("sync"), [Failure::new("a"), Failure::new("b")])
            .expect("two failures aggregate");
        let composite = out.as_composite().expect("composite");
        assert_eq!(composite.summary(), "sync - Multi[2]...");
        assert_eq!(messages(&out), vec!["sync - Multi[2]...", "...[1/2] a", "b"]);
    }

    #[test]
    fn with_root_uses_root_message_for_summary() {
        let root = RootFailure::new("deploy failed");
        let out = build_with_root(&root, [Failure::new("a"), Failure::new("b")])
            .expect("composite under root");
        assert_eq!(
            messages(&out),
            vec!["deploy failed", "deploy failed - Multi[2]...", "...[1/2] a", "b"]
        );
        assert!(root.cause().is_none());
    }

    #[test]
    fn with_root_single_failure_is_not_raised() {
        let root = RootFailure::new("deploy failed");
        assert!(build_with_root(&root, [Failure::new("a")]).is_none());
        assert!(raise_with_root_if_any(&root, [Failure::new("a")]).is_ok());
    }

    #[test]
    fn raise_if_any_propagates_single_failure() {
        let err = raise_if_any(Some("ignored"), [Failure::new("only")])
            .expect_err("one failure is raised");
        assert_eq!(err.to_string(), "only");
        assert!(raise_if_any(None, Vec::<Failure>::new()).is_ok());
    }
}
