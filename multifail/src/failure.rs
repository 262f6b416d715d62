//! Failure variants accepted and produced by the aggregator.

use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::chain::Chain;

type DynError = dyn StdError + Send + Sync + 'static;

/// A failure value.
///
/// Callers hand the aggregator [`RootFailure`]s (or anything that converts into
/// a `Failure`); the aggregator answers with either one of those unchanged or a
/// [`CompositeFailure`] whose `source()` chain runs through [`LinkFailure`]s.
/// Every causal reference is fixed at construction time.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum Failure {
    /// A caller-supplied failure, optionally wrapping a foreign error value.
    #[error(transparent)]
    Root(RootFailure),

    /// Aggregation of two or more failures.
    #[error(transparent)]
    Composite(CompositeFailure),

    /// Position-tagged message carrier inside a composite's chain.
    #[error(transparent)]
    Link(LinkFailure),
}

impl Failure {
    /// Helper: build a root failure carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self::Root(RootFailure::new(message))
    }

    /// Helper: wrap a foreign error as a root failure.
    pub fn from_error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Root(RootFailure::from_error(err))
    }

    /// Human-readable message, if this failure has one.
    ///
    /// Composites and links always do; roots may not.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Root(root) => root.message(),
            Self::Composite(composite) => Some(composite.summary()),
            Self::Link(link) => Some(link.message()),
        }
    }

    /// The causal predecessor, when it is itself a `Failure`.
    ///
    /// Foreign `source()` chains behind [`RootFailure::from_error`] are only
    /// reachable through [`Failure::chain`].
    #[must_use]
    pub fn cause(&self) -> Option<&Self> {
        match self {
            Self::Root(root) => root.cause(),
            Self::Composite(composite) => Some(composite.head()),
            Self::Link(link) => Some(link.next()),
        }
    }

    /// Execution-site context captured when the failure was created.
    ///
    /// Always `None` for links.
    #[must_use]
    pub fn backtrace(&self) -> Option<&Backtrace> {
        match self {
            Self::Root(root) => Some(root.backtrace()),
            Self::Composite(composite) => Some(composite.backtrace()),
            Self::Link(_) => None,
        }
    }

    /// True for synthetic nodes that only exist to carry a message.
    #[must_use]
    pub const fn is_message_carrier(&self) -> bool {
        matches!(self, Self::Link(_))
    }

    /// Borrow the composite payload, if this is an aggregation.
    #[must_use]
    pub const fn as_composite(&self) -> Option<&CompositeFailure> {
        match self {
            Self::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    /// Borrow the root payload, if this is a caller-supplied failure.
    #[must_use]
    pub const fn as_root(&self) -> Option<&RootFailure> {
        match self {
            Self::Root(root) => Some(root),
            _ => None,
        }
    }

    /// Borrow the link payload, if this is a message carrier.
    #[must_use]
    pub const fn as_link(&self) -> Option<&LinkFailure> {
        match self {
            Self::Link(link) => Some(link),
            _ => None,
        }
    }

    /// Recover the foreign error wrapped by a root failure.
    #[must_use]
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.as_root().and_then(RootFailure::downcast_ref::<E>)
    }

    /// Walk this failure and every `source()` behind it.
    #[must_use]
    pub fn chain(&self) -> Chain<'_> {
        Chain::new(self)
    }
}

impl From<RootFailure> for Failure {
    fn from(root: RootFailure) -> Self {
        Self::Root(root)
    }
}

impl From<CompositeFailure> for Failure {
    fn from(composite: CompositeFailure) -> Self {
        Self::Composite(composite)
    }
}

/// A failure raised by caller code.
///
/// Either a plain message (possibly absent) or a wrapped foreign error, with an
/// optional pre-existing cause.
#[derive(Clone)]
pub struct RootFailure {
    message: Option<String>,
    error: Option<Arc<DynError>>,
    cause: Option<Arc<Failure>>,
    backtrace: Arc<Backtrace>,
}

impl RootFailure {
    /// Create a failure carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_parts(Some(message.into()), None)
    }

    /// Create a failure that has no message.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::with_parts(None, None)
    }

    /// Wrap a foreign error; its `Display` output becomes the message.
    pub fn from_error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::with_parts(Some(err.to_string()), Some(Arc::new(err)))
    }

    fn with_parts(message: Option<String>, error: Option<Arc<DynError>>) -> Self {
        Self {
            message,
            error,
            cause: None,
            backtrace: Arc::new(Backtrace::capture()),
        }
    }

    /// Attach a causal predecessor, replacing any previous one.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<Failure>) -> Self {
        self.cause = Some(Arc::new(cause.into()));
        self
    }

    /// Message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Explicitly attached causal predecessor.
    #[must_use]
    pub fn cause(&self) -> Option<&Failure> {
        self.cause.as_deref()
    }

    /// Backtrace captured at construction.
    ///
    /// Only populated when `RUST_BACKTRACE` or `RUST_LIB_BACKTRACE` enable it.
    #[must_use]
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// Recover the wrapped foreign error by type.
    #[must_use]
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        let err: &(dyn StdError + 'static) = self.error.as_deref()?;
        err.downcast_ref::<E>()
    }
}

impl fmt::Debug for RootFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootFailure")
            .field("message", &self.message)
            .field("error", &self.error)
            .field("cause", &self.cause)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for RootFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message().unwrap_or_default())
    }
}

impl StdError for RootFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match (&self.cause, &self.error) {
            (Some(cause), _) => Some(&**cause as &(dyn StdError + 'static)),
            (None, Some(err)) => err.source(),
            (None, None) => None,
        }
    }
}

/// Aggregation of two or more failures.
///
/// `causes()` keeps the inputs in order for programmatic inspection; `source()`
/// walks `Link(1) → … → Link(k-1) → causes[k-1] → causes[k-1]'s own chain`, so
/// generic reporters that only follow causes still print every input.
#[derive(Clone)]
pub struct CompositeFailure {
    summary: String,
    causes: Vec<Arc<Failure>>,
    head: Arc<Failure>,
    backtrace: Arc<Backtrace>,
}

impl CompositeFailure {
    /// Assemble the composite for `linked ++ [last]`.
    ///
    /// Links are built back to front so each one can own its successor.
    pub(crate) fn assemble(
        message: Option<&str>,
        linked: Vec<Arc<Failure>>,
        last: Arc<Failure>,
    ) -> Self {
        let total = linked.len() + 1;
        let summary = format!("{} - Multi[{total}]...", message.unwrap_or_default());

        let head = linked
            .iter()
            .enumerate()
            .rev()
            .fold(Arc::clone(&last), |next, (i, wrapped)| {
                Arc::new(Failure::Link(LinkFailure::new(
                    i + 1,
                    total,
                    Arc::clone(wrapped),
                    next,
                )))
            });

        let mut causes = linked;
        causes.push(last);

        Self {
            summary,
            causes,
            head,
            backtrace: Arc::new(Backtrace::capture()),
        }
    }

    /// Summary message: `"<message> - Multi[<count>]..."`.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// The aggregated failures, in input order.
    #[must_use]
    pub fn causes(&self) -> &[Arc<Failure>] {
        &self.causes
    }

    /// Number of aggregated failures; always at least two.
    #[must_use]
    pub fn len(&self) -> usize {
        self.causes.len()
    }

    /// Always false; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.causes.is_empty()
    }

    /// Backtrace captured where the aggregation happened.
    #[must_use]
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    pub(crate) fn head(&self) -> &Failure {
        &self.head
    }
}

impl fmt::Debug for CompositeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeFailure")
            .field("summary", &self.summary)
            .field("causes", &self.causes)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for CompositeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary)
    }
}

impl StdError for CompositeFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.head as &(dyn StdError + 'static))
    }
}

/// Synthetic chain node surfacing one aggregated failure's message.
///
/// Carries no backtrace of its own.
#[derive(Clone)]
pub struct LinkFailure {
    message: String,
    index: usize,
    total: usize,
    wrapped: Arc<Failure>,
    next: Arc<Failure>,
}

impl LinkFailure {
    fn new(index: usize, total: usize, wrapped: Arc<Failure>, next: Arc<Failure>) -> Self {
        let message = match wrapped.message() {
            Some(text) => format!("...[{index}/{total}] {text}"),
            None => format!("...[{index}/{total}]"),
        };
        Self {
            message,
            index,
            total,
            wrapped,
            next,
        }
    }

    /// Position-tagged message: `"...[<index>/<total>] <wrapped message>"`.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 1-based position of the wrapped failure among the composite's causes.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of causes in the owning composite.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// The original failure this link surfaces.
    #[must_use]
    pub fn wrapped(&self) -> &Failure {
        &self.wrapped
    }

    /// Always true: links never hold execution-site context.
    #[must_use]
    pub const fn is_message_carrier(&self) -> bool {
        true
    }

    pub(crate) fn next(&self) -> &Failure {
        &self.next
    }
}

impl fmt::Debug for LinkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkFailure")
            .field("message", &self.message)
            .field("wrapped", &self.wrapped)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for LinkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for LinkFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.next as &(dyn StdError + 'static))
    }
}
