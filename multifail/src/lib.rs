//! multifail
//!
//! Collapse the failures of a batch of independent sub-operations into one
//! reportable error, without losing any of them.
//!
//! Overview
//! - [`build`] turns a sequence of failures into nothing, the lone failure
//!   itself, or a [`CompositeFailure`].
//! - [`build_with_root`] nests the composite under a caller-chosen
//!   [`RootFailure`].
//! - [`raise_if_any`] and [`raise_with_root_if_any`] do the same and hand the
//!   result back as `Err`, ready for `?`.
//!
//! Chain layout
//! A composite of `k` failures answers `source()` with a link per failure except
//! the last, then the last failure itself and whatever chain it already had:
//!
//! ```text
//! batch failed - Multi[3]...
//! ...[1/3] x
//! ...[2/3]
//! z
//! ```
//!
//! so reporters that only know how to print "caused by" still show every input.
//! The inputs stay available in order through [`CompositeFailure::causes`] and
//! each link's [`LinkFailure::wrapped`].
//!
//! Features
//! - `tracing`: emit `tracing` events when failures are aggregated or raised.
#![warn(missing_docs)]

mod aggregate;
/// `source()` iteration shared by every failure type.
pub mod chain;
mod failure;
mod report;

pub use aggregate::{build, build_with_root, raise_if_any, raise_with_root_if_any};
pub use chain::Chain;
pub use failure::{CompositeFailure, Failure, LinkFailure, RootFailure};
pub use report::{FailureKind, FailureReport};
