//! Core text processing for revline.
//!
//! Two independent, leaf-level components, both pure functions over
//! immutable string input:
//!
//! - [`annotations`] scans free-form review prose for source-line
//!   references and produces a deduplicated, sorted set of flagged lines
//!   plus a line-to-comment mapping.
//! - [`markup`] converts a constrained markdown dialect into structural
//!   markup through a fixed sequence of substitution passes.
//!
//! This is a pure library: no I/O, no shared state, no async. The `revline`
//! binary owns all UI state and composes these functions; each call here is
//! independent and reentrant. Degenerate input (no references, empty text)
//! is a successful empty result, never an error.

pub mod annotations;
pub mod markup;

pub use annotations::{extract_annotations, AnnotationResult};
pub use markup::render_markdown;
