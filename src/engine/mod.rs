//! Deterministic generation: the decision tree, the step trace and its fingerprint.
//!
//! Both the tree and the trace are pure functions of the input and are built once per
//! submission.

pub mod fingerprint;
pub mod trace;
pub mod tree;
