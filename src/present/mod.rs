//! View-side derivations from a trace position.

/// Pseudocode highlighting, step explanations and the variable inspector.
pub mod annotate;
/// Progress metrics, path highlighting and the mini-map layout.
pub mod progress;
/// Cumulative visited/completed/backtracked state.
pub mod reducer;
