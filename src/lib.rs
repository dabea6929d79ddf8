//! permtrace records a permutation backtracking search as a flat, replayable trace.
//!
//! Given up to six distinct integers, the crate builds the full decision tree of partial
//! selections and the exact sequence of select, complete and backtrack events the
//! classic recursive algorithm performs. Playback and every view-side metric are then
//! derived from `(trace, position)` alone:
//!
//! 1. **Validate**: `Vec<i32> -> InputSequence`
//! 2. **Generate**: `InputSequence -> Trace` (tree + step sequence), see [`Trace::generate`]
//! 3. **Play**: [`PlaybackController`] moves a position through the steps
//! 4. **Present**: [`PresentationState`], [`ProgressInfo`] and the annotations render a position
//!
//! Generation is deterministic: the same input always yields the same steps and the same
//! [`TraceFingerprint`]. Node identifiers are content-addressed from the root-to-node path,
//! so the tree and the trace agree on identity without sharing state.
//!
//! [`Session`] bundles the above for hosts that just want "submit input, drive playback,
//! read a snapshot".
#![forbid(unsafe_code)]

mod engine;
mod foundation;
mod playback;
mod present;
mod session;

pub use crate::foundation::core::{
    InputSequence, MAX_INPUT_LEN, MAX_VALUE, MIN_VALUE, NodeId, factorial,
};
pub use crate::foundation::error::{PermtraceError, PermtraceResult};

pub use crate::engine::fingerprint::{TraceFingerprint, fingerprint_steps};
pub use crate::engine::trace::{
    Step, StepCounts, StepKind, StepSequence, Trace, generate_steps,
};
pub use crate::engine::tree::{DecisionTree, PreOrder, TreeNode, build_tree};

pub use crate::playback::controller::{
    DEFAULT_SPEED_MS, MAX_SPEED_MS, MIN_SPEED_MS, PlaybackController, PlaybackOpts,
    PlaybackState, clamp_speed,
};

pub use crate::present::annotate::{
    CallFrame, Explanation, PSEUDOCODE, PseudocodeLine, StepContext, VariableSnapshot,
    call_stack, format_list, highlight_lines, node_annotation,
};
pub use crate::present::progress::{
    MiniMapNode, MiniMapState, ProgressInfo, calculate_progress, dimmed_nodes, highlight_path,
    is_leaf, mini_map, result_path,
};
pub use crate::present::reducer::PresentationState;

pub use crate::session::{Session, SessionConfig, Snapshot};
