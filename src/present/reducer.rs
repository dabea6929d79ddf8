use std::collections::BTreeSet;

use crate::{
    engine::trace::{Step, StepKind},
    foundation::core::NodeId,
};

/// Cumulative view state after replaying a trace prefix.
///
/// Always a function of (steps, position): [`PresentationState::replay`] is the fold of
/// [`PresentationState::apply`], so the incremental and from-scratch paths cannot drift.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PresentationState {
    pub visited: BTreeSet<NodeId>,
    pub completed: BTreeSet<NodeId>,
    pub backtracked: BTreeSet<NodeId>,
    pub results: Vec<Vec<i32>>, // trace order
    pub current_node: Option<NodeId>,
    pub current_kind: Option<StepKind>,
    pub current_path: Vec<i32>,
    /// Value most recently chosen (Select) or handed back (Backtrack).
    pub last_selected: Option<i32>,
}

impl PresentationState {
    /// State after steps `0..=position`; empty for `None`.
    ///
    /// Positions past the end replay the whole trace.
    pub fn replay(steps: &[Step], position: Option<usize>) -> Self {
        let mut state = Self::default();
        let Some(position) = position else {
            return state;
        };
        for step in steps.iter().take(position.saturating_add(1)) {
            state.apply(step);
        }
        state
    }

    /// Fold one more step into the state.
    pub fn apply(&mut self, step: &Step) {
        match step.kind {
            StepKind::Select => {
                self.visited.insert(step.node_id.clone());
                self.last_selected = step.current_path.last().copied();
            }
            StepKind::Backtrack => {
                self.backtracked.insert(step.node_id.clone());
                self.last_selected = self.current_path.last().copied();
            }
            StepKind::Complete => {
                self.completed.insert(step.node_id.clone());
                if let Some(result) = &step.result {
                    self.results.push(result.clone());
                }
            }
        }
        self.current_node = Some(step.node_id.clone());
        self.current_kind = Some(step.kind);
        self.current_path.clone_from(&step.current_path);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/reducer.rs"]
mod tests;
