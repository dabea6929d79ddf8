use std::{ops::Deref, sync::Arc};

use crate::{
    engine::tree::{DecisionTree, build_tree},
    foundation::core::{InputSequence, NodeId},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Select,
    Backtrack,
    Complete,
}

impl StepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Backtrack => "backtrack",
            Self::Complete => "complete",
        }
    }
}

/// One atomic event of the recorded search.
///
/// `current_path` and `available` always partition the input: together they hold every
/// input value exactly once. `available` keeps input order regardless of the order in
/// which values were handed back.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Step {
    pub kind: StepKind,
    pub node_id: NodeId,
    pub current_path: Vec<i32>,
    pub available: Vec<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<i32>>, // Complete only
}

impl Step {
    pub fn is_select(&self) -> bool {
        self.kind == StepKind::Select
    }

    pub fn is_backtrack(&self) -> bool {
        self.kind == StepKind::Backtrack
    }

    pub fn is_complete(&self) -> bool {
        self.kind == StepKind::Complete
    }

    /// Recursion depth at this instant.
    pub fn depth(&self) -> usize {
        self.current_path.len()
    }
}

/// Immutable, randomly indexable trace shared by every consumer.
///
/// Cloning only bumps a reference count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepSequence(Arc<[Step]>);

impl StepSequence {
    pub fn as_slice(&self) -> &[Step] {
        &self.0
    }

    pub fn counts(&self) -> StepCounts {
        let mut counts = StepCounts::default();
        for step in self.iter() {
            match step.kind {
                StepKind::Select => counts.select += 1,
                StepKind::Backtrack => counts.backtrack += 1,
                StepKind::Complete => counts.complete += 1,
            }
        }
        counts
    }
}

impl Deref for StepSequence {
    type Target = [Step];

    fn deref(&self) -> &[Step] {
        &self.0
    }
}

impl From<Vec<Step>> for StepSequence {
    fn from(steps: Vec<Step>) -> Self {
        Self(steps.into())
    }
}

impl serde::Serialize for StepSequence {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(self.as_slice(), s)
    }
}

impl<'de> serde::Deserialize<'de> for StepSequence {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        <Vec<Step> as serde::Deserialize>::deserialize(d).map(Self::from)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct StepCounts {
    pub select: usize,
    pub backtrack: usize,
    pub complete: usize,
}

impl StepCounts {
    pub fn total(self) -> usize {
        self.select + self.backtrack + self.complete
    }
}

/// Record the full backtracking run over `nums` as a flat step list.
///
/// `nums` must hold 1..=6 distinct values. The output depends only on `nums`.
pub fn generate_steps(nums: &[i32]) -> StepSequence {
    let mut rec = Recorder {
        nums,
        cursor: Vec::with_capacity(nums.len()),
        steps: Vec::new(),
    };
    let all: Vec<usize> = (0..nums.len()).collect();
    rec.explore(&[], &all);
    StepSequence::from(rec.steps)
}

/// Emits steps while tracking the visible path as input positions.
///
/// `cursor` is the path shown by the most recently emitted step. After the last
/// candidate of a level returns, the cursor is left where the recursion ended and the
/// caller's own backtrack run walks it back one value at a time.
struct Recorder<'a> {
    nums: &'a [i32],
    cursor: Vec<usize>,
    steps: Vec<Step>,
}

impl Recorder<'_> {
    fn explore(&mut self, frame: &[usize], candidates: &[usize]) {
        if candidates.is_empty() {
            let path = self.values(&self.cursor);
            self.steps.push(Step {
                kind: StepKind::Complete,
                node_id: NodeId::from_path(&path),
                current_path: path.clone(),
                available: Vec::new(),
                result: Some(path),
            });
            return;
        }

        for (i, &pos) in candidates.iter().enumerate() {
            debug_assert_eq!(self.cursor.as_slice(), frame);
            let mut next_frame = Vec::with_capacity(frame.len() + 1);
            next_frame.extend_from_slice(frame);
            next_frame.push(pos);
            let next_candidates: Vec<usize> = candidates
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, &p)| p)
                .collect();

            self.cursor.push(pos);
            let path = self.values(&self.cursor);
            self.steps.push(Step {
                kind: StepKind::Select,
                node_id: NodeId::from_path(&path),
                current_path: path,
                available: self.values(&next_candidates),
                result: None,
            });

            self.explore(&next_frame, &next_candidates);

            if i + 1 < candidates.len() {
                self.unwind_to(frame.len());
            }
        }
    }

    fn unwind_to(&mut self, len: usize) {
        while self.cursor.len() > len {
            self.cursor.pop();
            let path = self.values(&self.cursor);
            let available = (0..self.nums.len())
                .filter(|p| !self.cursor.contains(p))
                .map(|p| self.nums[p])
                .collect();
            self.steps.push(Step {
                kind: StepKind::Backtrack,
                node_id: NodeId::from_path(&path),
                current_path: path,
                available,
                result: None,
            });
        }
    }

    fn values(&self, positions: &[usize]) -> Vec<i32> {
        positions.iter().map(|&p| self.nums[p]).collect()
    }
}

/// Tree and trace for one input submission.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Trace {
    pub input: InputSequence,
    pub tree: Arc<DecisionTree>,
    pub steps: StepSequence,
}

impl Trace {
    #[tracing::instrument(skip_all, fields(n = input.len()))]
    pub fn generate(input: &InputSequence) -> Self {
        let tree = build_tree(input.as_slice());
        let steps = generate_steps(input.as_slice());
        let counts = steps.counts();
        tracing::debug!(
            nodes = tree.node_count(),
            select = counts.select,
            backtrack = counts.backtrack,
            complete = counts.complete,
            "generated trace"
        );
        Self {
            input: input.clone(),
            tree: Arc::new(tree),
            steps,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/trace.rs"]
mod tests;
