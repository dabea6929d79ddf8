use std::{path::Path, sync::Arc};

use anyhow::Context as _;

use crate::{
    engine::{
        fingerprint::{TraceFingerprint, fingerprint_steps},
        trace::{Step, Trace},
        tree::DecisionTree,
    },
    foundation::{
        core::{InputSequence, NodeId},
        error::PermtraceResult,
    },
    playback::controller::{PlaybackController, PlaybackOpts, PlaybackState},
    present::{
        annotate::{
            CallFrame, Explanation, StepContext, VariableSnapshot, call_stack, highlight_lines,
        },
        progress::{ProgressInfo, dimmed_nodes, highlight_path},
        reducer::PresentationState,
    },
};

/// JSON configuration accepted by hosts and the `permtrace` binary.
///
/// ```json
/// { "nums": [1, 2, 3], "playback": { "speed_ms": 300 } }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    pub nums: InputSequence,
    #[serde(default)]
    pub playback: PlaybackOpts,
}

impl SessionConfig {
    pub fn from_json_str(s: &str) -> PermtraceResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: &Path) -> PermtraceResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read session config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }
}

/// One submitted input with its trace and playback state.
///
/// Submitting a new input discards the previous tree, trace and position wholesale; no
/// state is carried across submissions.
#[derive(Debug)]
pub struct Session<'a> {
    trace: Trace,
    fingerprint: TraceFingerprint,
    controller: PlaybackController<'a>,
}

impl<'a> Session<'a> {
    #[tracing::instrument(skip_all, fields(n = input.len()))]
    pub fn new(input: InputSequence, opts: PlaybackOpts) -> Self {
        let trace = Trace::generate(&input);
        let fingerprint = fingerprint_steps(&trace.steps);
        let controller = PlaybackController::with_opts(trace.steps.clone(), opts);
        Self {
            trace,
            fingerprint,
            controller,
        }
    }

    pub fn from_config(config: SessionConfig) -> Self {
        Self::new(config.nums, config.playback)
    }

    /// Replace the input. Playback returns to `Idle`; speed and observer are kept.
    #[tracing::instrument(skip_all, fields(n = input.len()))]
    pub fn submit(&mut self, input: InputSequence) {
        let trace = Trace::generate(&input);
        self.fingerprint = fingerprint_steps(&trace.steps);
        self.controller.load(trace.steps.clone());
        self.trace = trace;
        tracing::info!(fingerprint = %self.fingerprint.to_hex(), "input submitted");
    }

    pub fn input(&self) -> &InputSequence {
        &self.trace.input
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn tree(&self) -> &Arc<DecisionTree> {
        &self.trace.tree
    }

    pub fn fingerprint(&self) -> TraceFingerprint {
        self.fingerprint
    }

    pub fn controller(&self) -> &PlaybackController<'a> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController<'a> {
        &mut self.controller
    }

    /// Everything a view needs at the current position.
    pub fn snapshot(&self) -> Snapshot {
        let steps = self.controller.steps();
        let position = self.controller.position();
        let input = self.trace.input.as_slice();
        let tree = Some(self.trace.tree.as_ref());

        let presentation = PresentationState::replay(steps, position);
        let progress = ProgressInfo::from_state(tree, &presentation, input.len());
        let current = presentation.current_node.as_ref();
        let step = self.controller.current_step().cloned();

        let (variables, stack, explanation) = match (&step, position) {
            (Some(step), Some(p)) => {
                let previous = p.checked_sub(1).and_then(|i| steps.get(i));
                let ctx = StepContext::new(step, previous, input);
                (
                    VariableSnapshot::new(
                        &step.current_path,
                        &step.available,
                        presentation.results.len(),
                        input,
                    ),
                    call_stack(step, input),
                    Explanation::for_context(&ctx),
                )
            }
            _ => (
                VariableSnapshot::new(&[], input, 0, input),
                Vec::new(),
                Explanation::idle(),
            ),
        };

        Snapshot {
            position: self.controller.position_index(),
            total_steps: steps.len(),
            state: self.controller.state(),
            highlight_path: highlight_path(tree, current),
            dimmed_count: dimmed_nodes(tree, current, &presentation.visited).len(),
            highlight_lines: highlight_lines(presentation.current_kind).to_vec(),
            step,
            progress,
            presentation,
            variables,
            call_stack: stack,
            explanation,
        }
    }
}

/// Serializable view of a [`Session`] at one position.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Snapshot {
    /// `-1` before the first step.
    pub position: i64,
    pub total_steps: usize,
    pub state: PlaybackState,
    pub step: Option<Step>,
    pub presentation: PresentationState,
    pub progress: ProgressInfo,
    pub highlight_path: Vec<NodeId>,
    pub dimmed_count: usize,
    pub highlight_lines: Vec<u32>,
    pub variables: VariableSnapshot,
    pub call_stack: Vec<CallFrame>,
    pub explanation: Explanation,
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
