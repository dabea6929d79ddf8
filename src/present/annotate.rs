//! Text and source-line annotations for the current step.
//!
//! These feed the code view, the call-stack/variable inspector and the explanation
//! panel. They only read steps; none of them influence playback.

use crate::engine::trace::{Step, StepKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PseudocodeLine {
    pub line: u32,
    pub code: &'static str,
    pub indent: u8,
}

const fn line(line: u32, indent: u8, code: &'static str) -> PseudocodeLine {
    PseudocodeLine { line, code, indent }
}

/// The algorithm as shown in the code panel. Line numbers are 1-based.
pub const PSEUDOCODE: [PseudocodeLine; 13] = [
    line(1, 0, "function permute(nums):"),
    line(2, 1, "result = []"),
    line(3, 1, "backtrack([], nums)"),
    line(4, 1, "return result"),
    line(5, 0, ""),
    line(6, 0, "function backtrack(path, remaining):"),
    line(7, 1, "if remaining is empty:"),
    line(8, 2, "result.add(path)"),
    line(9, 2, "return"),
    line(10, 1, "for num in remaining:"),
    line(11, 2, "path.add(num)"),
    line(12, 2, "backtrack(path, remaining - num)"),
    line(13, 2, "path.remove(num)"),
];

/// Pseudocode lines to highlight for a step kind; nothing before the first step.
pub fn highlight_lines(kind: Option<StepKind>) -> &'static [u32] {
    match kind {
        Some(StepKind::Select) => &[10, 11, 12],
        Some(StepKind::Backtrack) => &[13],
        Some(StepKind::Complete) => &[7, 8, 9],
        None => &[],
    }
}

/// Short label drawn next to the current tree node.
pub fn node_annotation(kind: Option<StepKind>) -> &'static str {
    match kind {
        Some(StepKind::Select) => "select",
        Some(StepKind::Backtrack) => "undo",
        Some(StepKind::Complete) => "found!",
        None => "visiting",
    }
}

/// What changed between the previous step and this one.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StepContext {
    pub kind: StepKind,
    pub current_path: Vec<i32>,
    pub available: Vec<i32>,
    /// Value pushed (Select) or popped (Backtrack); `None` for Complete.
    pub selected: Option<i32>,
    /// Other values still open at this level.
    pub alternatives: Vec<i32>,
}

impl StepContext {
    /// `previous` is `None` for the first step, in which case the run starts from an
    /// empty path with every input value available.
    pub fn new(step: &Step, previous: Option<&Step>, input: &[i32]) -> Self {
        let (prev_path, prev_available) = match previous {
            Some(p) => (p.current_path.as_slice(), p.available.as_slice()),
            None => (&[][..], input),
        };

        let (selected, alternatives) = match step.kind {
            StepKind::Select => {
                let selected = step.current_path.last().copied();
                let alternatives = prev_available
                    .iter()
                    .copied()
                    .filter(|v| Some(*v) != selected)
                    .collect();
                (selected, alternatives)
            }
            StepKind::Backtrack => {
                let selected = prev_path.last().copied();
                let alternatives = step
                    .available
                    .iter()
                    .copied()
                    .filter(|v| Some(*v) != selected)
                    .collect();
                (selected, alternatives)
            }
            StepKind::Complete => (None, Vec::new()),
        };

        Self {
            kind: step.kind,
            current_path: step.current_path.clone(),
            available: step.available.clone(),
            selected,
            alternatives,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Explanation {
    pub title: String,
    pub main: String,
    pub reason: String,
    pub next: String,
}

impl Explanation {
    /// Placeholder shown before playback starts.
    pub fn idle() -> Self {
        Self {
            title: "Ready".to_owned(),
            main: "Press play to start the walkthrough".to_owned(),
            reason: String::new(),
            next: String::new(),
        }
    }

    pub fn for_context(ctx: &StepContext) -> Self {
        let shown = |v: Option<i32>| v.map_or_else(|| "?".to_owned(), |v| v.to_string());
        match ctx.kind {
            StepKind::Select => Self {
                title: "Choose a number".to_owned(),
                main: format!(
                    "Place {} at position {}",
                    shown(ctx.selected),
                    ctx.current_path.len()
                ),
                reason: format!(
                    "Candidates are tried in input order; {} is next",
                    shown(ctx.selected)
                ),
                next: match ctx.alternatives.first() {
                    Some(alt) => format!("If this branch is exhausted, {alt} is tried here"),
                    None => "Keep going deeper".to_owned(),
                },
            },
            StepKind::Backtrack => Self {
                title: "Backtrack".to_owned(),
                main: format!(
                    "Undo the choice and return {} to the pool",
                    shown(ctx.selected)
                ),
                reason: "This branch is fully explored".to_owned(),
                next: if ctx.alternatives.is_empty() {
                    "Keep unwinding to the level above".to_owned()
                } else {
                    "Return to the level above and try another choice".to_owned()
                },
            },
            StepKind::Complete => Self {
                title: "Permutation found".to_owned(),
                main: format!("Found {}", format_list(&ctx.current_path)),
                reason: "Every number is used, so the path is a full permutation".to_owned(),
                next: "Record it, then backtrack to look for more".to_owned(),
            },
        }
    }
}

/// One recursion level of `backtrack(path, remaining)`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CallFrame {
    pub depth: usize,
    pub path: Vec<i32>,
    pub remaining: Vec<i32>,
}

/// Live frames for a step, outermost first.
///
/// Frame `d` sees the first `d` path values; its `remaining` is the input minus those.
pub fn call_stack(step: &Step, input: &[i32]) -> Vec<CallFrame> {
    (0..=step.current_path.len())
        .map(|depth| {
            let path = step.current_path[..depth].to_vec();
            let remaining = input
                .iter()
                .copied()
                .filter(|v| !path.contains(v))
                .collect();
            CallFrame {
                depth,
                path,
                remaining,
            }
        })
        .collect()
}

/// Variable panel contents for the innermost frame.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct VariableSnapshot {
    pub path: String,
    pub remaining: String,
    pub result_size: usize,
    pub depth: usize,
    pub used: Vec<bool>, // per input position
}

impl VariableSnapshot {
    pub fn new(
        current_path: &[i32],
        available: &[i32],
        result_size: usize,
        input: &[i32],
    ) -> Self {
        Self {
            path: format_list(current_path),
            remaining: format_list(available),
            result_size,
            depth: current_path.len(),
            used: input.iter().map(|v| current_path.contains(v)).collect(),
        }
    }
}

pub fn format_list(values: &[i32]) -> String {
    let inner: Vec<String> = values.iter().map(i32::to_string).collect();
    format!("[{}]", inner.join(", "))
}

#[cfg(test)]
#[path = "../../tests/unit/present/annotate.rs"]
mod tests;
