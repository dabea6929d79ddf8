use std::fmt::{self, Write as _};

use crate::foundation::error::{PermtraceError, PermtraceResult};

/// Maximum number of values in an [`InputSequence`].
pub const MAX_INPUT_LEN: usize = 6;
/// Smallest accepted input value.
pub const MIN_VALUE: i32 = -10;
/// Largest accepted input value.
pub const MAX_VALUE: i32 = 10;

const ROOT_ID: &str = "node-root";

/// Content-addressed identifier of a decision-tree node.
///
/// Derived purely from the root-to-node value path, so a tree built in one pass and a
/// trace recorded in another agree on identity without sharing any counter.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Id of the root (empty path).
    pub fn root() -> Self {
        Self(ROOT_ID.to_owned())
    }

    /// Encode a path as `node-v1-v2-...`.
    ///
    /// Each value is an optional `-` sign followed by digits, so splitting on the
    /// separator is unambiguous and distinct paths never share an id.
    pub fn from_path(path: &[i32]) -> Self {
        if path.is_empty() {
            return Self::root();
        }
        let mut s = String::with_capacity(5 + path.len() * 3);
        s.push_str("node");
        for v in path {
            // Writing into a String cannot fail.
            let _ = write!(s, "-{v}");
        }
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_ID
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated run input: 1..=6 distinct integers in `[-10, 10]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<i32>", into = "Vec<i32>")]
pub struct InputSequence(Vec<i32>);

impl InputSequence {
    pub fn new(values: Vec<i32>) -> PermtraceResult<Self> {
        if values.is_empty() {
            return Err(PermtraceError::validation(
                "input must contain at least one number",
            ));
        }
        if let Some(v) = values.iter().find(|v| !(MIN_VALUE..=MAX_VALUE).contains(*v)) {
            return Err(PermtraceError::validation(format!(
                "number {v} is outside [{MIN_VALUE}, {MAX_VALUE}]"
            )));
        }
        if values.len() > MAX_INPUT_LEN {
            return Err(PermtraceError::validation(format!(
                "at most {MAX_INPUT_LEN} numbers are supported (got {})",
                values.len()
            )));
        }
        for (i, v) in values.iter().enumerate() {
            if values[..i].contains(v) {
                return Err(PermtraceError::validation(format!(
                    "numbers must be distinct ({v} repeats)"
                )));
            }
        }
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of permutations, `n!`.
    pub fn permutation_count(&self) -> u64 {
        factorial(self.0.len())
    }
}

impl TryFrom<Vec<i32>> for InputSequence {
    type Error = PermtraceError;

    fn try_from(values: Vec<i32>) -> PermtraceResult<Self> {
        Self::new(values)
    }
}

impl From<InputSequence> for Vec<i32> {
    fn from(input: InputSequence) -> Self {
        input.0
    }
}

impl AsRef<[i32]> for InputSequence {
    fn as_ref(&self) -> &[i32] {
        &self.0
    }
}

pub fn factorial(n: usize) -> u64 {
    (1..=n as u64).product()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
