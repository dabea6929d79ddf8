use xxhash_rust::xxh3::Xxh3;

use crate::engine::trace::{Step, StepKind};

const XXH3_SEED: u64 = 0x5a17_e3c0_9b24_d1f7;

/// Stable 128-bit digest of a step trace.
///
/// Two traces with equal fingerprints are treated as byte-for-byte identical replays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TraceFingerprint {
    pub hi: u64,
    pub lo: u64,
}

impl TraceFingerprint {
    pub fn to_hex(self) -> String {
        format!("{:016x}{:016x}", self.hi, self.lo)
    }
}

pub fn fingerprint_steps(steps: &[Step]) -> TraceFingerprint {
    let mut h = StableHasher::new();
    h.write_u32(steps.len() as u32);
    for step in steps {
        write_step(&mut h, step);
    }
    h.finish()
}

fn write_step(h: &mut StableHasher, step: &Step) {
    h.write_u8(match step.kind {
        StepKind::Select => 0,
        StepKind::Backtrack => 1,
        StepKind::Complete => 2,
    });
    h.write_str(step.node_id.as_str());
    h.write_values(&step.current_path);
    h.write_values(&step.available);
    match &step.result {
        Some(r) => {
            h.write_u8(1);
            h.write_values(r);
        }
        None => h.write_u8(0),
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_i32(&mut self, v: i32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u32(s.len() as u32);
        self.write_bytes(s.as_bytes());
    }

    fn write_values(&mut self, vs: &[i32]) {
        self.write_u32(vs.len() as u32);
        for &v in vs {
            self.write_i32(v);
        }
    }

    fn finish(self) -> TraceFingerprint {
        let v = self.inner.digest128();
        TraceFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/fingerprint.rs"]
mod tests;
