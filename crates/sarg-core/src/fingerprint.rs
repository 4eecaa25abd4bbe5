//! Stable SHA-256 digests of set expressions and evaluated sequences, for
//! plan-digest comparison. Logically identical inputs hash identically.

use crate::{
    endpoint::{Coordinate, Endpoint, Strictness},
    interval::{Interval, IntervalExpr},
    sequence::IntervalSequence,
    set::SetExpr,
};
use sha2::{Digest, Sha256};
use std::fmt;

///
/// SargFingerprint
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SargFingerprint([u8; 32]);

impl SargFingerprint {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    fn finish(hasher: Sha256) -> Self {
        let digest = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);

        Self(out)
    }
}

impl fmt::Display for SargFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl IntervalSequence {
    #[must_use]
    pub fn fingerprint(&self) -> SargFingerprint {
        let mut hasher = Sha256::new();
        hasher.update(b"sargseq:v1");
        hash_sequence(&mut hasher, self);

        SargFingerprint::finish(hasher)
    }
}

impl SetExpr {
    #[must_use]
    pub fn fingerprint(&self) -> SargFingerprint {
        let mut hasher = Sha256::new();
        hasher.update(b"sargexpr:v1");
        hash_set_expr(&mut hasher, self);

        SargFingerprint::finish(hasher)
    }
}

fn hash_sequence(hasher: &mut Sha256, seq: &IntervalSequence) {
    write_tag(hasher, 0x10);
    write_len_u32(hasher, seq.len());
    for interval in seq {
        hash_interval(hasher, interval);
    }
}

fn hash_set_expr(hasher: &mut Sha256, expr: &SetExpr) {
    match expr {
        SetExpr::Leaf(leaf) => hash_interval_expr(hasher, leaf),
        SetExpr::Set(set) => {
            write_tag(hasher, 0x20);
            write_str(hasher, &set.op().to_string());
            write_len_u32(hasher, set.children().len());
            for child in set.children() {
                hash_set_expr(hasher, child);
            }
        }
    }
}

fn hash_interval_expr(hasher: &mut Sha256, expr: &IntervalExpr) {
    write_tag(hasher, 0x21);
    write_str(hasher, &expr.null_semantics().to_string());
    hash_endpoint(hasher, expr.lower());
    hash_endpoint(hasher, expr.upper());
}

fn hash_interval(hasher: &mut Sha256, interval: &Interval) {
    write_tag(hasher, 0x11);
    hash_endpoint(hasher, interval.lower());
    hash_endpoint(hasher, interval.upper());
}

fn hash_endpoint(hasher: &mut Sha256, endpoint: &Endpoint) {
    match endpoint.coordinate() {
        None if endpoint.infinitude() < 0 => write_tag(hasher, 0x30),
        None => write_tag(hasher, 0x31),
        Some(coordinate) => {
            write_tag(hasher, 0x32);
            write_tag(
                hasher,
                match endpoint.strictness() {
                    Strictness::Open => 0,
                    Strictness::Closed => 1,
                },
            );
            hash_coordinate(hasher, coordinate);
        }
    }
}

// Coordinates are already rounded to their domain scale, so the rendered
// literal is canonical within one domain.
fn hash_coordinate(hasher: &mut Sha256, coordinate: &Coordinate) {
    match coordinate {
        Coordinate::Literal(value) => {
            write_tag(hasher, 0x40);
            write_str(hasher, &value.to_string());
        }
        Coordinate::Param(param) => {
            write_tag(hasher, 0x41);
            write_len_u32(hasher, param.index);
        }
    }
}

fn write_str(hasher: &mut Sha256, value: &str) {
    write_len_u32(hasher, value.len());
    hasher.update(value.as_bytes());
}

/// Encode a platform-sized length as u32 with deterministic saturation.
fn write_len_u32(hasher: &mut Sha256, len: usize) {
    let len = u32::try_from(len).unwrap_or(u32::MAX);
    hasher.update(len.to_be_bytes());
}

fn write_tag(hasher: &mut Sha256, tag: u8) {
    hasher.update([tag]);
}

///
/// TESTS
///
