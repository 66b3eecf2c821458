//! Frame fingerprints over evaluated graphs.
//!
//! Two frames with identical evaluated graphs render to identical pixels,
//! so the encode loop can reuse the previous frame's buffer. The fixed
//! waits in the proof storyboards make this the common case.

use crate::eval::EvaluatedGraph;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameFingerprint {
    pub hi: u64,
    pub lo: u64,
}

pub fn fingerprint_eval(eval: &EvaluatedGraph) -> FrameFingerprint {
    let mut a = Fnv1a64::new(0xcbf29ce484222325);
    let mut b = Fnv1a64::new(0x9ae16a3b2f90404f);

    write_u64_pair(&mut a, &mut b, eval.nodes.len() as u64);
    for node in &eval.nodes {
        write_str_pair(&mut a, &mut b, &node.clip_id);
        write_str_pair(&mut a, &mut b, &node.asset);
        write_u64_pair(&mut a, &mut b, node.z as u64);
        for c in node.transform.as_coeffs() {
            write_u64_pair(&mut a, &mut b, c.to_bits());
        }
        write_u64_pair(&mut a, &mut b, node.opacity.to_bits());
    }

    FrameFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn write_u64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u64) {
    a.write_u64(v);
    b.write_u64(v);
}

fn write_str_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, s: &str) {
    write_u64_pair(a, b, s.len() as u64);
    a.write_bytes(s.as_bytes());
    b.write_bytes(s.as_bytes());
}

#[derive(Clone, Copy)]
struct Fnv1a64(u64);

impl Fnv1a64 {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        self.0 = h;
    }

    fn finish(self) -> u64 {
        self.0
    }
}
