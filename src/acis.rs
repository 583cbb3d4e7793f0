//! Embedded solid-geometry payload transform.
//!
//! Solid-modeler payloads (SAT text) are not stored verbatim: each byte
//! above the control range is mirrored around 159, and the stream is
//! packaged in fixed 4096-byte blocks. The transform is stateless and
//! byte-wise; block boundaries are pure packaging and never affect the
//! decoded content.
//!
//! Over the payload's 7-bit text domain the transform is its own inverse:
//! `159 - (159 - b) = b`, and bytes at or below 32 are fixed points.

/// Fixed payload block size in bytes.
pub const BLOCK_SIZE: usize = 4096;

/// A chunked, transformed solid-geometry payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SatBlocks {
    /// Transformed blocks in original order; all but the last hold
    /// exactly [`BLOCK_SIZE`] bytes
    pub blocks: Vec<Vec<u8>>,
    /// Total payload length in bytes
    pub total_len: usize,
}

impl SatBlocks {
    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[inline]
fn transform(b: u8) -> u8 {
    if b <= 32 {
        b
    } else {
        159u8.wrapping_sub(b)
    }
}

/// Transform a raw payload into fixed-size blocks.
///
/// Bytes at or below 32 pass through; every other byte `b` becomes
/// `159 - b`. Each block is transformed independently; no state crosses
/// block boundaries.
pub fn encode(data: &[u8]) -> SatBlocks {
    let blocks = data
        .chunks(BLOCK_SIZE)
        .map(|chunk| chunk.iter().copied().map(transform).collect())
        .collect();
    SatBlocks {
        blocks,
        total_len: data.len(),
    }
}

/// Recover the raw payload from transformed blocks.
///
/// Re-applies the same byte transform and concatenates the blocks in
/// order.
pub fn decode(blocks: &SatBlocks) -> Vec<u8> {
    let mut out = Vec::with_capacity(blocks.total_len);
    for block in &blocks.blocks {
        out.extend(block.iter().copied().map(transform));
    }
    out
}
