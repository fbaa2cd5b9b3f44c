//! Chunk count and indirection height for a file.
//!
//! A file of `len` bytes is cut into `ceil(len / chunk_size)` leaf chunks.
//! One chunk (or none, for an empty file) is stored as a single blob. More
//! chunks are gathered under list objects of at most `max_fanout` links each,
//! stacked `height` levels deep, where `height` is the smallest value with
//! `max_fanout ^ height >= num_chunks`.
//!
//! A chunk count that is an exact power of the fan-out therefore fits in
//! exactly that many levels: `max_fanout` chunks need one list level, not two.

use crate::config::DagConfig;

/// Layout of one file in the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkPlan {
    /// File length in bytes.
    pub len: u64,
    /// Number of leaf chunks.
    pub num_chunks: u64,
    /// Levels of list objects above the leaves. Zero for a single leaf.
    pub height: u32,
}

impl ChunkPlan {
    /// Plan a file of `len` bytes under `config`.
    pub fn new(len: u64, config: &DagConfig) -> Self {
        let num_chunks = num_chunks(len, config.chunk_size as u64);
        Self {
            len,
            num_chunks,
            height: indirection_height(num_chunks, config.max_fanout as u64),
        }
    }

    /// Returns `true` if the whole file is stored as one blob.
    pub fn is_single_leaf(&self) -> bool {
        self.num_chunks <= 1
    }
}

/// `ceil(len / chunk_size)`.
pub fn num_chunks(len: u64, chunk_size: u64) -> u64 {
    len.div_ceil(chunk_size)
}

/// Smallest `h` with `fanout ^ h >= num_chunks`; zero for one chunk or none.
pub fn indirection_height(num_chunks: u64, fanout: u64) -> u32 {
    let mut height = 0;
    let mut capacity: u64 = 1;
    while capacity < num_chunks {
        capacity = capacity.saturating_mul(fanout);
        height += 1;
    }
    height
}
