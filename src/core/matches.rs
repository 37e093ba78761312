//! Exact seed matches indexed by reference sequence, and their clustering
//! into spans.

use std::collections::{HashMap, HashSet};

/// Default maximum distance between consecutive seed matches in one span
pub const DEFAULT_MAX_DIFF: usize = 10_000;

/// One exact placement of a seed in the reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedMatch {
    /// Reference sequence name
    pub seqid: String,

    /// 0-based position of the first seed base
    pub position: usize,
}

impl SeedMatch {
    pub fn new(seqid: impl Into<String>, position: usize) -> Self {
        Self {
            seqid: seqid.into(),
            position,
        }
    }
}

/// Reference interval implied by a cluster of seed matches.
///
/// `end` is the last match position plus the seed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Seed match positions grouped by reference sequence.
#[derive(Debug, Clone)]
pub struct SeedMatchSet {
    positions: HashMap<String, Vec<usize>>,
    seed_size: usize,
}

impl SeedMatchSet {
    pub fn new(seed_size: usize) -> Self {
        Self {
            positions: HashMap::new(),
            seed_size,
        }
    }

    pub fn seed_size(&self) -> usize {
        self.seed_size
    }

    /// Record a match. Duplicate positions are kept.
    pub fn add(&mut self, seqid: impl Into<String>, pos: usize) {
        self.positions.entry(seqid.into()).or_default().push(pos);
    }

    /// Number of distinct reference sequences with at least one match.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Total number of recorded matches across all sequences
    pub fn match_count(&self) -> usize {
        self.positions.values().map(Vec::len).sum()
    }

    /// Reference sequences with at least one match
    pub fn seqids(&self) -> HashSet<&str> {
        self.positions.keys().map(String::as_str).collect()
    }

    /// Cluster the matches on `seqid` into spans.
    ///
    /// Sorted positions are grouped greedily: a position joins the current
    /// cluster when its distance to the previous position is at most
    /// `clusterdist`, otherwise it starts a new one. A `clusterdist` of zero
    /// disables clustering and yields a single span from the smallest to the
    /// largest position.
    ///
    /// Returns `None` if `seqid` has no matches.
    pub fn get_spans(&self, seqid: &str, clusterdist: usize) -> Option<Vec<Span>> {
        let mut positions = self.positions.get(seqid)?.clone();
        if positions.is_empty() {
            return None;
        }
        positions.sort_unstable();

        let first = positions[0];
        let last = positions[positions.len() - 1];
        if clusterdist == 0 {
            return Some(vec![Span::new(first, last + self.seed_size)]);
        }

        let mut spans = Vec::new();
        let mut cluster_start = first;
        let mut prev = first;
        for &pos in &positions[1..] {
            if pos - prev > clusterdist {
                spans.push(Span::new(cluster_start, prev + self.seed_size));
                cluster_start = pos;
            }
            prev = pos;
        }
        spans.push(Span::new(cluster_start, prev + self.seed_size));

        Some(spans)
    }
}
