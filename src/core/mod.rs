//! Core data types and algorithms for contig localization.
//!
//! - [`kmer`]: canonical (strand-independent) k-mers
//! - [`seeds`]: unique seed extraction and the aligner query document
//! - [`matches`]: the [`SeedMatchSet`](matches::SeedMatchSet) and span clustering
//! - [`region`]: padded reference slices cut from spans
//! - [`record`]: the plain named-sequence record shared by all of the above
//!
//! ## Coordinates
//!
//! All positions are 0-based. Spans and regions are half-open: `start` is
//! the first base covered and `end` is one past the last.

pub mod kmer;
pub mod matches;
pub mod record;
pub mod region;
pub mod seeds;
