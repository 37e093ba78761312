//! The external exact-match aligner.
//!
//! Localization needs two things from an aligner: an on-disk index for the
//! reference, and exact placements for a batch of seeds. Both are expressed
//! by the [`Aligner`] trait so the driver can run against a fake in tests.
//! [`bwa::Bwa`] is the production implementation, running `bwa` as a child
//! process.

use std::path::Path;

use thiserror::Error;

use crate::core::matches::SeedMatch;
use crate::core::seeds::SeedQuery;
use crate::parsing::sam::ParseError;

pub mod bwa;
pub mod index;

pub use bwa::{Bwa, BwaConfig};
pub use index::autoindex;

#[derive(Error, Debug)]
pub enum AlignerError {
    /// The aligner ran but exited unsuccessfully
    #[error("problem running BWA (`{command}`): {stderr}")]
    BwaInvocation { command: String, stderr: String },

    #[error("could not launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse aligner output: {0}")]
    Output(#[from] ParseError),
}

/// An exact-match aligner with an on-disk reference index.
pub trait Aligner {
    /// Whether the index for `reference` already exists
    fn has_index(&self, reference: &Path) -> bool;

    /// Build the index for `reference`.
    ///
    /// # Errors
    ///
    /// Returns `AlignerError::BwaInvocation` if indexing fails.
    fn build_index(&self, reference: &Path) -> Result<(), AlignerError>;

    /// Find all exact placements of the seeds in `query`.
    ///
    /// Unmapped seeds produce no matches. Order is unspecified.
    ///
    /// # Errors
    ///
    /// Returns `AlignerError::BwaInvocation` if the aligner exits
    /// unsuccessfully, or `AlignerError::Output` if its output is malformed.
    fn exact_matches(
        &self,
        query: &SeedQuery,
        reference: &Path,
    ) -> Result<Vec<SeedMatch>, AlignerError>;
}
