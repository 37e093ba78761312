//! End-to-end localization of contigs against a reference.
//!
//! The [`Localizer`] runs a fixed, linear sequence of steps:
//!
//! 1. Make sure the aligner index for the reference exists ([`autoindex`]).
//! 2. Decompose the contigs into unique seeds and find their exact matches.
//! 3. If nothing matched, warn "no reference matches" and stop.
//! 4. Stream the reference, clustering matches into spans per sequence and
//!    yielding each padded span as a [`Region`].
//!
//! Step 4 is lazy: regions are produced as the returned [`Localization`] is
//! iterated, one reference sequence in memory at a time.

use std::io::BufRead;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::aligner::{autoindex, Aligner, AlignerError};
use crate::core::matches::{SeedMatchSet, DEFAULT_MAX_DIFF};
use crate::core::record::SeqRecord;
use crate::core::region::{Region, DEFAULT_DELTA};
use crate::core::seeds::{SeedQuery, DEFAULT_SEED_SIZE};
use crate::diagnostics::Diagnostics;
use crate::parsing::fasta::{open_reference, FastaRecords};
use crate::parsing::sam::ParseError;
use crate::utils::validation::check_seed_size;

pub mod extract;

pub use extract::{extract_regions, RegionExtractor};

#[derive(Error, Debug)]
pub enum LocalizeError {
    #[error(transparent)]
    Aligner(#[from] AlignerError),

    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Seed matches name sequences absent from the reference file
    #[error("reference sequence not found: {0}")]
    ReferenceSequenceNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Tunable parameters for localization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizeConfig {
    /// Seed length; also the minimum exact match length requested from the aligner
    pub seed_size: usize,

    /// Flank added to each side of every span
    pub delta: usize,

    /// Maximum gap between consecutive matches within one span; 0 disables clustering
    pub max_diff: usize,
}

impl Default for LocalizeConfig {
    fn default() -> Self {
        Self {
            seed_size: DEFAULT_SEED_SIZE,
            delta: DEFAULT_DELTA,
            max_diff: DEFAULT_MAX_DIFF,
        }
    }
}

impl LocalizeConfig {
    /// # Errors
    ///
    /// Returns `LocalizeError::InvalidConfig` if the seed size is out of range.
    pub fn validate(&self) -> Result<(), LocalizeError> {
        match check_seed_size(self.seed_size) {
            Some(message) => Err(LocalizeError::InvalidConfig(message)),
            None => Ok(()),
        }
    }
}

/// Regions produced by one localization, yielded lazily.
pub struct Localization {
    extractor: Option<RegionExtractor<FastaRecords<Box<dyn BufRead>>>>,
}

impl Localization {
    fn empty() -> Self {
        Self { extractor: None }
    }

    /// Whether the aligner found no matches at all
    pub fn is_unmatched(&self) -> bool {
        self.extractor.is_none()
    }

    /// Yield each region as a sequence record named `{seqid}_{start}-{end}`
    pub fn records(self) -> impl Iterator<Item = Result<SeqRecord, LocalizeError>> {
        self.map(|result| result.map(Region::into_record))
    }
}

impl Iterator for Localization {
    type Item = Result<Region, LocalizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.extractor.as_mut()?.next()
    }
}

/// Localizes contigs to candidate reference regions.
pub struct Localizer<'a, A: ?Sized, D: ?Sized> {
    aligner: &'a A,
    diagnostics: &'a D,
    config: LocalizeConfig,
}

impl<'a, A, D> Localizer<'a, A, D>
where
    A: Aligner + ?Sized,
    D: Diagnostics + ?Sized,
{
    pub fn new(aligner: &'a A, diagnostics: &'a D, config: LocalizeConfig) -> Self {
        Self {
            aligner,
            diagnostics,
            config,
        }
    }

    pub fn config(&self) -> &LocalizeConfig {
        &self.config
    }

    /// Find all exact seed matches for `contigs` in `reference`.
    ///
    /// # Errors
    ///
    /// Returns `LocalizeError::Aligner` if indexing or matching fails.
    pub fn seed_matches<I>(
        &self,
        contigs: I,
        reference: &Path,
    ) -> Result<SeedMatchSet, LocalizeError>
    where
        I: IntoIterator<Item = SeqRecord>,
    {
        self.config.validate()?;
        autoindex(self.aligner, reference, self.diagnostics)?;

        let query = SeedQuery::from_records(contigs, self.config.seed_size);
        let mut seed_matches = SeedMatchSet::new(self.config.seed_size);
        if query.is_empty() {
            debug!("No seeds extracted from contigs");
            return Ok(seed_matches);
        }

        for seed_match in self.aligner.exact_matches(&query, reference)? {
            seed_matches.add(seed_match.seqid, seed_match.position);
        }
        info!(
            seeds = query.count,
            seed_size = seed_matches.seed_size(),
            matches = seed_matches.match_count(),
            sequences = seed_matches.len(),
            "Retrieved exact seed matches"
        );

        Ok(seed_matches)
    }

    /// Localize `contigs` against the reference FASTA at `reference`.
    ///
    /// When no seed matches the reference, a single "no reference matches"
    /// warning is sent to the diagnostics sink and the returned
    /// [`Localization`] is empty.
    ///
    /// # Errors
    ///
    /// Returns `LocalizeError::Aligner` if indexing or matching fails, or
    /// `LocalizeError::Parse` if the reference cannot be opened. Errors
    /// found while streaming the reference surface through the iterator.
    pub fn localize<I>(&self, contigs: I, reference: &Path) -> Result<Localization, LocalizeError>
    where
        I: IntoIterator<Item = SeqRecord>,
    {
        let seed_matches = self.seed_matches(contigs, reference)?;
        if seed_matches.is_empty() {
            self.diagnostics.warn("no reference matches");
            return Ok(Localization::empty());
        }

        let records = open_reference(reference)?;
        let extractor = RegionExtractor::new(
            records,
            seed_matches,
            self.config.delta,
            self.config.max_diff,
        );

        Ok(Localization {
            extractor: Some(extractor),
        })
    }
}
