use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::core::matches::SeedMatchSet;
use crate::core::record::SeqRecord;
use crate::core::region::Region;
use crate::localize::LocalizeError;
use crate::parsing::sam::ParseError;

/// Lazily cuts candidate regions out of a reference stream.
///
/// Reference sequences are consumed one at a time, in file order. Each
/// sequence with seed matches yields one region per span, in span order.
/// Once the stream is exhausted, every sequence named in the match set must
/// have been seen; otherwise the final item is a
/// [`LocalizeError::ReferenceSequenceNotFound`].
pub struct RegionExtractor<I> {
    reference: I,
    seed_matches: SeedMatchSet,
    delta: usize,
    max_diff: usize,
    observed: HashSet<String>,
    pending: VecDeque<Region>,
    finished: bool,
}

impl<I> RegionExtractor<I>
where
    I: Iterator<Item = Result<SeqRecord, ParseError>>,
{
    pub fn new(reference: I, seed_matches: SeedMatchSet, delta: usize, max_diff: usize) -> Self {
        Self {
            reference,
            seed_matches,
            delta,
            max_diff,
            observed: HashSet::new(),
            pending: VecDeque::new(),
            finished: false,
        }
    }

    fn queue_regions(&mut self, record: &SeqRecord) {
        self.observed.insert(record.name.clone());

        let Some(spans) = self.seed_matches.get_spans(&record.name, self.max_diff) else {
            return;
        };
        debug!(seqid = %record.name, spans = spans.len(), "Clustered seed matches");

        for span in spans {
            let region = Region::from_span(&record.name, &record.sequence, span, self.delta);
            self.pending.push_back(region);
        }
    }

    /// Matched sequences never seen in the reference, sorted
    fn missing_seqids(&self) -> Vec<&str> {
        let mut missing: Vec<&str> = self
            .seed_matches
            .seqids()
            .into_iter()
            .filter(|seqid| !self.observed.contains(*seqid))
            .collect();
        missing.sort_unstable();
        missing
    }
}

impl<I> Iterator for RegionExtractor<I>
where
    I: Iterator<Item = Result<SeqRecord, ParseError>>,
{
    type Item = Result<Region, LocalizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(region) = self.pending.pop_front() {
                return Some(Ok(region));
            }
            if self.finished {
                return None;
            }

            match self.reference.next() {
                Some(Ok(record)) => self.queue_regions(&record),
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
                None => {
                    self.finished = true;
                    let missing = self.missing_seqids();
                    if !missing.is_empty() {
                        return Some(Err(LocalizeError::ReferenceSequenceNotFound(
                            missing.join(","),
                        )));
                    }
                }
            }
        }
    }
}

/// Extract padded candidate regions for every clustered span.
///
/// `delta` is added to both sides of each span and the result is clipped to
/// the reference sequence. `max_diff` is the clustering distance passed to
/// [`SeedMatchSet::get_spans`].
pub fn extract_regions<I>(
    reference: I,
    seed_matches: SeedMatchSet,
    delta: usize,
    max_diff: usize,
) -> RegionExtractor<I::IntoIter>
where
    I: IntoIterator<Item = Result<SeqRecord, ParseError>>,
{
    RegionExtractor::new(reference.into_iter(), seed_matches, delta, max_diff)
}
