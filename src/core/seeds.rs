//! Decomposition of contigs into unique exact-match seeds.
//!
//! Each contig is split into every overlapping window of the seed length.
//! A window is kept the first time its canonical form is seen anywhere in
//! the input; later windows with the same canonical form (on either strand,
//! in the same contig or a later one) are dropped. The kept window is
//! emitted as it appeared in the contig, not in canonical form.

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::core::kmer::{canonical, kmers};
use crate::core::record::SeqRecord;

/// Default seed length
pub const DEFAULT_SEED_SIZE: usize = 31;

/// Streaming iterator over the unique seeds of a record stream.
pub struct UniqueSeeds<I> {
    records: I,
    seed_size: usize,
    seen: HashSet<Vec<u8>>,
    current: Option<SeqRecord>,
    offset: usize,
}

impl<I> UniqueSeeds<I>
where
    I: Iterator<Item = SeqRecord>,
{
    pub fn new(records: impl IntoIterator<IntoIter = I>, seed_size: usize) -> Self {
        Self {
            records: records.into_iter(),
            seed_size,
            seen: HashSet::new(),
            current: None,
            offset: 0,
        }
    }
}

impl<I> Iterator for UniqueSeeds<I>
where
    I: Iterator<Item = SeqRecord>,
{
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = &self.current {
                let windows = kmers(&record.sequence, self.seed_size).skip(self.offset);
                for window in windows {
                    self.offset += 1;
                    let Some(key) = canonical(window) else {
                        continue;
                    };
                    if self.seen.insert(key) {
                        return Some(window.to_vec());
                    }
                }
            }

            self.current = Some(self.records.next()?);
            self.offset = 0;
        }
    }
}

/// Unique seeds serialized as a FASTA query document for the aligner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedQuery {
    /// `>kmer{n}\n{seed}\n` for each seed, `n` counting from zero
    pub fasta: String,

    /// Number of seeds in the document
    pub count: usize,

    /// Length of every seed
    pub seed_size: usize,
}

impl SeedQuery {
    /// Collect the unique seeds of `records` into a query document.
    pub fn from_records<I>(records: I, seed_size: usize) -> Self
    where
        I: IntoIterator<Item = SeqRecord>,
    {
        let mut query = Self {
            seed_size,
            ..Self::default()
        };

        for seed in UniqueSeeds::new(records, seed_size) {
            // Writing into a String cannot fail
            let _ = writeln!(
                query.fasta,
                ">kmer{}\n{}",
                query.count,
                String::from_utf8_lossy(&seed)
            );
            query.count += 1;
        }

        query
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
