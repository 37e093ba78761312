use crate::core::matches::Span;
use crate::core::record::SeqRecord;

/// Default flank added to each side of a span
pub const DEFAULT_DELTA: usize = 25;

/// A padded slice of a reference sequence covering one span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Reference sequence the region was cut from
    pub seqid: String,

    /// 0-based start, inclusive
    pub start: usize,

    /// 0-based end, exclusive
    pub end: usize,

    pub sequence: Vec<u8>,
}

impl Region {
    /// Cut `span` widened by `delta` on both sides out of `sequence`,
    /// clipped to `[0, sequence.len())`.
    ///
    /// Only `end` is clipped to the sequence length. A span lying past the
    /// end keeps its padded start, so `start` may exceed `end`; such a
    /// region is empty.
    pub fn from_span(seqid: &str, sequence: &[u8], span: Span, delta: usize) -> Self {
        let end = span.end.saturating_add(delta).min(sequence.len());
        let start = span.start.saturating_sub(delta);

        Self {
            seqid: seqid.to_string(),
            start,
            end,
            sequence: sequence.get(start..end).unwrap_or_default().to_vec(),
        }
    }

    /// Composite identifier `{seqid}_{start}-{end}`
    pub fn id(&self) -> String {
        format!("{}_{}-{}", self.seqid, self.start, self.end)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn into_record(self) -> SeqRecord {
        SeqRecord::new(self.id(), self.sequence)
    }
}
