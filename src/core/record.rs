/// A named nucleotide sequence (a contig, a reference sequence or an
/// extracted region).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqRecord {
    /// Identifier: the header token before the first whitespace
    pub name: String,

    /// Raw sequence bytes as read from the input
    pub sequence: Vec<u8>,
}

impl SeqRecord {
    pub fn new(name: impl Into<String>, sequence: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            sequence: sequence.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}
