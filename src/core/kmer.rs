//! Strand-independent k-mer handling.
//!
//! A k-mer and its reverse complement describe the same genomic locus read
//! from opposite strands. The canonical form is whichever of the two sorts
//! first byte-wise, after upper-casing.
//!
//! Only the four nucleotides `A`, `C`, `G`, `T` (either case) are supported.
//! Any other byte, including `N`, makes [`canonical`] return `None`.

/// Complement of a single nucleotide, upper-cased.
#[must_use]
pub fn complement(base: u8) -> Option<u8> {
    match base.to_ascii_uppercase() {
        b'A' => Some(b'T'),
        b'C' => Some(b'G'),
        b'G' => Some(b'C'),
        b'T' => Some(b'A'),
        _ => None,
    }
}

/// Reverse complement of a nucleotide sequence, upper-cased.
///
/// Returns `None` if the sequence contains a byte outside `ACGTacgt`.
#[must_use]
pub fn reverse_complement(seq: &[u8]) -> Option<Vec<u8>> {
    seq.iter().rev().map(|&b| complement(b)).collect()
}

/// Canonical form of a k-mer: the lexicographic minimum of the upper-cased
/// k-mer and its reverse complement.
///
/// # Examples
///
/// ```
/// use contig_localizer::core::kmer::canonical;
///
/// assert_eq!(canonical(b"TTTG"), Some(b"CAAA".to_vec()));
/// assert_eq!(canonical(b"caaa"), Some(b"CAAA".to_vec()));
/// assert_eq!(canonical(b"ACNT"), None);
/// ```
#[must_use]
pub fn canonical(kmer: &[u8]) -> Option<Vec<u8>> {
    let forward = kmer.to_ascii_uppercase();
    let reverse = reverse_complement(&forward)?;
    Some(forward.min(reverse))
}

/// All overlapping windows of length `k` (stride 1) over `seq`.
///
/// A sequence shorter than `k`, or `k == 0`, yields nothing.
pub fn kmers(seq: &[u8], k: usize) -> impl Iterator<Item = &[u8]> {
    // `windows` panics on zero; a window longer than the sequence is empty
    let size = if k == 0 { seq.len() + 1 } else { k };
    seq.windows(size)
}
