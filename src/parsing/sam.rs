use std::io::BufRead;

use noodles::sam;
use thiserror::Error;
use tracing::debug;

use crate::core::matches::SeedMatch;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Parse aligner SAM output into exact seed matches.
///
/// Unmapped records are skipped. Positions are converted from SAM's
/// 1-based coordinates to 0-based.
///
/// # Errors
///
/// Returns `ParseError::Noodles` if the stream is not valid SAM, or
/// `ParseError::InvalidFormat` if a mapped record lacks a reference
/// sequence or alignment start.
pub fn parse_seed_matches<R: BufRead>(reader: R) -> Result<Vec<SeedMatch>, ParseError> {
    let mut reader = sam::io::Reader::new(reader);

    let header = reader
        .read_header()
        .map_err(|e| ParseError::Noodles(format!("Failed to read SAM header: {e}")))?;
    debug!(
        reference_sequences = header.reference_sequences().len(),
        "Read aligner SAM header"
    );

    let mut matches = Vec::new();
    let mut unmapped = 0usize;

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse SAM record: {e}")))?;

        let flags = record
            .flags()
            .map_err(|e| ParseError::Noodles(format!("Invalid SAM flags: {e}")))?;
        if flags.is_unmapped() {
            unmapped += 1;
            continue;
        }

        let seqid = record
            .reference_sequence_name()
            .map(|name| String::from_utf8_lossy(name).into_owned())
            .ok_or_else(|| {
                ParseError::InvalidFormat("Mapped record has no reference sequence".to_string())
            })?;

        let start = record
            .alignment_start()
            .transpose()
            .map_err(|e| ParseError::Noodles(format!("Invalid alignment start: {e}")))?
            .ok_or_else(|| {
                ParseError::InvalidFormat(format!("Mapped record on {seqid} has no position"))
            })?;

        // SAM positions are 1-based
        matches.push(SeedMatch::new(seqid, usize::from(start) - 1));
    }

    debug!(
        mapped = matches.len(),
        unmapped, "Parsed aligner SAM records"
    );

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAM: &str = "@HD\tVN:1.6\tSO:unsorted
@SQ\tSN:chr1\tLN:1000
@SQ\tSN:chr2\tLN:500
@PG\tID:bwa\tPN:bwa\tVN:0.7.17
kmer0\t0\tchr1\t101\t60\t4M\t*\t0\t0\tACGT\t*
kmer1\t4\t*\t0\t0\t*\t*\t0\t0\tGGGG\t*
kmer2\t16\tchr2\t1\t60\t4M\t*\t0\t0\tTTTT\t*
kmer3\t0\tchr1\t9001\t60\t4M\t*\t0\t0\tCCCC\t*
";

    #[test]
    fn test_parse_seed_matches() {
        let matches = parse_seed_matches(SAM.as_bytes()).unwrap();
        assert_eq!(
            matches,
            vec![
                SeedMatch::new("chr1", 100),
                SeedMatch::new("chr2", 0),
                SeedMatch::new("chr1", 9000),
            ]
        );
    }

    #[test]
    fn test_parse_header_only() {
        let sam = "@HD\tVN:1.6\n@SQ\tSN:chr1\tLN:1000\n";
        let matches = parse_seed_matches(sam.as_bytes()).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_parse_all_unmapped() {
        let sam = "@SQ\tSN:chr1\tLN:1000\nkmer0\t4\t*\t0\t0\t*\t*\t0\t0\tACGT\t*\n";
        let matches = parse_seed_matches(sam.as_bytes()).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_parse_garbage() {
        let sam = "@SQ\tSN:chr1\tLN:1000\nkmer0\tnot-a-flag\tchr1\t1\n";
        assert!(parse_seed_matches(sam.as_bytes()).is_err());
    }
}
