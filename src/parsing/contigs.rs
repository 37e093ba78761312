//! Contig input.
//!
//! Contigs arrive as FASTA or FASTQ, optionally compressed. The format is
//! detected from the first byte of the stream: `>` for FASTA, `@` for FASTQ.
//!
//! Assembler output may be augmented: each record can be followed by
//! annotation lines that either start with a space (an interesting k-mer and
//! its abundances) or are wrapped in `#` (a mate sequence). These lines are
//! dropped before parsing, so they never reach the sequence.

use std::io::BufRead;
use std::path::Path;

use noodles::fastq;
use tracing::debug;

use crate::core::record::SeqRecord;
use crate::parsing::fasta::{open_input, FastaRecords};
use crate::parsing::sam::ParseError;

/// Read all contigs from a FASTA or FASTQ file (`-` for stdin).
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read,
/// `ParseError::UnsupportedFormat` if it is neither FASTA nor FASTQ, or
/// `ParseError::Noodles` if a record is malformed.
pub fn read_contigs(path: &Path) -> Result<Vec<SeqRecord>, ParseError> {
    let contigs = parse_contigs(open_input(path)?)?;
    debug!(path = %path.display(), contigs = contigs.len(), "Read contigs");
    Ok(contigs)
}

/// Parse contigs from an already-open reader.
///
/// # Errors
///
/// See [`read_contigs`].
pub fn parse_contigs<R: BufRead>(mut reader: R) -> Result<Vec<SeqRecord>, ParseError> {
    let first = reader.fill_buf()?.first().copied();

    match first {
        None => Ok(Vec::new()),
        Some(b'>') => {
            let data = strip_annotations(reader, false)?;
            FastaRecords::new(&data[..]).collect()
        }
        Some(b'@') => {
            let data = strip_annotations(reader, true)?;
            parse_fastq(&data[..])
        }
        Some(byte) => Err(ParseError::UnsupportedFormat(format!(
            "expected FASTA or FASTQ, found leading byte {:?}",
            char::from(byte)
        ))),
    }
}

fn is_annotation(line: &[u8]) -> bool {
    matches!(line.first(), Some(b' ' | b'#'))
}

/// Copy `reader` without augmented annotation lines.
///
/// FASTQ quality lines may legitimately start with `#`, so for FASTQ only
/// lines between the end of one 4-line record and the next header are
/// candidates for removal.
fn strip_annotations<R: BufRead>(reader: R, fastq: bool) -> Result<Vec<u8>, ParseError> {
    let mut data = Vec::new();
    let mut record_line = 0usize;

    for line in reader.split(b'\n') {
        let line = line?;
        if fastq {
            if record_line == 0 && (line.is_empty() || is_annotation(&line)) {
                continue;
            }
            record_line = (record_line + 1) % 4;
        } else if is_annotation(&line) {
            continue;
        }
        data.extend_from_slice(&line);
        data.push(b'\n');
    }

    Ok(data)
}

fn parse_fastq<R: BufRead>(reader: R) -> Result<Vec<SeqRecord>, ParseError> {
    let mut reader = fastq::io::Reader::new(reader);
    let mut contigs = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTQ record: {e}")))?;
        let name = String::from_utf8_lossy(record.name()).into_owned();
        contigs.push(SeqRecord::new(name, record.sequence().to_vec()));
    }

    Ok(contigs)
}
