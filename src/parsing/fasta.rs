//! Streaming FASTA input and output using noodles.
//!
//! Reference genomes are read one record at a time so that only the
//! current sequence is held in memory.
//! Files ending in `.gz` or `.bgz` are decompressed on the fly; `-` reads
//! from stdin.

use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;

use crate::core::record::SeqRecord;
use crate::parsing::sam::ParseError;

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a file for buffered reading, decompressing gzip/bgzip by extension.
/// A path of `-` reads from stdin.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>, ParseError> {
    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Forward-only reader yielding one FASTA record at a time.
pub struct FastaRecords<R> {
    inner: fasta::io::Reader<R>,
}

impl<R: BufRead> FastaRecords<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: fasta::io::Reader::new(reader),
        }
    }
}

impl<R: BufRead> Iterator for FastaRecords<R> {
    type Item = Result<SeqRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.records().next()?;
        Some(
            result
                .map(|record| {
                    let name = String::from_utf8_lossy(record.name()).into_owned();
                    let sequence: &[u8] = record.sequence().as_ref();
                    SeqRecord::new(name, sequence)
                })
                .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}"))),
        )
    }
}

/// Open a reference FASTA (plain or compressed) for streaming.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened.
pub fn open_reference(path: &Path) -> Result<FastaRecords<Box<dyn BufRead>>, ParseError> {
    Ok(FastaRecords::new(open_input(path)?))
}

/// Write a record as two-line FASTA: header then the whole sequence.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_record<W: Write>(writer: &mut W, record: &SeqRecord) -> io::Result<()> {
    writer.write_all(b">")?;
    writer.write_all(record.name.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.write_all(&record.sequence)?;
    writer.write_all(b"\n")
}
