//! Readers and writers for the sequence formats the localizer touches.
//!
//! - **FASTA**: streaming reference reader and region writer ([`fasta`])
//! - **Contigs**: FASTA or FASTQ contig input ([`contigs`])
//! - **SAM**: exact seed placements reported by the aligner ([`sam`])
//!
//! Files ending in `.gz` or `.bgz` are decompressed transparently.

pub mod contigs;
pub mod fasta;
pub mod sam;

pub use sam::ParseError;
