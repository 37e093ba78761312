//! # contig-localizer
//!
//! Find where locally-assembled contigs come from in a reference genome and
//! cut those regions out as targets for downstream alignment.
//!
//! Contigs assembled from a cluster of anomalous reads usually differ from
//! the reference only by a small variant. Most of their k-mers therefore
//! still occur exactly in the reference, and the places where they occur
//! point at the contig's origin.
//!
//! ## Pipeline
//!
//! - **Seeding**: Every contig is decomposed into overlapping k-mers, keeping
//!   one copy per strand-independent (canonical) k-mer
//! - **Exact matching**: Seeds are placed with `bwa mem`, allowing only
//!   full-length exact hits
//! - **Clustering**: Hits on each reference sequence are grouped into spans
//!   whenever consecutive hits are within a maximum distance
//! - **Extraction**: Each span, padded on both sides and clipped to the
//!   sequence, is sliced out of the reference
//!
//! ## Example
//!
//! ```rust,no_run
//! use contig_localizer::{Bwa, LocalizeConfig, Localizer, SeqRecord, TracingDiagnostics};
//! use std::path::Path;
//!
//! let contigs = vec![SeqRecord::new("contig1", "ACGT".repeat(20))];
//! let aligner = Bwa::default();
//! let localizer = Localizer::new(&aligner, &TracingDiagnostics, LocalizeConfig::default());
//!
//! for region in localizer.localize(contigs, Path::new("hg38.fa")).unwrap() {
//!     let region = region.unwrap();
//!     println!("{}\t{}", region.id(), region.len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Seeds, seed matches, spans and regions
//! - [`aligner`]: The external `bwa` aligner and index provisioning
//! - [`localize`]: The end-to-end localization driver
//! - [`parsing`]: FASTA, FASTQ and SAM input and output
//! - [`diagnostics`]: Injected warning sink
//! - [`cli`]: Command-line interface implementation

pub mod aligner;
pub mod cli;
pub mod core;
pub mod diagnostics;
pub mod localize;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use aligner::{Aligner, AlignerError, Bwa, BwaConfig};
pub use crate::core::matches::{SeedMatch, SeedMatchSet, Span};
pub use crate::core::record::SeqRecord;
pub use crate::core::region::Region;
pub use diagnostics::{CapturedDiagnostics, Diagnostics, TracingDiagnostics};
pub use localize::{Localization, LocalizeConfig, LocalizeError, Localizer};
