//! `bwa` as a child process.
//!
//! Seeds are written to `bwa mem` on stdin. Its SAM output and its log
//! output both go to anonymous temporary files, so the child can never block
//! on a full pipe while we are still writing. Both files are removed when
//! they go out of scope, on every return path.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::aligner::{Aligner, AlignerError};
use crate::core::matches::SeedMatch;
use crate::core::seeds::SeedQuery;
use crate::parsing::sam::parse_seed_matches;

/// Suffix of the index artifact whose presence marks an indexed reference
pub const INDEX_SUFFIX: &str = ".bwt";

/// Default aligner executable, resolved through `PATH`
pub const DEFAULT_PROGRAM: &str = "bwa";

/// Configuration for invoking `bwa`
#[derive(Debug, Clone)]
pub struct BwaConfig {
    /// Path to the `bwa` executable
    pub program: PathBuf,
}

impl Default for BwaConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
        }
    }
}

/// Exact seed matching with `bwa mem`
#[derive(Debug, Clone, Default)]
pub struct Bwa {
    config: BwaConfig,
}

impl Bwa {
    pub fn new(config: BwaConfig) -> Self {
        Self { config }
    }

    /// Path of the index artifact for `reference`, e.g. `ref.fa.bwt`
    pub fn index_path(reference: &Path) -> PathBuf {
        let mut path = OsString::from(reference.as_os_str());
        path.push(INDEX_SUFFIX);
        PathBuf::from(path)
    }

    /// Arguments for exact-only matching: the seed size is both the minimum
    /// seed length and the minimum score, so only full-length exact hits pass.
    pub fn mem_args(seed_size: usize, reference: &Path) -> Vec<OsString> {
        let k = seed_size.to_string();
        vec![
            "mem".into(),
            "-k".into(),
            k.clone().into(),
            "-T".into(),
            k.into(),
            reference.as_os_str().to_owned(),
            "-".into(),
        ]
    }

    fn command_line(&self, args: &[OsString]) -> String {
        let mut line = self.config.program.display().to_string();
        for arg in args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    fn spawn_error(&self, source: std::io::Error) -> AlignerError {
        AlignerError::Spawn {
            program: self.config.program.display().to_string(),
            source,
        }
    }
}

fn read_log(mut file: File) -> Result<String, AlignerError> {
    file.seek(SeekFrom::Start(0))?;
    let mut text = String::new();
    file.read_to_string(&mut text)?;
    Ok(text.trim_end().to_string())
}

impl Aligner for Bwa {
    fn has_index(&self, reference: &Path) -> bool {
        Self::index_path(reference).is_file()
    }

    fn build_index(&self, reference: &Path) -> Result<(), AlignerError> {
        let args = vec![OsString::from("index"), reference.as_os_str().to_owned()];
        let command = self.command_line(&args);
        info!(command = %command, "Building BWA index");

        let output = Command::new(&self.config.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(AlignerError::BwaInvocation {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        Ok(())
    }

    fn exact_matches(
        &self,
        query: &SeedQuery,
        reference: &Path,
    ) -> Result<Vec<SeedMatch>, AlignerError> {
        let args = Self::mem_args(query.seed_size, reference);
        let command = self.command_line(&args);
        debug!(command = %command, seeds = query.count, "Running BWA");

        let mut samfile = tempfile::tempfile()?;
        let logfile = tempfile::tempfile()?;

        let mut child = Command::new(&self.config.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::from(samfile.try_clone()?))
            .stderr(Stdio::from(logfile.try_clone()?))
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // A child that exits early closes stdin; report its exit status and
        // log rather than the broken pipe.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(query.fasta.as_bytes()),
            None => Ok(()),
        };
        let status = child.wait()?;

        if !status.success() {
            return Err(AlignerError::BwaInvocation {
                command,
                stderr: read_log(logfile)?,
            });
        }
        written?;

        samfile.seek(SeekFrom::Start(0))?;
        let matches = parse_seed_matches(BufReader::new(samfile))?;
        debug!(matches = matches.len(), "Parsed BWA exact matches");

        Ok(matches)
    }
}
