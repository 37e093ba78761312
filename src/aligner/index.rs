use std::path::Path;

use tracing::debug;

use crate::aligner::{Aligner, AlignerError};
use crate::diagnostics::Diagnostics;

/// Make sure the aligner index for `reference` exists, building it if not.
///
/// Does nothing when the index is already present, so it is safe to call
/// before every localization. Not safe against two processes provisioning
/// the same reference at once.
///
/// # Errors
///
/// Returns `AlignerError::BwaInvocation` if the index build fails.
pub fn autoindex<A, D>(aligner: &A, reference: &Path, diagnostics: &D) -> Result<(), AlignerError>
where
    A: Aligner + ?Sized,
    D: Diagnostics + ?Sized,
{
    if aligner.has_index(reference) {
        debug!(reference = %reference.display(), "BWA index found");
        return Ok(());
    }

    diagnostics.warn(&format!(
        "BWA index not found for \"{}\", indexing now",
        reference.display()
    ));
    aligner.build_index(reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aligner::bwa::Bwa;
    use crate::core::matches::SeedMatch;
    use crate::core::seeds::SeedQuery;
    use crate::diagnostics::CapturedDiagnostics;
    use std::cell::Cell;

    /// Writes an empty `.bwt` file instead of running `bwa index`
    #[derive(Default)]
    struct TouchIndexer {
        builds: Cell<usize>,
        fail: bool,
    }

    impl Aligner for TouchIndexer {
        fn has_index(&self, reference: &Path) -> bool {
            Bwa::index_path(reference).is_file()
        }

        fn build_index(&self, reference: &Path) -> Result<(), AlignerError> {
            self.builds.set(self.builds.get() + 1);
            if self.fail {
                return Err(AlignerError::BwaInvocation {
                    command: format!("bwa index {}", reference.display()),
                    stderr: "[bwa_index] failed".to_string(),
                });
            }
            std::fs::write(Bwa::index_path(reference), b"")?;
            Ok(())
        }

        fn exact_matches(
            &self,
            _query: &SeedQuery,
            _reference: &Path,
        ) -> Result<Vec<SeedMatch>, AlignerError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_autoindex_builds_once() {
        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("ref.fa");
        std::fs::write(&reference, b">chr1\nACGT\n").unwrap();

        let aligner = TouchIndexer::default();
        let sink = CapturedDiagnostics::new();

        autoindex(&aligner, &reference, &sink).unwrap();
        assert!(Bwa::index_path(&reference).is_file());
        let mut listing_after_first: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();

        autoindex(&aligner, &reference, &sink).unwrap();
        let mut listing_after_second: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();

        listing_after_first.sort();
        listing_after_second.sort();
        assert_eq!(listing_after_first, listing_after_second);
        assert_eq!(aligner.builds.get(), 1);

        let messages = sink.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("BWA index not found"));
    }

    #[test]
    fn test_autoindex_existing_index_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("ref.fa");
        std::fs::write(Bwa::index_path(&reference), b"").unwrap();

        let aligner = TouchIndexer::default();
        let sink = CapturedDiagnostics::new();
        autoindex(&aligner, &reference, &sink).unwrap();

        assert_eq!(aligner.builds.get(), 0);
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn test_autoindex_failure() {
        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("ref.fa");

        let aligner = TouchIndexer {
            fail: true,
            ..TouchIndexer::default()
        };
        let sink = CapturedDiagnostics::new();
        let result = autoindex(&aligner, &reference, &sink);
        assert!(matches!(result, Err(AlignerError::BwaInvocation { .. })));
    }
}
