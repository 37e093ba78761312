//! Centralized validation helpers.

/// Largest seed size accepted; `bwa mem` caps its minimum seed length here
pub const MAX_SEED_SIZE: usize = 255;

/// Check that a seed size is usable.
///
/// Returns an error message if the size is out of range, None if it is valid.
///
/// # Examples
///
/// ```
/// use contig_localizer::utils::validation::check_seed_size;
///
/// assert!(check_seed_size(31).is_none());
/// assert!(check_seed_size(0).is_some());
/// assert!(check_seed_size(256).is_some());
/// ```
#[must_use]
pub fn check_seed_size(seed_size: usize) -> Option<String> {
    if seed_size == 0 {
        Some("seed size must be at least 1".to_string())
    } else if seed_size > MAX_SEED_SIZE {
        Some(format!(
            "seed size {seed_size} exceeds maximum of {MAX_SEED_SIZE}"
        ))
    } else {
        None
    }
}
