//! Contains the sparse byte store and the initialization segments replayed into it.

mod sparse;
pub use sparse::SparseMemory;

mod segment;
pub use segment::{InitSegment, SegmentElement};

/// Returns a human-readable string describing `total` bytes of memory.
///
/// ## Returns
/// - A human-readable string describing the size in B, KiB, MiB, GiB, TiB, PiB, or EiB.
pub fn format_usage(total: u64) -> String {
    const UNIT: u64 = 1024;
    if total < UNIT {
        return format!("{} B", total);
    }
    let mut div = UNIT;
    let mut exp = 0;
    let mut n = total / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    format!("{:.1} {}iB", (total as f64) / (div as f64), ['K', 'M', 'G', 'T', 'P', 'E'][exp])
}
