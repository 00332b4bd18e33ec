//! Batch alignment of many ESTs against one genome.
//!
//! Every alignment is independent and reads the genome, scoring context,
//! and splice mask through shared references, so the batch parallelises
//! trivially; the `parallel` feature switches the loop to rayon.

use crate::driver::align_bounded;
use crate::scoring::AlignmentScoring;
use crate::splice::SpliceMask;
use crate::types::SplicedAlignment;
use aurelia_core::Result;

/// Align a batch of ESTs against one genome under a shared memory budget.
///
/// Results are returned in input order.
///
/// # Errors
///
/// Returns the first error any individual alignment reports.
pub fn align_batch(
    ests: &[&[u8]],
    genome: &[u8],
    scoring: &AlignmentScoring,
    mask: Option<&SpliceMask>,
    max_bytes: usize,
) -> Result<Vec<SplicedAlignment>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        ests.par_iter()
            .map(|est| align_bounded(est, genome, scoring, mask, max_bytes))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        ests.iter()
            .map(|est| align_bounded(est, genome, scoring, mask, max_bytes))
            .collect()
    }
}
