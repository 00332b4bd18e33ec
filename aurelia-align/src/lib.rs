//! EST-to-genome spliced alignment for the Aurelia toolkit.
//!
//! Aligns a transcript sequence (EST/mRNA) against a genomic sequence with
//! explicit intron modelling: long genomic gaps are charged a flat intron
//! penalty instead of per-base gap costs, discounted further to a splice
//! penalty when the intron's boundaries sit on donor/acceptor motifs. The
//! public entry point is [`align_bounded`], which keeps memory under a
//! caller-supplied byte budget by recursively halving the problem at the
//! optimal path's midpoint (Hirschberg-style) and only ever materialising
//! backtracking matrices that fit the budget.
//!
//! # Quick start
//!
//! ```
//! use aurelia_align::{align_bounded, find_splice_sites, AlignmentScoring, GeneDirection};
//!
//! // a 14-base intron with GT..AG boundaries, spliced out of the EST
//! let genome = b"AAAAAGTAAAAAAAAAAAGAAAAA";
//! let est = b"AAAAAAAAAA";
//! let scoring = AlignmentScoring::new(1, 1, 2, 0, 5, 2).unwrap();
//! let mask = find_splice_sites(genome, GeneDirection::Forward);
//!
//! let aln = align_bounded(est, genome, &scoring, Some(&mask), 1 << 20).unwrap();
//! assert_eq!(aln.score, 8);
//! assert_eq!(aln.introns().len(), 1);
//! ```

pub mod batch;
pub mod direct;
pub mod driver;
pub mod midpoint;
pub mod recovery;
pub mod scoring;
pub mod splice;
pub mod types;

pub use batch::align_batch;
pub use direct::{direct_align, BoundaryMode, DEFAULT_RECOVERY_LIMIT};
pub use driver::{align_best_orientation, align_bounded};
pub use midpoint::{locate_midpoint, Midpoint};
pub use recovery::RecoveryStack;
pub use scoring::{AlignmentScoring, ScoringTable};
pub use splice::{find_splice_sites, MaskView, SpliceFlag, SpliceMask};
pub use types::{
    AlignmentMode, GeneDirection, IntronKind, PathStep, SplicedAlignment,
};

use aurelia_core::{AureliaError, Result};

/// Convenience dispatcher over the alignment modes.
///
/// `Global` goes through the memory-bounded linear-space driver. `Local`
/// has no midpoint recursion (the crossing argument needs global boundary
/// conditions), so the full matrix must fit the budget; a local request
/// that does not fit is rejected rather than silently degraded.
///
/// # Errors
///
/// Returns an error on a mask/genome length mismatch, or for a local
/// alignment whose matrix exceeds `max_bytes`.
pub fn align(
    est: &[u8],
    genome: &[u8],
    scoring: &AlignmentScoring,
    mask: Option<&SpliceMask>,
    mode: AlignmentMode,
    max_bytes: usize,
) -> Result<SplicedAlignment> {
    match mode {
        AlignmentMode::Global => align_bounded(est, genome, scoring, mask, max_bytes),
        AlignmentMode::Local => {
            let area = (genome.len() + 1) * (est.len() + 1) / 4;
            if area > max_bytes {
                return Err(AureliaError::InvalidInput(format!(
                    "local alignment needs {} bytes of backtracking matrix but the budget is {}",
                    area, max_bytes
                )));
            }
            direct_align(
                est,
                genome,
                scoring,
                mask.map(SpliceMask::as_view),
                AlignmentMode::Local,
                BoundaryMode::GapStart,
                true,
                max_bytes.max(DEFAULT_RECOVERY_LIMIT),
            )
        }
    }
}
