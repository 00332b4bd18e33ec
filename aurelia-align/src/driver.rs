//! Linear-space alignment driver.
//!
//! The public entry point for global EST-to-genome alignment. Problems
//! whose packed backtracking matrix fits the byte budget go straight to
//! the direct aligner; anything larger is split at the middle EST column
//! using the midpoint locator, solved half by half, and spliced back
//! together at the seam. Each split at least halves the EST, so the
//! recursion bottoms out after O(log EST) levels, and every level owns
//! only its own pair of rolled rows.
//!
//! Seam composition follows the crossing kind: a diagonal crossing is
//! re-derived as the right half's forced opening diagonal, while an
//! EST-gap crossing is emitted explicitly between the halves (the gap
//! consumes one EST base and no genome, so the right half starts one EST
//! base and one genome position later). Degenerate pieces collapse to
//! pure gap or intron runs without another recursion level.

use aurelia_core::{AureliaError, Result};

use crate::direct::{direct_align, BoundaryMode, DEFAULT_RECOVERY_LIMIT};
use crate::midpoint::locate_midpoint;
use crate::scoring::AlignmentScoring;
use crate::splice::{find_splice_sites, MaskView, SpliceMask};
use crate::types::{AlignmentMode, GeneDirection, IntronKind, PathStep, SplicedAlignment};

/// ESTs this short are always aligned directly: their packed matrix is a
/// thin strip and the midpoint recursion could not shrink them further.
const MIN_SPLIT_EST: usize = 3;

/// Global spliced alignment under a memory budget.
///
/// `max_bytes` bounds the direct aligner's packed backtracking matrix
/// (four cells per byte, hence `(G+1)(E+1)/4` in the budget test); the
/// score and the boundary coordinates are identical whichever side of the
/// budget the problem lands on. An empty EST or genome yields the
/// degenerate score-0, empty-path result.
///
/// # Errors
///
/// Returns `InvalidInput` if the splice mask length does not match the
/// genome.
pub fn align_bounded(
    est: &[u8],
    genome: &[u8],
    scoring: &AlignmentScoring,
    mask: Option<&SpliceMask>,
    max_bytes: usize,
) -> Result<SplicedAlignment> {
    if let Some(m) = mask {
        if m.len() != genome.len() {
            return Err(AureliaError::InvalidInput(format!(
                "splice mask length {} does not match genome length {}",
                m.len(),
                genome.len()
            )));
        }
    }
    if est.is_empty() || genome.is_empty() {
        return Ok(SplicedAlignment {
            score: 0,
            genome_start: 0,
            est_start: 0,
            genome_stop: 0,
            est_stop: 0,
            path: Vec::new(),
        });
    }
    let view = mask.map(SpliceMask::as_view);
    let (score, path) = align_rec(est, genome, scoring, view, max_bytes, BoundaryMode::GapStart)?;
    Ok(SplicedAlignment {
        score,
        genome_start: 0,
        est_start: 0,
        genome_stop: genome.len() - 1,
        est_stop: est.len() - 1,
        path,
    })
}

/// Align against both gene orientations and keep the better result.
///
/// Scans the genome once per direction, so the caller supplies no mask.
/// Ties go to the forward orientation.
pub fn align_best_orientation(
    est: &[u8],
    genome: &[u8],
    scoring: &AlignmentScoring,
    max_bytes: usize,
) -> Result<(SplicedAlignment, GeneDirection)> {
    let forward_mask = find_splice_sites(genome, GeneDirection::Forward);
    let reverse_mask = find_splice_sites(genome, GeneDirection::Reverse);
    let forward = align_bounded(est, genome, scoring, Some(&forward_mask), max_bytes)?;
    let reverse = align_bounded(est, genome, scoring, Some(&reverse_mask), max_bytes)?;
    if reverse.score > forward.score {
        Ok((reverse, GeneDirection::Reverse))
    } else {
        Ok((forward, GeneDirection::Forward))
    }
}

fn align_rec(
    est: &[u8],
    genome: &[u8],
    scoring: &AlignmentScoring,
    mask: Option<MaskView<'_>>,
    max_bytes: usize,
    boundary: BoundaryMode,
) -> Result<(i32, Vec<PathStep>)> {
    if est.is_empty() {
        return Ok(genome_run(genome.len(), scoring));
    }
    if genome.is_empty() {
        let n = est.len();
        return Ok((
            -(scoring.gap_penalty() * n as i32),
            vec![PathStep::DeleteEst; n],
        ));
    }

    let area = (genome.len() + 1) * (est.len() + 1) / 4;
    let tiny = est.len() < MIN_SPLIT_EST;
    if tiny || area <= max_bytes {
        // A thin strip must not fail on recovery bookkeeping; anything else
        // gets the caller's budget as its stack ceiling.
        let limit = if tiny {
            usize::MAX
        } else {
            max_bytes.max(DEFAULT_RECOVERY_LIMIT)
        };
        match direct_align(
            est,
            genome,
            scoring,
            mask,
            AlignmentMode::Global,
            boundary,
            true,
            limit,
        ) {
            Ok(r) => return Ok((r.score, r.path)),
            // the area estimate was optimistic; split instead
            Err(AureliaError::ResourceExhausted(_)) if !tiny => {}
            Err(e) => return Err(e),
        }
    }

    let middle = est.len() / 2;
    let mid = locate_midpoint(est, genome, scoring, mask, middle, boundary)?;

    let cut = (mid.left + 1) as usize;
    let (mut score, mut path) = align_rec(
        &est[..=middle],
        &genome[..cut],
        scoring,
        mask.map(|m| m.slice(0, cut)),
        max_bytes,
        boundary,
    )?;

    let (right_est, right_boundary) = if mid.right == mid.left + 1 {
        // diagonal seam: the crossing step opens the right half
        (&est[middle + 1..], BoundaryMode::DiagonalStart)
    } else {
        debug_assert_eq!(mid.right, mid.left);
        // EST-gap seam: emit the crossing step explicitly
        score -= scoring.gap_penalty();
        path.push(PathStep::DeleteEst);
        (&est[middle + 2..], BoundaryMode::GapStart)
    };
    let (right_score, right_path) = align_rec(
        right_est,
        &genome[cut..],
        scoring,
        mask.map(|m| m.slice(cut, m.len())),
        max_bytes,
        right_boundary,
    )?;
    score += right_score;
    path.extend(right_path);
    Ok((score, path))
}

/// Best pure genome-consuming path: a plain gap run or one plain intron,
/// whichever the engine's own move set scores higher. Ties keep the gaps,
/// matching the aligner's delete-before-intron priority.
fn genome_run(len: usize, scoring: &AlignmentScoring) -> (i32, Vec<PathStep>) {
    if len == 0 {
        return (0, Vec::new());
    }
    let gaps = -(scoring.gap_penalty() * len as i32);
    let intron = -scoring.intron_penalty();
    if intron > gaps {
        (
            intron,
            vec![PathStep::Intron {
                kind: IntronKind::Plain,
                len,
            }],
        )
    } else {
        (gaps, vec![PathStep::DeleteGenome; len])
    }
}
