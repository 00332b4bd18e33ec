//! Direct spliced alignment over the full dynamic-programming grid.
//!
//! One genomic row at a time, one EST column at a time inside that row,
//! with the row pair rolled forward so only two score rows are live. Each
//! cell takes the best of four moves: diagonal (one base of each
//! sequence), an EST gap, a genome gap, or an intron opened from the
//! best-scoring earlier row of the same EST column. An intron is charged
//! the splice penalty instead of the intron penalty exactly when the
//! current genomic position carries an acceptor tag and the recorded
//! intron-origin position carries a donor tag.
//!
//! With backtracking enabled, directions go into a packed two-bit matrix
//! (four cells per byte) and displaced intron origins into a bounded
//! [`RecoveryStack`]; exhausting the stack aborts the call with
//! [`AureliaError::ResourceExhausted`], which the linear-space driver
//! treats as a request to split the problem instead.

use aurelia_core::{AureliaError, Result, TwoBitMatrix};

use crate::recovery::RecoveryStack;
use crate::scoring::AlignmentScoring;
use crate::splice::MaskView;
use crate::types::{AlignmentMode, GeneDirection, IntronKind, PathStep, SplicedAlignment};

const NEG_INF: i32 = i32::MIN / 2;

// Two-bit direction codes; the values double as the first four path token
// codes.
const DIAGONAL: u8 = 0;
const DELETE_EST: u8 = 1;
const DELETE_GENOME: u8 = 2;
const INTRON: u8 = 3;

/// Entry condition for a global alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryMode {
    /// Only the corner boundary cell is live: the alignment must open with
    /// the diagonal pairing the first base of each sequence. Used for the
    /// right half of a diagonal seam in the linear-space recursion.
    DiagonalStart,
    /// Ordinary penalized opening gaps along both boundary lines.
    GapStart,
}

/// Recovery-stack byte ceiling for callers without a more specific budget.
pub const DEFAULT_RECOVERY_LIMIT: usize = 1 << 20;

/// Align an EST against a genomic sequence over the full DP grid.
///
/// `mode` selects global (both sequences end-to-end) or local alignment;
/// `boundary` applies to global mode only. With `backtrack` false, only
/// the score and boundary coordinates are produced and the path is empty
/// (in local mode the start coordinates then mirror the stop coordinates,
/// since only a path walk discovers them). Empty inputs yield the
/// degenerate score-0, empty-path result.
///
/// # Errors
///
/// Returns `InvalidInput` if the splice mask length does not match the
/// genome, and `ResourceExhausted` if backtracking bookkeeping outgrows
/// `recovery_limit` bytes.
#[allow(clippy::too_many_arguments)]
pub fn direct_align(
    est: &[u8],
    genome: &[u8],
    scoring: &AlignmentScoring,
    mask: Option<MaskView<'_>>,
    mode: AlignmentMode,
    boundary: BoundaryMode,
    backtrack: bool,
    recovery_limit: usize,
) -> Result<SplicedAlignment> {
    if let Some(m) = &mask {
        if m.len() != genome.len() {
            return Err(AureliaError::InvalidInput(format!(
                "splice mask length {} does not match genome length {}",
                m.len(),
                genome.len()
            )));
        }
    }
    if est.is_empty() || genome.is_empty() {
        return Ok(degenerate());
    }

    let g_len = genome.len();
    let e_len = est.len();
    let cols = e_len + 1; // slot 0 is the EST -1 boundary cell
    let gap = scoring.gap_penalty();

    let mut prev = vec![NEG_INF; cols];
    let mut curr = vec![NEG_INF; cols];
    let mut best_intron = vec![NEG_INF; cols];
    let mut origins = vec![0u32; cols];
    let mut stack = RecoveryStack::new(recovery_limit);
    let mut trace = if backtrack {
        Some(TwoBitMatrix::new(g_len, e_len))
    } else {
        None
    };

    // Boundary genome row (-1).
    match mode {
        AlignmentMode::Local => prev.fill(0),
        AlignmentMode::Global => {
            prev[0] = 0;
            for e in 0..e_len {
                prev[e + 1] = match boundary {
                    BoundaryMode::GapStart => -gap * (e as i32 + 1),
                    BoundaryMode::DiagonalStart => NEG_INF,
                };
            }
        }
    }

    let mut max_score = 0i32;
    let mut max_g = 0usize;
    let mut max_e = 0usize;

    for g in 0..g_len {
        curr[0] = match (mode, boundary) {
            (AlignmentMode::Local, _) => 0,
            (AlignmentMode::Global, BoundaryMode::GapStart) => -gap * (g as i32 + 1),
            (AlignmentMode::Global, BoundaryMode::DiagonalStart) => NEG_INF,
        };
        for e in 0..e_len {
            let idx = e + 1;
            let diagonal = prev[idx - 1] + scoring.score_pair(genome[g], est[e]);
            let delete_est = curr[idx - 1] - gap;
            let delete_genome = prev[idx] - gap;
            let intron = if best_intron[idx] > NEG_INF {
                let spliced = match &mask {
                    Some(m) => m.is_acceptor(g) && m.is_donor(origins[idx] as usize),
                    None => false,
                };
                let pen = if spliced {
                    scoring.splice_penalty()
                } else {
                    scoring.intron_penalty()
                };
                best_intron[idx] - pen
            } else {
                NEG_INF
            };

            // Fixed priority: diagonal, EST gap, genome gap, intron.
            let (mut best, dir) =
                if diagonal >= delete_est && diagonal >= delete_genome && diagonal >= intron {
                    (diagonal, DIAGONAL)
                } else if delete_est >= delete_genome && delete_est >= intron {
                    (delete_est, DELETE_EST)
                } else if delete_genome >= intron {
                    (delete_genome, DELETE_GENOME)
                } else {
                    (intron, INTRON)
                };

            if mode == AlignmentMode::Local && best < 0 {
                best = 0;
            }
            if best < NEG_INF {
                best = NEG_INF;
            }
            curr[idx] = best;

            if let Some(t) = trace.as_mut() {
                t.set(g, e, dir);
            }

            if mode == AlignmentMode::Local && best > max_score {
                max_score = best;
                max_g = g;
                max_e = e;
            }

            if best > best_intron[idx] {
                if backtrack && best_intron[idx] > NEG_INF && !stack.remember(e as u32, origins[idx])
                {
                    return Err(AureliaError::ResourceExhausted(format!(
                        "intron recovery stack over {} bytes",
                        recovery_limit
                    )));
                }
                best_intron[idx] = best;
                origins[idx] = g as u32;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    // prev now holds the last genome row.
    let (score, end_g, end_e) = match mode {
        AlignmentMode::Global => (prev[e_len], g_len - 1, e_len - 1),
        AlignmentMode::Local => {
            if max_score == 0 {
                // no positive-scoring region
                return Ok(degenerate());
            }
            (max_score, max_g, max_e)
        }
    };

    let trace = match trace {
        Some(t) => t,
        None => {
            let (gs, es) = match mode {
                AlignmentMode::Global => (0, 0),
                AlignmentMode::Local => (end_g, end_e),
            };
            return Ok(SplicedAlignment {
                score,
                genome_start: gs,
                est_start: es,
                genome_stop: end_g,
                est_stop: end_e,
                path: Vec::new(),
            });
        }
    };

    // Backward walk. In local mode the running remainder, rebuilt from each
    // step's score contribution, reaches zero exactly at the local start.
    let mut steps: Vec<PathStep> = Vec::new();
    let mut g = end_g as isize;
    let mut e = end_e as isize;
    let mut remaining = score;

    loop {
        match mode {
            AlignmentMode::Global => {
                if g < 0 && e < 0 {
                    break;
                }
            }
            AlignmentMode::Local => {
                if remaining == 0 {
                    break;
                }
            }
        }
        if e < 0 {
            steps.push(PathStep::DeleteGenome);
            g -= 1;
            continue;
        }
        if g < 0 {
            steps.push(PathStep::DeleteEst);
            e -= 1;
            continue;
        }
        let (gu, eu) = (g as usize, e as usize);
        match trace.get(gu, eu) {
            DIAGONAL => {
                remaining -= scoring.score_pair(genome[gu], est[eu]);
                steps.push(PathStep::Diagonal);
                g -= 1;
                e -= 1;
            }
            DELETE_EST => {
                remaining += gap;
                steps.push(PathStep::DeleteEst);
                e -= 1;
            }
            DELETE_GENOME => {
                remaining += gap;
                steps.push(PathStep::DeleteGenome);
                g -= 1;
            }
            INTRON => {
                let idx = eu + 1;
                debug_assert!(best_intron[idx] > NEG_INF, "intron step without an origin");
                let recorded = origins[idx] as isize;
                // The final recorded origin is only valid if it predates this
                // row; otherwise it was overwritten after this cell was laid
                // down and the displaced value lives in the recovery stack.
                let origin = if recorded < g {
                    recorded as usize
                } else {
                    stack.lookup(eu as u32, gu as u32) as usize
                };
                let kind = intron_kind(&mask, origin, gu);
                remaining += match kind {
                    IntronKind::Plain => scoring.intron_penalty(),
                    _ => scoring.splice_penalty(),
                };
                steps.push(PathStep::Intron {
                    kind,
                    len: gu - origin,
                });
                g = origin as isize;
            }
            _ => unreachable!("two-bit direction out of range"),
        }
    }
    steps.reverse();

    let (genome_start, est_start) = match mode {
        AlignmentMode::Global => (0, 0),
        AlignmentMode::Local => ((g + 1) as usize, (e + 1) as usize),
    };

    Ok(SplicedAlignment {
        score,
        genome_start,
        est_start,
        genome_stop: end_g,
        est_stop: end_e,
        path: steps,
    })
}

/// Classify an intron spanning `(origin, stop]` against the mask tags.
fn intron_kind(mask: &Option<MaskView<'_>>, origin: usize, stop: usize) -> IntronKind {
    match mask {
        Some(m) if m.is_acceptor(stop) && m.is_donor(origin) => match m.direction() {
            GeneDirection::Forward => IntronKind::ForwardSpliced,
            GeneDirection::Reverse => IntronKind::ReverseSpliced,
        },
        _ => IntronKind::Plain,
    }
}

fn degenerate() -> SplicedAlignment {
    SplicedAlignment {
        score: 0,
        genome_start: 0,
        est_start: 0,
        genome_stop: 0,
        est_stop: 0,
        path: Vec::new(),
    }
}
