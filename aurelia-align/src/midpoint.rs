//! Midpoint location for the linear-space recursion.
//!
//! A single forward pass of the same recursion the direct aligner runs, in
//! global mode with no backtracking matrix. Instead of directions, every
//! cell carries the genome-row pair through which the best path into it
//! crossed a fixed EST column: `left` is the last row the path occupies in
//! column `middle`, `right` the first row in column `middle + 1`. A
//! diagonal crossing leaves `right == left + 1`; an EST-gap crossing
//! leaves `right == left`. The pair for the bottom-right cell tells the
//! driver where to split the genome, and the crossing kind whether an
//! explicit EST-gap step belongs at the seam.
//!
//! The crossing pairs ride the same two rolled rows as the scores, with a
//! snapshot taken beside the best-intron bookkeeping so intron jumps
//! propagate the interval of their origin cell.

use aurelia_core::{AureliaError, Result};

use crate::direct::BoundaryMode;
use crate::scoring::AlignmentScoring;
use crate::splice::MaskView;

const NEG_INF: i32 = i32::MIN / 2;

/// Crossing pairs start out unset; a set pair can hold the boundary row -1.
const UNSET: isize = isize::MIN;

/// Where the optimal global path crosses the chosen EST column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Midpoint {
    /// Last genome row of the path in column `middle` (-1 for the boundary).
    pub left: isize,
    /// First genome row of the path in column `middle + 1`.
    pub right: isize,
    /// Score of the optimal global alignment, for cross-checking.
    pub score: i32,
}

/// Run the global recursion and report where the optimal path crosses EST
/// column `middle`, together with the optimal score.
///
/// # Errors
///
/// Returns `InvalidInput` if the genome is empty, the splice mask length
/// does not match the genome, or `middle + 2 > est.len()` (the crossing
/// column must exist).
pub fn locate_midpoint(
    est: &[u8],
    genome: &[u8],
    scoring: &AlignmentScoring,
    mask: Option<MaskView<'_>>,
    middle: usize,
    boundary: BoundaryMode,
) -> Result<Midpoint> {
    if let Some(m) = &mask {
        if m.len() != genome.len() {
            return Err(AureliaError::InvalidInput(format!(
                "splice mask length {} does not match genome length {}",
                m.len(),
                genome.len()
            )));
        }
    }
    if genome.is_empty() {
        return Err(AureliaError::InvalidInput(
            "cannot locate a midpoint in an empty genome".into(),
        ));
    }
    if middle + 2 > est.len() {
        return Err(AureliaError::InvalidInput(format!(
            "middle row {} leaves no crossing column in an EST of length {}",
            middle,
            est.len()
        )));
    }

    let g_len = genome.len();
    let e_len = est.len();
    let cols = e_len + 1;
    let gap = scoring.gap_penalty();
    let cross = middle + 1;

    let mut prev = vec![NEG_INF; cols];
    let mut curr = vec![NEG_INF; cols];
    // crossing pairs, rolled in lockstep with the score rows
    let mut prev_l = vec![UNSET; cols];
    let mut prev_r = vec![UNSET; cols];
    let mut curr_l = vec![UNSET; cols];
    let mut curr_r = vec![UNSET; cols];
    let mut best_intron = vec![NEG_INF; cols];
    let mut origins = vec![0u32; cols];
    let mut intron_l = vec![UNSET; cols];
    let mut intron_r = vec![UNSET; cols];

    // Boundary genome row (-1).
    prev[0] = 0;
    for e in 0..e_len {
        match boundary {
            BoundaryMode::GapStart => {
                prev[e + 1] = -gap * (e as i32 + 1);
                if e >= cross {
                    // a path still on the boundary row has crossed at row -1
                    prev_l[e + 1] = -1;
                    prev_r[e + 1] = -1;
                }
            }
            BoundaryMode::DiagonalStart => prev[e + 1] = NEG_INF,
        }
    }

    for g in 0..g_len {
        curr[0] = match boundary {
            BoundaryMode::GapStart => -gap * (g as i32 + 1),
            BoundaryMode::DiagonalStart => NEG_INF,
        };
        curr_l[0] = UNSET;
        curr_r[0] = UNSET;
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

            // Same fixed priority as the direct aligner.
            let (mut best, l, r) = if diagonal >= delete_est
                && diagonal >= delete_genome
                && diagonal >= intron
            {
                if e == cross {
                    (diagonal, g as isize - 1, g as isize)
                } else {
                    (diagonal, prev_l[idx - 1], prev_r[idx - 1])
                }
            } else if delete_est >= delete_genome && delete_est >= intron {
                if e == cross {
                    (delete_est, g as isize, g as isize)
                } else {
                    (delete_est, curr_l[idx - 1], curr_r[idx - 1])
                }
            } else if delete_genome >= intron {
                (delete_genome, prev_l[idx], prev_r[idx])
            } else {
                (intron, intron_l[idx], intron_r[idx])
            };

            if best < NEG_INF {
                best = NEG_INF;
            }
            curr[idx] = best;
            curr_l[idx] = l;
            curr_r[idx] = r;

            if best > best_intron[idx] {
                best_intron[idx] = best;
                origins[idx] = g as u32;
                intron_l[idx] = l;
                intron_r[idx] = r;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
        std::mem::swap(&mut prev_l, &mut curr_l);
        std::mem::swap(&mut prev_r, &mut curr_r);
    }

    let (left, right, score) = (prev_l[e_len], prev_r[e_len], prev[e_len]);
    assert!(
        left != UNSET && right != UNSET,
        "optimal path never crossed EST column {}",
        cross
    );
    Ok(Midpoint { left, right, score })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direct::{direct_align, DEFAULT_RECOVERY_LIMIT};
    use crate::splice::find_splice_sites;
    use crate::types::{AlignmentMode, GeneDirection};

    fn dna() -> AlignmentScoring {
        AlignmentScoring::dna_default()
    }

    #[test]
    fn diagonal_crossing_on_identical_sequences() {
        let seq = b"ACGTACGT";
        let mid = locate_midpoint(seq, seq, &dna(), None, 4, BoundaryMode::GapStart).unwrap();
        assert_eq!(mid.left, 4);
        assert_eq!(mid.right, 5);
        assert_eq!(mid.score, 8);
    }

    #[test]
    fn est_gap_crossing() {
        // the optimal path deletes est[3], exactly the crossing column
        let mid =
            locate_midpoint(b"AATCT", b"AATT", &dna(), None, 2, BoundaryMode::GapStart).unwrap();
        assert_eq!(mid.left, 2);
        assert_eq!(mid.right, 2);
        assert_eq!(mid.score, 2);
    }

    #[test]
    fn crossing_after_a_spliced_intron() {
        let genome = b"AAAAAGTAAAAAAAAAAAGAAAAA";
        let est = b"AAAAAAAAAA";
        let scoring = AlignmentScoring::new(1, 1, 2, 0, 5, 2).unwrap();
        let mask = find_splice_sites(genome, GeneDirection::Forward);
        let mid = locate_midpoint(
            est,
            genome,
            &scoring,
            Some(mask.as_view()),
            5,
            BoundaryMode::GapStart,
        )
        .unwrap();
        // five exon bases, a 14-base intron, then the crossing diagonal
        assert_eq!(mid.left, 19);
        assert_eq!(mid.right, 20);
        assert_eq!(mid.score, 8);
    }

    #[test]
    fn score_agrees_with_direct_aligner() {
        let est = b"ACGTTGCAACGT";
        let genome = b"ACGTAGTTGCAAGGACGT";
        for middle in 1..est.len() - 1 {
            let mid =
                locate_midpoint(est, genome, &dna(), None, middle, BoundaryMode::GapStart).unwrap();
            let direct = direct_align(
                est,
                genome,
                &dna(),
                None,
                AlignmentMode::Global,
                BoundaryMode::GapStart,
                false,
                DEFAULT_RECOVERY_LIMIT,
            )
            .unwrap();
            assert_eq!(mid.score, direct.score, "middle={}", middle);
            assert!(
                mid.right == mid.left || mid.right == mid.left + 1,
                "crossing pair ({}, {}) at middle={}",
                mid.left,
                mid.right,
                middle
            );
        }
    }

    #[test]
    fn boundary_row_crossing_is_minus_one() {
        // genome shorter than the EST prefix: with opening gaps charged, an
        // all-gap prefix can cross the middle column on the boundary row
        let mid =
            locate_midpoint(b"TTTTA", b"A", &dna(), None, 2, BoundaryMode::GapStart).unwrap();
        assert!(mid.left >= -1);
        assert!(mid.right == mid.left || mid.right == mid.left + 1);
    }

    #[test]
    fn middle_without_crossing_column_is_invalid() {
        let err =
            locate_midpoint(b"ACGT", b"ACGT", &dna(), None, 3, BoundaryMode::GapStart).unwrap_err();
        assert!(matches!(err, AureliaError::InvalidInput(_)));
    }
}
