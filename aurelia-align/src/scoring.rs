//! Scoring for EST-to-genome alignment.
//!
//! Provides the residue-pair lookup table ([`ScoringTable`]) and the full
//! scoring context ([`AlignmentScoring`]) that bundles the table with the
//! linear gap penalty and the two intron penalty classes. The context is
//! built once, validated, and threaded by shared reference through every
//! alignment call; nothing in the engine mutates it.

use aurelia_core::{AureliaError, Result};

// ---------------------------------------------------------------------------
// Residue-pair table
// ---------------------------------------------------------------------------

/// Wildcard/gap/unknown markers; these score zero even against themselves.
const WILDCARDS: [u8; 4] = [b'x', b'*', b'?', b'-'];

/// The ambiguous residue; any pair involving it scores the neutral value.
const AMBIGUOUS: u8 = b'n';

/// A symmetric substitution/penalty lookup over every ordered byte pair.
///
/// Case-insensitive: upper- and lowercase forms of a residue share a score.
/// The table is fully materialised at build time, so `score_pair` is a
/// single indexed load with no folding on the hot path.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringTable {
    /// 256x256 flattened score table (row-major).
    scores: Vec<i32>,
}

impl ScoringTable {
    /// Build the table from a match score, a mismatch penalty, a gap
    /// penalty, a neutral score for the ambiguous residue, and the pad
    /// symbol. Penalties are taken as magnitudes and applied negatively.
    ///
    /// Lookup priority per pair: any pad symbol scores `-gap`; any
    /// ambiguous (`N`) symbol scores `neutral`; identical symbols score
    /// `match_score` unless they are wildcard markers (those score 0);
    /// everything else scores `-mismatch`.
    pub fn build(match_score: i32, mismatch: i32, gap: i32, neutral: i32, pad: u8) -> Self {
        let pad = pad.to_ascii_lowercase();
        let mut scores = vec![0i32; 256 * 256];
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                let (fa, fb) = (a.to_ascii_lowercase(), b.to_ascii_lowercase());
                let s = if fa == pad || fb == pad {
                    -gap
                } else if fa == AMBIGUOUS || fb == AMBIGUOUS {
                    neutral
                } else if fa == fb {
                    if WILDCARDS.contains(&fa) {
                        0
                    } else {
                        match_score
                    }
                } else {
                    -mismatch
                };
                scores[a as usize * 256 + b as usize] = s;
            }
        }
        Self { scores }
    }

    /// Score a pair of residues.
    pub fn score_pair(&self, a: u8, b: u8) -> i32 {
        self.scores[a as usize * 256 + b as usize]
    }
}

// ---------------------------------------------------------------------------
// Alignment scoring context
// ---------------------------------------------------------------------------

/// The immutable scoring context for spliced alignment.
///
/// Penalties are stored as non-negative magnitudes and subtracted by the
/// aligner. The splice penalty is charged in place of the intron penalty
/// exactly when an intron's boundary positions carry matching
/// donor/acceptor tags; by convention `intron_penalty > splice_penalty`,
/// though the engine does not enforce that relation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentScoring {
    table: ScoringTable,
    gap_penalty: i32,
    intron_penalty: i32,
    splice_penalty: i32,
}

impl AlignmentScoring {
    /// Create a scoring context, building the residue table with `-` as the
    /// pad symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if `match_score` is not positive or any penalty is
    /// negative.
    pub fn new(
        match_score: i32,
        mismatch: i32,
        gap: i32,
        neutral: i32,
        intron_penalty: i32,
        splice_penalty: i32,
    ) -> Result<Self> {
        if match_score <= 0 {
            return Err(AureliaError::InvalidInput(
                "match_score must be positive".into(),
            ));
        }
        if mismatch < 0 || gap < 0 || intron_penalty < 0 || splice_penalty < 0 {
            return Err(AureliaError::InvalidInput(
                "penalties must be non-negative magnitudes".into(),
            ));
        }
        Ok(Self {
            table: ScoringTable::build(match_score, mismatch, gap, neutral, b'-'),
            gap_penalty: gap,
            intron_penalty,
            splice_penalty,
        })
    }

    /// Wrap a prebuilt [`ScoringTable`] with gap and intron penalties.
    pub fn from_table(table: ScoringTable, gap: i32, intron_penalty: i32, splice_penalty: i32) -> Self {
        Self {
            table,
            gap_penalty: gap,
            intron_penalty,
            splice_penalty,
        }
    }

    /// Default DNA scoring: match 1, mismatch 1, gap 2, neutral 0,
    /// intron 40, splice 20.
    pub fn dna_default() -> Self {
        Self {
            table: ScoringTable::build(1, 1, 2, 0, b'-'),
            gap_penalty: 2,
            intron_penalty: 40,
            splice_penalty: 20,
        }
    }

    /// Score a pair of residues.
    pub fn score_pair(&self, a: u8, b: u8) -> i32 {
        self.table.score_pair(a, b)
    }

    /// Per-base linear gap penalty (magnitude).
    pub fn gap_penalty(&self) -> i32 {
        self.gap_penalty
    }

    /// Penalty for an intron with unmatched boundary motifs (magnitude).
    pub fn intron_penalty(&self) -> i32 {
        self.intron_penalty
    }

    /// Penalty for an intron whose boundaries carry matching donor and
    /// acceptor tags (magnitude).
    pub fn splice_penalty(&self) -> i32 {
        self.splice_penalty
    }
}
