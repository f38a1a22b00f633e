//! BLOSUM-style matrix construction from gap-free alignment blocks.
//!
//! The pipeline mirrors the classical BLOSUM construction on a 4-symbol
//! alphabet: cluster near-identical rows per block, accumulate pairwise
//! nucleotide co-occurrence mass between distinct clusters, normalize to a
//! joint probability matrix, and convert to half-bit log-odds scores.

use std::fmt;

use log::warn;
use rayon::prelude::*;

use crate::libs::block::Block;
use crate::libs::cluster::{self, Profile};
use crate::libs::error::MatrixError;
use crate::libs::nt::Nt;

/// Accumulated pairwise nucleotide co-occurrence mass, lower triangle plus
/// diagonal; strictly-upper entries are zero.
pub type CountingTable = [[f64; 4]; 4];

/// A symmetric 4x4 integer substitution scoring matrix in A, C, G, T order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringMatrix {
    scores: [[i32; 4]; 4],
}

impl ScoringMatrix {
    pub fn get(&self, i: Nt, j: Nt) -> i32 {
        self.scores[i as usize][j as usize]
    }

    pub fn scores(&self) -> &[[i32; 4]; 4] {
        &self.scores
    }
}

/// Renders the matrix in the textual format consumed by external alignment
/// tools: a symbol header line, then one row of integer scores per symbol.
impl fmt::Display for ScoringMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  A C G T")?;
        for (i, nt) in Nt::ALL.iter().enumerate() {
            writeln!(
                f,
                "{} {} {} {} {}",
                nt.to_char(),
                self.scores[i][0],
                self.scores[i][1],
                self.scores[i][2],
                self.scores[i][3]
            )?;
        }
        Ok(())
    }
}

/// Result of a successful build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOutcome {
    pub matrix: ScoringMatrix,
    /// Blocks that contributed statistics.
    pub n_counted: usize,
    /// Blocks skipped because all rows collapsed into one cluster.
    pub n_skipped: usize,
}

/// Builds the scoring matrix from blocks clustered at threshold `x`.
///
/// Clustering and counting run per block on the rayon pool; the reduction
/// then sums the per-block tables in input order, so results are
/// bit-identical across runs and pool sizes. Blocks that collapse into a
/// single cluster carry no pairwise signal and are skipped with a warning.
pub fn build(blocks: &[Block], x: f64) -> Result<BuildOutcome, MatrixError> {
    let tables: Vec<Option<CountingTable>> = blocks
        .par_iter()
        .map(|block| block_counting_table(block, x))
        .collect::<Result<_, _>>()?;

    let mut global = [[0.0f64; 4]; 4];
    let mut n_counted = 0;
    let mut n_skipped = 0;
    for table in &tables {
        match table {
            Some(t) => {
                n_counted += 1;
                for i in 0..4 {
                    for j in 0..4 {
                        global[i][j] += t[i][j];
                    }
                }
            }
            None => n_skipped += 1,
        }
    }

    if n_counted == 0 {
        return Err(MatrixError::EmptyInput);
    }

    let q = compute_q(&global);
    let p = compute_p(&q);
    let scores = log_odds(&q, &p)?;

    Ok(BuildOutcome {
        matrix: ScoringMatrix { scores },
        n_counted,
        n_skipped,
    })
}

/// Clustering plus counting for one block. `None` marks a degenerate block
/// whose rows all clustered together.
fn block_counting_table(block: &Block, x: f64) -> Result<Option<CountingTable>, MatrixError> {
    let clusters = cluster::cluster_rows(block, x);
    if clusters.len() < 2 {
        warn!(
            "block of {} rows x {} columns collapsed into one cluster, skipping",
            block.n_rows(),
            block.n_cols()
        );
        return Ok(None);
    }

    let profiles = cluster::cluster_profiles(block, &clusters)?;
    Ok(Some(counting_table(&profiles)))
}

/// Accumulates co-occurrence mass over every unordered pair of distinct
/// clusters: `T = sum_{i<j} P_i^T . P_j`, contracted over columns. The sum
/// is symmetrized with `T + T^T`, the diagonal halved to undo the implicit
/// self-pair double count, and the strictly-upper triangle zeroed.
pub fn counting_table(profiles: &[Profile]) -> CountingTable {
    let mut t = [[0.0f64; 4]; 4];
    for i in 0..profiles.len() {
        for j in 0..i {
            for (ci, cj) in profiles[i].cols.iter().zip(profiles[j].cols.iter()) {
                for a in 0..4 {
                    for b in 0..4 {
                        t[a][b] += ci[a] * cj[b];
                    }
                }
            }
        }
    }

    let mut table = [[0.0f64; 4]; 4];
    for a in 0..4 {
        for b in 0..4 {
            table[a][b] = t[a][b] + t[b][a];
        }
    }
    for a in 0..4 {
        table[a][a] /= 2.0;
        for b in (a + 1)..4 {
            table[a][b] = 0.0;
        }
    }

    table
}

/// Joint probability matrix: the counting table normalized by its total
/// mass, mirrored to full symmetry.
fn compute_q(table: &CountingTable) -> [[f64; 4]; 4] {
    let total: f64 = table.iter().flatten().sum();

    let mut q = [[0.0f64; 4]; 4];
    for i in 0..4 {
        for j in 0..=i {
            q[i][j] = table[i][j] / total;
            q[j][i] = q[i][j];
        }
    }

    q
}

/// Marginal nucleotide frequencies, splitting off-diagonal joint mass
/// between the two symbols.
fn compute_p(q: &[[f64; 4]; 4]) -> [f64; 4] {
    let mut p = [0.0f64; 4];
    for i in 0..4 {
        p[i] = q[i][i];
        for j in 0..4 {
            if j != i {
                p[i] += q[i][j] / 2.0;
            }
        }
    }

    p
}

/// One half-bit log-odds score. The expected frequency under independence
/// is `p_i^2` on the diagonal and `2 p_i p_j` off it (an unordered pair is
/// observed in either orientation).
fn score_entry(q: f64, e: f64, i: usize, j: usize) -> Result<i32, MatrixError> {
    if q <= 0.0 || e <= 0.0 {
        return Err(MatrixError::DegenerateStatistics { i, j });
    }

    Ok((2.0 * (q / e).log2()).round() as i32)
}

fn log_odds(q: &[[f64; 4]; 4], p: &[f64; 4]) -> Result<[[i32; 4]; 4], MatrixError> {
    let mut scores = [[0i32; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            let e = if i == j {
                p[i] * p[i]
            } else {
                2.0 * p[i] * p[j]
            };
            scores[i][j] = score_entry(q[i][j], e, i, j)?;
        }
    }

    Ok(scores)
}
