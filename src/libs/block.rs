use std::fmt;

use crate::libs::alignment::Alignment;
use crate::libs::error::MatrixError;
use crate::libs::nt::{Nt, GAP};

/// A gap-free rectangular slice of an alignment.
///
/// Carries the full row count of its source alignment over a contiguous
/// column range; no back-reference to the source is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    rows: Vec<Vec<u8>>,
}

impl Block {
    /// Builds a block from raw rows, validating equal lengths and a pure
    /// A/C/G/T content. Gaps are rejected here; the statistics stages have
    /// no gap semantics.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, MatrixError> {
        let expected = rows.first().map(|r| r.len()).unwrap_or(0);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(MatrixError::ShapeMismatch {
                    name: i.to_string(),
                    expected,
                    got: row.len(),
                });
            }
            for (c, &b) in row.iter().enumerate() {
                if Nt::from_u8(b).is_none() {
                    return Err(MatrixError::InvalidSymbol {
                        row: i,
                        col: c,
                        symbol: b as char,
                    });
                }
            }
        }

        Ok(Block { rows })
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", String::from_utf8_lossy(row))?;
        }
        Ok(())
    }
}

/// Merges column indices into maximal half-open runs `[start, end)`.
///
/// Input order is not trusted; indices are sorted and de-duplicated first.
pub fn contiguous_intervals(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut idxs = indices.to_vec();
    idxs.sort_unstable();
    idxs.dedup();

    let mut runs: Vec<(usize, usize)> = vec![];
    for c in idxs {
        match runs.last_mut() {
            Some(run) if run.1 == c => run.1 = c + 1,
            _ => runs.push((c, c + 1)),
        }
    }

    runs
}

/// Extracts dense, gap-free blocks from an alignment.
///
/// A column is dense when the fraction of non-gap rows is `>=`
/// `min_column_density`. Dense columns are merged into maximal contiguous
/// runs; runs shorter than `min_block_len` are discarded, as is any run
/// whose slice still contains a gap. An empty or fully gapped alignment
/// yields an empty result.
pub fn extract_blocks(
    alignment: &Alignment,
    min_block_len: usize,
    min_column_density: f64,
) -> Vec<Block> {
    let n_rows = alignment.n_rows();
    if n_rows == 0 {
        return vec![];
    }

    let dense: Vec<usize> = (0..alignment.n_cols())
        .filter(|&c| {
            let non_gap = alignment.rows().iter().filter(|row| row[c] != GAP).count();
            non_gap as f64 / n_rows as f64 >= min_column_density
        })
        .collect();

    contiguous_intervals(&dense)
        .iter()
        .filter(|(start, end)| end - start >= min_block_len)
        .filter_map(|&(start, end)| {
            let rows: Vec<Vec<u8>> = alignment
                .rows()
                .iter()
                .map(|row| row[start..end].to_vec())
                .collect();
            // Density only guarantees mostly populated columns; statistics
            // need zero gaps.
            if rows.iter().any(|row| row.contains(&GAP)) {
                None
            } else {
                Some(Block { rows })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aln(rows: &[&str]) -> Alignment {
        let names = (0..rows.len()).map(|i| format!("s{}", i)).collect();
        let rows = rows.iter().map(|r| r.as_bytes().to_vec()).collect();
        Alignment::new(names, rows).unwrap()
    }

    #[test]
    fn test_contiguous_intervals() {
        assert_eq!(contiguous_intervals(&[]), vec![]);
        assert_eq!(contiguous_intervals(&[3]), vec![(3, 4)]);
        assert_eq!(
            contiguous_intervals(&[0, 1, 2, 5, 6, 9]),
            vec![(0, 3), (5, 7), (9, 10)]
        );
        // unsorted, duplicated input
        assert_eq!(
            contiguous_intervals(&[6, 0, 1, 5, 1, 2]),
            vec![(0, 3), (5, 7)]
        );
    }

    #[test]
    fn test_extract_basic() {
        let alignment = aln(&[
            "--ACGTA-CGT",
            "--ACGTA-CGT",
            "--TGCAT-GCA",
        ]);
        let blocks = extract_blocks(&alignment, 3, 1.0);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].n_rows(), 3);
        assert_eq!(blocks[0].n_cols(), 5);
        assert_eq!(blocks[1].n_cols(), 3);
        assert_eq!(blocks[0].rows()[2], b"TGCAT".to_vec());
    }

    #[test]
    fn test_extract_all_gap() {
        let alignment = aln(&["----", "----"]);
        assert!(extract_blocks(&alignment, 1, 0.5).is_empty());
    }

    #[test]
    fn test_extract_empty() {
        let alignment = Alignment::new(vec![], vec![]).unwrap();
        assert!(extract_blocks(&alignment, 1, 0.5).is_empty());
    }

    #[test]
    fn test_length_filter() {
        let alignment = aln(&["ACG--ACGTT", "ACG--ACGTT"]);
        let blocks = extract_blocks(&alignment, 4, 1.0);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].n_cols(), 5);
    }

    #[test]
    fn test_purity_filter() {
        // The gapped column passes a 0.5 density test but poisons the run.
        let alignment = aln(&["ACGTA", "AC-TA", "ACGTA", "ACGTA"]);
        assert!(extract_blocks(&alignment, 3, 0.5).is_empty());

        // A stricter density test breaks the run at the gap instead.
        let blocks = extract_blocks(&alignment, 2, 1.0);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].n_cols(), 2);
    }

    #[test]
    fn test_density_boundary() {
        // Exactly at threshold is kept.
        let alignment = aln(&["AAA", "AAA", "AA-", "AA-"]);
        let blocks = extract_blocks(&alignment, 3, 0.5);
        assert!(blocks.is_empty()); // run of 3 kept by density, killed by purity

        let blocks = extract_blocks(&alignment, 2, 0.75);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].n_cols(), 2);
    }

    #[test]
    fn test_deterministic() {
        let alignment = aln(&["-ACGT-AC", "-ACGT-AC", "-TGCA-GT"]);
        let a = extract_blocks(&alignment, 2, 1.0);
        let b = extract_blocks(&alignment, 2, 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_rows_rejects_gap() {
        assert!(Block::from_rows(vec![b"AC-T".to_vec()]).is_err());
        assert!(Block::from_rows(vec![b"ACGT".to_vec(), b"ACG".to_vec()]).is_err());
        assert!(Block::from_rows(vec![b"ACGT".to_vec(), b"TGCA".to_vec()]).is_ok());
    }
}
