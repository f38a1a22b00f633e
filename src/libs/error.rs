use std::fmt;

use crate::libs::nt::Nt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Rows of an alignment or block have unequal lengths.
    ShapeMismatch {
        /// Name of the offending sequence
        name: String,
        expected: usize,
        got: usize,
    },
    /// A symbol outside the supported alphabet was found.
    InvalidSymbol { row: usize, col: usize, symbol: char },
    /// No usable blocks remain after extraction and clustering.
    EmptyInput,
    /// A zero marginal or joint probability makes the log-odds undefined.
    DegenerateStatistics { i: usize, j: usize },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::ShapeMismatch {
                name,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Sequence \"{}\" has length {}, expected {}; all aligned sequences must have equal lengths",
                    name, got, expected
                )
            }
            MatrixError::InvalidSymbol { row, col, symbol } => {
                write!(
                    f,
                    "Invalid symbol '{}' at row {}, column {}; expected one of A, C, G, T or '-'",
                    symbol, row, col
                )
            }
            MatrixError::EmptyInput => {
                write!(
                    f,
                    "No usable blocks; cannot build a scoring matrix from zero evidence. \
                     Lower --min-len / --min-density or provide more alignments"
                )
            }
            MatrixError::DegenerateStatistics { i, j } => {
                write!(
                    f,
                    "Log-odds undefined for pair ({}, {}): zero joint or marginal probability. \
                     The input carries no observations for this nucleotide pair",
                    Nt::ALL[*i].to_char(),
                    Nt::ALL[*j].to_char()
                )
            }
        }
    }
}

impl std::error::Error for MatrixError {}
