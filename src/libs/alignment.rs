use std::io::BufRead;

use crate::libs::error::MatrixError;
use crate::libs::nt::{Nt, GAP};

/// An in-memory multiple sequence alignment.
///
/// Rows are sequences over `{A, C, G, T, -}`, all of equal length.
/// Lowercase bases are normalized on construction. The grid is read-only
/// once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    names: Vec<String>,
    rows: Vec<Vec<u8>>,
}

impl Alignment {
    /// Builds an alignment, failing fast on ragged rows or foreign symbols.
    pub fn new(names: Vec<String>, rows: Vec<Vec<u8>>) -> Result<Self, MatrixError> {
        let mut rows = rows;
        let expected = rows.first().map(|r| r.len()).unwrap_or(0);

        for (i, row) in rows.iter_mut().enumerate() {
            if row.len() != expected {
                return Err(MatrixError::ShapeMismatch {
                    name: names.get(i).cloned().unwrap_or_else(|| i.to_string()),
                    expected,
                    got: row.len(),
                });
            }
            for (c, b) in row.iter_mut().enumerate() {
                *b = b.to_ascii_uppercase();
                if *b != GAP && Nt::from_u8(*b).is_none() {
                    return Err(MatrixError::InvalidSymbol {
                        row: i,
                        col: c,
                        symbol: *b as char,
                    });
                }
            }
        }

        Ok(Alignment { names, rows })
    }

    /// Reads all records of an aligned FASTA stream into one alignment.
    pub fn from_fasta(reader: &mut dyn BufRead) -> anyhow::Result<Self> {
        let mut fa_in = noodles_fasta::io::Reader::new(reader);

        let mut names = vec![];
        let mut rows = vec![];
        for result in fa_in.records() {
            let record = result?;
            names.push(String::from_utf8(record.name().into())?);
            rows.push(record.sequence().get(..).unwrap().to_vec());
        }

        Ok(Alignment::new(names, rows)?)
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }
}
