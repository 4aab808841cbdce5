use std::fmt;

use crate::error::{EngineError, Result};

/// Remaining cell values, row-major. 0 means empty or already captured.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Grid {
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        if rows.is_empty() || cols == 0 { return Err(EngineError::InvalidGrid("empty grid".into())); }
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(EngineError::InvalidGrid(format!("row {} has {} cells, expected {}", i, row.len(), cols)));
            }
            if let Some(&v) = row.iter().find(|&&v| v > 9) {
                return Err(EngineError::InvalidGrid(format!("cell value {} out of range 0..=9", v)));
            }
            cells.extend_from_slice(row);
        }
        Ok(Self { rows: rows.len(), cols, cells })
    }

    /// Parses digit strings such as `"12300"`, one per row.
    pub fn parse_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let mut parsed = Vec::with_capacity(rows.len());
        for row in rows {
            let digits: Option<Vec<u8>> = row.as_ref().chars().map(|ch| ch.to_digit(10).map(|d| d as u8)).collect();
            match digits {
                Some(d) => parsed.push(d),
                None => return Err(EngineError::InvalidGrid(format!("non-digit in row {:?}", row.as_ref()))),
            }
        }
        Self::from_rows(&parsed)
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> u8 { self.cells[r * self.cols + c] }

    #[inline]
    pub(crate) fn set(&mut self, r: usize, c: usize, v: u8) { self.cells[r * self.cols + c] = v; }

    pub fn sum(&self) -> u32 { self.cells.iter().map(|&v| v as u32).sum() }

    pub fn nonzero_count(&self) -> usize { self.cells.iter().filter(|&&v| v != 0).count() }

    pub fn to_rows(&self) -> Vec<Vec<u8>> { self.cells.chunks(self.cols).map(|c| c.to_vec()).collect() }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for &v in row { write!(f, "{}", v)?; }
            writeln!(f)?;
        }
        Ok(())
    }
}
