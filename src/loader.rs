/*
 * SPDX-FileCopyrightText: 2024 The concomp Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */
/*!
Matrix loading: converts on-disk graph files into owned CSC buffers that a
[`CscView`] can borrow from.

Two formats are supported:

- a small self-describing binary container (see [`read_binary`]), the
  crate's native on-disk form;
- MatrixMarket coordinate text files (see [`read_matrix_market`]), a common
  interchange format for sparse graphs (e.g. the SuiteSparse collection).

Both readers rebase 1-based indices to 0-based and return the same
[`LoadedMatrix`], so [`crate::dispatch::count_components`] is indifferent to
which format a graph arrived in.
*/

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::csc::CscView;
use crate::error::ConcompError;

/// Magic bytes identifying the binary container format.
const BINARY_MAGIC: &[u8; 8] = b"CONCOMP1";

/// An owned CSC matrix, ready to be viewed through [`CscView`].
#[derive(Debug, Clone)]
pub struct LoadedMatrix {
    /// Number of rows (vertex universe lower bound).
    pub nrows: usize,
    /// Number of columns.
    pub ncols: usize,
    /// Number of stored entries.
    pub nnz: usize,
    /// Column-pointer array, length `ncols + 1`.
    pub col_ptr: Vec<u64>,
    /// Row-index array, length `nnz`.
    pub row_idx: Vec<u32>,
}

impl LoadedMatrix {
    /// Borrows a [`CscView`] over this matrix's buffers.
    pub fn view(&self) -> CscView<'_> {
        CscView::new(self.nrows, self.ncols, self.nnz, &self.col_ptr, &self.row_idx)
            .expect("LoadedMatrix buffers are always internally consistent")
    }
}

/// Loads a matrix from `path`, detecting the format by magic bytes/extension:
/// binary-container files begin with `CONCOMP1`; everything else is parsed
/// as MatrixMarket coordinate text.
pub fn load(path: &Path) -> Result<LoadedMatrix, ConcompError> {
    let mut file = File::open(path).map_err(|source| ConcompError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut prefix = [0u8; 8];
    let n = file.read(&mut prefix).map_err(|source| ConcompError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if n == 8 && &prefix == BINARY_MAGIC {
        read_binary(path, file)
    } else {
        read_matrix_market(path)
    }
}

/// Reads the native binary container: `magic` (8 bytes) followed by
/// `nrows`, `ncols`, `nnz` as little-endian `u64`, then `col_ptr`
/// (`ncols + 1` little-endian `u64`s) and `row_idx` (`nnz` little-endian
/// `u32`s).
fn read_binary(path: &Path, mut file: File) -> Result<LoadedMatrix, ConcompError> {
    let malformed = |reason: &str| ConcompError::MalformedMatrix {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };
    let io = |source: std::io::Error| ConcompError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut header = [0u8; 24];
    file.read_exact(&mut header).map_err(io)?;
    let nrows = u64::from_le_bytes(header[0..8].try_into().unwrap()) as usize;
    let ncols = u64::from_le_bytes(header[8..16].try_into().unwrap()) as usize;
    let nnz = u64::from_le_bytes(header[16..24].try_into().unwrap()) as usize;

    let mut col_ptr = Vec::with_capacity(ncols + 1);
    let mut buf8 = [0u8; 8];
    for _ in 0..=ncols {
        file.read_exact(&mut buf8).map_err(io)?;
        col_ptr.push(u64::from_le_bytes(buf8));
    }

    let mut row_idx = Vec::with_capacity(nnz);
    let mut buf4 = [0u8; 4];
    for _ in 0..nnz {
        file.read_exact(&mut buf4).map_err(io)?;
        row_idx.push(u32::from_le_bytes(buf4));
    }

    if col_ptr.first() != Some(&0) {
        return Err(malformed("col_ptr must start at 0"));
    }
    if col_ptr.last() != Some(&(nnz as u64)) {
        return Err(malformed("col_ptr must end at nnz"));
    }

    Ok(LoadedMatrix {
        nrows,
        ncols,
        nnz,
        col_ptr,
        row_idx,
    })
}

/// Writes a matrix in the native binary container format. Used by tests and
/// the micro-benchmark harness to materialize synthetic graphs on disk.
pub fn write_binary(path: &Path, matrix: &LoadedMatrix) -> Result<(), ConcompError> {
    use std::io::Write;

    let io = |source: std::io::Error| ConcompError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(io)?;
    file.write_all(BINARY_MAGIC).map_err(io)?;
    file.write_all(&(matrix.nrows as u64).to_le_bytes()).map_err(io)?;
    file.write_all(&(matrix.ncols as u64).to_le_bytes()).map_err(io)?;
    file.write_all(&(matrix.nnz as u64).to_le_bytes()).map_err(io)?;
    for &p in &matrix.col_ptr {
        file.write_all(&p.to_le_bytes()).map_err(io)?;
    }
    for &r in &matrix.row_idx {
        file.write_all(&r.to_le_bytes()).map_err(io)?;
    }
    Ok(())
}

/// Reads a MatrixMarket coordinate-format file (`%%MatrixMarket matrix
/// coordinate ...` header, comment lines starting with `%`, a dimension
/// line `nrows ncols nnz`, then `nnz` lines of `row col [value]`, all
/// 1-based). Entries are accumulated per column and sorted by row to build
/// `col_ptr`/`row_idx`; the input need not already be column-sorted.
fn read_matrix_market(path: &Path) -> Result<LoadedMatrix, ConcompError> {
    let file = File::open(path).map_err(|source| ConcompError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let malformed = |reason: String| ConcompError::MalformedMatrix {
        path: path.to_path_buf(),
        reason,
    };

    let mut dims: Option<(usize, usize, usize)> = None;
    let mut columns: Vec<Vec<u32>> = Vec::new();
    let mut nrows = 0usize;

    for line in reader.lines() {
        let line = line.map_err(|source| ConcompError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        if dims.is_none() {
            let mut parts = line.split_whitespace();
            let r: usize = parts
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| malformed("missing row count in dimension line".into()))?;
            let c: usize = parts
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| malformed("missing column count in dimension line".into()))?;
            let nz: usize = parts
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| malformed("missing nnz in dimension line".into()))?;
            dims = Some((r, c, nz));
            nrows = r;
            columns = vec![Vec::new(); c];
            continue;
        }

        let mut parts = line.split_whitespace();
        let row: usize = parts
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| malformed("malformed entry row index".into()))?;
        let col: usize = parts
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| malformed("malformed entry column index".into()))?;

        if row == 0 || col == 0 {
            return Err(malformed("MatrixMarket indices are 1-based; found 0".into()));
        }
        let (row, col) = (row - 1, col - 1);
        if col >= columns.len() || row >= nrows {
            return Err(malformed("entry index out of declared bounds".into()));
        }
        columns[col].push(row as u32);
    }

    let (_, ncols, declared_nnz) = dims.ok_or_else(|| malformed("missing dimension line".into()))?;

    let mut col_ptr = Vec::with_capacity(ncols + 1);
    let mut row_idx = Vec::new();
    col_ptr.push(0u64);
    for mut rows in columns {
        rows.sort_unstable();
        row_idx.extend(rows);
        col_ptr.push(row_idx.len() as u64);
    }

    if row_idx.len() != declared_nnz {
        return Err(malformed(format!(
            "declared nnz {} does not match {} parsed entries",
            declared_nnz,
            row_idx.len()
        )));
    }

    Ok(LoadedMatrix {
        nrows,
        ncols,
        nnz: row_idx.len(),
        col_ptr,
        row_idx,
    })
}
