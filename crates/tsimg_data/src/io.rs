//! I/O utilities for reading tables of time series.

use std::path::Path;

use ndarray::Array2;
use tsimg_core::Series;

use crate::error::{DataError, Result};

/// A rectangular table of samples, one series per column.
///
/// Shape is `(n_samples, n_series)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    values: Array2<f64>,
    names: Vec<String>,
}

impl Table {
    /// Create a table from a `(n_samples, n_series)` array and column names.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidShape`] if the table is empty or the
    /// number of names does not match the number of columns.
    pub fn new(values: Array2<f64>, names: Vec<String>) -> Result<Self> {
        let (rows, cols) = values.dim();
        if rows == 0 || cols == 0 {
            return Err(DataError::InvalidShape(format!(
                "table must have at least one sample and one series, got {rows}x{cols}"
            )));
        }
        if names.len() != cols {
            return Err(DataError::InvalidShape(format!(
                "expected {cols} column names, got {}",
                names.len()
            )));
        }
        Ok(Self { values, names })
    }

    /// Create a table whose columns are named by their index.
    pub fn from_array(values: Array2<f64>) -> Result<Self> {
        let names = (0..values.ncols()).map(|i| i.to_string()).collect();
        Self::new(values, names)
    }

    /// Number of samples (rows).
    pub fn n_samples(&self) -> usize {
        self.values.nrows()
    }

    /// Number of series (columns).
    pub fn n_series(&self) -> usize {
        self.values.ncols()
    }

    /// Column names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Raw `(n_samples, n_series)` values.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Extract column `index` as a validated series.
    ///
    /// # Panics
    ///
    /// Panics if `index >= n_series()`.
    pub fn series(&self, index: usize) -> tsimg_core::Result<Series> {
        Series::from_column(self.values.column(index)).map(|s| s.with_name(&self.names[index]))
    }
}

/// Read a table, choosing the reader from the file extension.
///
/// Supported formats:
/// - `.csv`: header row of column names, one numeric column per series
/// - `.npy`: 2D array of shape `(n_samples, n_series)`
/// - `.xlsx` / `.xls`: first worksheet, laid out like the CSV case
///
/// # Errors
///
/// - [`DataError::InputNotFound`] if `path` does not exist
/// - [`DataError::FormatError`] for unknown extensions or unparseable content
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(DataError::InputNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("csv") => read_csv(path),
        Some("npy") => read_npy(path),
        Some("xlsx" | "xls") => read_excel(path),
        other => Err(DataError::FormatError(format!(
            "unsupported table format {:?} for {}",
            other.unwrap_or(""),
            path.display()
        ))),
    }
}

/// Read a table from a NumPy .npy file.
///
/// The file should contain a 2D array of shape `(n_samples, n_series)`;
/// `f32` arrays are widened to `f64`.
pub fn read_npy<P: AsRef<Path>>(path: P) -> Result<Table> {
    use ndarray_npy::ReadNpyExt;

    let file = std::fs::File::open(path.as_ref())?;
    let reader = std::io::BufReader::new(file);

    // Try reading as f64 first
    let values = match Array2::<f64>::read_npy(reader) {
        Ok(arr) => arr,
        Err(e) => {
            // Try reading as f32 and converting
            let file = std::fs::File::open(path.as_ref())?;
            let reader = std::io::BufReader::new(file);
            let arr_f32: Array2<f32> = Array2::<f32>::read_npy(reader)
                .map_err(|_| DataError::FormatError(format!("Failed to read npy file: {}", e)))?;
            arr_f32.mapv(f64::from)
        }
    };

    Table::from_array(values)
}

/// Read a table from a CSV file with a header row.
///
/// Every column is cast to `f64`. Missing or non-numeric cells become NaN,
/// which fails only the affected series when it is extracted.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Table> {
    use polars::prelude::*;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))
        .map_err(|e| DataError::FormatError(format!("Failed to create CSV reader: {}", e)))?
        .finish()
        .map_err(|e| DataError::FormatError(format!("Failed to read CSV: {}", e)))?;

    let n_rows = df.height();
    let n_cols = df.width();

    let mut values = Array2::<f64>::from_elem((n_rows, n_cols), f64::NAN);
    let mut names = Vec::with_capacity(n_cols);

    for (col_idx, column) in df.get_columns().iter().enumerate() {
        names.push(column.name().to_string());

        let cast = column
            .cast(&DataType::Float64)
            .map_err(|e| DataError::FormatError(format!("Failed to cast column: {}", e)))?;
        let cast = cast
            .f64()
            .map_err(|e| DataError::FormatError(format!("Failed to get f64 values: {}", e)))?;

        for (row_idx, val) in cast.into_iter().enumerate() {
            values[[row_idx, col_idx]] = val.unwrap_or(f64::NAN);
        }
    }

    tracing::debug!(
        "Read {} series of {} samples from {}",
        n_cols,
        n_rows,
        path.as_ref().display()
    );

    Table::new(values, names)
}

/// Read a table from the first worksheet of an Excel workbook.
///
/// The first row holds column names; blank headers fall back to the column
/// index. Blank or non-numeric cells become NaN, as in [`read_csv`].
pub fn read_excel<P: AsRef<Path>>(path: P) -> Result<Table> {
    use calamine::{open_workbook_auto, Data, Reader};

    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| DataError::FormatError(format!("Failed to open workbook: {}", e)))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DataError::FormatError(format!("{} has no worksheets", path.display())))?
        .map_err(|e| DataError::FormatError(format!("Failed to read worksheet: {}", e)))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| DataError::InvalidShape(format!("{} is empty", path.display())))?;
    let names: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| match cell.to_string().trim() {
            "" => i.to_string(),
            name => name.to_string(),
        })
        .collect();

    let n_cols = names.len();
    let body: Vec<&[Data]> = rows.collect();
    let values = Array2::from_shape_fn((body.len(), n_cols), |(r, c)| {
        match body[r].get(c) {
            Some(Data::Float(v)) => *v,
            Some(Data::Int(v)) => *v as f64,
            Some(Data::String(text)) => text.trim().parse().unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    });

    tracing::debug!(
        "Read {} series of {} samples from {}",
        n_cols,
        body.len(),
        path.display()
    );

    Table::new(values, names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use tsimg_core::CoreError;

    #[test]
    fn test_table_series_extraction() {
        let table = Table::new(
            array![[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]],
            vec!["a".into(), "b".into()],
        )
        .unwrap();

        assert_eq!(table.n_samples(), 3);
        assert_eq!(table.n_series(), 2);
        let s = table.series(1).unwrap();
        assert_eq!(s.values(), &[4.0, 5.0, 6.0]);
        assert_eq!(s.name(), Some("b"));
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = Table::from_array(Array2::zeros((0, 3))).unwrap_err();
        assert!(matches!(err, DataError::InvalidShape(_)));
    }

    #[test]
    fn test_name_count_must_match() {
        let err = Table::new(array![[1.0, 2.0]], vec!["only".into()]).unwrap_err();
        assert!(matches!(err, DataError::InvalidShape(_)));
    }

    #[test]
    fn test_missing_cell_fails_only_that_series() {
        let table = Table::from_array(array![[1.0, 1.0], [f64::NAN, 2.0]]).unwrap();
        assert_eq!(
            table.series(0).unwrap_err(),
            CoreError::NonFiniteValue { position: 1 }
        );
        assert!(table.series(1).is_ok());
    }

    #[test]
    fn test_missing_input() {
        let err = read_table("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, DataError::InputNotFound(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.parquet");
        std::fs::write(&path, b"not a table").unwrap();
        assert!(matches!(read_table(&path), Err(DataError::FormatError(_))));
    }

    #[test]
    fn test_read_csv_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        std::fs::write(&path, "left,right\n1.5,10\n2.5,20\n3.5,30\n").unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.names(), &["left".to_string(), "right".to_string()]);
        assert_eq!(table.values(), &array![[1.5, 10.0], [2.5, 20.0], [3.5, 30.0]]);
    }

    #[test]
    fn test_read_excel_first_sheet() {
        use rust_xlsxwriter::Workbook;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DataAverage.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "left").unwrap();
        sheet.write_string(0, 1, "right").unwrap();
        for (row, value) in [1.5, 2.5, 3.5].iter().enumerate() {
            sheet.write_number(row as u32 + 1, 0, *value).unwrap();
        }
        sheet.write_number(1, 1, 10.0).unwrap();
        sheet.write_string(2, 1, "n/a").unwrap();
        // row 3 of "right" left blank
        workbook.save(&path).unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.names(), &["left".to_string(), "right".to_string()]);
        assert_eq!(table.n_samples(), 3);
        assert_eq!(table.series(0).unwrap().values(), &[1.5, 2.5, 3.5]);

        let right = table.values().column(1).to_vec();
        assert_eq!(right[0], 10.0);
        assert!(right[1].is_nan());
        assert!(right[2].is_nan());
        assert_eq!(
            table.series(1).unwrap_err(),
            CoreError::NonFiniteValue { position: 1 }
        );
    }

    #[test]
    fn test_corrupt_workbook_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a workbook").unwrap();
        assert!(matches!(read_table(&path), Err(DataError::FormatError(_))));
    }

    #[test]
    fn test_read_npy_round_trip() {
        use ndarray_npy::WriteNpyExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.npy");
        let data = array![[0.0f32, 1.0], [2.0, 3.0], [4.0, 5.0]];
        let file = std::fs::File::create(&path).unwrap();
        data.write_npy(file).unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.n_series(), 2);
        assert_eq!(table.values(), &data.mapv(f64::from));
        assert_eq!(table.names(), &["0".to_string(), "1".to_string()]);
    }
}
