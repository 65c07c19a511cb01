//! Reading and writing delimited text files.
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use itertools::Itertools;
use tracing::debug;

use crate::datatypes::{
    AnyValue, BooleanArray, DataType, Float64Array, Int64Array, Utf8Array,
};
use crate::error::{AvocetError, Result};
use crate::frame::ser::{SerReader, SerWriter};
use crate::frame::DataFrame;
use crate::series::Series;

// Empty fields and these markers parse as missing.
fn is_missing(field: &str) -> bool {
    field.is_empty() || field == "NA" || field == "null"
}

/// Creates a DataFrame after reading a csv.
///
/// # Example
///
/// ```no_run
/// use avocet::prelude::*;
///
/// fn example() -> Result<DataFrame> {
///     CsvReader::from_path("crime_stats.csv")?
///         .infer_schema(Some(100))
///         .has_header(true)
///         .finish()
/// }
/// ```
pub struct CsvReader<R: Read> {
    /// File or stream object.
    reader: R,
    has_header: bool,
    delimiter: u8,
    /// Number of records scanned to resolve column dtypes.
    infer_schema_length: Option<usize>,
}

impl<R: Read> SerReader<R> for CsvReader<R> {
    fn new(reader: R) -> Self {
        CsvReader {
            reader,
            has_header: true,
            delimiter: b',',
            infer_schema_length: Some(100),
        }
    }

    fn finish(self) -> Result<DataFrame> {
        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(self.has_header)
            .delimiter(self.delimiter)
            .from_reader(self.reader);

        let headers: Vec<String> = if self.has_header {
            reader.headers()?.iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        };

        let mut records = Vec::new();
        for record in reader.records() {
            records.push(record?);
        }

        let width = records
            .first()
            .map(|r| r.len())
            .unwrap_or(headers.len());
        let names: Vec<String> = if self.has_header {
            headers
        } else {
            (0..width).map(|i| format!("column_{}", i + 1)).collect_vec()
        };

        let mut columns = Vec::with_capacity(names.len());
        for (col, name) in names.iter().enumerate() {
            let dtype = infer_dtype(&records, col, self.infer_schema_length);
            columns.push(parse_column(name, &records, col, dtype)?);
        }
        let df = DataFrame::new(columns)?;
        debug!(rows = df.height(), columns = df.width(), "read csv");
        Ok(df)
    }
}

impl CsvReader<File> {
    /// Create a new DataFrame reader from a file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> CsvReader<R> {
    /// Set whether the file has a header row.
    pub fn has_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Set the column delimiter as a byte character.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the number of records scanned to infer the schema; `None` scans
    /// the whole file.
    pub fn infer_schema(mut self, max_records: Option<usize>) -> Self {
        self.infer_schema_length = max_records;
        self
    }
}

// Narrowest dtype every scanned non-missing field parses as:
// Int64 -> Float64 -> Boolean -> Utf8. All-missing columns fall back to Utf8.
fn infer_dtype(records: &[::csv::StringRecord], col: usize, limit: Option<usize>) -> DataType {
    let scan = records
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .filter_map(|r| r.get(col))
        .filter(|f| !is_missing(f));

    let mut any = false;
    let mut int = true;
    let mut float = true;
    let mut boolean = true;
    for field in scan {
        any = true;
        int = int && field.parse::<i64>().is_ok();
        float = float && field.parse::<f64>().is_ok();
        boolean = boolean && matches!(field, "true" | "false");
        if !int && !float && !boolean {
            break;
        }
    }
    match (any, int, float, boolean) {
        (false, ..) => DataType::Utf8,
        (true, true, _, _) => DataType::Int64,
        (true, _, true, _) => DataType::Float64,
        (true, _, _, true) => DataType::Boolean,
        _ => DataType::Utf8,
    }
}

fn parse_column(
    name: &str,
    records: &[::csv::StringRecord],
    col: usize,
    dtype: DataType,
) -> Result<Series> {
    let fields = records.iter().map(|r| r.get(col).unwrap_or(""));
    let parse_err = |field: &str| {
        AvocetError::ComputeError(
            format!(
                "could not parse {:?} in column {} as {}",
                field, name, dtype
            )
            .into(),
        )
    };
    let series = match dtype {
        DataType::Int64 => {
            let mut values = Vec::with_capacity(records.len());
            for field in fields {
                values.push(if is_missing(field) {
                    None
                } else {
                    Some(field.parse::<i64>().map_err(|_| parse_err(field))?)
                });
            }
            Series::Int64(Int64Array::from_vec(name, values))
        }
        DataType::Float64 => {
            let mut values = Vec::with_capacity(records.len());
            for field in fields {
                values.push(if is_missing(field) {
                    None
                } else {
                    Some(field.parse::<f64>().map_err(|_| parse_err(field))?)
                });
            }
            Series::Float64(Float64Array::from_vec(name, values))
        }
        DataType::Boolean => {
            let mut values = Vec::with_capacity(records.len());
            for field in fields {
                values.push(match field {
                    _ if is_missing(field) => None,
                    "true" => Some(true),
                    "false" => Some(false),
                    _ => return Err(parse_err(field)),
                });
            }
            Series::Boolean(BooleanArray::from_vec(name, values))
        }
        DataType::Utf8 => {
            let values = fields
                .map(|f| {
                    if is_missing(f) {
                        None
                    } else {
                        Some(f.to_string())
                    }
                })
                .collect();
            Series::Utf8(Utf8Array::from_vec(name, values))
        }
    };
    Ok(series)
}

/// Write a DataFrame to csv.
///
/// # Example
///
/// ```no_run
/// use std::fs::File;
///
/// use avocet::prelude::*;
///
/// fn example(df: &DataFrame) -> Result<()> {
///     let mut file = File::create("example.csv")?;
///     CsvWriter::new(&mut file)
///         .has_headers(true)
///         .with_delimiter(b',')
///         .finish(df)
/// }
/// ```
pub struct CsvWriter<'a, W: Write> {
    /// File or stream handler.
    buffer: &'a mut W,
    has_headers: bool,
    delimiter: u8,
}

impl<'a, W: Write> SerWriter<'a, W> for CsvWriter<'a, W> {
    fn new(buffer: &'a mut W) -> Self {
        CsvWriter {
            buffer,
            has_headers: true,
            delimiter: b',',
        }
    }

    fn finish(self, df: &DataFrame) -> Result<()> {
        let mut writer = ::csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(&mut *self.buffer);
        if self.has_headers {
            writer.write_record(df.get_column_names())?;
        }
        let mut record = Vec::with_capacity(df.width());
        for row in 0..df.height() {
            record.clear();
            for series in df.get_columns() {
                record.push(match series.get(row) {
                    AnyValue::Null => String::new(),
                    value => value.to_string(),
                });
            }
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl<'a, W: Write> CsvWriter<'a, W> {
    /// Set whether to write a header row.
    pub fn has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Set the column delimiter as a byte character.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use crate::prelude::*;

    #[test]
    fn read_csv() {
        let s = r#"offense,neighborhood,count,rate,cleared
Burglary,Irvington,12,0.8,true
Theft,Lents,40,2.5,false
Assault,Irvington,NA,0.3,true
"#;
        let df = CsvReader::new(Cursor::new(s))
            .infer_schema(Some(100))
            .has_header(true)
            .finish()
            .unwrap();

        assert_eq!(df.shape(), (3, 5));
        assert_eq!(
            df.dtypes(),
            vec![
                DataType::Utf8,
                DataType::Utf8,
                DataType::Int64,
                DataType::Float64,
                DataType::Boolean
            ]
        );
        assert_eq!(df.column("count").unwrap().null_count(), 1);
        assert_eq!(df.column("count").unwrap().get(1), AnyValue::Int64(40));
    }

    #[test]
    fn read_csv_without_header() {
        let s = "1;2\n3;4\n";
        let df = CsvReader::new(Cursor::new(s))
            .has_header(false)
            .with_delimiter(b';')
            .finish()
            .unwrap();
        assert_eq!(df.get_column_names(), vec!["column_1", "column_2"]);
        assert_eq!(df.column("column_2").unwrap().get(1), AnyValue::Int64(4));
    }

    #[test]
    fn inference_falls_back_to_utf8() {
        let s = "a\n1\nx\n";
        let df = CsvReader::new(Cursor::new(s)).finish().unwrap();
        assert_eq!(df.dtypes(), vec![DataType::Utf8]);
    }

    #[test]
    fn write_csv() {
        let df = df! {
            "days" => [0, 1],
            "temp" => [Some(22.1), None]
        }
        .unwrap();
        let mut buf: Vec<u8> = Vec::new();
        CsvWriter::new(&mut buf)
            .has_headers(true)
            .finish(&df)
            .unwrap();
        let csv = std::str::from_utf8(&buf).unwrap();
        assert_eq!(csv, "days,temp\n0,22.1\n1,\n");
    }

    #[test]
    fn round_trip_keeps_values() {
        let df = df! {
            "name" => ["a", "b"],
            "v" => [1.5, 2.0]
        }
        .unwrap();
        let mut buf: Vec<u8> = Vec::new();
        CsvWriter::new(&mut buf).finish(&df).unwrap();
        let back = CsvReader::new(Cursor::new(buf)).finish().unwrap();
        assert!(df.frame_equal(&back));
    }
}
