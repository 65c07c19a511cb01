//! Pretty printing for Series and DataFrames.
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};

use crate::config;
use crate::datatypes::AnyValue;
use crate::frame::DataFrame;
use crate::series::Series;

impl Debug for Series {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let limit = std::cmp::min(self.len(), config::fmt_max_rows());
        writeln!(
            f,
            "shape: ({},)\nSeries: '{}' [{}]\n[",
            self.len(),
            self.name(),
            self.dtype()
        )?;
        for i in 0..limit {
            match self.get(i) {
                AnyValue::Utf8(s) => writeln!(f, "\t\"{}\"", s)?,
                v => writeln!(f, "\t{}", v)?,
            }
        }
        if limit < self.len() {
            writeln!(f, "\t...")?;
        }
        write!(f, "]")
    }
}

impl Display for Series {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl Debug for DataFrame {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for DataFrame {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let max_rows = config::fmt_max_rows();
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(
            self.fields()
                .iter()
                .map(|field| format!("{}\n---\n{}", field.name(), field.dtype())),
        );
        for i in 0..std::cmp::min(self.height(), max_rows) {
            if let Some(row) = self.get(i) {
                table.add_row(row.iter().map(|v| format!("{}", v)));
            }
        }
        if self.height() > max_rows {
            table.add_row(self.get_columns().iter().map(|_| "...".to_string()));
        }
        writeln!(f, "shape: {:?}", self.shape())?;
        write!(f, "{}", table)
    }
}
