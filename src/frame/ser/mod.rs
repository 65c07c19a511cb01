//! (De)serialization of DataFrames.
use std::io::{Read, Write};

use crate::error::Result;
use crate::frame::DataFrame;

pub mod csv;

pub trait SerReader<R>
where
    R: Read,
    Self: Sized,
{
    fn new(reader: R) -> Self;

    /// Read the data and create the DataFrame.
    fn finish(self) -> Result<DataFrame>;
}

pub trait SerWriter<'a, W>
where
    W: Write,
    Self: Sized,
{
    fn new(writer: &'a mut W) -> Self;

    /// Write the DataFrame.
    fn finish(self, df: &DataFrame) -> Result<()>;
}
