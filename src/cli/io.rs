//! JSON output for the command line
//!
//! - One record = one JSON object on one line
//! - UTF-8 only

use std::io::Write;

use serde_json::Value;

use crate::record::Book;

use super::errors::CliResult;

/// Write a single book as one JSON line
pub fn write_book<W: Write>(output: &mut W, book: &Book) -> CliResult<()> {
    serde_json::to_writer(&mut *output, &Value::Object(book.to_representation()))?;
    writeln!(output)?;
    Ok(())
}

/// Write books one per line, then flush
pub fn write_books<'a, W, I>(output: &mut W, books: I) -> CliResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Book>,
{
    for book in books {
        write_book(output, book)?;
    }
    output.flush()?;
    Ok(())
}
