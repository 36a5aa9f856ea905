//! Reading and writing matrices as delimited text
//!
//! # Format
//!
//! - One matrix row per line. Lines end at `\n` and at any other configured
//!   line delimiter (`\r` by default; [`extract`] also splits on `;`)
//! - Values are separated by any run of field delimiters (space, tab and
//!   comma by default)
//! - Tokens that do not parse as the element type are discarded, so labels
//!   can be interleaved with data as long as every row keeps the same
//!   number of values. Lines without any value are skipped
//!
//! [`load`] consumes its whole input and infers the shape. [`extract`]
//! reads into an existing matrix and stops once the matrix is full, leaving
//! the rest of the input for the next reader.
//!
//! # Examples
//!
//! ```
//! use ndmat_io::{load, write_delimited, TextOptions};
//! use ndmat_linalg::Matrix;
//!
//! let text = "x, y\n1, 2\n3, 4\n";
//! let m: Matrix<f64> = load(text.as_bytes())?;
//! assert_eq!(m.dims(), (2, 2));
//!
//! let mut output = Vec::new();
//! write_delimited(&m, &mut output, &TextOptions::default())?;
//! assert_eq!(String::from_utf8(output).unwrap(), "1 2\n3 4\n");
//! # Ok::<(), ndmat_io::TextError>(())
//! ```

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use ndmat_core::Element;
use ndmat_linalg::Matrix;
use tracing::{debug, warn};

use crate::error::{TextError, TextResult};
use crate::options::TextOptions;
use crate::tokenizer::Tokenizer;

/// Logical lines of a buffered reader, tagged with their physical line
/// number (1-based)
///
/// Bytes are consumed only up to the delimiter ending each logical line, so
/// whatever follows stays in the reader. A physical line holding nothing but
/// whitespace yields one empty logical line; empty segments between
/// delimiters are dropped.
struct Lines<'r, R> {
    reader: &'r mut R,
    delimiters: Vec<char>,
    number: usize,
    line_has_segment: bool,
}

impl<'r, R: BufRead> Lines<'r, R> {
    fn new(reader: &'r mut R, options: &TextOptions) -> Self {
        Self {
            reader,
            delimiters: options.line_delimiters.chars().collect(),
            number: 1,
            line_has_segment: false,
        }
    }

    fn next_line(&mut self) -> TextResult<Option<(usize, String)>> {
        loop {
            let number = self.number;
            let Some((bytes, ends_line)) = self.read_segment()? else {
                return Ok(None);
            };
            let segment = String::from_utf8(bytes)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

            if !ends_line {
                if segment.is_empty() {
                    continue;
                }
                self.line_has_segment = true;
                return Ok(Some((number, segment)));
            }

            self.number += 1;
            let had_segment = std::mem::replace(&mut self.line_has_segment, false);
            if !segment.trim().is_empty() {
                return Ok(Some((number, segment)));
            }
            if !had_segment {
                return Ok(Some((number, String::new())));
            }
        }
    }

    /// Bytes up to the next terminator, which is consumed but not returned,
    /// and whether that terminator ends the physical line (`\n` or end of
    /// input)
    fn read_segment(&mut self) -> io::Result<Option<(Vec<u8>, bool)>> {
        let mut segment = Vec::new();
        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                return Ok((!segment.is_empty()).then_some((segment, true)));
            }

            let mut used = 0;
            let mut ends_line = None;
            for &byte in available {
                used += 1;
                if byte == b'\n' {
                    ends_line = Some(true);
                    break;
                }
                segment.push(byte);
                if let Some(len) = delimiter_suffix(&segment, &self.delimiters) {
                    segment.truncate(segment.len() - len);
                    ends_line = Some(false);
                    break;
                }
            }
            self.reader.consume(used);
            if let Some(ends_line) = ends_line {
                return Ok(Some((segment, ends_line)));
            }
        }
    }
}

/// Byte length of the line delimiter `segment` ends with, if any
fn delimiter_suffix(segment: &[u8], delimiters: &[char]) -> Option<usize> {
    delimiters.iter().find_map(|delimiter| {
        let mut encoded = [0; 4];
        let bytes = delimiter.encode_utf8(&mut encoded).as_bytes();
        segment.ends_with(bytes).then_some(bytes.len())
    })
}

/// Load a matrix from delimited text, inferring its shape
///
/// The column count comes from the first line holding any value; every
/// later line must hold the same number of values.
///
/// # Errors
///
/// [`TextError::Format`] for a line with a different value count and
/// [`TextError::Io`] when reading fails.
pub fn load<T>(reader: impl Read) -> TextResult<Matrix<T>>
where
    T: Element + FromStr,
{
    load_with_options(reader, &TextOptions::default(), |_| true)
}

/// Load a matrix, passing every line through `predicate` first
///
/// The predicate may rewrite the line in place and returns whether the line
/// should be parsed at all.
///
/// ```
/// use ndmat_io::load_with;
/// use ndmat_linalg::Matrix;
///
/// let text = "# comment\n1 2\n3 4\n";
/// let m: Matrix<i32> = load_with(text.as_bytes(), |line| !line.starts_with('#')).unwrap();
/// assert_eq!(m.as_slice(), &[1, 2, 3, 4]);
/// ```
pub fn load_with<T, F>(reader: impl Read, predicate: F) -> TextResult<Matrix<T>>
where
    T: Element + FromStr,
    F: FnMut(&mut String) -> bool,
{
    load_with_options(reader, &TextOptions::default(), predicate)
}

/// Load a matrix with explicit delimiters and error policy
pub fn load_with_options<T, F>(
    reader: impl Read,
    options: &TextOptions,
    mut predicate: F,
) -> TextResult<Matrix<T>>
where
    T: Element + FromStr,
    F: FnMut(&mut String) -> bool,
{
    let mut reader = BufReader::new(reader);
    let mut lines = Lines::new(&mut reader, options);
    let tokenizer = Tokenizer::new(&options.field_delimiters);

    let mut data = Vec::new();
    let (mut rows, mut columns) = (0, 0);
    while let Some((number, mut line)) = lines.next_line()? {
        if !predicate(&mut line) || line.trim().is_empty() {
            continue;
        }
        let values: Vec<T> = tokenizer.parse(&line);
        if values.is_empty() {
            debug!(line = number, "no values on line");
            continue;
        }
        if rows > 0 && values.len() != columns {
            if options.skip_malformed {
                warn!(line = number, expected = columns, got = values.len(), "skipping malformed line");
                continue;
            }
            warn!(line = number, expected = columns, got = values.len(), "read error");
            return Err(TextError::Format {
                line: number,
                expected: columns,
                got: values.len(),
            });
        }
        columns = values.len();
        rows += 1;
        data.extend(values);
    }

    debug!(rows, columns, "loaded matrix");
    if rows == 0 {
        return Ok(Matrix::empty());
    }
    Ok(Matrix::from_vec(data, rows, columns)?)
}

/// Load a matrix from a file
pub fn load_file<T>(path: impl AsRef<Path>) -> TextResult<Matrix<T>>
where
    T: Element + FromStr,
{
    load_file_with(path, |_| true)
}

/// Load a matrix from a file, filtering lines through `predicate`
pub fn load_file_with<T, F>(path: impl AsRef<Path>, predicate: F) -> TextResult<Matrix<T>>
where
    T: Element + FromStr,
    F: FnMut(&mut String) -> bool,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| {
        warn!(path = %path.display(), %err, "cannot open matrix file");
        err
    })?;
    load_with(file, predicate)
}

/// Parse a matrix from a string (see [`load`])
pub fn parse_matrix<T>(text: &str) -> TextResult<Matrix<T>>
where
    T: Element + FromStr,
{
    load(text.as_bytes())
}

/// Read rows into `matrix` from the current position of `reader`
///
/// A matrix with elements is filled in place: lines without values are
/// skipped, each remaining line must supply at least `columns()` values
/// (extra values are ignored), and reading stops as soon as every row is
/// filled. Input is consumed only up to the line delimiter ending the
/// last row, so anything after it stays in `reader`, even on the same
/// physical line.
///
/// An empty matrix takes its column count from the first line with values
/// and reads rows until a line without values or the end of input.
///
/// Lines end at `\r`, `\n` and `;`.
///
/// # Errors
///
/// [`TextError::Format`] for a short (or, when inferring, mismatched)
/// line, [`TextError::MissingRows`] when the input ends early. The matrix is
/// left unchanged on error.
///
/// # Examples
///
/// ```
/// use ndmat_io::extract;
/// use ndmat_linalg::Matrix;
/// use std::io::BufRead;
///
/// let mut input = "1 2; 3 4\n5 6\nrest".as_bytes();
/// let mut m = Matrix::<i32>::new(2, 2);
/// extract(&mut m, &mut input).unwrap();
/// assert_eq!(m.as_slice(), &[1, 2, 3, 4]);
///
/// let mut remaining = String::new();
/// input.read_line(&mut remaining).unwrap();
/// assert_eq!(remaining, "5 6\n");
/// ```
pub fn extract<T, R>(matrix: &mut Matrix<T>, reader: &mut R) -> TextResult<()>
where
    T: Element + FromStr,
    R: BufRead,
{
    extract_with_options(matrix, reader, &TextOptions::for_extract())
}

/// [`extract`] with explicit delimiters
pub fn extract_with_options<T, R>(
    matrix: &mut Matrix<T>,
    reader: &mut R,
    options: &TextOptions,
) -> TextResult<()>
where
    T: Element + FromStr,
    R: BufRead,
{
    let mut lines = Lines::new(reader, options);
    let tokenizer = Tokenizer::new(&options.field_delimiters);

    if matrix.is_empty() {
        let mut data = Vec::new();
        let (mut rows, mut columns) = (0, 0);
        while let Some((number, line)) = lines.next_line()? {
            let values: Vec<T> = tokenizer.parse(&line);
            if values.is_empty() {
                if rows > 0 {
                    break;
                }
                continue;
            }
            if rows > 0 && values.len() != columns {
                warn!(line = number, expected = columns, got = values.len(), "read error");
                return Err(TextError::Format {
                    line: number,
                    expected: columns,
                    got: values.len(),
                });
            }
            columns = values.len();
            rows += 1;
            data.extend(values);
        }
        if rows > 0 {
            *matrix = Matrix::from_vec(data, rows, columns)?;
        }
        debug!(rows, columns, "extracted matrix");
        return Ok(());
    }

    let (rows, columns) = matrix.dims();
    let mut data = Vec::with_capacity(rows * columns);
    let mut filled = 0;
    while filled < rows {
        let Some((number, line)) = lines.next_line()? else {
            warn!(expected = rows, got = filled, "input ended early");
            return Err(TextError::MissingRows {
                expected: rows,
                got: filled,
            });
        };
        let values: Vec<T> = tokenizer.parse(&line);
        if values.is_empty() {
            continue;
        }
        if values.len() < columns {
            warn!(line = number, expected = columns, got = values.len(), "read error");
            return Err(TextError::Format {
                line: number,
                expected: columns,
                got: values.len(),
            });
        }
        data.extend(values.into_iter().take(columns));
        filled += 1;
    }

    for (cell, value) in matrix.as_mut_slice().iter_mut().zip(data) {
        *cell = value;
    }
    debug!(rows, columns, "extracted matrix");
    Ok(())
}

/// Write `matrix` one row per line, separating values with the first field
/// delimiter of `options`
pub fn write_delimited<T, W>(matrix: &Matrix<T>, writer: W, options: &TextOptions) -> TextResult<()>
where
    T: Element + Display,
    W: Write,
{
    let mut writer = BufWriter::new(writer);
    let delimiter = options.output_delimiter();
    let columns = matrix.columns();
    if columns > 0 {
        for row in matrix.as_slice().chunks(columns) {
            for (j, value) in row.iter().enumerate() {
                if j != 0 {
                    write!(writer, "{}", delimiter)?;
                }
                write!(writer, "{}", value)?;
            }
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write `matrix` to a file (see [`write_delimited`])
pub fn save_file<T>(matrix: &Matrix<T>, path: impl AsRef<Path>) -> TextResult<()>
where
    T: Element + Display,
{
    let file = File::create(path)?;
    write_delimited(matrix, file, &TextOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_infers_columns() {
        let m: Matrix<f64> = load("1 2 3\n\n4 5 6\r\n".as_bytes()).unwrap();
        assert_eq!(m.dims(), (2, 3));
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_load_mismatch_reports_line() {
        let err = load::<f64>("1 2\n3 4\n5\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            TextError::Format {
                line: 3,
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn test_load_skip_malformed() {
        let options = TextOptions::default().with_skip_malformed(true);
        let m: Matrix<i64> =
            load_with_options("1 2\n3\n4 5\n".as_bytes(), &options, |_| true).unwrap();
        assert_eq!(m.as_slice(), &[1, 2, 4, 5]);
    }

    #[test]
    fn test_predicate_can_rewrite() {
        let m: Matrix<i32> = load_with("1|2\n3|4\n".as_bytes(), |line| {
            *line = line.replace('|', " ");
            true
        })
        .unwrap();
        assert_eq!(m.dims(), (2, 2));
    }

    #[test]
    fn test_load_empty_input() {
        let m: Matrix<f64> = load("\n\n".as_bytes()).unwrap();
        assert!(m.is_empty());
    }

    #[test]
    fn test_extract_short_line() {
        let mut m = Matrix::<f64>::new(2, 3);
        let mut input = "1 2 3\n4 5\n".as_bytes();
        let err = extract(&mut m, &mut input).unwrap_err();
        assert!(matches!(err, TextError::Format { line: 2, .. }));
        assert_eq!(m, Matrix::new(2, 3));
    }

    #[test]
    fn test_extract_missing_rows() {
        let mut m = Matrix::<f64>::new(3, 1);
        let mut input = "1\n2\n".as_bytes();
        assert!(matches!(
            extract(&mut m, &mut input),
            Err(TextError::MissingRows { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn test_extract_into_empty_stops_at_blank() {
        let mut m = Matrix::<i32>::empty();
        let mut input = "\n1,2\n3,4\n\n5,6\n".as_bytes();
        extract(&mut m, &mut input).unwrap();
        assert_eq!(m.dims(), (2, 2));

        let mut next = Matrix::<i32>::empty();
        extract(&mut next, &mut input).unwrap();
        assert_eq!(next.as_slice(), &[5, 6]);
    }

    #[test]
    fn test_extract_leaves_rest_of_physical_line() {
        let mut input = "1 2; 3 4; 5 6\n7 8\n".as_bytes();
        let mut first = Matrix::<i32>::new(2, 2);
        extract(&mut first, &mut input).unwrap();
        assert_eq!(first.as_slice(), &[1, 2, 3, 4]);

        let mut second = Matrix::<i32>::new(2, 2);
        extract(&mut second, &mut input).unwrap();
        assert_eq!(second.as_slice(), &[5, 6, 7, 8]);
        assert!(input.is_empty());
    }

    #[test]
    fn test_crlf_blank_line_ends_inferred_extract() {
        let mut input = "1 2\r\n\r\n3 4\r\n".as_bytes();
        let mut m = Matrix::<i32>::empty();
        extract(&mut m, &mut input).unwrap();
        assert_eq!(m.as_slice(), &[1, 2]);
        assert_eq!(input, b"3 4\r\n");
    }

    #[test]
    fn test_line_numbers_follow_physical_lines() {
        let options = TextOptions::for_extract();
        let err =
            load_with_options::<i32, _>("1 2;3 4\n5\n".as_bytes(), &options, |_| true).unwrap_err();
        assert!(matches!(err, TextError::Format { line: 2, .. }));
    }

    #[test]
    fn test_extract_ignores_extra_values() {
        let mut m = Matrix::<i32>::new(1, 2);
        extract(&mut m, &mut "7 8 9".as_bytes()).unwrap();
        assert_eq!(m.as_slice(), &[7, 8]);
    }
}
