//! Text format configuration

/// Delimiters and error policy for delimited text matrices
///
/// The default splits fields on space, tab and comma and lines on carriage
/// return and newline, and treats a line with the wrong number of values as
/// an error.
///
/// # Examples
///
/// ```
/// use ndmat_io::TextOptions;
///
/// let options = TextOptions::default()
///     .with_field_delimiters(";")
///     .with_skip_malformed(true);
/// assert_eq!(options.field_delimiters, ";");
/// assert_eq!(options.line_delimiters, "\r\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOptions {
    /// Characters separating values within a line
    pub field_delimiters: String,
    /// Characters ending a line; `\n` always ends one
    pub line_delimiters: String,
    /// Skip (with a warning) lines whose value count differs from the first
    /// row instead of failing
    pub skip_malformed: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            field_delimiters: " \t,".to_string(),
            line_delimiters: "\r\n".to_string(),
            skip_malformed: false,
        }
    }
}

impl TextOptions {
    /// Defaults used by `extract`, which also ends lines at `;`
    pub fn for_extract() -> Self {
        Self::default().with_line_delimiters("\r\n;")
    }

    pub fn with_field_delimiters(mut self, delimiters: &str) -> Self {
        self.field_delimiters = delimiters.to_string();
        self
    }

    pub fn with_line_delimiters(mut self, delimiters: &str) -> Self {
        self.line_delimiters = delimiters.to_string();
        self
    }

    pub fn with_skip_malformed(mut self, skip: bool) -> Self {
        self.skip_malformed = skip;
        self
    }

    /// First field delimiter, used when writing
    pub(crate) fn output_delimiter(&self) -> char {
        self.field_delimiters.chars().next().unwrap_or(' ')
    }
}
