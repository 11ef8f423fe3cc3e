//! Delimited-text export of flat rows.
//!
//! Every value is quoted with embedded quotes doubled; the header is quoted
//! only where a column name needs it. Two presets exist: plain CSV (`,`, LF,
//! no BOM) and the spreadsheet-friendly variant (`;`, CRLF, UTF-8 BOM).

use std::fmt;
use std::str::FromStr;

use ::csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{DashboardError, Result};

const UTF8_BOM: &str = "\u{FEFF}";

/// Line terminator of exported text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

/// Formatting options of the delimited-text export.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawExportConfig")]
pub struct ExportConfig {
    pub delimiter: char,
    pub line_ending: LineEnding,
    /// Prefix the output with a UTF-8 byte order mark.
    pub bom: bool,
}

impl ExportConfig {
    /// Build a config, rejecting delimiters other than `,` and `;`.
    pub fn new(delimiter: char, line_ending: LineEnding, bom: bool) -> Result<Self> {
        match delimiter {
            ',' | ';' => Ok(ExportConfig { delimiter, line_ending, bom }),
            other => Err(DashboardError::UnsupportedDelimiter(other)),
        }
    }

    /// `,` + LF, no BOM.
    pub fn comma() -> Self {
        ExportConfig { delimiter: ',', line_ending: LineEnding::Lf, bom: false }
    }

    /// `;` + CRLF + UTF-8 BOM, as spreadsheet tools in comma-decimal locales expect.
    pub fn excel() -> Self {
        ExportConfig { delimiter: ';', line_ending: LineEnding::CrLf, bom: true }
    }
}

/// Unchecked wire form of [`ExportConfig`].
#[derive(Deserialize)]
struct RawExportConfig {
    delimiter: char,
    line_ending: LineEnding,
    bom: bool,
}

impl TryFrom<RawExportConfig> for ExportConfig {
    type Error = DashboardError;

    fn try_from(raw: RawExportConfig) -> Result<Self> {
        ExportConfig::new(raw.delimiter, raw.line_ending, raw.bom)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig::comma()
    }
}

impl FromStr for ExportConfig {
    type Err = DashboardError;

    /// Parse a profile name: "csv" or "excel" (case-insensitive).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "csv" | "comma" => Ok(ExportConfig::comma()),
            "excel" | "semicolon" => Ok(ExportConfig::excel()),
            _ => Err(DashboardError::UnsupportedProfile(s.to_string())),
        }
    }
}

/// A scalar export value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Integer(i64),
    Number(f64),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Integer(v) => write!(f, "{v}"),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Integer(v)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Text(v.to_string())
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Text(v)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map_or(Cell::Null, Into::into)
    }
}

/// One export row: ordered `(column, value)` pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExportRow {
    fields: Vec<(String, Cell)>,
}

impl ExportRow {
    pub fn new() -> Self {
        ExportRow::default()
    }

    /// Append a column.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Cell>) -> Self {
        self.fields.push((column.into(), value.into()));
        self
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(c, _)| c.as_str())
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.fields.iter().find(|(c, _)| c == column).map(|(_, v)| v)
    }
}

fn builder(config: &ExportConfig, quote_style: QuoteStyle) -> WriterBuilder {
    let terminator = match config.line_ending {
        LineEnding::Lf => Terminator::Any(b'\n'),
        LineEnding::CrLf => Terminator::CRLF,
    };
    let mut builder = WriterBuilder::new();
    builder
        .delimiter(config.delimiter as u8)
        .quote_style(quote_style)
        .terminator(terminator);
    builder
}

/// Render rows as delimited text, one terminated line per record.
///
/// The header is the first row's columns; later rows are read by those
/// columns, a missing column becoming an empty field. Rows are expected to
/// share one shape. Zero rows logs a warning and yields an empty string.
pub fn to_delimited_text(rows: &[ExportRow], config: &ExportConfig) -> Result<String> {
    let Some(first) = rows.first() else {
        warn!("no data to export");
        return Ok(String::new());
    };
    let headers: Vec<&str> = first.columns().collect();

    let mut out = Vec::new();
    if config.bom {
        out.extend_from_slice(UTF8_BOM.as_bytes());
    }

    let mut header = builder(config, QuoteStyle::Necessary).from_writer(out);
    header.write_record(&headers)?;
    let out = header.into_inner().map_err(|e| ::csv::Error::from(e.into_error()))?;

    let mut body = builder(config, QuoteStyle::Always).from_writer(out);
    for row in rows {
        body.write_record(
            headers.iter().map(|h| row.get(h).map(Cell::to_string).unwrap_or_default()),
        )?;
    }
    let out = body.into_inner().map_err(|e| ::csv::Error::from(e.into_error()))?;

    // Every field came from a `String`, so the bytes are valid UTF-8.
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Read exported text back into records, header first.
    fn parse(text: &str, config: &ExportConfig) -> Vec<Vec<String>> {
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
        ::csv::ReaderBuilder::new()
            .delimiter(config.delimiter as u8)
            .has_headers(false)
            .from_reader(text.as_bytes())
            .records()
            .map(|record| record.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    fn export(rows: &[ExportRow], config: &ExportConfig) -> String {
        to_delimited_text(rows, config).unwrap()
    }

    fn sample_rows() -> Vec<ExportRow> {
        vec![
            ExportRow::new()
                .with("name", "He said \"hi\"")
                .with("value", 42_i64)
                .with("note", None::<String>),
            ExportRow::new()
                .with("name", "plain")
                .with("value", 1.5_f64)
                .with("note", "x; y, z"),
        ]
    }

    #[test]
    fn test_comma_output() {
        let text = export(&sample_rows(), &ExportConfig::comma());
        assert_eq!(
            text,
            "name,value,note\n\"He said \"\"hi\"\"\",\"42\",\"\"\n\"plain\",\"1.5\",\"x; y, z\"\n"
        );
    }

    #[test]
    fn test_excel_output_has_bom_and_crlf() {
        let text = export(&sample_rows(), &ExportConfig::excel());
        assert!(text.starts_with("\u{FEFF}name;value;note\r\n"));
        assert!(text.ends_with("\"x; y, z\"\r\n"));
        assert_eq!(text.matches("\r\n").count(), 3);
    }

    #[test]
    fn test_round_trip_with_quotes_and_nulls() {
        for config in [ExportConfig::comma(), ExportConfig::excel()] {
            let parsed = parse(&export(&sample_rows(), &config), &config);
            assert_eq!(parsed.len(), 3);
            assert_eq!(parsed[0], vec!["name", "value", "note"]);
            assert_eq!(parsed[1], vec!["He said \"hi\"", "42", ""]);
            assert_eq!(parsed[2], vec!["plain", "1.5", "x; y, z"]);
        }
    }

    #[test]
    fn test_multi_line_value_stays_one_record() {
        let rows = vec![ExportRow::new().with("note", "line1\nline2").with("n", 1_i64)];
        for config in [ExportConfig::comma(), ExportConfig::excel()] {
            let parsed = parse(&export(&rows, &config), &config);
            assert_eq!(parsed, vec![vec!["note", "n"], vec!["line1\nline2", "1"]]);
        }
    }

    #[test]
    fn test_header_with_delimiter_is_quoted() {
        let rows = vec![ExportRow::new().with("a,b", 1_i64).with("c", 2_i64)];
        let config = ExportConfig::comma();
        let text = export(&rows, &config);
        assert!(text.starts_with("\"a,b\",c\n"));
        let parsed = parse(&text, &config);
        assert_eq!(parsed[0], vec!["a,b", "c"]);
        assert_eq!(parsed[1], vec!["1", "2"]);
    }

    #[test]
    fn test_null_is_empty_not_literal() {
        let rows = vec![ExportRow::new().with("a", Cell::Null)];
        let text = export(&rows, &ExportConfig::comma());
        assert_eq!(text, "a\n\"\"\n");
        assert!(!text.contains("null"));
    }

    #[test]
    fn test_missing_column_is_empty() {
        let rows = vec![
            ExportRow::new().with("a", 1_i64).with("b", 2_i64),
            ExportRow::new().with("a", 3_i64),
        ];
        let text = export(&rows, &ExportConfig::comma());
        assert_eq!(text, "a,b\n\"1\",\"2\"\n\"3\",\"\"\n");
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        assert_eq!(export(&[], &ExportConfig::excel()), "");
    }

    #[test]
    fn test_profile_parsing() {
        assert_eq!("csv".parse::<ExportConfig>().unwrap(), ExportConfig::comma());
        assert_eq!("Excel".parse::<ExportConfig>().unwrap(), ExportConfig::excel());
        assert_eq!("".parse::<ExportConfig>().unwrap(), ExportConfig::comma());
        let err = "xlsx".parse::<ExportConfig>().unwrap_err();
        assert_eq!(err.kind(), "unsupported_profile");
    }

    #[test]
    fn test_only_comma_and_semicolon_delimiters() {
        assert!(ExportConfig::new(';', LineEnding::Lf, false).is_ok());
        let err = ExportConfig::new('\t', LineEnding::Lf, false).unwrap_err();
        assert_eq!(err.kind(), "unsupported_delimiter");
    }

    #[test]
    fn test_deserialize_validates_delimiter() {
        let excel: ExportConfig =
            serde_json::from_str(&serde_json::to_string(&ExportConfig::excel()).unwrap()).unwrap();
        assert_eq!(excel, ExportConfig::excel());

        let tab = r#"{"delimiter": "\t", "line_ending": "Lf", "bom": false}"#;
        let err = serde_json::from_str::<ExportConfig>(tab).unwrap_err();
        assert!(err.to_string().contains("unsupported delimiter"));
    }
}
