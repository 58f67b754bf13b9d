use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use super::grid::PeriodicGrid;
use super::model::{Element, ElementDataset};

/// The table shipped inside the binary, used when no source is configured.
const BUNDLED_ELEMENTS: &str = include_str!("../../assets/elements.json");

/// HTTP timeout used when the caller does not pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why the element table could not be produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("record {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("atomic number {0} appears more than once")]
    DuplicateNumber(u32),

    #[error("element {number} is placed at ({xpos}, {ypos}), outside the 18x10 grid")]
    OutOfGrid { number: u32, xpos: u8, ypos: u8 },

    #[error("elements {first} and {second} share grid cell ({xpos}, {ypos})")]
    GridCollision {
        first: u32,
        second: u32,
        xpos: u8,
        ypos: u8,
    },

    #[error("loader thread exited without a result")]
    Interrupted,
}

impl LoadError {
    fn invalid(index: usize, reason: impl Into<String>) -> Self {
        LoadError::InvalidRecord {
            index,
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Sources and responses
// ---------------------------------------------------------------------------

/// Body layout of an element table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// `[{ "number": 1, "symbol": "H", ... }, ...]`
    Json,
    /// Header row with the same field names, one element per line.
    Csv,
}

impl DataFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "json" => Ok(DataFormat::Json),
            "csv" => Ok(DataFormat::Csv),
            other => Err(LoadError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Where the element table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Bundled,
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` locations are fetched remotely, anything else
    /// is a local path.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Bundled => write!(f, "bundled table"),
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Result of the single resource read: a status and a body.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
    pub format: DataFormat,
}

impl Response {
    pub fn ok(body: impl Into<String>, format: DataFormat) -> Self {
        Response {
            status: 200,
            body: body.into(),
            format,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Fetch and normalize the element table from `source`.
pub fn load(source: &DataSource, timeout: Duration) -> Result<ElementDataset, LoadError> {
    let response = fetch(source, timeout)?;
    parse_response(response)
}

/// Read the raw resource without interpreting the body.
pub fn fetch(source: &DataSource, timeout: Duration) -> Result<Response, LoadError> {
    log::debug!("fetching element table from {source}");
    match source {
        DataSource::Bundled => Ok(Response::ok(BUNDLED_ELEMENTS, DataFormat::Json)),
        DataSource::File(path) => {
            let format = DataFormat::from_path(path)?;
            let body = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            Ok(Response::ok(body, format))
        }
        DataSource::Url(url) => fetch_url(url, timeout),
    }
}

fn fetch_url(url: &str, timeout: Duration) -> Result<Response, LoadError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;
    let response = client.get(url).send()?;
    let status = response.status().as_u16();
    let body = response.text()?;

    let format = if url.to_ascii_lowercase().ends_with(".csv") {
        DataFormat::Csv
    } else {
        DataFormat::Json
    };
    Ok(Response {
        status,
        body,
        format,
    })
}

/// Turn a fetched response into a validated dataset.
///
/// Fails on a non-success status, an unparseable body, a record whose
/// atomic number or grid position cannot be coerced, or a layout where two
/// elements share a cell.
pub fn parse_response(response: Response) -> Result<ElementDataset, LoadError> {
    if !response.is_success() {
        return Err(LoadError::Status {
            status: response.status,
        });
    }

    let raw = match response.format {
        DataFormat::Json => parse_json(&response.body)?,
        DataFormat::Csv => parse_csv(&response.body)?,
    };

    let elements = raw
        .into_iter()
        .enumerate()
        .map(|(i, rec)| normalize(i, rec))
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = BTreeSet::new();
    for el in &elements {
        if !seen.insert(el.number) {
            return Err(LoadError::DuplicateNumber(el.number));
        }
    }
    PeriodicGrid::layout(&elements)?;

    Ok(ElementDataset::from_elements(elements))
}

// ---------------------------------------------------------------------------
// Raw records
// ---------------------------------------------------------------------------

/// A record as it appears in the source. Numeric fields stay untyped until
/// [`normalize`] coerces them; unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct RawElement {
    #[serde(default)]
    number: JsonValue,
    symbol: String,
    name: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    phase: Option<String>,
    #[serde(default)]
    atomic_mass: JsonValue,
    #[serde(default)]
    xpos: JsonValue,
    #[serde(default)]
    ypos: JsonValue,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    melt: JsonValue,
    #[serde(default)]
    boil: JsonValue,
    #[serde(default)]
    electron_configuration: Option<String>,
    #[serde(default)]
    electron_configuration_semantic: Option<String>,
}

fn parse_json(body: &str) -> Result<Vec<RawElement>, LoadError> {
    Ok(serde_json::from_str(body)?)
}

/// CSV cells become JSON strings (empty cells become `null`) so both formats
/// share one coercion path.
fn parse_csv(body: &str) -> Result<Vec<RawElement>, LoadError> {
    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let object: Map<String, JsonValue> = headers
            .iter()
            .zip(record.iter())
            .map(|(key, cell)| {
                let value = if cell.is_empty() {
                    JsonValue::Null
                } else {
                    JsonValue::String(cell.to_string())
                };
                (key.clone(), value)
            })
            .collect();
        records.push(serde_json::from_value(JsonValue::Object(object))?);
    }
    Ok(records)
}

fn normalize(index: usize, raw: RawElement) -> Result<Element, LoadError> {
    let number = coerce_int(&raw.number)
        .ok_or_else(|| LoadError::invalid(index, format!("atomic number {} is not an integer", raw.number)))?;
    let number = u32::try_from(number)
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| LoadError::invalid(index, format!("atomic number {number} is not positive")))?;

    let xpos = grid_coordinate(index, "xpos", &raw.xpos)?;
    let ypos = grid_coordinate(index, "ypos", &raw.ypos)?;

    Ok(Element {
        number,
        symbol: raw.symbol,
        name: raw.name,
        category: raw.category.unwrap_or_default(),
        phase: raw.phase.unwrap_or_default(),
        atomic_mass: coerce_mass(&raw.atomic_mass),
        xpos,
        ypos,
        summary: raw.summary,
        melt: coerce_float(&raw.melt),
        boil: coerce_float(&raw.boil),
        electron_configuration: raw.electron_configuration,
        electron_configuration_semantic: raw.electron_configuration_semantic,
    })
}

fn grid_coordinate(index: usize, field: &str, value: &JsonValue) -> Result<u8, LoadError> {
    coerce_int(value)
        .and_then(|v| u8::try_from(v).ok())
        .ok_or_else(|| LoadError::invalid(index, format!("{field} {value} is not a grid coordinate")))
}

// ---------------------------------------------------------------------------
// Numeric coercion
// ---------------------------------------------------------------------------

/// Atomic mass: numbers pass through untouched; anything else is parsed from
/// its leading numeric text, and a zero or unparseable result becomes `None`.
pub fn coerce_mass(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => parse_float_prefix(s).filter(|m| *m != 0.0),
        _ => None,
    }
}

/// Lenient float for pass-through display fields.
pub fn coerce_float(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

/// Integer from a number (truncated) or from the leading digits of a string.
pub fn coerce_int(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        JsonValue::String(s) => parse_int_prefix(s),
        _ => None,
    }
}

/// Parse the longest decimal literal at the start of `s` (after leading
/// whitespace), e.g. `"1.008(2)"` → `1.008`.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Parse the optional sign and leading digits of `s`, e.g. `"8 "` → `8`.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn float_prefix_follows_leading_numeric_text() {
        assert_eq!(parse_float_prefix("15.999"), Some(15.999));
        assert_eq!(parse_float_prefix("  1.008(2)"), Some(1.008));
        assert_eq!(parse_float_prefix("[98]"), None);
        assert_eq!(parse_float_prefix("-.5"), Some(-0.5));
        assert_eq!(parse_float_prefix("2e3kg"), Some(2000.0));
        assert_eq!(parse_float_prefix("7e"), Some(7.0));
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("unknown"), None);
    }

    #[test]
    fn int_prefix_stops_at_first_non_digit() {
        assert_eq!(parse_int_prefix("8"), Some(8));
        assert_eq!(parse_int_prefix(" 26th"), Some(26));
        assert_eq!(parse_int_prefix("8.9"), Some(8));
        assert_eq!(parse_int_prefix("-3"), Some(-3));
        assert_eq!(parse_int_prefix("x1"), None);
        assert_eq!(parse_int_prefix(""), None);
    }

    #[test]
    fn mass_coercion() {
        assert_eq!(coerce_mass(&json!(15.999)), Some(15.999));
        assert_eq!(coerce_mass(&json!("15.999")), Some(15.999));
        assert_eq!(coerce_mass(&json!("unknown")), None);
        assert_eq!(coerce_mass(&json!("0")), None);
        assert_eq!(coerce_mass(&JsonValue::Null), None);
        assert_eq!(coerce_mass(&json!(true)), None);
    }

    #[test]
    fn int_coercion_truncates_numbers() {
        assert_eq!(coerce_int(&json!(8)), Some(8));
        assert_eq!(coerce_int(&json!(8.7)), Some(8));
        assert_eq!(coerce_int(&json!("8")), Some(8));
        assert_eq!(coerce_int(&JsonValue::Null), None);
    }

    #[test]
    fn source_parsing_distinguishes_urls() {
        assert_eq!(
            DataSource::parse("https://example.org/elements.json"),
            DataSource::Url("https://example.org/elements.json".to_string())
        );
        assert_eq!(
            DataSource::parse("data/elements.csv"),
            DataSource::File(PathBuf::from("data/elements.csv"))
        );
    }

    #[test]
    fn format_is_chosen_by_extension() {
        assert_eq!(DataFormat::from_path(Path::new("a.JSON")).unwrap(), DataFormat::Json);
        assert_eq!(DataFormat::from_path(Path::new("a.csv")).unwrap(), DataFormat::Csv);
        assert!(matches!(
            DataFormat::from_path(Path::new("a.xml")),
            Err(LoadError::UnsupportedFormat(ext)) if ext == "xml"
        ));
    }

    #[test]
    fn missing_atomic_number_is_an_invalid_record() {
        let body = r#"[{"symbol": "X", "name": "Mystery", "xpos": 1, "ypos": 1}]"#;
        let err = parse_response(Response::ok(body, DataFormat::Json)).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn duplicate_numbers_are_rejected() {
        let body = r#"[
            {"number": 1, "symbol": "H", "name": "Hydrogen", "xpos": 1, "ypos": 1},
            {"number": 1, "symbol": "D", "name": "Deuterium", "xpos": 2, "ypos": 1}
        ]"#;
        let err = parse_response(Response::ok(body, DataFormat::Json)).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateNumber(1)));
    }
}
