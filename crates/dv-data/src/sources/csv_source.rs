use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use csv::ReaderBuilder;
use dv_core::data::{parse_number, Dataset, LoadError, Row, Value};

use crate::config::CsvConfig;
use crate::DataError;

/// Where the CSV bytes come from
#[derive(Debug, Clone)]
enum CsvInput {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

/// CSV data source: parses a delimited file into a cleaned [`Dataset`]
#[derive(Debug, Clone)]
pub struct CsvSource {
    input: CsvInput,
    name: String,
    config: CsvConfig,
}

impl CsvSource {
    /// Create a new CSV source from a file path
    pub fn from_path(path: impl Into<PathBuf>, config: CsvConfig) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.csv")
            .to_string();
        Self {
            input: CsvInput::Path(path),
            name,
            config,
        }
    }

    /// Create a CSV source over an uploaded buffer
    pub fn from_bytes(
        name: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
        config: CsvConfig,
    ) -> Self {
        Self {
            input: CsvInput::Bytes(bytes.into()),
            name: name.into(),
            config,
        }
    }

    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// Parse the source off the async executor
    pub async fn load_dataset(&self) -> Result<Dataset, DataError> {
        let input = self.input.clone();
        let config = self.config.clone();
        let name = self.name.clone();

        tokio::task::spawn_blocking(move || -> Result<Dataset, DataError> {
            let dataset = match input {
                CsvInput::Path(path) => {
                    let file = File::open(&path)?;
                    Self::read(BufReader::new(file), &config)
                }
                CsvInput::Bytes(bytes) => Self::read(&bytes[..], &config),
            }?;
            tracing::info!("Parsed '{}': {} rows", name, dataset.len());
            Ok(dataset)
        })
        .await?
    }

    /// Parse CSV text: the first record is the header, blank lines are skipped
    pub fn read<R: Read>(reader: R, config: &CsvConfig) -> Result<Dataset, DataError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(config.delimiter_byte())
            .from_reader(reader);

        let headers = unique_headers(csv_reader.headers()?.iter());

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            if config.skip_empty_lines && record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            let row: Row = headers
                .iter()
                .zip(record.iter())
                .map(|(header, field)| (header.clone(), cell_value(field, config)))
                .collect();
            rows.push(row);
        }

        tracing::debug!("Read {} columns, {} rows", headers.len(), rows.len());
        Ok(Dataset::ingest(headers, rows)?)
    }
}

#[async_trait]
impl dv_core::data::DataSource for CsvSource {
    async fn load(&self) -> Result<Dataset, LoadError> {
        self.load_dataset().await.map_err(LoadError::from)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

/// Trimmed header names; a repeated name gets a `_1`, `_2`, ... suffix
fn unique_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for name in raw {
        let name = name.trim();
        let mut candidate = name.to_string();
        let mut suffix = 0;
        while headers.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}_{}", name, suffix);
        }
        headers.push(candidate);
    }
    if headers.len() == 1 && headers[0].is_empty() {
        headers.clear();
    }
    headers
}

/// Convert a raw field into a cell value
fn cell_value(field: &str, config: &CsvConfig) -> Value {
    if !config.dynamic_typing {
        return Value::Text(field.to_string());
    }
    if config.null_config.is_null(field) {
        return Value::Null;
    }
    let trimmed = field.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    match parse_number(trimmed) {
        Some(n) => Value::Number(n),
        None => Value::Text(field.to_string()),
    }
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use dv_core::data::DataSource;
    use dv_core::IngestError;
    use std::io::Write;

    fn parse(text: &str) -> Result<Dataset, DataError> {
        CsvSource::read(text.as_bytes(), &CsvConfig::default())
    }

    #[test]
    fn test_rows_and_headers() {
        let dataset = parse("Year,Sales\n2020, 100\n2021,150 \n2022,90\n").unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.headers(), &["Year".to_string(), "Sales".to_string()]);
        let first_keys: Vec<&String> = dataset.rows()[0].keys().collect();
        assert_eq!(first_keys, vec!["Year", "Sales"]);
        assert_eq!(dataset.rows()[0]["Sales"], Value::from("100"));
        assert_eq!(dataset.rows()[1]["Sales"], Value::from("150"));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let dataset = parse("a,b\n1,2\n\n , \n3,4\n").unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let dataset = parse("a,b,c\n1,2\n").unwrap();
        assert_eq!(dataset.rows()[0]["c"], Value::Null);
    }

    #[test]
    fn test_duplicate_headers_are_renamed() {
        let dataset = parse("x,v,v\n1,2,3\n").unwrap();
        assert_eq!(dataset.headers(), &["x".to_string(), "v".to_string(), "v_1".to_string()]);
        assert_eq!(dataset.rows()[0]["v_1"], Value::from("3"));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(matches!(parse(""), Err(DataError::Ingest(IngestError::NoHeaders))));
        assert!(matches!(parse("a,b\n"), Err(DataError::Ingest(IngestError::NoRows))));
    }

    #[test]
    fn test_malformed_utf8_is_a_parse_error() {
        let bytes: &[u8] = b"a,b\n\xff\xfe,1\n";
        let err = CsvSource::read(bytes, &CsvConfig::default()).unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
        assert!(matches!(LoadError::from(err), LoadError::Parse(_)));
    }

    #[test]
    fn test_dynamic_typing() {
        let config = CsvConfig {
            dynamic_typing: true,
            ..CsvConfig::default()
        };
        let dataset = CsvSource::read("a,b,c,d\n1.5,true,N/A,text\n".as_bytes(), &config).unwrap();
        let row = &dataset.rows()[0];
        assert_eq!(row["a"], Value::Number(1.5));
        assert_eq!(row["b"], Value::Bool(true));
        assert_eq!(row["c"], Value::Null);
        assert_eq!(row["d"], Value::from("text"));
    }

    #[test]
    fn test_custom_delimiter() {
        let config = CsvConfig {
            delimiter: ';',
            ..CsvConfig::default()
        };
        let dataset = CsvSource::read("a;b\n1;2\n".as_bytes(), &config).unwrap();
        assert_eq!(dataset.rows()[0]["b"], Value::from("2"));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Region,Units").unwrap();
        writeln!(file, "North,10").unwrap();
        writeln!(file, "South,20").unwrap();

        let source = CsvSource::from_path(file.path(), CsvConfig::default());
        let dataset = source.load().await.unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.x_column(), "Region");
    }

    #[tokio::test]
    async fn test_missing_file_is_a_parse_failure() {
        let source = CsvSource::from_path("/definitely/not/here.csv", CsvConfig::default());
        assert_eq!(source.source_name(), "here.csv");
        assert!(matches!(source.load().await, Err(LoadError::Parse(_))));
    }

    #[tokio::test]
    async fn test_load_from_bytes() {
        let bytes = b"k,v\na,1\n".to_vec();
        let source = CsvSource::from_bytes("upload.csv", bytes, CsvConfig::default());
        let dataset = source.load().await.unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(source.source_name(), "upload.csv");
    }
}
