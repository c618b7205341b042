// ============================================================
// CSV PARSER
// ============================================================
// Read delimited files into header-normalized string tables

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::{Encoding, WINDOWS_1252};

use crate::domain::error::AppError;

/// Delimiters considered by auto-detection
const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Number of leading lines sampled for delimiter detection
const DETECTION_SAMPLE_LINES: usize = 10;

/// Untyped table: normalized headers plus one string cell per header per row
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Headers trimmed and lowercased
    pub headers: Vec<String>,

    /// Records padded or truncated to `headers.len()` cells
    pub records: Vec<Vec<String>>,

    /// Delimiter that was used to split the content
    pub delimiter: u8,
}

impl RawTable {
    /// Position of a (normalized) column name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}

/// CSV parser with delimiter detection
#[derive(Debug, Clone, Default)]
pub struct CsvParser {
    /// Fixed delimiter; `None` means detect from content
    delimiter: Option<u8>,
}

impl CsvParser {
    /// Create a parser that auto-detects the delimiter
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fixed delimiter
    pub fn with_delimiter(mut self, delimiter: Option<u8>) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse a delimited file
    pub fn parse_file(&self, path: &Path) -> Result<RawTable, AppError> {
        let bytes = fs::read(path).map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let content = decode_bytes(&bytes);
        self.parse_content(&content)
    }

    /// Parse delimited content from a string
    pub fn parse_content(&self, content: &str) -> Result<RawTable, AppError> {
        let delimiter = self
            .delimiter
            .unwrap_or_else(|| Self::detect_delimiter(content));

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(Trim::None)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .iter()
            .map(normalize_header)
            .collect();

        let mut records = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            records.push(Self::parse_record(headers.len(), &record));
        }

        Ok(RawTable {
            headers,
            records,
            delimiter,
        })
    }

    fn parse_record(width: usize, record: &StringRecord) -> Vec<String> {
        (0..width)
            .map(|idx| record.get(idx).unwrap_or("").to_string())
            .collect()
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let sample_lines: Vec<&str> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .take(DETECTION_SAMPLE_LINES)
            .collect();

        if sample_lines.is_empty() {
            return b',';
        }

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &DELIMITER_CANDIDATES {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();

            // Score by frequency, penalised by inconsistency across lines
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}

/// Trim and lowercase a header cell
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Decode raw file bytes. A BOM picks the encoding; otherwise UTF-8 with a
/// Windows-1252 fallback.
pub fn decode_bytes(bytes: &[u8]) -> String {
    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_length..]);
        return text.into_owned();
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text.into_owned()
        }
    }
}
