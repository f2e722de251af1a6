//! Record parsers for the two D2L line conventions.
//!
//! Both parsers share one contract: a line that does not start with the
//! data marker is skipped, a line that does start with it must be a complete
//! record or the whole run fails.

use crate::core::{InputFormat, ParsedLine, Record, RecordParser, ScorePair, StudentId};
use crate::utils::error::{EtlError, Result};

pub const DATA_MARKER: char = '#';

const MARKER_FORMAT: &str = "#StudentId,Num,Denom,Num,Denom,...,#";
const TABULAR_FORMAT: &str = "#StudentId,Num,Denom,...,# (one value per CSV cell)";

pub fn parser_for(format: InputFormat) -> Box<dyn RecordParser> {
    match format {
        InputFormat::Marker => Box::new(MarkerParser),
        InputFormat::Tabular => Box::new(TabularParser::default()),
    }
}

/// Parses `#A01234567,10,20,30,40,#` lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkerParser;

impl RecordParser for MarkerParser {
    fn parse(&mut self, line_number: usize, line: &str) -> Result<ParsedLine> {
        if !line.starts_with(DATA_MARKER) {
            return Ok(ParsedLine::Skip);
        }

        scan_marker_line(line_number, line)
            .map(ParsedLine::Record)
            .ok_or_else(|| malformed(line_number, line, self.expected_format()))
    }

    fn expected_format(&self) -> &'static str {
        MARKER_FORMAT
    }
}

fn scan_marker_line(line_number: usize, line: &str) -> Option<Record> {
    let body = line.strip_prefix(DATA_MARKER)?.strip_suffix(",#")?;
    let (id, scores) = body.split_once(',')?;
    let student_id = StudentId::parse(id)?;
    let values: Vec<&str> = scores.split(',').collect();

    Some(Record {
        student_id,
        scores: parse_pairs(&values)?,
        line: line_number,
        raw_scores: scores.to_string(),
    })
}

/// Parses CSV rows whose first cell is `#A01234567` and last cell is `#`.
///
/// The number of score pairs per row comes from the first non-data row with
/// an even cell count of at least four (the export header).
#[derive(Debug, Default, Clone)]
pub struct TabularParser {
    pairs_per_row: Option<usize>,
}

impl TabularParser {
    fn learn_header(&mut self, line_number: usize, line: &str) {
        if self.pairs_per_row.is_some() {
            return;
        }
        let Some(cells) = split_cells(line) else {
            return;
        };
        if cells.len() >= 4 && cells.len() % 2 == 0 {
            let pairs = (cells.len() - 2) / 2;
            tracing::debug!("Header on line {} defines {} outcomes", line_number, pairs);
            self.pairs_per_row = Some(pairs);
        }
    }

    fn scan_row(&self, line_number: usize, line: &str) -> Option<Record> {
        let cells = split_cells(line)?;
        if cells.len() < 4 {
            return None;
        }

        let (last, rest) = cells.split_last()?;
        let (first, middle) = rest.split_first()?;
        if last != "#" {
            return None;
        }
        let student_id = StudentId::parse(first.strip_prefix(DATA_MARKER)?)?;

        let values: Vec<&str> = middle.iter().map(String::as_str).collect();
        let scores = parse_pairs(&values)?;
        if self.pairs_per_row.is_some_and(|expected| expected != scores.len()) {
            return None;
        }

        Some(Record {
            student_id,
            scores,
            line: line_number,
            raw_scores: values.join(","),
        })
    }
}

impl RecordParser for TabularParser {
    fn parse(&mut self, line_number: usize, line: &str) -> Result<ParsedLine> {
        if !line.starts_with(DATA_MARKER) {
            self.learn_header(line_number, line);
            return Ok(ParsedLine::Skip);
        }

        self.scan_row(line_number, line)
            .map(ParsedLine::Record)
            .ok_or_else(|| malformed(line_number, line, self.expected_format()))
    }

    fn expected_format(&self) -> &'static str {
        TABULAR_FORMAT
    }
}

fn split_cells(line: &str) -> Option<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let mut record = csv::StringRecord::new();

    match reader.read_record(&mut record) {
        Ok(true) => Some(record.iter().map(|cell| cell.trim().to_string()).collect()),
        _ => None,
    }
}

/// Groups values into numerator/denominator pairs. Needs at least one pair
/// and no dangling numerator.
fn parse_pairs(values: &[&str]) -> Option<Vec<ScorePair>> {
    if values.is_empty() || values.len() % 2 != 0 {
        return None;
    }

    values
        .chunks_exact(2)
        .map(|pair| Some(ScorePair::new(parse_decimal(pair[0])?, parse_decimal(pair[1])?)))
        .collect()
}

/// Unsigned decimal: digits and dots only, no sign, no exponent.
fn parse_decimal(raw: &str) -> Option<f64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    raw.parse().ok()
}

fn malformed(line_number: usize, line: &str, expected: &'static str) -> EtlError {
    EtlError::MalformedRecord {
        line: line_number,
        content: line.to_string(),
        expected,
    }
}
