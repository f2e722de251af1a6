use crate::domain::model::{Conversion, InputFormat, Record, Threshold};
use crate::utils::error::Result;

pub trait Storage {
    fn exists(&self, path: &str) -> bool;
    fn read_to_string(&self, path: &str) -> Result<String>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn threshold(&self) -> Threshold;
    fn input_format(&self) -> InputFormat;
}

/// What the parser made of one non-empty line.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Record(Record),
    /// Not a data line (header, metadata, comment).
    Skip,
}

pub trait RecordParser {
    /// `line` is already trimmed and non-empty; `line_number` is 1-based.
    fn parse(&mut self, line_number: usize, line: &str) -> Result<ParsedLine>;

    /// Shape of a data line, shown when a line is malformed.
    fn expected_format(&self) -> &'static str;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<String>>;
    fn transform(&self, lines: Vec<String>) -> Result<Conversion>;
    fn load(&self, conversion: &Conversion) -> Result<String>;
}
