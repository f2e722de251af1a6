use crate::core::convert::convert_lines;
use crate::core::parser::parser_for;
use crate::core::{ConfigProvider, Conversion, Pipeline, Storage};
use crate::utils::error::{EtlError, Result};

const UTF8_BOM: char = '\u{feff}';

/// Reads a D2L export, grades it and writes the eLumen CSV.
pub struct GradePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> GradePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

/// Renders the conversion as CSV bytes.
pub fn render_csv(conversion: &Conversion) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&conversion.header)?;
    for row in &conversion.rows {
        writer.write_record(row.to_fields())?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

/// Splits on `\r\n`, `\n` and bare `\r` (classic Mac line endings).
fn split_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = content;

    while !rest.is_empty() {
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(pos) => {
                lines.push(rest[..pos].to_string());
                let break_len = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + break_len..];
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }

    lines
}

impl<S: Storage, C: ConfigProvider> Pipeline for GradePipeline<S, C> {
    fn extract(&self) -> Result<Vec<String>> {
        let input_path = self.config.input_path();
        if !self.storage.exists(input_path) {
            return Err(EtlError::InputNotFound {
                path: input_path.to_string(),
            });
        }

        tracing::debug!("Reading D2L export from: {}", input_path);
        let content = self.storage.read_to_string(input_path)?;
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(&content);

        Ok(split_lines(content))
    }

    fn transform(&self, lines: Vec<String>) -> Result<Conversion> {
        let format = self.config.input_format();
        let threshold = self.config.threshold();
        tracing::debug!(
            "Grading {} lines as {} input at threshold {}",
            lines.len(),
            format,
            threshold.ratio()
        );

        let mut parser = parser_for(format);
        convert_lines(lines, parser.as_mut(), threshold)
    }

    fn load(&self, conversion: &Conversion) -> Result<String> {
        let output_path = self.config.output_path();
        let data = render_csv(conversion)?;

        tracing::debug!("Writing {} bytes to {}", data.len(), output_path);
        self.storage.write_file(output_path, &data)?;

        Ok(output_path.to_string())
    }
}
