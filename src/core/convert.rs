use crate::core::grader::grade;
use crate::core::{Conversion, OutputRow, ParsedLine, RecordParser, Threshold};
use crate::utils::error::{EtlError, Result};

pub const SID_COLUMN: &str = "SID";
pub const CLO_PREFIX: &str = "CLO_";

/// `SID,CLO_1,...,CLO_n`
pub fn header_for(outcomes: usize) -> Vec<String> {
    std::iter::once(SID_COLUMN.to_string())
        .chain((1..=outcomes).map(|i| format!("{}{}", CLO_PREFIX, i)))
        .collect()
}

/// Converts raw export lines into graded rows.
///
/// Line numbers are 1-based over every input line, blank ones included. The
/// first error aborts the pass; nothing is returned for the lines before it.
pub fn convert_lines<I, S>(
    lines: I,
    parser: &mut dyn RecordParser,
    threshold: Threshold,
) -> Result<Conversion>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut rows: Vec<OutputRow> = Vec::new();
    let mut skipped_lines = 0;

    for (index, raw) in lines.into_iter().enumerate() {
        let line_number = index + 1;
        let line = raw.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        let record = match parser.parse(line_number, line)? {
            ParsedLine::Record(record) => record,
            ParsedLine::Skip => {
                tracing::debug!("Skipping non-data line {}", line_number);
                skipped_lines += 1;
                continue;
            }
        };

        if let Some(first) = rows.first() {
            if first.flags.len() != record.scores.len() {
                return Err(EtlError::InconsistentRecord {
                    line: line_number,
                    expected: first.flags.len(),
                    found: record.scores.len(),
                });
            }
        }

        let flags = grade(&record, threshold)?;
        rows.push(OutputRow {
            student_id: record.student_id,
            flags,
        });
    }

    let outcomes = match rows.first() {
        Some(first) => first.flags.len(),
        None => return Err(EtlError::EmptyResult),
    };

    Ok(Conversion {
        header: header_for(outcomes),
        rows,
        skipped_lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::{MarkerParser, TabularParser};
    use crate::core::OutcomeFlag::{Met, NotMet};

    fn convert_marker(lines: &[&str], percent: u32) -> Result<Conversion> {
        convert_lines(
            lines.iter().copied(),
            &mut MarkerParser,
            Threshold::from_percent(percent).unwrap(),
        )
    }

    #[test]
    fn test_header_for() {
        assert_eq!(header_for(3), vec!["SID", "CLO_1", "CLO_2", "CLO_3"]);
        assert_eq!(header_for(0), vec!["SID"]);
    }

    #[test]
    fn test_single_record_at_half_threshold() {
        let conversion = convert_marker(&["#A01234567,10,20,30,40,#"], 50).unwrap();

        assert_eq!(conversion.header, vec!["SID", "CLO_1", "CLO_2"]);
        assert_eq!(conversion.rows.len(), 1);
        assert_eq!(
            conversion.rows[0].to_fields(),
            vec!["A01234567", "1", "1"]
        );
    }

    #[test]
    fn test_headers_and_blank_lines_are_skipped_in_order() {
        let lines = [
            "OrgDefinedId,Quiz 1,Quiz 1 Max,End-of-Line Indicator",
            "",
            "   ",
            "#A01234567,6,10,#",
            "Some trailing note",
            "#A07654321,8,10,#",
        ];
        let conversion = convert_marker(&lines, 70).unwrap();

        assert_eq!(conversion.skipped_lines, 2);
        let ids: Vec<&str> = conversion
            .rows
            .iter()
            .map(|row| row.student_id.as_str())
            .collect();
        assert_eq!(ids, vec!["A01234567", "A07654321"]);
        assert_eq!(conversion.rows[0].flags, vec![NotMet]);
        assert_eq!(conversion.rows[1].flags, vec![Met]);
    }

    #[test]
    fn test_duplicate_students_pass_through() {
        let conversion =
            convert_marker(&["#A01234567,1,2,#", "#A01234567,2,2,#"], 70).unwrap();
        assert_eq!(conversion.rows.len(), 2);
    }

    #[test]
    fn test_malformed_line_cites_line_number_counting_blanks() {
        let lines = ["header", "", "#A01234567,10,20,#", "#A0BAD,10,20,#"];
        match convert_marker(&lines, 70) {
            Err(EtlError::MalformedRecord { line, content, .. }) => {
                assert_eq!(line, 4);
                assert_eq!(content, "#A0BAD,10,20,#");
            }
            other => panic!("expected malformed record, got {:?}", other),
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let conversion = convert_marker(&["   #A01234567,10,20,#\r"], 50).unwrap();
        assert_eq!(conversion.rows[0].flags, vec![Met]);
    }

    #[test]
    fn test_zero_denominator_aborts() {
        let lines = ["#A01234567,10,20,#", "#A07654321,10,0,#"];
        match convert_marker(&lines, 70) {
            Err(EtlError::InvalidScore { line, scores }) => {
                assert_eq!(line, 2);
                assert_eq!(scores, "10,0");
            }
            other => panic!("expected invalid score, got {:?}", other),
        }
    }

    #[test]
    fn test_inconsistent_pair_count_aborts() {
        let lines = ["#A01234567,10,20,#", "#A07654321,10,20,5,5,#"];
        match convert_marker(&lines, 70) {
            Err(EtlError::InconsistentRecord {
                line,
                expected,
                found,
            }) => {
                assert_eq!((line, expected, found), (2, 1, 2));
            }
            other => panic!("expected inconsistent record, got {:?}", other),
        }
    }

    #[test]
    fn test_no_data_lines_is_empty_result() {
        assert!(matches!(
            convert_marker(&["OrgDefinedId,Quiz 1,End-of-Line Indicator"], 70),
            Err(EtlError::EmptyResult)
        ));
        assert!(matches!(convert_marker(&[], 70), Err(EtlError::EmptyResult)));
    }

    #[test]
    fn test_tabular_lines_convert_through_same_pass() {
        let lines = [
            "OrgDefinedId,Essay,Essay Max,Lab,Lab Max,End-of-Line Indicator",
            "#A01234567,14,20,9,10,#",
        ];
        let mut parser = TabularParser::default();
        let conversion =
            convert_lines(lines, &mut parser, Threshold::from_percent(70).unwrap()).unwrap();

        assert_eq!(conversion.header, vec!["SID", "CLO_1", "CLO_2"]);
        assert_eq!(conversion.rows[0].flags, vec![Met, Met]);
    }
}
