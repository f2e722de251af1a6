pub mod convert;
pub mod etl;
pub mod grader;
pub mod parser;
pub mod pipeline;

pub use crate::domain::model::{
    Conversion, InputFormat, OutcomeFlag, OutputRow, Record, ScorePair, StudentId, Threshold,
};
pub use crate::domain::ports::{ConfigProvider, ParsedLine, Pipeline, RecordParser, Storage};
pub use crate::utils::error::Result;
