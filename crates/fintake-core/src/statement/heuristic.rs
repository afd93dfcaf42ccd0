//! Deterministic rule-based record parsing.

use crate::models::CandidateRecord;

use super::{tokenizer, RecordParser};

/// Best-effort line parser with no external dependencies.
///
/// Total over all inputs, including empty and malformed lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicRecordParser;

impl HeuristicRecordParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse every line, preserving order.
    pub fn parse_all(&self, lines: &[String]) -> Vec<CandidateRecord> {
        lines.iter().map(|line| self.parse(line)).collect()
    }
}

impl RecordParser for HeuristicRecordParser {
    fn parse(&self, line: &str) -> CandidateRecord {
        tokenizer::tokenize_line(line)
    }
}
