//! Inference-augmented record parsing with per-line heuristic fallback.

use fintake_inference::TextInferenceService;
use serde_json::Value;
use tracing::debug;

use crate::models::CandidateRecord;

use super::heuristic::HeuristicRecordParser;
use super::rules::patterns::JSON_OBJECT;
use super::RecordParser;

/// One fixed example shown to the model before the target line.
const FEW_SHOT_EXAMPLE: &str = r#"Example:
Line: 9/9/2025, 3:51:00 AM INCOME sharemarket monthly-salary +$12000.00
JSON: {"date-time": "9/9/2025, 3:51:00 AM", "type": "INCOME", "category": "sharemarket", "description": "monthly-salary", "amount": "+$12000.00"}

"#;

/// Record parser that asks a text-inference service first and degrades to
/// heuristics per line.
///
/// Failures never reach the caller: a failed call, a response without a JSON
/// object, or an object that cannot be repaired all downgrade that one line
/// to [`HeuristicRecordParser`]. An unconfigured service short-circuits the
/// whole batch to heuristics, checked once, not per line.
pub struct AugmentedRecordParser<S> {
    service: S,
    fallback: HeuristicRecordParser,
}

impl<S: TextInferenceService> AugmentedRecordParser<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            fallback: HeuristicRecordParser::new(),
        }
    }

    /// Parse every line, returning one record per line in input order.
    ///
    /// Calls run sequentially so ordering stays deterministic and a
    /// rate-limited endpoint is not hammered.
    pub async fn parse_all(&self, lines: &[String]) -> Vec<CandidateRecord> {
        if !self.service.is_configured() {
            debug!("inference unconfigured, parsing whole batch heuristically");
            return self.fallback.parse_all(lines);
        }

        let mut records = Vec::with_capacity(lines.len());
        for line in lines {
            records.push(self.parse_line(line).await);
        }
        records
    }

    async fn parse_line(&self, line: &str) -> CandidateRecord {
        match self.try_infer(line).await {
            Some(record) => record,
            None => self.fallback.parse(line),
        }
    }

    async fn try_infer(&self, line: &str) -> Option<CandidateRecord> {
        let prompt = build_prompt(line);
        let output = match self.service.infer(&prompt).await {
            Ok(output) => output,
            Err(e) => {
                debug!(error = %e, "inference call failed, falling back to heuristics");
                return None;
            }
        };

        let json = JSON_OBJECT.find(&output)?.as_str();
        record_from_json(json)
    }
}

fn build_prompt(line: &str) -> String {
    format!(
        "{FEW_SHOT_EXAMPLE}Extract the fields and return ONLY a single JSON object with keys: \
         \"date-time\",\"type\",\"category\",\"description\",\"amount\".\nLine: {line}"
    )
}

/// Repair a model-emitted JSON object into a candidate record.
///
/// Tolerates `date_time`/`date` key variants and fills absent keys with empty
/// strings. An object carrying none of the expected keys is rejected, since
/// accepting it would erase fields the heuristics could still read.
fn record_from_json(json: &str) -> Option<CandidateRecord> {
    let value: Value = serde_json::from_str(json).ok()?;
    let object = value.as_object()?;

    const KNOWN_KEYS: [&str; 7] = [
        "date-time",
        "date_time",
        "date",
        "type",
        "category",
        "description",
        "amount",
    ];
    if !KNOWN_KEYS.iter().any(|key| object.contains_key(*key)) {
        return None;
    }

    let field = |keys: &[&str]| -> String {
        keys.iter()
            .find_map(|key| object.get(*key).and_then(Value::as_str))
            .unwrap_or("")
            .trim()
            .to_string()
    };

    Some(CandidateRecord {
        occurred_at_raw: field(&["date-time", "date_time", "date"]),
        type_raw: field(&["type"]),
        category: field(&["category"]),
        description: field(&["description"]),
        amount_raw: field(&["amount"]),
    })
}
