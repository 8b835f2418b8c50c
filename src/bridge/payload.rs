// ABOUTME: Narrows loosely typed bridge query responses into step samples
// ABOUTME: Coerces numeric strings, nulls, and garbage values so sums never fail
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Bridge responses look like `{ "resultData": [ { "value": ... }, ... ] }`,
//! where `value` may be a number, a numeric string, `null`, or missing
//! entirely. Everything past this module works with [`SampleBatch`].

use serde_json::Value;
use stepsync_core::errors::{BridgeError, BridgeResult};

/// Key holding the sample list in a query response
const RESULT_DATA: &str = "resultData";

/// Key holding a sample's quantity
const VALUE: &str = "value";

/// One sample as reported by the bridge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    /// Numeric value, absent when the bridge sent nothing usable
    pub value: Option<f64>,
}

impl RawSample {
    /// Interpret one entry of `resultData`
    #[must_use]
    pub fn from_entry(entry: &Value) -> Self {
        Self {
            value: entry.get(VALUE).and_then(coerce_number),
        }
    }

    /// Steps this sample contributes to a total
    ///
    /// Missing and non-finite values contribute nothing. Negative values are
    /// kept so corrections offset earlier samples.
    #[must_use]
    pub fn steps(&self) -> f64 {
        self.value.filter(|value| value.is_finite()).unwrap_or(0.0)
    }
}

/// Samples returned by a range query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleBatch {
    samples: Vec<RawSample>,
}

impl SampleBatch {
    /// Narrow a raw query response
    ///
    /// A response without `resultData` (or with `null`) is an empty batch.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::InvalidPayload` when the response is not an object
    /// or `resultData` is present but not an array.
    pub fn from_payload(payload: &Value) -> BridgeResult<Self> {
        let Value::Object(fields) = payload else {
            return Err(BridgeError::invalid_payload(format!(
                "expected an object, got {}",
                kind_of(payload)
            )));
        };

        match fields.get(RESULT_DATA) {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::Array(entries)) => Ok(Self {
                samples: entries.iter().map(RawSample::from_entry).collect(),
            }),
            Some(other) => Err(BridgeError::invalid_payload(format!(
                "{RESULT_DATA} should be an array, got {}",
                kind_of(other)
            ))),
        }
    }

    /// Sum of every sample's steps, 0 for an empty batch
    ///
    /// Individual samples may be negative; the total never is.
    #[must_use]
    pub fn total_steps(&self) -> f64 {
        self.samples
            .iter()
            .map(RawSample::steps)
            .sum::<f64>()
            .max(0.0)
    }

    /// Number of samples in the batch
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the batch has no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl FromIterator<RawSample> for SampleBatch {
    fn from_iter<I: IntoIterator<Item = RawSample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

/// Read a number out of a JSON value the way the bridge's host runtime would
///
/// Numbers pass through, strings contribute their leading numeric prefix
/// (`"42 steps"` is 42). An array reads as its first element, since its text
/// form is the elements joined by commas (`[1, 2]` is 1, `[]` is absent).
/// Everything else is absent.
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_leading_float(text),
        Value::Array(items) => items.first().and_then(coerce_number),
        Value::Null | Value::Bool(_) | Value::Object(_) => None,
    }
}

/// Parse the longest decimal prefix of `text`, ignoring leading whitespace
fn parse_leading_float(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let digits_from = |mut index: usize| {
        while bytes.get(index).is_some_and(u8::is_ascii_digit) {
            index += 1;
        }
        index
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer_end = digits_from(end);
    let mut digit_count = integer_end - end;
    end = integer_end;

    if bytes.get(end) == Some(&b'.') {
        let fraction_end = digits_from(end + 1);
        let fraction_digits = fraction_end - (end + 1);
        if digit_count > 0 || fraction_digits > 0 {
            digit_count += fraction_digits;
            end = fraction_end;
        }
    }

    if digit_count == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign_len = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent_start = end + 1 + sign_len;
        let exponent_end = digits_from(exponent_start);
        if exponent_end > exponent_start {
            end = exponent_end;
        }
    }

    trimmed[..end].parse().ok()
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mixed_values_sum_with_coercion() {
        let payload = json!({
            "resultData": [
                { "value": 3 },
                { "value": "4" },
                { "value": null },
                { "value": 5 }
            ]
        });
        let batch = SampleBatch::from_payload(&payload).unwrap();
        assert_eq!(batch.len(), 4);
        assert!((batch.total_steps() - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_result_data_is_empty() {
        let batch = SampleBatch::from_payload(&json!({ "countReturn": 0 })).unwrap();
        assert!(batch.is_empty());
        assert!(batch.total_steps().abs() < f64::EPSILON);

        let batch = SampleBatch::from_payload(&json!({ "resultData": null })).unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        let err = SampleBatch::from_payload(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidPayload { .. }));

        let err = SampleBatch::from_payload(&json!({ "resultData": "oops" })).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidPayload { .. }));
    }

    #[test]
    fn test_entry_without_value_counts_as_zero() {
        let batch = SampleBatch::from_payload(&json!({
            "resultData": [{ "startDate": "2025-01-01T00:00:00Z" }, { "value": 7 }]
        }))
        .unwrap();
        assert!((batch.total_steps() - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_leading_float_prefixes() {
        assert_eq!(parse_leading_float("42"), Some(42.0));
        assert_eq!(parse_leading_float("  12.5 steps"), Some(12.5));
        assert_eq!(parse_leading_float("1e3"), Some(1000.0));
        assert_eq!(parse_leading_float("7e"), Some(7.0));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("-3"), Some(-3.0));
        assert_eq!(parse_leading_float("abc"), None);
        assert_eq!(parse_leading_float("."), None);
        assert_eq!(parse_leading_float(""), None);
    }

    #[test]
    fn test_unusable_values_contribute_nothing() {
        let batch: SampleBatch = [
            RawSample {
                value: Some(f64::NAN),
            },
            RawSample {
                value: Some(f64::INFINITY),
            },
            RawSample { value: None },
            RawSample { value: Some(2.5) },
        ]
        .into_iter()
        .collect();
        assert!((batch.total_steps() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_values_offset_the_total() {
        let payload = json!({ "resultData": [{ "value": 100 }, { "value": -40 }] });
        let batch = SampleBatch::from_payload(&payload).unwrap();
        assert!((batch.total_steps() - 60.0).abs() < f64::EPSILON);

        let batch: SampleBatch = [
            RawSample { value: Some(10.0) },
            RawSample {
                value: Some(-25.0),
            },
        ]
        .into_iter()
        .collect();
        assert!(batch.total_steps().abs() < f64::EPSILON);
        assert!(batch.total_steps().is_sign_positive());
    }

    #[test]
    fn test_coerce_rejects_non_scalar_values() {
        assert_eq!(coerce_number(&json!(true)), None);
        assert_eq!(coerce_number(&json!({ "v": 1 })), None);
        assert_eq!(coerce_number(&json!(null)), None);
        assert_eq!(coerce_number(&json!(9)), Some(9.0));
    }

    #[test]
    fn test_coerce_arrays_read_their_first_element() {
        assert_eq!(coerce_number(&json!([5])), Some(5.0));
        assert_eq!(coerce_number(&json!([1, 2])), Some(1.0));
        assert_eq!(coerce_number(&json!(["7 steps", 3])), Some(7.0));
        assert_eq!(coerce_number(&json!([[4, 9], 3])), Some(4.0));
        assert_eq!(coerce_number(&json!([])), None);
        assert_eq!(coerce_number(&json!([null, 5])), None);
    }
}
