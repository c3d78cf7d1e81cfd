//! Parsing of model answers into JSON values.

use serde_json::Value;

use super::FlowError;

/// Extracts the JSON object of a model answer.
///
/// The answer may be wrapped in a single Markdown code fence, optionally
/// tagged `json`. Anything else around the object is rejected.
pub fn extract_json(content: &str) -> Result<Value, FlowError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(FlowError::malformed("model returned an empty answer"));
    }

    let body = match trimmed.strip_prefix("```") {
        Some(fenced) => {
            let inner = fenced
                .strip_suffix("```")
                .ok_or_else(|| FlowError::malformed("unterminated code fence"))?;
            // Drop the info string of the opening fence.
            match inner.split_once('\n') {
                Some((info, rest)) if info.trim().is_empty() || info.trim() == "json" => rest,
                Some(_) => return Err(FlowError::malformed("code fence is not json")),
                None => {
                    let inner = inner.trim_start();
                    inner.strip_prefix("json").unwrap_or(inner)
                }
            }
        }
        None => trimmed,
    };

    let value: Value = serde_json::from_str(body.trim())
        .map_err(|e| FlowError::malformed(format!("answer is not valid JSON: {}", e)))?;
    if !value.is_object() {
        return Err(FlowError::malformed("answer is not a JSON object"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_object() {
        let value = extract_json(r#" {"summary": "ok", "highlights": []} "#).unwrap();
        assert_eq!(value["summary"], "ok");
    }

    #[test]
    fn accepts_fenced_object() {
        let value = extract_json("```json\n{\"prediction\": \"up\", \"confidence\": \"Low\"}\n```").unwrap();
        assert_eq!(value["confidence"], "Low");

        let untagged = extract_json("```\n{\"a\": 1}\n```").unwrap();
        assert_eq!(untagged["a"], 1);
    }

    #[test]
    fn accepts_single_line_fence() {
        let tagged = extract_json(r#"```json {"prediction": "up", "confidence": "Low"}```"#).unwrap();
        assert_eq!(tagged["confidence"], "Low");

        let bare = extract_json(r#"```{"summary": "ok"}```"#).unwrap();
        assert_eq!(bare["summary"], "ok");
    }

    #[test]
    fn rejects_non_objects_and_prose() {
        for answer in ["", "[1, 2]", "Here is the answer: {}", "```json\n{}", "```yaml\na: 1\n```"] {
            assert!(
                matches!(extract_json(answer), Err(FlowError::MalformedModelOutput(_))),
                "accepted {:?}",
                answer
            );
        }
    }
}
