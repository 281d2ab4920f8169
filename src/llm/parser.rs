use serde_json::Value;

use crate::error::{Error, Result};

/// Parse a list of strings out of an LLM reply.
///
/// Accepts a JSON array (bare or fenced), a JSON object holding one array of
/// strings, or numbered/bulleted lines.
pub fn parse_string_list(response: &str) -> Result<Vec<String>> {
    if let Some(json_str) = extract_json(response) {
        if let Some(items) = serde_json::from_str::<Value>(&json_str)
            .ok()
            .as_ref()
            .and_then(string_items)
        {
            return Ok(items);
        }
    }

    let items = list_lines(response);
    if items.is_empty() {
        return Err(Error::ParseError(
            "No list items found in LLM response".to_string(),
        ));
    }
    Ok(items)
}

fn string_items(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => {
            let strings: Vec<String> = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            (!strings.is_empty()).then_some(strings)
        }
        Value::Object(fields) => fields.values().find_map(|v| match v {
            Value::Array(_) => string_items(v),
            _ => None,
        }),
        _ => None,
    }
}

fn list_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter_map(|line| {
            let rest = if let Some(rest) = line
                .strip_prefix("- ")
                .or_else(|| line.strip_prefix("* "))
                .or_else(|| line.strip_prefix("• "))
            {
                rest
            } else {
                let digits = line.chars().take_while(char::is_ascii_digit).count();
                if digits == 0 {
                    return None;
                }
                line[digits..]
                    .strip_prefix(". ")
                    .or_else(|| line[digits..].strip_prefix(") "))?
            };
            let rest = rest.trim();
            (!rest.is_empty()).then(|| rest.to_string())
        })
        .collect()
}

fn extract_json(text: &str) -> Option<String> {
    // Fenced ```json block
    if let Some(start) = text.find("```json") {
        let start = start + 7;
        if let Some(end) = text[start..].find("```") {
            return Some(text[start..start + end].trim().to_string());
        }
    }

    // Plain fenced block
    if let Some(start) = text.find("```") {
        let start = start + 3;
        // Skip any language identifier on the same line
        let start = text[start..]
            .find('\n')
            .map(|i| start + i + 1)
            .unwrap_or(start);
        if let Some(end) = text[start..].find("```") {
            let content = text[start..start + end].trim();
            if content.starts_with('{') || content.starts_with('[') {
                return Some(content.to_string());
            }
        }
    }

    // Raw JSON array or object
    let start = text.find(|c: char| c == '[' || c == '{')?;
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' | '[' if !in_string => depth += 1,
            '}' | ']' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(text[start..start + i + c.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}
