//! Canonical hashing of requests and outputs.
//!
//! Hashes make reproducibility checkable: two runs with the same canonical
//! request hash and seed must produce the same output hash.

use crate::request::GenerationRequest;

/// Computes the canonical BLAKE3 hash of a request.
///
/// ```text
/// request_hash = hex(BLAKE3(JCS(request_json)))
/// ```
///
/// # Example
/// ```
/// use tunesmith_spec::GenerationRequest;
/// use tunesmith_spec::hash::canonical_request_hash;
///
/// let request = GenerationRequest::builder("calm piano").seed(42).build();
/// let hash = canonical_request_hash(&request).unwrap();
/// assert_eq!(hash.len(), 64);
/// ```
pub fn canonical_request_hash(request: &GenerationRequest) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(request)?;
    Ok(canonical_value_hash(&value))
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &serde_json::Value) -> String {
    let canonical = canonicalize_json(value);
    blake3_hash_str(&canonical)
}

/// Canonicalizes a JSON value according to RFC 8785 (JCS).
///
/// Object keys are sorted, there is no insignificant whitespace, and strings
/// use minimal escaping.
pub fn canonicalize_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => format_jcs_number(n),
        serde_json::Value::String(s) => format_jcs_string(s),
        serde_json::Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(canonicalize_json).collect();
            format!("[{}]", items.join(","))
        }
        serde_json::Value::Object(obj) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let pairs: Vec<String> = entries
                .into_iter()
                .map(|(k, v)| format!("{}:{}", format_jcs_string(k), canonicalize_json(v)))
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

fn format_jcs_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => {
            if f == 0.0 {
                return "0".to_string();
            }
            if f.fract() == 0.0 && f.abs() < 1e15 {
                return format!("{}", f as i64);
            }
            let s = format!("{}", f);
            if s.contains('.') && !s.contains('e') && !s.contains('E') {
                return s.trim_end_matches('0').trim_end_matches('.').to_string();
            }
            s
        }
        _ => "null".to_string(),
    }
}

fn format_jcs_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c < '\x20' => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result.push('"');
    result
}

/// Computes a BLAKE3 hash of a string as 64 lowercase hex characters.
pub fn blake3_hash_str(s: &str) -> String {
    blake3::hash(s.as_bytes()).to_hex().to_string()
}
