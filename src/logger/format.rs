//! Plain-text line rendering, logfmt style.

use serde_json::Value;

use super::Fields;
use crate::severity::Severity;

/// Render one record as a single line.
///
/// Layout: `level=<severity> msg=<message>` followed by the fields in key
/// order. Values are quoted only when they would be ambiguous unquoted
/// (empty, or containing whitespace, `"` or `=`); everything else renders
/// bare, so numbers stay `count=1` and plain strings stay `user=alice`.
pub(super) fn render_line(severity: Severity, message: &str, fields: &Fields) -> String {
    let mut line = format!("level={} msg={}", severity, quote(message));
    for (key, value) in fields {
        line.push(' ');
        line.push_str(key);
        line.push('=');
        line.push_str(&render_value(value));
    }
    line
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => quote(s),
        // Numbers, booleans, null, and nested structures render as
        // compact JSON.
        other => other.to_string(),
    }
}

fn quote(raw: &str) -> String {
    let ambiguous =
        raw.is_empty() || raw.chars().any(|c| c.is_whitespace() || c == '"' || c == '=');
    if ambiguous {
        format!("{:?}", raw)
    } else {
        raw.to_string()
    }
}
