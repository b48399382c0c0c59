//! Stack capture for forwarded error records.

use std::fs;
use std::path::Path;

use backtrace::Backtrace;
use serde::Serialize;

/// Innermost frames belonging to the logging machinery itself (entry
/// termination, hook dispatch, capture). Skipping them starts the trace
/// at the caller's logging call site.
const SKIP_FRAMES: usize = 4;

/// Lines of surrounding source attached around each resolved frame.
const CONTEXT_LINES: usize = 12;

/// One resolved stack frame in Sentry wire layout.
#[derive(Debug, Serialize)]
pub struct Frame {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lineno: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pre_context: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_line: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub post_context: Vec<String>,
}

/// Capture the current stack, ordered caller-first (Sentry expects the
/// most recent call last). Source context is attached when the file is
/// still present on disk.
pub(super) fn capture() -> Vec<Frame> {
    let trace = Backtrace::new();
    let mut frames: Vec<Frame> = trace
        .frames()
        .iter()
        .skip(SKIP_FRAMES)
        .flat_map(|frame| frame.symbols())
        .map(|symbol| {
            let lineno = symbol.lineno();
            let (pre_context, context_line, post_context) = match (symbol.filename(), lineno) {
                (Some(path), Some(lineno)) => source_context(path, lineno),
                _ => (Vec::new(), None, Vec::new()),
            };
            Frame {
                filename: symbol.filename().map(|path| path.display().to_string()),
                function: symbol.name().map(|name| name.to_string()),
                lineno,
                pre_context,
                context_line,
                post_context,
            }
        })
        .collect();
    frames.reverse();
    frames
}

fn source_context(path: &Path, lineno: u32) -> (Vec<String>, Option<String>, Vec<String>) {
    let Ok(source) = fs::read_to_string(path) else {
        return (Vec::new(), None, Vec::new());
    };
    let lines: Vec<&str> = source.lines().collect();
    let index = lineno.saturating_sub(1) as usize;
    if index >= lines.len() {
        return (Vec::new(), None, Vec::new());
    }
    let start = index.saturating_sub(CONTEXT_LINES);
    let end = (index + 1 + CONTEXT_LINES).min(lines.len());
    (
        lines[start..index].iter().map(|l| l.to_string()).collect(),
        Some(lines[index].to_string()),
        lines[index + 1..end].iter().map(|l| l.to_string()).collect(),
    )
}
