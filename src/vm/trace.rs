//! Stack traces
//!
//! A [`StackTrace`] is an owned snapshot of the evaluation stack, so it can
//! outlive the library the frames borrowed from (errors carry one).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::frames::{Frame, Value};
use crate::frontend::parser::ast::Group;

/// Frames shown before older ones are elided
pub const MAX_TRACE_FRAMES: usize = 100;

/// Render a carried value, `-` standing for failure
pub fn display_value(value: Value) -> String {
    match value {
        Some(x) => x.to_string(),
        None => "-".to_string(),
    }
}

/// Snapshot of one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceFrame {
    pub input: Value,
    /// Function name, for library entries
    pub function: Option<String>,
    /// Rendered group
    pub group: Arc<str>,
    /// Column and text of the expression most recently started
    pub cursor: Option<(usize, Arc<str>)>,
}

/// Snapshot of the whole evaluation stack, outermost frame first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackTrace {
    pub frames: Vec<TraceFrame>,
    /// Value carried when the snapshot was taken
    pub value: Value,
}

impl StackTrace {
    /// An empty trace (no frames) ending in `value`
    pub fn empty(value: Value) -> Self {
        Self {
            frames: Vec::new(),
            value,
        }
    }

    /// Capture the current stack
    pub fn capture(
        stack: &[Frame<'_>],
        value: Value,
    ) -> Self {
        // Recursion repeats the same few groups; render each one once
        let mut groups: HashMap<*const Group, Arc<str>> = HashMap::new();
        let mut cursors: HashMap<(*const Group, usize, usize), (usize, Arc<str>)> = HashMap::new();

        let frames = stack
            .iter()
            .map(|frame| {
                let key = frame.group as *const Group;
                let group = groups
                    .entry(key)
                    .or_insert_with(|| Arc::from(frame.group.to_string()))
                    .clone();
                let cursor = frame.last_started().map(|expr| {
                    cursors
                        .entry((key, frame.branch, frame.position))
                        .or_insert_with(|| {
                            let column = frame.group.column_of(frame.branch, frame.position - 1);
                            (column, Arc::from(expr.to_string()))
                        })
                        .clone()
                });
                TraceFrame {
                    input: frame.input,
                    function: frame.group.name.clone(),
                    group,
                    cursor,
                }
            })
            .collect();

        Self { frames, value }
    }

    /// Number of captured frames
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Render as lines, eliding the middle of stacks deeper than `max_frames`
    pub fn lines(
        &self,
        max_frames: usize,
    ) -> Vec<String> {
        let len = self.frames.len();
        let (skip_from, skip_to) = if len <= max_frames {
            (len, len)
        } else {
            (max_frames / 2, len - (max_frames + 1) / 2)
        };

        let mut lines = vec![String::new(), "Stack trace:".to_string(), String::new()];

        let mut i = 0;
        while i < len {
            if i >= skip_from && i + 1 < skip_to {
                lines.push(String::new());
                lines.push(format!("{} - {}. Skipping frames...", i, skip_to - 1));
                lines.push(String::new());
                i = skip_to;
                continue;
            }

            let frame = &self.frames[i];
            let input = display_value(frame.input);
            match &frame.function {
                Some(name) => lines.push(format!("{}. Evaluating {} as input to function: {}", i, input, name)),
                None => lines.push(format!("{}. Evaluating {} as input to:", i, input)),
            }
            let indent = " ".repeat(i.to_string().len() + 4);
            lines.push(format!("{}{}", indent, frame.group));
            if let Some((column, expr)) = &frame.cursor {
                lines.push(format!("{}{}{}", indent, " ".repeat(*column), expr));
            }

            i += 1;
        }

        lines.push(format!("{}. Evaluated to {}.", len, display_value(self.value)));
        lines.push(String::new());
        lines
    }
}

impl fmt::Display for StackTrace {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.lines(MAX_TRACE_FRAMES).join("\n"))
    }
}
