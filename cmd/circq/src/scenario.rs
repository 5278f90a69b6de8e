//! Scripted operation traces.
//!
//! A scenario file names a buffer configuration, optional initial items and
//! a list of operations:
//!
//! ```yaml
//! buffer:
//!   capacity: 5
//!   policy: overwrite
//! items: [1, 2]
//! ops:
//!   - enqueue: 3
//!   - bulk_enqueue: [4, 5, 6]
//!   - dequeue
//!   - bulk_dequeue: 2
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use circq_buffer::{RingBuffer, RingConfig, Snapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// A scripted run against one buffer.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Scenario {
    #[serde(default)]
    pub buffer: RingConfig,
    #[serde(default)]
    pub items: Vec<i64>,
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub ops: Vec<Op>,
}

/// One buffer operation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    Enqueue(i64),
    Dequeue,
    Peek,
    BulkEnqueue(Vec<i64>),
    BulkDequeue(usize),
    Resize(Option<usize>),
    Discard(usize),
    Clear,
}

/// Outcome of one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub op: Op,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub size: usize,
    pub capacity: usize,
}

/// Full record of a scenario run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub buffer: RingConfig,
    pub steps: Vec<Step>,
    #[serde(rename = "final")]
    pub final_state: Snapshot<i64>,
}

impl Scenario {
    /// Loads a scenario from a `.json`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        let scenario = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&data)?,
            _ => serde_yaml::from_str(&data)?,
        };
        Ok(scenario)
    }

    /// Runs every operation in order. Operation errors are recorded in the
    /// report and do not stop the run.
    pub fn run(&self) -> Result<Report> {
        let buf = RingBuffer::with_items(self.buffer, &self.items)
            .context("failed to build buffer")?;
        info!(
            capacity = buf.capacity(),
            policy = %buf.policy(),
            strict = buf.is_strict(),
            "scenario start"
        );

        let mut steps = Vec::with_capacity(self.ops.len());
        for op in &self.ops {
            let outcome = apply(&buf, op);
            let (value, error) = match outcome {
                Ok(value) => (value, None),
                Err(e) => {
                    warn!(?op, error = %e, "operation failed");
                    (None, Some(e.to_string()))
                }
            };
            debug!(?op, size = buf.size(), head = buf.head(), tail = buf.tail(), "step");
            steps.push(Step {
                op: op.clone(),
                value,
                error,
                size: buf.size(),
                capacity: buf.capacity(),
            });
        }

        Ok(Report {
            buffer: self.buffer,
            steps,
            final_state: buf.snapshot(),
        })
    }
}

fn apply(buf: &RingBuffer<i64>, op: &Op) -> circq_buffer::Result<Option<serde_json::Value>> {
    let value: Option<serde_json::Value> = match op {
        Op::Enqueue(v) => {
            buf.enqueue(*v)?;
            None
        }
        Op::Dequeue => Some(buf.dequeue()?.into()),
        Op::Peek => Some(buf.peek()?.into()),
        Op::BulkEnqueue(values) => Some(buf.bulk_enqueue(values)?.into()),
        Op::BulkDequeue(n) => Some(buf.bulk_dequeue(*n).into()),
        Op::Resize(capacity) => {
            buf.resize(*capacity)?;
            None
        }
        Op::Discard(n) => Some(buf.discard(*n).into()),
        Op::Clear => {
            buf.clear();
            None
        }
    };
    Ok(value)
}
