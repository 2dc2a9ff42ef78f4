// src/logging.rs
//
// Progress sinks for the solver.
// - ProgressSink: trait the sweep driver reports into, once per generation
// - NoopSink:     discards everything
// - ConsoleSink:  human-readable progress table on stdout
// - JsonlSink:    one JSON record per generation for offline analysis

use std::fs::File;
use std::io::{self, BufWriter, Write};

use serde::Serialize;

use crate::cache::CacheCounters;

/// Everything the driver knows about one completed generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRecord {
    /// 1-based sweep number.
    pub iteration: usize,
    /// Configured sweep cap, for "i / max" style displays.
    pub max_iterations: usize,
    /// `|delta - previous_delta| / n_states`, the convergence criterion.
    pub relative_delta: f64,
    /// Total vertex count across the new table.
    pub total_vertices: usize,
    /// Wall-clock time of the sweep, in milliseconds.
    pub sweep_ms: f64,
    /// Cumulative cache counters (zero when the cache is disabled).
    pub cache: CacheCounters,
}

/// Abstract per-generation telemetry sink.
pub trait ProgressSink {
    fn log_generation(&mut self, record: &GenerationRecord);
}

/// Sink that discards all records.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl ProgressSink for NoopSink {
    fn log_generation(&mut self, _record: &GenerationRecord) {
        // intentionally no-op
    }
}

/// Progress table on stdout, one row per generation.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    header_printed: bool,
}

impl ProgressSink for ConsoleSink {
    fn log_generation(&mut self, record: &GenerationRecord) {
        if !self.header_printed {
            println!(
                "{:>12} {:>14} {:>10} {:>10} {:>8} {:>8}",
                "iteration", "rel_delta", "vertices", "sweep_ms", "hits", "misses"
            );
            self.header_printed = true;
        }
        println!(
            "{:>7}/{:<4} {:>14.6} {:>10} {:>10.1} {:>8} {:>8}",
            record.iteration,
            record.max_iterations,
            record.relative_delta,
            record.total_vertices,
            record.sweep_ms,
            record.cache.hits,
            record.cache.misses,
        );
    }
}

/// JSONL file sink: each generation is a single JSON object on its own line.
pub struct JsonlSink {
    writer: BufWriter<File>,
}

impl JsonlSink {
    /// Create a new sink writing to `path`.
    pub fn create(path: &str) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl ProgressSink for JsonlSink {
    fn log_generation(&mut self, record: &GenerationRecord) {
        // Telemetry must never take the solver down with it, so I/O and
        // serialization failures are swallowed here.
        if let Ok(line) = serde_json::to_string(record) {
            let _ = self.writer.write_all(line.as_bytes());
            let _ = self.writer.write_all(b"\n");
            let _ = self.writer.flush();
        }
    }
}
