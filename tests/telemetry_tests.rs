// tests/telemetry_tests.rs
//
// JSONL progress sink: one parseable record per generation, with the fields
// downstream analysis scripts rely on.

use std::fs;

use serde_json::Value;

use chvi::{GoalEnv, JsonlSink, Solver, SolverConfig};

#[test]
fn jsonl_sink_writes_one_record_per_generation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.jsonl");
    let path = path.to_str().unwrap();

    let env = GoalEnv::new(&[3, 3], 8, 0.2);
    let cfg = SolverConfig {
        max_iterations: 10,
        epsilon: 0.0,
        ..SolverConfig::default()
    };
    let report = {
        let mut sink = JsonlSink::create(path).unwrap();
        Solver::new(&env, cfg).unwrap().run(&mut sink)
    };

    let contents = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), report.iterations);

    for (idx, line) in lines.iter().enumerate() {
        let record: Value = serde_json::from_str(line).unwrap();
        assert_eq!(record["iteration"], Value::from(idx + 1));
        assert_eq!(record["max_iterations"], Value::from(10));
        assert!(record["relative_delta"].is_number());
        assert!(record["total_vertices"].is_number());
        assert!(record["sweep_ms"].is_number());
        assert!(record["cache"]["hits"].is_number());
        assert!(record["cache"]["misses"].is_number());
    }

    // the last record reflects the final table
    let last: Value = serde_json::from_str(lines.last().unwrap()).unwrap();
    assert_eq!(last["total_vertices"], Value::from(report.total_vertices));
}
