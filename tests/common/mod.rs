//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Once};

use openmatrix::hdf::{MemoryAttribute, MemoryBackend, MemoryContainer, MemoryDataset, MemoryGroup};
use openmatrix::util::Datatype;

pub const ZONES: usize = 10;

/// Table names of the reference matrix, in storage order.
pub const TABLES: [&str; 4] = ["All Ones", "Row Num", "Col Num", "Counting"];

static TRACING: Once = Once::new();

/// Route `tracing` output to the test harness (filter with `RUST_LOG`).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn table(name: &str, value: impl Fn(usize, usize) -> f64) -> MemoryDataset {
    let values: Vec<f64> = (1..=ZONES)
        .flat_map(|i| (1..=ZONES).map(move |j| (i, j)))
        .map(|(i, j)| value(i, j))
        .collect();
    MemoryDataset::from_values(name, (ZONES, ZONES), &values).expect("fixture table")
}

/// The 10-zone reference matrix:
/// - "All Ones": every cell is 1
/// - "Row Num": cell (i, j) is i
/// - "Col Num": cell (i, j) is j
/// - "Counting": 1 at (1,1) up to 100 at (10,10), row by row
pub fn test_matrix() -> MemoryContainer {
    let data = MemoryGroup::new("data")
        .with_dataset(table("All Ones", |_, _| 1.0))
        .with_dataset(table("Row Num", |i, _| i as f64))
        .with_dataset(table("Col Num", |_, j| j as f64))
        .with_dataset(table("Counting", |i, j| ((i - 1) * ZONES + j) as f64));

    MemoryContainer::new()
        .with_attribute(MemoryAttribute::text("OMX_VERSION", "0.2"))
        .with_attribute(
            MemoryAttribute::ints("SHAPE", &[ZONES as i64, ZONES as i64]).with_datatype(Datatype::INT32),
        )
        .with_group(data)
}

/// A backend serving the reference matrix at `path`.
pub fn backend_for(path: &Path) -> Arc<MemoryBackend> {
    let backend = Arc::new(MemoryBackend::new());
    backend.register(path, test_matrix());
    backend
}
