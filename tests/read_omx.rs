//! End-to-end reads of the 10-zone reference matrix.

mod common;

use std::io::Write;
use std::sync::Arc;

use common::{backend_for, init_tracing, TABLES, ZONES};
use openmatrix::prelude::*;
use tempfile::NamedTempFile;

fn open_test_matrix() -> (NamedTempFile, OmxFile) {
    init_tracing();
    let f = NamedTempFile::new().unwrap();
    let file = OmxFile::open_with(backend_for(f.path()), f.path(), OmxOptions::default()).unwrap();
    (f, file)
}

#[test]
fn test_root_attributes() {
    let (_f, file) = open_test_matrix();
    let attrs = file.attributes();
    assert_eq!(attrs.get_version().unwrap(), "0.2");
    assert_eq!(attrs.get_zone_count().unwrap(), ZONES);
    assert_eq!(attrs.get_shape().unwrap(), vec![10, 10]);
}

#[test]
fn test_table_catalog() {
    let (_f, file) = open_test_matrix();
    let tables = file.tables().unwrap();
    let names = tables.table_names().unwrap();
    assert_eq!(tables.table_count().unwrap(), 4);
    assert_eq!(names.len(), tables.table_count().unwrap());
    assert_eq!(names, TABLES);
    for name in TABLES {
        assert!(tables.contains(name).unwrap());
    }
    assert!(!tables.contains("Missing").unwrap());
}

#[test]
fn test_table_contents() {
    let (_f, file) = open_test_matrix();
    let tables = file.tables().unwrap();

    let ones = tables.load("All Ones", ZONES).unwrap();
    let rows = tables.load("Row Num", ZONES).unwrap();
    let cols = tables.load("Col Num", ZONES).unwrap();
    let counting = tables.load("Counting", ZONES).unwrap();

    for i in 1..=ZONES {
        for j in 1..=ZONES {
            assert_eq!(ones.get_cell(i, j).unwrap(), 1.0);
            assert_eq!(rows.get_cell(i, j).unwrap(), i as f64);
            assert_eq!(cols.get_cell(i, j).unwrap(), j as f64);
            assert_eq!(counting.get_cell(i, j).unwrap(), ((i - 1) * ZONES + j) as f64);
        }
    }

    assert_eq!(counting.get_cell(1, 1).unwrap(), 1.0);
    assert_eq!(counting.get_cell(10, 10).unwrap(), 100.0);
    assert_eq!(counting.get_row(2).unwrap()[0], 11.0);
    assert_eq!(&counting.get_column(3).unwrap()[..3], &[3.0, 13.0, 23.0]);
}

#[test]
fn test_row_column_cell_agree() {
    let (_f, file) = open_test_matrix();
    let m = file.load_table("Counting").unwrap();
    assert_eq!(m.zones(), ZONES);
    for i in 1..=ZONES {
        let row = m.get_row(i).unwrap();
        let col = m.get_column(i).unwrap();
        assert_eq!(row.len(), ZONES);
        assert_eq!(col.len(), ZONES);
        for k in 1..=ZONES {
            assert_eq!(row[k - 1], m.get_cell(i, k).unwrap());
            assert_eq!(col[k - 1], m.get_cell(k, i).unwrap());
        }
    }
}

#[test]
fn test_index_bounds() {
    let (_f, file) = open_test_matrix();
    let m = file.matrix("Row Num", ZONES).unwrap();
    for bad in [0, ZONES + 1] {
        assert!(matches!(m.get_row(bad), Err(Error::IndexOutOfRange { count: 10, .. })));
        assert!(matches!(m.get_column(bad), Err(Error::IndexOutOfRange { .. })));
        assert!(matches!(m.get_cell(bad, 1), Err(Error::IndexOutOfRange { .. })));
        assert!(matches!(m.get_cell(1, bad), Err(Error::IndexOutOfRange { .. })));
    }
}

#[test]
fn test_loads_are_independent() {
    let (_f, file) = open_test_matrix();
    let a = file.matrix("Counting", ZONES).unwrap();
    let b = file.tables().unwrap().load("Counting", ZONES).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.as_slice().len(), ZONES * ZONES);
}

#[test]
fn test_missing_table() {
    let (_f, file) = open_test_matrix();
    let err = file.matrix("Nope", ZONES).unwrap_err();
    assert!(matches!(err, Error::TableNotFound(ref name) if name == "Nope"));
    assert!(err.to_string().contains("Nope"));
}

#[test]
fn test_wrong_zone_count() {
    let (_f, file) = open_test_matrix();
    assert!(matches!(
        file.matrix("All Ones", 5),
        Err(Error::ShapeMismatch { zones: 5, .. })
    ));
}

#[test]
fn test_missing_attribute() {
    let (_f, file) = open_test_matrix();
    assert!(matches!(
        file.attributes().get("NOT_THERE"),
        Err(Error::AttributeNotFound(ref name)) if name == "NOT_THERE"
    ));
}

#[test]
fn test_open_failures() {
    init_tracing();
    let backend = Arc::new(MemoryBackend::new());

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.omx");
    assert!(matches!(
        OmxFile::open_with(backend.clone(), &missing, OmxOptions::default()),
        Err(Error::FileNotFound(_))
    ));

    assert!(matches!(
        OmxFile::open_with(backend.clone(), dir.path(), OmxOptions::default()),
        Err(Error::NotAValidContainer(_))
    ));

    let mut text = NamedTempFile::new().unwrap();
    writeln!(text, "origin,destination,trips").unwrap();
    assert!(matches!(
        OmxFile::open_with(backend, text.path(), OmxOptions::default()),
        Err(Error::NotAValidContainer(_))
    ));
}

#[test]
fn test_validity_and_close() {
    let (_f, file) = open_test_matrix();
    assert!(file.is_valid());
    file.close().unwrap();
}

#[test]
fn test_shared_file_across_threads() {
    let (_f, file) = open_test_matrix();
    let shared = SharedOmxFile::new(file);

    let totals: Vec<f64> = std::thread::scope(|s| {
        let handles: Vec<_> = TABLES
            .iter()
            .map(|&name| {
                let shared = shared.clone();
                s.spawn(move || {
                    shared.with(|f| f.matrix(name, ZONES).map(|m| m.as_slice().iter().sum::<f64>()))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect()
    });

    // 100 ones; rows 1..=10 ten times each; same for columns; 1..=100
    assert_eq!(totals, vec![100.0, 550.0, 550.0, 5050.0]);
}
