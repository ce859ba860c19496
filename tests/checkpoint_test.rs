//! Checkpointing tests: autosave cadence, file naming, snapshot contents,
//! and what survives an aborted run.

use std::path::Path;
use sweeprun::{Record, Runner, Value};

fn double_experiment(record: &mut Record, params: &[Value]) -> anyhow::Result<()> {
    let x = params[0].as_i64().expect("integer parameter");
    record.set("doubled", x * 2);
    Ok(())
}

fn int_tuples(n: i64) -> Vec<Vec<Value>> {
    (1..=n).map(|x| vec![Value::Int(x)]).collect()
}

/// Number of data rows (excluding the header) in a checkpoint file.
fn csv_data_rows(path: &Path) -> usize {
    let mut reader = csv::Reader::from_path(path).expect("checkpoint file readable");
    reader.records().count()
}

#[test]
fn test_autosave_every_experiment_writes_one_file_each() {
    let dir = tempfile::tempdir().expect("tempdir");

    Runner::new(double_experiment, ["x"], int_tuples(3))
        .autosave(1, dir.path())
        .run()
        .expect("sweep failed");

    for n in 1..=3 {
        let path = dir.path().join(format!("{n}.csv"));
        assert!(path.exists(), "missing checkpoint {n}.csv");
        assert_eq!(csv_data_rows(&path), n, "{n}.csv should hold {n} rows");
    }
    assert!(!dir.path().join("4.csv").exists());
}

#[test]
fn test_autosave_cadence_three_over_nine() {
    let dir = tempfile::tempdir().expect("tempdir");

    Runner::new(double_experiment, ["x"], int_tuples(9))
        .autosave(3, dir.path())
        .run()
        .expect("sweep failed");

    for count in [3, 6, 9] {
        let path = dir.path().join(format!("{count}.csv"));
        assert!(path.exists(), "missing checkpoint {count}.csv");
        assert_eq!(csv_data_rows(&path), count);
    }
}

#[test]
fn test_checkpoint_has_header_and_no_index_column() {
    let dir = tempfile::tempdir().expect("tempdir");

    Runner::new(double_experiment, ["x"], int_tuples(2))
        .autosave(1, dir.path())
        .run()
        .expect("sweep failed");

    let mut reader =
        csv::Reader::from_path(dir.path().join("2.csv")).expect("checkpoint readable");
    let headers = reader.headers().expect("header row").clone();
    assert_eq!(headers.iter().collect::<Vec<&str>>(), vec!["x", "doubled"]);

    let first = reader.records().next().expect("one row").expect("valid row");
    assert_eq!(&first[0], "1");
    assert_eq!(&first[1], "2");
}

#[test]
fn test_cadence_longer_than_input_degrades_to_single_batch() {
    let dir = tempfile::tempdir().expect("tempdir");

    Runner::new(double_experiment, ["x"], int_tuples(3))
        .autosave(10, dir.path())
        .run()
        .expect("sweep failed");

    // One batch, one final snapshot named by the total count.
    assert!(dir.path().join("3.csv").exists());
    assert_eq!(csv_data_rows(&dir.path().join("3.csv")), 3);
    assert!(!dir.path().join("1.csv").exists());
    assert!(!dir.path().join("2.csv").exists());
}

#[test]
fn test_aborted_run_keeps_earlier_checkpoints() {
    let dir = tempfile::tempdir().expect("tempdir");

    let result = Runner::new(
        |record: &mut Record, params: &[Value]| {
            let x = params[0].as_i64().unwrap();
            anyhow::ensure!(x != 3, "combination {x} is broken");
            record.set("doubled", x * 2);
            Ok(())
        },
        ["x"],
        int_tuples(3),
    )
    .autosave(1, dir.path())
    .run();

    assert!(result.is_err(), "run should abort on the third experiment");
    // Batches one and two completed and checkpointed before the failure.
    assert_eq!(csv_data_rows(&dir.path().join("1.csv")), 1);
    assert_eq!(csv_data_rows(&dir.path().join("2.csv")), 2);
    assert!(!dir.path().join("3.csv").exists());
}

#[test]
fn test_ragged_columns_pad_empty_cells_in_csv() {
    let dir = tempfile::tempdir().expect("tempdir");

    // Sets `late` only from the second experiment on, so the column is
    // shorter than the others and the snapshot pads the gap.
    Runner::new(
        |record: &mut Record, params: &[Value]| {
            let x = params[0].as_i64().unwrap();
            record.set("doubled", x * 2);
            if x > 1 {
                record.set("late", x);
            }
            Ok(())
        },
        ["x"],
        int_tuples(3),
    )
    .autosave(3, dir.path())
    .run()
    .expect("sweep failed");

    let mut reader =
        csv::Reader::from_path(dir.path().join("3.csv")).expect("checkpoint readable");
    let rows: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("valid rows");
    assert_eq!(rows.len(), 3);
    // The `late` column holds two values; the third row's cell is empty.
    // Note the misalignment: the values sit at the top of the column even
    // though they came from later experiments.
    assert_eq!(&rows[0][2], "2");
    assert_eq!(&rows[1][2], "3");
    assert_eq!(&rows[2][2], "");
}
