use invoice_due_dates::errors::{FatalError, RunError};
use invoice_due_dates::run::{execute, RunOptions};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str = "NrFattura;DataFattura;ModalitaDiPagamento\n";

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn options(dir: &TempDir, input: &str, config: Option<&str>) -> RunOptions {
    RunOptions {
        input_file: write_file(dir.path(), "invoices.csv", input),
        config_file: config.map(|c| write_file(dir.path(), "conf.json", c)),
        output_file: Some(dir.path().join("out.csv")),
    }
}

#[test]
fn should_write_sorted_report() {
    let dir = TempDir::new().unwrap();
    let input = format!(
        "{}F-1;2019-05-06;DF\nF-2;2019-02-06;DFFM\nF-3;2018-12-30;DF60\n\
         F-4;2019-14-06;DF\nF-5;2019-04-06;XYZ\nF-6;2019-02-01;DF60\n",
        HEADER
    );
    let options = options(&dir, &input, None);

    let output = execute(&options).unwrap();
    assert_eq!(output, dir.path().join("out.csv"));

    let written = fs::read_to_string(output).unwrap();
    assert_eq!(
        written,
        "NrFattura;DataFattura;DataScadenzaPagamento\n\
         F-2;2019-02-06;2019-02-28\n\
         F-3;2018-12-30;2019-02-28\n\
         F-6;2019-02-01;2019-04-01\n\
         F-1;2019-05-06;2019-05-06\n\
         F-4;2019-14-06;Invalid Date at ID F-4: 2019-14-06\n\
         F-5;2019-04-06;Invalid Mode at ID F-5: XYZ\n"
    );
}

#[test]
fn should_apply_config_file() {
    let dir = TempDir::new().unwrap();
    let config = r#"{
        "inputCols": ["id", "date", "terms"],
        "outputCols": ["id", "date", "due"],
        "validModes": ["DF", "DF60"],
        "idField": "id",
        "dateField": "date",
        "modeField": "terms",
        "csvDelimiter": ","
    }"#;
    let input = "terms,id,date\nDFFM,1,2019-05-06\nDF60,2,2019-05-06\n";
    let options = options(&dir, input, Some(config));

    let written = fs::read_to_string(execute(&options).unwrap()).unwrap();
    assert_eq!(
        written,
        "id,date,due\n2,2019-05-06,2019-07-06\n1,2019-05-06,Invalid Mode at ID 1: DFFM\n"
    );
}

#[test]
fn should_not_write_output_for_empty_input() {
    let dir = TempDir::new().unwrap();
    let options = options(&dir, HEADER, None);

    let err = execute(&options).unwrap_err();
    assert!(matches!(err, RunError::Fatal(FatalError::EmptyInput)));
    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn should_not_write_output_for_wrong_columns() {
    let dir = TempDir::new().unwrap();
    let options = options(&dir, "A;B;C\n1;2;3\n", None);

    let err = execute(&options).unwrap_err();
    assert_eq!(err.to_string(), r#"Invalid CSV Columns: ["A", "B", "C"]"#);
    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn should_not_write_output_for_truncated_record() {
    let dir = TempDir::new().unwrap();
    let input = format!("{}F-1;2019-05-06;DF\nF-2;2019-05-06\n", HEADER);
    let options = options(&dir, &input, None);

    assert!(matches!(
        execute(&options),
        Err(RunError::Fatal(FatalError::Stage { .. }))
    ));
    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn should_fail_on_invalid_config() {
    let dir = TempDir::new().unwrap();
    let input = format!("{}F-1;2019-05-06;DF\n", HEADER);
    let options = options(&dir, &input, Some(r#"{"csvDelimiter": "||"}"#));

    assert!(matches!(execute(&options), Err(RunError::Config(_))));
    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn should_fail_on_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let options = RunOptions {
        input_file: dir.path().join("missing.csv"),
        ..Default::default()
    };

    assert!(matches!(execute(&options), Err(RunError::Input(_))));
}

#[test]
fn should_name_output_after_input_by_default() {
    let dir = TempDir::new().unwrap();
    let input = format!("{}F-1;2019-05-06;DF\n", HEADER);
    let options = RunOptions {
        output_file: None,
        ..options(&dir, &input, None)
    };

    let output = execute(&options).unwrap();
    let name = output.file_name().unwrap().to_string_lossy().into_owned();

    assert_eq!(output.parent(), Some(dir.path()));
    assert!(name.starts_with("DSP_invoices_"));
    assert!(name.ends_with(".csv"));
}

#[test]
fn should_write_report_with_narrower_output_header() {
    let dir = TempDir::new().unwrap();
    let input = format!("{}F-1;2019-05-06;DFFM\n", HEADER);
    let options = options(&dir, &input, Some(r#"{"outputCols": ["Fattura", "Scadenza"]}"#));

    let written = fs::read_to_string(execute(&options).unwrap()).unwrap();
    assert_eq!(written, "Fattura;Scadenza\nF-1;2019-05-06;2019-05-31\n");
}
