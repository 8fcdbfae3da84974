//! 원자료 수집과 전체 처리 흐름 테스트.
use std::fs;
use std::path::Path;

use approx::assert_abs_diff_eq;
use sounding_toolbox::app::{self, MoistureInput, ProcessOptions};
use sounding_toolbox::config::{Config, InputUnits};
use sounding_toolbox::ingest::{
    self, IngestError, LocalDirectorySource, ProfileTable, RawRecord, SOURCE_MARKER,
};
use sounding_toolbox::sounding::{Cm1Outcome, MixedLayerParcel};
use sounding_toolbox::thermo;
use sounding_toolbox::units::{PressureUnit, TemperatureUnit, VelocityUnit};

const LEVELS: [f64; 19] = [
    1000.0, 975.0, 950.0, 925.0, 900.0, 850.0, 800.0, 750.0, 700.0, 650.0, 600.0, 550.0, 500.0,
    450.0, 400.0, 350.0, 300.0, 250.0, 200.0,
];

fn record(p: f64, z: f64, t: f64, rh_pct: f64, u: f64, v: f64, dropping: f64) -> RawRecord {
    RawRecord {
        pressure: p.to_string(),
        height: z.to_string(),
        temperature: t.to_string(),
        relative_humidity: rh_pct.to_string(),
        zonal_wind: u.to_string(),
        meridional_wind: v.to_string(),
        wind_speed: u.hypot(v).to_string(),
        wind_direction: "270".to_string(),
        dropping: dropping.to_string(),
    }
}

/// 상승 구간만 있는 관측 레코드.
fn ascending_records() -> Vec<RawRecord> {
    LEVELS
        .iter()
        .enumerate()
        .map(|(k, &p)| {
            let t = 303.0 * (p / 1000.0).powf(0.19);
            let td = t.min(297.0 - 0.06 * (1000.0 - p));
            let rh = 100.0 * thermo::dewpoint_to_relative_humidity(t, td);
            record(p, 500.0 * k as f64, t, rh, 1.0 + k as f64, -0.5, 0.0)
        })
        .collect()
}

fn with_dropping_row(mut records: Vec<RawRecord>) -> Vec<RawRecord> {
    records.insert(3, record(5000.0, 0.0, 350.0, 100.0, 80.0, 80.0, 1.0));
    records
}

fn write_source(root: &Path, name: &str, records: &[RawRecord]) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).expect("source dir");
    let json = serde_json::to_string(records).expect("json");
    fs::write(dir.join(format!("{name}_{SOURCE_MARKER}.json")), json).expect("source file");
}

#[test]
fn parses_json_rows() {
    let json = r#"[{"Pressure":"1000.5","Height":"12","Temperature":"300.1",
        "Relative Humidity":"55","Zonal Wind":"1.5","Meridional Wind":"-2",
        "Wind Speed":"2.5","Wind Direction":"323","Dropping":"0"}]"#;
    let table = ProfileTable::from_json_str(json, &InputUnits::default()).expect("table");
    assert_eq!(table.len(), 1);
    let row = table.rows[0];
    assert_eq!(row.pressure_hpa, 1000.5);
    assert_eq!(row.height_m, 12.0);
    assert_eq!(row.relative_humidity_pct, 55.0);
    assert_eq!((row.u_mps, row.v_mps), (1.5, -2.0));
    assert!(row.is_ascending());
}

#[test]
fn converts_input_units_to_core_units() {
    let records = vec![record(100000.0, 0.0, 20.0, 50.0, 10.0, 0.0, 0.0)];
    let units = InputUnits {
        temperature: TemperatureUnit::Celsius,
        pressure: PressureUnit::Pascal,
        wind: VelocityUnit::Knot,
    };
    let table = ProfileTable::from_records(&records, &units).expect("table");
    let row = table.rows[0];
    assert_abs_diff_eq!(row.pressure_hpa, 1000.0, epsilon = 1e-9);
    assert_abs_diff_eq!(row.temperature_k, 293.15, epsilon = 1e-9);
    assert_abs_diff_eq!(row.u_mps, 5.14444, epsilon = 1e-9);
}

#[test]
fn invalid_value_reports_row_and_column() {
    let mut records = ascending_records();
    records[2].temperature = "n/a".to_string();
    let err = ProfileTable::from_records(&records, &InputUnits::default()).unwrap_err();
    match err {
        IngestError::InvalidValue { row, column, value } => {
            assert_eq!(row, 2);
            assert_eq!(column, "Temperature");
            assert_eq!(value, "n/a");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = ProfileTable::from_json_str("{not json", &InputUnits::default()).unwrap_err();
    assert!(matches!(err, IngestError::Parse(_)));
}

#[test]
fn descending_rows_never_reach_diagnostics() {
    let units = InputUnits::default();
    let clean = ProfileTable::from_records(&ascending_records(), &units).expect("clean");
    let dirty =
        ProfileTable::from_records(&with_dropping_row(ascending_records()), &units).expect("dirty");
    assert_eq!(dirty.len(), clean.len() + 1);
    assert_eq!(dirty.ascending(), clean);

    let (clean_s, clean_z) = clean.to_sounding().expect("clean sounding");
    let (dirty_s, dirty_z) = dirty.to_sounding().expect("dirty sounding");
    assert!(!dirty_s.pressure().contains(&5000.0));
    assert_eq!(dirty_s.pressure(), clean_s.pressure());
    assert_eq!(dirty_z, clean_z);
    assert_eq!(dirty_s.u(), clean_s.u());
    assert_eq!(dirty_s.crh(), clean_s.crh());
    let parcel = MixedLayerParcel::default();
    assert_eq!(dirty_s.cape_cin(&parcel), clean_s.cape_cin(&parcel));
}

#[test]
fn all_descending_rows_is_an_error() {
    let records: Vec<RawRecord> = ascending_records()
        .into_iter()
        .map(|mut r| {
            r.dropping = "1".to_string();
            r
        })
        .collect();
    let table = ProfileTable::from_records(&records, &InputUnits::default()).expect("table");
    assert!(matches!(
        table.to_sounding(),
        Err(IngestError::NoAscendingRows)
    ));
}

#[test]
fn missing_source_is_reported() {
    let root = tempfile::tempdir().expect("tempdir");
    let source = LocalDirectorySource::new(root.path());
    let err = ingest::load_table(&source, "20210125", &InputUnits::default()).unwrap_err();
    assert!(matches!(err, IngestError::SourceNotFound { ref name, .. } if name == "20210125"));
}

#[test]
fn local_source_ignores_unmarked_files() {
    let root = tempfile::tempdir().expect("tempdir");
    let dir = root.path().join("day");
    fs::create_dir_all(&dir).expect("dir");
    fs::write(dir.join("notes.json"), "[]").expect("write");
    let source = LocalDirectorySource::new(root.path());
    assert!(ingest::load_table(&source, "day", &InputUnits::default()).is_err());

    write_source(root.path(), "day", &ascending_records());
    let table = ingest::load_table(&source, "day", &InputUnits::default()).expect("table");
    assert_eq!(table.len(), LEVELS.len());
}

#[test]
fn process_writes_cm1_sounding() {
    let data = tempfile::tempdir().expect("data");
    let out = tempfile::tempdir().expect("out");
    write_source(data.path(), "20210125", &with_dropping_row(ascending_records()));
    let cfg = Config {
        data_dir: data.path().to_path_buf(),
        output_dir: out.path().to_path_buf(),
        ..Config::default()
    };
    let source = LocalDirectorySource::new(cfg.data_dir.clone());
    let opts = ProcessOptions {
        name: "20210125".to_string(),
        ..ProcessOptions::default()
    };
    let report = app::process(&cfg, &source, &opts).expect("process");
    assert_eq!(report.levels, LEVELS.len());
    assert_eq!(report.dropped_rows, 1);
    assert!(report.crh > 0.0 && report.crh < 1.0);
    assert!(report.energy.cape_j_per_kg > 0.0);

    let expected = out.path().join("input_sounding_20210125");
    assert_eq!(
        report.export,
        Cm1Outcome::Written {
            path: expected.clone(),
            lines: LEVELS.len() + 1,
            extended: true,
        }
    );
    let text = fs::read_to_string(expected).expect("cm1 file");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), LEVELS.len() + 1);
    assert!(lines[0].starts_with("1000.0000 "));
    assert!(lines.last().is_some_and(|l| l.starts_with("12000.0000 ")));
}

#[test]
fn process_without_export_writes_nothing() {
    let data = tempfile::tempdir().expect("data");
    let out = tempfile::tempdir().expect("out");
    write_source(data.path(), "day", &ascending_records());
    let cfg = Config {
        data_dir: data.path().to_path_buf(),
        output_dir: out.path().to_path_buf(),
        ..Config::default()
    };
    let source = LocalDirectorySource::new(cfg.data_dir.clone());
    let opts = ProcessOptions {
        name: "day".to_string(),
        no_export: true,
        ..ProcessOptions::default()
    };
    let report = app::process(&cfg, &source, &opts).expect("process");
    assert_eq!(report.export, Cm1Outcome::Skipped);
    assert_eq!(report.dropped_rows, 0);
    assert_eq!(fs::read_dir(out.path()).expect("out dir").count(), 0);
}

#[test]
fn point_evaluation_from_dewpoint() {
    let r = app::evaluate_point(300.0, 1000.0, MoistureInput::Dewpoint(295.0));
    assert_eq!(r.dewpoint_k, 295.0);
    assert_abs_diff_eq!(
        r.relative_humidity,
        thermo::dewpoint_to_relative_humidity(300.0, 295.0),
        epsilon = 1e-12
    );
    assert!(r.theta_e_k > r.theta_k);
    assert!(r.virtual_temperature_k > r.t_k);
    assert!(r.saturation_deficit < 0.0);
}

#[test]
fn point_evaluation_from_relative_humidity() {
    let r = app::evaluate_point(290.0, 900.0, MoistureInput::RelativeHumidity(0.5));
    assert_abs_diff_eq!(r.relative_humidity, 0.5, epsilon = 1e-12);
    assert!(r.dewpoint_k < 290.0);
    assert_abs_diff_eq!(
        thermo::dewpoint_to_relative_humidity(290.0, r.dewpoint_k),
        0.5,
        epsilon = 1e-9
    );
}
