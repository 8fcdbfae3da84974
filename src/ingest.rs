//! 관측 원자료 표 → 사운딩 변환.
//!
//! 원자료(XML 등)를 표로 바꾸는 일은 이 크레이트 밖에서 한다. 여기서는 그 결과인
//! 행 레코드(열 이름 → 십진 문자열)를 JSON 으로 받아 숫자로 바꾸고, 하강 구간
//! 행(`Dropping != 0`)을 걸러낸 뒤 사운딩을 만든다.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::InputUnits;
use crate::sounding::{Sounding, SoundingError, Wind};
use crate::thermo;
use crate::units::{to_hpa, to_kelvin, to_mps};

/// 원자료 파일 이름에 들어 있어야 하는 표식.
pub const SOURCE_MARKER: &str = "SynchronizedSoundingData";

/// 수집 단계 오류.
#[derive(Error, Debug)]
pub enum IngestError {
    /// 원자료 파일이 없음
    #[error("원자료를 찾을 수 없음: {name} ({})", root.display())]
    SourceNotFound { name: String, root: PathBuf },
    /// 숫자로 바꿀 수 없는 값
    #[error("{row}번째 행 '{column}' 값 '{value}' 을(를) 숫자로 바꿀 수 없습니다")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
    /// 상승 구간 행이 하나도 없음
    #[error("상승 구간 관측이 없습니다")]
    NoAscendingRows,
    /// 레코드 파싱 오류
    #[error("레코드 파싱 오류: {0}")]
    Parse(#[from] serde_json::Error),
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Sounding(#[from] SoundingError),
}

/// 외부 수집기가 넘겨주는 행 하나. 값은 십진 문자열이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Pressure")]
    pub pressure: String,
    #[serde(rename = "Height")]
    pub height: String,
    #[serde(rename = "Temperature")]
    pub temperature: String,
    #[serde(rename = "Relative Humidity")]
    pub relative_humidity: String,
    #[serde(rename = "Zonal Wind")]
    pub zonal_wind: String,
    #[serde(rename = "Meridional Wind")]
    pub meridional_wind: String,
    #[serde(rename = "Wind Speed")]
    pub wind_speed: String,
    #[serde(rename = "Wind Direction")]
    pub wind_direction: String,
    #[serde(rename = "Dropping")]
    pub dropping: String,
}

/// 코어 단위로 환산한 관측 행.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationRow {
    /// 기압 [hPa]
    pub pressure_hpa: f64,
    /// 고도 [m]
    pub height_m: f64,
    /// 기온 [K]
    pub temperature_k: f64,
    /// 상대습도 [%]
    pub relative_humidity_pct: f64,
    /// 동서 바람 [m/s]
    pub u_mps: f64,
    /// 남북 바람 [m/s]
    pub v_mps: f64,
    /// 풍속 [m/s]
    pub wind_speed_mps: f64,
    /// 풍향 [deg]
    pub wind_direction_deg: f64,
    /// 0 = 상승, 그 외 = 하강
    pub dropping: f64,
}

impl ObservationRow {
    pub fn is_ascending(&self) -> bool {
        self.dropping == 0.0
    }
}

fn parse_value(row: usize, column: &'static str, value: &str) -> Result<f64, IngestError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| IngestError::InvalidValue {
            row,
            column,
            value: value.to_string(),
        })
}

impl RawRecord {
    fn to_row(&self, index: usize, units: &InputUnits) -> Result<ObservationRow, IngestError> {
        let wind = |column: &'static str, value: &str| {
            parse_value(index, column, value).map(|v| to_mps(v, units.wind))
        };
        let rh = parse_value(index, "Relative Humidity", &self.relative_humidity)?;
        Ok(ObservationRow {
            pressure_hpa: to_hpa(parse_value(index, "Pressure", &self.pressure)?, units.pressure),
            height_m: parse_value(index, "Height", &self.height)?,
            temperature_k: to_kelvin(
                parse_value(index, "Temperature", &self.temperature)?,
                units.temperature,
            ),
            relative_humidity_pct: rh,
            u_mps: wind("Zonal Wind", &self.zonal_wind)?,
            v_mps: wind("Meridional Wind", &self.meridional_wind)?,
            wind_speed_mps: wind("Wind Speed", &self.wind_speed)?,
            wind_direction_deg: parse_value(index, "Wind Direction", &self.wind_direction)?,
            dropping: parse_value(index, "Dropping", &self.dropping)?,
        })
    }
}

/// 숫자로 바꾼 관측 표.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileTable {
    pub rows: Vec<ObservationRow>,
}

impl ProfileTable {
    /// 문자열 레코드를 숫자 행으로 바꾼다.
    pub fn from_records(records: &[RawRecord], units: &InputUnits) -> Result<Self, IngestError> {
        let rows = records
            .iter()
            .enumerate()
            .map(|(i, r)| r.to_row(i, units))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(rows = rows.len(), "관측 행 변환");
        Ok(Self { rows })
    }

    /// JSON 배열(행 레코드 목록)에서 표를 만든다.
    pub fn from_json_str(src: &str, units: &InputUnits) -> Result<Self, IngestError> {
        let records: Vec<RawRecord> = serde_json::from_str(src)?;
        Self::from_records(&records, units)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 상승 구간 행만 남긴 표. 격자 자료 변환기에도 이 표를 넘긴다.
    pub fn ascending(&self) -> ProfileTable {
        let rows: Vec<ObservationRow> = self
            .rows
            .iter()
            .filter(|r| r.is_ascending())
            .copied()
            .collect();
        let dropped = self.rows.len() - rows.len();
        if dropped > 0 {
            info!(dropped, kept = rows.len(), "하강 구간 행 제외");
        }
        ProfileTable { rows }
    }

    /// 한 열을 프로파일로 꺼낸다.
    pub fn column(&self, f: impl Fn(&ObservationRow) -> f64) -> Vec<f64> {
        self.rows.iter().map(f).collect()
    }

    /// 기온과 상대습도(%)로 이슬점[K] 프로파일을 구한다.
    pub fn dewpoint(&self) -> Vec<f64> {
        let t = self.column(|r| r.temperature_k);
        let rh = self.column(|r| 0.01 * r.relative_humidity_pct);
        thermo::relative_humidity_to_dewpoint_profile(&t, &rh)
    }

    /// 상승 구간 행으로 바람 포함 사운딩과 고도 프로파일[m]을 만든다.
    ///
    /// 하강 구간 행은 여기서 항상 제외되므로 이후 진단값에 섞이지 않는다.
    pub fn to_sounding(&self) -> Result<(Sounding<Wind>, Vec<f64>), IngestError> {
        let table = self.ascending();
        if table.is_empty() {
            return Err(IngestError::NoAscendingRows);
        }
        let sounding = Sounding::new(
            table.column(|r| r.pressure_hpa),
            table.column(|r| r.temperature_k),
            table.dewpoint(),
        )?
        .with_wind(table.column(|r| r.u_mps), table.column(|r| r.v_mps))?;
        Ok((sounding, table.column(|r| r.height_m)))
    }
}

/// 이름으로 관측 원자료를 찾아 주는 수집기.
pub trait ProfileSource {
    fn fetch(&self, name: &str) -> Result<String, IngestError>;
}

/// 로컬 디렉터리 원자료. `<root>/<name>/` 안에서 이름에 [`SOURCE_MARKER`] 가
/// 들어간 `.json` 파일을 읽는다.
#[derive(Debug, Clone)]
pub struct LocalDirectorySource {
    root: PathBuf,
}

impl LocalDirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn locate(&self, name: &str) -> Option<PathBuf> {
        let dir = self.root.join(name);
        let mut candidates: Vec<PathBuf> = fs::read_dir(dir)
            .ok()?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension().is_some_and(|ext| ext == "json")
                    && path
                        .file_name()
                        .and_then(|f| f.to_str())
                        .is_some_and(|f| f.contains(SOURCE_MARKER))
            })
            .collect();
        candidates.sort();
        candidates.into_iter().next()
    }
}

impl ProfileSource for LocalDirectorySource {
    fn fetch(&self, name: &str) -> Result<String, IngestError> {
        let path = self.locate(name).ok_or_else(|| IngestError::SourceNotFound {
            name: name.to_string(),
            root: self.root.clone(),
        })?;
        info!(path = %path.display(), "원자료 읽기");
        Ok(fs::read_to_string(path)?)
    }
}

/// 수집기에서 표를 읽어 온다.
pub fn load_table(
    source: &dyn ProfileSource,
    name: &str,
    units: &InputUnits,
) -> Result<ProfileTable, IngestError> {
    let src = source.fetch(name)?;
    ProfileTable::from_json_str(&src, units)
}
