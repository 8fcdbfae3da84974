use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::sounding::DEFAULT_MODEL_TOP_M;
use crate::units::*;

/// 기본 설정 파일 이름.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 관측 원자료의 단위 설정. 코어 계산 단위(K, hPa, m/s)로 환산할 때 쓴다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputUnits {
    pub temperature: TemperatureUnit,
    pub pressure: PressureUnit,
    pub wind: VelocityUnit,
}

impl Default for InputUnits {
    fn default() -> Self {
        Self {
            temperature: TemperatureUnit::Kelvin,
            pressure: PressureUnit::HectoPascal,
            wind: VelocityUnit::MeterPerSecond,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
///
/// 물리 상수는 여기 없다. [`crate::thermo::CONSTANTS`] 하나로 고정된다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 사운딩 원자료 디렉터리 (`<data_dir>/<이름>/` 아래 파일을 찾는다)
    pub data_dir: PathBuf,
    /// CM1 입력 파일 출력 디렉터리
    pub output_dir: PathBuf,
    /// CM1 모델 꼭대기 고도 [m]
    pub model_top_m: f64,
    /// 혼합층 CAPE/CIN 의 혼합층 두께 [hPa]
    pub mixed_layer_depth_hpa: f64,
    /// 로그 레벨 (RUST_LOG 가 있으면 그쪽이 우선)
    pub log_level: String,
    pub input_units: InputUnits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("soundings"),
            output_dir: PathBuf::from("."),
            model_top_m: DEFAULT_MODEL_TOP_M,
            mixed_layer_depth_hpa: 100.0,
            log_level: "info".to_string(),
            input_units: InputUnits::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        Ok(cfg)
    }
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 지정한 경로에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        save_config(self, path)
    }

    /// 사운딩 이름에 대한 기본 CM1 출력 경로.
    pub fn cm1_output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("input_sounding_{name}"))
    }
}
