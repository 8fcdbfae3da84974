use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::config::{Config, ConfigError};
use crate::ingest::{self, IngestError, LocalDirectorySource, ProfileSource};
use crate::sounding::{Cm1Outcome, ConvectiveEnergy, MixedLayerParcel, SoundingError};
use crate::thermo;
use crate::ui_cli::{self, Command};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 원자료 수집 오류
    #[error("수집 오류: {0}")]
    Ingest(#[from] IngestError),
    /// 사운딩 구성/출력 오류
    #[error("사운딩 오류: {0}")]
    Sounding(#[from] SoundingError),
    /// 이슬점과 상대습도 중 하나만 주어져야 함
    #[error("--td 와 --rh 중 정확히 하나를 지정해야 합니다")]
    AmbiguousMoisture,
}

/// 사운딩 처리 옵션.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// 원자료 이름 (보통 관측 일자, 예: 20210125)
    pub name: String,
    /// 모델 꼭대기 [m]. None 이면 설정값.
    pub top_m: Option<f64>,
    /// CM1 출력 경로. None 이면 `<output_dir>/input_sounding_<name>`.
    pub output: Option<PathBuf>,
    /// CM1 출력을 하지 않음
    pub no_export: bool,
}

/// 사운딩 처리 결과.
#[derive(Debug, Clone)]
pub struct ProcessReport {
    pub name: String,
    /// 사운딩에 쓰인 레벨 수
    pub levels: usize,
    /// 하강 구간이라 제외된 행 수
    pub dropped_rows: usize,
    pub crh: f64,
    pub energy: ConvectiveEnergy,
    pub export: Cm1Outcome,
}

/// 원자료 → 사운딩 → 진단 → CM1 출력까지 한 번에 처리한다.
pub fn process(
    cfg: &Config,
    source: &dyn ProfileSource,
    opts: &ProcessOptions,
) -> Result<ProcessReport, AppError> {
    let table = ingest::load_table(source, &opts.name, &cfg.input_units)?;
    let (mut sounding, heights) = table.to_sounding()?;
    let dropped_rows = table.len() - sounding.len();
    info!(name = %opts.name, levels = sounding.len(), dropped_rows, "사운딩 구성");

    let crh = sounding.crh();
    let diagnostics = MixedLayerParcel {
        depth_hpa: cfg.mixed_layer_depth_hpa,
    };
    let energy = sounding.cape_cin(&diagnostics);

    let dest = if opts.no_export {
        None
    } else {
        Some(
            opts.output
                .clone()
                .unwrap_or_else(|| cfg.cm1_output_path(&opts.name)),
        )
    };
    let top_m = opts.top_m.unwrap_or(cfg.model_top_m);
    let export = sounding.make_cm1_sounding(heights, dest.as_deref(), top_m)?;

    Ok(ProcessReport {
        name: opts.name.clone(),
        levels: sounding.len(),
        dropped_rows,
        crh,
        energy,
        export,
    })
}

/// 단일 레벨 계산의 수분 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoistureInput {
    /// 이슬점 [K]
    Dewpoint(f64),
    /// 상대습도 (0~1 분율)
    RelativeHumidity(f64),
}

/// 단일 레벨 열역학 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointReport {
    pub t_k: f64,
    pub p_hpa: f64,
    pub dewpoint_k: f64,
    pub relative_humidity: f64,
    pub specific_humidity: f64,
    pub mixing_ratio: f64,
    pub vapor_pressure_hpa: f64,
    pub saturation_vapor_pressure_hpa: f64,
    pub saturation_specific_humidity: f64,
    pub saturation_deficit: f64,
    pub virtual_temperature_k: f64,
    pub theta_k: f64,
    pub theta_e_k: f64,
    pub density_kg_m3: f64,
}

/// 한 레벨의 기온·기압·수분으로 파생량을 모두 계산한다.
pub fn evaluate_point(t_k: f64, p_hpa: f64, moisture: MoistureInput) -> PointReport {
    let qv = match moisture {
        MoistureInput::Dewpoint(td) => thermo::dewpoint_to_specific_humidity(td, t_k, p_hpa),
        MoistureInput::RelativeHumidity(rh) => {
            thermo::relative_humidity_to_specific_humidity(t_k, rh, p_hpa)
        }
    };
    let dewpoint_k = match moisture {
        MoistureInput::Dewpoint(td) => td,
        MoistureInput::RelativeHumidity(rh) => thermo::relative_humidity_to_dewpoint(t_k, rh),
    };
    PointReport {
        t_k,
        p_hpa,
        dewpoint_k,
        relative_humidity: thermo::relative_humidity(qv, t_k, p_hpa),
        specific_humidity: qv,
        mixing_ratio: thermo::specific_humidity_to_mixing_ratio(qv),
        vapor_pressure_hpa: thermo::vapor_pressure(p_hpa, t_k, qv),
        saturation_vapor_pressure_hpa: thermo::saturation_vapor_pressure(t_k),
        saturation_specific_humidity: thermo::saturation_specific_humidity(p_hpa, t_k),
        saturation_deficit: thermo::saturation_deficit(p_hpa, t_k, qv),
        virtual_temperature_k: thermo::virtual_temperature(p_hpa, t_k, qv),
        theta_k: thermo::temperature_to_theta(t_k, p_hpa),
        theta_e_k: thermo::equivalent_potential_temperature(qv, t_k, p_hpa),
        density_kg_m3: thermo::density(qv, t_k, p_hpa),
    }
}

/// CLI 명령을 실행한다.
pub fn run(config: &Config, command: Command) -> Result<(), AppError> {
    match command {
        Command::Process {
            name,
            top,
            output,
            no_export,
        } => {
            let source = LocalDirectorySource::new(config.data_dir.clone());
            let opts = ProcessOptions {
                name,
                top_m: top,
                output,
                no_export,
            };
            let report = process(config, &source, &opts)?;
            ui_cli::print_process_report(&report);
        }
        Command::Point { t, p, moisture } => {
            let moisture = moisture.input().ok_or(AppError::AmbiguousMoisture)?;
            ui_cli::print_point_report(&evaluate_point(t, p, moisture));
        }
    }
    Ok(())
}
