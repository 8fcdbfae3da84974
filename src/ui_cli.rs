use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::{MoistureInput, PointReport, ProcessReport};
use crate::config::DEFAULT_CONFIG_PATH;
use crate::sounding::Cm1Outcome;
use crate::units::{from_kelvin, PressureUnit, TemperatureUnit};

/// 라디오존데 사운딩 열역학 진단 및 CM1 입력 사운딩 생성기
#[derive(Parser, Debug)]
#[command(name = "sounding_toolbox", version)]
pub struct Cli {
    /// 설정 파일 경로
    #[arg(
        short,
        long,
        env = "SOUNDING_TOOLBOX_CONFIG",
        default_value = DEFAULT_CONFIG_PATH,
        global = true
    )]
    pub config: PathBuf,

    /// 로그 레벨 (설정 파일 값을 덮어씀)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// 원자료를 읽어 진단값을 출력하고 CM1 입력 사운딩을 만든다
    Process {
        /// 원자료 이름 (`<data_dir>/<NAME>/` 디렉터리)
        name: String,
        /// 모델 꼭대기 고도 [m]
        #[arg(long)]
        top: Option<f64>,
        /// CM1 출력 파일 경로
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// CM1 파일을 쓰지 않음
        #[arg(long, conflicts_with = "output")]
        no_export: bool,
    },
    /// 한 레벨의 열역학 파생량을 계산한다
    Point {
        /// 기온 [K]
        #[arg(long)]
        t: f64,
        /// 기압 [hPa]
        #[arg(long)]
        p: f64,
        #[command(flatten)]
        moisture: MoistureArgs,
    },
}

/// 단일 레벨 수분 입력. 둘 중 정확히 하나가 필요하다.
#[derive(Args, Debug, Clone, PartialEq)]
#[group(required = true, multiple = false)]
pub struct MoistureArgs {
    /// 이슬점 [K]
    #[arg(long)]
    pub td: Option<f64>,
    /// 상대습도 (0~1 분율)
    #[arg(long)]
    pub rh: Option<f64>,
}

impl MoistureArgs {
    /// 인자 그룹이 보장하는 단일 입력. 그룹 검사를 거치지 않은 값이면 None.
    pub fn input(&self) -> Option<MoistureInput> {
        match (self.td, self.rh) {
            (Some(td), None) => Some(MoistureInput::Dewpoint(td)),
            (None, Some(rh)) => Some(MoistureInput::RelativeHumidity(rh)),
            _ => None,
        }
    }
}

/// 사운딩 처리 결과를 출력한다.
pub fn print_process_report(report: &ProcessReport) {
    println!("\n=== 사운딩 {} ===", report.name);
    println!("레벨 수: {} (하강 구간 제외 {}행)", report.levels, report.dropped_rows);
    println!("CRH: {:.4}", report.crh);
    println!(
        "혼합층 CAPE: {:.1} J/kg, CIN: {:.1} J/kg",
        report.energy.cape_j_per_kg, report.energy.cin_j_per_kg
    );
    match &report.export {
        Cm1Outcome::Written {
            path,
            lines,
            extended,
        } => {
            println!("CM1 사운딩: {} ({lines}줄)", path.display());
            if *extended {
                println!("참고: 모델 꼭대기까지 합성 레벨을 추가했습니다.");
            }
        }
        Cm1Outcome::Skipped => {
            println!("출력 경로가 지정되지 않아 CM1 출력을 건너뛰었습니다.");
        }
    }
}

/// 단일 레벨 계산 결과를 출력한다.
pub fn print_point_report(r: &PointReport) {
    let k = TemperatureUnit::Kelvin.symbol();
    let c = TemperatureUnit::Celsius.symbol();
    let hpa = PressureUnit::HectoPascal.symbol();
    let celsius = |t: f64| from_kelvin(t, TemperatureUnit::Celsius);
    println!("\n-- 단일 레벨 --");
    println!(
        "T = {:.2} {k} ({:.2} {c}), p = {:.2} {hpa}",
        r.t_k,
        celsius(r.t_k),
        r.p_hpa
    );
    println!("이슬점: {:.2} {k} ({:.2} {c})", r.dewpoint_k, celsius(r.dewpoint_k));
    println!("상대습도: {:.4}", r.relative_humidity);
    println!("비습: {:.6} kg/kg, 혼합비: {:.6} kg/kg", r.specific_humidity, r.mixing_ratio);
    println!(
        "수증기압: {:.4} {hpa}, 포화 수증기압: {:.4} {hpa}",
        r.vapor_pressure_hpa, r.saturation_vapor_pressure_hpa
    );
    println!(
        "포화 비습: {:.6} kg/kg, 포화 부족량: {:.6} kg/kg",
        r.saturation_specific_humidity, r.saturation_deficit
    );
    println!("가온도: {:.2} {k}", r.virtual_temperature_k);
    println!("온위: {:.2} {k}, 상당온위: {:.2} {k}", r.theta_k, r.theta_e_k);
    println!("밀도: {:.4} kg/m³", r.density_kg_m3);
    if !r.specific_humidity.is_finite() {
        println!("주의: 입력 조건에서 정의되지 않는 값이 있습니다 (p <= esat 등).");
    }
}
