use super::constants::CONSTANTS;
use super::humidity::{relative_humidity, relative_humidity_to_specific_humidity};
use super::saturation::{saturation_vapor_pressure, SaturationBranch};

/// 이슬점으로부터 상대습도(분율)를 구한다. RH = esat(Td) / esat(T)
pub fn dewpoint_to_relative_humidity(t_k: f64, td_k: f64) -> f64 {
    saturation_vapor_pressure(td_k) / saturation_vapor_pressure(t_k)
}

/// 상대습도(분율)로부터 이슬점[K]을 구한다.
///
/// 역산 분기는 이슬점이 아니라 기온의 섭씨 부호로 고른다. 기온이 영상이고
/// 이슬점이 영하인 경우에도 물 표면 식으로 역산한다.
pub fn relative_humidity_to_dewpoint(t_k: f64, rh: f64) -> f64 {
    let ed = saturation_vapor_pressure(t_k) * rh;
    let t_c = t_k - CONSTANTS.t0_k;
    SaturationBranch::select(t_c).temperature_c(ed) + CONSTANTS.t0_k
}

/// 이슬점[K]으로부터 비습[kg/kg]을 구한다.
pub fn dewpoint_to_specific_humidity(td_k: f64, t_k: f64, p_hpa: f64) -> f64 {
    let rh = dewpoint_to_relative_humidity(t_k, td_k);
    relative_humidity_to_specific_humidity(t_k, rh, p_hpa)
}

/// 비습[kg/kg]으로부터 이슬점[K]을 구한다.
pub fn specific_humidity_to_dewpoint(qv: f64, t_k: f64, p_hpa: f64) -> f64 {
    let rh = relative_humidity(qv, t_k, p_hpa);
    relative_humidity_to_dewpoint(t_k, rh)
}
