use super::constants::CONSTANTS;
use super::humidity::{relative_humidity, specific_humidity_to_mixing_ratio, vapor_pressure};

/// 가온도[K]. 근사식 T(1 + 0.61w) 대신 수증기압을 쓰는 정확한 식을 사용한다.
///
/// Tv = T / (1 - (e/p)(1 - ε)),  ε = w (p/e - 1)
///
/// 완전 건조(e = 0)하면 ε 가 0·∞ 가 되므로 극한값 T 를 돌려준다.
pub fn virtual_temperature(p_hpa: f64, t_k: f64, qv: f64) -> f64 {
    let e = vapor_pressure(p_hpa, t_k, qv);
    if e == 0.0 {
        return t_k;
    }
    let w = specific_humidity_to_mixing_ratio(qv);
    let eps = w * (p_hpa / e - 1.0);
    t_k / (1.0 - e / p_hpa * (1.0 - eps))
}

/// 기온[K]을 온위[K]로 변환한다 (Poisson 식).
pub fn temperature_to_theta(t_k: f64, p_hpa: f64) -> f64 {
    t_k * (CONSTANTS.p00_hpa / p_hpa).powf(CONSTANTS.kappa())
}

/// 온위[K]를 기온[K]으로 변환한다.
pub fn theta_to_temperature(theta_k: f64, p_hpa: f64) -> f64 {
    theta_k * (p_hpa / CONSTANTS.p00_hpa).powf(CONSTANTS.kappa())
}

/// 습윤 공기 밀도 [kg/m³]. 100 배는 hPa → Pa 환산이다.
pub fn density(qv: f64, t_k: f64, p_hpa: f64) -> f64 {
    let e = vapor_pressure(p_hpa, t_k, qv);
    100.0 * ((p_hpa - e) / (CONSTANTS.rd * t_k) + e / (CONSTANTS.rv * t_k))
}

/// 상당온위 [K].
///
/// 건조 공기 분압 기준 온위, 수분 지수항, 잠열 지수항의 곱이다.
/// θe = T (p00/pd)^(Rd/cp) · RH^(-w·Rv/cp) · exp(Lv·w / (cp·T))
pub fn equivalent_potential_temperature(qv: f64, t_k: f64, p_hpa: f64) -> f64 {
    let c = CONSTANTS;
    let w = specific_humidity_to_mixing_ratio(qv);
    let pd = p_hpa - vapor_pressure(p_hpa, t_k, qv);
    let rh = relative_humidity(qv, t_k, p_hpa);
    t_k * (c.p00_hpa / pd).powf(c.rd / c.cp)
        * rh.powf(-w * c.rv / c.cp)
        * (c.lv * w / (c.cp * t_k)).exp()
}

/// 층 평균 가온도가 일정하다고 보고 측고 방정식으로 위쪽 기압[hPa]을 구한다.
///
/// p_top = p_base · exp(-g·Δz / (Rd·Tv))
pub fn hypsometric_pressure(p_base_hpa: f64, tv_k: f64, dz_m: f64) -> f64 {
    p_base_hpa * (-CONSTANTS.gravity * dz_m / (CONSTANTS.rd * tv_k)).exp()
}
