//! 대기 수분/온도 변수 사이의 원소별 변환 모음.
//!
//! 단위: 기압 hPa, 온도 K, 비습·혼합비 kg/kg, 상대습도는 0~1 분율.
//! 모든 함수는 상태가 없는 순수 함수이며, 물리적 전제(예: p > esat)가 깨지면
//! 오류 대신 NaN/Inf 를 돌려준다. 호출 측이 "해당 고도에서 정의되지 않음"으로
//! 해석해야 한다.
//!
//! 스칼라 함수 외에 `*_profile` 함수는 같은 길이의 연직 프로파일 슬라이스를
//! 원소별로 변환한다. 길이가 다르면 짧은 쪽에 맞춰진다.

pub mod constants;
pub mod dewpoint;
pub mod humidity;
pub mod saturation;
pub mod temperature;

pub use constants::{PhysicalConstants, CONSTANTS};
pub use dewpoint::*;
pub use humidity::*;
pub use saturation::*;
pub use temperature::*;

/// 이슬점 프로파일로부터 비습 프로파일을 구한다.
pub fn dewpoint_to_specific_humidity_profile(td: &[f64], t: &[f64], p: &[f64]) -> Vec<f64> {
    td.iter()
        .zip(t)
        .zip(p)
        .map(|((&td, &t), &p)| dewpoint_to_specific_humidity(td, t, p))
        .collect()
}

/// 상대습도(분율) 프로파일로부터 이슬점 프로파일을 구한다.
pub fn relative_humidity_to_dewpoint_profile(t: &[f64], rh: &[f64]) -> Vec<f64> {
    t.iter()
        .zip(rh)
        .map(|(&t, &rh)| relative_humidity_to_dewpoint(t, rh))
        .collect()
}

/// 포화 비습 프로파일.
pub fn saturation_specific_humidity_profile(p: &[f64], t: &[f64]) -> Vec<f64> {
    p.iter()
        .zip(t)
        .map(|(&p, &t)| saturation_specific_humidity(p, t))
        .collect()
}

/// 온위 프로파일.
pub fn theta_profile(t: &[f64], p: &[f64]) -> Vec<f64> {
    t.iter()
        .zip(p)
        .map(|(&t, &p)| temperature_to_theta(t, p))
        .collect()
}

/// 가온도 프로파일.
pub fn virtual_temperature_profile(p: &[f64], t: &[f64], qv: &[f64]) -> Vec<f64> {
    p.iter()
        .zip(t)
        .zip(qv)
        .map(|((&p, &t), &qv)| virtual_temperature(p, t, qv))
        .collect()
}
