use super::saturation::{saturation_specific_humidity, saturation_vapor_pressure};

/// 혼합비 w 를 비습 qv 로 변환한다. qv = w / (1 + w)
pub fn mixing_ratio_to_specific_humidity(w: f64) -> f64 {
    w / (1.0 + w)
}

/// 비습 qv 를 혼합비 w 로 변환한다. w = qv / (1 - qv)
pub fn specific_humidity_to_mixing_ratio(qv: f64) -> f64 {
    qv / (1.0 - qv)
}

/// 상대습도(0~1 분율). RH = qv / qsat(p, T)
pub fn relative_humidity(qv: f64, t_k: f64, p_hpa: f64) -> f64 {
    qv / saturation_specific_humidity(p_hpa, t_k)
}

/// 상대습도(분율)에서 비습을 계산한다. qv = RH * qsat(p, T)
pub fn relative_humidity_to_specific_humidity(t_k: f64, rh: f64, p_hpa: f64) -> f64 {
    rh * saturation_specific_humidity(p_hpa, t_k)
}

/// 비습으로부터 수증기압[hPa]을 구한다. e = esat(T) * RH
pub fn vapor_pressure(p_hpa: f64, t_k: f64, qv: f64) -> f64 {
    saturation_vapor_pressure(t_k) * relative_humidity(qv, t_k, p_hpa)
}

/// 포화 부족량 qv - qsat. 부호를 유지한다(과포화면 양수).
pub fn saturation_deficit(p_hpa: f64, t_k: f64, qv: f64) -> f64 {
    qv - saturation_specific_humidity(p_hpa, t_k)
}
