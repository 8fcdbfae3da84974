//! 기주 적분 진단.

use crate::thermo::{saturation_specific_humidity, CONSTANTS};

/// 연직 인덱스 방향의 부호 있는 차분.
///
/// 내부 레벨은 양옆 간격의 평균(중앙 차분), 양 끝은 한쪽 차분을 쓴다.
/// 레벨이 하나뿐이면 0 을 돌려준다.
pub fn signed_gradient(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n < 2 {
        return vec![0.0; n];
    }
    let mut out = Vec::with_capacity(n);
    out.push(values[1] - values[0]);
    for i in 1..n - 1 {
        out.push((values[i + 1] - values[i - 1]) / 2.0);
    }
    out.push(values[n - 1] - values[n - 2]);
    out
}

/// 기주 상대습도(CRH).
///
/// CRH = Σ(qv·dP)/g ÷ Σ(qsat·dP)/g
///
/// 분자나 분모 중 한쪽이라도 NaN 인 레벨은 두 합에서 모두 제외한다.
/// 유효한 레벨이 없으면 NaN 이다.
pub fn column_relative_humidity(p_hpa: &[f64], qv: &[f64], t_k: &[f64]) -> f64 {
    let g = CONSTANTS.gravity;
    let dp = signed_gradient(p_hpa);
    let (num, den) = p_hpa
        .iter()
        .zip(t_k)
        .zip(qv)
        .zip(&dp)
        .map(|(((&p, &t), &q), &dp)| {
            let qsat = saturation_specific_humidity(p, t);
            (q * dp / g, qsat * dp / g)
        })
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .fold((0.0, 0.0), |(sa, sb), (a, b)| (sa + a, sb + b));
    num / den
}
