//! 습윤 대류 진단(CAPE/CIN).
//!
//! 사운딩은 [`ConvectiveDiagnostics`] 에 기압, 기온, 이슬점만 넘기고 결과만 받는다.
//! [`MixedLayerParcel`] 은 기본 구현으로, 하층 혼합층 평균 공기괴를 들어 올린다.
//!
//! 절차:
//! 1. 지면부터 `depth_hpa` 두께의 기압 가중 평균 온위와 혼합비로 출발 공기괴를 만든다.
//! 2. LCL(Bolton 1980)까지 건조단열, 그 위로는 위단열(pseudo-adiabat)로 올린다.
//! 3. 공기괴와 환경의 가온도 차를 ln p 로 적분한다: Rd·Σ(Tv_p − Tv_e)·Δln p
//!
//! CAPE 는 양의 면적, CIN 은 LFC 아래 음의 면적(0 이하)이다. LFC 가 없으면 둘 다 0.

use crate::thermo::{
    self, saturation_mixing_ratio, specific_humidity_to_mixing_ratio, virtual_temperature,
    CONSTANTS,
};

/// 위단열 적분의 최대 기압 간격 [hPa]
const MOIST_STEP_HPA: f64 = 5.0;

/// CAPE/CIN [J/kg].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvectiveEnergy {
    pub cape_j_per_kg: f64,
    pub cin_j_per_kg: f64,
}

impl ConvectiveEnergy {
    pub const ZERO: ConvectiveEnergy = ConvectiveEnergy {
        cape_j_per_kg: 0.0,
        cin_j_per_kg: 0.0,
    };
}

/// 습윤 대류 진단기. 입력 단위는 hPa, K, K.
pub trait ConvectiveDiagnostics {
    fn cape_cin(&self, p_hpa: &[f64], t_k: &[f64], td_k: &[f64]) -> ConvectiveEnergy;
}

/// 혼합층 공기괴 CAPE/CIN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixedLayerParcel {
    /// 혼합층 두께 [hPa]
    pub depth_hpa: f64,
}

impl Default for MixedLayerParcel {
    fn default() -> Self {
        Self { depth_hpa: 100.0 }
    }
}

/// 기압 가중(사다리꼴) 평균. 층이 하나면 그 값.
fn layer_mean(p: &[f64], values: &[f64]) -> f64 {
    if p.len() == 1 {
        return values[0];
    }
    let mut sum = 0.0;
    let mut weight = 0.0;
    for i in 0..p.len() - 1 {
        let dp = (p[i] - p[i + 1]).abs();
        sum += 0.5 * (values[i] + values[i + 1]) * dp;
        weight += dp;
    }
    if weight > 0.0 {
        sum / weight
    } else {
        values[0]
    }
}

/// Bolton(1980) 식 LCL 온도[K]와 기압[hPa].
fn lcl(p_hpa: f64, t_k: f64, td_k: f64) -> (f64, f64) {
    if td_k >= t_k {
        return (t_k, p_hpa);
    }
    let t_lcl = 1.0 / (1.0 / (td_k - 56.0) + (t_k / td_k).ln() / 800.0) + 56.0;
    let p_lcl = p_hpa * (t_lcl / t_k).powf(1.0 / CONSTANTS.kappa());
    (t_lcl, p_lcl)
}

/// 위단열 기온 감률 dT/dp [K/hPa].
fn moist_lapse(p_hpa: f64, t_k: f64) -> f64 {
    let c = CONSTANTS;
    let rs = saturation_mixing_ratio(p_hpa, t_k);
    let denominator = c.cp + c.lv * c.lv * rs * c.epsilon / (c.rd * t_k * t_k);
    (c.rd * t_k + c.lv * rs) / (p_hpa * denominator)
}

/// (p0, t0) 에서 p1 까지 위단열을 RK4 로 적분한다.
fn moist_ascent(p0: f64, t0: f64, p1: f64) -> f64 {
    let steps = ((p0 - p1).abs() / MOIST_STEP_HPA).ceil().max(1.0) as usize;
    let h = (p1 - p0) / steps as f64;
    let (mut p, mut t) = (p0, t0);
    for _ in 0..steps {
        let k1 = moist_lapse(p, t);
        let k2 = moist_lapse(p + h / 2.0, t + h / 2.0 * k1);
        let k3 = moist_lapse(p + h / 2.0, t + h / 2.0 * k2);
        let k4 = moist_lapse(p + h, t + h * k3);
        t += h / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4);
        p += h;
    }
    t
}

impl MixedLayerParcel {
    /// 출발 공기괴 (기압, 기온, 혼합비).
    fn initial_parcel(&self, p: &[f64], t: &[f64], td: &[f64]) -> (f64, f64, f64) {
        let p_sfc = p[0];
        let top = p_sfc - self.depth_hpa;
        let n = p.iter().take_while(|&&pk| pk >= top).count().max(1);
        let theta = thermo::theta_profile(&t[..n], &p[..n]);
        let qv = thermo::dewpoint_to_specific_humidity_profile(&td[..n], &t[..n], &p[..n]);
        let w: Vec<f64> = qv
            .into_iter()
            .map(specific_humidity_to_mixing_ratio)
            .collect();
        let theta_ml = layer_mean(&p[..n], &theta);
        let w_ml = layer_mean(&p[..n], &w);
        (p_sfc, thermo::theta_to_temperature(theta_ml, p_sfc), w_ml)
    }
}

impl ConvectiveDiagnostics for MixedLayerParcel {
    fn cape_cin(&self, p: &[f64], t: &[f64], td: &[f64]) -> ConvectiveEnergy {
        let n = p.len().min(t.len()).min(td.len());
        if n < 2 {
            return ConvectiveEnergy::ZERO;
        }
        let (p0, t0, w0) = self.initial_parcel(&p[..n], &t[..n], &td[..n]);
        let qv0 = thermo::mixing_ratio_to_specific_humidity(w0);
        let td0 = thermo::specific_humidity_to_dewpoint(qv0, t0, p0);
        let (t_lcl, p_lcl) = lcl(p0, t0, td0);
        let theta0 = thermo::temperature_to_theta(t0, p0);

        // 출발점은 공기괴와 환경이 같으므로 부력 0
        let tv0 = virtual_temperature(p0, t0, qv0);
        let mut levels: Vec<(f64, f64, f64)> = vec![(p0, tv0, tv0)];

        let top = p0 - self.depth_hpa;
        // 위단열 구간은 직전 레벨에서 이어서 적분한다
        let mut moist_state: Option<(f64, f64)> = None;
        for ((&pk, &tk), &tdk) in p[..n].iter().zip(&t[..n]).zip(&td[..n]) {
            if pk >= top {
                continue;
            }
            let qv_env = thermo::dewpoint_to_specific_humidity(tdk, tk, pk);
            let tv_env = virtual_temperature(pk, tk, qv_env);
            let tv_parcel = if pk >= p_lcl {
                let t_parcel = thermo::theta_to_temperature(theta0, pk);
                virtual_temperature(pk, t_parcel, qv0)
            } else {
                let (p_from, t_from) = moist_state.unwrap_or((p_lcl, t_lcl));
                let t_parcel = moist_ascent(p_from, t_from, pk);
                moist_state = Some((pk, t_parcel));
                let qs = thermo::saturation_specific_humidity(pk, t_parcel);
                virtual_temperature(pk, t_parcel, qs)
            };
            levels.push((pk, tv_parcel, tv_env));
        }

        let mut cape = 0.0;
        let mut cin = 0.0;
        let mut above_lfc = false;
        for pair in levels.windows(2) {
            let (pa, tvp_a, tve_a) = pair[0];
            let (pb, tvp_b, tve_b) = pair[1];
            let area = CONSTANTS.rd * 0.5 * ((tvp_a - tve_a) + (tvp_b - tve_b)) * (pa / pb).ln();
            if !area.is_finite() {
                continue;
            }
            if area > 0.0 {
                above_lfc = true;
                cape += area;
            } else if !above_lfc {
                cin += area;
            }
        }
        if !above_lfc {
            return ConvectiveEnergy::ZERO;
        }
        ConvectiveEnergy {
            cape_j_per_kg: cape,
            cin_j_per_kg: cin,
        }
    }
}
