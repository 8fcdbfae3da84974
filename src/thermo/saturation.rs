//! 포화 수증기압과 포화 비습.
//!
//! 포화 수증기압은 Tetens 형 지수식을 쓰되, 섭씨 온도의 부호로 두 계수 세트 중
//! 하나를 고른다. 0°C 초과는 물 표면, 0°C 이하는 얼음 표면 포화를 따른다.
//! 두 곡선은 0°C 에서 연속일 필요가 없다 (두 경험식을 그대로 사용).

use super::constants::CONSTANTS;
use super::humidity::mixing_ratio_to_specific_humidity;

/// 기준 포화 수증기압 [hPa]
pub const ESAT_BASE_HPA: f64 = 6.108;

/// 포화 수증기압 식의 분기.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaturationBranch {
    /// Tc > 0, 물 표면
    Liquid,
    /// Tc <= 0, 얼음 표면
    Ice,
}

impl SaturationBranch {
    /// 섭씨 온도로 분기를 고른다. 두 분기는 Tc = 0 에서 빈틈 없이 나뉜다.
    pub fn select(t_c: f64) -> Self {
        if t_c > 0.0 {
            SaturationBranch::Liquid
        } else {
            SaturationBranch::Ice
        }
    }

    /// (a, b) 계수. esat = 6.108 * exp(a*Tc / (Tc + b))
    pub const fn coefficients(self) -> (f64, f64) {
        match self {
            SaturationBranch::Liquid => (17.27, 237.3),
            SaturationBranch::Ice => (21.875, 265.5),
        }
    }

    /// 지정한 분기 식으로 포화 수증기압[hPa]을 계산한다.
    pub fn vapor_pressure(self, t_c: f64) -> f64 {
        let (a, b) = self.coefficients();
        ESAT_BASE_HPA * (a * t_c / (t_c + b)).exp()
    }

    /// 수증기압[hPa]에서 섭씨 온도를 역산한다. 이슬점 계산에 쓰인다.
    pub fn temperature_c(self, vapor_pressure_hpa: f64) -> f64 {
        let (a, b) = self.coefficients();
        let ln_ratio = (vapor_pressure_hpa / ESAT_BASE_HPA).ln();
        b * ln_ratio / (a - ln_ratio)
    }
}

/// 포화 수증기압 [hPa]. 입력 온도는 K.
pub fn saturation_vapor_pressure(t_k: f64) -> f64 {
    let t_c = t_k - CONSTANTS.t0_k;
    SaturationBranch::select(t_c).vapor_pressure(t_c)
}

/// 포화 혼합비 [kg/kg]. p 는 hPa, T 는 K.
///
/// p <= esat 이면 물리적으로 정의되지 않으며 음수/무한대가 그대로 반환된다.
pub fn saturation_mixing_ratio(p_hpa: f64, t_k: f64) -> f64 {
    let esat = saturation_vapor_pressure(t_k);
    CONSTANTS.epsilon * esat / (p_hpa - esat)
}

/// 포화 비습 [kg/kg]. p 는 hPa, T 는 K.
pub fn saturation_specific_humidity(p_hpa: f64, t_k: f64) -> f64 {
    mixing_ratio_to_specific_humidity(saturation_mixing_ratio(p_hpa, t_k))
}
