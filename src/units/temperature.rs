use serde::{Deserialize, Serialize};

use crate::thermo::CONSTANTS;

/// 관측 온도 단위. 코어 계산은 항상 K 를 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Kelvin,
    Celsius,
    /// 일부 지상 관측 자료
    Fahrenheit,
}

impl TemperatureUnit {
    /// 표기용 기호.
    pub const fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Kelvin => "K",
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

/// 관측값을 K 로 바꾼다. 0°C 기준점은 열역학 상수와 같은 값을 쓴다.
pub fn to_kelvin(value: f64, unit: TemperatureUnit) -> f64 {
    let t0 = CONSTANTS.t0_k;
    match unit {
        TemperatureUnit::Kelvin => value,
        TemperatureUnit::Celsius => value + t0,
        TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0 + t0,
    }
}

/// K 값을 표시 단위로 바꾼다.
pub fn from_kelvin(value_k: f64, unit: TemperatureUnit) -> f64 {
    let t0 = CONSTANTS.t0_k;
    match unit {
        TemperatureUnit::Kelvin => value_k,
        TemperatureUnit::Celsius => value_k - t0,
        TemperatureUnit::Fahrenheit => (value_k - t0) * 9.0 / 5.0 + 32.0,
    }
}

pub fn convert_temperature(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    from_kelvin(to_kelvin(value, from), to)
}
