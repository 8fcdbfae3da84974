use serde::{Deserialize, Serialize};

/// 압력 단위. 내부 기준은 항상 hPa(절대압)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    HectoPascal,
    MilliBar,
    Pascal,
    KiloPascal,
}

impl PressureUnit {
    /// 표기용 기호.
    pub const fn symbol(self) -> &'static str {
        match self {
            PressureUnit::HectoPascal => "hPa",
            PressureUnit::MilliBar => "mbar",
            PressureUnit::Pascal => "Pa",
            PressureUnit::KiloPascal => "kPa",
        }
    }
}

const PA_PER_HPA: f64 = 100.0;

/// 주어진 압력을 hPa 로 변환한다.
pub fn to_hpa(value: f64, unit: PressureUnit) -> f64 {
    match unit {
        // mbar 와 hPa 는 같은 크기
        PressureUnit::HectoPascal | PressureUnit::MilliBar => value,
        PressureUnit::Pascal => value / PA_PER_HPA,
        PressureUnit::KiloPascal => value * 10.0,
    }
}

/// hPa 값을 원하는 단위로 변환한다.
pub fn from_hpa(value_hpa: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::HectoPascal | PressureUnit::MilliBar => value_hpa,
        PressureUnit::Pascal => value_hpa * PA_PER_HPA,
        PressureUnit::KiloPascal => value_hpa / 10.0,
    }
}

/// 압력을 원하는 단위로 변환한다.
pub fn convert_pressure(value: f64, from: PressureUnit, to: PressureUnit) -> f64 {
    let hpa = to_hpa(value, from);
    from_hpa(hpa, to)
}
