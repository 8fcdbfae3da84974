use serde::{Deserialize, Serialize};

/// 풍속 단위. 내부 기준은 m/s 이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VelocityUnit {
    MeterPerSecond,
    Knot,
}

const MPS_PER_KNOT: f64 = 0.514444;

/// 주어진 속도를 m/s 로 변환한다.
pub fn to_mps(value: f64, unit: VelocityUnit) -> f64 {
    match unit {
        VelocityUnit::MeterPerSecond => value,
        VelocityUnit::Knot => value * MPS_PER_KNOT,
    }
}

/// m/s 값을 원하는 단위로 변환한다.
pub fn from_mps(value_mps: f64, unit: VelocityUnit) -> f64 {
    match unit {
        VelocityUnit::MeterPerSecond => value_mps,
        VelocityUnit::Knot => value_mps / MPS_PER_KNOT,
    }
}
