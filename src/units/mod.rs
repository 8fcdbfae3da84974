//! 단위 정의 및 변환 모듈 모음. 코어 계산 단위는 K, hPa, m/s 이다.

pub mod pressure;
pub mod temperature;
pub mod velocity;

pub use pressure::{convert_pressure, from_hpa, to_hpa, PressureUnit};
pub use temperature::{convert_temperature, from_kelvin, to_kelvin, TemperatureUnit};
pub use velocity::{from_mps, to_mps, VelocityUnit};
