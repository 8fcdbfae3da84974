use crate::units::{PressureUnit, TemperatureUnit, VelocityUnit};

/// 단위가 붙은 연직 시계열.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedSeries<U> {
    pub values: Vec<f64>,
    pub unit: U,
}

/// 스큐-T 그리기 도구에 넘기는 자료. 그리기 자체는 이 크레이트 밖의 일이다.
#[derive(Debug, Clone, PartialEq)]
pub struct SkewTSeries {
    pub pressure: TaggedSeries<PressureUnit>,
    pub temperature: TaggedSeries<TemperatureUnit>,
    pub dewpoint: TaggedSeries<TemperatureUnit>,
    /// (u, v). 바람이 없는 사운딩이면 None.
    pub wind: Option<(TaggedSeries<VelocityUnit>, TaggedSeries<VelocityUnit>)>,
}

impl SkewTSeries {
    pub(crate) fn new(p: &[f64], t: &[f64], td: &[f64], wind: Option<(&[f64], &[f64])>) -> Self {
        let tagged_wind = |values: &[f64]| TaggedSeries {
            values: values.to_vec(),
            unit: VelocityUnit::MeterPerSecond,
        };
        Self {
            pressure: TaggedSeries {
                values: p.to_vec(),
                unit: PressureUnit::HectoPascal,
            },
            temperature: TaggedSeries {
                values: t.to_vec(),
                unit: TemperatureUnit::Kelvin,
            },
            dewpoint: TaggedSeries {
                values: td.to_vec(),
                unit: TemperatureUnit::Kelvin,
            },
            wind: wind.map(|(u, v)| (tagged_wind(u), tagged_wind(v))),
        }
    }

    /// 그림 세로축 하한 [hPa]. 최대 기압과 1000 hPa 중 큰 값.
    pub fn pressure_axis_bottom(&self) -> f64 {
        self.pressure
            .values
            .iter()
            .copied()
            .fold(1000.0, f64::max)
    }
}
