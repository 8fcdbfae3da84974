//! 단일 연직 프로파일(사운딩)과 그 진단값.
//!
//! 인덱스 0 이 지면(최하층)이고 위로 갈수록 인덱스가 커진다. 기압 경사를 쓰는
//! 진단(CRH)은 이 순서를 전제로 하며 순서를 검사하지 않는다. 뒤집힌 프로파일은
//! 부호가 틀린 결과를 낸다.

pub mod cm1;
pub mod column;
pub mod convection;
pub mod error;
pub mod plot;

use tracing::debug;

use crate::thermo;

pub use cm1::{Cm1Outcome, DEFAULT_MODEL_TOP_M};
pub use column::{column_relative_humidity, signed_gradient};
pub use convection::{ConvectiveDiagnostics, ConvectiveEnergy, MixedLayerParcel};
pub use error::SoundingError;
pub use plot::SkewTSeries;

/// 바람 없는 사운딩 표시.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoWind;

/// 수평 바람 성분 [m/s]. u, v 는 항상 함께 존재한다.
#[derive(Debug, Clone, PartialEq)]
pub struct Wind {
    pub u: Vec<f64>,
    pub v: Vec<f64>,
}

/// 사운딩이 가진 바람 상태를 꺼내는 공통 인터페이스.
pub trait WindField {
    /// (u, v) 성분. 바람이 없으면 None.
    fn components(&self) -> Option<(&[f64], &[f64])>;
}

impl WindField for NoWind {
    fn components(&self) -> Option<(&[f64], &[f64])> {
        None
    }
}

impl WindField for Wind {
    fn components(&self) -> Option<(&[f64], &[f64])> {
        Some((&self.u, &self.v))
    }
}

/// 하나의 연직 프로파일.
///
/// `qv` 는 생성 시 `Td, T, p` 에서 한 번 계산되며 외부에서 직접 지정할 수 없다.
/// `z` 와 `theta` 는 CM1 출력을 요청할 때 채워진다.
#[derive(Debug, Clone)]
pub struct Sounding<W = NoWind> {
    p: Vec<f64>,
    t: Vec<f64>,
    td: Vec<f64>,
    qv: Vec<f64>,
    z: Option<Vec<f64>>,
    theta: Option<Vec<f64>>,
    wind: W,
}

/// 바람 유무가 런타임에 정해지는 경우의 사운딩.
#[derive(Debug, Clone)]
pub enum AnySounding {
    Calm(Sounding<NoWind>),
    Windy(Sounding<Wind>),
}

fn check_len(field: &'static str, expected: usize, values: &[f64]) -> Result<(), SoundingError> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(SoundingError::LengthMismatch {
            field,
            expected,
            actual: values.len(),
        })
    }
}

impl Sounding<NoWind> {
    /// 기압[hPa], 기온[K], 이슬점[K]으로 사운딩을 만들고 비습을 즉시 계산한다.
    pub fn new(p: Vec<f64>, t: Vec<f64>, td: Vec<f64>) -> Result<Self, SoundingError> {
        if p.is_empty() {
            return Err(SoundingError::EmptyProfile);
        }
        check_len("T", p.len(), &t)?;
        check_len("Td", p.len(), &td)?;
        let qv = thermo::dewpoint_to_specific_humidity_profile(&td, &t, &p);
        debug!(levels = p.len(), "사운딩 생성");
        Ok(Self {
            p,
            t,
            td,
            qv,
            z: None,
            theta: None,
            wind: NoWind,
        })
    }

    /// 바람 성분[m/s]을 붙인다.
    pub fn with_wind(self, u: Vec<f64>, v: Vec<f64>) -> Result<Sounding<Wind>, SoundingError> {
        check_len("u", self.p.len(), &u)?;
        check_len("v", self.p.len(), &v)?;
        Ok(Sounding {
            p: self.p,
            t: self.t,
            td: self.td,
            qv: self.qv,
            z: self.z,
            theta: self.theta,
            wind: Wind { u, v },
        })
    }
}

impl AnySounding {
    /// 바람 성분이 선택적으로 주어지는 생성 경로.
    ///
    /// u, v 중 하나만 있으면 [`SoundingError::UnpairedWind`] 로 즉시 실패한다.
    pub fn from_components(
        p: Vec<f64>,
        t: Vec<f64>,
        td: Vec<f64>,
        u: Option<Vec<f64>>,
        v: Option<Vec<f64>>,
    ) -> Result<Self, SoundingError> {
        match (u, v) {
            (Some(u), Some(v)) => {
                let sounding = Sounding::new(p, t, td)?.with_wind(u, v)?;
                Ok(AnySounding::Windy(sounding))
            }
            (None, None) => Ok(AnySounding::Calm(Sounding::new(p, t, td)?)),
            (Some(_), None) => Err(SoundingError::UnpairedWind { present: "u" }),
            (None, Some(_)) => Err(SoundingError::UnpairedWind { present: "v" }),
        }
    }

    pub fn has_wind(&self) -> bool {
        matches!(self, AnySounding::Windy(_))
    }
}

impl Sounding<Wind> {
    /// 동서 바람 [m/s]
    pub fn u(&self) -> &[f64] {
        &self.wind.u
    }

    /// 남북 바람 [m/s]
    pub fn v(&self) -> &[f64] {
        &self.wind.v
    }
}

impl<W: WindField> Sounding<W> {
    /// 연직 레벨 수
    pub fn len(&self) -> usize {
        self.p.len()
    }

    pub fn is_empty(&self) -> bool {
        self.p.is_empty()
    }

    /// 기압 [hPa]
    pub fn pressure(&self) -> &[f64] {
        &self.p
    }

    /// 기온 [K]
    pub fn temperature(&self) -> &[f64] {
        &self.t
    }

    /// 이슬점 [K]
    pub fn dewpoint(&self) -> &[f64] {
        &self.td
    }

    /// 비습 [kg/kg]
    pub fn qv(&self) -> &[f64] {
        &self.qv
    }

    /// 고도 [m]. CM1 출력 전에는 None.
    pub fn height(&self) -> Option<&[f64]> {
        self.z.as_deref()
    }

    /// 온위 [K]. 아직 계산되지 않았으면 None.
    pub fn theta(&self) -> Option<&[f64]> {
        self.theta.as_deref()
    }

    /// 비습을 `Td, T, p` 에서 다시 계산한다. 생성 시와 같은 식이므로 결과가 같다.
    pub fn derive_qv(&mut self) -> &[f64] {
        self.qv = thermo::dewpoint_to_specific_humidity_profile(&self.td, &self.t, &self.p);
        &self.qv
    }

    /// 온위를 계산해 두고 돌려준다. 이미 있으면 그대로 쓴다.
    pub fn derive_theta(&mut self) -> &[f64] {
        let (t, p) = (&self.t, &self.p);
        self.theta.get_or_insert_with(|| thermo::theta_profile(t, p))
    }

    /// 고도 프로파일[m]을 지정한다.
    pub fn set_height(&mut self, z: Vec<f64>) -> Result<(), SoundingError> {
        check_len("z", self.p.len(), &z)?;
        self.z = Some(z);
        Ok(())
    }

    /// 포화 비습 프로파일 [kg/kg]
    pub fn qv_saturation(&self) -> Vec<f64> {
        thermo::saturation_specific_humidity_profile(&self.p, &self.t)
    }

    /// 기주 상대습도(CRH, 무차원).
    pub fn crh(&self) -> f64 {
        column_relative_humidity(&self.p, &self.qv, &self.t)
    }

    /// 혼합층 CAPE/CIN [J/kg]. 계산은 외부 진단기에 위임한다.
    pub fn cape_cin(&self, diagnostics: &dyn ConvectiveDiagnostics) -> ConvectiveEnergy {
        diagnostics.cape_cin(&self.p, &self.t, &self.td)
    }

    /// 스큐-T 그리기에 넘길 단위 표기 시계열.
    pub fn skewt_series(&self) -> SkewTSeries {
        SkewTSeries::new(&self.p, &self.t, &self.td, self.wind.components())
    }
}
