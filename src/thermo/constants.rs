//! 열역학 계산 전반에서 공유하는 물리 상수.
//!
//! 모든 변환 함수는 이 모듈의 [`CONSTANTS`] 하나만 참조한다.

/// 대기 열역학 상수 묶음. 런타임에 바뀌지 않는다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    /// 중력 가속도 [m/s²]
    pub gravity: f64,
    /// 건조 공기 기체상수 Rd [J/(kg·K)]
    pub rd: f64,
    /// 수증기 기체상수 Rv [J/(kg·K)]
    pub rv: f64,
    /// 건조 공기 정압비열 cp [J/(kg·K)]
    pub cp: f64,
    /// 증발 잠열 Lv [J/kg]
    pub lv: f64,
    /// 온위 기준 압력 p00 [hPa]
    pub p00_hpa: f64,
    /// Rd/Rv 비 (혼합비 계산용)
    pub epsilon: f64,
    /// 0°C 의 켈빈 값
    pub t0_k: f64,
}

impl PhysicalConstants {
    /// Poisson 지수 R/cp.
    pub fn kappa(&self) -> f64 {
        self.rd / self.cp
    }
}

/// 전역 상수 값.
pub const CONSTANTS: PhysicalConstants = PhysicalConstants {
    gravity: 9.81,
    rd: 287.0,
    rv: 461.5,
    cp: 1004.0,
    lv: 2.5e6,
    p00_hpa: 1000.0,
    epsilon: 0.622,
    t0_k: 273.15,
};
