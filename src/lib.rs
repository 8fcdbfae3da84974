//! 라디오존데 사운딩의 열역학 파생량 계산과 CM1 입력 사운딩 생성.
//!
//! 핵심 계산 로직을 라이브러리로 분리하여 CLI 외의 도구에서도 쓸 수 있게 한다.

pub mod app;
pub mod config;
pub mod ingest;
pub mod sounding;
pub mod thermo;
pub mod ui_cli;
pub mod units;

pub use sounding::{AnySounding, NoWind, Sounding, Wind};
