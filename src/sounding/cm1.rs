//! CM1 `input_sounding` 형식 출력.
//!
//! 형식 (모든 값 소수점 4자리, 공백 구분, 헤더 없음):
//!
//! ```text
//! p_sfc[hPa] theta_sfc[K] qv_sfc[g/kg]
//! z[m] theta[K] qv[g/kg] u[m/s] v[m/s]      (인덱스 1 부터 레벨마다 한 줄)
//! top theta_top qv_top u_top v_top          (관측 최고 고도 < top 일 때만)
//! ```
//!
//! 마지막 줄은 관측 최상층 위로 프로파일을 모델 꼭대기까지 늘린 합성 레벨이다.
//! 최상층의 가온도가 연장층에서 일정하다고 보고 측고 방정식으로 꼭대기 기압을
//! 구하고, 그 기압에서 최상층 기온으로 온위를 계산한다. 수분과 바람은 최상층
//! 값을 그대로 쓴다.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};
use tracing::{info, warn};

use super::{Sounding, SoundingError, Wind};
use crate::thermo;

/// 기본 모델 꼭대기 고도 [m]
pub const DEFAULT_MODEL_TOP_M: f64 = 12000.0;

/// CM1 출력 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum Cm1Outcome {
    /// 파일을 기록함
    Written {
        path: PathBuf,
        lines: usize,
        /// 합성 꼭대기 레벨을 추가했는지 여부
        extended: bool,
    },
    /// 출력 경로가 없어 건너뜀
    Skipped,
}

/// 모델 꼭대기로 연장한 합성 레벨.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopExtension {
    pub height_m: f64,
    pub pressure_hpa: f64,
    pub theta_k: f64,
    pub qv: f64,
    pub u: f64,
    pub v: f64,
}

/// 목적지와 같은 디렉터리에 임시 파일을 만든다.
///
/// 기본 권한은 일반 파일 생성과 같이 0644 에 umask 를 적용한 값이다. 기존
/// 목적지 파일이 있으면 그 권한을 그대로 물려받는다.
fn staging_file(dir: &Path, dest: &Path) -> io::Result<NamedTempFile> {
    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }
    let tmp = builder.tempfile_in(dir)?;
    if let Ok(meta) = fs::metadata(dest) {
        if meta.is_file() {
            tmp.as_file().set_permissions(meta.permissions())?;
        }
    }
    Ok(tmp)
}

fn fmt_line(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:.4}"))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Sounding<Wind> {
    /// 관측 최고 고도가 `top_m` 보다 낮으면 꼭대기 합성 레벨을 계산한다.
    ///
    /// 고도가 아직 지정되지 않았으면 None.
    pub fn top_extension(&self, top_m: f64) -> Option<TopExtension> {
        let z = self.z.as_deref()?;
        let max_z = z.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max_z >= top_m {
            return None;
        }
        let k = self.len() - 1;
        let (p, t, qv) = (self.p[k], self.t[k], self.qv[k]);
        let tv = thermo::virtual_temperature(p, t, qv);
        let pressure_hpa = thermo::hypsometric_pressure(p, tv, top_m - z[k]);
        Some(TopExtension {
            height_m: top_m,
            pressure_hpa,
            theta_k: thermo::temperature_to_theta(t, pressure_hpa),
            qv,
            u: self.wind.u[k],
            v: self.wind.v[k],
        })
    }

    /// 고도 `z`[m]를 붙이고 CM1 입력 파일의 각 줄을 만든다 (줄바꿈 미포함).
    pub fn cm1_lines(&mut self, z: Vec<f64>, top_m: f64) -> Result<Vec<String>, SoundingError> {
        self.set_height(z)?;
        self.derive_theta();
        let theta = self.theta.as_deref().unwrap_or_default();
        let z = self.z.as_deref().unwrap_or_default();

        let mut lines = Vec::with_capacity(self.len() + 1);
        lines.push(fmt_line(&[self.p[0], theta[0], self.qv[0] * 1000.0]));
        for k in 1..self.len() {
            lines.push(fmt_line(&[
                z[k],
                theta[k],
                self.qv[k] * 1000.0,
                self.wind.u[k],
                self.wind.v[k],
            ]));
        }
        if let Some(top) = self.top_extension(top_m) {
            lines.push(fmt_line(&[
                top.height_m,
                top.theta_k,
                top.qv * 1000.0,
                top.u,
                top.v,
            ]));
        }
        Ok(lines)
    }

    /// CM1 입력 파일을 `dest` 에 기록한다.
    ///
    /// `dest` 가 None 이면 아무것도 하지 않고 [`Cm1Outcome::Skipped`] 를 돌려준다.
    /// 같은 디렉터리의 임시 파일에 모두 쓴 뒤 이름을 바꾸므로, 도중에 실패해도
    /// 잘린 파일이 목적지에 남지 않는다.
    pub fn make_cm1_sounding(
        &mut self,
        z: Vec<f64>,
        dest: Option<&Path>,
        top_m: f64,
    ) -> Result<Cm1Outcome, SoundingError> {
        let Some(dest) = dest else {
            warn!("출력 경로가 지정되지 않아 CM1 사운딩 출력을 건너뜁니다");
            return Ok(Cm1Outcome::Skipped);
        };
        let lines = self.cm1_lines(z, top_m)?;
        let extended = lines.len() > self.len();

        let dir = match dest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = staging_file(dir, dest)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            for line in &lines {
                writeln!(writer, "{line}")?;
            }
            writer.flush()?;
        }
        tmp.persist(dest).map_err(|e| SoundingError::Persist {
            path: dest.to_path_buf(),
            source: e.error,
        })?;

        info!(
            path = %dest.display(),
            lines = lines.len(),
            extended,
            "CM1 사운딩 기록 완료"
        );
        Ok(Cm1Outcome::Written {
            path: dest.to_path_buf(),
            lines: lines.len(),
            extended,
        })
    }
}
