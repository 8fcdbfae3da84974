use std::path::PathBuf;

use thiserror::Error;

/// 사운딩 구성/출력 시 발생 가능한 오류.
///
/// 물리적 전제 위반(p <= esat 등)은 여기에 없다. 그런 값은 NaN 으로 전파된다.
#[derive(Error, Debug)]
pub enum SoundingError {
    /// 프로파일 필드 길이가 기압 프로파일과 다름
    #[error("프로파일 길이 불일치: {field} 길이 {actual}, 기대값 {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    /// 연직 레벨이 하나도 없음
    #[error("빈 프로파일로는 사운딩을 만들 수 없습니다")]
    EmptyProfile,
    /// u/v 중 하나만 주어짐
    #[error("바람 성분은 u, v 가 함께 있어야 합니다 ({present} 만 주어짐)")]
    UnpairedWind { present: &'static str },
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 임시 파일을 목적지로 옮기지 못함
    #[error("{} 저장 실패: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
