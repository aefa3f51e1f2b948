//! Speed Profile - 发报速度值对象

use serde::Deserialize;

use super::errors::DrillError;

/// 发报速度（字符速度 + Farnsworth 有效速度）
///
/// 配置中写作两元素数组 `[wpm, farnsworth]`，反序列化时即做校验。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "(u32, u32)")]
pub struct SpeedProfile {
    wpm: u32,
    farnsworth: u32,
}

impl SpeedProfile {
    pub fn new(wpm: u32, farnsworth: u32) -> Result<Self, DrillError> {
        let invalid = |reason| DrillError::InvalidSpeed {
            wpm,
            farnsworth,
            reason,
        };
        if wpm == 0 || farnsworth == 0 {
            return Err(invalid("速度必须为正数"));
        }
        if farnsworth > wpm {
            return Err(invalid("Farnsworth 速度不能高于字符速度"));
        }
        Ok(Self { wpm, farnsworth })
    }

    /// 字符发送速度（WPM）
    pub fn wpm(&self) -> u32 {
        self.wpm
    }

    /// Farnsworth 有效速度（WPM）
    pub fn farnsworth(&self) -> u32 {
        self.farnsworth
    }

    /// 音频文件名后缀，例如 `_20@10`
    pub fn file_suffix(&self) -> String {
        format!("_{}@{}", self.wpm, self.farnsworth)
    }
}

impl TryFrom<(u32, u32)> for SpeedProfile {
    type Error = DrillError;

    fn try_from((wpm, farnsworth): (u32, u32)) -> Result<Self, Self::Error> {
        Self::new(wpm, farnsworth)
    }
}

impl std::fmt::Display for SpeedProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.wpm, self.farnsworth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_profile() {
        let profile = SpeedProfile::new(20, 10).unwrap();
        assert_eq!(profile.wpm(), 20);
        assert_eq!(profile.farnsworth(), 10);
        assert_eq!(profile.file_suffix(), "_20@10");
        assert_eq!(profile.to_string(), "20@10");
    }

    #[test]
    fn test_equal_speeds_allowed() {
        let profile = SpeedProfile::new(18, 18).unwrap();
        assert_eq!(profile.file_suffix(), "_18@18");
    }

    #[test]
    fn test_rejects_zero() {
        assert!(SpeedProfile::new(0, 0).is_err());
        assert!(SpeedProfile::new(20, 0).is_err());
    }

    #[test]
    fn test_rejects_farnsworth_above_wpm() {
        let err = SpeedProfile::new(10, 20).unwrap_err();
        assert!(matches!(err, DrillError::InvalidSpeed { wpm: 10, farnsworth: 20, .. }));
    }

    #[test]
    fn test_try_from_tuple() {
        let profile = SpeedProfile::try_from((25, 15)).unwrap();
        assert_eq!((profile.wpm(), profile.farnsworth()), (25, 15));
        assert!(SpeedProfile::try_from((10, 20)).is_err());
    }
}
