use std::path::Path;

use serde::Deserialize;

use crate::core::record::RECORD_SIZE;
use crate::error::{Result, StoreError};

/// `nextafter(2, 1) * 2^30` 截断后的历史容量：2^31 - 1，不是 20 的倍数，校验会拒绝。
pub const LEGACY_CAPACITY: u64 = (1 << 31) - 1;
/// 默认容量：2 GiB 以下最大的 RECORD_SIZE 整数倍
pub const DEFAULT_CAPACITY: u64 = LEGACY_CAPACITY - LEGACY_CAPACITY % RECORD_SIZE as u64;

/// 存储配置（可由 TOML 加载，CLI 覆盖）
///
/// ```toml
/// capacity = 2147483640
/// sync_on_write = false
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// 文件总字节数
    pub capacity: u64,
    /// 写入后、释放映射前是否 msync
    pub sync_on_write: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            sync_on_write: false,
        }
    }
}

impl StoreConfig {
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| StoreError::Config {
            path: path.to_path_buf(),
            cause: e.to_string(),
        })?;
        let cfg: Self = toml::from_str(&text).map_err(|e| StoreError::Config {
            path: path.to_path_buf(),
            cause: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 || self.capacity % RECORD_SIZE as u64 != 0 {
            return Err(StoreError::InvalidCapacity {
                capacity: self.capacity,
                record_size: RECORD_SIZE,
            });
        }
        Ok(())
    }

    pub fn slot_count(&self) -> u64 {
        self.capacity / RECORD_SIZE as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_capacity_is_slot_aligned() {
        assert_eq!(LEGACY_CAPACITY, 2_147_483_647);
        assert_eq!(DEFAULT_CAPACITY, 2_147_483_640);
        assert!(StoreConfig::default().validate().is_ok());
        assert_eq!(StoreConfig::default().slot_count(), 107_374_182);
    }

    #[test]
    fn legacy_and_zero_capacity_rejected() {
        for cap in [LEGACY_CAPACITY, 0, 21, 199] {
            let err = StoreConfig::with_capacity(cap).validate().unwrap_err();
            assert!(matches!(err, StoreError::InvalidCapacity { capacity, .. } if capacity == cap));
        }
        assert!(StoreConfig::with_capacity(200).validate().is_ok());
    }

    #[test]
    fn load_from_toml() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "capacity = 400\nsync_on_write = true").unwrap();
        let cfg = StoreConfig::load(f.path()).unwrap();
        assert_eq!(cfg.capacity, 400);
        assert!(cfg.sync_on_write);
    }

    #[test]
    fn load_fills_defaults_and_validates() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "sync_on_write = true").unwrap();
        assert_eq!(
            StoreConfig::load(f.path()).unwrap().capacity,
            DEFAULT_CAPACITY
        );

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "capacity = 2147483647").unwrap();
        assert!(matches!(
            StoreConfig::load(bad.path()),
            Err(StoreError::InvalidCapacity { .. })
        ));

        let mut unknown = tempfile::NamedTempFile::new().unwrap();
        writeln!(unknown, "record_size = 32").unwrap();
        assert!(matches!(
            StoreConfig::load(unknown.path()),
            Err(StoreError::Config { .. })
        ));
    }
}
