use std::fs::OpenOptions;
use std::path::Path;

use crate::core::StoreConfig;
use crate::error::{Result, StoreError};

/// 创建（或截断）后端文件并扩展到 `config.capacity` 字节。
///
/// 不写入任何 payload；扩展区域的内容依赖文件系统的 zero-fill 行为，
/// 空槽判定正是基于这一点。已有文件内容全部丢弃。
pub fn allocate(path: &Path, config: &StoreConfig) -> Result<()> {
    config.validate()?;

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|source| StoreError::Allocate {
            path: path.to_path_buf(),
            source,
        })?;

    file.set_len(config.capacity)
        .map_err(|source| StoreError::Allocate {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(
        "allocated {:?}: {} bytes ({} slots)",
        path,
        config.capacity,
        config.slot_count()
    );
    Ok(())
}
