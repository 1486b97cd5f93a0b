use std::path::Path;

use crate::core::{Record, StoreConfig, RECORD_SIZE};
use crate::error::{Result, StoreError};
use crate::storage::mmap::MmapStorage;

/// 因越界被跳过的记录
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: u8,
    pub offset: u64,
    pub capacity: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// 成功写入的 index（按处理顺序，可重复）
    pub written: Vec<u8>,
    pub skipped: Vec<SkippedRecord>,
}

/// 把记录逐条拷贝到 `index * RECORD_SIZE` 处。
///
/// - 每条记录独立做越界检查（index 由调用方给出、无序）；越界只跳过并上报，不中断。
/// - 同一槽位多次写入：按输入顺序，最后一条生效。
/// - 打开 / 映射失败是致命错误，此时不会发生任何写入。
/// - 持久化：默认只依赖释放映射；`sync_on_write` 时在释放前 msync。
pub fn write_records(
    path: &Path,
    records: &[Record],
    config: &StoreConfig,
) -> Result<WriteReport> {
    let (_file, mut mmap) = MmapStorage::open_mut(path)?;
    let capacity = mmap.len() as u64;

    let mut report = WriteReport::default();
    for record in records {
        let offset = record.offset();
        if offset + RECORD_SIZE as u64 > capacity {
            tracing::warn!(
                "record index {} (offset {}) exceeds file size {}, skipping",
                record.index,
                offset,
                capacity
            );
            report.skipped.push(SkippedRecord {
                index: record.index,
                offset,
                capacity,
            });
            continue;
        }
        let start = offset as usize;
        mmap[start..start + RECORD_SIZE].copy_from_slice(&record.to_bytes());
        report.written.push(record.index);
    }

    if config.sync_on_write {
        mmap.flush().map_err(|source| StoreError::Flush {
            path: path.to_path_buf(),
            source,
        })?;
    }

    tracing::debug!(
        "write {:?}: {} written, {} skipped",
        path,
        report.written.len(),
        report.skipped.len()
    );
    Ok(report)
}
