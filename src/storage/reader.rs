use std::path::Path;

use crate::core::{Slot, RECORD_SIZE};
use crate::error::{Result, StoreError};
use crate::storage::mmap::MmapStorage;

/// 只读映射文件，按升序解码 `0..count` 号槽位，恰好返回 `count` 个结果。
///
/// `count * RECORD_SIZE` 超过文件大小时，在映射之前直接拒绝，不依赖访问时的缺页错误。
/// 每次调用都重新打开映射。
pub fn read_slots(path: &Path, count: usize) -> Result<Vec<Slot>> {
    let (file, file_size) = MmapStorage::open_ro(path)?;

    let requested = (count as u64).checked_mul(RECORD_SIZE as u64);
    match requested {
        Some(n) if n <= file_size => {}
        _ => {
            return Err(StoreError::ReadOutOfBounds {
                path: path.to_path_buf(),
                count,
                requested: requested.unwrap_or(u64::MAX),
                file_size,
            });
        }
    }
    if count == 0 {
        return Ok(Vec::new());
    }

    let mmap = MmapStorage::map_ro(path, &file)?;

    let slots: Vec<Slot> = mmap[..count * RECORD_SIZE]
        .chunks_exact(RECORD_SIZE)
        .enumerate()
        .map(|(i, chunk)| {
            let mut buf = [0u8; RECORD_SIZE];
            buf.copy_from_slice(chunk);
            Slot::decode(i, &buf)
        })
        .collect();

    tracing::debug!(
        "read {:?}: {} slots, {} empty",
        path,
        slots.len(),
        slots.iter().filter(|s| s.is_empty()).count()
    );
    Ok(slots)
}
