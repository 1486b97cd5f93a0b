use std::fs::{File, OpenOptions};
use std::path::Path;

use memmap2::{Mmap, MmapMut};

use crate::error::{Result, StoreError};

/// 映射获取的统一入口。
///
/// 返回的 (File, 映射) 由调用方按声明顺序持有：映射在文件句柄之后声明，
/// 作用域结束时先 unmap 再关闭句柄（含所有 `?` 提前返回路径）。
///
/// 同一文件上并发运行多个 writer/reader 不安全：这里不加锁，也没有跨进程互斥，
/// 由调用方保证串行。
pub struct MmapStorage;

impl MmapStorage {
    /// 读写映射整个已存在的文件（不创建、不改尺寸）
    pub fn open_mut(path: &Path) -> Result<(File, MmapMut)> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| StoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        // SAFETY: 映射期间文件不被本进程其他路径改尺寸；跨进程并发修改属调用方责任。
        let mmap = unsafe { MmapMut::map_mut(&file) }.map_err(|source| StoreError::Map {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("mapped {:?} read-write ({} bytes)", path, mmap.len());
        Ok((file, mmap))
    }

    /// 只读打开文件；映射与 open 分开，便于在映射前先做越界校验
    pub fn open_ro(path: &Path) -> Result<(File, u64)> {
        let file = File::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let len = file
            .metadata()
            .map_err(|source| StoreError::Open {
                path: path.to_path_buf(),
                source,
            })?
            .len();
        Ok((file, len))
    }

    pub fn map_ro(path: &Path, file: &File) -> Result<Mmap> {
        // SAFETY: 同 open_mut。
        let mmap = unsafe { Mmap::map(file) }.map_err(|source| StoreError::Map {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("mapped {:?} read-only ({} bytes)", path, mmap.len());
        Ok(mmap)
    }
}
