use std::path::{Path, PathBuf};

use crate::core::{Record, Slot, StoreConfig};
use crate::error::Result;
use crate::stats::SlotStats;
use crate::storage::writer::{self, WriteReport};
use crate::storage::{allocator, reader};

/// 路径 + 已校验配置的门面。
///
/// 三个阶段（allocate / write / read）各自独立获取并释放映射，彼此不要求同时存活。
/// 多个 `SlotStore` 同时操作同一文件不安全，由调用方串行化。
#[derive(Clone, Debug)]
pub struct SlotStore {
    path: PathBuf,
    config: StoreConfig,
}

impl SlotStore {
    /// 只校验配置，不触碰文件
    pub fn open(path: impl Into<PathBuf>, config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            path: path.into(),
            config,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn allocate(&self) -> Result<()> {
        allocator::allocate(&self.path, &self.config)
    }

    pub fn write(&self, records: &[Record]) -> Result<WriteReport> {
        writer::write_records(&self.path, records, &self.config)
    }

    pub fn read(&self, count: usize) -> Result<Vec<Slot>> {
        reader::read_slots(&self.path, count)
    }

    pub fn stats(&self) -> Result<SlotStats> {
        SlotStats::collect(&self.path)
    }
}
