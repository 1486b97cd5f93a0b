//! 基于预分配大文件 + 内存映射的稀疏定长槽位存储。
//!
//! 文件按 20 字节切分为槽位，记录放在 `index * 20` 处；三个阶段（分配 / 写 / 读）
//! 各自获取并释放自己的映射，串行作用于同一份磁盘状态。

pub mod core;
pub mod error;
pub mod stats;
pub mod storage;

pub use crate::core::{Payload, Record, Slot, StoreConfig, RECORD_SIZE};
pub use crate::error::{Result, StoreError};
pub use crate::storage::{allocate, read_slots, write_records, SlotStore, WriteReport};
