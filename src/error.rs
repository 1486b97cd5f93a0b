use std::path::PathBuf;

use thiserror::Error;

/// 存储层错误：每一项都带上路径 / 索引 / 尺寸上下文，便于定位。
#[derive(Error, Debug)]
pub enum StoreError {
    /// 容量不是 RECORD_SIZE 的正整数倍
    #[error("invalid capacity {capacity}: must be a positive multiple of {record_size}")]
    InvalidCapacity { capacity: u64, record_size: usize },

    /// 配置文件读取 / 解析失败
    #[error("failed to load config {path}: {cause}")]
    Config { path: PathBuf, cause: String },

    #[error("failed to allocate {path}: {source}")]
    Allocate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to map {path}: {source}")]
    Map {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to flush mapping of {path}: {source}")]
    Flush {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 读取范围越界：在访问任何槽位之前拒绝
    #[error("cannot read {count} slots ({requested} bytes) from {path}: file is {file_size} bytes")]
    ReadOutOfBounds {
        path: PathBuf,
        count: usize,
        requested: u64,
        file_size: u64,
    },

    /// payload 超过固定长度（不截断）
    #[error("payload of {len} bytes exceeds fixed length {max}")]
    PayloadTooLong { len: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, StoreError>;
