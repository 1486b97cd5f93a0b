use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StoreError};

/// payload 固定长度（无终止符、无长度前缀）
pub const PAYLOAD_LEN: usize = 19;
/// 单条记录落盘大小：1B index + 19B payload，无 padding
pub const RECORD_SIZE: usize = 1 + PAYLOAD_LEN;

/// 固定 19 字节的原始 payload。
///
/// 19 个字节全部有效，落盘时原样拷贝；文本访问器只在展示时去掉尾部的 0 字节。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Payload([u8; PAYLOAD_LEN]);

impl Payload {
    pub const fn from_array(bytes: [u8; PAYLOAD_LEN]) -> Self {
        Self(bytes)
    }

    /// 不足 19 字节时以 0 补齐；超长直接报错，不截断。
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > PAYLOAD_LEN {
            return Err(StoreError::PayloadTooLong {
                len: bytes.len(),
                max: PAYLOAD_LEN,
            });
        }
        let mut buf = [0u8; PAYLOAD_LEN];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(buf))
    }

    pub fn as_bytes(&self) -> &[u8; PAYLOAD_LEN] {
        &self.0
    }

    /// 展示用文本：去掉尾部 0 字节，非 UTF-8 字节按 lossy 处理
    pub fn text(&self) -> String {
        let end = self
            .0
            .iter()
            .rposition(|&b| b != 0)
            .map(|i| i + 1)
            .unwrap_or(0);
        String::from_utf8_lossy(&self.0[..end]).into_owned()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Payload({:?})", self.text())
    }
}

/// 一条记录：index 决定槽位（offset = index * RECORD_SIZE）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Record {
    pub index: u8,
    pub payload: Payload,
}

impl Record {
    pub fn new(index: u8, text: &str) -> Result<Self> {
        Ok(Self {
            index,
            payload: Payload::from_bytes(text.as_bytes())?,
        })
    }

    /// 该记录应落到的字节偏移
    pub fn offset(&self) -> u64 {
        self.index as u64 * RECORD_SIZE as u64
    }

    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut out = [0u8; RECORD_SIZE];
        out[0] = self.index;
        out[1..].copy_from_slice(self.payload.as_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8; RECORD_SIZE]) -> Self {
        let mut payload = [0u8; PAYLOAD_LEN];
        payload.copy_from_slice(&bytes[1..]);
        Self {
            index: bytes[0],
            payload: Payload(payload),
        }
    }
}

/// CLI 形式：`INDEX=TEXT`
impl FromStr for Record {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (idx, text) = s
            .split_once('=')
            .ok_or_else(|| format!("expected INDEX=TEXT, got {s:?}"))?;
        let index: u8 = idx
            .trim()
            .parse()
            .map_err(|e| format!("invalid index {idx:?}: {e}"))?;
        Record::new(index, text).map_err(|e| e.to_string())
    }
}

/// 读出的一个槽位。
///
/// ## 空槽判定（已知歧义）
/// 非 0 号槽位且首字节为 0 即视为空槽。合法写入、但 index 字节恰为 0 且落在非 0
/// 槽位的记录与空槽无法区分；0 号槽位永远按字面 index 报告，不会判空。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Occupied { slot: usize, record: Record },
    Empty { slot: usize },
}

impl Slot {
    pub fn decode(slot: usize, bytes: &[u8; RECORD_SIZE]) -> Self {
        let record = Record::from_bytes(bytes);
        if record.index == 0 && slot != 0 {
            Slot::Empty { slot }
        } else {
            Slot::Occupied { slot, record }
        }
    }

    pub fn position(&self) -> usize {
        match *self {
            Slot::Occupied { slot, .. } | Slot::Empty { slot } => slot,
        }
    }

    pub fn record(&self) -> Option<&Record> {
        match self {
            Slot::Occupied { record, .. } => Some(record),
            Slot::Empty { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty { .. })
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Occupied { record, .. } => {
                write!(f, "Index: {}, Data: {}", record.index, record.payload.text())
            }
            Slot::Empty { slot } => write!(f, "Index: 0({}), Data: NULL", slot),
        }
    }
}
