use std::fmt;
use std::path::Path;

use crate::core::RECORD_SIZE;
use crate::error::Result;
use crate::storage::{reader::read_slots, MmapStorage};

/// u8 index 最多能寻址的槽位数
pub const ADDRESSABLE_SLOTS: u64 = u8::MAX as u64 + 1;

/// 槽位占用统计（空槽判定沿用 reader 的启发式）
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotStats {
    /// 文件实际字节数
    pub file_bytes: u64,
    /// file_bytes / RECORD_SIZE
    pub slot_count: u64,
    /// min(slot_count, 256)
    pub addressable_slots: u64,
    pub occupied: u64,
    pub empty: u64,
}

impl SlotStats {
    pub fn collect(path: &Path) -> Result<Self> {
        let file_bytes = {
            let (_file, len) = MmapStorage::open_ro(path)?;
            len
        };
        let slot_count = file_bytes / RECORD_SIZE as u64;
        let addressable_slots = slot_count.min(ADDRESSABLE_SLOTS);

        let slots = read_slots(path, addressable_slots as usize)?;
        let empty = slots.iter().filter(|s| s.is_empty()).count() as u64;

        Ok(Self {
            file_bytes,
            slot_count,
            addressable_slots,
            occupied: addressable_slots - empty,
            empty,
        })
    }
}

fn human_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;
    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

impl fmt::Display for SlotStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "╔══════════════════════════════════════════╗")?;
        writeln!(f, "║           mmap-slots Slot Report         ║")?;
        writeln!(f, "╠══════════════════════════════════════════╣")?;
        writeln!(f, "║ file size:    {:>26} ║", human_bytes(self.file_bytes))?;
        writeln!(f, "║ slots:        {:>26} ║", self.slot_count)?;
        writeln!(f, "║ addressable:  {:>26} ║", self.addressable_slots)?;
        writeln!(f, "╠──────────────────────────────────────────╣")?;
        writeln!(f, "║ occupied:     {:>26} ║", self.occupied)?;
        writeln!(f, "║ empty:        {:>26} ║", self.empty)?;
        writeln!(f, "╚══════════════════════════════════════════╝")?;
        Ok(())
    }
}
