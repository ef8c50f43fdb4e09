//! 接受度表
//!
//! PMT标识 → 几何接受度（无量纲缩放因子）。静态只读配置。

use crate::error::{EffError, EffResult};

/// 已知PMT的接受度
const ACCEPTANCE_TABLE: &[(&str, f64)] = &[
    ("PMT01", 1.0),
    ("PMT02", 0.4),
    ("PMT04", 1.0),
    ("PMT07", 0.5),
    ("PMTOR", 1.0),
];

/// 默认接受度（未指定PMT时使用）
pub const DEFAULT_ACCEPTANCE: f64 = 1.0;

/// 查找PMT标识对应的接受度
///
/// 标识区分大小写，必须与文件名主干完全一致（如 `PMT02`）。
pub fn lookup_acceptance(pmt_id: &str) -> EffResult<f64> {
    ACCEPTANCE_TABLE
        .iter()
        .find(|(id, _)| *id == pmt_id)
        .map(|&(_, acceptance)| acceptance)
        .ok_or_else(|| EffError::UnknownPmt(pmt_id.to_string()))
}

/// 所有已知PMT标识（按表顺序）
pub fn known_pmt_ids() -> impl Iterator<Item = &'static str> {
    ACCEPTANCE_TABLE.iter().map(|&(id, _)| id)
}
