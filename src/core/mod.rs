//! 核心算法模块
//!
//! 包含测量表格、接受度表和效率估计的数据结构与算法实现。

pub mod acceptance;
pub mod efficiency;
pub mod measurement;

// 重新导出公共接口
pub use acceptance::{DEFAULT_ACCEPTANCE, known_pmt_ids, lookup_acceptance};
pub use efficiency::{
    EfficiencyCurve, EfficiencyEstimator, EfficiencyPoint, FAKE_COINCIDENCE_FACTOR,
    fake_coincidences,
};
pub use measurement::{ColumnLayout, MeasurementRow, MeasurementTable};
