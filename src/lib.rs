//! PMT Efficiency Curve Tool
//!
//! 由光电倍增管符合计数数据计算探测效率曲线，并绘制效率随高压(HV)变化的图表。
//!
//! ## 核心特性
//! - 偶然符合修正：C_fake = S_upper × S_lower × 8e-10
//! - 效率估计：eff = T / (A × (C − C_fake))
//! - 二项分布误差：sqrt(eff × (1 − eff) / (C − C_fake))
//! - 每个PMT的几何接受度静态查表
//! - 带误差棒的PNG/SVG图表输出

pub mod core;
pub mod error;
pub mod plot;
pub mod tools;

// 重新导出核心类型
pub use core::{
    ColumnLayout, EfficiencyCurve, EfficiencyEstimator, EfficiencyPoint, MeasurementTable,
    lookup_acceptance,
};
pub use error::{EffError, EffResult, ErrorCategory};
pub use plot::{EfficiencyChart, ImageFormat, MarkerStyle, PlotStyle, plot_efficiency};
