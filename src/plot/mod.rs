//! 绘图模块
//!
//! 效率曲线的误差棒图构建与PNG/SVG输出。

pub mod chart;

pub use chart::{
    ChartData, EfficiencyChart, ImageFormat, MarkerStyle, PlotStyle, X_LABEL, Y_LABEL,
    plot_efficiency,
};
