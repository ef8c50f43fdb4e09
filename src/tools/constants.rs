//! 常量和默认配置集中管理
//!
//! 将所有重要常量集中定义，避免"默认值漂移"和重复定义

/// 输入文件发现规则
pub mod discovery {
    /// 文件名前缀（`PMT*.txt` 中的 `PMT`）
    pub const FILE_PREFIX: &str = "PMT";

    /// 文件名后缀（含点）
    pub const FILE_SUFFIX: &str = ".txt";
}

/// 输出文件命名
pub mod output {
    /// 图像文件名后缀：`<PMT标识>EffCurve.<扩展名>`
    pub const IMAGE_STEM_SUFFIX: &str = "EffCurve";
}

/// 默认配置值
pub mod defaults {
    /// 默认图像格式
    pub const IMAGE_FORMAT: &str = "png";

    /// 默认数据点标记
    pub const MARKER: &str = ".";

    /// 默认误差棒端帽大小（磅）
    pub const CAPSIZE: &str = "3";

    /// 默认输出目录（当前工作目录）
    pub const OUTPUT_DIR: &str = ".";
}
