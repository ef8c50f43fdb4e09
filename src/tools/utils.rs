//! 工具函数模块
//!
//! 提供文件路径处理、数值显示等通用工具函数。

/// 数值显示工具函数
pub mod number {
    /// 格式化浮点数（非有限值原样显示 NaN / inf）
    #[inline]
    pub fn format_value(value: f64, precision: usize) -> String {
        if value.is_finite() {
            format!("{value:.precision$}")
        } else {
            format!("{value}")
        }
    }
}

/// 文件路径处理工具函数
pub mod path {
    use std::path::Path;

    /// 提取文件名（统一处理路径提取逻辑）
    #[inline]
    pub fn extract_filename(path: &Path) -> &str {
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Unknown")
    }

    /// 提取文件名（返回String，用于日志显示）
    #[inline]
    pub fn extract_filename_lossy(path: &Path) -> String {
        path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    /// 提取文件stem（不含扩展名），非UTF-8时返回None
    #[inline]
    pub fn extract_file_stem(path: &Path) -> Option<&str> {
        path.file_stem().and_then(|stem| stem.to_str())
    }
}

// 重新导出为平级函数
pub use number::format_value;
pub use path::{extract_file_stem, extract_filename, extract_filename_lossy};
