//! 统一错误处理框架
//!
//! 效率曲线工具的核心错误类型定义。退化数据行（零分母、效率越界）
//! 不属于错误，只会以非有限数值出现在结果中。

use std::fmt;
use std::io;

/// 效率曲线处理相关的统一错误类型
#[derive(Debug)]
pub enum EffError {
    /// 输入验证错误（命令行参数、空表格、列数不足、绘图样式）
    InvalidInput(String),

    /// 文件I/O错误
    IoError(io::Error),

    /// 数值表格解析错误
    ParseError {
        /// 出错的行号（从1开始）
        line: usize,
        message: String,
    },

    /// 未知的PMT标识（不在接受度表中）
    UnknownPmt(String),

    /// 图表渲染错误
    RenderError(String),
}

impl fmt::Display for EffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffError::InvalidInput(msg) => write!(f, "输入验证失败 / Invalid input: {msg}"),
            EffError::IoError(err) => write!(f, "文件I/O错误 / I/O error: {err}"),
            EffError::ParseError { line, message } => {
                write!(f, "表格解析失败 / Parse error (line {line}): {message}")
            }
            EffError::UnknownPmt(id) => {
                write!(f, "未知的PMT标识 / Unknown PMT identifier: {id}")
            }
            EffError::RenderError(msg) => write!(f, "图表渲染失败 / Render error: {msg}"),
        }
    }
}

impl std::error::Error for EffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EffError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for EffError {
    fn from(err: io::Error) -> Self {
        EffError::IoError(err)
    }
}

/// 效率曲线操作的标准Result类型
pub type EffResult<T> = Result<T, EffError>;

// ==================== 错误转换Helper函数 ====================

/// 创建解析错误的helper函数
#[inline]
pub fn parse_error<E: fmt::Display>(line: usize, err: E) -> EffError {
    EffError::ParseError {
        line,
        message: err.to_string(),
    }
}

/// 创建渲染错误的helper函数
#[inline]
pub fn render_error<E: fmt::Display>(context: &str, err: E) -> EffError {
    EffError::RenderError(format!("{context}: {err}"))
}

// ==================== 错误分类系统 ====================

/// 错误类别枚举（用于退出码和建议文本）
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum ErrorCategory {
    /// I/O相关错误（目录不存在、文件不可读等）
    Io,
    /// 表格内容错误（非数值字段、行长度不一致等）
    Parse,
    /// 接受度查找失败
    Lookup,
    /// 图表渲染失败
    Render,
    /// 其他未分类错误
    Other,
}

impl ErrorCategory {
    /// 从EffError提取错误类别
    pub fn from_eff_error(e: &EffError) -> Self {
        match e {
            EffError::IoError(_) => Self::Io,
            EffError::ParseError { .. } => Self::Parse,
            EffError::UnknownPmt(_) => Self::Lookup,
            EffError::RenderError(_) => Self::Render,
            EffError::InvalidInput(_) => Self::Other,
        }
    }

    /// 获取错误类别的显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Io => "I/O错误",
            Self::Parse => "解析错误",
            Self::Lookup => "查找错误",
            Self::Render => "渲染错误",
            Self::Other => "其他错误",
        }
    }
}
