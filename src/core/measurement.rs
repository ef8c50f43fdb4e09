//! 测量表格
//!
//! 每个HV设定点一行，五个列角色（高压、三重符合、双重符合、上/下PMT单计数）
//! 通过 [`ColumnLayout`] 显式命名，避免裸列号在表格形状变化时静默错位。

use crate::error::{EffError, EffResult, parse_error};
use std::path::Path;

/// 注释起始字符（与常见numpy文本表格一致）
const COMMENT_CHAR: char = '#';

/// 五个列角色对应的列索引
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// 高压（伏特）
    pub hv: usize,
    /// 三重符合计数
    pub triples: usize,
    /// 双重符合计数
    pub couples: usize,
    /// 上PMT单计数
    pub singles_upper: usize,
    /// 下PMT单计数
    pub singles_lower: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            hv: 0,
            triples: 1,
            couples: 2,
            singles_upper: 3,
            singles_lower: 4,
        }
    }
}

impl ColumnLayout {
    pub fn new(
        hv: usize,
        triples: usize,
        couples: usize,
        singles_upper: usize,
        singles_lower: usize,
    ) -> Self {
        Self {
            hv,
            triples,
            couples,
            singles_upper,
            singles_lower,
        }
    }

    /// 从5个索引构造（顺序：HV, T, C, S_upper, S_lower）
    pub fn from_indices(indices: &[usize]) -> EffResult<Self> {
        match indices {
            &[hv, triples, couples, singles_upper, singles_lower] => {
                let layout = Self::new(hv, triples, couples, singles_upper, singles_lower);
                layout.min_columns()?;
                Ok(layout)
            }
            _ => Err(EffError::InvalidInput(format!(
                "列布局需要5个索引，实际 {} 个 / column layout needs 5 indices, got {}",
                indices.len(),
                indices.len()
            ))),
        }
    }

    /// 表格至少需要的列数（最大索引 + 1，溢出时报错）
    pub fn min_columns(&self) -> EffResult<usize> {
        let max_index = [
            self.hv,
            self.triples,
            self.couples,
            self.singles_upper,
            self.singles_lower,
        ]
        .into_iter()
        .max()
        .unwrap_or(0);

        max_index.checked_add(1).ok_or_else(|| {
            EffError::InvalidInput(format!(
                "列索引过大 / column index too large: {max_index}"
            ))
        })
    }
}

/// 单行测量数据（按列角色取出）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementRow {
    pub hv_volts: f64,
    pub triples: f64,
    pub couples: f64,
    pub singles_upper: f64,
    pub singles_lower: f64,
}

/// 行优先的数值矩阵
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementTable {
    rows: Vec<Vec<f64>>,
    columns: usize,
}

impl MeasurementTable {
    /// 从已有行构造，所有行必须等长
    pub fn from_rows(rows: Vec<Vec<f64>>) -> EffResult<Self> {
        let columns = rows.first().map(Vec::len).unwrap_or(0);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(parse_error(
                    i + 1,
                    format!("期望 {columns} 列，实际 {} 列 / expected {columns} columns, got {}", row.len(), row.len()),
                ));
            }
        }
        Ok(Self { rows, columns })
    }

    /// 解析空白分隔的数值文本
    ///
    /// `#` 之后的内容视为注释，空行跳过；每个数据行字段数必须一致。
    /// 没有任何数据行时返回 `InvalidInput`。
    pub fn parse(text: &str) -> EffResult<Self> {
        let mut rows = Vec::new();
        let mut columns: Option<usize> = None;

        for (index, raw_line) in text.lines().enumerate() {
            let line_no = index + 1;
            let content = match raw_line.find(COMMENT_CHAR) {
                Some(pos) => &raw_line[..pos],
                None => raw_line,
            };

            let fields = content
                .split_whitespace()
                .map(|token| {
                    token
                        .parse::<f64>()
                        .map_err(|e| parse_error(line_no, format!("'{token}': {e}")))
                })
                .collect::<EffResult<Vec<f64>>>()?;

            if fields.is_empty() {
                continue;
            }

            match columns {
                None => columns = Some(fields.len()),
                Some(expected) if expected != fields.len() => {
                    return Err(parse_error(
                        line_no,
                        format!(
                            "期望 {expected} 列，实际 {} 列 / expected {expected} columns, got {}",
                            fields.len(),
                            fields.len()
                        ),
                    ));
                }
                Some(_) => {}
            }

            rows.push(fields);
        }

        if rows.is_empty() {
            return Err(EffError::InvalidInput(
                "表格中没有数据行 / table contains no data rows".to_string(),
            ));
        }

        Ok(Self {
            rows,
            columns: columns.unwrap_or(0),
        })
    }

    /// 读取并解析文本文件
    pub fn from_path(path: &Path) -> EffResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 按列布局取出所有行
    pub fn measurements(&self, layout: &ColumnLayout) -> EffResult<Vec<MeasurementRow>> {
        let required = layout.min_columns()?;
        if !self.rows.is_empty() && self.columns < required {
            return Err(EffError::InvalidInput(format!(
                "表格只有 {} 列，列布局需要至少 {required} 列 / table has {} columns, layout needs at least {required}",
                self.columns, self.columns
            )));
        }

        Ok(self
            .rows
            .iter()
            .map(|row| MeasurementRow {
                hv_volts: row[layout.hv],
                triples: row[layout.triples],
                couples: row[layout.couples],
                singles_upper: row[layout.singles_upper],
                singles_lower: row[layout.singles_lower],
            })
            .collect())
    }
}
