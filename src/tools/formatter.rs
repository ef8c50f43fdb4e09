//! 输出格式化模块
//!
//! 负责效率曲线的控制台表格与JSON输出。

use super::cli::AppConfig;
use super::processor::PmtAnalysis;
use super::utils;
use crate::core::EfficiencyPoint;
use crate::{EffError, EffResult};
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, presets::UTF8_FULL};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// 应用程序版本信息
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 表格数值精度
const VALUE_PRECISION: usize = 5;

/// 创建运行报告头部信息
pub fn create_report_header(config: &AppConfig, pmt_files: &[PathBuf]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "PMT Efficiency Curve Tool v{VERSION} / 光电倍增管效率曲线\n"
    ));
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    output.push_str(&format!("log date: {now}\n"));
    output.push_str(&format!(
        "扫描目录 / Folder: {}\n",
        config.input_path.display()
    ));
    output.push_str(&format!("文件数 / Files: {}\n", pmt_files.len()));
    output.push_str(
        "--------------------------------------------------------------------------------\n",
    );

    output
}

/// 效率曲线表格（每个HV点一行）
pub fn format_curve_table(analysis: &PmtAnalysis) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "HV [kV]",
        "Efficiency / 效率",
        "Error / 误差",
        "C_fake / 偶然符合",
    ]);

    for point in analysis.curve.points() {
        table.add_row(vec![
            value_cell(point.hv_kv, 3),
            value_cell(point.efficiency, VALUE_PRECISION),
            value_cell(point.efficiency_error, VALUE_PRECISION),
            value_cell(point.fake_coincidences, VALUE_PRECISION),
        ]);
    }

    format!(
        "{} (A = {}, {})\n{table}\n",
        analysis.pmt_id,
        analysis.acceptance,
        utils::extract_filename_lossy(&analysis.source)
    )
}

fn value_cell(value: f64, precision: usize) -> Cell {
    Cell::new(utils::format_value(value, precision)).set_alignment(CellAlignment::Right)
}

/// 效率曲线的JSON结构（非有限值序列化为 null）
#[derive(Debug, Serialize)]
struct CurveReport<'a> {
    pmt: &'a str,
    source: &'a Path,
    acceptance: f64,
    points: Vec<EfficiencyPoint>,
    degenerate_rows: Vec<usize>,
}

/// 将效率曲线格式化为JSON
pub fn curve_to_json(analysis: &PmtAnalysis) -> EffResult<String> {
    let report = CurveReport {
        pmt: &analysis.pmt_id,
        source: &analysis.source,
        acceptance: analysis.acceptance,
        points: analysis.curve.points().collect(),
        degenerate_rows: analysis.curve.degenerate_rows(),
    };

    serde_json::to_string_pretty(&report)
        .map_err(|e| EffError::InvalidInput(format!("JSON序列化失败 / JSON serialization failed: {e}")))
}
