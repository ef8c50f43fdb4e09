//! PMT计数表处理模块
//!
//! 负责单个计数表的接受度查找、效率计算、图表渲染与结果输出。

use super::cli::AppConfig;
use super::constants::output::IMAGE_STEM_SUFFIX;
use super::{formatter, scanner, utils};
use crate::core::{EfficiencyCurve, EfficiencyEstimator, MeasurementTable, lookup_acceptance};
use crate::plot::plot_efficiency;
use crate::EffResult;
use std::path::{Path, PathBuf};

/// 单个PMT的分析结果
#[derive(Debug, Clone, PartialEq)]
pub struct PmtAnalysis {
    /// PMT标识（同时作为图表标题）
    pub pmt_id: String,
    /// 来源文件
    pub source: PathBuf,
    /// 使用的接受度
    pub acceptance: f64,
    pub curve: EfficiencyCurve,
}

/// 分析单个PMT计数表
///
/// 先查接受度再读文件：未知PMT标识不会触发任何I/O或计算。
pub fn analyze_pmt_file(path: &Path, config: &AppConfig) -> EffResult<PmtAnalysis> {
    let pmt_id = scanner::pmt_id_from_path(path)?;
    let acceptance = lookup_acceptance(&pmt_id)?;

    if config.verbose {
        println!("   加载计数表 / Loading table: {}", path.display());
        println!("   接受度 / Acceptance: A = {acceptance}");
    }

    let table = MeasurementTable::from_path(path)?;
    let curve = EfficiencyEstimator::new(acceptance)
        .with_layout(config.column_layout)
        .estimate(&table)?;

    Ok(PmtAnalysis {
        pmt_id,
        source: path.to_path_buf(),
        acceptance,
        curve,
    })
}

/// 输出图像路径：`<输出目录>/<PMT标识>EffCurve.<扩展名>`
pub fn output_image_path(config: &AppConfig, pmt_id: &str) -> PathBuf {
    config.output_dir.join(format!(
        "{pmt_id}{IMAGE_STEM_SUFFIX}.{}",
        config.image_format.extension()
    ))
}

/// 绘制并保存效率曲线图，返回图像路径
pub fn render_analysis(analysis: &PmtAnalysis, config: &AppConfig) -> EffResult<PathBuf> {
    let chart = plot_efficiency(
        &analysis.curve.hv_kv,
        &analysis.curve.efficiency,
        &analysis.curve.efficiency_error,
        &analysis.pmt_id,
        config.plot_style,
    )?;

    std::fs::create_dir_all(&config.output_dir)?;
    let image_path = output_image_path(config, &analysis.pmt_id);
    chart.save(&image_path)?;

    Ok(image_path)
}

/// 输出分析结果（表格 / JSON / 退化行提示）
pub fn output_results(analysis: &PmtAnalysis, config: &AppConfig) -> EffResult<()> {
    if config.json {
        println!("{}", formatter::curve_to_json(analysis)?);
    }

    if config.verbose {
        print!("{}", formatter::format_curve_table(analysis));

        let degenerate = analysis.curve.degenerate_rows();
        if !degenerate.is_empty() {
            println!(
                "[WARNING] {} 个数据行结果非有限（行 {:?}） / {} rows produced non-finite values (rows {:?})",
                degenerate.len(),
                degenerate,
                degenerate.len(),
                degenerate
            );
        }

        if let Some(peak) = analysis.curve.peak_efficiency() {
            println!(
                "[INFO] 最高效率 / Peak efficiency: {} ± {} @ {} kV",
                utils::format_value(peak.efficiency, 4),
                utils::format_value(peak.efficiency_error, 4),
                utils::format_value(peak.hv_kv, 3)
            );
        }
    }

    Ok(())
}

/// 处理单个PMT计数表：分析 → 输出 → 保存图像
pub fn process_pmt_file(path: &Path, config: &AppConfig) -> EffResult<PathBuf> {
    let analysis = analyze_pmt_file(path, config)?;
    output_results(&analysis, config)?;
    render_analysis(&analysis, config)
}
