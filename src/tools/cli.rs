//! 命令行接口模块
//!
//! 负责命令行参数解析、配置管理和程序信息展示。

use super::constants::defaults;
use crate::core::ColumnLayout;
use crate::error::{EffError, EffResult};
use crate::plot::{ImageFormat, MarkerStyle, PlotStyle};
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

/// 应用程序版本信息
const VERSION: &str = env!("CARGO_PKG_VERSION");
const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// 应用程序配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 扫描目录（包含 `PMT*.txt` 文件）
    pub input_path: PathBuf,

    /// 图像输出目录
    pub output_dir: PathBuf,

    /// 是否显示详细信息
    pub verbose: bool,

    /// 是否以JSON输出每条曲线
    pub json: bool,

    pub image_format: ImageFormat,

    pub plot_style: PlotStyle,

    pub column_layout: ColumnLayout,
}

impl AppConfig {
    /// 以默认选项扫描指定目录
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
            verbose: false,
            json: false,
            image_format: ImageFormat::default(),
            plot_style: PlotStyle::default(),
            column_layout: ColumnLayout::default(),
        }
    }
}

/// 构建命令行定义
pub fn build_command() -> Command {
    Command::new("pmt-effcurve")
        .version(VERSION)
        .about(DESCRIPTION)
        .author("MacinMeter Team")
        .arg(
            Arg::new("FOLDER")
                .help("包含 PMT*.txt 计数表的目录 / Folder containing PMT*.txt count tables")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("显示详细处理信息 / Show detailed processing information")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .short('o')
                .help("图像输出目录（默认当前目录） / Image output directory (default: current directory)")
                .value_name("DIR")
                .default_value(defaults::OUTPUT_DIR),
        )
        .arg(
            Arg::new("image-format")
                .long("image-format")
                .short('f')
                .help("图像格式: png, svg / Image format: png, svg")
                .value_name("FORMAT")
                .default_value(defaults::IMAGE_FORMAT),
        )
        .arg(
            Arg::new("marker")
                .long("marker")
                .help("数据点标记: . o s ^ x / Marker style: . o s ^ x")
                .value_name("CHAR")
                .default_value(defaults::MARKER),
        )
        .arg(
            Arg::new("capsize")
                .long("capsize")
                .help("误差棒端帽大小（磅） / Error bar cap size (points)")
                .value_name("N")
                .value_parser(clap::value_parser!(f64))
                .default_value(defaults::CAPSIZE),
        )
        .arg(
            Arg::new("columns")
                .long("columns")
                .help("列索引 HV,T,C,S_upper,S_lower（默认 0,1,2,3,4） / Column indices HV,T,C,S_upper,S_lower (default: 0,1,2,3,4)")
                .value_name("LIST"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("以JSON输出每条效率曲线 / Print each efficiency curve as JSON")
                .action(clap::ArgAction::SetTrue),
        )
}

/// 解析 `--columns` 取值（逗号分隔的5个索引）
pub fn parse_column_layout(value: &str) -> EffResult<ColumnLayout> {
    let indices = value
        .split(',')
        .map(|part| {
            part.trim().parse::<usize>().map_err(|e| {
                EffError::InvalidInput(format!("列索引无效 / invalid column index '{part}': {e}"))
            })
        })
        .collect::<EffResult<Vec<usize>>>()?;
    ColumnLayout::from_indices(&indices)
}

/// 由解析结果创建配置
pub fn config_from_matches(matches: &ArgMatches) -> EffResult<AppConfig> {
    let input_path = matches
        .get_one::<String>("FOLDER")
        .map(PathBuf::from)
        .ok_or_else(|| EffError::InvalidInput("缺少目录参数 / missing FOLDER".to_string()))?;

    let mut config = AppConfig::new(input_path);
    config.verbose = matches.get_flag("verbose");
    config.json = matches.get_flag("json");

    if let Some(dir) = matches.get_one::<String>("output-dir") {
        config.output_dir = PathBuf::from(dir);
    }
    if let Some(format) = matches.get_one::<String>("image-format") {
        config.image_format = format.parse()?;
    }
    if let Some(marker) = matches.get_one::<String>("marker") {
        config.plot_style.marker = marker.parse::<MarkerStyle>()?;
    }
    if let Some(&capsize) = matches.get_one::<f64>("capsize") {
        config.plot_style.capsize = capsize;
    }
    if let Some(columns) = matches.get_one::<String>("columns") {
        config.column_layout = parse_column_layout(columns)?;
    }

    Ok(config)
}

/// 解析命令行参数并创建配置
pub fn parse_args() -> EffResult<AppConfig> {
    let matches = build_command().get_matches();
    config_from_matches(&matches)
}

/// 显示程序启动信息
pub fn show_startup_info(config: &AppConfig) {
    println!("🚀 PMT Efficiency Curve Tool v{VERSION} 启动 / started");
    println!("📝 {DESCRIPTION}");
    if config.verbose {
        println!(
            "[INFO] 输出目录 / Output directory: {}",
            config.output_dir.display()
        );
        println!(
            "[INFO] 图像格式 / Image format: {}",
            config.image_format.extension()
        );
    }
    println!();
}

/// 显示程序完成信息
pub fn show_completion_info(config: &AppConfig, processed: usize) {
    println!();
    println!("📊 处理完成 / Done: {processed} 条效率曲线 / efficiency curves");
    if config.verbose {
        println!("✅ 所有任务处理完成！/ All tasks finished!");
    }
}
