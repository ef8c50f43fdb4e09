//! 工具模块集合
//!
//! 包含CLI、文件扫描、处理与格式化等工具模块，支持main.rs的流程控制。

pub mod cli;
pub mod constants;
pub mod formatter;
pub mod processor;
pub mod scanner;
pub mod utils;

// 重新导出主要的公共接口
pub use cli::{
    AppConfig, build_command, config_from_matches, parse_args, show_completion_info,
    show_startup_info,
};
pub use formatter::{create_report_header, curve_to_json, format_curve_table};
pub use processor::{
    PmtAnalysis, analyze_pmt_file, output_image_path, output_results, process_pmt_file,
    render_analysis,
};
pub use scanner::{is_pmt_table_name, pmt_id_from_path, scan_pmt_files, show_scan_results};
