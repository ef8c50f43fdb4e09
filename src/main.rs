//! PMT Efficiency Curve Tool - 主程序入口
//!
//! 纯流程控制器，负责协调各个工具模块完成效率曲线分析任务。
//! 任何一个文件失败都会终止整个运行。

use pmt_effcurve::{
    core::known_pmt_ids,
    error::{EffError, ErrorCategory},
    tools::{self, AppConfig},
};
use std::process;

/// 错误退出码定义
mod exit_codes {
    /// 通用错误
    pub const GENERAL_ERROR: i32 = 1;
    /// 输入/解析错误
    pub const INPUT_ERROR: i32 = 2;
    /// PMT标识查找失败
    pub const LOOKUP_ERROR: i32 = 3;
    /// 图表渲染失败
    pub const RENDER_ERROR: i32 = 4;
}

/// 获取错误建议文本
fn get_error_suggestion(error: &EffError) -> &'static str {
    match ErrorCategory::from_eff_error(error) {
        ErrorCategory::Io => {
            "检查目录和文件是否存在且可读 / Check that the folder and files exist and are readable"
        }
        ErrorCategory::Parse => {
            "计数表应为空白分隔的数值列，每行列数一致 / Count tables must be whitespace-delimited numeric columns with a constant column count"
        }
        ErrorCategory::Lookup => {
            "文件名必须是已知的PMT标识 / File names must be known PMT identifiers"
        }
        ErrorCategory::Render => {
            "检查输出目录是否可写 / Check that the output directory is writable"
        }
        ErrorCategory::Other => {
            "检查命令行参数是否正确，使用 --help 查看完整用法 / Check command-line arguments, use --help to see full usage"
        }
    }
}

/// 错误处理和建议
fn handle_error(error: EffError) -> ! {
    eprintln!("[ERROR] 错误 / Error: {error}");

    let category = ErrorCategory::from_eff_error(&error);
    eprintln!("[INFO] 建议 / Suggestion: {}", get_error_suggestion(&error));

    if matches!(category, ErrorCategory::Lookup) {
        let ids: Vec<&str> = known_pmt_ids().collect();
        eprintln!("   Known PMTs / 已知PMT: {}", ids.join(", "));
    }

    let exit_code = match category {
        ErrorCategory::Parse | ErrorCategory::Other => exit_codes::INPUT_ERROR,
        ErrorCategory::Lookup => exit_codes::LOOKUP_ERROR,
        ErrorCategory::Render => exit_codes::RENDER_ERROR,
        ErrorCategory::Io => exit_codes::GENERAL_ERROR,
    };

    process::exit(exit_code);
}

/// 逐个处理目录中的PMT计数表
fn process_folder(config: &AppConfig) -> Result<usize, EffError> {
    let pmt_files = tools::scan_pmt_files(&config.input_path)?;

    tools::show_scan_results(config, &pmt_files);

    if pmt_files.is_empty() {
        return Ok(0);
    }

    if config.verbose {
        print!("{}", tools::create_report_header(config, &pmt_files));
    }

    for (index, pmt_file) in pmt_files.iter().enumerate() {
        if config.verbose {
            println!(
                "[PROCESSING] [{}/{}] 处理 / Processing: {}",
                index + 1,
                pmt_files.len(),
                tools::utils::extract_filename_lossy(pmt_file)
            );
        }

        let image_path = tools::process_pmt_file(pmt_file, config)?;

        println!("   [OK] 已保存 / Saved: {}", image_path.display());
    }

    Ok(pmt_files.len())
}

/// 应用程序主逻辑
fn run() -> Result<(), EffError> {
    // 1. 解析命令行参数
    let config = tools::parse_args()?;

    // 2. 显示启动信息
    tools::show_startup_info(&config);

    // 3. 处理目录
    let processed = process_folder(&config)?;

    tools::show_completion_info(&config, processed);
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        handle_error(error);
    }
}
