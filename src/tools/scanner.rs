//! 文件扫描模块
//!
//! 负责扫描目录中的 `PMT*.txt` 计数表，并由文件名推导PMT标识。

use super::cli::AppConfig;
use super::constants::discovery::{FILE_PREFIX, FILE_SUFFIX};
use super::utils;
use crate::{EffError, EffResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件名是否匹配 `PMT*.txt`（区分大小写）
#[inline]
pub fn is_pmt_table_name(file_name: &str) -> bool {
    file_name.starts_with(FILE_PREFIX) && file_name.ends_with(FILE_SUFFIX)
}

/// 扫描目录中的PMT计数表（不递归子目录，按文件名排序）
pub fn scan_pmt_files(dir_path: &Path) -> EffResult<Vec<PathBuf>> {
    if !dir_path.exists() {
        return Err(EffError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("目录不存在 / directory not found: {}", dir_path.display()),
        )));
    }

    if !dir_path.is_dir() {
        return Err(EffError::InvalidInput(format!(
            "路径不是目录 / path is not a directory: {}",
            dir_path.display()
        )));
    }

    let mut pmt_files = Vec::new();

    for entry in WalkDir::new(dir_path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| EffError::IoError(e.into()))?;
        let path = entry.path();

        // 只处理文件，跳过目录
        if !path.is_file() {
            continue;
        }

        if entry.file_name().to_str().is_some_and(is_pmt_table_name) {
            pmt_files.push(path.to_path_buf());
        }
    }

    Ok(pmt_files)
}

/// 由文件路径推导PMT标识（文件名主干，如 `PMT07.txt` → `PMT07`）
pub fn pmt_id_from_path(path: &Path) -> EffResult<String> {
    utils::extract_file_stem(path)
        .map(str::to_string)
        .ok_or_else(|| {
            EffError::InvalidInput(format!(
                "无法从文件名推导PMT标识 / cannot derive PMT identifier from: {}",
                path.display()
            ))
        })
}

/// 显示文件扫描结果
pub fn show_scan_results(config: &AppConfig, pmt_files: &[PathBuf]) {
    if pmt_files.is_empty() {
        println!(
            "⚠️  在目录 {} 中没有找到 {FILE_PREFIX}*{FILE_SUFFIX} 文件 / no {FILE_PREFIX}*{FILE_SUFFIX} files found",
            config.input_path.display()
        );
        return;
    }

    println!("📁 扫描目录 / Scanning: {}", config.input_path.display());
    println!("🔬 找到 {} 个PMT计数表 / PMT tables found", pmt_files.len());

    if config.verbose {
        for (i, file) in pmt_files.iter().enumerate() {
            println!("   {}. {}", i + 1, utils::extract_filename_lossy(file));
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_matching() {
        assert!(is_pmt_table_name("PMT01.txt"));
        assert!(is_pmt_table_name("PMTOR.txt"));
        assert!(is_pmt_table_name("PMT.txt"));
        assert!(!is_pmt_table_name("pmt01.txt"));
        assert!(!is_pmt_table_name("PMT01.dat"));
        assert!(!is_pmt_table_name("notes_PMT01.txt"));
        assert!(!is_pmt_table_name("PMT01.txt.bak"));
    }

    #[test]
    fn test_pmt_id_from_path() {
        assert_eq!(
            pmt_id_from_path(Path::new("/data/PMT02.txt")).unwrap(),
            "PMT02"
        );
        assert_eq!(pmt_id_from_path(Path::new("PMT99.txt")).unwrap(), "PMT99");
    }
}
