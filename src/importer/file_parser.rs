// ==========================================
// 考试日程查询工具 - 数据集解析器实现
// ==========================================
// 支持: JSON (.json) / CSV (.csv) / Excel (.xlsx/.xls)
// 输出: Vec<RawRecord>，字段名与值保持源数据原样
// ==========================================

use crate::domain::exam::RawRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use serde_json::Value;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// 检查文件存在 + 扩展名
fn check_file(path: &Path, allowed: &[&str]) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !allowed.contains(&ext.as_str()) {
        return Err(ImportError::UnsupportedFormat(ext));
    }
    Ok(())
}

// ==========================================
// JSON Parser 实现
// ==========================================
// 数据集为对象数组: [{"Student Name": ..., "Register Number": ...}, ...]
pub struct JsonParser;

impl JsonParser {
    /// 从内存中的 JSON 文本解析
    pub fn parse_str(&self, content: &str) -> ImportResult<Vec<RawRecord>> {
        let value: Value = serde_json::from_str(content)?;
        self.from_value(value)
    }

    fn from_value(&self, value: Value) -> ImportResult<Vec<RawRecord>> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(ImportError::DatasetShapeError {
                    index: 0,
                    message: format!("顶层应为数组，实际为 {}", json_kind(&other)),
                })
            }
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(fields) => Ok(RawRecord::from(fields)),
                other => Err(ImportError::DatasetShapeError {
                    index,
                    message: format!("记录应为对象，实际为 {}", json_kind(&other)),
                }),
            })
            .collect()
    }
}

impl FileParser for JsonParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        check_file(file_path, &["json"])?;

        let reader = BufReader::new(File::open(file_path)?);
        let value: Value = serde_json::from_reader(reader)?;
        self.from_value(value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        check_file(file_path, &["csv"])?;

        // 打开 CSV 文件
        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        // 读取所有行
        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.trim().is_empty()) {
                continue;
            }

            records.push(RawRecord::from(row_map));
        }

        Ok(records)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        check_file(file_path, &["xlsx", "xls"])?;

        let mut workbook = open_workbook_auto(file_path)?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        // 读取数据行
        let mut records = Vec::new();
        for data_row in rows {
            let mut row_map = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), cell.to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.trim().is_empty()) {
                continue;
            }

            records.push(RawRecord::from(row_map));
        }

        Ok(records)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<RawRecord>> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let records = match ext.as_str() {
            "json" => JsonParser.parse_to_raw_records(path)?,
            "csv" => CsvParser.parse_to_raw_records(path)?,
            "xlsx" | "xls" => ExcelParser.parse_to_raw_records(path)?,
            _ => return Err(ImportError::UnsupportedFormat(ext)),
        };

        tracing::info!(
            path = %path.display(),
            format = %ext,
            records = records.len(),
            "数据集加载完成"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_with_suffix(suffix: &str) -> tempfile::NamedTempFile {
        Builder::new().suffix(suffix).tempfile().unwrap()
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let mut temp_file = temp_with_suffix(".csv");
        writeln!(temp_file, "Student Name,Register Number,Slot").unwrap();
        writeln!(temp_file, "Asha Rao,2021001,F.N.").unwrap();
        writeln!(temp_file, "Ravi K,2021002,A.N.").unwrap();

        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get_text("Register Number"), Some("2021001".into()));
        assert_eq!(records[1].get_text("Slot"), Some("A.N.".into()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_records(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let mut temp_file = temp_with_suffix(".csv");
        writeln!(temp_file, "Register Number,Date").unwrap();
        writeln!(temp_file, "2021001,05.12.2025").unwrap();
        writeln!(temp_file, ",").unwrap(); // 空行
        writeln!(temp_file, "2021002,06.12.2025").unwrap();

        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_json_parser_array_of_objects() {
        let records = JsonParser
            .parse_str(r#"[{"Register Number": 2021001, "Slot": "FN"}, {"registerNumber": "2021002"}]"#)
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get_text("Register Number"), Some("2021001".into()));
    }

    #[test]
    fn test_json_parser_rejects_non_array() {
        let result = JsonParser.parse_str(r#"{"Register Number": 1}"#);
        assert!(matches!(result, Err(ImportError::DatasetShapeError { .. })));

        let result = JsonParser.parse_str(r#"[{"a": 1}, 5]"#);
        assert!(matches!(
            result,
            Err(ImportError::DatasetShapeError { index: 1, .. })
        ));
    }

    #[test]
    fn test_json_parser_from_file() {
        let mut temp_file = temp_with_suffix(".json");
        write!(temp_file, r#"[{{"Student Name": "Asha"}}]"#).unwrap();

        let records = JsonParser.parse_to_raw_records(temp_file.path()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let temp_file = temp_with_suffix(".txt");
        let result = UniversalFileParser.parse(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "txt"));
    }
}
