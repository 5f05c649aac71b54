use serde::Serialize;

// 行级错误，row 为数据行号（表头不计，从 1 开始）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportRowError {
    pub row: usize,
    pub field: Option<String>,
    pub message: String,
}

impl ImportRowError {
    pub fn new(row: usize, field: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            row,
            field: field.map(str::to_string),
            message: message.into(),
        }
    }
}

// 导入结果报告
#[derive(Debug, Default, Serialize)]
pub struct ImportReport {
    pub total: usize,
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errors: Vec<ImportRowError>,
}

impl ImportReport {
    pub fn skip(&mut self, error: ImportRowError) {
        self.skipped += 1;
        self.errors.push(error);
    }
}
