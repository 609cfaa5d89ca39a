use std::path::PathBuf;

use marc_model::RunReport;

#[derive(Debug)]
pub struct ConvertResult {
    pub report: RunReport,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub failure_report: Option<PathBuf>,
}

impl ConvertResult {
    pub fn has_errors(&self) -> bool {
        self.report.has_failures()
    }
}
