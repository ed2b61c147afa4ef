use crate::report::ScheduleReport;
use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait ReportStore {
    /// Écrit le rapport de manière atomique.
    fn save(&self, report: &ScheduleReport) -> anyhow::Result<()>;
}

/// Rapport texte, une ligne par jour puis la synthèse.
pub struct TextReportStore {
    path: PathBuf,
}

impl TextReportStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportStore for TextReportStore {
    fn save(&self, report: &ScheduleReport) -> anyhow::Result<()> {
        let mut buf = Vec::new();
        report.write_text(&mut buf)?;
        write_atomic(&self.path, &buf)
    }
}

#[cfg(feature = "serde")]
pub struct JsonReportStore {
    path: PathBuf,
}

#[cfg(feature = "serde")]
impl JsonReportStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

#[cfg(feature = "serde")]
impl ReportStore for JsonReportStore {
    fn save(&self, report: &ScheduleReport) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(report)?;
        write_atomic(&self.path, &json)
    }
}

fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("atomic rename to {}", path.display()))?;
    Ok(())
}
