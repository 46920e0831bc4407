use crate::app::preview::render_preview;
use crate::domain::model::Resume;
use crate::utils::error::Result;
use std::io::Write;
use std::path::Path;
use zip::write::{FileOptions, ZipWriter};

pub const JSON_ENTRY: &str = "resume.json";
pub const TEXT_ENTRY: &str = "resume.txt";

/// Packs the resume document and its printable page into a ZIP archive.
pub fn export_bundle(resume: &Resume) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    zip.start_file::<_, ()>(JSON_ENTRY, FileOptions::default())?;
    let json_data = serde_json::to_string_pretty(resume)?;
    zip.write_all(json_data.as_bytes())?;

    zip.start_file::<_, ()>(TEXT_ENTRY, FileOptions::default())?;
    zip.write_all(render_preview(resume).as_bytes())?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

pub fn export_to_file(resume: &Resume, path: &Path) -> Result<()> {
    let data = export_bundle(resume)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    tracing::debug!("Writing ZIP file ({} bytes) to {}", data.len(), path.display());
    std::fs::write(path, data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::io::Read;

    #[test]
    fn test_bundle_contains_json_and_text() {
        let mut resume = Resume::blank("resume_1", "template-a", Utc::now());
        resume.full_name = "Jane Doe".to_string();

        let data = export_bundle(&resume).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut json = String::new();
        archive
            .by_name(JSON_ENTRY)
            .unwrap()
            .read_to_string(&mut json)
            .unwrap();
        let restored: Resume = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, resume);

        let mut text = String::new();
        archive
            .by_name(TEXT_ENTRY)
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert!(text.starts_with("Jane Doe\n"));
    }
}
