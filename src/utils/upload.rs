//! Certificate file checks and on-disk storage.
//!
//! Files land under `<upload_dir>/certificates/<scholar>/course-<n>/` and are
//! served back from `/uploads/...` by the static file service.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::config::{CERTIFICATE_CONTENT_TYPE, COURSE_SLOTS};
use crate::error::{AppError, AppResult};
use crate::utils::random::generate_random_string;

pub const UPLOAD_URL_PREFIX: &str = "/uploads";
const PDF_MAGIC: &[u8] = b"%PDF-";

/// A certificate file written to disk.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Name as given by the client, sanitized
    pub file_name: String,
    pub path: PathBuf,
    pub url: String,
}

pub fn validate_course_number(course_number: i32) -> AppResult<()> {
    if !(1..=COURSE_SLOTS).contains(&course_number) {
        return Err(AppError::validation(format!(
            "courseNumber must be between 1 and {}",
            COURSE_SLOTS
        )));
    }
    Ok(())
}

fn clean_file_name(original: &str) -> String {
    let sanitized = sanitize_filename::sanitize(original.trim());
    let mut name: String = sanitized
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    if name.is_empty() || name.starts_with('.') {
        name = format!("certificate{}", name);
    }
    if !name.to_lowercase().ends_with(".pdf") {
        name.push_str(".pdf");
    }
    name
}

/// Checks that the upload is a non-empty PDF within the size limit.
pub fn validate_pdf(
    content_type: Option<&str>,
    file_name: &str,
    data: &[u8],
    max_bytes: usize,
) -> AppResult<()> {
    if data.is_empty() {
        return Err(AppError::validation("Certificate file is empty"));
    }
    if data.len() > max_bytes {
        return Err(AppError::validation(format!(
            "Certificate file exceeds the {} byte limit",
            max_bytes
        )));
    }

    let declared_pdf = content_type
        .map(|ct| ct.eq_ignore_ascii_case(CERTIFICATE_CONTENT_TYPE))
        .unwrap_or(false)
        || file_name.to_lowercase().ends_with(".pdf");
    if !declared_pdf || !data.starts_with(PDF_MAGIC) {
        return Err(AppError::validation("Only PDF certificates are accepted"));
    }
    Ok(())
}

pub fn certificate_dir(upload_dir: &Path, scholar_id: Uuid, course_number: i32) -> PathBuf {
    upload_dir
        .join("certificates")
        .join(scholar_id.to_string())
        .join(format!("course-{}", course_number))
}

pub async fn save_certificate_file(
    upload_dir: &Path,
    scholar_id: Uuid,
    course_number: i32,
    original_name: &str,
    data: &[u8],
) -> AppResult<StoredFile> {
    let file_name = clean_file_name(original_name);
    let stored_name = format!(
        "{}_{}_{}",
        Utc::now().timestamp_millis(),
        generate_random_string(8),
        file_name
    );

    let dir = certificate_dir(upload_dir, scholar_id, course_number);
    fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::PersistenceFailure(e.into()))?;

    let path = dir.join(&stored_name);
    let mut file = fs::File::create(&path)
        .await
        .map_err(|e| AppError::PersistenceFailure(e.into()))?;
    file.write_all(data)
        .await
        .map_err(|e| AppError::PersistenceFailure(e.into()))?;
    file.flush()
        .await
        .map_err(|e| AppError::PersistenceFailure(e.into()))?;

    let url = format!(
        "{}/certificates/{}/course-{}/{}",
        UPLOAD_URL_PREFIX, scholar_id, course_number, stored_name
    );

    Ok(StoredFile {
        file_name,
        path,
        url,
    })
}

/// Best-effort cleanup when the metadata write fails after the file landed.
pub async fn remove_stored_file(file: &StoredFile) {
    if let Err(e) = fs::remove_file(&file.path).await {
        tracing::warn!(path = %file.path.display(), "Failed to remove orphaned upload: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PDF: &[u8] = b"%PDF-1.4\n%test\n";

    #[test]
    fn course_numbers_outside_the_four_slots_fail() {
        assert!(validate_course_number(1).is_ok());
        assert!(validate_course_number(4).is_ok());
        assert!(validate_course_number(0).is_err());
        assert!(validate_course_number(5).is_err());
    }

    #[test]
    fn accepts_pdf_by_content_type_or_extension() {
        assert!(validate_pdf(Some("application/pdf"), "scan", PDF, 1024).is_ok());
        assert!(validate_pdf(None, "scan.PDF", PDF, 1024).is_ok());
    }

    #[test]
    fn rejects_non_pdf_and_oversize_files() {
        assert!(validate_pdf(Some("image/png"), "scan.png", PDF, 1024).is_err());
        assert!(validate_pdf(Some("application/pdf"), "fake.pdf", b"PNG....", 1024).is_err());
        assert!(validate_pdf(Some("application/pdf"), "big.pdf", PDF, 4).is_err());
        assert!(validate_pdf(Some("application/pdf"), "empty.pdf", b"", 1024).is_err());
    }

    #[test]
    fn file_names_are_sanitized() {
        let traversal = clean_file_name("../../etc/passwd");
        assert!(!traversal.contains('/'));
        assert!(traversal.starts_with("certificate"));
        assert!(traversal.ends_with(".pdf"));
        assert_eq!(clean_file_name("My Grade Card.pdf"), "My_Grade_Card.pdf");
        assert_eq!(clean_file_name(""), "certificate.pdf");
    }

    #[tokio::test]
    async fn stores_under_scholar_and_course_directory() {
        let dir = tempfile::tempdir().unwrap();
        let scholar_id = Uuid::new_v4();

        let stored = save_certificate_file(dir.path(), scholar_id, 2, "grade card.pdf", PDF)
            .await
            .unwrap();

        assert!(stored.path.starts_with(certificate_dir(dir.path(), scholar_id, 2)));
        assert_eq!(std::fs::read(&stored.path).unwrap(), PDF);
        assert!(stored.url.starts_with(&format!(
            "/uploads/certificates/{}/course-2/",
            scholar_id
        )));
        assert!(stored.url.ends_with("_grade_card.pdf"));

        remove_stored_file(&stored).await;
        assert!(!stored.path.exists());
    }
}
