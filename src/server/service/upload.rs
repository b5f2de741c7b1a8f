//! File intake guard and upload storage.
//!
//! Uploaded proofs are checked for size, extension, and magic-byte
//! signature, then written under the upload root with a random storage
//! name. The user-supplied file name never reaches the filesystem.

use std::path::{Component, Path, PathBuf};

use rand::Rng;

use crate::server::error::upload::UploadError;
use crate::server::model::form::UploadedFile;

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const MEMBER_SUBDIR: &str = "members";

/// Accepted proof file formats, identified both by claimed extension and
/// by leading bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Jpeg,
    Png,
}

impl FileKind {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "pdf" => Some(FileKind::Pdf),
            "jpg" | "jpeg" => Some(FileKind::Jpeg),
            "png" => Some(FileKind::Png),
            _ => None,
        }
    }

    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"%PDF") {
            Some(FileKind::Pdf)
        } else if bytes.starts_with(&[0xFF, 0xD8]) {
            Some(FileKind::Jpeg)
        } else if bytes.starts_with(&PNG_SIGNATURE) {
            Some(FileKind::Png)
        } else {
            None
        }
    }
}

/// Lowercased extension after the last dot, if any.
pub fn file_extension(file_name: &str) -> Option<String> {
    let (_, extension) = file_name.rsplit_once('.')?;
    if extension.is_empty() {
        None
    } else {
        Some(extension.to_ascii_lowercase())
    }
}

/// Checks one uploaded file against the intake rules, returning one
/// message per violated rule. `label` names the field in error messages.
pub fn validate_upload(file: Option<&UploadedFile>, label: &str, max_bytes: u64) -> Vec<String> {
    let Some(file) = file.filter(|file| !file.is_empty()) else {
        return vec![format!("{label} is required.")];
    };

    let mut errors = Vec::new();

    if file.bytes.len() as u64 > max_bytes {
        errors.push(format!(
            "{label} exceeds the maximum file size of {}.",
            size_limit_label(max_bytes)
        ));
    }

    match file_extension(&file.file_name).and_then(|ext| FileKind::from_extension(&ext)) {
        Some(claimed) => {
            if FileKind::sniff(&file.bytes) != Some(claimed) {
                errors.push(format!(
                    "{label} file content does not match its file type."
                ));
            }
        }
        None => errors.push(format!("{label} must be a PDF, JPG, or PNG file.")),
    }

    errors
}

/// Renders the size ceiling in the largest whole unit, so a ceiling
/// below one MiB never reads as "0 MB".
fn size_limit_label(max_bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;

    if max_bytes >= MIB {
        format!("{} MB", max_bytes / MIB)
    } else if max_bytes >= KIB {
        format!("{} KB", max_bytes / KIB)
    } else {
        format!("{max_bytes} bytes")
    }
}

/// Storage name for an accepted upload: 16 random bytes as hex plus the
/// original extension.
pub fn storage_name(original_name: &str) -> String {
    let bytes: [u8; 16] = rand::rng().random();
    let token = hex::encode(bytes);

    match file_extension(original_name) {
        Some(extension) => format!("{token}.{extension}"),
        None => token,
    }
}

/// Writes accepted uploads under a registration-scoped directory tree:
/// `<root>/<registration_id>/` for coach-level proofs and
/// `<root>/<registration_id>/members/` for member proofs.
pub struct UploadStore<'a> {
    root: &'a Path,
}

impl<'a> UploadStore<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    pub fn store(
        &self,
        registration_id: &str,
        member_proof: bool,
        storage_name: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, UploadError> {
        ensure_plain_name(registration_id)?;
        ensure_plain_name(storage_name)?;

        let mut dir = self.root.join(registration_id);
        if member_proof {
            dir.push(MEMBER_SUBDIR);
        }
        std::fs::create_dir_all(&dir).map_err(|source| UploadError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        // The generated names cannot traverse, but the resolved path is
        // still checked against the root before anything is written.
        let root = self
            .root
            .canonicalize()
            .map_err(|source| UploadError::CreateDir {
                path: self.root.to_path_buf(),
                source,
            })?;
        let dir = dir.canonicalize().map_err(|source| UploadError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        if !dir.starts_with(&root) {
            return Err(UploadError::PathEscapesRoot(dir));
        }

        let path = dir.join(storage_name);
        if let Err(source) = std::fs::write(&path, bytes) {
            // A failed write may leave a truncated file behind.
            let _ = std::fs::remove_file(&path);
            return Err(UploadError::Write { path, source });
        }

        Ok(path)
    }

    /// Best-effort removal of everything stored for one registration.
    /// Used as compensating cleanup when persistence fails.
    pub fn remove_all(&self, registration_id: &str) {
        if ensure_plain_name(registration_id).is_err() {
            return;
        }

        let dir = self.root.join(registration_id);
        if let Err(error) = std::fs::remove_dir_all(&dir) {
            if error.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(%error, ?dir, "failed to remove uploaded files");
            }
        }
    }
}

/// A name used as a path component must be exactly one normal component:
/// no separators, no `..`, no absolute prefixes.
fn ensure_plain_name(name: &str) -> Result<(), UploadError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(UploadError::InvalidPathComponent(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registro_test_utils::prelude::*;

    fn file(name: &str, bytes: Vec<u8>) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            bytes,
        }
    }

    mod validate_upload {
        use super::*;

        const MAX: u64 = 5 * 1024 * 1024;

        #[test]
        fn accepts_matching_pdf() {
            let errors = validate_upload(
                Some(&file("proof.pdf", fixtures::file::pdf_bytes())),
                "NatCon proof",
                MAX,
            );
            assert_eq!(errors, Vec::<String>::new());
        }

        #[test]
        fn requires_a_file() {
            let errors = validate_upload(None, "Payment proof", MAX);
            assert_eq!(errors, vec!["Payment proof is required.".to_string()]);
        }

        #[test]
        fn rejects_oversized_file() {
            let errors = validate_upload(
                Some(&file("proof.pdf", vec![b'%'; 16])),
                "NatCon proof",
                8,
            );
            assert!(errors
                .iter()
                .any(|error| error.contains("maximum file size")));
        }

        #[test]
        fn size_message_names_the_ceiling_in_whole_units() {
            let oversized = file("proof.pdf", vec![b'%'; 3 * 1024 * 1024]);

            let errors = validate_upload(Some(&oversized), "NatCon proof", 2 * 1024 * 1024);
            assert!(errors.iter().any(|error| error.contains("of 2 MB.")));

            let errors = validate_upload(Some(&oversized), "NatCon proof", 512 * 1024);
            assert!(errors.iter().any(|error| error.contains("of 512 KB.")));

            let errors = validate_upload(Some(&oversized), "NatCon proof", 100);
            assert!(errors.iter().any(|error| error.contains("of 100 bytes.")));
        }

        #[test]
        fn rejects_disallowed_extension() {
            let errors = validate_upload(
                Some(&file("proof.exe", fixtures::file::pdf_bytes())),
                "NatCon proof",
                MAX,
            );
            assert_eq!(
                errors,
                vec!["NatCon proof must be a PDF, JPG, or PNG file.".to_string()]
            );
        }

        #[test]
        fn rejects_signature_mismatch_regardless_of_extension() {
            for name in ["proof.pdf", "proof.jpg", "proof.png"] {
                let errors = validate_upload(
                    Some(&file(name, fixtures::file::unknown_bytes())),
                    "NatCon proof",
                    MAX,
                );
                assert_eq!(
                    errors,
                    vec!["NatCon proof file content does not match its file type.".to_string()],
                    "accepted {name:?}"
                );
            }
        }

        #[test]
        fn rejects_png_bytes_claiming_pdf() {
            let errors = validate_upload(
                Some(&file("proof.pdf", fixtures::file::png_bytes())),
                "NatCon proof",
                MAX,
            );
            assert!(!errors.is_empty());
        }

        #[test]
        fn extension_check_is_case_insensitive() {
            let errors = validate_upload(
                Some(&file("PROOF.JPG", fixtures::file::jpeg_bytes())),
                "NatCon proof",
                MAX,
            );
            assert_eq!(errors, Vec::<String>::new());
        }
    }

    mod storage_name {
        use super::*;

        #[test]
        fn keeps_extension_and_randomizes_stem() {
            let name = storage_name("my thesis (final).pdf");

            let (stem, extension) = name.rsplit_once('.').unwrap();
            assert_eq!(extension, "pdf");
            assert_eq!(stem.len(), 32);
            assert!(stem.bytes().all(|b| b.is_ascii_hexdigit()));

            assert_ne!(name, storage_name("my thesis (final).pdf"));
        }
    }

    mod store {
        use super::*;

        #[tokio::test]
        async fn writes_coach_and_member_proofs_in_scoped_dirs() -> Result<(), TestError> {
            let test = TestSetup::new().await?;
            let store = UploadStore::new(test.upload_root());

            let coach = store
                .store("REG20260001", false, "aa.pdf", &fixtures::file::pdf_bytes())
                .unwrap();
            let member = store
                .store("REG20260001", true, "bb.pdf", &fixtures::file::pdf_bytes())
                .unwrap();

            assert!(coach.ends_with("REG20260001/aa.pdf"));
            assert!(member.ends_with("REG20260001/members/bb.pdf"));
            assert!(coach.exists());
            assert!(member.exists());

            Ok(())
        }

        #[tokio::test]
        async fn rejects_traversal_in_names() -> Result<(), TestError> {
            let test = TestSetup::new().await?;
            let store = UploadStore::new(test.upload_root());

            for bad in ["../outside", "a/b", "..", "/etc"] {
                assert!(
                    store.store(bad, false, "aa.pdf", b"%PDF").is_err(),
                    "accepted registration id {bad:?}"
                );
                assert!(
                    store.store("REG20260001", false, bad, b"%PDF").is_err(),
                    "accepted storage name {bad:?}"
                );
            }

            Ok(())
        }
    }

    mod remove_all {
        use super::*;

        #[tokio::test]
        async fn removes_the_whole_registration_tree() -> Result<(), TestError> {
            let test = TestSetup::new().await?;
            let store = UploadStore::new(test.upload_root());

            let coach = store
                .store("REG20260002", false, "aa.pdf", &fixtures::file::pdf_bytes())
                .unwrap();
            let member = store
                .store("REG20260002", true, "bb.pdf", &fixtures::file::pdf_bytes())
                .unwrap();

            store.remove_all("REG20260002");

            assert!(!coach.exists());
            assert!(!member.exists());

            Ok(())
        }

        #[tokio::test]
        async fn is_silent_for_unknown_registration() -> Result<(), TestError> {
            let test = TestSetup::new().await?;
            let store = UploadStore::new(test.upload_root());

            store.remove_all("REG20269999");

            Ok(())
        }
    }
}
