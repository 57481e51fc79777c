//! Artifact retrieval from the CI provider.

use crate::domain::{ArtifactLocation, WorkflowRun};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::time::Duration;

pub mod archive;
pub mod error;
pub mod github;
pub mod workspace;

pub use archive::extract_zip;
pub use error::FetchError;
pub use github::{ArtifactClient, RemoteArtifact};
pub use workspace::ArtifactWorkspace;

/// Where artifacts come from.
pub trait ArtifactSource {
    /// Artifacts of `run`, in the provider's order.
    fn list_artifacts(&self, run: &WorkflowRun) -> Result<Vec<RemoteArtifact>, FetchError>;

    /// Raw ZIP payload of one artifact.
    fn download(&self, artifact: &RemoteArtifact) -> Result<Vec<u8>, FetchError>;
}

/// Download and unpack every artifact of `run` into `workspace`.
///
/// Artifacts are processed one at a time in listing order. The first failure
/// aborts the whole fetch.
pub fn fetch_artifacts(
    source: &impl ArtifactSource,
    workspace: &ArtifactWorkspace,
    run: &WorkflowRun,
) -> Result<Vec<ArtifactLocation>, FetchError> {
    let artifacts = source.list_artifacts(run)?;

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(120));

    let mut locations = Vec::with_capacity(artifacts.len());
    for artifact in &artifacts {
        spinner.set_message(format!("Downloading {}", artifact.name));
        let payload = match source.download(artifact) {
            Ok(payload) => payload,
            Err(err) => {
                spinner.finish_and_clear();
                return Err(err);
            }
        };

        let archive_path = workspace.archive_path(&artifact.name);
        let extracted_dir = workspace.extraction_dir(&artifact.name);
        let unpacked = fs::write(&archive_path, &payload)
            .map_err(FetchError::io(&archive_path))
            .and_then(|()| extract_zip(&archive_path, &extracted_dir));
        if let Err(err) = unpacked {
            spinner.finish_and_clear();
            return Err(err);
        }

        tracing::info!(
            "Fetched artifact {} ({} bytes) into {}",
            artifact.name,
            payload.len(),
            extracted_dir.display()
        );
        locations.push(ArtifactLocation {
            name: artifact.name.clone(),
            archive_path,
            extracted_dir,
        });
    }
    spinner.finish_and_clear();

    Ok(locations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io::{Cursor, Write};
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    struct FakeSource {
        artifacts: Vec<RemoteArtifact>,
        payloads: HashMap<String, Vec<u8>>,
        downloads: RefCell<Vec<String>>,
    }

    impl FakeSource {
        fn new(entries: &[(&str, Option<Vec<u8>>)]) -> Self {
            let artifacts = entries
                .iter()
                .map(|(name, _)| RemoteArtifact {
                    name: name.to_string(),
                    archive_download_url: format!("https://example.invalid/{name}/zip"),
                })
                .collect();
            let payloads = entries
                .iter()
                .filter_map(|(name, payload)| payload.clone().map(|p| (name.to_string(), p)))
                .collect();
            Self { artifacts, payloads, downloads: RefCell::new(Vec::new()) }
        }
    }

    impl ArtifactSource for FakeSource {
        fn list_artifacts(&self, _run: &WorkflowRun) -> Result<Vec<RemoteArtifact>, FetchError> {
            Ok(self.artifacts.clone())
        }

        fn download(&self, artifact: &RemoteArtifact) -> Result<Vec<u8>, FetchError> {
            self.downloads.borrow_mut().push(artifact.name.clone());
            self.payloads.get(&artifact.name).cloned().ok_or_else(|| FetchError::Status {
                url: artifact.archive_download_url.clone(),
                status: reqwest::StatusCode::NOT_FOUND,
            })
        }
    }

    fn zip_with(name: &str, content: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file(name, SimpleFileOptions::default()).expect("start file");
        writer.write_all(content.as_bytes()).expect("write entry");
        writer.finish().expect("finish zip").into_inner()
    }

    #[test]
    fn locations_follow_listing_order() {
        let tmp = TempDir::new().expect("tmp");
        let run = WorkflowRun::new("55");
        let ws = ArtifactWorkspace::create(&tmp.path().join("artifacts"), &run).expect("ws");
        let source = FakeSource::new(&[
            ("zeta", Some(zip_with("z.formatted", "{}\n"))),
            ("alpha", Some(zip_with("a.formatted", "{}\n"))),
        ]);

        let locations = fetch_artifacts(&source, &ws, &run).expect("fetch");
        let names: Vec<&str> = locations.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert!(locations[0].path().join("z.formatted").is_file());
        assert!(locations[1].archive_path.is_file());
        assert_eq!(locations[1].path(), ws.root().join("alpha_extracted"));
    }

    #[test]
    fn one_failing_artifact_aborts_the_fetch() {
        let tmp = TempDir::new().expect("tmp");
        let run = WorkflowRun::new("56");
        let ws = ArtifactWorkspace::create(&tmp.path().join("artifacts"), &run).expect("ws");
        let source = FakeSource::new(&[
            ("first", Some(zip_with("a.formatted", "{}\n"))),
            ("missing", None),
            ("never", Some(zip_with("b.formatted", "{}\n"))),
        ]);

        let err = fetch_artifacts(&source, &ws, &run).expect_err("fetch should fail");
        assert!(matches!(err, FetchError::Status { .. }));
        assert_eq!(*source.downloads.borrow(), vec!["first".to_string(), "missing".to_string()]);
    }

    #[test]
    fn corrupt_archive_aborts_the_fetch() {
        let tmp = TempDir::new().expect("tmp");
        let run = WorkflowRun::new("57");
        let ws = ArtifactWorkspace::create(&tmp.path().join("artifacts"), &run).expect("ws");
        let source = FakeSource::new(&[("broken", Some(b"not a zip".to_vec()))]);

        let err = fetch_artifacts(&source, &ws, &run).expect_err("fetch should fail");
        assert!(matches!(err, FetchError::Archive { .. }));
    }
}
