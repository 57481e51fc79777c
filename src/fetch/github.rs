//! GitHub Actions artifact API client

use super::{ArtifactSource, FetchError};
use crate::domain::{Config, WorkflowRun};
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, LOCATION};
use reqwest::redirect::Policy;
use serde::Deserialize;

const GITHUB_JSON: &str = "application/vnd.github+json";
/// Largest page the artifact listing endpoint serves.
const PAGE_SIZE: usize = 100;

/// One entry of a workflow run's artifact listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteArtifact {
    pub name: String,
    pub archive_download_url: String,
}

#[derive(Debug, Deserialize)]
struct ArtifactListing {
    #[serde(default)]
    total_count: Option<usize>,
    #[serde(default)]
    artifacts: Vec<RemoteArtifact>,
}

impl ArtifactListing {
    /// Whether another page follows this one, given `seen` artifacts
    /// collected so far including this page.
    fn has_more(&self, seen: usize) -> bool {
        if self.artifacts.is_empty() {
            return false;
        }
        match self.total_count {
            Some(total) => seen < total,
            None => self.artifacts.len() >= PAGE_SIZE,
        }
    }
}

pub struct ArtifactClient {
    http: Client,
    api_base: String,
    repo: String,
    token: String,
}

impl ArtifactClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(Policy::none())
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self::with_http_client(http, &config.api_base, &config.repo, config.token()))
    }

    /// Use a caller-built client. It must not follow redirects on its own:
    /// the download step resolves the signed archive URL itself.
    pub fn with_http_client(http: Client, api_base: &str, repo: &str, token: String) -> Self {
        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            repo: repo.trim_matches('/').to_string(),
            token,
        }
    }

    pub fn artifacts_url(&self, run: &WorkflowRun) -> String {
        format!("{}/repos/{}/actions/runs/{}/artifacts", self.api_base, self.repo, run.workflow_id)
    }

    pub fn artifacts_page_url(&self, run: &WorkflowRun, page: usize) -> String {
        format!("{}?per_page={}&page={}", self.artifacts_url(run), PAGE_SIZE, page)
    }

    fn fetch_listing_page(&self, url: &str) -> Result<ArtifactListing, FetchError> {
        let response = ensure_success(self.authorized_get(url)?, url)?;
        let body =
            response.text().map_err(|source| FetchError::Http { url: url.to_string(), source })?;
        serde_json::from_str(&body).map_err(|source| FetchError::Listing { url: url.to_string(), source })
    }

    fn authorized_get(&self, url: &str) -> Result<Response, FetchError> {
        self.http
            .get(url)
            .header(ACCEPT, GITHUB_JSON)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .send()
            .map_err(|source| FetchError::Http { url: url.to_string(), source })
    }

    /// Follow the API's redirect to the short-lived archive location.
    fn resolve_download(&self, url: &str) -> Result<Response, FetchError> {
        let response = self.authorized_get(url)?;
        if !response.status().is_redirection() {
            return ensure_success(response, url);
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| response.url().join(value).ok())
            .ok_or_else(|| FetchError::MissingLocation { url: url.to_string() })?;
        tracing::debug!("Artifact {} resolved to {}", url, location.host_str().unwrap_or(""));

        // The signed location carries its own credential; the bearer token
        // is not forwarded to it.
        let signed = location.to_string();
        let response = self
            .http
            .get(location)
            .send()
            .map_err(|source| FetchError::Http { url: signed.clone(), source })?;
        ensure_success(response, &signed)
    }
}

impl ArtifactSource for ArtifactClient {
    fn list_artifacts(&self, run: &WorkflowRun) -> Result<Vec<RemoteArtifact>, FetchError> {
        let mut artifacts = Vec::new();
        for page in 1.. {
            let url = self.artifacts_page_url(run, page);
            let listing = self.fetch_listing_page(&url)?;
            tracing::debug!("Listing page {} returned {} artifacts", page, listing.artifacts.len());
            let more = listing.has_more(artifacts.len() + listing.artifacts.len());
            artifacts.extend(listing.artifacts);
            if !more {
                break;
            }
        }
        tracing::info!("Workflow run {} has {} artifacts", run, artifacts.len());
        Ok(artifacts)
    }

    fn download(&self, artifact: &RemoteArtifact) -> Result<Vec<u8>, FetchError> {
        let url = artifact.archive_download_url.as_str();
        let response = self.resolve_download(url)?;
        let bytes = response
            .bytes()
            .map_err(|source| FetchError::Http { url: url.to_string(), source })?;
        Ok(bytes.to_vec())
    }
}

fn ensure_success(response: Response, url: &str) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::Status { url: url.to_string(), status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_base: &str, repo: &str) -> ArtifactClient {
        ArtifactClient::with_http_client(Client::new(), api_base, repo, String::new())
    }

    #[test]
    fn artifacts_url_is_scoped_to_repo_and_run() {
        let client = client("https://api.github.com/", "/pytorch/pytorch/");
        assert_eq!(
            client.artifacts_url(&WorkflowRun::new("12345")),
            "https://api.github.com/repos/pytorch/pytorch/actions/runs/12345/artifacts"
        );
    }

    #[test]
    fn page_url_requests_full_pages() {
        let client = client("https://api.github.com", "pytorch/pytorch");
        assert_eq!(
            client.artifacts_page_url(&WorkflowRun::new("12345"), 2),
            "https://api.github.com/repos/pytorch/pytorch/actions/runs/12345/artifacts?per_page=100&page=2"
        );
    }

    fn listing(total_count: Option<usize>, len: usize) -> ArtifactListing {
        let artifacts = (0..len)
            .map(|i| RemoteArtifact {
                name: format!("a{i}"),
                archive_download_url: format!("https://x/{i}/zip"),
            })
            .collect();
        ArtifactListing { total_count, artifacts }
    }

    #[test]
    fn paging_stops_at_total_count_or_empty_page() {
        assert!(listing(Some(3), 1).has_more(1));
        assert!(!listing(Some(3), 2).has_more(3));
        assert!(!listing(Some(5), 0).has_more(2));
        assert!(listing(None, PAGE_SIZE).has_more(PAGE_SIZE));
        assert!(!listing(None, 7).has_more(7));
    }

    #[test]
    fn listing_tolerates_extra_fields() {
        let listing: ArtifactListing = serde_json::from_str(
            r#"{"total_count":2,"artifacts":[
                {"id":1,"name":"lint","archive_download_url":"https://x/1/zip","expired":false},
                {"id":2,"name":"docs","archive_download_url":"https://x/2/zip"}]}"#,
        )
        .expect("decode listing");
        let names: Vec<&str> = listing.artifacts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["lint", "docs"]);
    }

    #[test]
    fn listing_without_artifacts_is_empty() {
        let listing: ArtifactListing =
            serde_json::from_str(r#"{"total_count":0}"#).expect("decode listing");
        assert!(listing.artifacts.is_empty());
    }
}
