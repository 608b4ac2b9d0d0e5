// HTTP API adapter - Talks to the clip service over JSON/HTTP

use std::path::Path;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use url::Url;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

const EXTRACT_FAILED: &str = "Failed to fetch video info";
const DOWNLOAD_NOT_STARTED: &str = "Download failed to start";

#[derive(Serialize)]
struct ExtractInfoBody<'a> {
    youtube_url: &'a str,
}

#[derive(Serialize)]
struct DownloadClipBody<'a> {
    youtube_url: &'a str,
    start_time: u64,
    end_time: u64,
    quality: &'a str,
}

#[derive(Debug, Deserialize)]
struct FormatDto {
    format_id: Option<String>,
    quality: String,
    ext: Option<String>,
    filesize: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct VideoInfoDto {
    youtube_id: Option<String>,
    title: Option<String>,
    thumbnail_url: Option<String>,
    thumbnail: Option<String>,
    duration: Option<f64>,
    uploader: Option<String>,
    #[serde(default)]
    formats: Vec<FormatDto>,
}

impl VideoInfoDto {
    fn into_domain(self) -> Result<VideoInfo, DomainError> {
        let duration = match self.duration {
            Some(seconds) if seconds.is_finite() && seconds >= 0.0 => seconds as u64,
            Some(seconds) => {
                return Err(DomainError::Protocol(format!(
                    "Invalid video duration: {}",
                    seconds
                )))
            }
            None => return Err(DomainError::Protocol("Video duration missing".to_string())),
        };

        Ok(VideoInfo {
            video_id: self.youtube_id,
            title: self.title.unwrap_or_default(),
            thumbnail_url: self.thumbnail_url.or(self.thumbnail),
            duration,
            uploader: self.uploader,
            formats: self
                .formats
                .into_iter()
                .map(|f| VideoFormat {
                    format_id: f.format_id,
                    quality: f.quality,
                    ext: f.ext,
                    filesize_bytes: f.filesize,
                })
                .collect(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct AcceptedDto {
    task_id: serde_json::Value,
    estimated_size: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TaskStatusDto {
    task_id: Option<serde_json::Value>,
    status: TaskStatus,
    progress: Option<f64>,
    download_url: Option<String>,
    error_message: Option<String>,
    file_size: Option<u64>,
}

/// Task ids arrive as UUID strings, but tolerate bare numbers too
fn task_id_from_json(value: &serde_json::Value) -> Option<TaskId> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(TaskId::new(s.clone())),
        serde_json::Value::Number(n) => Some(TaskId::new(n.to_string())),
        _ => None,
    }
}

/// Pull a readable message out of an error body.
///
/// Understands `{"error": "..."}` and field-keyed validation errors such as
/// `{"youtube_url": ["Enter a valid URL."]}`.
fn error_message(body: &str, fallback: &str) -> String {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return fallback.to_string(),
    };

    if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
        return message.to_string();
    }

    if let Some(fields) = value.as_object() {
        let messages: Vec<String> = fields
            .iter()
            .filter_map(|(field, detail)| {
                let text = match detail {
                    serde_json::Value::Array(items) => items.first()?.as_str()?.to_string(),
                    serde_json::Value::String(s) => s.clone(),
                    _ => return None,
                };
                Some(if field == "non_field_errors" {
                    text
                } else {
                    format!("{}: {}", field, text)
                })
            })
            .collect();
        if !messages.is_empty() {
            return messages.join("; ");
        }
    }

    fallback.to_string()
}

fn transport(error: reqwest::Error) -> DomainError {
    DomainError::Transport(error.to_string())
}

/// Clip service client over reqwest
pub struct HttpApiAdapter {
    client: reqwest::Client,
    base_url: Url,
    api_prefix: String,
}

impl HttpApiAdapter {
    /// Create a client for the service at `server_url`
    pub fn new(server_url: &str, api_prefix: &str, user_agent: &str) -> Result<Self, DomainError> {
        let base_url = Url::parse(server_url)
            .map_err(|e| DomainError::Config(format!("Invalid server URL '{}': {}", server_url, e)))?;

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| DomainError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let prefix = api_prefix.trim_matches('/');
        Ok(Self {
            client,
            base_url,
            api_prefix: if prefix.is_empty() {
                String::new()
            } else {
                format!("/{}", prefix)
            },
        })
    }

    /// Build `<server><prefix>/<path>/`
    fn endpoint(&self, path: &str) -> Result<Url, DomainError> {
        let raw = format!(
            "{}{}/{}/",
            self.base_url.as_str().trim_end_matches('/'),
            self.api_prefix,
            path.trim_matches('/')
        );
        Url::parse(&raw).map_err(|e| DomainError::Config(format!("Invalid endpoint '{}': {}", raw, e)))
    }

    /// Make a possibly relative download URL absolute
    fn resolve_download_url(&self, raw: &str) -> String {
        match Url::parse(raw) {
            Ok(url) => url.to_string(),
            Err(_) => self
                .base_url
                .join(raw)
                .map(|url| url.to_string())
                .unwrap_or_else(|_| raw.to_string()),
        }
    }

    fn snapshot_from_dto(&self, requested: &TaskId, dto: TaskStatusDto) -> TaskSnapshot {
        let progress = dto.progress.unwrap_or(0.0).clamp(0.0, 100.0) as u8;
        TaskSnapshot {
            task_id: dto
                .task_id
                .as_ref()
                .and_then(task_id_from_json)
                .unwrap_or_else(|| requested.clone()),
            status: dto.status,
            progress,
            download_url: dto.download_url.map(|u| self.resolve_download_url(&u)),
            error_message: dto.error_message,
            file_size: dto.file_size,
        }
    }
}

#[async_trait]
impl ClipApiPort for HttpApiAdapter {
    async fn extract_info(&self, url: &str) -> Result<VideoInfo, DomainError> {
        let endpoint = self.endpoint("extract-info")?;
        debug!(%endpoint, "Requesting video info");

        let response = self
            .client
            .post(endpoint)
            .json(&ExtractInfoBody { youtube_url: url })
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(DomainError::Rejected(error_message(&body, EXTRACT_FAILED)));
        }

        let dto: VideoInfoDto = serde_json::from_str(&body)
            .map_err(|e| DomainError::Protocol(format!("Malformed video info: {}", e)))?;
        dto.into_domain()
    }

    async fn create_clip_task(
        &self,
        request: &ClipJobRequest,
    ) -> Result<AcceptedTask, DomainError> {
        let endpoint = self.endpoint("download-clip")?;
        debug!(%endpoint, interval = %request.interval, quality = %request.quality, "Submitting clip job");

        let response = self
            .client
            .post(endpoint)
            .json(&DownloadClipBody {
                youtube_url: &request.url,
                start_time: request.interval.start_seconds,
                end_time: request.interval.end_seconds,
                quality: &request.quality,
            })
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if status != StatusCode::ACCEPTED {
            return Err(DomainError::Rejected(error_message(&body, DOWNLOAD_NOT_STARTED)));
        }

        let dto: AcceptedDto = serde_json::from_str(&body)
            .map_err(|e| DomainError::Protocol(format!("Malformed job acceptance: {}", e)))?;
        let task_id = task_id_from_json(&dto.task_id)
            .ok_or_else(|| DomainError::Protocol("Job accepted without a task id".to_string()))?;

        Ok(AcceptedTask {
            task_id,
            estimated_size: dto.estimated_size,
        })
    }

    async fn task_status(&self, task_id: &TaskId) -> Result<TaskSnapshot, DomainError> {
        let endpoint = self.endpoint(&format!("task-status/{}", task_id))?;

        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Protocol(format!(
                "Task status request returned {}",
                status
            )));
        }

        let dto: TaskStatusDto = response
            .json()
            .await
            .map_err(|e| DomainError::Protocol(format!("Malformed task status: {}", e)))?;
        Ok(self.snapshot_from_dto(task_id, dto))
    }

    async fn fetch_file(&self, download_url: &str, destination: &Path) -> Result<u64, DomainError> {
        let url = self.resolve_download_url(download_url);
        debug!(%url, destination = %destination.display(), "Fetching finished clip");

        let mut response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;

        // Stream next to the destination; it is replaced only once the body is complete
        let io_error = |e: std::io::Error| DomainError::Io(format!("{}: {}", destination.display(), e));
        let directory = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = tempfile::Builder::new()
            .prefix(".clipx-")
            .suffix(".part")
            .tempfile_in(directory)
            .map_err(io_error)?;
        let mut file = tokio::fs::File::from_std(temp.as_file().try_clone().map_err(io_error)?);

        let mut written: u64 = 0;
        while let Some(chunk) = response.chunk().await.map_err(transport)? {
            file.write_all(&chunk).await.map_err(io_error)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(io_error)?;
        file.sync_all().await.map_err(io_error)?;
        drop(file);

        temp.persist(destination)
            .map_err(|e| io_error(e.error))?;

        if written == 0 {
            warn!(%url, "Downloaded clip is empty");
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> HttpApiAdapter {
        HttpApiAdapter::new("http://localhost:8000", "/api", "clipx-test").unwrap()
    }

    #[test]
    fn test_endpoint_has_prefix_and_trailing_slash() {
        let api = adapter();
        assert_eq!(
            api.endpoint("extract-info").unwrap().as_str(),
            "http://localhost:8000/api/extract-info/"
        );
        assert_eq!(
            api.endpoint("task-status/abc").unwrap().as_str(),
            "http://localhost:8000/api/task-status/abc/"
        );
    }

    #[test]
    fn test_endpoint_without_prefix() {
        let api = HttpApiAdapter::new("http://localhost:8000/", "", "clipx-test").unwrap();
        assert_eq!(
            api.endpoint("download-clip").unwrap().as_str(),
            "http://localhost:8000/download-clip/"
        );
    }

    #[test]
    fn test_invalid_server_url_is_config_error() {
        assert!(matches!(
            HttpApiAdapter::new("not a url", "/api", "clipx-test"),
            Err(DomainError::Config(_))
        ));
    }

    #[test]
    fn test_resolve_download_url() {
        let api = adapter();
        assert_eq!(
            api.resolve_download_url("/media/downloads/x.mp4"),
            "http://localhost:8000/media/downloads/x.mp4"
        );
        assert_eq!(
            api.resolve_download_url("https://cdn.example.com/x.mp4"),
            "https://cdn.example.com/x.mp4"
        );
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(r#"{"error": "Invalid YouTube URL"}"#, "x"), "Invalid YouTube URL");
        assert_eq!(
            error_message(r#"{"non_field_errors": ["End time must be greater than start time."]}"#, "x"),
            "End time must be greater than start time."
        );
        assert_eq!(
            error_message(r#"{"youtube_url": ["Enter a valid URL."]}"#, "x"),
            "youtube_url: Enter a valid URL."
        );
        assert_eq!(error_message("<html>oops</html>", "fallback"), "fallback");
        assert_eq!(error_message("{}", "fallback"), "fallback");
    }

    #[test]
    fn test_video_info_dto_conversion() {
        let dto: VideoInfoDto = serde_json::from_str(
            r#"{
                "youtube_id": "dQw4w9WgXcQ",
                "title": "Test Video",
                "duration": 125,
                "thumbnail": "https://img/x.jpg",
                "uploader": "someone",
                "formats": [{"format_id": "22", "quality": "720p", "ext": "mp4", "filesize": null}]
            }"#,
        )
        .unwrap();
        let info = dto.into_domain().unwrap();
        assert_eq!(info.duration, 125);
        assert_eq!(info.thumbnail_url.as_deref(), Some("https://img/x.jpg"));
        assert_eq!(info.formats.len(), 1);
        assert_eq!(info.formats[0].filesize_bytes, None);
    }

    #[test]
    fn test_video_info_dto_rejects_negative_duration() {
        let dto: VideoInfoDto =
            serde_json::from_str(r#"{"title": "x", "duration": -3, "formats": []}"#).unwrap();
        assert!(matches!(dto.into_domain(), Err(DomainError::Protocol(_))));
    }

    #[test]
    fn test_task_status_dto_conversion() {
        let api = adapter();
        let requested = TaskId::new("abc");

        let dto: TaskStatusDto = serde_json::from_str(
            r#"{"task_id": "abc", "status": "completed", "progress": 100,
                "download_url": "/media/downloads/abc.mp4", "error_message": null, "file_size": 42}"#,
        )
        .unwrap();
        let snapshot = api.snapshot_from_dto(&requested, dto);
        assert_eq!(snapshot.status, TaskStatus::Completed);
        assert_eq!(snapshot.progress, 100);
        assert_eq!(
            snapshot.download_url.as_deref(),
            Some("http://localhost:8000/media/downloads/abc.mp4")
        );

        let dto: TaskStatusDto =
            serde_json::from_str(r#"{"status": "processing", "progress": 250}"#).unwrap();
        let snapshot = api.snapshot_from_dto(&requested, dto);
        assert_eq!(snapshot.task_id, requested);
        assert_eq!(snapshot.progress, 100);
    }

    #[test]
    fn test_unknown_status_is_malformed() {
        assert!(serde_json::from_str::<TaskStatusDto>(r#"{"status": "exploded"}"#).is_err());
    }

    /// Serve one canned HTTP response on a local port
    async fn serve_once(response: &'static [u8]) -> String {
        use tokio::io::AsyncReadExt;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            socket.write_all(response).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{}/media/clip.mp4", address)
    }

    #[tokio::test]
    async fn test_fetch_file_writes_complete_body() {
        let url = serve_once(b"HTTP/1.1 200 OK\r\nContent-Length: 4\r\nConnection: close\r\n\r\nclip").await;
        let dir = tempfile::TempDir::new().unwrap();
        let destination = dir.path().join("clip.mp4");

        let written = adapter().fetch_file(&url, &destination).await.unwrap();

        assert_eq!(written, 4);
        assert_eq!(std::fs::read(&destination).unwrap(), b"clip");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_file_keeps_existing_file_when_body_is_cut_short() {
        let url = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Length: 100000\r\nConnection: close\r\n\r\n0123456789",
        )
        .await;
        let dir = tempfile::TempDir::new().unwrap();
        let destination = dir.path().join("clip.mp4");
        std::fs::write(&destination, b"previous good clip").unwrap();

        let result = adapter().fetch_file(&url, &destination).await;

        assert!(matches!(result, Err(DomainError::Transport(_))));
        assert_eq!(std::fs::read(&destination).unwrap(), b"previous good clip");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
