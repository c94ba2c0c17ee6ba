//! Sound catalog operations.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use soundvault_core::{SavedSound, Sound, SoundId, TagId};
use tracing::{debug, info};

use super::{fetch_list, require_body, with_query};
use crate::error::{ClientError, Result};
use crate::transport::Transport;

const SOUNDS: &str = "/sounds/";

/// Filters for listing sounds. Both match case-insensitively on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoundQuery {
    pub tag: Option<String>,
    pub search: Option<String>,
}

impl SoundQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    fn to_path(&self) -> String {
        let mut params = Vec::new();
        if let Some(tag) = self.tag.as_deref().filter(|t| !t.is_empty()) {
            params.push(("tag", tag));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", search));
        }
        with_query(SOUNDS, &params)
    }
}

/// A file to upload as one multipart field.
#[derive(Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("size", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

impl UploadFile {
    /// In-memory file; the MIME type is inferred from the file name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_type_for_file(Path::new(&file_name)).to_string();
        Self {
            file_name,
            bytes,
            mime_type,
        }
    }

    /// Read a file from disk.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        Ok(Self {
            file_name,
            bytes,
            mime_type: mime_type_for_file(path).to_string(),
        })
    }

    fn into_part(self) -> Result<Part> {
        Ok(Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime_type)?)
    }
}

/// Fields of the create/update sound form.
#[derive(Debug, Clone, Default)]
pub struct SoundForm {
    pub name: String,
    pub description: String,
    /// Sent as `mp3_file`; required when creating
    pub audio: Option<UploadFile>,
    pub image: Option<UploadFile>,
    pub tags: Vec<TagId>,
}

impl SoundForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn audio(mut self, file: UploadFile) -> Self {
        self.audio = Some(file);
        self
    }

    pub fn image(mut self, file: UploadFile) -> Self {
        self.image = Some(file);
        self
    }

    pub fn tags(mut self, tags: impl IntoIterator<Item = TagId>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    fn into_multipart(self) -> Result<Form> {
        let mut form = Form::new()
            .text("name", self.name)
            .text("description", self.description);

        if let Some(audio) = self.audio {
            form = form.part("mp3_file", audio.into_part()?);
        }
        if let Some(image) = self.image {
            form = form.part("image", image.into_part()?);
        }
        for id in self.tags {
            form = form.text("tags", id.to_string());
        }

        Ok(form)
    }
}

/// Sound catalog operations. Listing and reading are public; writes are admin-only
/// on the server.
pub struct SoundsApi<'a> {
    transport: &'a Transport,
}

impl<'a> SoundsApi<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Sounds matching `query`, newest first as served.
    pub async fn list(&self, query: &SoundQuery) -> Result<Vec<Sound>> {
        let path = query.to_path();
        let sounds: Vec<Sound> = fetch_list(self.transport, &path, false).await?;
        debug!(count = sounds.len(), path = %path, "Fetched sounds");
        Ok(sounds)
    }

    /// Full detail of one sound, including recent comments.
    pub async fn get(&self, id: SoundId) -> Result<Sound> {
        let path = format!("/sounds/{}/", id);
        let body = self.transport.get(&path, false).await?;
        require_body(body, &path)
    }

    /// Upload a new sound. The form must carry an audio file.
    ///
    /// The reply is the write shape; fetch [`SoundsApi::get`] for tag names and URLs.
    pub async fn create(&self, form: SoundForm) -> Result<SavedSound> {
        if form.audio.is_none() {
            return Err(ClientError::invalid_input("Please select an audio file"));
        }

        let name = form.name.clone();
        let body = self
            .transport
            .post_multipart(SOUNDS, form.into_multipart()?, true)
            .await?;
        let sound: SavedSound = require_body(body, SOUNDS)?;

        info!(sound_id = sound.id, name = %name, "Sound uploaded");
        Ok(sound)
    }

    /// Replace a sound's fields. Files left as `None` are not sent.
    pub async fn update(&self, id: SoundId, form: SoundForm) -> Result<SavedSound> {
        let path = format!("/sounds/{}/", id);
        let body = self
            .transport
            .put_multipart(&path, form.into_multipart()?, true)
            .await?;
        require_body(body, &path)
    }

    pub async fn delete(&self, id: SoundId) -> Result<()> {
        self.transport
            .delete(&format!("/sounds/{}/", id), true)
            .await
    }
}

/// Get MIME type for an upload.
pub fn mime_type_for_file(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        Some("opus") => "audio/opus",
        Some("wav") => "audio/wav",
        Some("m4a" | "aac") => "audio/mp4",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_types() {
        assert_eq!(mime_type_for_file(Path::new("rain.mp3")), "audio/mpeg");
        assert_eq!(mime_type_for_file(Path::new("RAIN.MP3")), "audio/mpeg");
        assert_eq!(mime_type_for_file(Path::new("rain.m4a")), "audio/mp4");
        assert_eq!(mime_type_for_file(Path::new("cover.JPG")), "image/jpeg");
        assert_eq!(mime_type_for_file(Path::new("cover.webp")), "image/webp");
        assert_eq!(
            mime_type_for_file(Path::new("notes.txt")),
            "application/octet-stream"
        );
        assert_eq!(
            mime_type_for_file(Path::new("no_extension")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_query_path() {
        assert_eq!(SoundQuery::new().to_path(), "/sounds/");
        assert_eq!(
            SoundQuery::new().tag("Nature").to_path(),
            "/sounds/?tag=Nature"
        );
        assert_eq!(
            SoundQuery::new().tag("").search("heavy rain").to_path(),
            "/sounds/?search=heavy+rain"
        );
        assert_eq!(
            SoundQuery::new().tag("ambient").search("wind").to_path(),
            "/sounds/?tag=ambient&search=wind"
        );
    }

    #[test]
    fn test_upload_file_infers_mime() {
        let file = UploadFile::new("thunder.flac", vec![1, 2, 3]);
        assert_eq!(file.mime_type, "audio/flac");
        assert!(format!("{:?}", file).contains("size: 3"));
    }

    #[tokio::test]
    async fn test_upload_file_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("birds.ogg");
        tokio::fs::write(&path, b"OggS").await.unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "birds.ogg");
        assert_eq!(file.mime_type, "audio/ogg");
        assert_eq!(file.bytes, b"OggS");
    }

    #[tokio::test]
    async fn test_upload_file_missing_path() {
        let result = UploadFile::from_path(Path::new("/definitely/not/here.mp3")).await;
        assert!(matches!(result, Err(ClientError::Io(_))));
    }
}
