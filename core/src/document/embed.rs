//! Embed classification and URL normalisation.
//!
//! The editor renders an embed from `extractedUrl`, which is derived from the
//! URL the user pasted. YouTube links become the canonical player URL, Figma
//! links are wrapped in Figma's embed endpoint and gists become a `data:` page
//! that loads the gist script. Everything else is embedded as given.

use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmbedType {
    YouTube,
    Figma,
    Vimeo,
    CodeSandbox,
    #[serde(rename = "GitHub Gist")]
    GitHubGist,
    Miro,
    #[default]
    Iframe,
}

impl EmbedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbedType::YouTube => "YouTube",
            EmbedType::Figma => "Figma",
            EmbedType::Vimeo => "Vimeo",
            EmbedType::CodeSandbox => "CodeSandbox",
            EmbedType::GitHubGist => "GitHub Gist",
            EmbedType::Miro => "Miro",
            EmbedType::Iframe => "Iframe",
        }
    }

    /// Value written into the payload's `isContentHidden`, if any.
    ///
    /// Figma boards are always collapsed; Miro honours the caller; other
    /// types never carry the flag in their payload.
    pub fn payload_hidden_flag(&self, requested: bool) -> Option<bool> {
        match self {
            EmbedType::Figma => Some(true),
            EmbedType::Miro => Some(requested),
            _ => None,
        }
    }
}

impl std::fmt::Display for EmbedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedSize {
    Small,
    #[default]
    Medium,
    Large,
}

const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed/";
const FIGMA_EMBED: &str = "https://www.figma.com/embed?embed_host=share&url=";

/// Derive the URL the editor should load for `url` embedded as `embed_type`.
pub fn extract_url(url: &str, embed_type: EmbedType) -> String {
    match embed_type {
        EmbedType::YouTube => youtube_video_id(url)
            .map(|id| format!("{YOUTUBE_EMBED}{id}"))
            .unwrap_or_else(|| url.to_string()),
        EmbedType::Figma => format!("{FIGMA_EMBED}{}", url.replace("/design/", "/file/")),
        EmbedType::GitHubGist => format!(
            "data:text/html;charset=utf-8,<head><base target='_blank'/></head><body><script src='{}.js'></script></body>",
            url.trim_end_matches('/')
        ),
        EmbedType::Vimeo | EmbedType::CodeSandbox | EmbedType::Miro | EmbedType::Iframe => url.to_string(),
    }
}

fn youtube_video_id(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let id = match host {
        "youtu.be" => segments.next().map(str::to_string),
        "youtube.com" | "youtube-nocookie.com" => match segments.next() {
            Some("watch") => url
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned()),
            Some("shorts") | Some("embed") | Some("live") => segments.next().map(str::to_string),
            _ => None,
        },
        _ => None,
    }?;

    (!id.is_empty()).then_some(id)
}
