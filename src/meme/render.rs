//! Turning a [`MemeSpec`] into image bytes, and writing those bytes to disk.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::Url;
use tracing::{debug, info};

use super::templates;
use super::MemeSpec;
use crate::error::{Result, RoastError};

pub const DEFAULT_MEMEGEN_URL: &str = "https://api.memegen.link";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemeStyle {
    pub font: String,
    pub width: u32,
}

impl Default for MemeStyle {
    fn default() -> Self {
        Self {
            font: "impact".into(),
            width: 600,
        }
    }
}

/// Something that can draw a meme.
pub trait MemeRenderer {
    fn render(&self, spec: &MemeSpec, style: &MemeStyle) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Renders through a memegen-compatible HTTP service.
#[derive(Debug, Clone)]
pub struct MemegenRenderer {
    client: reqwest::Client,
    base_url: String,
}

impl MemegenRenderer {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, DEFAULT_MEMEGEN_URL)
    }

    pub fn with_base_url(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// `<base>/images/<id>/<top>/<bottom>.png?font=..&width=..`
    pub fn meme_url(&self, spec: &MemeSpec, style: &MemeStyle) -> Result<Url> {
        let id = templates::find(&spec.template)
            .unwrap_or_else(templates::default_template)
            .memegen_id;

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| RoastError::Render(format!("invalid renderer URL {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| RoastError::Render(format!("renderer URL cannot take a path: {}", self.base_url)))?
            .pop_if_empty()
            .push("images")
            .push(id)
            .push(&escape_caption(&spec.top_text))
            .push(&format!("{}.png", escape_caption(&spec.bottom_text)));
        url.query_pairs_mut()
            .append_pair("font", &style.font)
            .append_pair("width", &style.width.to_string());
        Ok(url)
    }
}

impl MemeRenderer for MemegenRenderer {
    async fn render(&self, spec: &MemeSpec, style: &MemeStyle) -> Result<Vec<u8>> {
        let url = self.meme_url(spec, style)?;
        debug!(%url, "rendering meme");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RoastError::Render(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RoastError::Render(format!("renderer answered {status}")));
        }

        let bytes = response.bytes().await.map_err(|e| RoastError::Render(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Memegen path escaping for one caption line.
pub fn escape_caption(text: &str) -> String {
    if text.trim().is_empty() {
        return "_".into();
    }
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '_' => out.push_str("__"),
            '-' => out.push_str("--"),
            ' ' => out.push('_'),
            '?' => out.push_str("~q"),
            '&' => out.push_str("~a"),
            '%' => out.push_str("~p"),
            '#' => out.push_str("~h"),
            '/' => out.push_str("~s"),
            '\\' => out.push_str("~b"),
            '<' => out.push_str("~l"),
            '>' => out.push_str("~g"),
            '"' => out.push_str("''"),
            '\n' => out.push_str("~n"),
            other => out.push(other),
        }
    }
    out
}

/// Write a rendered meme as `roast-meme-<unix millis>.png` under `dir`.
pub fn save_meme(bytes: &[u8], dir: &Path) -> Result<PathBuf> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();

    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("roast-meme-{millis}.png"));
    std::fs::write(&path, bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "saved meme");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(template: &str, top: &str, bottom: &str) -> MemeSpec {
        MemeSpec {
            template: template.into(),
            top_text: top.into(),
            bottom_text: bottom.into(),
        }
    }

    #[test]
    fn escapes_memegen_specials() {
        assert_eq!(escape_caption("Much wow"), "Much_wow");
        assert_eq!(escape_caption("snake_case"), "snake__case");
        assert_eq!(escape_caption("100-line"), "100--line");
        assert_eq!(escape_caption("why?"), "why~q");
        assert_eq!(escape_caption("a/b & c%"), "a~sb_~a_c~p");
        assert_eq!(escape_caption("say \"hi\""), "say_''hi''");
        assert_eq!(escape_caption("   "), "_");
    }

    #[test]
    fn url_uses_memegen_id_and_style() {
        let renderer = MemegenRenderer::with_base_url(reqwest::Client::new(), "https://memes.test/");
        let url = renderer
            .meme_url(
                &spec("one-does-not-simply", "One does not simply", "Read a 100-line function"),
                &MemeStyle::default(),
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://memes.test/images/mordor/One_does_not_simply/Read_a_100--line_function.png?font=impact&width=600"
        );
    }

    #[test]
    fn unknown_template_renders_as_drake() {
        let renderer = MemegenRenderer::new(reqwest::Client::new());
        let url = renderer
            .meme_url(&spec("galaxy-brain", "a", "b"), &MemeStyle::default())
            .unwrap();
        assert!(url.path().starts_with("/images/drake/"));
    }

    #[test]
    fn bad_base_url_is_a_render_error() {
        let renderer = MemegenRenderer::with_base_url(reqwest::Client::new(), "not a url");
        let err = renderer
            .meme_url(&spec("drake", "a", "b"), &MemeStyle::default())
            .unwrap_err();
        assert!(matches!(err, RoastError::Render(_)));
    }

    #[tokio::test]
    async fn unreachable_renderer_fails() {
        let renderer = MemegenRenderer::with_base_url(reqwest::Client::new(), "http://127.0.0.1:9");
        let err = renderer
            .render(&spec("drake", "a", "b"), &MemeStyle::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RoastError::Render(_)));
    }

    #[test]
    fn saves_png_with_timestamped_name() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("memes");
        let path = save_meme(b"\x89PNG fake", &out).unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("roast-meme-"));
        assert!(name.ends_with(".png"));
        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG fake");
    }
}
