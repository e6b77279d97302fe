use rust_embed::RustEmbed;
use std::borrow::Cow;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct MapAssets;

const INDEX_TEMPLATE: &str = "index.html";
const TITLE_PLACEHOLDER: &str = "{{title}}";

/// Used when no title is configured.
pub const DEFAULT_TITLE: &str = "Visitor Map";

/// An embedded static file ready to be written to a response.
#[derive(Debug, Clone)]
pub struct Asset {
    pub content_type: String,
    pub data: Cow<'static, [u8]>,
}

/// Look up a file under `resources/`.
///
/// Names are plain relative paths; empty names and any `..` segment are
/// treated as unknown.
pub fn resource(name: &str) -> Option<Asset> {
    if name.is_empty() || name.split('/').any(|segment| segment == ".." || segment.is_empty()) {
        return None;
    }

    let file = MapAssets::get(&format!("resources/{name}"))?;
    let mime = mime_guess::from_path(name).first_or_octet_stream();

    Some(Asset {
        content_type: mime.essence_str().to_string(),
        data: file.data,
    })
}

/// The map page with `title` HTML-escaped into it.
///
/// `None` only if the template was not embedded.
pub fn render_index(title: Option<&str>) -> Option<String> {
    let file = MapAssets::get(INDEX_TEMPLATE)?;
    let template = String::from_utf8_lossy(&file.data);

    let title = match title {
        Some(t) if !t.trim().is_empty() => t,
        _ => DEFAULT_TITLE,
    };

    Some(template.replace(TITLE_PLACEHOLDER, &html_escape::encode_text(title)))
}
