//! Normalisation of the response shapes returned by image and storage services.
//!
//! Upstream services answer with a single image object, an array of images,
//! or a wrapped payload depending on model and version. Everything is reduced
//! to one canonical URL or `None`.

use serde_json::Value;

/// Keys under which an image, or a list of images, may be nested.
const IMAGE_KEYS: [&str; 4] = ["images", "image", "output", "data"];

/// Extract the first image URL from a service response.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use storyloom_models::extract_image_url;
///
/// let single = json!({ "image": { "url": "https://cdn/a.png" } });
/// let many = json!({ "images": [{ "url": "https://cdn/b.png" }, { "url": "https://cdn/c.png" }] });
/// let empty = json!({ "images": [] });
///
/// assert_eq!(extract_image_url(&single).as_deref(), Some("https://cdn/a.png"));
/// assert_eq!(extract_image_url(&many).as_deref(), Some("https://cdn/b.png"));
/// assert_eq!(extract_image_url(&empty), None);
/// ```
pub fn extract_image_url(value: &Value) -> Option<String> {
    match value {
        Value::String(url) => non_blank(url),
        Value::Array(items) => items.iter().find_map(extract_image_url),
        Value::Object(map) => {
            if let Some(url) = map.get("url").and_then(Value::as_str) {
                return non_blank(url);
            }
            IMAGE_KEYS
                .iter()
                .filter_map(|key| map.get(*key))
                .find_map(extract_image_url)
        }
        _ => None,
    }
}

/// Extract the book id from a persistence response.
///
/// Accepts `{"bookId": ..}`, `{"id": ..}` and the same shapes nested under
/// `book` or `data`; numeric ids are rendered as strings.
pub fn extract_book_id(value: &Value) -> Option<String> {
    let map = value.as_object()?;
    for key in ["bookId", "book_id", "id"] {
        match map.get(key) {
            Some(Value::String(id)) if !id.trim().is_empty() => return Some(id.clone()),
            Some(Value::Number(id)) => return Some(id.to_string()),
            _ => {}
        }
    }
    ["book", "data"]
        .iter()
        .filter_map(|key| map.get(*key))
        .find_map(extract_book_id)
}

fn non_blank(url: &str) -> Option<String> {
    let trimmed = url.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
