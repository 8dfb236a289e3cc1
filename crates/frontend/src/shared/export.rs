//! Browser downloads of binary payloads.

use super::artifact::{BlobUrls, ObjectUrls};
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

/// Save `bytes` as `filename` through a temporary anchor.
///
/// The object URL lives only for the duration of the click.
pub fn download_bytes(bytes: &[u8], mime: &str, filename: &str) -> Result<(), String> {
    if bytes.is_empty() {
        return Err("No hay datos para exportar".to_string());
    }
    let urls = BlobUrls;
    let url = urls.create(bytes, mime)?;
    let result = download_url(&url, filename);
    urls.revoke(&url);
    result
}

/// Click a hidden anchor pointing at `url`; the URL stays owned by the caller.
pub fn download_url(url: &str, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    let body = document.body().ok_or("No body element")?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Ok(())
}
