//! Browser save of downloaded bytes.

use js_sys::{Array, Uint8Array};
use regex_preview::RequestError;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Object URL revoked when dropped.
struct ObjectUrl(String);

impl ObjectUrl {
    fn for_blob(blob: &Blob) -> Result<Self, JsValue> {
        Url::create_object_url_with_blob(blob).map(Self)
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        if let Err(e) = Url::revoke_object_url(&self.0) {
            log::warn!("Failed to revoke object URL: {:?}", e);
        }
    }
}

fn save_error(err: JsValue) -> RequestError {
    RequestError::transport(format!("Failed to save file: {:?}", err))
}

/// Hand `bytes` to the browser as a download named `file_name`.
///
/// The object URL is revoked on every exit path.
pub fn save_bytes(bytes: &[u8], file_name: &str, mime_type: &str) -> Result<(), RequestError> {
    let parts = Array::of1(&Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(save_error)?;

    let url = ObjectUrl::for_blob(&blob).map_err(save_error)?;

    let document = gloo_utils::document();
    let link: HtmlAnchorElement = document
        .create_element("a")
        .map_err(save_error)?
        .dyn_into()
        .map_err(|_| RequestError::transport("Failed to create download link"))?;
    link.set_href(url.as_str());
    link.set_download(file_name);

    gloo_utils::body().append_child(&link).map_err(save_error)?;
    link.click();
    link.remove();

    log::info!("Saved {} ({} bytes)", file_name, bytes.len());
    Ok(())
}
