//! HTTP calls to the transformation service.
//!
//! Both endpoints take the same multipart body: the uploaded `file`, the
//! JSON `payload`, and for downloads a `format` field.

use gloo_net::http::Request;
use regex_preview::{
    endpoint_url, request_error, ExportFormat, PendingRequest, RequestError, TransformResult,
    DOWNLOAD_FAILED, TRANSFORM_FAILED,
};
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use crate::config::BACKEND_URL;
use crate::services::download::save_bytes;

fn js_error(context: &str, err: JsValue) -> RequestError {
    RequestError::transport(format!("{}: {:?}", context, err))
}

/// Export format carried by a download request.
fn download_format<F>(request: &PendingRequest<F>) -> Result<ExportFormat, RequestError> {
    request
        .form
        .format
        .ok_or_else(|| RequestError::transport("Download request has no format"))
}

/// Message for a non-success status when the body has no `detail`.
fn status_message(status: u16) -> String {
    format!("Request failed with status code {}", status)
}

fn build_form(request: &PendingRequest<File>) -> Result<FormData, RequestError> {
    let form_data = FormData::new().map_err(|e| js_error("Failed to create FormData", e))?;
    let file = &request.file;
    form_data
        .append_with_blob_and_filename("file", &file.handle, &file.name)
        .map_err(|e| js_error("Failed to append file", e))?;
    for (name, value) in request.form.text_fields() {
        form_data
            .append_with_str(name, &value)
            .map_err(|e| js_error("Failed to append field", e))?;
    }
    Ok(form_data)
}

/// Post the request and return the raw success body.
async fn post(request: &PendingRequest<File>, fallback: &str) -> Result<Vec<u8>, RequestError> {
    let url = endpoint_url(BACKEND_URL, request.form.path());
    let form_data = build_form(request)?;

    let response = Request::post(&url)
        .body(form_data)
        .map_err(|e| RequestError::transport(format!("Failed to build request: {}", e)))?
        .send()
        .await
        .map_err(|e| RequestError::transport(format!("HTTP request failed: {}", e)))?;

    let status = response.status();
    let ok = response.ok();
    let body = response
        .binary()
        .await
        .map_err(|e| RequestError::new(Some(status), format!("Failed to read response: {}", e)))?;

    if !ok {
        return Err(request_error(
            status,
            &body,
            Some(&status_message(status)),
            fallback,
        ));
    }
    Ok(body)
}

/// Send a transform request and decode its result.
pub async fn request_transform(
    request: &PendingRequest<File>,
) -> Result<TransformResult, RequestError> {
    log::debug!("POST {} ({})", request.form.path(), request.file.name);
    let body = post(request, TRANSFORM_FAILED).await?;
    serde_json::from_slice(&body)
        .map_err(|e| RequestError::new(None, format!("Failed to parse response: {}", e)))
}

/// Fetch the full transformed file and save it in the requested format.
pub async fn request_download(request: &PendingRequest<File>) -> Result<(), RequestError> {
    let format = download_format(request)?;
    log::debug!("POST {} as {}", request.form.path(), format.as_str());
    let body = post(request, DOWNLOAD_FAILED).await?;
    save_bytes(&body, &format.file_name(), format.mime_type())
}
