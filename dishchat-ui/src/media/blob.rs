//! Conversions between Rust byte buffers and JS `Blob`s.

use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag};

pub fn bytes_to_blob(bytes: &[u8], content_type: &str) -> Result<Blob, JsValue> {
    let array = Uint8Array::from(bytes);
    let parts = Array::of1(&array);

    let properties = BlobPropertyBag::new();
    properties.set_type(content_type);

    Blob::new_with_u8_array_sequence_and_options(&parts, &properties)
}

pub async fn blob_to_bytes(blob: &Blob) -> Result<Vec<u8>, JsValue> {
    let buffer = JsFuture::from(blob.array_buffer()).await?;
    Ok(Uint8Array::new(&buffer).to_vec())
}
