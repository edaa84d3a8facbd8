//! Uploaders
//!
//! Cloud mode streams the file to Firebase Storage with progress reports;
//! local mode inlines it as a data URL.

use std::rc::Rc;

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use vault_core::upload::{check_local_size, progress_percent, storage_path_for};
use vault_core::{UploadedFile, VaultError, VaultResult};

use super::{upload_file, BridgeError};

/// Progress in whole percent
pub type ProgressFn = Rc<dyn Fn(u8)>;

#[async_trait(?Send)]
pub trait Uploader {
    async fn upload(&self, file: web_sys::File, on_progress: ProgressFn) -> VaultResult<UploadedFile>;
}

fn file_parts(file: &web_sys::File) -> (String, u64, String) {
    (file.name(), file.size() as u64, file.type_())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CloudUploader;

#[async_trait(?Send)]
impl Uploader for CloudUploader {
    async fn upload(&self, file: web_sys::File, on_progress: ProgressFn) -> VaultResult<UploadedFile> {
        let (file_name, file_size, file_type) = file_parts(&file);
        let path = storage_path_for(&file_name, Utc::now().timestamp_millis());
        info!("[UPLOAD] {} ({} bytes) -> {}", file_name, file_size, path);

        let report = on_progress.clone();
        let progress = Closure::<dyn FnMut(f64, f64)>::new(move |done: f64, total: f64| {
            report(progress_percent(done, total));
        });
        let url = upload_file(&file, &path, &progress)
            .await
            .map_err(|e| VaultError::Upload(BridgeError::from_js(e).to_string()))?;
        on_progress(100);

        let url = url
            .as_string()
            .ok_or_else(|| VaultError::Upload("no download URL returned".to_string()))?;
        Ok(UploadedFile {
            url,
            storage_path: Some(path),
            file_name,
            file_size,
            file_type,
        })
    }
}

pub struct DataUrlUploader {
    limit: u64,
}

impl DataUrlUploader {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

async fn read_as_data_url(file: &web_sys::File) -> Result<String, JsValue> {
    let reader = web_sys::FileReader::new()?;
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let done = reader.clone();
        let onload = Closure::once_into_js(move || {
            let result = done.result().unwrap_or(JsValue::NULL);
            let _ = resolve.call1(&JsValue::NULL, &result);
        });
        let onerror = Closure::once_into_js(move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("file could not be read"));
        });
        reader.set_onload(Some(onload.unchecked_ref()));
        reader.set_onerror(Some(onerror.unchecked_ref()));
    });
    reader.read_as_data_url(file)?;
    let value = JsFuture::from(promise).await?;
    value
        .as_string()
        .ok_or_else(|| JsValue::from_str("reader produced no text"))
}

#[async_trait(?Send)]
impl Uploader for DataUrlUploader {
    async fn upload(&self, file: web_sys::File, on_progress: ProgressFn) -> VaultResult<UploadedFile> {
        let (file_name, file_size, file_type) = file_parts(&file);
        check_local_size(file_size, self.limit)?;

        let url = read_as_data_url(&file)
            .await
            .map_err(|e| VaultError::Upload(BridgeError::from_js(e).to_string()))?;
        on_progress(100);
        info!("[UPLOAD] Inlined {} ({} bytes) as data URL", file_name, file_size);
        Ok(UploadedFile {
            url,
            storage_path: None,
            file_name,
            file_size,
            file_type,
        })
    }
}
