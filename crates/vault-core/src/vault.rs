//! Vault Service
//!
//! Create, update and delete flows over whichever backend is active.

use std::future::Future;
use std::rc::Rc;

use log::{info, warn};

use crate::domain::{Item, ItemId, VaultError, VaultResult};
use crate::form::{FormMode, ItemDraft};
use crate::storage::{BackendKind, StorageBackend};
use crate::upload::UploadedFile;

#[derive(Clone)]
pub struct Vault {
    backend: Rc<dyn StorageBackend>,
}

impl Vault {
    pub fn new(backend: Rc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub fn kind(&self) -> BackendKind {
        self.backend.kind()
    }

    pub fn backend(&self) -> &Rc<dyn StorageBackend> {
        &self.backend
    }

    /// Validate, run the upload if one is pending, then persist.
    ///
    /// `upload` is only polled after validation passes; if it fails nothing
    /// is written.
    pub async fn submit<F>(
        &self,
        mode: &FormMode,
        existing: Option<&Item>,
        draft: ItemDraft,
        file_selected: bool,
        upload: F,
    ) -> VaultResult<ItemId>
    where
        F: Future<Output = VaultResult<Option<UploadedFile>>>,
    {
        draft.validate(file_selected)?;

        let uploaded = if draft.needs_upload() && file_selected {
            let uploaded = upload.await?;
            if uploaded.is_none() && draft.existing_file.is_none() {
                return Err(VaultError::Upload("upload produced no file".to_string()));
            }
            uploaded
        } else {
            None
        };

        match mode {
            FormMode::Add => self.create(draft, uploaded).await,
            FormMode::Edit(id) => {
                let existing = existing
                    .filter(|item| &item.id == id)
                    .ok_or_else(|| VaultError::NotFound(format!("item {}", id)))?;
                self.update(existing, draft, uploaded).await?;
                Ok(id.clone())
            }
        }
    }

    pub async fn create(&self, draft: ItemDraft, upload: Option<UploadedFile>) -> VaultResult<ItemId> {
        let fields = draft.into_fields(upload);
        let id = self.backend.add(fields).await?;
        info!("[STORE] Created item {} in {} storage", id, self.kind().label());
        Ok(id)
    }

    /// Overwrite an item; an upload it no longer references is removed afterwards
    pub async fn update(&self, existing: &Item, draft: ItemDraft, upload: Option<UploadedFile>) -> VaultResult<()> {
        let fields = draft.into_fields(upload);
        let replaced_blob = existing
            .storage_path
            .clone()
            .filter(|old| fields.storage_path.as_ref() != Some(old));

        self.backend.update(&existing.id, fields).await?;
        info!("[STORE] Updated item {}", existing.id);

        if let Some(path) = replaced_blob {
            if let Err(e) = self.backend.delete_blob(&path).await {
                warn!("[STORE] Could not remove replaced upload {}: {}", path, e);
            }
        }
        Ok(())
    }

    /// Delete an item, removing its uploaded blob first
    pub async fn remove(&self, item: &Item) -> VaultResult<()> {
        if let Some(path) = &item.storage_path {
            if let Err(e) = self.backend.delete_blob(path).await {
                warn!("[STORE] Could not remove upload {} of {}: {}", path, item.id, e);
            }
        }
        self.backend.delete(&item.id).await?;
        info!("[STORE] Deleted item {}", item.id);
        Ok(())
    }
}
