//! Vault flow tests
//!
//! Storage, auth and form flows against the in-memory key-value store.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;

use crate::auth::{AuthService, AuthStrategy, LocalCredentialAuth, Session, SessionStore};
use crate::card::{CardAction, CardView};
use crate::domain::{Item, ItemFields, ItemId, ItemType, ValidationError, VaultError, VaultResult};
use crate::filter::{tag_options, visible_items, Tab};
use crate::form::{ContentSource, FormMode, ItemDraft};
use crate::storage::{BackendKind, KeyValueStore, LocalBackend, MemoryKv, Snapshot, SnapshotListener, StorageBackend};
use crate::upload::UploadedFile;
use crate::vault::Vault;
use crate::AuthError;

const ITEMS_KEY: &str = "contentVaultItems";
const ADMIN_KEY: &str = "contentVaultAdmin";

/// Local backend that records the calls it receives
struct RecordingBackend {
    inner: LocalBackend<Rc<MemoryKv>>,
    calls: RefCell<Vec<String>>,
}

impl RecordingBackend {
    fn new() -> Self {
        Self {
            inner: LocalBackend::new(Rc::new(MemoryKv::new()), ITEMS_KEY),
            calls: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl StorageBackend for RecordingBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Cloud
    }

    fn subscribe(&self, listener: SnapshotListener) {
        self.inner.subscribe(listener)
    }

    async fn add(&self, fields: ItemFields) -> VaultResult<ItemId> {
        self.calls.borrow_mut().push("add".into());
        self.inner.add(fields).await
    }

    async fn update(&self, id: &str, fields: ItemFields) -> VaultResult<()> {
        self.calls.borrow_mut().push(format!("update:{}", id));
        self.inner.update(id, fields).await
    }

    async fn delete(&self, id: &str) -> VaultResult<()> {
        self.calls.borrow_mut().push(format!("delete:{}", id));
        self.inner.delete(id).await
    }

    async fn delete_blob(&self, path: &str) -> VaultResult<()> {
        self.calls.borrow_mut().push(format!("blob:{}", path));
        Ok(())
    }
}

/// Latest snapshot seen by a subscriber, i.e. the item store
fn attach_store(backend: &dyn StorageBackend) -> Rc<RefCell<Vec<Item>>> {
    let store = Rc::new(RefCell::new(Vec::new()));
    let sink = store.clone();
    backend.subscribe(Rc::new(move |snap: Snapshot| {
        *sink.borrow_mut() = snap.items;
    }));
    store
}

fn uploaded(name: &str) -> UploadedFile {
    UploadedFile {
        url: format!("https://storage.example/o/{}", name),
        storage_path: Some(format!("uploads/1_{}", name)),
        file_name: name.into(),
        file_size: 42,
        file_type: "application/octet-stream".into(),
    }
}

async fn no_upload() -> VaultResult<Option<UploadedFile>> {
    Ok(None)
}

async fn upload_ok(name: &str) -> VaultResult<Option<UploadedFile>> {
    Ok(Some(uploaded(name)))
}

async fn upload_inlined(data_url: String) -> VaultResult<Option<UploadedFile>> {
    Ok(Some(UploadedFile {
        url: data_url,
        storage_path: None,
        file_name: "cat.png".into(),
        file_size: 1024,
        file_type: "image/png".into(),
    }))
}

async fn upload_failing() -> VaultResult<Option<UploadedFile>> {
    Err(VaultError::Upload("network down".into()))
}

async fn upload_never() -> VaultResult<Option<UploadedFile>> {
    panic!("upload must not start")
}

#[tokio::test]
async fn test_link_appears_only_under_links() {
    let backend: Rc<dyn StorageBackend> = Rc::new(LocalBackend::new(MemoryKv::new(), ITEMS_KEY));
    let store = attach_store(backend.as_ref());
    let vault = Vault::new(backend);

    let mut draft = ItemDraft::for_tab(Tab::Links);
    draft.title = "Example".into();
    draft.url = "https://example.com".into();
    vault.submit(&FormMode::Add, None, draft, false, no_upload()).await.unwrap();

    let items = store.borrow().clone();
    assert_eq!(items.len(), 1);
    for tab in [Tab::Photos, Tab::Videos, Tab::Files, Tab::Articles] {
        assert!(visible_items(&items, tab, None).is_empty(), "{:?}", tab);
    }
    assert_eq!(visible_items(&items, Tab::Links, None).len(), 1);
    assert!(tag_options(&items, Tab::Links).is_empty());
    assert!(!items[0].url.is_empty());
    assert!(items[0].created_at.is_some());
}

#[tokio::test]
async fn test_article_gets_excerpt_and_opens_reader() {
    let backend: Rc<dyn StorageBackend> = Rc::new(LocalBackend::new(MemoryKv::new(), ITEMS_KEY));
    let store = attach_store(backend.as_ref());
    let vault = Vault::new(backend);

    let mut draft = ItemDraft::for_tab(Tab::Articles);
    draft.title = "My Post".into();
    draft.content = "<p>Hi</p>".into();
    let id = vault.submit(&FormMode::Add, None, draft, false, no_upload()).await.unwrap();

    let items = store.borrow().clone();
    let article = &visible_items(&items, Tab::Articles, None)[0];
    assert_eq!(article.url, "");
    assert_eq!(CardView::build(article, 150).excerpt.as_deref(), Some("Hi"));
    assert_eq!(CardAction::for_item(article, false), CardAction::OpenReader(id));
    assert_eq!(article.content, "<p>Hi</p>");
}

#[tokio::test]
async fn test_first_local_login_survives_reload() {
    let kv = Rc::new(MemoryKv::new());
    let build = |kv: Rc<MemoryKv>| {
        let strategy: Rc<dyn AuthStrategy> = Rc::new(LocalCredentialAuth::new(SessionStore::new(kv.clone(), ADMIN_KEY)));
        AuthService::new(strategy, SessionStore::new(kv, ADMIN_KEY))
    };

    let auth = build(kv.clone());
    assert!(!auth.is_authenticated());
    let session = auth.login("admin@example.com", "secret123").await.unwrap();
    assert!(session.is_admin);

    // Page reload: new service over the same storage
    let reloaded = build(kv.clone());
    assert!(reloaded.is_authenticated());
    assert_eq!(reloaded.current_session().map(|s| s.email), Some("admin@example.com".to_string()));

    reloaded.logout().await.unwrap();
    assert!(!reloaded.is_authenticated());
    assert!(kv.get_item(ADMIN_KEY).is_some(), "credential must outlive the session");

    assert_eq!(reloaded.login("admin@example.com", "wrong").await, Err(AuthError::InvalidCredential));
    assert_eq!(reloaded.login("other@example.com", "secret123").await, Err(AuthError::InvalidCredential));
    assert!(reloaded.login("admin@example.com", "secret123").await.is_ok());
}

#[tokio::test]
async fn test_bootstrap_rejects_weak_password() {
    let kv = Rc::new(MemoryKv::new());
    let strategy = LocalCredentialAuth::new(SessionStore::new(kv.clone(), ADMIN_KEY));
    assert_eq!(strategy.login("admin@example.com", "123").await, Err(AuthError::WeakPassword));
    assert!(!strategy.has_credential());
}

#[tokio::test]
async fn test_delete_removes_blob_before_document() {
    let backend = Rc::new(RecordingBackend::new());
    let store = attach_store(backend.as_ref());
    let vault = Vault::new(backend.clone());

    let mut draft = ItemDraft::for_tab(Tab::Files);
    draft.title = "Report".into();
    vault.submit(&FormMode::Add, None, draft, true, upload_ok("report.pdf")).await.unwrap();

    let item = store.borrow()[0].clone();
    assert_eq!(item.item_type, ItemType::Files);
    assert_eq!(item.url, "");
    vault.remove(&item).await.unwrap();

    let calls = backend.calls.borrow().clone();
    assert_eq!(calls, vec!["add".to_string(), "blob:uploads/1_report.pdf".to_string(), format!("delete:{}", item.id)]);
    assert!(store.borrow().is_empty());
}

#[tokio::test]
async fn test_failed_upload_writes_nothing() {
    let backend = Rc::new(RecordingBackend::new());
    let store = attach_store(backend.as_ref());
    let vault = Vault::new(backend.clone());

    let mut draft = ItemDraft::for_tab(Tab::Photos);
    draft.title = "Cat".into();
    draft.source = ContentSource::File;
    let err = vault.submit(&FormMode::Add, None, draft, true, upload_failing()).await.unwrap_err();

    assert!(matches!(err, VaultError::Upload(_)));
    assert!(backend.calls.borrow().is_empty());
    assert!(store.borrow().is_empty());
}

#[tokio::test]
async fn test_missing_file_is_rejected_before_upload() {
    let backend = Rc::new(RecordingBackend::new());
    let vault = Vault::new(backend.clone());

    let mut draft = ItemDraft::for_tab(Tab::Files);
    draft.title = "Report".into();
    let err = vault.submit(&FormMode::Add, None, draft, false, upload_never()).await.unwrap_err();
    assert_eq!(err, VaultError::Validation(ValidationError::MissingFile));
}

#[tokio::test]
async fn test_replacing_upload_deletes_old_blob() {
    let backend = Rc::new(RecordingBackend::new());
    let store = attach_store(backend.as_ref());
    let vault = Vault::new(backend.clone());

    let mut draft = ItemDraft::for_tab(Tab::Photos);
    draft.title = "Cat".into();
    draft.source = ContentSource::File;
    vault.submit(&FormMode::Add, None, draft, true, upload_ok("cat.png")).await.unwrap();

    let original = store.borrow()[0].clone();
    let mut edit = ItemDraft::from_item(&original);
    edit.title = "Better cat".into();
    let mode = FormMode::Edit(original.id.clone());
    vault
        .submit(&mode, Some(&original), edit, true, upload_ok("cat2.png"))
        .await
        .unwrap();

    let updated = store.borrow()[0].clone();
    assert_eq!(updated.title, "Better cat");
    assert_eq!(updated.url, "https://storage.example/o/cat2.png");
    assert_eq!(updated.created_at, original.created_at);
    assert!(backend.calls.borrow().contains(&"blob:uploads/1_cat.png".to_string()));
}

#[tokio::test]
async fn test_edit_of_vanished_item_is_not_found() {
    let backend: Rc<dyn StorageBackend> = Rc::new(LocalBackend::new(MemoryKv::new(), ITEMS_KEY));
    let vault = Vault::new(backend);

    let mut draft = ItemDraft::for_tab(Tab::Links);
    draft.title = "Example".into();
    draft.url = "https://example.com".into();
    let mode = FormMode::Edit("gone".into());
    let err = vault.submit(&mode, None, draft, false, no_upload()).await.unwrap_err();
    assert!(matches!(err, VaultError::NotFound(_)));
}

#[tokio::test]
async fn test_local_photo_stores_data_url_once() {
    let kv = Rc::new(MemoryKv::new());
    let backend: Rc<dyn StorageBackend> = Rc::new(LocalBackend::new(kv.clone(), ITEMS_KEY));
    let store = attach_store(backend.as_ref());
    let vault = Vault::new(backend);

    let data_url = format!("data:image/png;base64,{}", "QUJD".repeat(256));
    let mut draft = ItemDraft::for_tab(Tab::Photos);
    draft.title = "Cat".into();
    draft.source = ContentSource::File;
    vault
        .submit(&FormMode::Add, None, draft, true, upload_inlined(data_url.clone()))
        .await
        .unwrap();

    let slot = kv.get_item(ITEMS_KEY).unwrap();
    assert_eq!(slot.matches(data_url.as_str()).count(), 1);

    let photo = store.borrow()[0].clone();
    assert_eq!(photo.storage_path, None);
    assert_eq!(photo.target_url(), Some(data_url.as_str()));
    assert_eq!(CardView::build(&photo, 150).thumbnail, Some(data_url.clone()));
    assert_eq!(CardAction::for_item(&photo, false), CardAction::OpenExternal(data_url));
}

/// Cloud-style strategy that accepts any credential
struct AcceptAll;

#[async_trait(?Send)]
impl AuthStrategy for AcceptAll {
    async fn login(&self, email: &str, _password: &str) -> Result<Session, AuthError> {
        Ok(Session::admin(Some("uid-1".into()), email))
    }

    async fn logout(&self) -> Result<(), AuthError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_auth_state_reports_are_mirrored() {
    let kv = Rc::new(MemoryKv::new());
    let auth = AuthService::new(Rc::new(AcceptAll), SessionStore::new(kv.clone(), ADMIN_KEY));
    assert_eq!(auth.observe(None), None);

    // signed in elsewhere: mirrored into the admin slot
    let reported = Session::admin(Some("uid-1".into()), "admin@example.com");
    assert_eq!(auth.observe(Some(reported.clone())), Some(reported.clone()));
    let reloaded = SessionStore::new(kv.clone(), ADMIN_KEY);
    assert_eq!(reloaded.current(), Some(reported.clone()));
    assert!(auth.is_authenticated());

    // signed-out report while offline keeps the mirrored session
    assert_eq!(auth.observe(None), Some(reported));
    assert!(auth.is_authenticated());

    auth.logout().await.unwrap();
    assert_eq!(auth.observe(None), None);
    assert!(!auth.is_authenticated());
}
