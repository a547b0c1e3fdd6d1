//! Draft persistence.
//!
//! Drafts are the collected flat form data stored as JSON under a per-form
//! key (`healthplex_draft_<form>`). The wizard additionally stores its
//! navigation progress under [`WIZARD_PROGRESS_KEY`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use healthplex_core::{FlatFormData, FormType};

use crate::config::write_atomic;
use crate::error::FormsError;

pub const WIZARD_PROGRESS_KEY: &str = "healthplex_wizard_progress";

/// Key/value storage for drafts.
pub trait DraftStore {
    fn load(&self, key: &str) -> Result<Option<String>, FormsError>;

    fn save(&self, key: &str, value: &str) -> Result<(), FormsError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), FormsError>;
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    dir: PathBuf,
}

impl FileDraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self, key: &str) -> Result<Option<String>, FormsError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), FormsError> {
        write_atomic(&self.path(key), value.as_bytes())
    }

    fn remove(&self, key: &str) -> Result<(), FormsError> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self, key: &str) -> Result<Option<String>, FormsError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), FormsError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), FormsError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

impl<S: DraftStore + ?Sized> DraftStore for std::rc::Rc<S> {
    fn load(&self, key: &str) -> Result<Option<String>, FormsError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), FormsError> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), FormsError> {
        (**self).remove(key)
    }
}

pub fn save_draft(
    store: &dyn DraftStore,
    form_type: FormType,
    data: &FlatFormData,
) -> Result<(), FormsError> {
    let json = serde_json::to_string(data)?;
    store.save(&form_type.draft_key(), &json)?;
    tracing::debug!(form = form_type.key(), fields = data.len(), "draft saved");
    Ok(())
}

/// A draft that no longer parses is discarded with a warning.
pub fn load_draft(
    store: &dyn DraftStore,
    form_type: FormType,
) -> Result<Option<FlatFormData>, FormsError> {
    let key = form_type.draft_key();
    let Some(json) = store.load(&key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&json) {
        Ok(data) => Ok(Some(data)),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "discarding unreadable draft");
            store.remove(&key)?;
            Ok(None)
        }
    }
}

pub fn clear_draft(store: &dyn DraftStore, form_type: FormType) -> Result<(), FormsError> {
    store.remove(&form_type.draft_key())
}

/// Where the wizard user left off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardProgress {
    pub current_step: u8,
    pub step_validation: BTreeMap<u8, bool>,
    pub start_time: jiff::Timestamp,
}

impl WizardProgress {
    pub fn load(store: &dyn DraftStore) -> Result<Option<Self>, FormsError> {
        let Some(json) = store.load(WIZARD_PROGRESS_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(progress) => Ok(Some(progress)),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable wizard progress");
                store.remove(WIZARD_PROGRESS_KEY)?;
                Ok(None)
            }
        }
    }

    pub fn save(&self, store: &dyn DraftStore) -> Result<(), FormsError> {
        store.save(WIZARD_PROGRESS_KEY, &serde_json::to_string(self)?)
    }

    pub fn clear(store: &dyn DraftStore) -> Result<(), FormsError> {
        store.remove(WIZARD_PROGRESS_KEY)
    }
}
