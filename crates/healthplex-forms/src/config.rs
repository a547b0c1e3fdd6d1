use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use healthplex_core::FormType;

use crate::error::FormsError;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// Webhook URLs containing this host are template values, not real
/// endpoints.
pub const PLACEHOLDER_SENTINEL: &str = "your-n8n-instance";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormsConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub webhooks: WebhookUrls,
    #[serde(default)]
    pub settings: FormSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookUrls {
    #[serde(default)]
    pub new_consultation: String,
    #[serde(default)]
    pub family_history: String,
    #[serde(default)]
    pub metabolic_assessment: String,
    #[serde(default)]
    pub intake_wizard: String,
}

impl WebhookUrls {
    pub fn url(&self, form_type: FormType) -> &str {
        match form_type {
            FormType::NewConsultation => &self.new_consultation,
            FormType::FamilyHistory => &self.family_history,
            FormType::MetabolicAssessment => &self.metabolic_assessment,
            FormType::IntakeWizard => &self.intake_wizard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
    pub enable_draft_saving: bool,
    pub draft_save_interval_secs: u64,
    pub show_progress_indicator: bool,
    pub submit_button_text: String,
    pub submitting_text: String,
    /// Limit on the webhook POST itself.
    pub request_timeout_secs: u64,
    /// Limit on a whole wizard submission, snapshot rendering included.
    pub submission_timeout_secs: u64,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            enable_draft_saving: true,
            draft_save_interval_secs: 30,
            show_progress_indicator: true,
            submit_button_text: "Submit Form".to_string(),
            submitting_text: "Submitting...".to_string(),
            request_timeout_secs: 25,
            submission_timeout_secs: 30,
        }
    }
}

impl FormSettings {
    pub fn draft_save_interval(&self) -> Duration {
        Duration::from_secs(self.draft_save_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn submission_timeout(&self) -> Duration {
        Duration::from_secs(self.submission_timeout_secs)
    }

    pub fn button_text(&self, submitting: bool) -> &str {
        if submitting {
            &self.submitting_text
        } else {
            &self.submit_button_text
        }
    }
}

impl FormsConfig {
    pub fn new(webhooks: WebhookUrls) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            webhooks,
            settings: FormSettings::default(),
        }
    }

    pub fn webhook_url(&self, form_type: FormType) -> &str {
        self.webhooks.url(form_type)
    }
}

/// A URL is usable when it is set and is not the template placeholder.
pub fn is_configured(url: &str) -> bool {
    !url.trim().is_empty() && !url.contains(PLACEHOLDER_SENTINEL)
}

fn config_dir() -> Result<PathBuf, FormsError> {
    let base = dirs::config_dir().ok_or(FormsError::NoConfigDir)?;
    Ok(base.join("com.healthplex.forms"))
}

pub fn default_config_path() -> Result<PathBuf, FormsError> {
    Ok(config_dir()?.join("config.json"))
}

/// Default directory for file-backed drafts.
pub fn default_draft_dir() -> Result<PathBuf, FormsError> {
    Ok(config_dir()?.join("drafts"))
}

pub fn load_config(path: &Path) -> Result<FormsConfig, FormsError> {
    let contents = std::fs::read_to_string(path).map_err(|source| FormsError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: FormsConfig = serde_json::from_value(migrated)?;
    tracing::debug!(path = %path.display(), version = on_disk_version, "config loaded");
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, FormsError> {
    if from_version > CURRENT_VERSION {
        return Err(FormsError::ConfigVersion {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }

    // v0 → v1: draft interval moved from milliseconds to seconds
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| FormsError::Config("config is not a JSON object".to_string()))?;
        if let Some(settings) = obj.get_mut("settings").and_then(|s| s.as_object_mut())
            && let Some(ms) = settings
                .remove("draft_save_interval_ms")
                .and_then(|v| v.as_u64())
        {
            settings.insert(
                "draft_save_interval_secs".to_string(),
                serde_json::Value::Number((ms / 1000).into()),
            );
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (draft interval in seconds)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &FormsConfig) -> Result<(), FormsError> {
    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;
    write_atomic(path, json.as_bytes())?;
    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// Write to a sibling temp file, restrict it to the owner on Unix, then
/// rename over the target.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), FormsError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);
    std::fs::write(&tmp_path, contents)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;
    Ok(())
}
