// File: tramite-site/src/config.rs
// Purpose: Page configuration (element ids, delays, thresholds) parsed from tramite.toml

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::SiteError;

/// Site configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SiteConfig {
    #[serde(default)]
    pub form: FormConfig,

    #[serde(default)]
    pub consent: ConsentConfig,

    #[serde(default)]
    pub nav: NavConfig,

    #[serde(default)]
    pub scroll: ScrollConfig,

    #[serde(default)]
    pub animation: AnimationConfig,

    #[serde(default)]
    pub footer: FooterConfig,
}

/// Quote form configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default = "default_form_id")]
    pub form_id: String,

    /// POST target. Left empty, the browser host takes it from the form's `action`.
    #[serde(default)]
    pub action: String,

    #[serde(default = "default_submit_button_id")]
    pub submit_button_id: String,

    /// How long the success/error label stays on the submit button
    #[serde(default = "default_revert_delay_ms")]
    pub revert_delay_ms: u64,

    /// Named fields in document order
    #[serde(default = "default_fields")]
    pub fields: Vec<FieldConfig>,
}

/// One named form control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,

    pub id: String,

    #[serde(default)]
    pub required: bool,

    /// Id of the enclosing `.form-group`; defaults to `<id>-group`
    #[serde(default)]
    pub group_id: Option<String>,
}

/// Cookie banner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default = "default_banner_id")]
    pub banner_id: String,

    #[serde(default = "default_accept_id")]
    pub accept_id: String,

    #[serde(default = "default_reject_id")]
    pub reject_id: String,

    /// Banner shows after this delay if the visitor never scrolls
    #[serde(default = "default_fallback_delay_ms")]
    pub fallback_delay_ms: u64,
}

/// Navigation bar and mobile menu configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavConfig {
    #[serde(default = "default_navbar_id")]
    pub navbar_id: String,

    #[serde(default = "default_hamburger_id")]
    pub hamburger_id: String,

    #[serde(default = "default_menu_id")]
    pub menu_id: String,

    #[serde(default = "default_overlay_id")]
    pub overlay_id: String,

    /// Navbar gets `scrolled` past this page offset
    #[serde(default = "default_scrolled_after_px")]
    pub scrolled_after_px: f64,

    /// Extra gap kept between the navbar and an anchor target
    #[serde(default = "default_anchor_offset_px")]
    pub anchor_offset_px: f64,
}

/// Scroll progress bar and smooth scroll configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    #[serde(default = "default_progress_id")]
    pub progress_id: String,

    #[serde(default = "default_progress_visible_after_px")]
    pub progress_visible_after_px: f64,

    /// Duration of the fallback smooth scroll animation
    #[serde(default = "default_smooth_scroll_ms")]
    pub smooth_scroll_ms: u64,
}

/// Fade-in animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_animate_class")]
    pub class: String,

    #[serde(default = "default_root_margin")]
    pub root_margin: String,

    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

/// Footer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FooterConfig {
    #[serde(default = "default_year_id")]
    pub year_id: String,
}

// Default values
fn default_form_id() -> String {
    "quoteForm".to_string()
}

fn default_submit_button_id() -> String {
    "quoteSubmit".to_string()
}

fn default_revert_delay_ms() -> u64 {
    4000
}

fn default_fields() -> Vec<FieldConfig> {
    vec![
        FieldConfig::new("name", "name", true),
        FieldConfig::new("email", "email", true),
        FieldConfig::new("phone", "phone", false),
        FieldConfig::new("message", "message", true),
    ]
}

fn default_storage_key() -> String {
    "cookieConsent".to_string()
}

fn default_banner_id() -> String {
    "cookieBanner".to_string()
}

fn default_accept_id() -> String {
    "cookieAccept".to_string()
}

fn default_reject_id() -> String {
    "cookieReject".to_string()
}

fn default_fallback_delay_ms() -> u64 {
    3000
}

fn default_navbar_id() -> String {
    "mainNav".to_string()
}

fn default_hamburger_id() -> String {
    "hamburgerBtn".to_string()
}

fn default_menu_id() -> String {
    "navMenu".to_string()
}

fn default_overlay_id() -> String {
    "navOverlay".to_string()
}

fn default_scrolled_after_px() -> f64 {
    50.0
}

fn default_anchor_offset_px() -> f64 {
    20.0
}

fn default_progress_id() -> String {
    "scrollProgress".to_string()
}

fn default_progress_visible_after_px() -> f64 {
    10.0
}

fn default_smooth_scroll_ms() -> u64 {
    600
}

fn default_animate_class() -> String {
    "animate-on-scroll".to_string()
}

fn default_root_margin() -> String {
    "0px 0px -50px 0px".to_string()
}

fn default_threshold() -> f64 {
    0.1
}

fn default_year_id() -> String {
    "currentYear".to_string()
}

// Default implementations
impl Default for FormConfig {
    fn default() -> Self {
        Self {
            form_id: default_form_id(),
            action: String::new(),
            submit_button_id: default_submit_button_id(),
            revert_delay_ms: default_revert_delay_ms(),
            fields: default_fields(),
        }
    }
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            banner_id: default_banner_id(),
            accept_id: default_accept_id(),
            reject_id: default_reject_id(),
            fallback_delay_ms: default_fallback_delay_ms(),
        }
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            navbar_id: default_navbar_id(),
            hamburger_id: default_hamburger_id(),
            menu_id: default_menu_id(),
            overlay_id: default_overlay_id(),
            scrolled_after_px: default_scrolled_after_px(),
            anchor_offset_px: default_anchor_offset_px(),
        }
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            progress_id: default_progress_id(),
            progress_visible_after_px: default_progress_visible_after_px(),
            smooth_scroll_ms: default_smooth_scroll_ms(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            class: default_animate_class(),
            root_margin: default_root_margin(),
            threshold: default_threshold(),
        }
    }
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            year_id: default_year_id(),
        }
    }
}

impl FieldConfig {
    pub fn new(name: impl Into<String>, id: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            required,
            group_id: None,
        }
    }

    /// Id of the `<span>` receiving the error message
    pub fn error_slot_id(&self) -> String {
        format!("{}-error", self.id)
    }

    /// Id of the enclosing form group
    pub fn group_id(&self) -> String {
        self.group_id
            .clone()
            .unwrap_or_else(|| format!("{}-group", self.id))
    }
}

impl FormConfig {
    pub fn revert_delay(&self) -> Duration {
        Duration::from_millis(self.revert_delay_ms)
    }
}

impl ConsentConfig {
    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }
}

impl ScrollConfig {
    pub fn smooth_scroll_duration(&self) -> Duration {
        Duration::from_millis(self.smooth_scroll_ms)
    }
}

impl SiteConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Parse configuration from TOML text; empty text yields defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: SiteConfig = toml::from_str(content).context("Invalid TOML")?;
        Ok(config)
    }

    /// Load configuration from default path (./tramite.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("tramite.toml")
    }

    /// Check the values the controllers rely on
    pub fn validate(&self) -> std::result::Result<(), SiteError> {
        if self.form.action.trim().is_empty() {
            return Err(SiteError::Config("form.action must not be empty".into()));
        }

        if self.form.fields.is_empty() {
            return Err(SiteError::Config("form.fields must list at least one field".into()));
        }

        let mut seen = HashSet::new();
        for field in &self.form.fields {
            if field.name.is_empty() || field.id.is_empty() {
                return Err(SiteError::Config(
                    "every form field needs a name and an id".into(),
                ));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SiteError::Config(format!(
                    "duplicate form field name: {}",
                    field.name
                )));
            }
        }

        if self.form.revert_delay_ms == 0 {
            return Err(SiteError::Config("form.revert_delay_ms must be positive".into()));
        }

        if self.consent.fallback_delay_ms == 0 {
            return Err(SiteError::Config(
                "consent.fallback_delay_ms must be positive".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.animation.threshold) {
            return Err(SiteError::Config(
                "animation.threshold must be between 0 and 1".into(),
            ));
        }

        Ok(())
    }
}
