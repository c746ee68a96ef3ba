// File: tramite-site/src/form/controller.rs
// Purpose: Quote form validation and the submit lifecycle

use std::rc::Rc;

use tracing::{debug, info, warn};
use tramite_validation::trim_value;

use super::field::{Field, Validity};
use super::submission::SubmissionState;
use crate::config::{FieldConfig, FormConfig};
use crate::dom::Dom;
use crate::error::{Result, SiteError};
use crate::network::{FormPayload, Network, NetworkResponse, SubmissionRequest};
use crate::scheduler::{Scheduler, Timer};

/// Validates the quote form and drives its submission.
///
/// Submission is split at the network await so the browser host can
/// release the controller while the request is in flight:
///
/// ```ignore
/// if let Some(request) = form.begin_submit() {
///     let outcome = network.send(&request).await;
///     form.complete_submit(outcome);
/// }
/// ```
pub struct FormController {
    config: FormConfig,
    fields: Vec<Field>,
    state: SubmissionState,
    attempt: u64,
    original_label: Option<String>,
    dom: Rc<dyn Dom>,
    scheduler: Rc<dyn Scheduler>,
}

impl FormController {
    /// The field set is read from the form's named controls; the configured
    /// list is used only when the document exposes none.
    pub fn new(config: FormConfig, dom: Rc<dyn Dom>, scheduler: Rc<dyn Scheduler>) -> Self {
        let fields = discover_fields(&config, dom.as_ref());
        Self {
            config,
            fields,
            state: SubmissionState::Idle,
            attempt: 0,
            original_label: None,
            dom,
            scheduler,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Fields in document order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.fields
            .iter()
            .position(|f| f.name() == name)
            .ok_or_else(|| SiteError::UnknownField(name.to_string()))
    }

    fn current_value(&self, index: usize) -> String {
        self.dom.value(self.fields[index].id()).unwrap_or_default()
    }

    fn has_content(&self, index: usize) -> bool {
        !trim_value(&self.current_value(index)).is_empty()
    }

    fn validate_at(&mut self, index: usize) -> bool {
        let raw = self.current_value(index);
        let field = &mut self.fields[index];
        let valid = field.evaluate(raw);
        field.render(self.dom.as_ref());
        valid
    }

    /// Validate one field against its rule and paint the outcome
    pub fn validate_field(&mut self, name: &str) -> Result<bool> {
        let index = self.index_of(name)?;
        Ok(self.validate_at(index))
    }

    /// Validate every field (no short-circuit); true iff all are valid
    pub fn validate_form(&mut self) -> bool {
        let mut all_valid = true;
        for index in 0..self.fields.len() {
            all_valid &= self.validate_at(index);
        }
        all_valid
    }

    /// `input` event: re-check while typing once there is something to check
    pub fn on_input(&mut self, name: &str) -> Result<()> {
        let index = self.index_of(name)?;
        let showing_error = self.fields[index].validity() == Validity::Invalid;
        if showing_error || self.has_content(index) {
            self.validate_at(index);
        }
        Ok(())
    }

    /// `blur` event: check required fields and anything filled in
    pub fn on_blur(&mut self, name: &str) -> Result<()> {
        let index = self.index_of(name)?;
        if self.fields[index].required() || self.has_content(index) {
            self.validate_at(index);
        }
        Ok(())
    }

    fn focus_first_invalid(&self) {
        if let Some(field) = self
            .fields
            .iter()
            .find(|f| f.validity() == Validity::Invalid)
        {
            debug!(field = field.name(), "focusing first invalid field");
            self.dom.focus(field.id());
        }
    }

    fn payload(&self) -> FormPayload {
        let mut payload = FormPayload::new();
        for field in &self.fields {
            payload.append(field.name(), field.value());
        }
        payload
    }

    fn render_button(&self) {
        let original = self.original_label.as_deref().unwrap_or("");
        self.state
            .render(self.dom.as_ref(), &self.config.submit_button_id, original);
    }

    /// Handle a submit: validate, then enter Submitting and hand back the request.
    ///
    /// Returns `None` when the form is invalid (the first invalid field is
    /// focused) or the control is disabled.
    pub fn begin_submit(&mut self) -> Option<SubmissionRequest> {
        if self.state.is_disabled() {
            debug!(state = ?self.state, "submit ignored while control is disabled");
            return None;
        }

        if !self.validate_form() {
            debug!("quote form invalid, submission blocked");
            self.focus_first_invalid();
            return None;
        }

        if self.original_label.is_none() {
            self.original_label = Some(
                self.dom
                    .inner_html(&self.config.submit_button_id)
                    .unwrap_or_default(),
            );
        }

        self.attempt += 1;
        self.state = SubmissionState::Submitting;
        self.render_button();

        info!(attempt = self.attempt, url = %self.config.action, "submitting quote form");
        Some(SubmissionRequest::post(&self.config.action, self.payload()))
    }

    /// Apply the outcome of the request issued by [`Self::begin_submit`]
    pub fn complete_submit(&mut self, outcome: Result<NetworkResponse>) {
        if self.state != SubmissionState::Submitting {
            warn!(state = ?self.state, "submission outcome arrived with no request in flight");
            return;
        }

        match outcome {
            Ok(response) if response.is_success() => {
                info!(status = response.status, "quote request sent");
                self.succeed();
            }
            Ok(response) => {
                warn!(status = response.status, "quote request rejected");
                self.fail();
            }
            Err(err) => {
                warn!(error = %err, "quote request failed");
                self.fail();
            }
        }

        self.scheduler.schedule(
            Timer::RevertSubmit {
                attempt: self.attempt,
            },
            self.config.revert_delay(),
        );
    }

    fn succeed(&mut self) {
        self.state = SubmissionState::Succeeded;
        self.render_button();

        self.dom.reset_form(&self.config.form_id);
        for index in 0..self.fields.len() {
            let value = self.current_value(index);
            let field = &mut self.fields[index];
            field.reset(value);
            field.render(self.dom.as_ref());
        }

        self.dom.scroll_into_view(&self.config.submit_button_id);
    }

    fn fail(&mut self) {
        self.state = SubmissionState::Failed;
        self.render_button();
    }

    /// Revert timer fired: back to Idle with the original label.
    ///
    /// Timers from an earlier attempt are ignored.
    pub fn on_revert(&mut self, attempt: u64) {
        if attempt != self.attempt || !self.state.is_settled() {
            debug!(attempt, current = self.attempt, "stale revert timer ignored");
            return;
        }

        self.state = SubmissionState::Idle;
        self.render_button();
        self.original_label = None;
    }

    /// Run a whole submit against `network`; returns the resulting state
    pub async fn submit(&mut self, network: &dyn Network) -> SubmissionState {
        if let Some(request) = self.begin_submit() {
            let outcome = network.send(&request).await;
            self.complete_submit(outcome);
        }
        self.state
    }
}

/// Named controls in document order; `required` comes from the markup.
///
/// A configured field with the same name contributes its group id when the
/// control sits in no `.form-group`. Repeated names (radio groups) keep
/// their first control.
fn discover_fields(config: &FormConfig, dom: &dyn Dom) -> Vec<Field> {
    let controls = dom.named_controls(&config.form_id);
    if controls.is_empty() {
        return config.fields.iter().map(Field::from_config).collect();
    }

    let mut fields: Vec<Field> = Vec::with_capacity(controls.len());
    for control in controls {
        if fields.iter().any(|f| f.name() == control.name) {
            debug!(name = %control.name, "repeated control name, first one kept");
            continue;
        }
        let configured = config.fields.iter().find(|f| f.name == control.name);
        let field = FieldConfig {
            group_id: control
                .group_id
                .or_else(|| configured.and_then(|f| f.group_id.clone())),
            ..FieldConfig::new(control.name, control.id, control.required)
        };
        fields.push(Field::from_config(&field));
    }
    debug!(count = fields.len(), "form fields discovered");
    fields
}
