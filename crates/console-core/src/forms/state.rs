//! Field values, validation and dirtiness of one open form.
//!
//! Fields validate on blur; once touched they revalidate on every change.
//! Submission validates everything first and then yields exactly one
//! [`Mutation`]; a second submit while the first is in flight yields none.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::api::Mutation;
use crate::domain::{Record, RecordKind};
use crate::error::{ApiError, ApiResult};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Checkbox,
}

/// Static description of one form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name, also used to match backend validation errors
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min_len: Option<usize>,
    /// Must equal the value of this other field
    pub matches: Option<&'static str>,
}

impl FieldSpec {
    pub(crate) const fn text(name: &'static str, label: &'static str) -> Self {
        Self { name, label, kind: FieldKind::Text, required: false, min_len: None, matches: None }
    }

    pub(crate) const fn checkbox(name: &'static str, label: &'static str) -> Self {
        Self { kind: FieldKind::Checkbox, ..Self::text(name, label) }
    }

    pub(crate) const fn kind(self, kind: FieldKind) -> Self {
        Self { kind, ..self }
    }

    pub(crate) const fn required(self) -> Self {
        Self { required: true, ..self }
    }

    pub(crate) const fn min_len(self, min: usize) -> Self {
        Self { min_len: Some(min), ..self }
    }

    pub(crate) const fn matches(self, other: &'static str) -> Self {
        Self { matches: Some(other), ..self }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

/// What submitting the form does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormTarget {
    Create(RecordKind),
    Edit { kind: RecordKind, id: String },
}

impl FormTarget {
    pub fn kind(&self) -> RecordKind {
        match self {
            FormTarget::Create(kind) | FormTarget::Edit { kind, .. } => *kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    target: FormTarget,
    fields: Vec<FieldSpec>,
    initial: Vec<FieldValue>,
    values: Vec<FieldValue>,
    errors: HashMap<&'static str, String>,
    touched: HashSet<&'static str>,
    submitting: bool,
}

impl FormState {
    pub(crate) fn new(target: FormTarget, fields: Vec<(FieldSpec, FieldValue)>) -> Self {
        let (fields, initial): (Vec<_>, Vec<_>) = fields.into_iter().unzip();
        Self {
            target,
            fields,
            values: initial.clone(),
            initial,
            errors: HashMap::new(),
            touched: HashSet::new(),
            submitting: false,
        }
    }

    pub fn target(&self) -> &FormTarget {
        &self.target
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Modal heading, e.g. "Add Plan"
    pub fn title(&self) -> String {
        match &self.target {
            FormTarget::Create(kind) => format!("Add {}", kind.label()),
            FormTarget::Edit { kind, .. } => format!("Edit {}", kind.label()),
        }
    }

    fn index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    fn value(&self, name: &str) -> Option<&FieldValue> {
        self.index(name).map(|i| &self.values[i])
    }

    pub fn text(&self, name: &str) -> &str {
        match self.value(name) {
            Some(FieldValue::Text(text)) => text,
            _ => "",
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.value(name), Some(FieldValue::Flag(true)))
    }

    pub fn set_text(&mut self, name: &str, text: impl Into<String>) {
        self.set(name, FieldValue::Text(text.into()));
    }

    pub fn set_flag(&mut self, name: &str, flag: bool) {
        self.set(name, FieldValue::Flag(flag));
    }

    fn set(&mut self, name: &str, value: FieldValue) {
        let Some(i) = self.index(name) else {
            log::warn!("form has no field {name:?}");
            return;
        };
        self.values[i] = value;
        let spec = self.fields[i];
        if self.touched.contains(spec.name) {
            self.validate_field(spec.name);
        } else {
            self.errors.remove(spec.name);
        }
        // A dependent field (password confirmation) may have become valid
        let dependents: Vec<&'static str> = self
            .fields
            .iter()
            .filter(|f| f.matches == Some(spec.name) && self.touched.contains(f.name))
            .map(|f| f.name)
            .collect();
        for dependent in dependents {
            self.validate_field(dependent);
        }
    }

    /// Field lost focus
    pub fn blur(&mut self, name: &str) {
        if let Some(i) = self.index(name) {
            let name = self.fields[i].name;
            self.touched.insert(name);
            self.validate_field(name);
        }
    }

    fn check(&self, i: usize) -> Option<String> {
        let spec = &self.fields[i];
        let FieldValue::Text(text) = &self.values[i] else {
            return None;
        };
        let trimmed = text.trim();
        if let Some(other) = spec.matches {
            if text != self.text(other) {
                return Some("The passwords do not match".to_string());
            }
        }
        if trimmed.is_empty() {
            return spec.required.then(|| format!("{} is required", spec.label));
        }
        if spec.kind == FieldKind::Email && !EMAIL.is_match(trimmed) {
            return Some("Invalid email address".to_string());
        }
        match spec.min_len {
            Some(min) if text.chars().count() < min => {
                Some(format!("{} must be at least {min} characters", spec.label))
            }
            _ => None,
        }
    }

    fn validate_field(&mut self, name: &'static str) -> bool {
        let Some(i) = self.index(name) else {
            return true;
        };
        match self.check(i) {
            Some(message) => {
                self.errors.insert(name, message);
                false
            }
            None => {
                self.errors.remove(name);
                true
            }
        }
    }

    /// Validate every field and show all messages
    pub fn validate(&mut self) -> bool {
        let names: Vec<&'static str> = self.fields.iter().map(|f| f.name).collect();
        let mut ok = true;
        for name in names {
            self.touched.insert(name);
            ok &= self.validate_field(name);
        }
        ok
    }

    pub fn is_valid(&self) -> bool {
        (0..self.fields.len()).all(|i| self.check(i).is_none())
    }

    pub fn is_dirty(&self) -> bool {
        self.values != self.initial
    }

    pub(crate) fn changed(&self, name: &str) -> bool {
        self.index(name).is_some_and(|i| self.values[i] != self.initial[i])
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Save control state: edits need at least one changed field
    pub fn can_submit(&self) -> bool {
        !self.submitting
            && match self.target {
                FormTarget::Create(_) => true,
                FormTarget::Edit { .. } => self.is_dirty(),
            }
    }

    /// Start a submission. Returns the single write to send, or `None` when
    /// the form is invalid, unchanged or already submitting.
    pub fn begin_submit(&mut self) -> Option<Mutation> {
        if !self.can_submit() || !self.validate() {
            return None;
        }
        self.submitting = true;
        Some(self.to_mutation())
    }

    /// Take the outcome of the write started by [`begin_submit`](Self::begin_submit)
    pub fn finish(&mut self, result: &ApiResult<Option<Record>>) {
        self.submitting = false;
        let editing = matches!(self.target, FormTarget::Edit { .. });
        match result {
            Ok(Some(record)) if editing => *self = FormState::edit(record),
            Ok(_) if editing => {
                self.initial = self.values.clone();
                self.clear_feedback();
            }
            Ok(_) => self.reset(),
            Err(err) => {
                self.apply_errors(err);
            }
        }
    }

    /// Attach backend validation messages to their fields.
    /// Returns whether any message named a field of this form.
    pub fn apply_errors(&mut self, err: &ApiError) -> bool {
        let mut attached = false;
        for field_error in err.field_errors() {
            let index = field_error.field.as_deref().and_then(|f| self.index(f));
            let Some(name) = index.map(|i| self.fields[i].name) else {
                continue;
            };
            self.errors.insert(name, field_error.message.clone());
            attached = true;
        }
        attached
    }

    /// Cancel/close. Refused while a save is in flight, so a late failure
    /// still finds the values that were sent.
    pub fn dismiss(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.reset();
        true
    }

    /// Back to the loaded values
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.clear_feedback();
    }

    fn clear_feedback(&mut self) {
        self.errors.clear();
        self.touched.clear();
    }
}
