//! Form controller: draft record, local validation, submit, server error mapping.

use super::api::{ApiError, CollectionApi};
use super::capitalize;
use super::entity::CollectionEntity;
use super::notify::{Notice, Notifier};
use contracts::shared::form::{DraftRecord, FieldErrors, FormMode};
use contracts::shared::validation::validate;
use serde_json::{Map, Number, Value};
use std::marker::PhantomData;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    Date,
    Time,
    Email,
    Url,
    Color,
    /// (value, label) pairs
    Select(&'static [(&'static str, &'static str)]),
    Checkbox,
}

impl FieldKind {
    /// `type` attribute of the `<input>`
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Time => "time",
            FieldKind::Email => "email",
            FieldKind::Url => "url",
            FieldKind::Color => "color",
            FieldKind::Checkbox => "checkbox",
            _ => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Shows the required marker; the rules decide what is enforced
    pub required: bool,
    /// Shown and sent only when creating
    pub create_only: bool,
    pub placeholder: &'static str,
}

impl FormField {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            create_only: false,
            placeholder: "",
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn create_only(mut self) -> Self {
        self.create_only = true;
        self
    }

    pub const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn visible_in(&self, mode: FormMode) -> bool {
        !(self.create_only && mode == FormMode::Edit)
    }
}

/// Draft → JSON body. Blank inputs become `null`, numbers become JSON numbers.
pub fn payload_from_draft(fields: &[FormField], draft: &DraftRecord, mode: FormMode) -> Value {
    let mut body = Map::new();
    for field in fields.iter().filter(|f| f.visible_in(mode)) {
        let value = match (field.kind, draft.value(field.name)) {
            (FieldKind::Checkbox, raw) => Value::Bool(matches!(raw, Some("true" | "1" | "on"))),
            (_, None) => Value::Null,
            (FieldKind::Number, Some(raw)) => number_value(raw),
            (_, Some(raw)) => Value::String(raw.to_string()),
        };
        body.insert(field.name.to_string(), value);
    }
    Value::Object(body)
}

fn number_value(raw: &str) -> Value {
    if let Ok(int) = raw.parse::<i64>() {
        return Value::Number(int.into());
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(raw.to_string()))
}

/// Validated request ready to go on the wire
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    pub mode: FormMode,
    /// Record id in edit mode
    pub target: Option<String>,
    pub payload: Value,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// Local rules failed, nothing was sent
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),
    /// The service rejected individual fields
    #[error("service rejected {} field(s)", .0.len())]
    Rejected(FieldErrors),
    #[error("{0}")]
    Failed(String),
    #[error("a submit is already in progress")]
    Busy,
}

impl SubmitError {
    /// Field errors keep the dialog open so they can be corrected
    pub fn closes_dialog(&self) -> bool {
        matches!(self, SubmitError::Failed(_))
    }
}

/// State of one open create/edit dialog
pub struct FormController<E: CollectionEntity> {
    mode: FormMode,
    target: Option<String>,
    draft: DraftRecord,
    errors: FieldErrors,
    saving: bool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: CollectionEntity> Clone for FormController<E> {
    fn clone(&self) -> Self {
        Self {
            mode: self.mode,
            target: self.target.clone(),
            draft: self.draft.clone(),
            errors: self.errors.clone(),
            saving: self.saving,
            _entity: PhantomData,
        }
    }
}

impl<E: CollectionEntity> std::fmt::Debug for FormController<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("entity", &E::PAGE_ID)
            .field("mode", &self.mode)
            .field("target", &self.target)
            .field("draft", &self.draft)
            .field("errors", &self.errors)
            .field("saving", &self.saving)
            .finish()
    }
}

impl<E: CollectionEntity> FormController<E> {
    pub fn open_create() -> Self {
        Self {
            mode: FormMode::Create,
            target: None,
            draft: E::form_defaults(),
            errors: FieldErrors::new(),
            saving: false,
            _entity: PhantomData,
        }
    }

    pub fn open_edit(record: &E::Record) -> Self {
        Self {
            mode: FormMode::Edit,
            target: Some(E::record_id(record)),
            draft: E::project(record),
            errors: FieldErrors::new(),
            saving: false,
            _entity: PhantomData,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn draft(&self) -> &DraftRecord {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn title(&self) -> String {
        match self.mode {
            FormMode::Create => format!("New {}", E::SINGULAR),
            FormMode::Edit => format!("Edit {}", E::SINGULAR),
        }
    }

    /// Fields shown in the current mode
    pub fn fields(&self) -> Vec<FormField> {
        E::form_fields()
            .into_iter()
            .filter(|f| f.visible_in(self.mode))
            .collect()
    }

    /// Only this field's error is cleared
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.draft.set(name, value);
        self.errors.remove(name);
    }

    pub fn validate(&self) -> FieldErrors {
        validate(&self.draft, &E::rules(self.mode), self.mode)
    }

    /// Local validation; on success marks the form as saving and builds the request.
    pub fn prepare_submit(&mut self) -> Result<SubmitRequest, SubmitError> {
        if self.saving {
            return Err(SubmitError::Busy);
        }
        self.errors.clear();
        let errors = self.validate();
        if !errors.is_empty() {
            log::debug!("{} form invalid: {:?}", E::SINGULAR, errors);
            self.errors = errors.clone();
            return Err(SubmitError::Invalid(errors));
        }
        self.saving = true;
        Ok(SubmitRequest {
            mode: self.mode,
            target: self.target.clone(),
            payload: payload_from_draft(&E::form_fields(), &self.draft, self.mode),
        })
    }

    /// Create or update call, depending on the request's mode
    pub async fn send<A>(api: &A, request: &SubmitRequest) -> Result<E::Record, ApiError>
    where
        A: CollectionApi<E::Record> + ?Sized,
    {
        match (request.mode, request.target.as_deref()) {
            (FormMode::Edit, Some(id)) => {
                log::debug!("update {} {}", E::SINGULAR, id);
                api.update(id, &request.payload).await
            }
            _ => {
                log::debug!("create {}", E::SINGULAR);
                api.create(&request.payload).await
            }
        }
    }

    /// Outcome of `send`: notifications and error mapping.
    ///
    /// On `Ok` and on `Err(e)` with `e.closes_dialog()` the caller closes the
    /// dialog; `Rejected` leaves it open with the service's field errors.
    pub fn apply<N>(
        &mut self,
        result: Result<E::Record, ApiError>,
        notifier: &N,
    ) -> Result<E::Record, SubmitError>
    where
        N: Notifier + ?Sized,
    {
        self.saving = false;
        match result {
            Ok(record) => {
                let verb = match self.mode {
                    FormMode::Create => "created",
                    FormMode::Edit => "updated",
                };
                notifier.notify(Notice::success(
                    "Success",
                    format!("{} {} successfully", capitalize(E::SINGULAR), verb),
                ));
                Ok(record)
            }
            Err(ApiError::Validation { errors, .. }) => {
                log::warn!("{} rejected by service: {:?}", E::SINGULAR, errors);
                self.errors = errors.clone();
                Err(SubmitError::Rejected(errors))
            }
            Err(err) => {
                log::error!("save {} failed: {}", E::SINGULAR, err);
                let message = err.user_message(&format!("Could not save {}", E::SINGULAR));
                notifier.notify(Notice::error("Error", message.clone()));
                Err(SubmitError::Failed(message))
            }
        }
    }

    /// prepare → send → apply in one go
    pub async fn submit<A, N>(&mut self, api: &A, notifier: &N) -> Result<E::Record, SubmitError>
    where
        A: CollectionApi<E::Record> + ?Sized,
        N: Notifier + ?Sized,
    {
        let request = self.prepare_submit()?;
        let result = Self::send(api, &request).await;
        self.apply(result, notifier)
    }
}
