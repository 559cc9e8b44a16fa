//! Category form modal.
//!
//! One form shape serves both creating and editing. The modal owns its form
//! value and replaces it wholesale on every open, close and successful save.

use catalog_core::{Category, CategoryId, CategoryInput, FieldErrors, fields};

use crate::{api::CategoryApi, error::ClientError};

/// Message shown when the name is blank, before any request is sent.
pub const NAME_REQUIRED: &str = "The name field is required.";

/// Submit label while a request is in flight.
pub const BUSY_LABEL: &str = "Saving...";

/// Whether the modal creates a new category or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// The editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormData {
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

impl FormData {
    /// Empty form for a new category.
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            is_active: true,
        }
    }

    /// Form pre-populated from an existing category.
    #[must_use]
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.to_string(),
            description: category.description.clone().unwrap_or_default(),
            is_active: category.is_active,
        }
    }

    /// Request body; an empty description is sent as `null`.
    #[must_use]
    pub fn to_input(&self) -> CategoryInput {
        CategoryInput {
            name: self.name.clone(),
            description: (!self.description.is_empty()).then(|| self.description.clone()),
            is_active: self.is_active,
        }
    }
}

impl Default for FormData {
    fn default() -> Self {
        Self::blank()
    }
}

/// Result of [`CategoryForm::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server accepted the form; the modal closed.
    Saved(Category),
    /// Local validation failed; nothing was sent.
    Invalid,
    /// The server returned field errors; the modal stays open.
    Rejected,
    /// The request failed; the modal stays open and the failure was logged.
    Failed,
    /// A request is already in flight, or the modal is closed.
    Ignored,
}

/// State of one category form modal.
#[derive(Debug, Clone)]
pub struct CategoryForm {
    mode: FormMode,
    editing: Option<CategoryId>,
    data: FormData,
    errors: FieldErrors,
    processing: bool,
    open: bool,
}

impl CategoryForm {
    /// A closed modal in the given mode.
    #[must_use]
    pub const fn new(mode: FormMode) -> Self {
        Self {
            mode,
            editing: None,
            data: FormData::blank(),
            errors: FieldErrors::new(),
            processing: false,
            open: false,
        }
    }

    /// Open with a blank form.
    pub fn open_create(&mut self) {
        self.mode = FormMode::Create;
        self.editing = None;
        self.reset(FormData::blank());
        self.open = true;
    }

    /// Open pre-populated from `category`.
    pub fn open_edit(&mut self, category: &Category) {
        self.mode = FormMode::Edit;
        self.editing = Some(category.id);
        self.reset(FormData::from_category(category));
        self.open = true;
    }

    /// Close and discard the form value.
    pub fn close(&mut self) {
        self.open = false;
        self.editing = None;
        self.reset(FormData::blank());
    }

    fn reset(&mut self, data: FormData) {
        self.data = data;
        self.errors = FieldErrors::new();
        self.processing = false;
    }

    #[must_use]
    pub const fn mode(&self) -> FormMode {
        self.mode
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub const fn is_processing(&self) -> bool {
        self.processing
    }

    #[must_use]
    pub const fn data(&self) -> &FormData {
        &self.data
    }

    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The category being edited, if any.
    #[must_use]
    pub const fn editing(&self) -> Option<CategoryId> {
        self.editing
    }

    /// Modal heading.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Create New Category",
            FormMode::Edit => "Edit Category",
        }
    }

    /// Submit control label.
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        if self.processing {
            return BUSY_LABEL;
        }
        match self.mode {
            FormMode::Create => "Create Category",
            FormMode::Edit => "Save Changes",
        }
    }

    /// Whether the submit control accepts clicks.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        self.open && !self.processing
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.data.name = name.into();
        self.errors.clear(fields::NAME);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.data.description = description.into();
        self.errors.clear(fields::DESCRIPTION);
    }

    pub fn set_is_active(&mut self, is_active: bool) {
        self.data.is_active = is_active;
        self.errors.clear(fields::IS_ACTIVE);
    }

    /// Check the form before sending it. On failure the errors are shown and
    /// `false` is returned.
    pub fn validate(&mut self) -> bool {
        self.errors = FieldErrors::new();
        if self.data.name.trim().is_empty() {
            self.errors.add(fields::NAME, NAME_REQUIRED);
        }
        self.errors.is_empty()
    }

    /// Validate and send the form.
    ///
    /// On success `on_success` receives the saved category before the modal
    /// closes and resets.
    pub async fn submit<F>(&mut self, api: &dyn CategoryApi, on_success: F) -> SubmitOutcome
    where
        F: FnOnce(&Category) + Send,
    {
        if !self.can_submit() {
            return SubmitOutcome::Ignored;
        }
        if !self.validate() {
            return SubmitOutcome::Invalid;
        }

        let input = self.data.to_input();
        self.processing = true;
        let result = match (self.mode, self.editing) {
            (FormMode::Edit, Some(id)) => api.update(id, &input).await,
            _ => api.create(&input).await,
        };
        self.processing = false;

        match result {
            Ok(response) => {
                on_success(&response.category);
                self.close();
                SubmitOutcome::Saved(response.category)
            }
            Err(ClientError::Validation(errors)) => {
                self.errors = errors;
                SubmitOutcome::Rejected
            }
            Err(e) => {
                tracing::error!(error = %e, mode = ?self.mode, "Failed to save category");
                SubmitOutcome::Failed
            }
        }
    }
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self::new(FormMode::Create)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedApi, category};

    #[test]
    fn test_to_input_blank_description_is_null() {
        let data = FormData {
            name: "Toys".to_string(),
            description: String::new(),
            is_active: true,
        };
        assert_eq!(data.to_input().description, None);

        let data = FormData {
            description: "  ".to_string(),
            ..data
        };
        assert_eq!(data.to_input().description.as_deref(), Some("  "));
    }

    #[test]
    fn test_open_edit_prepopulates() {
        let mut form = CategoryForm::new(FormMode::Edit);
        let mut existing = category(4, "Books");
        existing.description = None;
        existing.is_active = false;

        form.open_edit(&existing);

        assert!(form.is_open());
        assert_eq!(form.editing(), Some(CategoryId::new(4)));
        assert_eq!(form.data().name, "Books");
        assert_eq!(form.data().description, "");
        assert!(!form.data().is_active);
        assert_eq!(form.title(), "Edit Category");
        assert_eq!(form.submit_label(), "Save Changes");
    }

    #[test]
    fn test_open_clears_errors_and_resets() {
        let mut form = CategoryForm::default();
        form.open_create();
        form.set_name("   ");
        assert!(!form.validate());
        assert!(form.errors().contains(fields::NAME));

        form.open_create();
        assert!(form.errors().is_empty());
        assert_eq!(form.data(), &FormData::blank());
        assert_eq!(form.title(), "Create New Category");
    }

    #[test]
    fn test_editing_field_clears_its_error() {
        let mut form = CategoryForm::default();
        form.open_create();
        assert!(!form.validate());

        form.set_description("x");
        assert!(form.errors().contains(fields::NAME));

        form.set_name("T");
        assert!(!form.errors().contains(fields::NAME));
    }

    #[tokio::test]
    async fn test_blank_name_sends_nothing() {
        let api = ScriptedApi::default();
        let mut form = CategoryForm::default();
        form.open_create();
        form.set_name("  ");

        let outcome = form.submit(&api, |_| {}).await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(form.errors().get(fields::NAME), Some(NAME_REQUIRED));
        assert_eq!(api.calls(), 0);
        assert!(form.is_open());
    }

    #[tokio::test]
    async fn test_create_success_closes_and_resets() {
        let api = ScriptedApi::default();
        api.push_save(Ok(category(9, "Toys")));

        let mut form = CategoryForm::default();
        form.open_create();
        form.set_name("Toys");

        let mut saved = None;
        let outcome = form
            .submit(&api, |category| saved = Some(category.id))
            .await;

        assert!(matches!(outcome, SubmitOutcome::Saved(ref c) if c.slug.as_str() == "toys"));
        assert_eq!(saved, Some(CategoryId::new(9)));
        assert!(!form.is_open());
        assert_eq!(form.data(), &FormData::blank());
        assert!(!form.is_processing());

        let sent = api.last_input().unwrap();
        assert_eq!(sent.name, "Toys");
        assert_eq!(sent.description, None);
    }

    #[tokio::test]
    async fn test_edit_sends_update() {
        let api = ScriptedApi::default();
        api.push_save(Ok(category(2, "Games")));

        let mut form = CategoryForm::new(FormMode::Edit);
        form.open_edit(&category(2, "Toys"));
        form.set_name("Games");

        let outcome = form.submit(&api, |_| {}).await;

        assert!(matches!(outcome, SubmitOutcome::Saved(_)));
        assert_eq!(api.last_update_id(), Some(CategoryId::new(2)));
    }

    #[tokio::test]
    async fn test_server_errors_replace_local_errors() {
        let api = ScriptedApi::default();
        api.push_save(Err(ClientError::Validation(FieldErrors::single(
            fields::NAME,
            "The name has already been taken.",
        ))));

        let mut form = CategoryForm::default();
        form.open_create();
        form.set_name("Toys");

        let outcome = form.submit(&api, |_| panic!("not saved")).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert!(form.is_open());
        assert_eq!(
            form.errors().get(fields::NAME),
            Some("The name has already been taken.")
        );
        assert_eq!(form.data().name, "Toys");
        assert_eq!(form.submit_label(), "Create Category");
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_form() {
        let api = ScriptedApi::default();
        api.push_save(Err(ClientError::UnexpectedStatus {
            status: 500,
            body: String::new(),
        }));

        let mut form = CategoryForm::default();
        form.open_create();
        form.set_name("Toys");
        form.set_description("Things");

        let outcome = form.submit(&api, |_| panic!("not saved")).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert!(form.is_open());
        assert!(!form.is_processing());
        assert!(form.errors().is_empty());
        assert_eq!(form.data().description, "Things");
    }

    #[tokio::test]
    async fn test_closed_form_ignores_submit() {
        let api = ScriptedApi::default();
        let mut form = CategoryForm::default();

        assert_eq!(form.submit(&api, |_| {}).await, SubmitOutcome::Ignored);
        assert_eq!(api.calls(), 0);
    }

    #[test]
    fn test_busy_label() {
        let mut form = CategoryForm::default();
        form.open_create();
        form.processing = true;

        assert_eq!(form.submit_label(), BUSY_LABEL);
        assert!(!form.can_submit());
    }
}
