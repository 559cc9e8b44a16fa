//! Category page controller.
//!
//! Holds the ordered list shown on the page, the two form modals and the
//! category currently being edited. Local state changes only after the server
//! has answered.

use catalog_core::{CategoriesPage, Category, CategoryId, Flash};

use crate::{
    api::CategoryApi,
    form::{CategoryForm, FormMode, SubmitOutcome},
};

/// Question asked before deleting.
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this category?";

/// Fallback message when a failed delete carries none.
const DELETE_FAILED: &str = "The category could not be deleted.";

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Result of [`CategoryPage::delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined; nothing was sent.
    Cancelled,
    /// The server deleted the category and it left the list.
    Deleted,
    /// The server refused or the request failed; the list is unchanged.
    Failed(String),
}

/// State behind the category page.
#[derive(Debug, Clone)]
pub struct CategoryPage {
    categories: Vec<Category>,
    create_modal: CategoryForm,
    edit_modal: CategoryForm,
    selected: Option<Category>,
    flash: Option<Flash>,
}

impl CategoryPage {
    /// Start from a page payload.
    #[must_use]
    pub fn from_page(page: CategoriesPage) -> Self {
        Self {
            categories: page.categories,
            create_modal: CategoryForm::new(FormMode::Create),
            edit_modal: CategoryForm::new(FormMode::Edit),
            selected: None,
            flash: page.flash,
        }
    }

    /// Replace the list with fresh page data.
    pub fn replace_all(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn find(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// The category the edit modal was opened for.
    #[must_use]
    pub const fn selected(&self) -> Option<&Category> {
        self.selected.as_ref()
    }

    #[must_use]
    pub const fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }

    /// Take the pending flash for display.
    pub const fn take_flash(&mut self) -> Option<Flash> {
        self.flash.take()
    }

    #[must_use]
    pub const fn create_modal(&self) -> &CategoryForm {
        &self.create_modal
    }

    pub const fn create_modal_mut(&mut self) -> &mut CategoryForm {
        &mut self.create_modal
    }

    #[must_use]
    pub const fn edit_modal(&self) -> &CategoryForm {
        &self.edit_modal
    }

    pub const fn edit_modal_mut(&mut self) -> &mut CategoryForm {
        &mut self.edit_modal
    }

    pub fn open_create(&mut self) {
        self.create_modal.open_create();
    }

    pub fn close_create(&mut self) {
        self.create_modal.close();
    }

    /// Open the edit modal for a listed category. Returns `false` for an
    /// unknown id.
    pub fn open_edit(&mut self, id: CategoryId) -> bool {
        let Some(category) = self.find(id).cloned() else {
            return false;
        };
        self.edit_modal.open_edit(&category);
        self.selected = Some(category);
        true
    }

    pub fn close_edit(&mut self) {
        self.edit_modal.close();
        self.selected = None;
    }

    /// Submit the create modal; a saved category goes to the front.
    pub async fn submit_create(&mut self, api: &dyn CategoryApi) -> SubmitOutcome {
        let outcome = self.create_modal.submit(api, |_| {}).await;
        if let SubmitOutcome::Saved(category) = &outcome {
            self.categories.insert(0, category.clone());
        }
        outcome
    }

    /// Submit the edit modal; a saved category replaces its row in place.
    pub async fn submit_edit(&mut self, api: &dyn CategoryApi) -> SubmitOutcome {
        let outcome = self.edit_modal.submit(api, |_| {}).await;
        if let SubmitOutcome::Saved(category) = &outcome {
            if let Some(slot) = self.categories.iter_mut().find(|c| c.id == category.id) {
                *slot = category.clone();
            }
            self.selected = None;
        }
        outcome
    }

    /// Confirm, then delete `id`.
    ///
    /// The row is removed only after the server confirms. A refusal is
    /// reported through an error flash.
    pub async fn delete<C>(
        &mut self,
        api: &dyn CategoryApi,
        id: CategoryId,
        confirm: &mut C,
    ) -> DeleteOutcome
    where
        C: Confirm + ?Sized,
    {
        if !confirm.confirm(DELETE_CONFIRMATION) {
            return DeleteOutcome::Cancelled;
        }

        match api.delete(id).await {
            Ok(response) => {
                self.categories.retain(|c| c.id != id);
                self.flash = Some(Flash::success(response.message));
                DeleteOutcome::Deleted
            }
            Err(e) => {
                let message = e.server_message().unwrap_or(DELETE_FAILED).to_string();
                if e.is_transport() {
                    tracing::error!(error = %e, category_id = %id, "Failed to delete category");
                } else {
                    tracing::warn!(error = %e, category_id = %id, "Category delete refused");
                }
                self.flash = Some(Flash::error(message.clone()));
                DeleteOutcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use catalog_core::FlashKind;

    use super::*;
    use crate::{
        error::ClientError,
        test_support::{ScriptedApi, category},
    };

    fn page(names: &[(i32, &str)]) -> CategoryPage {
        CategoryPage::from_page(CategoriesPage {
            categories: names.iter().map(|&(id, name)| category(id, name)).collect(),
            csrf_token: "tok".to_string(),
            flash: None,
        })
    }

    fn ids(page: &CategoryPage) -> Vec<i32> {
        page.categories().iter().map(|c| c.id.as_i32()).collect()
    }

    #[tokio::test]
    async fn test_create_inserts_at_front() {
        let api = ScriptedApi::default();
        api.push_save(Ok(category(3, "Toys")));

        let mut page = page(&[(1, "Books"), (2, "Food")]);
        page.open_create();
        page.create_modal_mut().set_name("Toys");

        let outcome = page.submit_create(&api).await;

        assert!(matches!(outcome, SubmitOutcome::Saved(_)));
        assert_eq!(ids(&page), vec![3, 1, 2]);
        assert!(!page.create_modal().is_open());
    }

    #[tokio::test]
    async fn test_edit_replaces_in_place_and_clears_selection() {
        let api = ScriptedApi::default();
        api.push_save(Ok(category(2, "Groceries")));

        let mut page = page(&[(1, "Books"), (2, "Food"), (3, "Toys")]);
        assert!(page.open_edit(CategoryId::new(2)));
        assert_eq!(page.selected().unwrap().name.as_str(), "Food");
        page.edit_modal_mut().set_name("Groceries");

        page.submit_edit(&api).await;

        assert_eq!(ids(&page), vec![1, 2, 3]);
        assert_eq!(
            page.find(CategoryId::new(2)).unwrap().name.as_str(),
            "Groceries"
        );
        assert!(page.selected().is_none());
    }

    #[test]
    fn test_open_edit_unknown_id() {
        let mut page = page(&[(1, "Books")]);
        assert!(!page.open_edit(CategoryId::new(99)));
        assert!(page.selected().is_none());
        assert!(!page.edit_modal().is_open());
    }

    #[test]
    fn test_close_edit_clears_selection() {
        let mut page = page(&[(1, "Books")]);
        page.open_edit(CategoryId::new(1));
        page.close_edit();

        assert!(page.selected().is_none());
        assert!(!page.edit_modal().is_open());
    }

    #[tokio::test]
    async fn test_edit_blank_name_rejected_locally() {
        let api = ScriptedApi::default();
        let mut page = page(&[(1, "Books")]);
        page.open_edit(CategoryId::new(1));
        page.edit_modal_mut().set_name("");

        let outcome = page.submit_edit(&api).await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(api.calls(), 0);
        assert!(page.selected().is_some());
    }

    #[tokio::test]
    async fn test_delete_cancelled_sends_nothing() {
        let api = ScriptedApi::default();
        let mut page = page(&[(1, "Books")]);
        let mut asked = String::new();

        let outcome = page
            .delete(&api, CategoryId::new(1), &mut |message: &str| {
                asked = message.to_string();
                false
            })
            .await;

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(asked, DELETE_CONFIRMATION);
        assert_eq!(api.calls(), 0);
        assert_eq!(ids(&page), vec![1]);
    }

    #[tokio::test]
    async fn test_delete_success_removes_row() {
        let api = ScriptedApi::default();
        api.push_delete(Ok("Category deleted successfully!"));

        let mut page = page(&[(1, "Books"), (2, "Food")]);
        let outcome = page
            .delete(&api, CategoryId::new(1), &mut |_: &str| true)
            .await;

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(ids(&page), vec![2]);
        assert_eq!(api.last_delete_id(), Some(CategoryId::new(1)));
        assert_eq!(page.flash().unwrap().kind, FlashKind::Success);
    }

    #[tokio::test]
    async fn test_delete_conflict_keeps_row() {
        let message = "Cannot delete the category because it has associated products.";
        let api = ScriptedApi::default();
        api.push_delete(Err(ClientError::Conflict(message.to_string())));

        let mut page = page(&[(1, "Books"), (2, "Food")]);
        let outcome = page
            .delete(&api, CategoryId::new(2), &mut |_: &str| true)
            .await;

        assert_eq!(outcome, DeleteOutcome::Failed(message.to_string()));
        assert_eq!(ids(&page), vec![1, 2]);

        let flash = page.take_flash().unwrap();
        assert_eq!(flash.kind, FlashKind::Error);
        assert_eq!(flash.message, message);
        assert!(page.flash().is_none());
    }

    #[tokio::test]
    async fn test_delete_transport_failure_keeps_row() {
        let api = ScriptedApi::default();
        api.push_delete(Err(ClientError::UnexpectedStatus {
            status: 502,
            body: "bad gateway".to_string(),
        }));

        let mut page = page(&[(1, "Books")]);
        let outcome = page
            .delete(&api, CategoryId::new(1), &mut |_: &str| true)
            .await;

        assert_eq!(outcome, DeleteOutcome::Failed(DELETE_FAILED.to_string()));
        assert_eq!(ids(&page), vec![1]);
    }

    #[test]
    fn test_replace_all() {
        let mut page = page(&[(1, "Books")]);
        page.replace_all(vec![category(5, "Toys"), category(6, "Food")]);
        assert_eq!(ids(&page), vec![5, 6]);
    }
}
