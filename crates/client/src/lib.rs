//! Catalog Client - Category page controller and form modal.
//!
//! The client side of the category endpoints:
//! - [`api`] - The [`CategoryApi`] seam and its HTTP implementation
//! - [`form`] - Create/edit form modal with local name validation
//! - [`page`] - The page's category list, modals and delete flow
//!
//! Local state only changes after the server answers. Transport failures are
//! logged with `tracing` and leave state as it was.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod error;
pub mod form;
pub mod page;

pub use api::{CategoryApi, HttpCategoryApi};
pub use error::ClientError;
pub use form::{CategoryForm, FormData, FormMode, SubmitOutcome};
pub use page::{CategoryPage, Confirm, DeleteOutcome};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_support {
    use std::{collections::VecDeque, sync::Mutex};

    use async_trait::async_trait;
    use catalog_core::{
        Category, CategoryId, CategoryInput, CategoryName, CategoryResponse, MessageResponse, Slug,
    };
    use chrono::{TimeZone, Utc};

    use crate::{api::CategoryApi, error::ClientError};

    pub fn category(id: i32, name: &str) -> Category {
        let name = CategoryName::parse(name).unwrap();
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        Category {
            id: CategoryId::new(id),
            slug: Slug::from_name(&name),
            name,
            description: None,
            is_active: true,
            products_count: 0,
            created_at: at,
            updated_at: at,
        }
    }

    /// Replays queued responses and records what was sent.
    #[derive(Default)]
    pub struct ScriptedApi {
        saves: Mutex<VecDeque<Result<Category, ClientError>>>,
        deletes: Mutex<VecDeque<Result<String, ClientError>>>,
        inputs: Mutex<Vec<CategoryInput>>,
        update_ids: Mutex<Vec<CategoryId>>,
        delete_ids: Mutex<Vec<CategoryId>>,
    }

    impl ScriptedApi {
        pub fn push_save(&self, result: Result<Category, ClientError>) {
            self.saves.lock().unwrap().push_back(result);
        }

        pub fn push_delete(&self, result: Result<&str, ClientError>) {
            self.deletes
                .lock()
                .unwrap()
                .push_back(result.map(str::to_string));
        }

        pub fn calls(&self) -> usize {
            self.inputs.lock().unwrap().len() + self.delete_ids.lock().unwrap().len()
        }

        pub fn last_input(&self) -> Option<CategoryInput> {
            self.inputs.lock().unwrap().last().cloned()
        }

        pub fn last_update_id(&self) -> Option<CategoryId> {
            self.update_ids.lock().unwrap().last().copied()
        }

        pub fn last_delete_id(&self) -> Option<CategoryId> {
            self.delete_ids.lock().unwrap().last().copied()
        }

        fn next_save(&self) -> Result<CategoryResponse, ClientError> {
            self.saves
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted save response")
                .map(|category| CategoryResponse {
                    message: "ok".to_string(),
                    category,
                })
        }
    }

    #[async_trait]
    impl CategoryApi for ScriptedApi {
        async fn create(&self, input: &CategoryInput) -> Result<CategoryResponse, ClientError> {
            self.inputs.lock().unwrap().push(input.clone());
            self.next_save()
        }

        async fn update(
            &self,
            id: CategoryId,
            input: &CategoryInput,
        ) -> Result<CategoryResponse, ClientError> {
            self.inputs.lock().unwrap().push(input.clone());
            self.update_ids.lock().unwrap().push(id);
            self.next_save()
        }

        async fn delete(&self, id: CategoryId) -> Result<MessageResponse, ClientError> {
            self.delete_ids.lock().unwrap().push(id);
            self.deletes
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted delete response")
                .map(|message| MessageResponse { message })
        }
    }
}
