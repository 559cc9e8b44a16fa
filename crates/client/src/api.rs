//! HTTP access to the category endpoints.

use async_trait::async_trait;
use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;
use url::Url;

use catalog_core::{
    ActiveCategory, CategoriesPage, CategoryId, CategoryInput, CategoryResponse, MessageResponse,
    ValidationErrorResponse,
};

use crate::error::ClientError;

/// Header carrying the session's CSRF token.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Header marking requests as scripted.
pub const REQUESTED_WITH_HEADER: &str = "x-requested-with";

/// Longest response body kept in [`ClientError::UnexpectedStatus`].
const MAX_ERROR_BODY: usize = 512;

/// Mutating category operations used by the page controller and form modal.
#[async_trait]
pub trait CategoryApi: Send + Sync {
    /// `POST /categories`.
    async fn create(&self, input: &CategoryInput) -> Result<CategoryResponse, ClientError>;

    /// `PUT /categories/{id}`.
    async fn update(
        &self,
        id: CategoryId,
        input: &CategoryInput,
    ) -> Result<CategoryResponse, ClientError>;

    /// `DELETE /categories/{id}`.
    async fn delete(&self, id: CategoryId) -> Result<MessageResponse, ClientError>;
}

/// [`CategoryApi`] over HTTP with a cookie-backed session.
#[derive(Debug, Clone)]
pub struct HttpCategoryApi {
    client: Client,
    base_url: Url,
    csrf_token: String,
}

impl HttpCategoryApi {
    /// Open a session against `base_url` and load the category page payload.
    ///
    /// The session cookie and CSRF token from this first request are reused
    /// for every later call.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the URL is invalid or the page cannot be loaded.
    pub async fn connect(base_url: &str) -> Result<(Self, CategoriesPage), ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(REQUESTED_WITH_HEADER, HeaderValue::from_static("XMLHttpRequest"));

        let client = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .build()?;

        let mut api = Self {
            client,
            base_url: Url::parse(base_url)?,
            csrf_token: String::new(),
        };
        let page = api.load_page().await?;
        Ok((api, page))
    }

    /// Reload the page payload and pick up the current CSRF token.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    pub async fn load_page(&mut self) -> Result<CategoriesPage, ClientError> {
        let response = self.client.get(self.url("categories")?).send().await?;
        let page: CategoriesPage = decode(response).await?;
        self.csrf_token.clone_from(&page.csrf_token);
        Ok(page)
    }

    /// `GET /categories/active`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails.
    pub async fn list_active(&self) -> Result<Vec<ActiveCategory>, ClientError> {
        let response = self
            .client
            .get(self.url("categories/active")?)
            .send()
            .await?;
        decode(response).await
    }

    /// The CSRF token sent with mutations.
    #[must_use]
    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait]
impl CategoryApi for HttpCategoryApi {
    async fn create(&self, input: &CategoryInput) -> Result<CategoryResponse, ClientError> {
        let response = self
            .client
            .post(self.url("categories")?)
            .header(CSRF_HEADER, &self.csrf_token)
            .json(input)
            .send()
            .await?;
        decode(response).await
    }

    async fn update(
        &self,
        id: CategoryId,
        input: &CategoryInput,
    ) -> Result<CategoryResponse, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("categories/{id}"))?)
            .header(CSRF_HEADER, &self.csrf_token)
            .json(input)
            .send()
            .await?;
        decode(response).await
    }

    async fn delete(&self, id: CategoryId) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("categories/{id}"))?)
            .header(CSRF_HEADER, &self.csrf_token)
            .send()
            .await?;
        decode(response).await
    }
}

/// Map a response to its success body or a typed error.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    match status {
        StatusCode::UNPROCESSABLE_ENTITY => {
            let body: ValidationErrorResponse = response.json().await?;
            Err(ClientError::Validation(body.errors))
        }
        StatusCode::NOT_FOUND => Err(ClientError::NotFound(message_or(response, status).await)),
        StatusCode::CONFLICT => Err(ClientError::Conflict(message_or(response, status).await)),
        _ => {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|&i| body.is_char_boundary(i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// The `{message}` body, or the status reason when the body is not JSON.
async fn message_or(response: Response, status: StatusCode) -> String {
    response
        .json::<MessageResponse>()
        .await
        .map(|body| body.message)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("error").to_string())
}
