use crate::domain::model::{Department, DepartmentDraft, Institute, NewInstitute};
use crate::domain::ports::RecordStore;
use crate::utils::error::{RegistryError, Result};
use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response};

/// Client for a hosted REST record store exposing `/institutes` and
/// `/departments` collections. The store assigns identifiers and enforces
/// referential integrity.
#[derive(Debug, Clone)]
pub struct RestDirectory {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl RestDirectory {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder
                .header("apikey", key)
                .header(header::AUTHORIZATION, format!("Bearer {key}")),
            None => builder,
        }
    }
}

/// How a non-2xx from the store is classified. Only institute creation
/// treats a 4xx as the store rejecting the write (constraint violation,
/// a client fault); everywhere else any failure is a persistence fault.
#[derive(Clone, Copy)]
enum OnClientError {
    Validation,
    Persistence,
}

async fn checked(
    response: Response,
    context: &str,
    on_client_error: OnClientError,
) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    match on_client_error {
        OnClientError::Validation if status.is_client_error() => {
            Err(RegistryError::validation(format!(
                "{context} rejected by record store ({status}): {body}"
            )))
        }
        _ => Err(RegistryError::persistence(format!(
            "{context} failed ({status}): {body}"
        ))),
    }
}

#[async_trait]
impl RecordStore for RestDirectory {
    async fn create_institute(&self, new: &NewInstitute) -> Result<Institute> {
        let response = self
            .authorized(self.client.post(self.url("/institutes")))
            .json(new)
            .send()
            .await
            .map_err(|e| RegistryError::persistence(format!("create institute: {e}")))?;

        checked(response, "create institute", OnClientError::Validation)
            .await?
            .json::<Institute>()
            .await
            .map_err(|e| RegistryError::persistence(format!("create institute response: {e}")))
    }

    async fn list_institutes(&self) -> Result<Vec<Institute>> {
        let response = self
            .authorized(self.client.get(self.url("/institutes")))
            .send()
            .await
            .map_err(|e| RegistryError::persistence(format!("list institutes: {e}")))?;

        checked(response, "list institutes", OnClientError::Persistence)
            .await?
            .json::<Vec<Institute>>()
            .await
            .map_err(|e| RegistryError::persistence(format!("list institutes response: {e}")))
    }

    async fn list_departments(&self, institute_id: &str) -> Result<Vec<Department>> {
        let response = self
            .authorized(self.client.get(self.url("/departments")))
            .query(&[("institute_id", institute_id)])
            .send()
            .await
            .map_err(|e| RegistryError::persistence(format!("list departments: {e}")))?;

        checked(response, "list departments", OnClientError::Persistence)
            .await?
            .json::<Vec<Department>>()
            .await
            .map_err(|e| RegistryError::persistence(format!("list departments response: {e}")))
    }

    async fn insert_departments(&self, drafts: &[DepartmentDraft]) -> Result<()> {
        let response = self
            .authorized(self.client.post(self.url("/departments")))
            .json(drafts)
            .send()
            .await
            .map_err(|e| RegistryError::persistence(format!("insert departments: {e}")))?;

        checked(response, "insert departments", OnClientError::Persistence).await?;
        Ok(())
    }
}
