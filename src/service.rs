use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::{
    codegen::{generate_code, DEFAULT_CODE_LENGTH},
    db::{models::Link, LinkStore, StoreError},
    error::LinkError,
    types::FieldIssue,
    utils::{valid_short_code, valid_url},
};

/// Business operations on links, backed by an injected [`LinkStore`].
#[derive(Clone)]
pub struct LinkService {
    store: Arc<dyn LinkStore>,
}

impl LinkService {
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self { store }
    }

    /// Creates a link under `code`, or under a generated code when none is
    /// given.
    ///
    /// The lookup before the insert only short-circuits the common conflict;
    /// the table's unique constraint is what actually rejects a duplicate.
    pub async fn create(&self, url: &str, code: Option<&str>) -> Result<Link, LinkError> {
        let mut issues = Vec::new();
        if !valid_url(url) {
            issues.push(FieldIssue::new("url", "Invalid url"));
        }
        if let Some(code) = code {
            if !valid_short_code(code) {
                issues.push(FieldIssue::new(
                    "code",
                    "Code must be 6-8 alphanumeric characters",
                ));
            }
        }
        if !issues.is_empty() {
            debug!(?issues, "Rejected create request");
            return Err(LinkError::Validation(issues));
        }

        let code = match code {
            Some(code) => code.to_string(),
            None => generate_code(DEFAULT_CODE_LENGTH),
        };

        if self.store.find_unique(&code).await?.is_some() {
            info!(code = %code, "Code already in use");
            return Err(LinkError::CodeConflict(code));
        }

        match self.store.create(&code, url, Utc::now()).await {
            Ok(link) => {
                info!(code = %link.code, url = %link.original_url, "Created link");
                Ok(link)
            }
            Err(StoreError::UniqueViolation) => {
                info!(code = %code, "Code taken by a concurrent create");
                Err(LinkError::CodeConflict(code))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list(&self) -> Result<Vec<Link>, LinkError> {
        let links = self.store.find_many().await?;
        debug!(count = links.len(), "Listed links");
        Ok(links)
    }

    pub async fn get_by_code(&self, code: &str) -> Result<Link, LinkError> {
        self.store
            .find_unique(code)
            .await?
            .ok_or_else(|| LinkError::NotFound(code.to_string()))
    }

    pub async fn delete(&self, code: &str) -> Result<(), LinkError> {
        if self.store.delete(code).await? {
            info!(code = %code, "Deleted link");
            Ok(())
        } else {
            Err(LinkError::NotFound(code.to_string()))
        }
    }

    /// Counts a visit and returns where to send the visitor.
    pub async fn record_click_and_resolve(&self, code: &str) -> Result<String, LinkError> {
        match self.store.record_click(code, Utc::now()).await? {
            Some(url) => {
                info!(code = %code, url = %url, "Redirecting");
                Ok(url)
            }
            None => Err(LinkError::NotFound(code.to_string())),
        }
    }
}
