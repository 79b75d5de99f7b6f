use serde::Deserialize;

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::Organization;

#[derive(Deserialize)]
struct OrganizationList {
    #[serde(default)]
    organizations: Vec<Organization>,
}

#[derive(Debug, Clone)]
pub struct OrganizationService {
    api: ApiClient,
}

impl OrganizationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Organization>> {
        let list: OrganizationList = self.api.get("/organizations").await?;
        Ok(list.organizations)
    }
}
