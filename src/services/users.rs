use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{UpdateUser, User};
use crate::util::segment;

#[derive(Debug, Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get(&self, id: &str) -> Result<User> {
        self.api.get(&format!("/users/{}", segment(id))).await
    }

    pub async fn update(&self, id: &str, input: &UpdateUser) -> Result<()> {
        self.api
            .put_no_content(&format!("/users/{}", segment(id)), input)
            .await
    }
}
