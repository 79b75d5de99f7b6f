use crate::error::Result;
use crate::models::{DiscussionPost, NewDiscussionPost};
use crate::services::ProjectService;

/// Discussion thread of one project.
#[derive(Debug)]
pub struct ForumStore {
    service: ProjectService,
    project_id: Option<String>,
    posts: Vec<DiscussionPost>,
}

impl ForumStore {
    pub fn new(service: ProjectService) -> Self {
        Self {
            service,
            project_id: None,
            posts: Vec::new(),
        }
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn posts(&self) -> &[DiscussionPost] {
        &self.posts
    }

    pub fn replies_to(&self, post_id: &str) -> Vec<&DiscussionPost> {
        self.posts
            .iter()
            .filter(|p| p.reply_to_post_id.as_deref() == Some(post_id))
            .collect()
    }

    pub async fn fetch(&mut self, project_id: &str) -> Result<()> {
        match self.service.discussion_posts(project_id).await {
            Ok(posts) => {
                self.project_id = Some(project_id.to_string());
                self.posts = posts;
                Ok(())
            }
            Err(e) => {
                tracing::error!(project_id, "Error fetching discussion posts: {}", e);
                Err(e)
            }
        }
    }

    /// Publish a post; it is appended locally when it belongs to the loaded thread.
    pub async fn post(&mut self, project_id: &str, post: &NewDiscussionPost) -> Result<DiscussionPost> {
        let created = self.service.create_discussion_post(project_id, post).await?;
        if self.project_id.as_deref() == Some(project_id) {
            self.posts.push(created.clone());
        }
        Ok(created)
    }
}
