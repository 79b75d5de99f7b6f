use serde::Deserialize;

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{
    CreateProject, DiscussionPost, JoinProject, ManageMember, MemberDecision, NewDiscussionPost,
    Project, ProjectMembership, UpdateProject,
};
use crate::util::segment;

#[derive(Deserialize)]
struct ProjectList {
    #[serde(default)]
    projects: Vec<Project>,
}

#[derive(Deserialize)]
struct MemberList {
    #[serde(default)]
    members: Vec<ProjectMembership>,
}

#[derive(Deserialize)]
struct PostList {
    #[serde(default)]
    posts: Vec<DiscussionPost>,
}

#[derive(Debug, Clone)]
pub struct ProjectService {
    api: ApiClient,
}

impl ProjectService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Project>> {
        let list: ProjectList = self.api.get("/projects").await?;
        Ok(list.projects)
    }

    pub async fn get(&self, id: &str) -> Result<Project> {
        self.api.get(&format!("/projects/{}", segment(id))).await
    }

    pub async fn create(&self, input: &CreateProject) -> Result<Project> {
        self.api.post("/projects", input).await
    }

    pub async fn update(&self, id: &str, input: &UpdateProject) -> Result<Project> {
        self.api
            .put(&format!("/projects/{}", segment(id)), input)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.api.delete(&format!("/projects/{}", segment(id))).await
    }

    pub async fn join(&self, project_id: &str, message: Option<&str>) -> Result<ProjectMembership> {
        self.api
            .post(
                &format!("/projects/{}/join", segment(project_id)),
                &JoinProject { message },
            )
            .await
    }

    pub async fn members(&self, project_id: &str) -> Result<Vec<ProjectMembership>> {
        let list: MemberList = self
            .api
            .get(&format!("/projects/{}/members", segment(project_id)))
            .await?;
        Ok(list.members)
    }

    pub async fn manage_member(
        &self,
        project_id: &str,
        membership_id: &str,
        decision: MemberDecision,
    ) -> Result<ProjectMembership> {
        self.api
            .put(
                &format!(
                    "/projects/{}/members/{}",
                    segment(project_id),
                    segment(membership_id)
                ),
                &ManageMember { action: decision },
            )
            .await
    }

    pub async fn discussion_posts(&self, project_id: &str) -> Result<Vec<DiscussionPost>> {
        let list: PostList = self
            .api
            .get(&format!("/projects/{}/discussions", segment(project_id)))
            .await?;
        Ok(list.posts)
    }

    pub async fn create_discussion_post(
        &self,
        project_id: &str,
        post: &NewDiscussionPost,
    ) -> Result<DiscussionPost> {
        self.api
            .post(
                &format!("/projects/{}/discussions", segment(project_id)),
                post,
            )
            .await
    }
}
