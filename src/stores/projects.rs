//! Project list cache, membership cache and the filtered view over them.

use std::cmp::Reverse;

use crate::error::Result;
use crate::models::{
    CreateProject, MemberDecision, MembershipStatus, Project, ProjectFilters, ProjectMembership,
    ProjectStatus, UpdateProject,
};
use crate::services::ProjectService;
use crate::util::{parse_timestamp, sorted_tags};

#[derive(Debug)]
pub struct ProjectStore {
    service: ProjectService,
    projects: Vec<Project>,
    current_project_members: Vec<ProjectMembership>,
    is_loading: bool,
    pub filters: ProjectFilters,
}

impl ProjectStore {
    pub fn new(service: ProjectService) -> Self {
        Self {
            service,
            projects: Vec::new(),
            current_project_members: Vec::new(),
            // Nothing has been fetched yet, so views start in the loading state.
            is_loading: true,
            filters: ProjectFilters::default(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Every cached project, unfiltered, in fetch order.
    pub fn all(&self) -> &[Project] {
        &self.projects
    }

    pub fn current_project_members(&self) -> &[ProjectMembership] {
        &self.current_project_members
    }

    /// Filtered, newest-first view of the cache. Recomputed on every call.
    pub fn projects(&self) -> Vec<Project> {
        filter_projects(&self.projects, &self.filters)
    }

    pub fn project_by_id(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn accepted_members(&self) -> Vec<&ProjectMembership> {
        self.members_with_status(MembershipStatus::Accepted)
    }

    pub fn pending_members(&self) -> Vec<&ProjectMembership> {
        self.members_with_status(MembershipStatus::Pending)
    }

    fn members_with_status(&self, status: MembershipStatus) -> Vec<&ProjectMembership> {
        self.current_project_members
            .iter()
            .filter(|m| m.status == status)
            .collect()
    }

    pub fn set_search_bar_filter(&mut self, search_bar: impl Into<String>) {
        self.filters.search_bar = search_bar.into();
    }

    pub fn set_category_filter(&mut self, category: Option<String>) {
        self.filters.category = category;
    }

    pub fn set_status_filter(&mut self, status: Option<ProjectStatus>) {
        self.filters.status = status;
    }

    pub fn clear_filters(&mut self) {
        self.filters = ProjectFilters::default();
    }

    /// Replace the cache with a fresh full fetch. On failure the cache is left
    /// empty and the error is returned.
    pub async fn fetch(&mut self) -> Result<()> {
        self.projects.clear();
        self.is_loading = true;

        let result = self.service.list().await;
        self.is_loading = false;

        match result {
            Ok(projects) => {
                self.projects = projects
                    .into_iter()
                    .map(|mut p| {
                        p.tags = sorted_tags(&p.tags);
                        p
                    })
                    .collect();
                tracing::debug!(count = self.projects.len(), "Fetched projects");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error fetching projects: {}", e);
                Err(e)
            }
        }
    }

    /// Fetch a single project and upsert it into the cache.
    pub async fn fetch_project(&mut self, id: &str) -> Result<Project> {
        let mut project = self.service.get(id).await.inspect_err(|e| {
            tracing::error!(project_id = %id, "Error fetching project: {}", e);
        })?;
        project.tags = sorted_tags(&project.tags);

        match self.projects.iter().position(|p| p.id == project.id) {
            Some(index) => self.projects[index] = project.clone(),
            None => self.projects.push(project.clone()),
        }
        Ok(project)
    }

    pub async fn fetch_members(&mut self, project_id: &str) -> Result<()> {
        match self.service.members(project_id).await {
            Ok(members) => {
                self.current_project_members = members;
                Ok(())
            }
            Err(e) => {
                tracing::error!(project_id, "Error fetching members: {}", e);
                Err(e)
            }
        }
    }

    pub async fn create(&mut self, input: &CreateProject) -> Result<Project> {
        let created = self.service.create(input).await?;
        tracing::info!(project_id = %created.id, "Project created");
        self.projects.push(created.clone());
        Ok(created)
    }

    pub async fn update(&mut self, id: &str, input: &UpdateProject) -> Result<Project> {
        let updated = self.service.update(id, input).await?;
        if let Some(index) = self.projects.iter().position(|p| p.id == id) {
            self.projects[index] = updated.clone();
        }
        Ok(updated)
    }

    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.service.delete(id).await?;
        if let Some(index) = self.projects.iter().position(|p| p.id == id) {
            self.projects.remove(index);
        }
        tracing::info!(project_id = %id, "Project deleted");
        Ok(())
    }

    pub async fn join(&self, project_id: &str, message: Option<&str>) -> Result<ProjectMembership> {
        self.service.join(project_id, message).await
    }

    pub async fn manage_member(
        &mut self,
        project_id: &str,
        membership_id: &str,
        decision: MemberDecision,
    ) -> Result<ProjectMembership> {
        let result = self
            .service
            .manage_member(project_id, membership_id, decision)
            .await?;
        if let Some(index) = self
            .current_project_members
            .iter()
            .position(|m| m.id == membership_id)
        {
            self.current_project_members[index] = result.clone();
        }
        Ok(result)
    }
}

/// Apply search, category and status filters, then order newest first.
///
/// The sort is stable, so projects with equal timestamps keep their relative
/// order. Projects whose timestamp cannot be parsed go last.
pub fn filter_projects(projects: &[Project], filters: &ProjectFilters) -> Vec<Project> {
    let search = filters.search_bar.to_uppercase();

    let mut result: Vec<Project> = projects
        .iter()
        .filter(|p| {
            search.is_empty()
                || p.title.to_uppercase().contains(&search)
                || p.description.to_uppercase().contains(&search)
        })
        .filter(|p| match &filters.category {
            Some(category) => p.category.as_deref() == Some(category.as_str()),
            None => true,
        })
        .filter(|p| filters.status.is_none_or(|status| p.status == status))
        .cloned()
        .collect();

    result.sort_by_key(|p| Reverse(parse_timestamp(&p.created_at)));
    result
}
