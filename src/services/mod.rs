//! Thin typed wrappers over the REST endpoints. One method per endpoint.

mod organizations;
mod projects;
mod users;

pub use organizations::OrganizationService;
pub use projects::ProjectService;
pub use users::UserService;
