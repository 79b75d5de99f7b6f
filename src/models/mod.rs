mod discussion;
mod membership;
mod organization;
mod project;
mod user;

pub use discussion::*;
pub use membership::*;
pub use organization::*;
pub use project::*;
pub use user::*;

pub(crate) use membership::{JoinProject, ManageMember};
