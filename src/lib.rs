//! Semillas - client for the open experimental seed network
//!
//! Typed access to the project-matching REST API, Firebase sign-in, and the
//! client-side stores (projects, users, forum, toasts, cookie consent) that a
//! front end drives.
//!
//! ```rust,no_run
//! use semillas::{AppContext, Config};
//!
//! # async fn run() -> semillas::Result<()> {
//! let config = Config::from_env();
//! let mut ctx = AppContext::from_config(&config)?;
//!
//! ctx.users.restore_session().await?;
//! ctx.projects.fetch().await?;
//! ctx.projects.set_search_bar_filter("tomate");
//! for project in ctx.projects.projects() {
//!     println!("{} [{}]", project.title, project.status.label());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod navigation;
pub mod services;
pub mod storage;
pub mod stores;
pub mod util;

pub use api::ApiClient;
pub use config::Config;
pub use error::{ClientError, Result};
pub use stores::AppContext;
