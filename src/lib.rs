//! Todo Manager Rust Client
//!
//! A Rust client for the Todo Manager HTTP API: typed access to the CRUD,
//! bulk, and analytics endpoints, plus the client-side state that a UI needs
//! on top of them — a collection store with category/priority filtering and
//! a rendering-free interaction session (create form, per-item editing,
//! completion toggling, bulk actions).
//!
//! The session follows the fire-and-refresh contract of the original UI:
//! every mutation is followed by a full re-fetch of the collection and the
//! analytics, and gateway failures leave local state stale but consistent.

pub mod config;
pub mod error;
pub mod fetch;
pub mod gateway;
pub mod model;
pub mod session;
pub mod store;

use crate::config::ClientOptions;
use crate::error::Result;
use crate::gateway::HttpGateway;
use crate::session::Session;

/// The main entry point for the Todo Manager client
///
/// Wires an [`HttpGateway`] against the given base endpoint into a
/// [`Session`].
///
/// # Example
///
/// ```no_run
/// use todo_manager_rust::TodoApp;
///
/// # async fn run() -> todo_manager_rust::error::Result<()> {
/// let mut app = TodoApp::new("http://localhost:8080/todos")?;
/// app.session_mut().refresh().await;
/// for todo in app.session().visible() {
///     println!("{}", todo.title);
/// }
/// # Ok(())
/// # }
/// ```
pub struct TodoApp {
    session: Session<HttpGateway>,
}

impl TodoApp {
    /// Create a client against the given base endpoint, e.g.
    /// `http://localhost:8080/todos`
    pub fn new(base_url: &str) -> Result<Self> {
        Self::new_with_options(base_url, ClientOptions::default())
    }

    /// Create a client with custom options
    pub fn new_with_options(base_url: &str, options: ClientOptions) -> Result<Self> {
        let gateway = HttpGateway::new_with_options(base_url, options)?;
        Ok(Self {
            session: Session::new(gateway),
        })
    }

    /// Read access to the session state
    pub fn session(&self) -> &Session<HttpGateway> {
        &self.session
    }

    /// Mutable access to the session, through which all user actions flow
    pub fn session_mut(&mut self) -> &mut Session<HttpGateway> {
        &mut self.session
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::error::{Error, Result};
    pub use crate::gateway::{Gateway, HttpGateway};
    pub use crate::model::{
        AnalyticsSummary, Category, ItemStatus, Priority, TodoDraft, TodoId, TodoItem,
    };
    pub use crate::session::{Mode, Session};
    pub use crate::store::{CollectionStore, FilterCriteria};
    pub use crate::TodoApp;
}
