//! Interaction protocol between the user and the todo collection
//!
//! The session is the rendering-free counterpart of the single-page UI: it
//! owns the collection store, the latest analytics snapshot, the create-form
//! draft, and the per-item edit state machine. Every mutating action awaits
//! its gateway call and then performs an unconditional full refresh of the
//! collection and the analytics, sequentially. There is no optimistic
//! update: the server response observed on refresh is the truth.
//!
//! Failure policy: network and status failures are logged and swallowed
//! here, leaving the prior local state untouched. Since every action takes
//! `&mut self`, refreshes are serialized per session and a stale refresh can
//! never overwrite a newer one.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::gateway::Gateway;
use crate::model::{midnight_utc, AnalyticsSummary, Category, Priority, TodoDraft, TodoId, TodoItem};
use crate::store::{CollectionStore, FilterCriteria};

/// Editable copy of an item's fields, with the expiry normalized to a plain
/// calendar date for the form
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: Category,
    pub expiry_date: Option<NaiveDate>,
}

impl EditDraft {
    fn seed(item: &TodoItem) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone().unwrap_or_default(),
            priority: item.priority,
            category: item.category,
            expiry_date: item.expiry_date.map(|dt| dt.date_naive()),
        }
    }

    /// Merge the edited fields over the original item, re-serializing the
    /// expiry to absolute-timestamp form (or null when cleared)
    fn apply_to(&self, original: &TodoItem) -> TodoItem {
        let description = self.description.trim();
        TodoItem {
            id: original.id,
            title: self.title.clone(),
            description: (!description.is_empty()).then(|| description.to_string()),
            priority: self.priority,
            category: self.category,
            expiry_date: self.expiry_date.map(midnight_utc),
            is_completed: original.is_completed,
            created_at: original.created_at,
            updated_at: original.updated_at,
        }
    }
}

/// Per-item edit state machine: at most one item is being edited at a time
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Mode {
    #[default]
    Viewing,
    Editing { id: TodoId, draft: EditDraft },
}

/// Drives the todo UI state against a [`Gateway`]
#[derive(Debug)]
pub struct Session<G> {
    gateway: G,
    store: CollectionStore,
    analytics: Option<AnalyticsSummary>,
    draft: TodoDraft,
    form_visible: bool,
    mode: Mode,
}

impl<G: Gateway> Session<G> {
    /// Create a session with an empty collection; call [`Session::refresh`]
    /// to load the initial server state
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            store: CollectionStore::new(),
            analytics: None,
            draft: TodoDraft::default(),
            form_visible: false,
            mode: Mode::Viewing,
        }
    }

    /// Re-fetch the collection and the analytics, sequentially
    ///
    /// Either fetch may fail independently; the corresponding local state is
    /// then left stale-but-consistent.
    pub async fn refresh(&mut self) {
        match self.gateway.list_all().await {
            Ok(items) => self.store.replace_all(items),
            Err(err) => warn!(error = %err, "failed to refresh todo collection"),
        }
        match self.gateway.fetch_analytics().await {
            Ok(summary) => self.analytics = Some(summary),
            Err(err) => warn!(error = %err, "failed to refresh analytics"),
        }
    }

    // ----- read accessors -----

    /// The collection store (full collection, filter, visible subset)
    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    /// The visible subset, in server order
    pub fn visible(&self) -> &[TodoItem] {
        self.store.visible()
    }

    /// The latest analytics snapshot, if one has been fetched
    pub fn analytics(&self) -> Option<&AnalyticsSummary> {
        self.analytics.as_ref()
    }

    /// Current edit state
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    // ----- filtering (local only, no network) -----

    /// Constrain the visible subset
    pub fn set_filter(&mut self, criteria: FilterCriteria) {
        self.store.set_filter(criteria);
    }

    /// Drop all filter constraints
    pub fn clear_filter(&mut self) {
        self.store.clear_filter();
    }

    // ----- create flow -----

    /// Show the create form
    pub fn open_form(&mut self) {
        self.form_visible = true;
    }

    /// Hide the create form, keeping the draft
    pub fn dismiss_form(&mut self) {
        self.form_visible = false;
    }

    /// Whether the create form is showing
    pub fn form_visible(&self) -> bool {
        self.form_visible
    }

    /// The create-form draft
    pub fn draft(&self) -> &TodoDraft {
        &self.draft
    }

    /// Mutable access to the create-form draft, for field edits
    pub fn draft_mut(&mut self) -> &mut TodoDraft {
        &mut self.draft
    }

    /// Submit the draft
    ///
    /// A blank title makes this a local no-op: no request is issued and the
    /// draft is kept. On acceptance the draft is sent, reset to defaults,
    /// and the form hidden; the follow-up refresh shows the created item.
    pub async fn submit_draft(&mut self) {
        if self.draft.validate().is_err() {
            debug!("ignoring submit of draft with blank title");
            return;
        }

        match self.gateway.create(&self.draft).await {
            Ok(()) => {
                self.draft = TodoDraft::default();
                self.form_visible = false;
            }
            Err(err) => warn!(error = %err, "failed to create todo"),
        }
        self.refresh().await;
    }

    // ----- edit flow -----

    /// Enter editing on `id`, seeding the draft from the item's current
    /// fields; a no-op when the item is not in the collection
    pub fn begin_edit(&mut self, id: TodoId) {
        match self.store.get(id) {
            Some(item) => {
                self.mode = Mode::Editing {
                    id,
                    draft: EditDraft::seed(item),
                };
            }
            None => debug!(%id, "cannot edit unknown todo"),
        }
    }

    /// Mutable access to the edit draft while editing
    pub fn edit_draft_mut(&mut self) -> Option<&mut EditDraft> {
        match &mut self.mode {
            Mode::Editing { draft, .. } => Some(draft),
            Mode::Viewing => None,
        }
    }

    /// Save the edit: merges the draft over the original item, issues the
    /// update, and refreshes
    ///
    /// The session returns to viewing immediately on submit, regardless of
    /// the network outcome.
    pub async fn save_edit(&mut self) {
        let Mode::Editing { id, draft } = std::mem::take(&mut self.mode) else {
            return;
        };
        let Some(original) = self.store.get(id).cloned() else {
            warn!(%id, "item disappeared before the edit could be saved");
            self.refresh().await;
            return;
        };

        let merged = draft.apply_to(&original);
        if let Err(err) = self.gateway.update(id, &merged).await {
            warn!(error = %err, %id, "failed to update todo");
        }
        self.refresh().await;
    }

    /// Discard the edit; no network call
    pub fn cancel_edit(&mut self) {
        self.mode = Mode::Viewing;
    }

    // ----- single-item actions -----

    /// Flip an item's completion, dispatching on its current state
    pub async fn toggle_completion(&mut self, id: TodoId) {
        let Some(target) = self.store.get(id).map(|item| !item.is_completed) else {
            debug!(%id, "cannot toggle unknown todo");
            return;
        };

        if let Err(err) = self.gateway.set_completion(id, target).await {
            warn!(error = %err, %id, "failed to toggle todo completion");
        }
        self.refresh().await;
    }

    /// Delete a single item
    pub async fn delete(&mut self, id: TodoId) {
        if let Err(err) = self.gateway.remove(id).await {
            warn!(error = %err, %id, "failed to delete todo");
        }
        self.refresh().await;
    }

    // ----- bulk actions -----

    /// Mark every todo completed
    pub async fn mark_all_completed(&mut self) {
        if let Err(err) = self.gateway.mark_all_completed().await {
            warn!(error = %err, "failed to mark all todos completed");
        }
        self.refresh().await;
    }

    /// Mark every todo uncompleted
    pub async fn mark_all_uncompleted(&mut self) {
        if let Err(err) = self.gateway.mark_all_uncompleted().await {
            warn!(error = %err, "failed to mark all todos uncompleted");
        }
        self.refresh().await;
    }

    /// Delete the entire collection
    ///
    /// `confirmed` is the outcome of the explicit user confirmation step;
    /// a declined confirmation issues zero network calls.
    pub async fn delete_all(&mut self, confirmed: bool) {
        if !confirmed {
            debug!("delete-all declined by user");
            return;
        }

        if let Err(err) = self.gateway.delete_all().await {
            warn!(error = %err, "failed to delete all todos");
        }
        self.refresh().await;
    }
}
