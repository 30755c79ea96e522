//! The single owner of the in-memory catalogue.
//!
//! [`CatalogStore`] holds the current [`Collection`] and [`ViewState`] and is
//! the only thing allowed to replace them. Writes go out to the backend
//! first; only a confirmed write becomes a transition. If the backend fails,
//! the collection stays exactly as it was.

mod error;

pub use error::CatalogError;

use crate::backend::{BackendError, CatalogBackend};
use crate::catalog::{
    BookDraft, CatalogIntent, CatalogReducer, Collection, Record, RecordEdit, RecordId,
};
use crate::ui::mvi::Reducer;
use crate::ui::view::{project, Projection, SearchScope, ViewIntent, ViewReducer, ViewState};

pub struct CatalogStore {
    backend: Box<dyn CatalogBackend>,
    collection: Collection,
    view: ViewState,
    scope: SearchScope,
}

impl CatalogStore {
    /// An empty store. Call [`reload`](Self::reload) to pull the backend's copy.
    pub fn new(backend: Box<dyn CatalogBackend>, view: ViewState, scope: SearchScope) -> Self {
        Self::with_collection(backend, Collection::new(), view, scope)
    }

    /// A store that starts from a collection the caller already holds.
    pub fn with_collection(
        backend: Box<dyn CatalogBackend>,
        collection: Collection,
        view: ViewState,
        scope: SearchScope,
    ) -> Self {
        Self {
            backend,
            collection,
            view,
            scope,
        }
    }

    /// Create a store and load the backend's collection into it.
    pub async fn open(
        backend: Box<dyn CatalogBackend>,
        view: ViewState,
        scope: SearchScope,
    ) -> Result<Self, CatalogError> {
        let mut store = Self::new(backend, view, scope);
        store.reload().await?;
        Ok(store)
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn scope(&self) -> SearchScope {
        self.scope
    }

    pub fn set_scope(&mut self, scope: SearchScope) {
        self.scope = scope;
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Apply a transition in memory only and return the new collection.
    ///
    /// Use this for transitions a collaborator has already confirmed. For
    /// changes that still need persisting, use [`apply`](Self::apply).
    pub fn dispatch(&mut self, intent: CatalogIntent) -> &Collection {
        let kind = intent.kind();
        let current = std::mem::take(&mut self.collection);
        let before = current.len();
        self.collection = CatalogReducer::reduce(current, intent);
        tracing::debug!(
            intent = kind,
            before,
            after = self.collection.len(),
            "Applied catalogue transition"
        );
        &self.collection
    }

    /// Apply a transition and persist the result.
    ///
    /// The new collection replaces the current one only once the backend
    /// has saved it.
    pub async fn apply(&mut self, intent: CatalogIntent) -> Result<&Collection, CatalogError> {
        let kind = intent.kind();
        let next = CatalogReducer::reduce(self.collection.clone(), intent);
        self.backend
            .save(&next)
            .await
            .map_err(|e| self.backend_failure("save", e))?;
        tracing::debug!(
            intent = kind,
            before = self.collection.len(),
            after = next.len(),
            "Committed catalogue transition"
        );
        self.collection = next;
        Ok(&self.collection)
    }

    /// Replace the collection with the backend's copy.
    pub async fn reload(&mut self) -> Result<&Collection, CatalogError> {
        let records = self
            .backend
            .load()
            .await
            .map_err(|e| self.backend_failure("load", e))?;
        Ok(self.dispatch(CatalogIntent::Reset { records }))
    }

    /// Validate `draft`, have the backend assign an identifier, insert it.
    pub async fn add(&mut self, draft: BookDraft) -> Result<Record, CatalogError> {
        let draft = draft.validated()?;
        let record = self
            .backend
            .create(draft)
            .await
            .map_err(|e| self.backend_failure("create", e))?;

        let intent = if self.collection.contains(&record.id) {
            // The backend handed out an id we already hold; keep ids unique.
            tracing::warn!(id = %record.id, "Backend reused an existing id, replacing");
            CatalogIntent::Replace {
                record: record.clone(),
            }
        } else {
            CatalogIntent::Insert {
                record: record.clone(),
            }
        };
        self.apply(intent).await?;
        Ok(record)
    }

    /// Apply a pending edit to the record with `id`.
    ///
    /// Returns `Ok(None)` when no such record exists; that is not an error.
    pub async fn edit(
        &mut self,
        id: &RecordId,
        edit: RecordEdit,
    ) -> Result<Option<Record>, CatalogError> {
        let Some(current) = self.collection.get(id) else {
            tracing::debug!(id = %id, "Edit for unknown record ignored");
            return Ok(None);
        };

        let edited = edit.apply_to(current)?;
        if &edited == current {
            return Ok(Some(edited));
        }

        let confirmed = self
            .backend
            .update(edited)
            .await
            .map_err(|e| self.backend_failure("update", e))?;
        let record = Record {
            id: id.clone(),
            ..confirmed
        };
        self.apply(CatalogIntent::Replace {
            record: record.clone(),
        })
        .await?;
        Ok(Some(record))
    }

    /// Remove the record with `id`. Returns whether anything was removed.
    pub async fn remove(&mut self, id: &RecordId) -> Result<bool, CatalogError> {
        if !self.collection.contains(id) {
            tracing::debug!(id = %id, "Remove for unknown record ignored");
            return Ok(false);
        }

        self.backend
            .delete(id)
            .await
            .map_err(|e| self.backend_failure("delete", e))?;
        self.apply(CatalogIntent::Remove { id: id.clone() }).await?;
        Ok(true)
    }

    pub fn dispatch_view(&mut self, intent: ViewIntent) -> &ViewState {
        let current = std::mem::take(&mut self.view);
        self.view = ViewReducer::reduce(current, intent);
        &self.view
    }

    pub fn search(&mut self, text: impl Into<String>) -> &ViewState {
        self.dispatch_view(ViewIntent::Search { text: text.into() })
    }

    pub fn next_page(&mut self) -> &ViewState {
        let page_count = self.projection().page_count;
        self.dispatch_view(ViewIntent::NextPage { page_count })
    }

    /// Jump straight to `page`, stopping at the first or last page.
    pub fn go_to_page(&mut self, page: usize) -> &ViewState {
        let page_count = self.projection().page_count;
        self.dispatch_view(ViewIntent::GoTo { page, page_count })
    }

    pub fn prev_page(&mut self) -> &ViewState {
        self.dispatch_view(ViewIntent::PrevPage)
    }

    pub fn projection(&self) -> Projection<'_> {
        project(&self.collection, &self.view, self.scope)
    }

    fn backend_failure(&self, operation: &'static str, err: BackendError) -> CatalogError {
        tracing::warn!(
            backend = self.backend.name(),
            operation,
            error = %err,
            "Backend call failed, collection unchanged"
        );
        CatalogError::Backend {
            backend: self.backend.name(),
            source: err,
        }
    }
}
