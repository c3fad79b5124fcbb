//! Person list workflow: load, refresh and confirm-then-delete.
//!
//! Like `PersonEditor`, the list never performs I/O itself. `reload` and
//! `delete_confirmed` drive it against a `PersonService` for blocking hosts.

use thiserror::Error;

use crate::error::ApiError;
use crate::http::Transport;
use crate::notice::{Notice, NoticeKind};
use crate::refresh::RefreshSignal;
use crate::service::PersonService;
use crate::types::{Person, PersonId};

/// A delete waiting for the user to confirm it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: PersonId,
    pub name: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListError {
    #[error("a load is already in flight")]
    Busy,

    #[error("no load is in flight")]
    NotLoading,

    #[error("no delete is awaiting confirmation")]
    NoPendingDelete,

    #[error("no delete is in flight")]
    NotDeleting,

    #[error("a delete is already in flight")]
    DeleteInFlight,
}

#[derive(Debug)]
pub struct PersonList {
    persons: Vec<Person>,
    loading: bool,
    loaded_at: Option<u64>,
    pending_delete: Option<PendingDelete>,
    deleting: Option<PersonId>,
    notice: Option<Notice>,
    refresh: RefreshSignal,
}

impl PersonList {
    pub fn new(refresh: RefreshSignal) -> Self {
        Self {
            persons: Vec::new(),
            loading: false,
            loaded_at: None,
            pending_delete: None,
            deleting: None,
            notice: None,
            refresh,
        }
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    /// True before the first load and whenever someone signalled a change
    /// since the last load started.
    pub fn needs_reload(&self) -> bool {
        match self.loaded_at {
            None => true,
            Some(seen) => self.refresh.changed_since(seen),
        }
    }

    pub fn begin_load(&mut self) -> Result<(), ListError> {
        if self.loading {
            return Err(ListError::Busy);
        }
        self.loading = true;
        self.loaded_at = Some(self.refresh.generation());
        Ok(())
    }

    /// On failure the previous rows stay on screen.
    pub fn finish_load(&mut self, result: Result<Vec<Person>, ApiError>) -> Result<(), ListError> {
        if !self.loading {
            return Err(ListError::NotLoading);
        }
        self.loading = false;
        match result {
            Ok(persons) => self.persons = persons,
            Err(e) => {
                log::error!("error loading persons: {e}");
                self.notice = Some(Notice::new(NoticeKind::ListFailed));
            }
        }
        Ok(())
    }

    pub fn request_delete(&mut self, id: PersonId, name: impl Into<String>) {
        self.pending_delete = Some(PendingDelete { id, name: name.into() });
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Close the confirmation and hand back the id the host should delete.
    ///
    /// Only one delete runs at a time; the pending confirmation is kept while
    /// another is in flight.
    pub fn confirm_delete(&mut self) -> Result<PersonId, ListError> {
        if self.deleting.is_some() {
            return Err(ListError::DeleteInFlight);
        }
        let pending = self.pending_delete.take().ok_or(ListError::NoPendingDelete)?;
        self.deleting = Some(pending.id.clone());
        Ok(pending.id)
    }

    /// Returns whether the person is gone. A successful delete signals
    /// refresh, so `needs_reload` turns true.
    pub fn finish_delete(&mut self, result: Result<(), ApiError>) -> Result<bool, ListError> {
        let id = self.deleting.take().ok_or(ListError::NotDeleting)?;
        match result {
            Ok(()) => {
                log::info!("deleted person {id}");
                self.notice = Some(Notice::new(NoticeKind::Deleted));
                self.refresh.notify();
                Ok(true)
            }
            Err(e) => {
                log::error!("error deleting person {id}: {e}");
                self.notice = Some(Notice::new(NoticeKind::DeleteFailed));
                Ok(false)
            }
        }
    }

    pub fn reload<T: Transport>(&mut self, service: &PersonService<T>) -> Result<(), ListError> {
        self.begin_load()?;
        self.finish_load(service.list_all())
    }

    /// Delete the confirmed person and reload if that changed anything.
    ///
    /// Returns whether the delete itself succeeded; a failed reload afterwards
    /// replaces the notice but not this outcome.
    pub fn delete_confirmed<T: Transport>(&mut self, service: &PersonService<T>) -> Result<bool, ListError> {
        let id = self.confirm_delete()?;
        let deleted = self.finish_delete(service.delete(&id))?;
        if self.needs_reload() {
            self.reload(service)?;
        }
        Ok(deleted)
    }
}
