//! Canonical in-memory expense collection.
//!
//! [`ExpenseStore`] is the only thing that mutates the collection. Every
//! mutation goes through the [`ExpenseRepository`] first and is applied to
//! memory only once the repository accepted it, so a failed write never
//! leaves the displayed list ahead of what is durable.
//!
//! Each operation is split into a `begin_*` step that claims what it needs
//! and a `finish_*` step that applies the repository result. The plain
//! `load`/`create`/`update`/`delete` methods run both steps around a
//! synchronous repository call; callers that resolve repository work out of
//! band use the two steps directly.

mod repository;

use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::error::{RepoError, StoreError};
use crate::models::{Expense, ExpenseDraft, ExpenseId};

pub(crate) use repository::ExpenseRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreEvent {
    Loaded { count: usize },
    Created(ExpenseId),
    Updated(ExpenseId),
    Deleted(ExpenseId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoadOutcome {
    Loaded(usize),
    /// The repository returned nothing. Informational, not an error.
    NoData,
    /// A later load, or a mutation finished after this load was issued,
    /// was already applied; this result was discarded.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeleteOutcome {
    Deleted,
    AlreadyAbsent,
}

#[derive(Debug, PartialEq, Eq)]
#[must_use = "a load ticket must be passed to finish_load"]
pub(crate) struct LoadTicket {
    seq: u64,
}

#[derive(Debug)]
#[must_use = "an update ticket holds a claim on the expense until finish_update"]
pub(crate) struct UpdateTicket {
    id: ExpenseId,
    draft: ExpenseDraft,
}

#[derive(Debug)]
#[must_use = "a delete ticket holds a claim on the expense until finish_delete"]
pub(crate) struct DeleteTicket {
    id: ExpenseId,
}

pub(crate) struct ExpenseStore<R> {
    repo: R,
    expenses: Vec<Expense>,
    in_flight: HashSet<ExpenseId>,
    issued_loads: u64,
    applied_load: u64,
    revision: u64,
    subscribers: Vec<Sender<StoreEvent>>,
}

impl<R: ExpenseRepository> ExpenseStore<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self {
            repo,
            expenses: Vec::new(),
            in_flight: HashSet::new(),
            issued_loads: 0,
            applied_load: 0,
            revision: 0,
            subscribers: Vec::new(),
        }
    }

    /// Read-only snapshot of canonical state.
    pub(crate) fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub(crate) fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Bumped once per applied change.
    pub(crate) fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    // ── Load ──────────────────────────────────────────────────

    pub(crate) fn load(&mut self) -> Result<LoadOutcome, StoreError> {
        let ticket = self.begin_load();
        let result = self.repo.list(None, None);
        self.finish_load(ticket, result)
    }

    pub(crate) fn begin_load(&mut self) -> LoadTicket {
        self.issued_loads += 1;
        LoadTicket {
            seq: self.issued_loads,
        }
    }

    /// Apply a load result. Results are ordered by when the load was issued,
    /// not when it resolved: anything issued before the last applied load or
    /// mutation is dropped.
    pub(crate) fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Expense>, RepoError>,
    ) -> Result<LoadOutcome, StoreError> {
        if ticket.seq <= self.applied_load {
            tracing::debug!(
                seq = ticket.seq,
                applied = self.applied_load,
                "discarding stale load"
            );
            return Ok(LoadOutcome::Stale);
        }

        let expenses = result.map_err(|err| {
            tracing::warn!(error = %err, "load failed");
            StoreError::from_fetch(err)
        })?;

        let mut seen = HashSet::with_capacity(expenses.len());
        if let Some(dup) = expenses.iter().find(|e| !seen.insert(e.id)) {
            tracing::warn!(id = %dup.id, "repository returned duplicate id");
            return Err(StoreError::Fetch(format!("duplicate expense id {}", dup.id)));
        }

        let count = expenses.len();
        self.applied_load = ticket.seq;
        self.expenses = expenses;
        tracing::info!(count, "expenses loaded");
        self.notify(StoreEvent::Loaded { count });

        if count == 0 {
            Ok(LoadOutcome::NoData)
        } else {
            Ok(LoadOutcome::Loaded(count))
        }
    }

    // ── Create ────────────────────────────────────────────────

    pub(crate) fn create(&mut self, draft: ExpenseDraft) -> Result<ExpenseId, StoreError> {
        draft.validate()?;

        let created = self.repo.create(&draft).map_err(|err| {
            tracing::warn!(error = %err, "create rejected");
            StoreError::Persistence(err.to_string())
        })?;

        if self.get(created.id).is_some() {
            // The row is durable but cannot sit beside the one already held
            // under that id; resync from the repository before reporting.
            tracing::warn!(id = %created.id, "repository reused an existing id, reloading");
            if let Err(err) = self.load() {
                tracing::warn!(error = %err, "reload after id divergence failed");
            }
            return Err(StoreError::Persistence(format!(
                "repository returned duplicate id {}",
                created.id
            )));
        }

        let id = created.id;
        self.expenses.push(created);
        self.fence_loads();
        tracing::debug!(%id, "expense created");
        self.notify(StoreEvent::Created(id));
        Ok(id)
    }

    // ── Update ────────────────────────────────────────────────

    pub(crate) fn update(&mut self, id: ExpenseId, draft: ExpenseDraft) -> Result<(), StoreError> {
        let ticket = self.begin_update(id, draft)?;
        let result = self.repo.update(ticket.id, &ticket.draft);
        self.finish_update(ticket, result)
    }

    pub(crate) fn begin_update(
        &mut self,
        id: ExpenseId,
        draft: ExpenseDraft,
    ) -> Result<UpdateTicket, StoreError> {
        draft.validate()?;
        if self.get(id).is_none() {
            return Err(StoreError::NotFound(id));
        }
        self.claim(id)?;
        Ok(UpdateTicket { id, draft })
    }

    pub(crate) fn finish_update(
        &mut self,
        ticket: UpdateTicket,
        result: Result<(), RepoError>,
    ) -> Result<(), StoreError> {
        let UpdateTicket { id, draft } = ticket;
        self.in_flight.remove(&id);

        result.map_err(|err| {
            tracing::warn!(%id, error = %err, "update rejected");
            StoreError::from_write(err)
        })?;

        let updated = Expense::from_draft(id, draft);
        match self.expenses.iter_mut().find(|e| e.id == id) {
            Some(slot) => *slot = updated,
            // A load replaced the collection while the write was outstanding.
            None => self.expenses.push(updated),
        }
        self.fence_loads();
        tracing::debug!(%id, "expense updated");
        self.notify(StoreEvent::Updated(id));
        Ok(())
    }

    // ── Delete ────────────────────────────────────────────────

    pub(crate) fn delete(&mut self, id: ExpenseId) -> Result<DeleteOutcome, StoreError> {
        let Some(ticket) = self.begin_delete(id)? else {
            tracing::debug!(%id, "delete of absent expense ignored");
            return Ok(DeleteOutcome::AlreadyAbsent);
        };
        let result = self.repo.delete(ticket.id);
        self.finish_delete(ticket, result)
    }

    /// Returns `None` when there is nothing to delete.
    pub(crate) fn begin_delete(&mut self, id: ExpenseId) -> Result<Option<DeleteTicket>, StoreError> {
        if self.in_flight.contains(&id) {
            return Err(StoreError::Conflict(id));
        }
        if self.get(id).is_none() {
            return Ok(None);
        }
        self.claim(id)?;
        Ok(Some(DeleteTicket { id }))
    }

    pub(crate) fn finish_delete(
        &mut self,
        ticket: DeleteTicket,
        result: Result<(), RepoError>,
    ) -> Result<DeleteOutcome, StoreError> {
        let id = ticket.id;
        self.in_flight.remove(&id);

        match result {
            Ok(()) | Err(RepoError::NotFound(_)) => {}
            Err(err) => {
                tracing::warn!(%id, error = %err, "delete rejected");
                return Err(StoreError::Persistence(err.to_string()));
            }
        }

        self.expenses.retain(|e| e.id != id);
        self.fence_loads();
        tracing::debug!(%id, "expense deleted");
        self.notify(StoreEvent::Deleted(id));
        Ok(DeleteOutcome::Deleted)
    }

    // ── Internals ─────────────────────────────────────────────

    fn claim(&mut self, id: ExpenseId) -> Result<(), StoreError> {
        if !self.in_flight.insert(id) {
            tracing::debug!(%id, "rejecting overlapping mutation");
            return Err(StoreError::Conflict(id));
        }
        Ok(())
    }

    /// Loads issued before an applied mutation hold a snapshot that predates
    /// it and must not overwrite it.
    fn fence_loads(&mut self) {
        self.applied_load = self.issued_loads;
    }

    fn notify(&mut self, event: StoreEvent) {
        self.revision += 1;
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
