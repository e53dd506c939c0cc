//! Reconciliation of the last-known manifest against freshly fetched entries.
//!
//! Entries are matched by id only. A matched entry counts as updated when its
//! `hash` differs; other field differences under an unchanged hash are not
//! reported. Handlers run in the order added → updated → deleted, each class
//! in input order. Nothing here touches the filesystem.

use std::collections::{HashMap, HashSet};

use folio_core::{EntryId, ManifestEntry, RemoteEntry};

use crate::error::SyncError;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Side effects for each classification. Every method defaults to a no-op.
pub trait EntryHandler {
    fn on_add(&mut self, _entry: &RemoteEntry) -> Result<(), SyncError> {
        Ok(())
    }

    fn on_update(&mut self, _entry: &RemoteEntry) -> Result<(), SyncError> {
        Ok(())
    }

    fn on_delete(&mut self, _entry: &ManifestEntry) -> Result<(), SyncError> {
        Ok(())
    }
}

/// Handler that does nothing; used for metadata-only builds.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHandler;

impl EntryHandler for NoopHandler {}

type RemoteFn<'a> = Box<dyn FnMut(&RemoteEntry) -> Result<(), SyncError> + 'a>;
type ManifestFn<'a> = Box<dyn FnMut(&ManifestEntry) -> Result<(), SyncError> + 'a>;

/// Handler assembled from closures; unset callbacks are no-ops.
#[derive(Default)]
pub struct FnHandler<'a> {
    add: Option<RemoteFn<'a>>,
    update: Option<RemoteFn<'a>>,
    delete: Option<ManifestFn<'a>>,
}

impl<'a> FnHandler<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_add(mut self, f: impl FnMut(&RemoteEntry) -> Result<(), SyncError> + 'a) -> Self {
        self.add = Some(Box::new(f));
        self
    }

    pub fn on_update(
        mut self,
        f: impl FnMut(&RemoteEntry) -> Result<(), SyncError> + 'a,
    ) -> Self {
        self.update = Some(Box::new(f));
        self
    }

    pub fn on_delete(
        mut self,
        f: impl FnMut(&ManifestEntry) -> Result<(), SyncError> + 'a,
    ) -> Self {
        self.delete = Some(Box::new(f));
        self
    }
}

impl EntryHandler for FnHandler<'_> {
    fn on_add(&mut self, entry: &RemoteEntry) -> Result<(), SyncError> {
        match self.add.as_mut() {
            Some(f) => f(entry),
            None => Ok(()),
        }
    }

    fn on_update(&mut self, entry: &RemoteEntry) -> Result<(), SyncError> {
        match self.update.as_mut() {
            Some(f) => f(entry),
            None => Ok(()),
        }
    }

    fn on_delete(&mut self, entry: &ManifestEntry) -> Result<(), SyncError> {
        match self.delete.as_mut() {
            Some(f) => f(entry),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Ids of the entries in each class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub added: Vec<EntryId>,
    pub updated: Vec<EntryId>,
    pub deleted: Vec<EntryId>,
}

impl ChangeSet {
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.updated.is_empty() || !self.deleted.is_empty()
    }
}

/// Borrowed view of the three classes.
#[derive(Debug, Default)]
pub struct Classification<'a> {
    pub added: Vec<&'a RemoteEntry>,
    /// `(previous, latest)` pairs.
    pub updated: Vec<(&'a ManifestEntry, &'a RemoteEntry)>,
    pub deleted: Vec<&'a ManifestEntry>,
}

impl Classification<'_> {
    pub fn change_set(&self) -> ChangeSet {
        ChangeSet {
            added: self.added.iter().map(|e| e.id.clone()).collect(),
            updated: self.updated.iter().map(|(_, e)| e.id.clone()).collect(),
            deleted: self.deleted.iter().map(|e| e.id.clone()).collect(),
        }
    }
}

/// Classify without running any side effects.
pub fn classify<'a>(old: &'a [ManifestEntry], latest: &'a [RemoteEntry]) -> Classification<'a> {
    let previous: HashMap<&EntryId, &ManifestEntry> = old.iter().map(|e| (&e.id, e)).collect();
    let current: HashSet<&EntryId> = latest.iter().map(|e| &e.id).collect();

    let added = latest
        .iter()
        .filter(|e| !previous.contains_key(&e.id))
        .collect();
    let updated = latest
        .iter()
        .filter_map(|e| match previous.get(&e.id) {
            Some(prev) if prev.hash != e.hash => Some((*prev, e)),
            _ => None,
        })
        .collect();
    let deleted = old.iter().filter(|e| !current.contains(&e.id)).collect();

    Classification {
        added,
        updated,
        deleted,
    }
}

/// Classify `latest` against `old` and run `handler` for every change.
///
/// The first handler error aborts reconciliation and is returned as-is.
pub fn reconcile<H: EntryHandler + ?Sized>(
    old: &[ManifestEntry],
    latest: &[RemoteEntry],
    handler: &mut H,
) -> Result<ChangeSet, SyncError> {
    let classes = classify(old, latest);

    for entry in &classes.added {
        tracing::info!("add {}/{}", entry.hash, entry.title);
        handler.on_add(entry)?;
    }
    for (prev, entry) in &classes.updated {
        tracing::info!("upd ({} => {})/{}", prev.hash, entry.hash, entry.title);
        handler.on_update(entry)?;
    }
    for entry in &classes.deleted {
        tracing::warn!("omit {}/{}", entry.hash, entry.title);
        handler.on_delete(entry)?;
    }

    Ok(classes.change_set())
}
