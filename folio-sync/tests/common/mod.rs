#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use folio_core::{CmsQuery, EntryId, RemoteEntry, StoryVersion};
use folio_source::{ContentSource, SourceError};

/// Content source returning whatever entries the test put in it.
pub struct StaticSource {
    entries: RefCell<Vec<RemoteEntry>>,
    pub fetches: Cell<usize>,
}

impl StaticSource {
    pub fn new(entries: Vec<RemoteEntry>) -> Self {
        Self {
            entries: RefCell::new(entries),
            fetches: Cell::new(0),
        }
    }

    pub fn set(&self, entries: Vec<RemoteEntry>) {
        *self.entries.borrow_mut() = entries;
    }
}

impl ContentSource for StaticSource {
    fn fetch_entries(&self, query: &CmsQuery) -> Result<Vec<RemoteEntry>, SourceError> {
        self.fetches.set(self.fetches.get() + 1);
        let entries = self.entries.borrow().clone();
        if entries.is_empty() {
            return Err(SourceError::NoEntries {
                starts_with: query.starts_with.clone(),
            });
        }
        Ok(entries)
    }
}

pub fn query() -> CmsQuery {
    CmsQuery::new("test/simple", StoryVersion::Draft, "created_at:asc")
}

pub fn literature(id: u64, hash: &str) -> RemoteEntry {
    RemoteEntry {
        id: EntryId::from(id),
        title: format!("Entry {id}"),
        author: "Ethan Kahn".into(),
        category: None,
        summary: Some("A summary".into()),
        date: "2021-05-19T21:50:32.720Z".into(),
        hash: hash.into(),
        body: Some(format!("<p>Body of {id}</p>\n")),
    }
}

pub fn video(id: &str, category: &str) -> RemoteEntry {
    RemoteEntry {
        id: EntryId::from(id),
        title: format!("Video {id}"),
        author: "Ethan Kahn".into(),
        category: Some(category.into()),
        summary: None,
        date: "2021-03-02".into(),
        hash: format!("h-{id}"),
        body: None,
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
