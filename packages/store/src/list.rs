//! # Displayed record lists
//!
//! [`RecordList`] is the local state behind every feature view. It is filled
//! once from the backend (or from the fallback samples when that fails) and
//! then mutated locally after each create or delete, without re-fetching.
//!
//! The list is kept in [`Record::list_cmp`] order at all times: a loaded list
//! is stably sorted, and inserts land at their sorted position. For kinds
//! listed newest first that means a freshly created record is prepended.

use crate::models::Record;

/// Where the current contents came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ListSource {
    /// Nothing loaded yet.
    #[default]
    Pending,
    /// Rows returned by the backend.
    Backend,
    /// The fixed sample set, after a failed fetch.
    Fallback,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordList<R: Record> {
    items: Vec<R>,
    source: ListSource,
}

impl<R: Record> Default for RecordList<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            source: ListSource::Pending,
        }
    }
}

impl<R: Record> RecordList<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from a fetch result, degrading to the fallback samples
    /// on error.
    pub fn from_fetch<E>(result: Result<Vec<R>, E>) -> Self {
        let mut list = Self::new();
        list.load(result);
        list
    }

    /// Replaces the contents with a fetch result. Returns the error, if
    /// any, after switching to the fallback samples.
    pub fn load<E>(&mut self, result: Result<Vec<R>, E>) -> Option<E> {
        match result {
            Ok(items) => {
                self.replace(items, ListSource::Backend);
                None
            }
            Err(e) => {
                self.replace(R::fallback(), ListSource::Fallback);
                Some(e)
            }
        }
    }

    fn replace(&mut self, mut items: Vec<R>, source: ListSource) {
        items.sort_by(|a, b| a.list_cmp(b));
        self.items = items;
        self.source = source;
    }

    /// Inserts a newly created record at its sorted position.
    ///
    /// A record whose id is already listed replaces the old entry, so the id
    /// is present exactly once afterwards.
    pub fn insert(&mut self, record: R) {
        self.items.retain(|r| r.id() != record.id());
        let at = if record.inserts_first() {
            0
        } else {
            self.items
                .iter()
                .position(|r| record.list_cmp(r).is_le())
                .unwrap_or(self.items.len())
        };
        self.items.insert(at, record);
    }

    /// Removes the record with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|r| r.id() != id);
        self.items.len() != before
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.items.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn source(&self) -> ListSource {
        self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.source != ListSource::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Letter, Memory, Milestone, Note, Song};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn milestone(id: &str, y: i32, m: u32, d: u32) -> Milestone {
        Milestone {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            title: format!("event {id}"),
            description: String::new(),
            user_id: None,
            created_at: None,
        }
    }

    fn note(id: &str, secs: i64) -> Note {
        Note {
            id: id.to_string(),
            content: format!("note {id}"),
            user_id: None,
            created_at: Some(Utc.timestamp_opt(secs, 0).unwrap()),
        }
    }

    fn ids<R: Record>(list: &RecordList<R>) -> Vec<&str> {
        list.items().iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_fetch_error_uses_fallback() {
        let list = RecordList::<Note>::from_fetch(Err("offline"));
        assert_eq!(list.source(), ListSource::Fallback);
        assert!(!list.is_empty());
        assert_eq!(list.items(), Note::fallback().as_slice());

        let mut list = RecordList::<Song>::new();
        assert!(!list.is_loaded());
        assert_eq!(list.load(Err(42)), Some(42));
        assert_eq!(list.len(), Song::fallback().len());
    }

    #[test]
    fn test_fetch_ok_keeps_rows() {
        let list = RecordList::from_fetch(Ok::<_, ()>(vec![note("b", 20), note("a", 10)]));
        assert_eq!(list.source(), ListSource::Backend);
        assert_eq!(ids(&list), vec!["b", "a"]);

        let empty = RecordList::<Letter>::from_fetch(Ok::<_, ()>(Vec::new()));
        assert!(empty.is_empty());
        assert!(empty.is_loaded());
    }

    #[test]
    fn test_insert_prepends_newest() {
        let mut list = RecordList::from_fetch(Ok::<_, ()>(vec![note("a", 10), note("b", 20)]));
        assert_eq!(ids(&list), vec!["b", "a"]);

        list.insert(note("c", 30));
        assert_eq!(ids(&list), vec!["c", "b", "a"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_insert_before_fallback_rows() {
        let mut list = RecordList::<Note>::from_fetch(Err(()));
        let before = list.len();
        list.insert(note("new", 1));
        assert_eq!(list.items()[0].id, "new");
        assert_eq!(list.len(), before + 1);
    }

    #[test]
    fn test_insert_without_timestamp_prepends() {
        let mut list = RecordList::from_fetch(Ok::<_, ()>(vec![note("a", 10), note("b", 20)]));
        let mut unstamped = note("c", 0);
        unstamped.created_at = None;
        list.insert(unstamped);
        assert_eq!(ids(&list), vec!["c", "b", "a"]);

        // Milestones have a date to sort by and ignore the missing timestamp
        let mut timeline = RecordList::from_fetch(Ok::<_, ()>(vec![milestone("early", 2023, 1, 1)]));
        timeline.insert(milestone("later", 2024, 1, 1));
        assert_eq!(ids(&timeline), vec!["early", "later"]);
    }

    #[test]
    fn test_insert_same_id_replaces() {
        let mut list = RecordList::from_fetch(Ok::<_, ()>(vec![note("a", 10)]));
        let mut updated = note("a", 10);
        updated.content = "edited".to_string();
        list.insert(updated);
        assert_eq!(list.len(), 1);
        assert_eq!(list.get("a").unwrap().content, "edited");
    }

    #[test]
    fn test_milestones_stay_sorted_by_date() {
        let mut list = RecordList::from_fetch(Ok::<_, ()>(vec![
            milestone("late", 2024, 6, 1),
            milestone("early", 2023, 1, 1),
        ]));
        assert_eq!(ids(&list), vec!["early", "late"]);

        list.insert(milestone("middle", 2023, 9, 9));
        list.insert(milestone("first", 2022, 12, 31));
        list.insert(milestone("last", 2025, 5, 20));
        assert_eq!(ids(&list), vec!["first", "early", "middle", "late", "last"]);

        let dates: Vec<NaiveDate> = list.items().iter().map(|m| m.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_remove() {
        let mut list = RecordList::<Memory>::from_fetch(Err(()));
        let before = list.len();

        assert!(list.remove("2"));
        assert!(!list.contains("2"));
        assert_eq!(list.len(), before - 1);

        assert!(!list.remove("missing"));
        assert_eq!(list.len(), before - 1);
    }
}
