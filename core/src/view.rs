//! In-memory ordered copy of a collection, as shown to the user.

use crate::resource::Record;

/// Ordered records held by a page.
///
/// Mutations mirror what the server acknowledged: `prepend` after a create,
/// `replace` after an update, `remove` after a delete. Nothing here talks to
/// the network.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalView<T> {
    records: Vec<T>,
}

impl<T> Default for LocalView<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> LocalView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&mut self, records: Vec<T>) {
        self.records = records;
    }

    pub fn prepend(&mut self, record: T) {
        self.records.insert(0, record);
    }

    /// Swaps in `record` at the position of the entry with `id`.
    /// Returns `false` (and leaves the view alone) when no entry matches.
    pub fn replace(&mut self, id: u64, record: T) -> bool {
        match self.records.iter_mut().find(|r| r.id() == id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Drops every entry with `id`, returning how many were removed.
    pub fn remove(&mut self, id: u64) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        before - self.records.len()
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> Vec<u64> {
        self.records.iter().map(Record::id).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<'a, T: Record> IntoIterator for &'a LocalView<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Comment;

    fn comment(id: u64, body: &str) -> Comment {
        Comment {
            id,
            body: body.to_string(),
            post_id: 1,
            likes: 0,
            user: None,
        }
    }

    fn view(ids: &[u64]) -> LocalView<Comment> {
        let mut v = LocalView::new();
        v.replace_all(ids.iter().map(|&id| comment(id, "x")).collect());
        v
    }

    #[test]
    fn prepend_puts_record_first() {
        let mut v = view(&[1, 2]);
        v.prepend(comment(101, "hi"));
        assert_eq!(v.ids(), vec![101, 1, 2]);
    }

    #[test]
    fn replace_keeps_position() {
        let mut v = view(&[1, 2, 3]);
        assert!(v.replace(2, comment(2, "edited")));
        assert_eq!(v.ids(), vec![1, 2, 3]);
        assert_eq!(v.get(2).unwrap().body, "edited");
    }

    #[test]
    fn replace_unknown_id_is_noop() {
        let mut v = view(&[1]);
        assert!(!v.replace(9, comment(9, "ghost")));
        assert_eq!(v.ids(), vec![1]);
    }

    #[test]
    fn remove_drops_only_matching_id() {
        let mut v = view(&[1, 101, 2]);
        assert_eq!(v.remove(101), 1);
        assert_eq!(v.ids(), vec![1, 2]);
        assert_eq!(v.remove(101), 0);
    }

    #[test]
    fn replace_all_discards_previous_contents() {
        let mut v = view(&[1, 2]);
        v.replace_all(vec![comment(5, "y")]);
        assert_eq!(v.ids(), vec![5]);
        v.clear();
        assert!(v.is_empty());
    }
}
