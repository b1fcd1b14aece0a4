/// Something the registry can look up by notification id.
pub trait Identified {
    fn id(&self) -> &str;
}

/// Live notifications in show order.
///
/// Ids are not checked for uniqueness; lookups match the first occurrence.
#[derive(Debug)]
pub struct NotificationRegistry<T> {
    entries: Vec<T>,
}

impl<T> Default for NotificationRegistry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Identified> NotificationRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `entry` and return a reference to it.
    pub fn push(&mut self, entry: T) -> &mut T {
        self.entries.push(entry);
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }

    /// Stop tracking the first entry with `id`.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.entries.iter().position(|entry| entry.id() == id)?;
        Some(self.entries.remove(index))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id() == id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.id().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Entry(&'static str, u32);

    impl Identified for Entry {
        fn id(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_remove_unknown_leaves_registry_unchanged() {
        let mut registry = NotificationRegistry::new();
        registry.push(Entry("a", 1));
        registry.push(Entry("b", 2));

        assert_eq!(registry.remove("zzz"), None);
        assert_eq!(registry.ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_takes_only_that_entry() {
        let mut registry = NotificationRegistry::new();
        registry.push(Entry("a", 1));
        registry.push(Entry("b", 2));
        registry.push(Entry("c", 3));

        assert_eq!(registry.remove("b"), Some(Entry("b", 2)));
        assert_eq!(registry.ids(), vec!["a", "c"]);
        assert!(!registry.contains("b"));
    }

    #[test]
    fn test_duplicate_ids_match_first() {
        let mut registry = NotificationRegistry::new();
        registry.push(Entry("dup", 1));
        registry.push(Entry("dup", 2));

        assert_eq!(registry.remove("dup"), Some(Entry("dup", 1)));
        assert_eq!(registry.remove("dup"), Some(Entry("dup", 2)));
        assert!(registry.is_empty());
    }
}
