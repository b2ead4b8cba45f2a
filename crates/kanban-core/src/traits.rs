use crate::KanbanResult;

/// Durable string key-value storage.
///
/// Mirrors the shape of browser local storage: each key holds one serialized
/// value, and a missing key is `Ok(None)` rather than an error.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> KanbanResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> KanbanResult<()>;
    fn remove(&mut self, key: &str) -> KanbanResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> KanbanResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> KanbanResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> KanbanResult<()> {
        (**self).remove(key)
    }
}
