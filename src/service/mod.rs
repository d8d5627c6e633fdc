//! Generic read-modify-write CRUD over collection sections.
//!
//! Every mutation loads the full collection array, applies a pure
//! transform, and persists the whole array back. There is no partial
//! item update at the storage layer.

use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::store::{SectionStore, StoreError};

/// The two admin-editable collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Projects,
    Experience,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPolicy {
    Append,
    Prepend,
}

impl Collection {
    /// Section name the collection is stored under.
    pub fn section(&self) -> &'static str {
        match self {
            Collection::Projects => "projects",
            Collection::Experience => "experience",
        }
    }

    /// Experience prepends so the newest entry surfaces first;
    /// projects keep insertion order.
    pub fn insert_policy(&self) -> InsertPolicy {
        match self {
            Collection::Projects => InsertPolicy::Append,
            Collection::Experience => InsertPolicy::Prepend,
        }
    }

    /// Fields a create payload must carry as non-blank strings.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Collection::Projects => &["title"],
            Collection::Experience => &["company", "role"],
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "projects" => Some(Collection::Projects),
            "experience" => Some(Collection::Experience),
            _ => None,
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.section())
    }
}

/// Loose id equality across the JSON/HTTP boundary: the stored id may be
/// a number while the path parameter arrives as a string (or vice versa).
pub fn id_matches(item: &Value, target: &str) -> bool {
    match item.get("id") {
        Some(Value::Number(n)) => {
            if n.to_string() == target {
                return true;
            }
            match (n.as_f64(), target.parse::<f64>()) {
                (Some(a), Ok(b)) => a == b,
                _ => false,
            }
        }
        Some(Value::String(s)) => {
            if s == target {
                return true;
            }
            match (s.parse::<f64>(), target.parse::<f64>()) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            }
        }
        _ => false,
    }
}

/// Assign a fresh id, disjoint from every id already in the collection.
/// Time-derived (millisecond clock) so ids are unique across restarts,
/// bumped past the current maximum to stay monotonic within one array.
fn next_id(items: &[Value]) -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    let max_existing = items
        .iter()
        .filter_map(|item| item.get("id"))
        .filter_map(Value::as_i64)
        .max()
        .unwrap_or(0);
    now.max(max_existing + 1)
}

/// Create transform: merge the submitted fields into a new item with a
/// server-assigned id, inserted per the collection's policy. A submitted
/// `id` field is ignored.
pub fn create(mut items: Vec<Value>, fields: Map<String, Value>, policy: InsertPolicy) -> Vec<Value> {
    let id = next_id(&items);
    let mut item = fields;
    item.insert("id".to_string(), Value::from(id));

    match policy {
        InsertPolicy::Append => items.push(Value::Object(item)),
        InsertPolicy::Prepend => items.insert(0, Value::Object(item)),
    }
    items
}

/// Update transform: shallow-merge the submitted fields over the item
/// whose id matches; the id itself is immutable and every other item
/// passes through unchanged. An unknown id is a no-op.
pub fn update(items: Vec<Value>, target: &str, fields: &Map<String, Value>) -> Vec<Value> {
    items
        .into_iter()
        .map(|item| {
            if !id_matches(&item, target) {
                return item;
            }
            match item {
                Value::Object(mut obj) => {
                    let id = obj.get("id").cloned();
                    for (key, value) in fields {
                        if key != "id" {
                            obj.insert(key.clone(), value.clone());
                        }
                    }
                    if let Some(id) = id {
                        obj.insert("id".to_string(), id);
                    }
                    Value::Object(obj)
                }
                other => other,
            }
        })
        .collect()
}

/// Delete transform: drop the item whose id matches, preserving the
/// relative order of the rest. An unknown id is a no-op.
pub fn delete(items: Vec<Value>, target: &str) -> Vec<Value> {
    items
        .into_iter()
        .filter(|item| !id_matches(item, target))
        .collect()
}

/// Read-modify-write service over collection sections. Mutations are
/// serialized behind a process-wide mutex so two admin writes cannot
/// lose each other's update within one server.
#[derive(Clone)]
pub struct SectionService {
    store: SectionStore,
    write_lock: Arc<Mutex<()>>,
}

impl SectionService {
    pub fn new(store: SectionStore) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Load the section (absent or non-array reads as an empty array),
    /// apply the transform, persist the full result, and return it.
    pub async fn apply_to_section<F>(&self, name: &str, transform: F) -> Result<Vec<Value>, StoreError>
    where
        F: FnOnce(Vec<Value>) -> Vec<Value>,
    {
        let _guard = self.write_lock.lock().await;

        let current = match self.store.get(name).await? {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };

        let next = transform(current);
        self.store.put(name, &Value::Array(next.clone())).await?;
        Ok(next)
    }

    /// Current contents of a collection; absent reads as empty.
    pub async fn list(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        match self.store.get(collection.section()).await? {
            Some(Value::Array(items)) => Ok(items),
            _ => Ok(Vec::new()),
        }
    }

    pub async fn create_item(
        &self,
        collection: Collection,
        fields: Map<String, Value>,
    ) -> Result<Vec<Value>, StoreError> {
        let policy = collection.insert_policy();
        self.apply_to_section(collection.section(), move |items| {
            create(items, fields, policy)
        })
        .await
    }

    pub async fn update_item(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<Vec<Value>, StoreError> {
        let id = id.to_string();
        self.apply_to_section(collection.section(), move |items| {
            update(items, &id, &fields)
        })
        .await
    }

    pub async fn delete_item(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Vec<Value>, StoreError> {
        let id = id.to_string();
        self.apply_to_section(collection.section(), move |items| delete(items, &id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn create_appends_with_fresh_id() {
        let items = vec![json!({"id": 1, "title": "A"})];
        let next = create(items, fields(json!({"title": "B"})), InsertPolicy::Append);

        assert_eq!(next.len(), 2);
        assert_eq!(next[0]["title"], "A");
        assert_eq!(next[1]["title"], "B");
        assert_ne!(next[1]["id"], next[0]["id"]);
    }

    #[test]
    fn create_prepends_under_prepend_policy() {
        let items = vec![json!({"id": 1, "company": "Old"})];
        let next = create(items, fields(json!({"company": "New"})), InsertPolicy::Prepend);

        assert_eq!(next[0]["company"], "New");
        assert_eq!(next[1]["company"], "Old");
    }

    #[test]
    fn create_id_is_disjoint_even_from_future_ids() {
        // An existing id past the current clock must not be reused
        let far_future = chrono::Utc::now().timestamp_millis() + 1_000_000;
        let items = vec![json!({"id": far_future, "title": "A"})];
        let next = create(items, fields(json!({"title": "B"})), InsertPolicy::Append);

        assert_eq!(next[1]["id"].as_i64(), Some(far_future + 1));
    }

    #[test]
    fn create_ignores_submitted_id() {
        let next = create(Vec::new(), fields(json!({"id": 7, "title": "B"})), InsertPolicy::Append);
        assert_ne!(next[0]["id"], json!(7));
    }

    #[test]
    fn update_shallow_merges_only_the_target() {
        let items = vec![
            json!({"id": 1, "role": "Volunteer", "company": "A"}),
            json!({"id": 2, "role": "Participant", "company": "B"}),
        ];
        let next = update(items, "2", &fields(json!({"role": "Lead"})));

        assert_eq!(next[0], json!({"id": 1, "role": "Volunteer", "company": "A"}));
        assert_eq!(next[1]["role"], "Lead");
        assert_eq!(next[1]["company"], "B");
        assert_eq!(next[1]["id"], 2);
    }

    #[test]
    fn update_cannot_reassign_id() {
        let items = vec![json!({"id": 1, "title": "A"})];
        let next = update(items, "1", &fields(json!({"id": 99, "title": "B"})));

        assert_eq!(next[0]["id"], 1);
        assert_eq!(next[0]["title"], "B");
    }

    #[test]
    fn update_unknown_id_is_a_no_op() {
        let items = vec![json!({"id": 1, "title": "A"})];
        let next = update(items.clone(), "999", &fields(json!({"title": "B"})));
        assert_eq!(next, items);
    }

    #[test]
    fn delete_removes_exactly_one_and_keeps_order() {
        let items = vec![
            json!({"id": 1, "title": "A"}),
            json!({"id": 2, "title": "B"}),
            json!({"id": 3, "title": "C"}),
        ];
        let next = delete(items, "2");

        assert_eq!(next.len(), 2);
        assert_eq!(next[0]["title"], "A");
        assert_eq!(next[1]["title"], "C");
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let items = vec![json!({"id": 1, "title": "A"})];
        assert_eq!(delete(items.clone(), "999"), items);
    }

    #[test]
    fn id_matching_is_loose_across_types() {
        assert!(id_matches(&json!({"id": 2}), "2"));
        assert!(id_matches(&json!({"id": "2"}), "2"));
        assert!(id_matches(&json!({"id": 2.0}), "2"));
        assert!(!id_matches(&json!({"id": 2}), "3"));
        assert!(!id_matches(&json!({"title": "no id"}), "2"));
    }

    #[tokio::test]
    async fn apply_to_section_substitutes_empty_for_absent() {
        let store = crate::store::SectionStore::in_memory().await.unwrap();
        let service = SectionService::new(store);

        let result = service
            .create_item(Collection::Projects, fields(json!({"title": "First"})))
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0]["title"], "First");
    }

    #[tokio::test]
    async fn mutations_persist_the_whole_array() {
        let store = crate::store::SectionStore::in_memory().await.unwrap();
        store
            .put("projects", &json!([{"id": 1, "title": "A"}]))
            .await
            .unwrap();
        let service = SectionService::new(store.clone());

        service
            .create_item(Collection::Projects, fields(json!({"title": "B"})))
            .await
            .unwrap();

        let stored = store.get("projects").await.unwrap().unwrap();
        assert_eq!(stored.as_array().unwrap().len(), 2);
    }
}
