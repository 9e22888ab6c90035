use std::path::{Path, PathBuf};
use std::sync::Arc;

use models::user::User;
use serde_json::{Map, Value};

use crate::errors::ServiceError;
use crate::storage::json_document::value_kind;
use crate::storage::{DocumentError, DocumentLayout, JsonCollection};

const USERS: &str = "users";

/// Backing document layout: `{ "users": [ ... ] }`.
///
/// Other top-level fields are not kept; a save writes only `users`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UsersLayout;

impl DocumentLayout for UsersLayout {
    fn split(root: Value) -> Result<(Self, Vec<Value>), DocumentError> {
        let mut root = match root {
            Value::Object(map) => map,
            other => return Err(DocumentError::Shape(format!("expected object, found {}", value_kind(&other)))),
        };
        match root.remove(USERS) {
            Some(Value::Array(items)) => Ok((UsersLayout, items)),
            Some(other) => Err(DocumentError::Shape(format!("`users` must be an array, found {}", value_kind(&other)))),
            None => Err(DocumentError::Shape("object without a `users` field".into())),
        }
    }

    fn join(&self, records: Vec<Value>) -> Value {
        let mut root = Map::new();
        root.insert(USERS.to_string(), Value::Array(records));
        Value::Object(root)
    }
}

/// User collection keyed by name, compared case-insensitively.
pub struct UserStore {
    collection: JsonCollection<UsersLayout, User>,
}

impl UserStore {
    /// Store over the file at `path`; the file is not touched until first use.
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { collection: JsonCollection::new(path) })
    }

    pub fn path(&self) -> &Path {
        self.collection.path()
    }

    /// All users in stored order.
    pub async fn list(&self) -> Result<Vec<User>, ServiceError> {
        self.collection.list().await
    }

    /// First user whose name matches `name` ignoring case.
    pub async fn get(&self, name: &str) -> Result<User, ServiceError> {
        self.collection.get(name).await
    }

    /// Append a new user; `Conflict` if the name is taken in any casing.
    pub async fn create(&self, user: User) -> Result<User, ServiceError> {
        self.collection.create(user).await
    }

    /// Replace the user found under `name` with the full payload. A different
    /// name in the payload renames the record.
    pub async fn update(&self, name: &str, user: User) -> Result<User, ServiceError> {
        self.collection.update(name, user).await
    }

    /// Remove every user whose name matches `name` ignoring case.
    pub async fn delete(&self, name: &str) -> Result<(), ServiceError> {
        self.collection.delete(name).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    async fn store_with(doc: serde_json::Value) -> anyhow::Result<Arc<UserStore>> {
        let tmp = std::env::temp_dir().join(format!("svc_users_{}.json", Uuid::new_v4()));
        tokio::fs::write(&tmp, serde_json::to_vec(&doc)?).await?;
        Ok(UserStore::new(tmp))
    }

    async fn empty_store() -> anyhow::Result<Arc<UserStore>> {
        store_with(serde_json::json!({"users": []})).await
    }

    async fn cleanup(store: &UserStore) {
        let _ = tokio::fs::remove_file(store.path()).await;
    }

    #[tokio::test]
    async fn create_then_list_on_empty_store() -> anyhow::Result<()> {
        let store = empty_store().await?;
        store.create(User::new("Ann", 555, "blue")).await?;

        let listed = serde_json::to_value(store.list().await?)?;
        assert_eq!(listed, serde_json::json!([{"name": "Ann", "phone": 555, "fave_color": "blue"}]));

        let on_disk: serde_json::Value = serde_json::from_slice(&tokio::fs::read(store.path()).await?)?;
        assert_eq!(on_disk, serde_json::json!({"users": [{"name": "Ann", "phone": 555, "fave_color": "blue"}]}));
        cleanup(&store).await;
        Ok(())
    }

    #[tokio::test]
    async fn create_then_get_returns_equal_record() -> anyhow::Result<()> {
        let store = empty_store().await?;
        let u = User::new("Bea", 42, "green");
        store.create(u.clone()).await?;
        assert_eq!(store.get("Bea").await?, u);
        assert_eq!(store.get("bEA").await?, u);
        cleanup(&store).await;
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_create_conflicts_and_changes_nothing() -> anyhow::Result<()> {
        let store = empty_store().await?;
        store.create(User::new("Ann", 555, "blue")).await?;
        let before = store.list().await?;

        let err = store.create(User::new("ANN", 1, "red")).await;
        assert!(matches!(err, Err(ServiceError::Conflict(_))));
        assert_eq!(store.list().await?, before);
        cleanup(&store).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_in_place() -> anyhow::Result<()> {
        let store = store_with(serde_json::json!({"users": [
            {"name": "Ann", "phone": 1, "fave_color": "blue"},
            {"name": "Bob", "phone": 2, "fave_color": "red"}
        ]}))
        .await?;

        let replaced = store.update("ann", User::new("Ann", 9, "teal")).await?;
        assert_eq!(replaced, User::new("Ann", 9, "teal"));
        assert_eq!(store.list().await?, vec![User::new("Ann", 9, "teal"), User::new("Bob", 2, "red")]);
        cleanup(&store).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_is_not_found_and_unchanged() -> anyhow::Result<()> {
        let store = empty_store().await?;
        store.create(User::new("Ann", 555, "blue")).await?;
        let before = store.list().await?;

        let err = store.update("Zed", User::new("Zed", 1, "x")).await;
        assert!(matches!(err, Err(ServiceError::NotFound(_))));
        assert_eq!(store.list().await?, before);
        cleanup(&store).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_may_rename() -> anyhow::Result<()> {
        let store = empty_store().await?;
        store.create(User::new("Ann", 555, "blue")).await?;

        store.update("Ann", User::new("Bob", 555, "blue")).await?;
        assert!(matches!(store.get("Ann").await, Err(ServiceError::NotFound(_))));
        assert_eq!(store.get("bob").await?.phone, 555);
        cleanup(&store).await;
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() -> anyhow::Result<()> {
        let store = empty_store().await?;
        store.create(User::new("Ann", 555, "blue")).await?;

        store.delete("ANN").await?;
        assert!(matches!(store.get("Ann").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(store.delete("Ann").await, Err(ServiceError::NotFound(_))));
        cleanup(&store).await;
        Ok(())
    }

    #[tokio::test]
    async fn empty_name_is_a_model_error() -> anyhow::Result<()> {
        let store = empty_store().await?;
        let err = store.create(User::new("", 1, "red")).await;
        assert!(matches!(err, Err(ServiceError::Model(_))));
        assert!(store.list().await?.is_empty());
        cleanup(&store).await;
        Ok(())
    }

    #[tokio::test]
    async fn whitespace_name_is_accepted() -> anyhow::Result<()> {
        let store = empty_store().await?;
        store.create(User::new(" ", 1, "red")).await?;
        assert_eq!(store.get(" ").await?, User::new(" ", 1, "red"));
        cleanup(&store).await;
        Ok(())
    }

    #[tokio::test]
    async fn rename_onto_taken_name_is_allowed() -> anyhow::Result<()> {
        let store = store_with(serde_json::json!({"users": [
            {"name": "Ann", "phone": 1, "fave_color": "blue"},
            {"name": "Bob", "phone": 2, "fave_color": "red"}
        ]}))
        .await?;

        store.update("Ann", User::new("bob", 3, "green")).await?;
        assert_eq!(store.list().await?, vec![User::new("bob", 3, "green"), User::new("Bob", 2, "red")]);
        assert_eq!(store.get("BOB").await?.phone, 3);
        cleanup(&store).await;
        Ok(())
    }

    #[tokio::test]
    async fn missing_users_field_is_storage_error() -> anyhow::Result<()> {
        let store = store_with(serde_json::json!({"people": []})).await?;
        assert!(matches!(store.list().await, Err(ServiceError::Storage(_))));
        cleanup(&store).await;

        let gone = UserStore::new(std::env::temp_dir().join(format!("svc_users_gone_{}.json", Uuid::new_v4())));
        assert!(matches!(gone.list().await, Err(ServiceError::Storage(_))));
        Ok(())
    }

    #[test]
    fn layout_rejects_other_roots() {
        assert!(matches!(UsersLayout::split(serde_json::json!([])), Err(DocumentError::Shape(_))));
        assert!(matches!(UsersLayout::split(serde_json::json!({"users": {}})), Err(DocumentError::Shape(_))));
        let (_, items) = UsersLayout::split(serde_json::json!({"users": [1], "extra": true})).expect("users array");
        assert_eq!(UsersLayout.join(items), serde_json::json!({"users": [1]}));
    }
}
