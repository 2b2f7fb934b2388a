//! End-to-end tests against a live MongoDB instance.
//!
//! These are ignored by default; run them with a local server:
//!
//! ```bash
//! cargo test -- --ignored
//! ```
//!
//! The URI can be overridden with the `QUICKDB_TEST_URI` environment
//! variable. The transaction test additionally needs a replica set.

use quickdb::{
    get_field, Database, Document, FieldMap, FieldValue, FindOptions, ObjectId, Query, Update,
};

const DEFAULT_URI: &str = "mongodb://localhost:27017";
const TEST_DB: &str = "quickdb_test_db";

fn test_uri() -> String {
    std::env::var("QUICKDB_TEST_URI").unwrap_or_else(|_| DEFAULT_URI.to_string())
}

#[derive(Debug, Clone, PartialEq)]
struct User {
    id: ObjectId,
    name: String,
    age: i32,
    tags: Vec<String>,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: ObjectId::from_bytes([0u8; 12]),
            name: String::new(),
            age: 0,
            tags: Vec::new(),
        }
    }
}

impl Document for User {
    fn to_fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("name".to_string(), FieldValue::from(self.name.clone()));
        fields.insert("age".to_string(), FieldValue::from(self.age));
        fields.insert("tags".to_string(), FieldValue::from(self.tags.clone()));
        fields
    }

    fn from_fields(&mut self, fields: &FieldMap) {
        if let Some(name) = get_field(fields, "name") {
            self.name = name;
        }
        if let Some(age) = get_field(fields, "age") {
            self.age = age;
        }
        if let Some(tags) = get_field(fields, "tags") {
            self.tags = tags;
        }
    }

    fn id(&self) -> ObjectId {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }
}

fn user(name: &str, age: i32) -> User {
    User {
        name: name.to_string(),
        age,
        ..User::default()
    }
}

#[tokio::test]
#[ignore = "requires a running MongoDB instance"]
async fn test_crud_cycle() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("quickdb=debug")
        .try_init()
        .ok();

    let db = Database::connect(&test_uri()).await?;
    let users = db.collection::<User>(TEST_DB, "users_crud");
    users.delete_many(&Query::new()).await?;

    // create
    let mut alice = user("Alice", 30);
    assert_eq!(users.create_one(&mut alice).await?, 1);
    assert_ne!(alice.id(), ObjectId::from_bytes([0u8; 12]));

    let mut batch = vec![user("Bob", 25), user("Carol", 35)];
    assert_eq!(users.create_many(&mut batch).await?, 2);

    // read
    let found = users.find_one(&Query::by_id(alice.id())).await?;
    assert_eq!(found.as_ref().map(|u| u.name.as_str()), Some("Alice"));

    let adults = users
        .find_many_with_options(
            &Query::new().gte("age", 30),
            &FindOptions::new().sort("age", 1),
        )
        .await?;
    assert_eq!(adults.len(), 2);
    assert_eq!(adults[0].name, "Alice");

    assert_eq!(users.count_documents(&Query::new()).await?, 3);

    // update
    let modified = users
        .update_one(
            &Query::by_id(alice.id()),
            &Update::new().set("age", 31).push("tags", "admin"),
        )
        .await?;
    assert_eq!(modified, 1);
    let alice = users.find_one(&Query::by_id(alice.id())).await?.unwrap();
    assert_eq!(alice.age, 31);
    assert_eq!(alice.tags, vec!["admin".to_string()]);

    // delete
    assert_eq!(users.delete_one(&Query::by_id(alice.id())).await?, 1);
    assert_eq!(users.delete_many(&Query::new()).await?, 2);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running MongoDB instance"]
async fn test_aggregation_and_indexes() -> Result<(), Box<dyn std::error::Error>> {
    use quickdb::{Aggregation, DocumentBuilder};

    let db = Database::connect(&test_uri()).await?;
    let users = db.collection::<User>(TEST_DB, "users_agg");
    users.delete_many(&Query::new()).await?;

    let mut batch = vec![user("Ann", 20), user("Ben", 40), user("Cy", 60)];
    users.create_many(&mut batch).await?;

    let pipeline = Aggregation::new()
        .match_stage(&Query::new().gt("age", 25))
        .sort(&DocumentBuilder::new().field("age", -1))
        .limit(1);
    let top: Vec<User> = users.aggregate(&pipeline).await?;
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].name, "Cy");

    let index_name = users.create_index("age", true).await?;
    assert!(users.list_index_names().await?.contains(&index_name));
    users.drop_index(&index_name).await?;

    users.delete_many(&Query::new()).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running MongoDB instance"]
async fn test_gridfs_cycle() -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&test_uri()).await?;
    let bucket = db.gridfs(TEST_DB);

    let dir = tempfile::tempdir()?;
    let source_path = dir.path().join("source.tmp");
    let dest_path = dir.path().join("dest.tmp");
    let original_content = b"Hello, GridFS!\nThis is a test file with multiple lines.\r\nAnd special chars.";
    tokio::fs::write(&source_path, original_content).await?;

    let file_id = bucket.upload_from_file("test_file.txt", &source_path).await?;
    bucket.download_to_file(file_id, &dest_path).await?;

    let downloaded = tokio::fs::read(&dest_path).await?;
    assert_eq!(downloaded, original_content);

    bucket.delete(file_id).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a MongoDB replica set"]
async fn test_transaction_commit_and_abort() -> Result<(), Box<dyn std::error::Error>> {
    use futures::FutureExt;

    let db = Database::connect(&test_uri()).await?;
    let users = db.collection::<User>(TEST_DB, "users_txn");
    users.delete_many(&Query::new()).await?;

    // Committed transaction makes its writes visible.
    db.with_transaction(&users, |users, session| {
        async move {
            let mut u = user("InTxn", 1);
            users.create_one_with_session(&mut u, session).await?;
            Ok(())
        }
        .boxed()
    })
    .await?;
    assert_eq!(users.count_documents(&Query::new()).await?, 1);

    // Aborted transaction leaves no trace.
    let result = db
        .with_transaction(&users, |users, session| {
            async move {
                let mut u = user("Ghost", 2);
                users.create_one_with_session(&mut u, session).await?;
                Err(quickdb::Error::Transaction("forced rollback".to_string()))
            }
            .boxed()
        })
        .await;
    assert!(result.is_err());
    assert_eq!(users.count_documents(&Query::new()).await?, 1);

    users.delete_many(&Query::new()).await?;
    Ok(())
}
