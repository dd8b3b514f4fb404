use anyhow::{anyhow, Context};
use async_trait::async_trait;
use futures::TryStreamExt;
use mockall::automock;
use mongodb::{
    bson::{doc, Document},
    Client, Database,
};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MongoCredentials {
    pub uri: String,
    #[serde(default = "default_database")]
    pub database: String,
}

fn default_database() -> String {
    String::from("pantry")
}

#[automock]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads every document of a collection.
    /// Returns Err if the read fails, Ok(empty vec) if the collection is empty.
    async fn list_documents(&self, collection: &str) -> anyhow::Result<Vec<Document>>;

    /// Appends one document to a collection.
    /// Returns the id assigned to the new document.
    async fn insert_document(&self, collection: &str, document: Document)
        -> anyhow::Result<String>;
}

pub struct MongoDocumentStore {
    database: Database,
}

impl MongoDocumentStore {
    pub async fn connect(credentials: &MongoCredentials) -> anyhow::Result<Self> {
        let client = Client::with_uri_str(&credentials.uri)
            .await
            .with_context(|| "error initializing mongodb client")?;
        let database = client.database(&credentials.database);

        // The driver connects lazily, ping so bad credentials fail at startup
        database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .with_context(|| format!("error connecting to database {}", credentials.database))?;
        info!("connected to database {}", credentials.database);

        Ok(Self { database })
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    async fn list_documents(&self, collection: &str) -> anyhow::Result<Vec<Document>> {
        let cursor = self
            .database
            .collection::<Document>(collection)
            .find(None, None)
            .await
            .map_err(|e| anyhow!("error querying {collection}: {e}"))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("error iterating {collection}: {e}"))
    }

    async fn insert_document(
        &self,
        collection: &str,
        document: Document,
    ) -> anyhow::Result<String> {
        let result = self
            .database
            .collection::<Document>(collection)
            .insert_one(document, None)
            .await
            .map_err(|e| anyhow!("error inserting into {collection}: {e}"))?;

        match result.inserted_id.as_object_id() {
            Some(id) => Ok(id.to_hex()),
            None => Ok(result.inserted_id.to_string()),
        }
    }
}
