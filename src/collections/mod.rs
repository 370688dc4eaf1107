//! Collection listing, deletion and creation

mod types;

use std::io::Write;
use std::path::Path;

use log::{debug, info};
use reqwest::{Client, StatusCode};

use crate::auth::AdminSession;
use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::report;
use crate::schema::CollectionSchema;

pub use types::*;

/// Large enough that a single page holds every collection of a normal instance
const LIST_PAGE_SIZE: &str = "500";

/// Client for `/api/collections`, authorized by an admin session
pub struct CollectionsClient {
    url: String,
    client: Client,
    session: AdminSession,
}

impl CollectionsClient {
    pub(crate) fn new(url: &str, client: Client, session: AdminSession) -> Self {
        Self {
            url: url.to_string(),
            client,
            session,
        }
    }

    fn collections_url(&self) -> String {
        format!("{}/api/collections", self.url)
    }

    /// Fetch every collection, in server order
    pub async fn list(&self) -> Result<Vec<CollectionRecord>> {
        let page = Fetch::get(&self.client, &self.collections_url())
            .admin_auth(self.session.token())?
            .query("perPage", LIST_PAGE_SIZE)
            .execute::<CollectionList>()
            .await?;

        debug!("listed {} of {} collections", page.items.len(), page.total_items);
        Ok(page.items)
    }

    /// First collection whose name matches exactly
    pub async fn find_by_name(&self, name: &str) -> Result<Option<CollectionRecord>> {
        let items = self.list().await?;
        Ok(items.into_iter().find(|c| c.name == name))
    }

    /// Delete a collection. Only 200 and 204 count as success.
    pub async fn delete(&self, id: &CollectionId) -> Result<()> {
        let url = format!("{}/{}", self.collections_url(), id);

        let response = Fetch::delete(&self.client, &url)
            .admin_auth(self.session.token())?
            .execute_raw()
            .await?;

        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
            status => {
                let body = response.text().await?;
                Err(Error::api(status, body))
            }
        }
    }

    /// Submit a schema and return the record the server created
    pub async fn create(&self, schema: &CollectionSchema) -> Result<CollectionRecord> {
        let record = Fetch::post(&self.client, &self.collections_url())
            .admin_auth(self.session.token())?
            .json(schema)?
            .execute::<CollectionRecord>()
            .await?;

        info!("created collection {} ({})", record.name, record.id);
        Ok(record)
    }
}

/// Look up the `users` collection and persist its identifier to `path`,
/// narrating to `out`.
///
/// Returns `None` without touching the file when no `users` collection exists.
pub async fn lookup_users_id<W: Write>(
    collections: &CollectionsClient,
    path: &Path,
    out: &mut W,
) -> Result<Option<CollectionId>> {
    let Some(users) = collections.find_by_name("users").await? else {
        report::warning(out, "No users collection found")?;
        return Ok(None);
    };

    writeln!(out, "Users collection ID: {}", users.id)?;
    report::save_collection_id(path, &users.id).await?;
    writeln!(out, "Saved to {}", path.display())?;

    Ok(Some(users.id))
}
