//! Delete-then-recreate provisioning of the managed collections

use std::io::{self, Stdout, Write};

use log::{info, warn};

use crate::auth::Credentials;
use crate::collections::{CollectionId, CollectionRecord, CollectionsClient};
use crate::error::{Error, Result};
use crate::report;
use crate::schema::{self, CollectionSchema, COLLECTION_NAMES};
use crate::PocketBase;

/// Where a run currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Unauthenticated,
    Authenticated,
    Cleaning,
    Creating(String),
    Done,
    Aborted,
}

/// Result of a single create request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(CollectionId),
    Failed(String),
}

impl CreateOutcome {
    pub fn id(&self) -> Option<&CollectionId> {
        match self {
            CreateOutcome::Created(id) => Some(id),
            CreateOutcome::Failed(_) => None,
        }
    }
}

/// What a completed run did
#[derive(Debug, Clone, Default)]
pub struct ProvisionReport {
    /// Collections removed by the cleanup pass
    pub deleted: Vec<String>,

    /// Collections the cleanup pass could not remove
    pub failed_deletions: Vec<String>,

    /// Every attempted collection in creation order
    pub created: Vec<(String, CreateOutcome)>,
}

impl ProvisionReport {
    /// Identifier of `name` if it was created in this run
    pub fn id_of(&self, name: &str) -> Option<&CollectionId> {
        self.created
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, outcome)| outcome.id())
    }

    /// Whether every attempted collection was created
    pub fn is_complete(&self) -> bool {
        self.created
            .iter()
            .all(|(_, outcome)| matches!(outcome, CreateOutcome::Created(_)))
    }
}

/// Drives one provisioning run from credentials to the final report.
///
/// Narration goes to `W`, stdout unless built with [`Provisioner::with_output`].
pub struct Provisioner<'a, W = Stdout> {
    client: &'a PocketBase,
    collections: Option<CollectionsClient>,
    stage: Stage,
    report: ProvisionReport,
    out: W,
}

impl<'a> Provisioner<'a, Stdout> {
    pub fn new(client: &'a PocketBase) -> Self {
        Self::with_output(client, io::stdout())
    }
}

impl<'a, W: Write> Provisioner<'a, W> {
    pub fn with_output(client: &'a PocketBase, out: W) -> Self {
        Self {
            client,
            collections: None,
            stage: Stage::Unauthenticated,
            report: ProvisionReport::default(),
            out,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Authenticate, clean up, then create all five collections
    pub async fn run(mut self, credentials: &Credentials) -> Result<ProvisionReport> {
        self.authenticate(credentials).await?;
        writeln!(self.out)?;
        self.clean().await?;
        writeln!(self.out)?;
        self.create_all().await?;
        self.stage = Stage::Done;
        info!(
            "provisioning finished: {} deleted, {} created",
            self.report.deleted.len(),
            self.report.created.iter().filter(|(_, o)| o.id().is_some()).count()
        );
        Ok(self.report)
    }

    /// Obtain the admin token every later request needs
    pub async fn authenticate(&mut self, credentials: &Credentials) -> Result<()> {
        match self.client.authenticate_with(credentials, &mut self.out).await {
            Ok(collections) => {
                self.collections = Some(collections);
                self.stage = Stage::Authenticated;
                Ok(())
            }
            Err(e) => {
                self.stage = Stage::Aborted;
                Err(e)
            }
        }
    }

    /// Remove existing collections whose names are managed by this tool.
    ///
    /// A list or delete failure is reported and the run goes on; only a
    /// missing session is an error.
    pub async fn clean(&mut self) -> Result<()> {
        let collections = self.collections.as_ref().ok_or(Error::NotAuthenticated)?;
        self.stage = Stage::Cleaning;
        report::info(&mut self.out, "🗑️  Cleaning existing collections...")?;

        let existing = match collections.list().await {
            Ok(items) => items,
            Err(e) => {
                warn!("listing collections failed: {}", e);
                report::warning(
                    &mut self.out,
                    &format!("Could not fetch existing collections, skipping cleanup: {}", e),
                )?;
                Vec::new()
            }
        };

        for collection in deletion_order(existing) {
            report::info(&mut self.out, &format!("Deleting collection: {}", collection.name))?;
            match collections.delete(&collection.id).await {
                Ok(()) => {
                    report::success(&mut self.out, &format!("Deleted: {}", collection.name))?;
                    self.report.deleted.push(collection.name);
                }
                Err(e) => {
                    warn!("deleting {} failed: {}", collection.name, e);
                    let detail = e
                        .response_body()
                        .map(str::to_string)
                        .unwrap_or_else(|| e.to_string());
                    report::warning(
                        &mut self.out,
                        &format!("Could not delete {}: {}", collection.name, detail),
                    )?;
                    self.report.failed_deletions.push(collection.name);
                }
            }
        }

        report::success(&mut self.out, "Cleanup complete")?;
        Ok(())
    }

    /// Create the collections in dependency order.
    ///
    /// `users` and `messages` are required: every later schema relates to
    /// them. The rest only abort the run under the strict policy.
    pub async fn create_all(&mut self) -> Result<()> {
        report::info(&mut self.out, "📦 Creating collections...")?;
        writeln!(self.out)?;

        let users = self.create_required(schema::users()).await?;
        let messages = self.create_required(schema::messages(&users)).await?;

        self.create_optional(schema::slots(&users)).await?;
        self.create_optional(schema::blocked_users(&users)).await?;
        self.create_optional(schema::reports(&users, &messages)).await?;

        Ok(())
    }

    async fn create_required(&mut self, schema: CollectionSchema) -> Result<CollectionId> {
        let name = schema.name.clone();
        match self.submit(&schema).await {
            Ok(id) => Ok(id),
            Err(e) => {
                self.stage = Stage::Aborted;
                Err(Error::create_collection(&name, e))
            }
        }
    }

    async fn create_optional(&mut self, schema: CollectionSchema) -> Result<()> {
        let name = schema.name.clone();
        let Err(e) = self.submit(&schema).await else {
            return Ok(());
        };

        if self.client.config().strict {
            self.stage = Stage::Aborted;
            return Err(Error::create_collection(&name, e));
        }

        warn!("continuing without optional collection {}: {}", name, e);
        self.report.created.push((name, CreateOutcome::Failed(e.to_string())));
        Ok(())
    }

    /// One create request, narrated. Successes are recorded in the report.
    async fn submit(&mut self, schema: &CollectionSchema) -> Result<CollectionId> {
        let collections = self.collections.as_ref().ok_or(Error::NotAuthenticated)?;
        self.stage = Stage::Creating(schema.name.clone());
        report::info(&mut self.out, &format!("Creating collection: {}", schema.name))?;

        match collections.create(schema).await {
            Ok(record) => {
                let line = format!("Created: {} (ID: {})", schema.name, record.id);
                report::success(&mut self.out, &line)?;
                writeln!(self.out)?;
                self.report
                    .created
                    .push((schema.name.clone(), CreateOutcome::Created(record.id.clone())));
                Ok(record.id)
            }
            Err(e) => {
                report::error(&mut self.out, &format!("Failed to create {}", schema.name))?;
                match e.response_body() {
                    Some(body) => writeln!(self.out, "{}", body)?,
                    None => writeln!(self.out, "{}", e)?,
                }
                writeln!(self.out)?;
                Err(e)
            }
        }
    }
}

/// Managed collections present in `existing`, dependents first
fn deletion_order(existing: Vec<CollectionRecord>) -> Vec<CollectionRecord> {
    let rank = |name: &str| COLLECTION_NAMES.iter().position(|t| *t == name);

    let mut managed: Vec<(usize, CollectionRecord)> = existing
        .into_iter()
        .filter_map(|c| rank(&c.name).map(|r| (r, c)))
        .collect();
    managed.sort_by(|a, b| b.0.cmp(&a.0));
    managed.into_iter().map(|(_, c)| c).collect()
}
