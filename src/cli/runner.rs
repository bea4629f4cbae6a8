//! CLI runner - executes commands

use crate::auth::{CredentialStore, FileCredentialStore};
use crate::cli::commands::{AuthCommand, Cli, Commands, TimeRange};
use crate::client::Client;
use crate::config::{CallOptions, ClientConfig};
use crate::endpoints::{
    Endpoint, GetObjectGroupRequest, ListDriversRequest, ListFuelEventsRequest,
    ListObjectCoordinatesRequest, ListObjectGroupsRequest, ListObjectsLastPositionRequest,
    ListTripsRequest,
};
use crate::pagination::{Page, PageRequest};
use anyhow::{bail, Context};
use chrono::{Duration, Utc};
use futures::TryStreamExt;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tracing::info;

/// Page size the CLI asks for on list endpoints that accept one
const PAGE_LIMIT: u32 = 1000;

/// CLI runner
pub struct Runner {
    cli: Cli,
    store: Box<dyn CredentialStore>,
}

impl Runner {
    /// Create a runner backed by the XDG credential file
    pub fn new(cli: Cli) -> anyhow::Result<Self> {
        let store = FileCredentialStore::from_xdg()?;
        Ok(Self::with_store(cli, store))
    }

    /// Create a runner with an explicit credential store
    pub fn with_store(cli: Cli, store: impl CredentialStore + 'static) -> Self {
        Self {
            cli,
            store: Box::new(store),
        }
    }

    /// Run the CLI command
    pub async fn run(&self) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.run_to(&mut out).await
    }

    /// Run the CLI command, writing records to `out`
    pub async fn run_to(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        let now = Utc::now();
        match &self.cli.command {
            Commands::Auth(command) => self.auth(command, out),
            Commands::Objects => {
                let objects = self.client()?.list_objects(&CallOptions::new()).await?;
                write_records(out, &objects)
            }
            Commands::ObjectsLastPosition => {
                let request = ListObjectsLastPositionRequest {
                    limit: PAGE_LIMIT,
                    ..Default::default()
                };
                self.paginate(request, out).await
            }
            Commands::ObjectGroups => {
                self.paginate(ListObjectGroupsRequest::default(), out).await
            }
            Commands::ObjectGroup { id } => {
                let group = self
                    .client()?
                    .get_object_group(&GetObjectGroupRequest::new(id), &CallOptions::new())
                    .await?;
                write_records(out, &[group])
            }
            Commands::Coordinates {
                object_id,
                range,
                include_geozones,
                include_tire_parameters,
            } => {
                let request = ListObjectCoordinatesRequest {
                    limit: PAGE_LIMIT,
                    include_geozones: *include_geozones,
                    include_tire_parameters: *include_tire_parameters,
                    ..ListObjectCoordinatesRequest::new(object_id).between(
                        range.from.unwrap_or(now - Duration::hours(24)),
                        Some(range.to.unwrap_or(now)),
                    )
                };
                self.paginate(request, out).await
            }
            Commands::Trips { object_id, range } => {
                let request = ListTripsRequest::new(object_id)
                    .between(range.from.unwrap_or(now - Duration::hours(24)), range.to);
                self.paginate(request, out).await
            }
            Commands::FuelEvents { range, object_id } => {
                let TimeRange { from, to } = range;
                let request = ListFuelEventsRequest {
                    object_id: object_id.clone(),
                    from: Some(from.unwrap_or(now - Duration::days(7))),
                    to: Some(to.unwrap_or(now)),
                    ..Default::default()
                };
                self.paginate(request, out).await
            }
            Commands::Drivers => self.paginate(ListDriversRequest::default(), out).await,
        }
    }

    fn auth(&self, command: &AuthCommand, out: &mut dyn Write) -> anyhow::Result<()> {
        match command {
            AuthCommand::Login => {
                let api_key = match &self.cli.api_key {
                    Some(key) => key.clone(),
                    None => read_api_key()?,
                };
                if api_key.is_empty() {
                    bail!("API key must not be empty");
                }
                self.store.save(&api_key).context("failed to store API key")?;
                info!("Stored API key");
                writeln!(out, "Logged in to the TrustTrack API.")?;
            }
            AuthCommand::Logout => {
                self.store.clear().context("failed to remove API key")?;
                writeln!(out, "Logged out.")?;
            }
            AuthCommand::Status => {
                let status = if self.store.load()?.is_some() {
                    "logged in"
                } else {
                    "logged out"
                };
                writeln!(out, "{status}")?;
            }
        }
        Ok(())
    }

    fn client(&self) -> anyhow::Result<Client> {
        let api_key = match &self.cli.api_key {
            Some(key) => key.clone(),
            None => self
                .store
                .load()?
                .context("no API key; run `trusttrack auth login` or pass --api-key")?,
        };
        let config = ClientConfig::builder()
            .base_url(&self.cli.base_url)
            .api_key(api_key)
            .debug(self.cli.debug)
            .build();
        Ok(Client::new(config)?)
    }

    /// Follow continuation tokens to the end, printing records as they arrive
    async fn paginate<R>(&self, request: R, out: &mut dyn Write) -> anyhow::Result<()>
    where
        R: PageRequest + Endpoint<Output = Page<<R as PageRequest>::Item>>,
        R::Item: Serialize,
    {
        let client = self.client()?;
        let paginator = client.paginate(request, CallOptions::new());
        let mut pages = Box::pin(paginator.into_stream());
        while let Some(page) = pages.try_next().await? {
            write_records(out, &page.items)?;
        }
        Ok(())
    }
}

fn write_records<T: Serialize>(out: &mut dyn Write, records: &[T]) -> anyhow::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn read_api_key() -> anyhow::Result<String> {
    eprintln!("Enter API key:");
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read API key from stdin")?;
    Ok(line.trim().to_string())
}
