//! CLI runner - executes commands

use crate::analytics::{analytics_request, fetch_report, ApiVersion};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpExecutor};
use crate::loader::{load_job, JobDefinition, PaginationDefinition};
use crate::node::{NodeParameters, ParameterResolver};
use crate::request::{parse_and_set_body_json, RequestOptions};
use crate::types::JsonValue;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Run { job, format } => self.run_file(job, *format).await,
            Commands::Validate { job } => self.validate(job),
        }
    }

    async fn run_file(&self, path: &Path, format: OutputFormat) -> Result<()> {
        let job = load_job(path)?;
        let started = Instant::now();
        let items = run_job(&job).await?;

        info!(
            node = %job.node,
            items = items.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Job finished"
        );

        for item in &items {
            print_value(item, format)?;
        }
        Ok(())
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let job = load_job(path)?;
        let kind = match job.pagination {
            PaginationDefinition::Cursor { .. } => "cursor",
            PaginationDefinition::Analytics { .. } => "analytics",
        };
        println!("Job for node '{}' is valid ({kind} pagination)", job.node);
        Ok(())
    }
}

/// Run one job and return the fetched items
///
/// Cursor jobs yield the raw list items. Analytics jobs yield the report
/// output shaped by the node's `simple` parameter.
pub async fn run_job(job: &JobDefinition) -> Result<Vec<JsonValue>> {
    let params = job.node_parameters();

    match &job.pagination {
        PaginationDefinition::Cursor { .. } => {
            let paginator = job
                .pagination
                .cursor_paginator()
                .ok_or_else(|| Error::config("Cursor pagination is not configured"))?;
            let template = prepare_request(job, &params, job.request.to_request_options())?;
            let executor = build_executor(job, job.base_url.as_deref())?;

            let items = paginator.fetch_all(&executor, &params, &template).await?;
            Ok(items.into_iter().map(|item| item.json).collect())
        }
        PaginationDefinition::Analytics { property_name } => {
            let version = ApiVersion::from_parameter(&params.str_parameter("apiVersion", "v4")?);
            let template = prepare_request(job, &params, analytics_template(job, version))?;
            let executor = build_executor(job, None)?;

            fetch_report(&executor, &params, property_name, &template).await
        }
    }
}

/// Analytics request for a job
///
/// A job-level `base_url` replaces the API's own base URL, which lets a job
/// point at a proxy or a local mock.
fn analytics_template(job: &JobDefinition, version: ApiVersion) -> RequestOptions {
    let uri = job.request.uri.clone().or_else(|| {
        job.base_url
            .as_ref()
            .map(|base| format!("{}{}", base.trim_end_matches('/'), job.request.endpoint))
    });

    let mut request = analytics_request(
        version,
        job.request.method,
        &job.request.endpoint,
        job.request.body.clone(),
        job.request.query.clone(),
        uri.as_deref(),
    );
    for (key, value) in &job.request.headers {
        request = request.with_header(key, value);
    }
    request
}

/// Apply the job's JSON body parameter, if any
fn prepare_request(
    job: &JobDefinition,
    params: &NodeParameters,
    request: RequestOptions,
) -> Result<RequestOptions> {
    match &job.request.body_parameter {
        Some(name) => {
            parse_and_set_body_json(request, params, name, job.request.body_property.as_deref())
        }
        None => Ok(request),
    }
}

fn build_executor(job: &JobDefinition, base_url: Option<&str>) -> Result<HttpExecutor> {
    let client = HttpClient::with_config(job.http.client_config(base_url))?;
    Ok(HttpExecutor::new(client, job.node.clone()))
}

fn print_value(value: &JsonValue, format: OutputFormat) -> Result<()> {
    let line = match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
    };
    println!("{line}");
    Ok(())
}
