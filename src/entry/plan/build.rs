use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::ArgMatches;

use crate::args::{DEFAULT_ENDPOINTS, ProfilerArgs};
use crate::config::{apply_config, load_config};
use crate::error::{AppError, AppResult, ValidationError};
use crate::probe::RepeatPlan;
use crate::run::{RunSettings, VersionSource};
use crate::sinks::ExportSettings;
use crate::transport::ClientConfig;

use super::types::RunPlan;

pub(in crate::entry) fn build_plan(mut args: ProfilerArgs, matches: &ArgMatches) -> AppResult<RunPlan> {
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, &config)?;
    }

    let host = required(args.host.take(), ValidationError::MissingHost)?;
    let username = required(args.username.take(), ValidationError::MissingUsername)?;
    let password = args
        .password
        .take()
        .filter(|password| !password.is_empty())
        .ok_or_else(|| {
            tracing::error!("Missing password.");
            AppError::validation(ValidationError::MissingPassword)
        })?;

    let endpoints = resolve_endpoints(std::mem::take(&mut args.endpoints))?;

    let version = args
        .pinned_version
        .take()
        .map_or(VersionSource::Query, VersionSource::Pinned);

    let export = args.export_csv.take().map(|dir| ExportSettings {
        dir: PathBuf::from(dir),
        include_header: args.include_header,
        retries: args.export_retries,
        retry_delay: args.export_retry_delay,
    });

    Ok(RunPlan {
        client: ClientConfig {
            scheme: args.scheme.as_str(),
            host,
            root_segment: args.root_segment.clone(),
            username,
            password,
            request_timeout: args.request_timeout,
            connect_timeout: args.connect_timeout,
            insecure: args.insecure,
        },
        settings: RunSettings {
            endpoints,
            plan: RepeatPlan {
                iterations: args.iterations,
                warmup_calls: args.warmup_calls,
                policy: args.reduction,
                root_segment: args.root_segment,
            },
            version,
        },
        output: PathBuf::from(args.output),
        export,
        runs: args.runs.get(),
    })
}

fn required(value: Option<String>, missing: ValidationError) -> AppResult<String> {
    match value.map(|value| value.trim().to_owned()) {
        Some(value) if !value.is_empty() => Ok(value),
        Some(_) | None => {
            tracing::error!("{}", missing);
            Err(AppError::validation(missing))
        }
    }
}

/// Falls back to the built-in set when none is configured; rejects repeats.
fn resolve_endpoints(endpoints: Vec<String>) -> AppResult<Vec<String>> {
    if endpoints.is_empty() {
        return Ok(DEFAULT_ENDPOINTS
            .iter()
            .map(|endpoint| (*endpoint).to_owned())
            .collect());
    }
    let mut seen = BTreeSet::new();
    for endpoint in &endpoints {
        if !seen.insert(endpoint.as_str()) {
            return Err(AppError::validation(ValidationError::DuplicateEndpoint {
                value: endpoint.clone(),
            }));
        }
    }
    Ok(endpoints)
}
