use clap::{CommandFactory, FromArgMatches};

use super::build_plan;
use super::types::RunPlan;
use crate::args::ProfilerArgs;
use crate::error::{AppError, AppResult, ValidationError};
use crate::record::ReductionPolicy;
use crate::run::VersionSource;

fn plan_from(argv: &[&str]) -> AppResult<RunPlan> {
    let matches = ProfilerArgs::command().try_get_matches_from(argv)?;
    let args = ProfilerArgs::from_arg_matches(&matches)?;
    build_plan(args, &matches)
}

const CREDENTIALS: [&str; 7] = [
    "apiprof", "--host", "10.0.0.5", "--username", "admin", "--password", "secret",
];

#[test]
fn defaults_cover_the_builtin_endpoint_set() -> AppResult<()> {
    let plan = plan_from(&CREDENTIALS)?;
    if plan.settings.endpoints.len() != 13
        || plan.settings.endpoints.first().map(String::as_str) != Some("/cluster")
    {
        return Err(AppError::validation(format!(
            "Unexpected endpoints: {:?}",
            plan.settings.endpoints
        )));
    }
    if plan.settings.version != VersionSource::Query || plan.export.is_some() || plan.runs != 1 {
        return Err(AppError::validation("Unexpected defaults"));
    }
    if plan.client.scheme != "https" || plan.settings.plan.root_segment != "actifio" {
        return Err(AppError::validation("Unexpected connection defaults"));
    }
    Ok(())
}

#[test]
fn options_flow_into_the_plan() -> AppResult<()> {
    let mut argv = CREDENTIALS.to_vec();
    argv.extend([
        "-e", "/host", "-e", "/slt", "-n", "3", "--reduction", "raw", "--pin-version", "9.0.1",
        "--export-csv", "csv", "--runs", "2", "--scheme", "http",
    ]);
    let plan = plan_from(&argv)?;
    if plan.settings.endpoints != ["/host", "/slt"] {
        return Err(AppError::validation("Unexpected endpoints"));
    }
    if plan.settings.plan.iterations != 3 || plan.settings.plan.policy != ReductionPolicy::Raw {
        return Err(AppError::validation("Unexpected repeat plan"));
    }
    if plan.settings.version != VersionSource::Pinned("9.0.1".to_owned()) {
        return Err(AppError::validation("Expected pinned version"));
    }
    let export = plan
        .export
        .ok_or_else(|| AppError::validation("Expected export settings"))?;
    if export.retries != 1 || export.include_header {
        return Err(AppError::validation("Unexpected export defaults"));
    }
    if plan.runs != 2 || plan.client.scheme != "http" {
        return Err(AppError::validation("Unexpected runs/scheme"));
    }
    Ok(())
}

#[test]
fn duplicate_endpoints_are_rejected() -> AppResult<()> {
    let mut argv = CREDENTIALS.to_vec();
    argv.extend(["-e", "/host", "-e", "/host"]);
    match plan_from(&argv) {
        Err(AppError::Validation(ValidationError::DuplicateEndpoint { value })) if value == "/host" => {
            Ok(())
        }
        other => Err(AppError::validation(format!(
            "Expected duplicate endpoint, got {:?}",
            other.map(|plan| plan.settings.endpoints)
        ))),
    }
}

#[test]
fn missing_host_is_reported() -> AppResult<()> {
    if std::env::var_os("APIPROF_HOST").is_some() {
        return Ok(());
    }
    match plan_from(&["apiprof", "--username", "admin", "--password", "secret"]) {
        Err(AppError::Validation(ValidationError::MissingHost)) => Ok(()),
        other => Err(AppError::validation(format!(
            "Expected missing host, got {:?}",
            other.map(|plan| plan.client.host)
        ))),
    }
}

#[test]
fn config_file_supplies_credentials() -> AppResult<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("profile.toml");
    std::fs::write(
        &path,
        "host = \"appliance.local\"\nusername = \"ops\"\npassword = \"pw\"\nendpoints = [\"/org\"]\n",
    )?;
    let config = path.to_string_lossy().into_owned();
    let plan = plan_from(&["apiprof", "--config", &config])?;
    if plan.client.host != "appliance.local" || plan.settings.endpoints != ["/org"] {
        return Err(AppError::validation(format!(
            "Config not applied: {} {:?}",
            plan.client.host, plan.settings.endpoints
        )));
    }
    Ok(())
}
