pub(crate) const DEFAULT_USER_AGENT: &str = concat!("apiprof/", env!("CARGO_PKG_VERSION"));

/// Collections profiled when neither the CLI nor the config names any.
pub(crate) const DEFAULT_ENDPOINTS: [&str; 13] = [
    "/cluster",
    "/consistencygroup",
    "/logicalgroup",
    "/jobstatus",
    "/application",
    "/slt",
    "/slp",
    "/host",
    "/user",
    "/role",
    "/org",
    "/diskpool",
    "/backup",
];

/// Path segment under which every appliance resource lives.
pub(crate) const DEFAULT_ROOT_SEGMENT: &str = "actifio";

pub(crate) const DEFAULT_OUTPUT_PATH: &str = "apiprof_results.json";

pub(super) const DEFAULT_ITERATIONS: &str = "10";
pub(super) const DEFAULT_REQUEST_TIMEOUT: &str = "60s";
pub(super) const DEFAULT_CONNECT_TIMEOUT: &str = "10s";
pub(super) const DEFAULT_EXPORT_RETRY_DELAY: &str = "100s";
