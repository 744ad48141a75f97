// Domain constants (No magic values)

/// `data` key under which callers attach request context for the sink
pub const REQUEST_DATA_KEY: &str = "req";

/// `data` key holding the queue name of worker errors
pub const QUEUE_DATA_KEY: &str = "queue";

/// `data` key holding the job payload of worker errors
pub const JOB_DATA_KEY: &str = "job";

/// `data` key referencing the sink failure on a reporting-failed error
pub const ORIGINAL_ERROR_DATA_KEY: &str = "originalError";

/// Message of the error handed to a pipeline when reporting itself failed
pub const REPORTING_FAILED_MESSAGE: &str = "Unable to report";

/// Status assumed for route errors built without one
pub const DEFAULT_ROUTE_STATUS: u16 = 500;

/// Route errors at or above this status are reported as `error`, below as `warn`
pub const SERVER_ERROR_STATUS: u16 = 500;
