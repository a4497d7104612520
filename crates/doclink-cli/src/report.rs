//! Terminal tables for command output

use comfy_table::Table;
use doclink_connection::reconnect::redact_uri;
use doclink_connection::{ConnectionSettings, PoolDefaults, RetryPolicy, resolve_pool_options};
use doclink_core::ConnectionAttemptResult;
use indexmap::IndexMap;

/// Per-key outcome of a `connect` run
pub fn connect_results(results: &IndexMap<String, ConnectionAttemptResult>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Connection", "Status", "Detail"]);

    for (key, result) in results {
        let (status, detail) = match result {
            Ok(handle) => ("connected", redact_uri(handle.uri())),
            Err(error) => ("failed", error.to_string()),
        };
        table.add_row(vec![key.clone(), status.to_string(), detail]);
    }
    table
}

/// Effective pool and retry settings per key, as a registry with `defaults`
/// would use them
pub fn effective_settings(settings: &ConnectionSettings, defaults: &PoolDefaults) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Connection",
        "URI",
        "Pool (min/max)",
        "Server selection (ms)",
        "Socket (ms)",
        "Attempts",
        "Backoff",
    ]);

    for (key, config) in &settings.connections {
        let options = resolve_pool_options(config.options.as_ref(), defaults);
        let policy = RetryPolicy::merged(config.retry.as_ref());
        table.add_row(vec![
            key.clone(),
            redact_uri(&config.uri),
            format!(
                "{}/{}",
                display(options.min_pool_size),
                display(options.max_pool_size)
            ),
            display(options.server_selection_timeout_ms),
            display(options.socket_timeout_ms),
            policy.max_attempts().to_string(),
            format!(
                "{}ms x{}",
                policy.base_interval().as_millis(),
                policy.backoff_factor()
            ),
        ]);
    }
    table
}

fn display<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
