//! Pool size validation

use doclink_core::PoolOptions;

/// Normalize pool options before they reach a connector.
///
/// Absent options yield empty options. When both bounds are present and
/// `min_pool_size > max_pool_size`, a warning is emitted and the minimum is
/// replaced by half the maximum (rounded down). Every other field passes
/// through unchanged.
pub fn validate_pool_options(options: Option<&PoolOptions>) -> PoolOptions {
    let Some(options) = options else {
        return PoolOptions::default();
    };

    let mut validated = options.clone();

    if let (Some(min), Some(max)) = (validated.min_pool_size, validated.max_pool_size)
        && min > max
    {
        let adjusted = max / 2;
        tracing::warn!(
            min_pool_size = min,
            max_pool_size = max,
            adjusted_min_pool_size = adjusted,
            "minPoolSize cannot be greater than maxPoolSize, adjusting"
        );
        validated.min_pool_size = Some(adjusted);
    }

    validated
}
