//! Pool option validation and defaults
//!
//! Pool bounds are never rejected: an inverted `minPoolSize`/`maxPoolSize`
//! pair is corrected and reported through a warning event.
//!
//! # Example
//!
//! ```
//! use doclink_connection::pool::validate_pool_options;
//! use doclink_core::PoolOptions;
//!
//! let options = PoolOptions::new().with_min_pool_size(10).with_max_pool_size(4);
//! let validated = validate_pool_options(Some(&options));
//!
//! assert_eq!(validated.min_pool_size, Some(2));
//! assert_eq!(validated.max_pool_size, Some(4));
//! ```

mod defaults;
mod validate;


pub use defaults::PoolDefaults;
pub use validate::validate_pool_options;

use doclink_core::PoolOptions;

/// Compute the options a connection attempt actually uses.
///
/// Validates the caller's options, fills unset fields from `defaults`, then
/// validates again since a default may now sit on the wrong side of a
/// caller-provided bound.
pub fn resolve_pool_options(
    options: Option<&PoolOptions>,
    defaults: &PoolDefaults,
) -> PoolOptions {
    let defaulted = defaults.apply(validate_pool_options(options));
    validate_pool_options(Some(&defaulted))
}
