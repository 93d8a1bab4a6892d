//! Result type alias for dbfanout

use super::errors::FanoutError;

/// Result type alias for dbfanout operations
///
/// # Examples
///
/// ```
/// use dbfanout::domain::result::Result;
/// use dbfanout::domain::errors::FanoutError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(FanoutError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, FanoutError>;
