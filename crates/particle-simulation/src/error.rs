use thiserror::Error;

/// Errors raised while constructing a simulation.
///
/// Ticks never fail; every runtime condition is absorbed locally.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = SimError::InvalidConfig("capacity must be > 0".to_string());
        let msg = e.to_string();
        assert!(msg.contains("invalid configuration"));
        assert!(msg.contains("capacity"));
    }
}
