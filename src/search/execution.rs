//! Execution policy for ranking, matching and removal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SieveError};

/// How an operation spreads its work.
///
/// `Sequential` runs entirely on the calling thread. `Parallel` splits the
/// work over the index's worker pool and blocks until all of it is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    Parallel,
}

impl fmt::Display for ExecutionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionPolicy::Sequential => f.write_str("sequential"),
            ExecutionPolicy::Parallel => f.write_str("parallel"),
        }
    }
}

impl FromStr for ExecutionPolicy {
    type Err = SieveError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sequential" | "seq" => Ok(ExecutionPolicy::Sequential),
            "parallel" | "par" => Ok(ExecutionPolicy::Parallel),
            other => Err(SieveError::invalid_argument(format!(
                "unknown execution policy '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sequential() {
        assert_eq!(ExecutionPolicy::default(), ExecutionPolicy::Sequential);
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!(
            "par".parse::<ExecutionPolicy>().unwrap(),
            ExecutionPolicy::Parallel
        );
        assert_eq!(ExecutionPolicy::Parallel.to_string(), "parallel");
        assert!("threads".parse::<ExecutionPolicy>().is_err());
    }
}
