use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Where a verified registration goes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    PassSelection,
    Congratulations,
    Reject,
}

/// What to do when a registration code resolves to no passes at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCatalogPolicy {
    #[default]
    Reject,
    Advance,
}

impl fmt::Display for EmptyCatalogPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyCatalogPolicy::Reject => f.write_str("reject"),
            EmptyCatalogPolicy::Advance => f.write_str("advance"),
        }
    }
}

impl FromStr for EmptyCatalogPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(EmptyCatalogPolicy::Reject),
            "advance" => Ok(EmptyCatalogPolicy::Advance),
            other => Err(format!(
                "unknown empty catalog policy '{other}' (expected 'reject' or 'advance')"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoutingPolicy {
    pub empty_catalog: EmptyCatalogPolicy,
}

impl RoutingPolicy {
    pub fn new(empty_catalog: EmptyCatalogPolicy) -> Self {
        Self { empty_catalog }
    }

    pub fn decide(&self, count: usize) -> Route {
        match count {
            0 => match self.empty_catalog {
                EmptyCatalogPolicy::Reject => Route::Reject,
                EmptyCatalogPolicy::Advance => Route::Congratulations,
            },
            1 => Route::Congratulations,
            _ => Route::PassSelection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn many_passes_need_a_selection() {
        let policy = RoutingPolicy::default();
        assert_eq!(policy.decide(2), Route::PassSelection);
        assert_eq!(policy.decide(3), Route::PassSelection);
    }

    #[test]
    fn single_pass_skips_selection() {
        assert_eq!(RoutingPolicy::default().decide(1), Route::Congratulations);
    }

    #[test]
    fn empty_catalog_follows_policy() {
        assert_eq!(RoutingPolicy::default().decide(0), Route::Reject);
        assert_eq!(
            RoutingPolicy::new(EmptyCatalogPolicy::Advance).decide(0),
            Route::Congratulations
        );
    }

    #[test]
    fn parses_policy_names_case_insensitively() {
        assert_eq!(
            " Advance ".parse::<EmptyCatalogPolicy>(),
            Ok(EmptyCatalogPolicy::Advance)
        );
        assert!("skip".parse::<EmptyCatalogPolicy>().is_err());
    }
}
