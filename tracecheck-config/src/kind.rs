//! Event kinds the validator knows how to check.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One kind of committed action in the execution log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    BondFormation,
    BondBreak,
    Deposition,
    Diffusion,
    MonoDesorption,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::BondFormation,
        EventKind::BondBreak,
        EventKind::Deposition,
        EventKind::Diffusion,
        EventKind::MonoDesorption,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::BondFormation => "bond_formation",
            EventKind::BondBreak => "bond_break",
            EventKind::Deposition => "deposition",
            EventKind::Diffusion => "diffusion",
            EventKind::MonoDesorption => "mono_desorption",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("unknown event kind '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kebab_and_snake_case() {
        assert_eq!(
            "bond-formation".parse::<EventKind>(),
            Ok(EventKind::BondFormation)
        );
        assert_eq!(
            "MONO_DESORPTION".parse::<EventKind>(),
            Ok(EventKind::MonoDesorption)
        );
        assert!("teleport".parse::<EventKind>().is_err());
    }

    #[test]
    fn display_matches_serde_name() {
        for kind in EventKind::ALL {
            let yaml = format!("{kind}");
            assert_eq!(yaml.parse::<EventKind>(), Ok(kind));
        }
    }
}
