use crate::error::{Result, SquaireError};
use serde::{Deserialize, Serialize};

/// Prefix shared by every tier that counts as a small screen.
pub const SMALL_PREFIX: &str = "small";

/// A named width tier. `below` is the exclusive upper bound in pixels;
/// `None` means unbounded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub name: String,
    #[serde(default)]
    pub below: Option<f32>,
}

impl Breakpoint {
    pub fn new(name: &str, below: Option<f32>) -> Self {
        Self {
            name: name.to_string(),
            below,
        }
    }
}

/// Ascending table of tiers ending in an unbounded one.
#[derive(Clone, Debug, PartialEq)]
pub struct Breakpoints(Vec<Breakpoint>);

impl Breakpoints {
    pub fn new(tiers: Vec<Breakpoint>) -> Result<Self> {
        let Some((last, bounded)) = tiers.split_last() else {
            return Err(SquaireError::InvalidBreakpoints("table is empty".into()));
        };
        if last.below.is_some() {
            return Err(SquaireError::InvalidBreakpoints(format!(
                "last tier '{}' must be unbounded",
                last.name
            )));
        }
        let mut prev = f32::NEG_INFINITY;
        for tier in bounded {
            match tier.below {
                None => {
                    return Err(SquaireError::InvalidBreakpoints(format!(
                        "only the last tier may be unbounded, found '{}'",
                        tier.name
                    )))
                }
                Some(b) if b < prev => {
                    return Err(SquaireError::InvalidBreakpoints(format!(
                        "tier '{}' ({b}) is below the previous threshold ({prev})",
                        tier.name
                    )))
                }
                Some(b) => prev = b,
            }
        }
        Ok(Self(tiers))
    }

    /// Name of the first tier whose threshold exceeds `width`.
    pub fn resolve(&self, width: f32) -> &str {
        self.0
            .iter()
            .find(|t| t.below.map_or(true, |b| width < b))
            .or(self.0.last())
            .map(|t| t.name.as_str())
            .unwrap_or_default()
    }

    /// Position of a tier in the table.
    pub fn rank(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|t| t.name == name)
    }

    pub fn tiers(&self) -> &[Breakpoint] {
        &self.0
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        // sub-tiers (small-*) only change styling, "small" is the primary switch
        Self(vec![
            Breakpoint::new("small-thumbnail", Some(270.0)),
            Breakpoint::new("small-xsmall", Some(350.0)),
            Breakpoint::new("small", Some(540.0)),
            Breakpoint::new("medium", Some(940.0)),
            Breakpoint::new("large", None),
        ])
    }
}

/// Whether a breakpoint name belongs to the small tiers.
pub fn is_small(name: &str) -> bool {
    name.starts_with(SMALL_PREFIX)
}
