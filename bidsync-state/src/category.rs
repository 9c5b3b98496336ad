//! The closed category and file-slot sets.

use std::fmt;
use std::str::FromStr;

/// The five fixed partitions of the cross-page store. Each category owns
/// its own sub-shape and its own subscriber list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateCategory {
    Company,
    Project,
    Files,
    Ai,
    Hitl,
}

impl StateCategory {
    pub const ALL: [StateCategory; 5] = [
        StateCategory::Company,
        StateCategory::Project,
        StateCategory::Files,
        StateCategory::Ai,
        StateCategory::Hitl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StateCategory::Company => "company",
            StateCategory::Project => "project",
            StateCategory::Files => "files",
            StateCategory::Ai => "ai",
            StateCategory::Hitl => "hitl",
        }
    }
}

impl fmt::Display for StateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bridge for stringly-typed legacy call sites. New code uses the enum
/// directly, making invalid category names unrepresentable.
impl FromStr for StateCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "company" => Ok(StateCategory::Company),
            "project" => Ok(StateCategory::Project),
            "files" => Ok(StateCategory::Files),
            "ai" => Ok(StateCategory::Ai),
            "hitl" => Ok(StateCategory::Hitl),
            _ => Err(()),
        }
    }
}

/// The five named upload slots of the files category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileSlot {
    OriginalTender,
    Technical,
    Business,
    PointToPoint,
    TechProposal,
}

impl FileSlot {
    pub const ALL: [FileSlot; 5] = [
        FileSlot::OriginalTender,
        FileSlot::Technical,
        FileSlot::Business,
        FileSlot::PointToPoint,
        FileSlot::TechProposal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileSlot::OriginalTender => "original_tender",
            FileSlot::Technical => "technical",
            FileSlot::Business => "business",
            FileSlot::PointToPoint => "point_to_point",
            FileSlot::TechProposal => "tech_proposal",
        }
    }
}

impl fmt::Display for FileSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
