use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of object a listing scope or container refers to.
///
/// The string form doubles as the `real_name` of the category container
/// that holds objects of this kind, so it must stay stable: it is part of
/// every encoded path that crosses a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Databases,
    Tables,
    Views,
    Functions,
    Procedures,
    Triggers,
    Events,
    Columns,
    Indexes,
}

/// Category containers attached under a database, in display order.
pub const DB_CONTAINERS: [ObjectKind; 6] = [
    ObjectKind::Tables,
    ObjectKind::Views,
    ObjectKind::Functions,
    ObjectKind::Procedures,
    ObjectKind::Triggers,
    ObjectKind::Events,
];

/// Category containers attached under a table, in display order.
pub const TABLE_CONTAINERS: [ObjectKind; 2] = [ObjectKind::Columns, ObjectKind::Indexes];

impl ObjectKind {
    pub const ALL: [ObjectKind; 9] = [
        Self::Databases,
        Self::Tables,
        Self::Views,
        Self::Functions,
        Self::Procedures,
        Self::Triggers,
        Self::Events,
        Self::Columns,
        Self::Indexes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Databases => "databases",
            Self::Tables => "tables",
            Self::Views => "views",
            Self::Functions => "functions",
            Self::Procedures => "procedures",
            Self::Triggers => "triggers",
            Self::Events => "events",
            Self::Columns => "columns",
            Self::Indexes => "indexes",
        }
    }

    /// Children of a container of this kind never get their own expander.
    pub fn is_sterile(&self) -> bool {
        matches!(
            self,
            Self::Events
                | Self::Triggers
                | Self::Functions
                | Self::Procedures
                | Self::Views
                | Self::Columns
                | Self::Indexes
        )
    }

    /// Containers whose listing can get long enough to deserve a fast filter.
    pub fn is_filterable(&self) -> bool {
        matches!(self, Self::Tables | Self::Views)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an `ObjectKind` from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseObjectKindError {
    pub input: String,
}

impl fmt::Display for ParseObjectKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid object kind: {:?}", self.input)
    }
}

impl std::error::Error for ParseObjectKindError {}

impl FromStr for ObjectKind {
    type Err = ParseObjectKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseObjectKindError {
                input: s.to_string(),
            })
    }
}

/// URL templates attached to a node.
///
/// Templates use positional placeholders `{1}`, `{2}`, ... that the renderer
/// fills with the real names of the node's object ancestors, outermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    pub text: Option<String>,
    pub icon: Option<String>,
}

impl Links {
    pub fn none() -> Self {
        Self::default()
    }

    /// Same template for the label and the icon.
    pub fn both(template: impl Into<String>) -> Self {
        let template = template.into();
        Self {
            text: Some(template.clone()),
            icon: Some(template),
        }
    }
}

/// Everything that differs between object kinds: labels, icons and links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindDescriptor {
    /// Localized label of the category container, e.g. "Tables".
    pub label: String,
    pub container_icon: String,
    pub container_links: Links,
    pub item_icon: String,
    pub item_links: Links,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_all_kinds() {
        for kind in ObjectKind::ALL {
            let parsed: ObjectKind = kind.to_string().parse().unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_invalid_parse() {
        assert!("".parse::<ObjectKind>().is_err());
        assert!("Tables".parse::<ObjectKind>().is_err());
        assert!("schemas".parse::<ObjectKind>().is_err());
    }

    #[test]
    fn test_sterile_kinds() {
        assert!(!ObjectKind::Databases.is_sterile());
        assert!(!ObjectKind::Tables.is_sterile());
        for kind in [
            ObjectKind::Events,
            ObjectKind::Triggers,
            ObjectKind::Functions,
            ObjectKind::Procedures,
            ObjectKind::Views,
            ObjectKind::Columns,
            ObjectKind::Indexes,
        ] {
            assert!(kind.is_sterile(), "{} should be sterile", kind);
        }
    }

    #[test]
    fn test_container_sets_are_disjoint() {
        for kind in DB_CONTAINERS {
            assert!(!TABLE_CONTAINERS.contains(&kind));
        }
        assert!(!DB_CONTAINERS.contains(&ObjectKind::Databases));
    }
}
