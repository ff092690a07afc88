/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Partitioning one attribute's values by a secondary key.
//!
//! The classifier has no notion of groups. When breaks are wanted per
//! administrative subdivision (one set of breaks per borough, say) or for a
//! fixed set of areas, the values are split here first and each group is
//! classified on its own.
//!
//! Two ways to group:
//!
//! - [`GroupBy::Property`]: the value of another property names the group
//!   (e.g. `"BoroName"`). Records without that property are skipped.
//! - [`GroupBy::Membership`]: records whose id property is in a fixed member
//!   list form a single named group. All other records are skipped.
//!
//! Groups come out in first-seen order so results are deterministic for a
//! given record order.

use alloc::string::String;
use alloc::vec::Vec;

use crate::dataset::PropertySource;

/// How to assign records to groups.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GroupBy<'a> {
    /// Group by the value of the named property.
    Property(&'a str),
    /// A single group of records whose `id_property` is one of `members`.
    Membership {
        /// Property holding the area identifier.
        id_property: &'a str,
        /// Identifiers that belong to the group.
        members: &'a [&'a str],
        /// Name given to the group.
        label: &'a str,
    },
}

impl GroupBy<'_> {
    /// Group name for `record`, or `None` if the record belongs to no group.
    pub fn group_of<R: PropertySource + ?Sized>(&self, record: &R) -> Option<String> {
        match *self {
            Self::Property(name) => record.property(name).map(|v| v.to_key()),
            Self::Membership { id_property, members, label } => {
                let id = record.property(id_property)?.to_key();
                members.iter().any(|m| *m == id).then(|| String::from(label))
            }
        }
    }
}

/// Values of one group.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Group {
    /// Group name.
    pub name: String,
    /// Finite attribute values of the group's records, in record order.
    pub values: Vec<f64>,
}

/// One attribute's values split into groups.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupedColumn {
    /// Attribute the values were taken from.
    pub attribute: String,
    /// Groups in first-seen order.
    pub groups: Vec<Group>,
}

impl GroupedColumn {
    /// Split `attribute` across `records` according to `group_by`.
    ///
    /// A record contributes to a group only if it both belongs to a group and
    /// has a finite value for `attribute`. A group is created the first time
    /// one of its records is seen, even if that record has no usable value,
    /// so a group may end up empty.
    pub fn build<'r, R, I>(attribute: &str, records: I, group_by: GroupBy<'_>) -> Self
    where
        R: PropertySource + 'r,
        I: IntoIterator<Item = &'r R>,
    {
        let mut groups: Vec<Group> = Vec::new();

        for record in records {
            let Some(name) = group_by.group_of(record) else { continue; };
            let idx = match groups.iter().position(|g| g.name == name) {
                Some(i) => i,
                None => {
                    groups.push(Group { name, values: Vec::new() });
                    groups.len() - 1
                }
            };
            if let Some(v) = record.numeric_property(attribute) {
                groups[idx].values.push(v);
            }
        }

        Self { attribute: String::from(attribute), groups }
    }

    /// Values of the group named `name`.
    pub fn group(&self, name: &str) -> Option<&[f64]> {
        self.groups.iter().find(|g| g.name == name).map(|g| g.values.as_slice())
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// `true` when no record belonged to any group.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
