//! Ordering policy for the activity table.
//!
//! The store keeps activities in insertion order; the table view projects them
//! through an [`ActivitySort`], which tracks the selected column and direction.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{Display, EnumString};

use super::model::Activity;

/// Sortable activity table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "lowercase")]
pub enum SortField {
    User,
    Commit,
    Date,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Current sort selection of the activity table.
///
/// `field == None` means unsorted: the store's insertion order is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySort {
    pub field: Option<SortField>,
    pub direction: SortDirection,
}

impl ActivitySort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a column.
    ///
    /// Selecting the active column flips the direction; selecting another
    /// column resets the direction to ascending.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == Some(field) {
            self.direction = self.direction.flipped();
        } else {
            self.field = Some(field);
            self.direction = SortDirection::Asc;
        }
    }

    /// Returns the activities in display order.
    ///
    /// The sort is stable, so rows with equal keys keep their relative
    /// insertion order in both directions. Unparseable dates order before
    /// every valid date.
    pub fn apply(&self, activities: &[Activity]) -> Vec<Activity> {
        let mut rows = activities.to_vec();
        let Some(field) = self.field else {
            return rows;
        };

        rows.sort_by(|a, b| {
            let ordering = compare(field, a, b);
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        rows
    }
}

fn compare(field: SortField, a: &Activity, b: &Activity) -> Ordering {
    match field {
        SortField::User => a.user.to_lowercase().cmp(&b.user.to_lowercase()),
        SortField::Commit => a
            .commit_message
            .to_lowercase()
            .cmp(&b.commit_message.to_lowercase()),
        SortField::Date => a.parsed_date().cmp(&b.parsed_date()),
    }
}
