//! Dashboard domain models.
//!
//! Contains the data shown on the dashboard page: the fixed stats block, the
//! chronological chart series, categorical (donut/pie) charts and the
//! development activity list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

use crate::error::{PulseError, Result};

/// Identifies one of the fixed metrics of a [`StatsBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum StatMetric {
    NewTickets,
    ClosedToday,
    NewReplies,
    Followers,
    DailyEarnings,
    Products,
}

impl StatMetric {
    /// Largest absolute value change a single live-update tick may apply.
    ///
    /// Counts move by small integers; aggregate followers move faster.
    pub fn max_delta(self) -> i64 {
        match self {
            StatMetric::NewTickets => 3,
            StatMetric::ClosedToday => 2,
            StatMetric::NewReplies => 2,
            StatMetric::Followers => 100,
            StatMetric::DailyEarnings => 5,
            StatMetric::Products => 5,
        }
    }
}

/// A single metric card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatEntry {
    /// Current value; never negative.
    pub value: u64,
    /// Signed percentage indicator shown next to the value.
    pub change: i32,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl StatEntry {
    pub fn new(value: u64, change: i32, label: impl Into<String>) -> Self {
        Self {
            value,
            change,
            label: label.into(),
            prefix: None,
            suffix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Formats the value for a stat card.
    ///
    /// Values of 1000 and above are abbreviated with one decimal and a `k`
    /// (`27300` -> `27.3k`).
    ///
    /// # Examples
    ///
    /// ```
    /// use pulseboard_core::dashboard::StatEntry;
    ///
    /// let entry = StatEntry::new(95, -2, "Daily earnings").with_prefix("$");
    /// assert_eq!(entry.display_value(), "$95");
    /// ```
    pub fn display_value(&self) -> String {
        let prefix = self.prefix.as_deref().unwrap_or("");
        let suffix = self.suffix.as_deref().unwrap_or("");
        if self.value >= 1000 {
            format!("{}{:.1}k{}", prefix, self.value as f64 / 1000.0, suffix)
        } else {
            format!("{}{}{}", prefix, self.value, suffix)
        }
    }
}

/// The fixed mapping of named metrics shown in the stats grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsBlock {
    pub new_tickets: StatEntry,
    pub closed_today: StatEntry,
    pub new_replies: StatEntry,
    pub followers: StatEntry,
    pub daily_earnings: StatEntry,
    pub products: StatEntry,
}

impl StatsBlock {
    pub fn get(&self, metric: StatMetric) -> &StatEntry {
        match metric {
            StatMetric::NewTickets => &self.new_tickets,
            StatMetric::ClosedToday => &self.closed_today,
            StatMetric::NewReplies => &self.new_replies,
            StatMetric::Followers => &self.followers,
            StatMetric::DailyEarnings => &self.daily_earnings,
            StatMetric::Products => &self.products,
        }
    }

    pub fn get_mut(&mut self, metric: StatMetric) -> &mut StatEntry {
        match metric {
            StatMetric::NewTickets => &mut self.new_tickets,
            StatMetric::ClosedToday => &mut self.closed_today,
            StatMetric::NewReplies => &mut self.new_replies,
            StatMetric::Followers => &mut self.followers,
            StatMetric::DailyEarnings => &mut self.daily_earnings,
            StatMetric::Products => &mut self.products,
        }
    }

    /// Iterates metrics in display order.
    pub fn iter(&self) -> impl Iterator<Item = (StatMetric, &StatEntry)> {
        StatMetric::iter().map(move |metric| (metric, self.get(metric)))
    }
}

/// One point of the development activity chart.
///
/// `date` is the ordering key; live updates only ever change `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: String,
    #[serde(alias = "purchases")]
    pub value: u64,
}

impl ChartPoint {
    pub fn new(date: impl Into<String>, value: u64) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }

    /// Returns true when both series have the same length and ordering keys.
    pub fn same_keys(left: &[ChartPoint], right: &[ChartPoint]) -> bool {
        left.len() == right.len() && left.iter().zip(right).all(|(a, b)| a.date == b.date)
    }
}

/// A slice of a donut or pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDatum {
    pub name: String,
    pub value: f64,
    /// CSS hex color, e.g. `#2fb344`
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoricalCharts {
    pub donut: Vec<CategoryDatum>,
    pub pie: Vec<CategoryDatum>,
}

/// A row of the development activity table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Unique within one snapshot
    pub id: u64,
    pub user: String,
    pub avatar_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(alias = "commit")]
    pub commit_message: String,
    /// Human-readable date such as `May 6, 2018`
    pub date: String,
}

impl Activity {
    /// Parses `date` into a calendar date.
    ///
    /// Accepts long-form dates (`April 22, 2018`, `Apr 22, 2018`) and ISO dates
    /// (`2018-04-22`). Returns `None` for anything else.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();
        NaiveDate::parse_from_str(raw, "%B %d, %Y")
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
            .ok()
    }
}

/// A complete, self-consistent set of dashboard data as returned by the
/// dashboard data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub stats: StatsBlock,
    pub chart_series: Vec<ChartPoint>,
    pub charts: CategoricalCharts,
    pub activities: Vec<Activity>,
}

impl DashboardSnapshot {
    /// Checks snapshot invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PulseError::InvalidData`] if two activities share an id.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.activities.len());
        for activity in &self.activities {
            if !seen.insert(activity.id) {
                return Err(PulseError::invalid_data(format!(
                    "duplicate activity id {}",
                    activity.id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> StatsBlock {
        StatsBlock {
            new_tickets: StatEntry::new(43, 6, "New Tickets"),
            closed_today: StatEntry::new(17, -3, "Closed Today"),
            new_replies: StatEntry::new(7, 9, "New Replies"),
            followers: StatEntry::new(27300, 3, "Followers"),
            daily_earnings: StatEntry::new(95, -2, "Daily earnings").with_prefix("$"),
            products: StatEntry::new(621, -1, "Products"),
        }
    }

    fn activity(id: u64, date: &str) -> Activity {
        Activity {
            id,
            user: format!("User {}", id),
            avatar_label: "U".to_string(),
            avatar_url: None,
            commit_message: "Initial commit".to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_display_value_abbreviates_thousands() {
        let block = stats();
        assert_eq!(block.followers.display_value(), "27.3k");
        assert_eq!(block.daily_earnings.display_value(), "$95");
        assert_eq!(block.products.display_value(), "621");

        let entry = StatEntry::new(1000, 0, "Exact").with_suffix("+");
        assert_eq!(entry.display_value(), "1.0k+");
    }

    #[test]
    fn test_iter_follows_metric_order() {
        let block = stats();
        let labels: Vec<&str> = block.iter().map(|(_, e)| e.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "New Tickets",
                "Closed Today",
                "New Replies",
                "Followers",
                "Daily earnings",
                "Products"
            ]
        );
    }

    #[test]
    fn test_get_mut_targets_one_metric() {
        let mut block = stats();
        block.get_mut(StatMetric::Products).value = 1;
        assert_eq!(block.products.value, 1);
        assert_eq!(block.new_tickets.value, 43);
    }

    #[test]
    fn test_metric_names_are_camel_case() {
        assert_eq!(StatMetric::DailyEarnings.to_string(), "dailyEarnings");
        assert_eq!(StatMetric::NewTickets.as_ref(), "newTickets");
    }

    #[test]
    fn test_stats_block_serializes_camel_case() {
        let json = serde_json::to_value(stats()).unwrap();
        assert_eq!(json["dailyEarnings"]["prefix"], "$");
        assert!(json["followers"].get("prefix").is_none());
    }

    #[test]
    fn test_chart_point_accepts_purchases_alias() {
        let point: ChartPoint = serde_json::from_str(r#"{"date":"Jan","purchases":12}"#).unwrap();
        assert_eq!(point, ChartPoint::new("Jan", 12));
    }

    #[test]
    fn test_same_keys() {
        let a = vec![ChartPoint::new("Jan", 1), ChartPoint::new("Feb", 2)];
        let b = vec![ChartPoint::new("Jan", 9), ChartPoint::new("Feb", 0)];
        let c = vec![ChartPoint::new("Feb", 1), ChartPoint::new("Jan", 2)];
        assert!(ChartPoint::same_keys(&a, &b));
        assert!(!ChartPoint::same_keys(&a, &c));
        assert!(!ChartPoint::same_keys(&a, &a[..1]));
    }

    #[test]
    fn test_parsed_date_formats() {
        assert_eq!(
            activity(1, "May 6, 2018").parsed_date(),
            NaiveDate::from_ymd_opt(2018, 5, 6)
        );
        assert_eq!(
            activity(2, "April 22, 2018").parsed_date(),
            NaiveDate::from_ymd_opt(2018, 4, 22)
        );
        assert_eq!(
            activity(3, "2018-04-15").parsed_date(),
            NaiveDate::from_ymd_opt(2018, 4, 15)
        );
        assert!(activity(4, "sometime").parsed_date().is_none());
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut snapshot = DashboardSnapshot {
            stats: stats(),
            chart_series: vec![ChartPoint::new("Jan", 12)],
            charts: CategoricalCharts::default(),
            activities: vec![activity(1, "May 6, 2018"), activity(2, "May 7, 2018")],
        };
        assert!(snapshot.validate().is_ok());

        snapshot.activities.push(activity(1, "May 8, 2018"));
        let err = snapshot.validate().unwrap_err();
        assert!(matches!(err, PulseError::InvalidData(_)));
    }
}
