//! Static fixture data served by the mock services.

use chrono::{DateTime, Duration, Utc};
use pulseboard_core::auth::User;
use pulseboard_core::dashboard::{
    Activity, CategoricalCharts, CategoryDatum, ChartPoint, DashboardSnapshot, StatEntry,
    StatsBlock,
};
use pulseboard_core::notification::Notification;

pub fn demo_user() -> User {
    User {
        name: "Jane Pearson".to_string(),
        role: "Administrator".to_string(),
        avatar_label: "JP".to_string(),
        avatar_url: Some("https://i.pravatar.cc/150?img=12".to_string()),
        email: "jane.pearson@example.com".to_string(),
    }
}

pub fn stats() -> StatsBlock {
    StatsBlock {
        new_tickets: StatEntry::new(43, 6, "New Tickets"),
        closed_today: StatEntry::new(17, -3, "Closed Today"),
        new_replies: StatEntry::new(7, 9, "New Replies"),
        followers: StatEntry::new(27300, 3, "Followers"),
        daily_earnings: StatEntry::new(95, -2, "Daily earnings").with_prefix("$"),
        products: StatEntry::new(621, -1, "Products"),
    }
}

pub fn chart_series() -> Vec<ChartPoint> {
    [
        ("Jan", 12),
        ("Feb", 25),
        ("Mar", 40),
        ("Apr", 28),
        ("May", 35),
        ("Jun", 50),
        ("Jul", 45),
        ("Aug", 60),
        ("Sep", 48),
        ("Oct", 55),
        ("Nov", 70),
        ("Dec", 65),
    ]
    .into_iter()
    .map(|(date, value)| ChartPoint::new(date, value))
    .collect()
}

pub fn activities() -> Vec<Activity> {
    [
        (1, "Ronald Bradley", "RB", 1, "Initial commit", "May 6, 2018"),
        (2, "Russell Gibson", "RG", 2, "Main structure", "April 22, 2018"),
        (3, "Beverly Armstrong", "BA", 3, "Left sidebar adjustments", "April 15, 2018"),
        (4, "Sarah Mitchell", "SM", 4, "Added user authentication", "April 10, 2018"),
    ]
    .into_iter()
    .map(|(id, user, label, img, commit, date)| Activity {
        id,
        user: user.to_string(),
        avatar_label: label.to_string(),
        avatar_url: Some(format!("https://i.pravatar.cc/150?img={}", img)),
        commit_message: commit.to_string(),
        date: date.to_string(),
    })
    .collect()
}

fn datum(name: &str, value: f64, color: &str) -> CategoryDatum {
    CategoryDatum {
        name: name.to_string(),
        value,
        color: color.to_string(),
    }
}

pub fn categorical_charts() -> CategoricalCharts {
    CategoricalCharts {
        donut: vec![
            datum("Category A", 37.6, "#2fb344"),
            datum("Category B", 25.0, "#4299e1"),
            datum("Category C", 37.4, "#206bc4"),
        ],
        pie: vec![
            datum("Section 1", 47.4, "#1e3a5f"),
            datum("Section 2", 33.1, "#4299e1"),
            datum("Section 3", 9.9, "#93c5fd"),
            datum("Section 4", 9.6, "#e0f2fe"),
        ],
    }
}

pub fn snapshot() -> DashboardSnapshot {
    DashboardSnapshot {
        stats: stats(),
        chart_series: chart_series(),
        charts: categorical_charts(),
        activities: activities(),
    }
}

/// The inbox, timestamped relative to `now`.
pub fn notifications(now: DateTime<Utc>) -> Vec<Notification> {
    [
        (1, "New ticket #1234 has been assigned to you", false, Duration::minutes(5)),
        (2, "You have 3 pending tasks that need attention", false, Duration::hours(2)),
        (3, "Weekly report is ready for review", true, Duration::days(1)),
        (4, "System maintenance scheduled for tonight at 11 PM", false, Duration::days(3)),
        (5, "Your profile has been updated successfully", true, Duration::days(5)),
    ]
    .into_iter()
    .map(|(id, message, read, age)| Notification {
        id,
        message: message.to_string(),
        read,
        timestamp: now - age,
    })
    .collect()
}
