use crate::activity::types::{Activity, ActivityKind};
use crate::format::format_count;
use crate::overview::types::{Overview, Platform};
use chrono::{DateTime, TimeDelta, Utc};

/// Build the activity feed for a snapshot, most recent first.
///
/// Each rule is evaluated independently. Ties keep rule order (stable sort).
/// An absent snapshot produces an empty feed.
pub fn derive_activity(overview: Option<&Overview>, now: DateTime<Utc>) -> Vec<Activity> {
    let Some(overview) = overview else {
        return Vec::new();
    };

    let mut activities = Vec::new();

    for (platform, id, offset) in [
        (Platform::Slack, "slack-sync", TimeDelta::minutes(2)),
        (Platform::Teams, "teams-sync", TimeDelta::minutes(5)),
        (Platform::WhatsApp, "whatsapp-sync", TimeDelta::minutes(10)),
    ] {
        if overview.is_connected(platform) {
            activities.push(Activity {
                id: id.to_string(),
                kind: ActivityKind::Success,
                message: format!(
                    "{} integration active with {} users",
                    platform.display_name(),
                    overview.user_count(platform)
                ),
                occurred_at: offset_before(now, offset),
            });
        }
    }

    if !overview.is_connected(Platform::WhatsApp) {
        activities.push(Activity {
            id: "whatsapp-setup".to_string(),
            kind: ActivityKind::Warning,
            message: "WhatsApp integration setup required".to_string(),
            occurred_at: offset_before(now, TimeDelta::hours(24)),
        });
    }

    let messages_today = overview.token_usage.today.messages;
    if messages_today > 0 {
        activities.push(Activity {
            id: "token-usage".to_string(),
            kind: ActivityKind::Info,
            message: format!("{} messages processed today", format_count(messages_today)),
            occurred_at: offset_before(now, TimeDelta::hours(1)),
        });
    }

    activities.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    activities
}

/// `now - offset`, clamped at the earliest representable time.
fn offset_before(now: DateTime<Utc>, offset: TimeDelta) -> DateTime<Utc> {
    now.checked_sub_signed(offset).unwrap_or(DateTime::<Utc>::MIN_UTC)
}
