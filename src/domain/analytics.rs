//! Click-history aggregation.
//!
//! Pure functions over a [`Record`]'s click sequence: no store access, no
//! side effects. A record's raw visit history is folded into hourly,
//! referrer, and user-agent-family counts for the stats view.
//!
//! Both classifiers are driven by constant rule tables so the precedence
//! order and the allow-list are data, testable independently of the
//! aggregation loop.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::entities::Record;

/// Length of an hourly bucket in seconds.
const HOUR: i64 = 3600;

/// Referrer substrings that pass through classification verbatim.
///
/// This is an allow-list, not a general classifier: a referrer containing
/// any of these substrings is reported unchanged, everything else collapses
/// to `"Unknown"`.
const REFERRER_ALLOW_LIST: &[&str] = &["google.", "facebook.", "fb."];

/// Label reported for absent or unrecognized referrers.
const UNKNOWN_REFERRER: &str = "Unknown";

/// Browser families reported by user-agent classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum UaFamily {
    Chrome,
    Firefox,
    Safari,
    Opera,
    Others,
}

impl UaFamily {
    /// Every reportable family, in rule-table order. Summaries carry all of
    /// them, zero-initialized, even for an empty click history.
    pub const ALL: [UaFamily; 5] = [
        UaFamily::Chrome,
        UaFamily::Firefox,
        UaFamily::Safari,
        UaFamily::Opera,
        UaFamily::Others,
    ];
}

/// Ordered user-agent classification rules: first matching substring wins.
///
/// The order is a deliberate tie-break. Chrome user agents advertise
/// "Safari" for compatibility, so "chrome" must be tested first; the same
/// applies to Opera builds that advertise both.
const UA_RULES: &[(&str, UaFamily)] = &[
    ("chrome", UaFamily::Chrome),
    ("firefox", UaFamily::Firefox),
    ("safari", UaFamily::Safari),
    ("opera", UaFamily::Opera),
];

/// Aggregated view of one record's click history. Derived on demand,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Click count per hour-aligned epoch second.
    pub hourly_counts: BTreeMap<i64, u64>,

    /// Click count per classified referrer.
    pub referrer_counts: BTreeMap<String, u64>,

    /// Click count per browser family. Always contains every family.
    pub user_agent_counts: BTreeMap<UaFamily, u64>,
}

/// Folds a record's click history into a [`Summary`].
pub fn summarize(record: &Record) -> Summary {
    let mut hourly_counts = BTreeMap::new();
    let mut referrer_counts = BTreeMap::new();
    let mut user_agent_counts: BTreeMap<UaFamily, u64> =
        UaFamily::ALL.iter().map(|&family| (family, 0)).collect();

    for click in &record.clicks {
        *hourly_counts.entry(hour_bucket(click.timestamp)).or_insert(0) += 1;

        *referrer_counts
            .entry(classify_referrer(click.referrer.as_deref()).to_string())
            .or_insert(0) += 1;

        *user_agent_counts
            .entry(classify_user_agent(click.user_agent.as_deref()))
            .or_insert(0) += 1;
    }

    Summary {
        hourly_counts,
        referrer_counts,
        user_agent_counts,
    }
}

/// Aligns a timestamp down to the start of its hour.
pub fn hour_bucket(timestamp: i64) -> i64 {
    timestamp - timestamp % HOUR
}

/// Classifies a referrer against the allow-list.
///
/// Allow-listed referrers pass through verbatim; absent and unrecognized
/// ones are reported as `"Unknown"`.
pub fn classify_referrer(referrer: Option<&str>) -> &str {
    match referrer {
        Some(url) if REFERRER_ALLOW_LIST.iter().any(|needle| url.contains(needle)) => url,
        _ => UNKNOWN_REFERRER,
    }
}

/// Classifies a user-agent string into a browser family.
///
/// Case-insensitive substring match against the rule table in order;
/// the first match wins, no match falls to [`UaFamily::Others`].
pub fn classify_user_agent(user_agent: Option<&str>) -> UaFamily {
    let Some(user_agent) = user_agent else {
        return UaFamily::Others;
    };
    let lowered = user_agent.to_lowercase();

    UA_RULES
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map(|&(_, family)| family)
        .unwrap_or(UaFamily::Others)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Click;

    fn click_at(timestamp: i64) -> Click {
        Click {
            user_agent: None,
            timestamp,
            referrer: None,
        }
    }

    fn record_with(clicks: Vec<Click>) -> Record {
        Record {
            url: "https://example.com".to_string(),
            clicks,
            created_at: 0,
        }
    }

    #[test]
    fn test_hour_bucket_boundaries() {
        assert_eq!(hour_bucket(3599), 0);
        assert_eq!(hour_bucket(3600), 3600);
        assert_eq!(hour_bucket(3601), 3600);
    }

    #[test]
    fn test_classify_referrer_absent() {
        assert_eq!(classify_referrer(None), "Unknown");
    }

    #[test]
    fn test_classify_referrer_allow_listed_passes_verbatim() {
        assert_eq!(
            classify_referrer(Some("https://www.google.com/search")),
            "https://www.google.com/search"
        );
        assert_eq!(
            classify_referrer(Some("https://m.facebook.com/story")),
            "https://m.facebook.com/story"
        );
        assert_eq!(
            classify_referrer(Some("https://fb.me/abc")),
            "https://fb.me/abc"
        );
    }

    #[test]
    fn test_classify_referrer_unrecognized_collapses() {
        assert_eq!(classify_referrer(Some("https://example.org")), "Unknown");
        assert_eq!(classify_referrer(Some("")), "Unknown");
    }

    #[test]
    fn test_classify_user_agent_families() {
        assert_eq!(
            classify_user_agent(Some("Mozilla/5.0 Firefox/121.0")),
            UaFamily::Firefox
        );
        assert_eq!(
            classify_user_agent(Some("Mozilla/5.0 Version/17.0 Safari/605.1.15")),
            UaFamily::Safari
        );
        assert_eq!(classify_user_agent(Some("Opera/9.80")), UaFamily::Opera);
        assert_eq!(classify_user_agent(Some("curl/8.4.0")), UaFamily::Others);
        assert_eq!(classify_user_agent(None), UaFamily::Others);
    }

    #[test]
    fn test_classify_user_agent_is_case_insensitive() {
        assert_eq!(classify_user_agent(Some("CHROME/120")), UaFamily::Chrome);
        assert_eq!(classify_user_agent(Some("FiReFoX")), UaFamily::Firefox);
    }

    #[test]
    fn test_chrome_wins_over_safari() {
        // Chrome UAs advertise Safari for compatibility; table order must
        // classify them as Chrome.
        let ua = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                  (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
        assert_eq!(classify_user_agent(Some(ua)), UaFamily::Chrome);
    }

    #[test]
    fn test_summarize_empty_record() {
        let summary = summarize(&record_with(vec![]));

        assert!(summary.hourly_counts.is_empty());
        assert!(summary.referrer_counts.is_empty());
        // Every family is present even with no clicks.
        assert_eq!(summary.user_agent_counts.len(), UaFamily::ALL.len());
        assert!(summary.user_agent_counts.values().all(|&count| count == 0));
    }

    #[test]
    fn test_summarize_hourly_bucketing() {
        let summary = summarize(&record_with(vec![
            click_at(3599),
            click_at(3601),
            click_at(3600),
            click_at(7300),
        ]));

        assert_eq!(summary.hourly_counts.get(&0), Some(&1));
        assert_eq!(summary.hourly_counts.get(&3600), Some(&2));
        assert_eq!(summary.hourly_counts.get(&7200), Some(&1));
    }

    #[test]
    fn test_summarize_counts_referrers_and_agents() {
        let clicks = vec![
            Click {
                user_agent: Some("Chrome/120 Safari/537".to_string()),
                timestamp: 10,
                referrer: Some("https://www.google.com/search".to_string()),
            },
            Click {
                user_agent: Some("Firefox/121".to_string()),
                timestamp: 20,
                referrer: Some("https://example.org".to_string()),
            },
            Click {
                user_agent: None,
                timestamp: 30,
                referrer: None,
            },
        ];

        let summary = summarize(&record_with(clicks));

        assert_eq!(
            summary.referrer_counts.get("https://www.google.com/search"),
            Some(&1)
        );
        assert_eq!(summary.referrer_counts.get("Unknown"), Some(&2));

        assert_eq!(summary.user_agent_counts[&UaFamily::Chrome], 1);
        assert_eq!(summary.user_agent_counts[&UaFamily::Firefox], 1);
        assert_eq!(summary.user_agent_counts[&UaFamily::Others], 1);
        assert_eq!(summary.user_agent_counts[&UaFamily::Safari], 0);
        assert_eq!(summary.user_agent_counts[&UaFamily::Opera], 0);
    }

    #[test]
    fn test_summary_serializes_family_names() {
        let summary = summarize(&record_with(vec![]));
        let value = serde_json::to_value(&summary).unwrap();

        let families = value["user_agent_counts"].as_object().unwrap();
        for name in ["Chrome", "Firefox", "Safari", "Opera", "Others"] {
            assert_eq!(families[name], 0, "missing family {}", name);
        }
    }
}
