use super::http;
use crate::fetch::DataSource;
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration as ChronoDuration, TimeZone, Utc};
use fancy_regex::Regex;
use propcast_domain::contests::{classify, detect_mode, sort_contests, Contest};
use propcast_domain::DomainError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::sync::LazyLock;
use std::time::Duration;

const RSS_URL: &str = "https://www.contestcalendar.com/contestcal.php?mode=xml";
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// WA7BNM contest calendar RSS feed.
pub struct ContestCalendarSource;

#[async_trait]
impl DataSource<Vec<Contest>> for ContestCalendarSource {
    fn name(&self) -> &'static str {
        "WA7BNM"
    }

    async fn fetch(&self) -> Result<Vec<Contest>, DomainError> {
        let xml = http::get_text(self.name(), RSS_URL, HTTP_TIMEOUT).await?;
        parse_feed(&xml, Utc::now())
    }
}

#[derive(Default)]
struct RssItem {
    title: String,
    link: String,
    description: String,
}

// "1200Z, Jul 5 to 1159Z, Jul 6" (multi-day)
static MULTI_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})[Zz],?\s+(\w{3})\s+(\d{1,2})\s+to\s+(\d{4})[Zz],?\s+(\w{3})\s+(\d{1,2})")
        .unwrap()
});

// "1300Z-1400Z, Jul 5" (single-day)
static SINGLE_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})[Zz]\s*[-\u{2013}]\s*(\d{4})[Zz],?\s+(\w{3})\s+(\d{1,2})").unwrap()
});

fn month_number(abbrev: &str) -> Option<u32> {
    match abbrev {
        "Jan" => Some(1),
        "Feb" => Some(2),
        "Mar" => Some(3),
        "Apr" => Some(4),
        "May" => Some(5),
        "Jun" => Some(6),
        "Jul" => Some(7),
        "Aug" => Some(8),
        "Sep" => Some(9),
        "Oct" => Some(10),
        "Nov" => Some(11),
        "Dec" => Some(12),
        _ => None,
    }
}

fn build_datetime(year: i32, month: u32, day: u32, hhmm: &str) -> Option<DateTime<Utc>> {
    let hour: u32 = hhmm.get(..2)?.parse().ok()?;
    let minute: u32 = hhmm.get(2..)?.parse().ok()?;
    // 2400Z means midnight of the following day.
    if hour == 24 {
        return Utc
            .with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .map(|dt| dt + ChronoDuration::days(1));
    }
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
}

/// Extract start/end times from the feed's free-text description. The year is
/// not in the text; contests spanning New Year roll the end forward.
fn parse_times(
    description: &str,
    year: i32,
) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    let captures = MULTI_DAY
        .captures(description)
        .ok()
        .flatten()
        .map(|c| {
            let get = |i| c.get(i).map(|m| m.as_str()).unwrap_or_default();
            (
                get(1).to_string(),
                get(2).to_string(),
                get(3).to_string(),
                get(4).to_string(),
                get(5).to_string(),
                get(6).to_string(),
            )
        })
        .or_else(|| {
            SINGLE_DAY.captures(description).ok().flatten().map(|c| {
                let get = |i| c.get(i).map(|m| m.as_str()).unwrap_or_default();
                (
                    get(1).to_string(),
                    get(3).to_string(),
                    get(4).to_string(),
                    get(2).to_string(),
                    get(3).to_string(),
                    get(4).to_string(),
                )
            })
        });

    let Some((s_time, s_mon, s_day, e_time, e_mon, e_day)) = captures else {
        return (None, None);
    };
    let start = month_number(&s_mon)
        .zip(s_day.parse::<u32>().ok())
        .and_then(|(month, day)| build_datetime(year, month, day, &s_time));
    let mut end = month_number(&e_mon)
        .zip(e_day.parse::<u32>().ok())
        .and_then(|(month, day)| build_datetime(year, month, day, &e_time));

    if let (Some(start_dt), Some(end_dt)) = (start, end) {
        if end_dt < start_dt {
            end = end_dt.with_year(year + 1);
        }
    }
    (start, end)
}

fn parse_items(xml: &str) -> Result<Vec<RssItem>, DomainError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut current: Option<RssItem> = None;
    let mut field: Vec<u8> = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| DomainError::InvalidResponse(format!("WA7BNM: {e}")))?;
        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"item" => current = Some(RssItem::default()),
                name => field = name.to_vec(),
            },
            Event::Text(t) => {
                if let Some(item) = current.as_mut() {
                    let text = t
                        .xml_content()
                        .map_err(|e| DomainError::InvalidResponse(format!("WA7BNM: {e}")))?
                        .into_owned();
                    match field.as_slice() {
                        b"title" => item.title = text,
                        b"link" => item.link = text,
                        b"description" => item.description = text,
                        _ => {}
                    }
                }
            }
            Event::CData(t) => {
                if let Some(item) = current.as_mut() {
                    let text = String::from_utf8_lossy(&t).into_owned();
                    if field.as_slice() == b"description" {
                        item.description = text;
                    }
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == b"item" {
                    if let Some(item) = current.take() {
                        if !item.title.is_empty() {
                            items.push(item);
                        }
                    }
                } else {
                    field.clear();
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(items)
}

fn parse_feed(xml: &str, now: DateTime<Utc>) -> Result<Vec<Contest>, DomainError> {
    let items = parse_items(xml)?;
    let mut contests: Vec<Contest> = items
        .into_iter()
        .map(|item| {
            let (start, end) = parse_times(&item.description, now.year());
            let (status, time_info) = classify(start, end, now);
            Contest {
                mode: detect_mode(&item.title),
                name: item.title,
                link: item.link,
                description: item.description,
                status,
                time_info,
                start,
                end,
            }
        })
        .collect();
    sort_contests(&mut contests);
    Ok(contests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use propcast_domain::ContestStatus;

    #[test]
    fn parses_multi_day_times() {
        let now = Utc.with_ymd_and_hms(2025, 7, 5, 14, 0, 0).unwrap();
        let (start, end) = parse_times("1200Z, Jul 5 to 1159Z, Jul 6", now.year());
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 7, 5, 12, 0, 0).single());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 7, 6, 11, 59, 0).single());
    }

    #[test]
    fn parses_single_day_times() {
        let (start, end) = parse_times("1300Z-1400Z, Jul 5", 2025);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 7, 5, 13, 0, 0).single());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 7, 5, 14, 0, 0).single());
    }

    #[test]
    fn end_time_2400_rolls_to_next_day() {
        let (_, end) = parse_times("1200Z, Jul 5 to 2400Z, Jul 5", 2025);
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 7, 6, 0, 0, 0).single());
    }

    #[test]
    fn year_rollover() {
        let (start, end) = parse_times("1200Z, Dec 30 to 1200Z, Jan 2", 2025);
        assert_eq!(start.unwrap().year(), 2025);
        assert_eq!(end.unwrap().year(), 2026);
    }

    #[test]
    fn unparseable_times_are_none() {
        assert_eq!(parse_times("See website for details", 2025), (None, None));
    }

    #[test]
    fn parses_feed_and_classifies() {
        let now = Utc.with_ymd_and_hms(2025, 7, 5, 14, 0, 0).unwrap();
        let xml = r#"<?xml version="1.0"?>
<rss><channel>
  <item>
    <title>Example CW Sprint</title>
    <link>https://example.org/rules</link>
    <description>1200Z, Jul 5 to 1159Z, Jul 6</description>
  </item>
  <item>
    <title>Future RTTY Test</title>
    <link>https://example.org/rtty</link>
    <description>1300Z-1400Z, Jul 12</description>
  </item>
</channel></rss>"#;
        let contests = parse_feed(xml, now).unwrap();
        assert_eq!(contests.len(), 2);
        assert_eq!(contests[0].name, "Example CW Sprint");
        assert_eq!(contests[0].status, ContestStatus::Active);
        assert_eq!(contests[0].mode, "CW");
        assert_eq!(contests[1].status, ContestStatus::Upcoming);
        assert_eq!(contests[1].mode, "RTTY");
    }
}
