// src/calendar/assemble.rs

use tracing::{debug, warn};

use super::extract::Extractor;
use super::normalize::{clean_str, Normalizer};
use super::types::{ClassifiedRow, EventRecord};
use crate::months::MonthToken;

/// Carry-forward state for one month's rows. Calendar pages leave the
/// date and time blank when they repeat the previous row's value.
#[derive(Debug)]
pub struct Assembler {
    month: MonthToken,
    current_date: String,
    current_time: String,
}

impl Assembler {
    pub fn new(month: MonthToken) -> Self {
        Self {
            month,
            current_date: String::new(),
            current_time: String::new(),
        }
    }

    /// Feed one row; returns a record for accepted event rows.
    pub fn push(
        &mut self,
        row: ClassifiedRow<'_>,
        extractor: &Extractor,
        normalizer: &Normalizer,
    ) -> Option<EventRecord> {
        let row = match row {
            ClassifiedRow::DateHeader(date) => {
                self.current_date = date;
                return None;
            }
            ClassifiedRow::Ignored => return None,
            ClassifiedRow::EventRow(row) => row,
        };

        let raw = extractor.extract(row);
        // an inline date marks the start of a day even if its own row is filtered out
        if let Some(date) = raw.date.as_deref().map(clean_str).filter(|d| !d.is_empty()) {
            self.current_date = date;
        }

        let fields = match normalizer.normalize(raw) {
            Ok(f) => f,
            Err(reason) => {
                debug!(%reason, "dropping event row");
                return None;
            }
        };

        if let Some(time) = fields.time.filter(|t| !t.is_empty()) {
            self.current_time = time;
        }

        if self.current_date.is_empty() {
            warn!(
                event = fields.title.as_deref().unwrap_or_default(),
                "event row before any date header; dropping"
            );
            return None;
        }

        let detail = fields
            .event_id
            .map(|id| normalizer.detail_link(self.month, &id))
            .unwrap_or_default();

        Some(EventRecord {
            date: self.current_date.clone(),
            time: self.current_time.clone(),
            currency: fields.currency,
            impact: fields.impact,
            event: fields.title.unwrap_or_default(),
            actual: fields.actual.unwrap_or_default(),
            forecast: fields.forecast.unwrap_or_default(),
            previous: fields.previous.unwrap_or_default(),
            detail,
        })
    }
}

/// Run a whole row sequence through a fresh assembler, in order.
pub fn assemble<'a>(
    rows: impl IntoIterator<Item = ClassifiedRow<'a>>,
    month: MonthToken,
    extractor: &Extractor,
    normalizer: &Normalizer,
) -> Vec<EventRecord> {
    let mut state = Assembler::new(month);
    rows.into_iter()
        .filter_map(|row| state.push(row, extractor, normalizer))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::classify::Classifier;
    use crate::config::CalendarConfig;
    use scraper::{Html, Selector};

    fn run(cfg: &CalendarConfig, body: &str) -> Vec<EventRecord> {
        let doc = Html::parse_document(&format!("<table>{body}</table>"));
        let sel = Selector::parse("tr").unwrap();
        let classifier = Classifier::new(cfg);
        let extractor = Extractor::new(cfg).unwrap();
        let normalizer = Normalizer::new(cfg);
        assemble(
            doc.select(&sel).map(|r| classifier.classify(r)),
            MonthToken::new(2007, 1).unwrap(),
            &extractor,
            &normalizer,
        )
    }

    fn event(time: &str, currency: &str, color: &str, title: &str) -> String {
        format!(
            r#"<tr class="calendar__row">
                <td class="calendar__time">{time}</td>
                <td class="calendar__currency">{currency}</td>
                <td class="calendar__impact"><span class="icon icon--ff-impact-{color}"></span></td>
                <td class="calendar__event">{title}</td>
            </tr>"#
        )
    }

    fn header(text: &str) -> String {
        format!(r#"<tr class="calendar__row calendar__row--day-breaker"><td>{text}</td></tr>"#)
    }

    #[test]
    fn test_time_carries_forward_within_day_and_across_dates() {
        let body = [
            header("Mon Jan 1"),
            event("8:30am", "USD", "red", "A"),
            event("", "USD", "ora", "B"),
            header("Tue Jan 2"),
            event("", "EUR", "yel", "C"),
            event("All Day", "EUR", "gra", "D"),
            event("", "GBP", "red", "E"),
        ]
        .concat();
        let records = run(&CalendarConfig::default(), &body);

        let got: Vec<(&str, &str, &str)> = records
            .iter()
            .map(|r| (r.date.as_str(), r.time.as_str(), r.event.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                ("Mon Jan 1", "8:30am", "A"),
                ("Mon Jan 1", "8:30am", "B"),
                ("Tue Jan 2", "8:30am", "C"),
                ("Tue Jan 2", "All Day", "D"),
                ("Tue Jan 2", "All Day", "E"),
            ]
        );
    }

    #[test]
    fn test_no_time_seen_yet_keeps_empty_time() {
        let body = [header("Mon Jan 1"), event("", "USD", "red", "Early")].concat();
        let records = run(&CalendarConfig::default(), &body);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].time, "");
    }

    #[test]
    fn test_rejected_rows_do_not_stop_processing_or_update_time() {
        let body = [
            header("Mon Jan 1"),
            event("1:00am", "XXX", "red", "Rejected"),
            event("", "USD", "red", "Kept"),
            event("2:00am", "USD", "blue", "Unknown impact"),
            event("", "USD", "red", "Also kept"),
        ]
        .concat();
        let records = run(&CalendarConfig::default(), &body);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].event, "Kept");
        assert_eq!(records[0].time, "");
        assert_eq!(records[1].event, "Also kept");
        assert_eq!(records[1].time, "");
    }

    #[test]
    fn test_allow_lists_hold_for_every_record() {
        let mut cfg = CalendarConfig::default();
        cfg.allowed_currencies = ["USD".to_string(), "JPY".to_string()].into_iter().collect();
        cfg.allowed_impacts = ["High".to_string()].into_iter().collect();

        let body = [
            header("Wed Jan 3"),
            event("1:00am", "USD", "red", "1"),
            event("", "EUR", "red", "2"),
            event("", "JPY", "ora", "3"),
            event("", "JPY", "red", "4"),
            event("", "CAD", "yel", "5"),
        ]
        .concat();
        let records = run(&cfg, &body);

        assert_eq!(records.len(), 2);
        for r in &records {
            assert!(cfg.allowed_currencies.contains(&r.currency));
            assert!(cfg.allowed_impacts.contains(&r.impact));
        }
    }

    #[test]
    fn test_inline_date_cell_updates_date() {
        let body = r#"
            <tr class="calendar__row calendar__row--new-day">
                <td class="calendar__date"><span>Thu</span><span>Jan 4</span></td>
                <td class="calendar__time">7:00pm</td>
                <td class="calendar__currency">AUD</td>
                <td class="calendar__impact"><span class="icon icon--ff-impact-yel"></span></td>
                <td class="calendar__event">Trade Balance</td>
            </tr>
            <tr class="calendar__row">
                <td class="calendar__date"></td>
                <td class="calendar__time"></td>
                <td class="calendar__currency">AUD</td>
                <td class="calendar__impact"><span class="icon icon--ff-impact-yel"></span></td>
                <td class="calendar__event">Building Approvals</td>
            </tr>"#;
        let records = run(&CalendarConfig::default(), body);

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.date == "Thu Jan 4"));
        assert!(records.iter().all(|r| r.time == "7:00pm"));
    }

    #[test]
    fn test_date_from_rejected_row_still_starts_the_day() {
        let dated = |date: &str, time: &str, currency: &str, title: &str| {
            format!(
                r#"<tr class="calendar__row">
                    <td class="calendar__date">{date}</td>
                    <td class="calendar__time">{time}</td>
                    <td class="calendar__currency">{currency}</td>
                    <td class="calendar__impact"><span class="icon icon--ff-impact-red"></span></td>
                    <td class="calendar__event">{title}</td>
                </tr>"#
            )
        };
        let body = [
            dated("Mon Jan 1", "1:00am", "USD", "A"),
            dated("Tue Jan 2", "3:00am", "XXX", "Rejected"),
            dated("", "", "USD", "B"),
        ]
        .concat();
        let records = run(&CalendarConfig::default(), &body);

        let got: Vec<(&str, &str, &str)> = records
            .iter()
            .map(|r| (r.date.as_str(), r.time.as_str(), r.event.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![("Mon Jan 1", "1:00am", "A"), ("Tue Jan 2", "1:00am", "B")]
        );
    }

    #[test]
    fn test_detail_link_only_for_rows_with_an_id() {
        let body = format!(
            r##"{}
            <tr class="calendar__row" data-event-id="130452">
                <td class="calendar__time">8:30am</td>
                <td class="calendar__currency">USD</td>
                <td class="calendar__impact"><span class="icon icon--ff-impact-red"></span></td>
                <td class="calendar__event">CPI m/m</td>
                <td class="calendar__detail"><a href="#"></a></td>
            </tr>
            {}"##,
            header("Mon Jan 1"),
            event("", "USD", "red", "No id"),
        );
        let records = run(&CalendarConfig::default(), &body);

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].detail,
            "https://www.forexfactory.com/calendar?month=january.2007#detail=130452"
        );
        assert_eq!(records[1].detail, "");
    }

    #[test]
    fn test_event_before_any_date_is_dropped() {
        let body = [event("9:00am", "USD", "red", "Orphan"), header("Fri Jan 5")].concat();
        assert!(run(&CalendarConfig::default(), &body).is_empty());
    }
}
