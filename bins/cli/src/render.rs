//! Text rendering for the terminal.

use bankist_core::ledger::{AccountSummary, MovementRow, SessionSummary};
use bankist_shared::types::{Currency, Money};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::json;

/// Movements newest first, the way the Bankist page lists them.
pub fn movements(rows: &[MovementRow], currency: Currency, now: DateTime<Utc>) -> String {
    if rows.is_empty() {
        return "  (no movements)".to_string();
    }

    rows.iter()
        .rev()
        .map(|row| {
            format!(
                "  {:>3} {:<10} {:<12} {:>14}",
                row.position,
                row.kind.as_str().to_uppercase(),
                row.date_label(now).to_string(),
                Money::new(row.amount, currency).to_string(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Balance line plus the in/out/interest footer.
pub fn summary(summary: &AccountSummary, currency: Currency, now: DateTime<Utc>) -> String {
    let money = |amount: Decimal| Money::new(amount, currency);
    format!(
        "  Current balance (as of {}): {}\n  In: {}  Out: {}  Interest: {}",
        now.format("%d/%m/%Y, %H:%M"),
        money(summary.balance),
        money(summary.total_income),
        money(summary.total_outflow_abs),
        money(summary.qualifying_interest),
    )
}

/// Summary and movements as one JSON document.
pub fn json(session: &SessionSummary, summary: &AccountSummary, rows: &[MovementRow]) -> String {
    let document = json!({
        "owner": session.owner,
        "handle": session.handle,
        "currency": session.currency,
        "locale": session.locale,
        "summary": summary,
        "movements": rows,
    });
    serde_json::to_string_pretty(&document).unwrap_or_else(|err| format!("{{\"error\": \"{err}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankist_core::account::{AccountDirectory, Movement, NewAccount};
    use bankist_core::ledger::LedgerEngine;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    fn engine() -> LedgerEngine {
        let movements = [
            Movement::new(dec!(200), now() - Duration::days(10)),
            Movement::new(dec!(-50), now() - Duration::days(1)),
            Movement::new(dec!(1000), now()),
        ];
        let directory = AccountDirectory::initialize([NewAccount::new("Sarah Smith", 4444, dec!(1))
            .with_currency(Currency::Usd, "en-US")
            .with_movements(movements)])
        .unwrap();
        let mut engine = LedgerEngine::new(directory);
        engine.authenticate("ss", "4444").unwrap();
        engine
    }

    #[test]
    fn test_movements_newest_first() {
        let rows = engine().current_movements(false).unwrap();
        let text = movements(&rows, Currency::Usd, now());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("DEPOSIT") && lines[0].contains("Today"));
        assert!(lines[0].contains("1000.00 $"));
        assert!(lines[1].contains("WITHDRAWAL") && lines[1].contains("Yesterday"));
        assert!(lines[2].contains("28/02/2026"));
    }

    #[test]
    fn test_empty_movements() {
        assert_eq!(movements(&[], Currency::Eur, now()), "  (no movements)");
    }

    #[test]
    fn test_summary_lines() {
        let summary = engine().current_summary().unwrap();
        let text = super::summary(&summary, Currency::Usd, now());
        assert!(text.contains("1150.00 $"));
        assert!(text.contains("In: 1200.00 $"));
        assert!(text.contains("Out: 50.00 $"));
        assert!(text.contains("Interest: 12.00 $"));
    }

    #[test]
    fn test_json_document() {
        let mut engine = engine();
        let session = engine.authenticate("ss", "4444").unwrap();
        let rows = engine.current_movements(true).unwrap();
        let text = json(&session, &session.summary, &rows);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["handle"], "ss");
        assert_eq!(value["currency"], "USD");
        assert_eq!(value["movements"][0]["kind"], "withdrawal");
        assert_eq!(value["movements"].as_array().unwrap().len(), 3);
    }
}
