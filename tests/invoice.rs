#[cfg(test)]
mod tests {
    use heures::libs::client::{ClientKind, ClientRecord};
    use heures::libs::entry::WorkEntry;
    use heures::libs::invoice::build_invoice;
    use heures::libs::period::{filter_by_period, Period};
    use heures::libs::rate::{resolve_rate, resolve_rate_or, RateBook};

    fn entry(day: &str, start: &str, end: &str) -> WorkEntry {
        WorkEntry::new("u_test", day, start, day, end)
    }

    #[test]
    fn test_rate_precedence() {
        let client = ClientRecord::new("u_test", "ACME", ClientKind::Client, Some(60.0));
        let activity = ClientRecord::new("u_test", "Audit", ClientKind::Activity, Some(75.0));
        let base = entry("2025-01-10", "09:00", "10:00");

        assert_eq!(resolve_rate(&base.clone().with_rate(50.0), Some(&client), Some(&activity)), 50.0);
        assert_eq!(resolve_rate(&base, Some(&client), Some(&activity)), 75.0);
        assert_eq!(resolve_rate(&base, Some(&client), None), 60.0);
        assert_eq!(resolve_rate(&base, None, None), 0.0);
        assert_eq!(resolve_rate_or(&base, None, None, 35.0), 35.0);
    }

    #[test]
    fn test_non_positive_entry_rate_falls_through() {
        let client = ClientRecord::new("u_test", "ACME", ClientKind::Client, Some(60.0));
        let base = entry("2025-01-10", "09:00", "10:00");

        assert_eq!(resolve_rate(&base.clone().with_rate(0.0), Some(&client), None), 60.0);
        assert_eq!(resolve_rate(&base.with_rate(-5.0), Some(&client), None), 60.0);
    }

    #[test]
    fn test_rate_book_resolves_linked_records() {
        let client = ClientRecord::new("u_test", "ACME", ClientKind::Client, Some(60.0));
        let activity = ClientRecord::new("u_test", "Audit", ClientKind::Activity, None);
        let mut e = entry("2025-01-10", "09:00", "10:00");
        e.client_id = Some(client.id.clone());
        e.activity_id = Some(activity.id.clone());

        let rates = RateBook::new([client, activity]).with_fallback(20.0);
        assert_eq!(rates.rate_for(&e), 60.0);

        e.client_id = Some("c_unknown".to_string());
        assert_eq!(rates.rate_for(&e), 20.0);
    }

    #[test]
    fn test_invoice_lines_and_totals() {
        let entries = vec![
            entry("2025-01-11", "09:00", "17:00").with_rate(50.0),
            entry("2025-01-10", "09:00", "17:00").with_break("12", "00", "13", "00").with_rate(50.0),
        ];

        let invoice = build_invoice(&entries, &RateBook::default(), None, Period::all());

        assert_eq!(invoice.lines.len(), 2);
        assert_eq!(invoice.lines[0].date, "2025-01-10");
        assert_eq!(invoice.lines[0].hours, 7.0);
        assert_eq!(invoice.lines[0].amount, 350.0);
        assert_eq!(invoice.lines[1].date, "2025-01-11");
        assert_eq!(invoice.lines[1].amount, 400.0);
        assert_eq!(invoice.total_hours, 15.0);
        assert_eq!(invoice.total_amount, 750.0);
    }

    #[test]
    fn test_override_replaces_resolved_rates() {
        let entries = vec![entry("2025-01-10", "09:00", "11:00").with_rate(50.0)];

        let invoice = build_invoice(&entries, &RateBook::default(), Some(80.0), Period::all());
        assert_eq!(invoice.lines[0].rate, 80.0);
        assert_eq!(invoice.total_amount, 160.0);
    }

    #[test]
    fn test_zero_override_is_ignored() {
        let entries = vec![entry("2025-01-10", "09:00", "11:00").with_rate(50.0)];

        let invoice = build_invoice(&entries, &RateBook::default(), Some(0.0), Period::all());
        assert_eq!(invoice.lines[0].rate, 50.0);
        assert_eq!(invoice.total_amount, 100.0);
    }

    #[test]
    fn test_period_is_echoed() {
        let entries = vec![entry("2025-01-10", "09:00", "10:00"), entry("2025-02-03", "09:00", "10:00")];
        let period = Period::new(Some("2025-01-01".to_string()), Some("2025-01-31".to_string()));

        let invoice = build_invoice(filter_by_period(&entries, &period), &RateBook::default(), None, period.clone());
        assert_eq!(invoice.lines.len(), 1);
        assert_eq!(invoice.period(), period);
        assert_eq!(invoice.from.as_deref(), Some("2025-01-01"));
    }

    #[test]
    fn test_missing_rate_bills_zero() {
        let entries = vec![entry("2025-01-10", "09:00", "12:00").with_category("Support")];

        let invoice = build_invoice(&entries, &RateBook::default(), None, Period::all());
        assert_eq!(invoice.lines[0].hours, 3.0);
        assert_eq!(invoice.lines[0].amount, 0.0);
        assert_eq!(invoice.lines[0].category, "Support");
    }

    #[test]
    fn test_invoice_serializes_camel_case() {
        let entries = vec![entry("2025-01-10", "09:00", "10:00").with_rate(10.0)];
        let json = serde_json::to_value(build_invoice(&entries, &RateBook::default(), None, Period::all())).unwrap();

        assert_eq!(json["totalHours"], 1.0);
        assert_eq!(json["totalAmount"], 10.0);
        assert!(json["lines"][0].get("entryId").is_some());
    }
}
