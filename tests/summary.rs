#[cfg(test)]
mod tests {
    use heures::libs::client::{ClientKind, ClientRecord};
    use heures::libs::entry::WorkEntry;
    use heures::libs::rate::RateBook;
    use heures::libs::summary::{aggregate, SummaryCalculator};

    fn entry(day: &str, start: &str, end: &str) -> WorkEntry {
        WorkEntry::new("u_test", day, start, day, end)
    }

    #[test]
    fn test_same_day_two_categories() {
        let entries = vec![
            entry("2025-01-10", "08:00", "12:00").with_rate(40.0),
            entry("2025-01-10", "13:00", "15:00").with_rate(60.0).with_category("Formation"),
        ];

        let summary = entries.summarize(&RateBook::default());

        assert_eq!(summary.total_hours, 6.0);
        assert_eq!(summary.total_amount, 280.0);
        assert_eq!(summary.unique_days, 1);
        assert_eq!(summary.avg_hours_per_day, 6.0);

        let day = &summary.by_date["2025-01-10"];
        assert_eq!(day.hours, 6.0);
        assert_eq!(day.amount, 280.0);
        assert_eq!(day.entries, 2);

        assert_eq!(summary.by_category.len(), 2);
        assert_eq!(summary.by_category[0].category, "Standard");
        assert_eq!(summary.by_category[0].amount, 160.0);
        assert_eq!(summary.by_category[1].category, "Formation");
        assert_eq!(summary.by_category[1].hours, 2.0);
        assert_eq!(summary.by_category[1].amount, 120.0);
    }

    #[test]
    fn test_empty_input() {
        let summary = aggregate(Vec::<&WorkEntry>::new(), &RateBook::default());
        assert_eq!(summary.total_hours, 0.0);
        assert_eq!(summary.total_amount, 0.0);
        assert_eq!(summary.unique_days, 0);
        assert_eq!(summary.avg_hours_per_day, 0.0);
        assert!(summary.by_category.is_empty());
        assert!(summary.by_date.is_empty());
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let entries = vec![
            entry("2025-01-10", "09:00", "17:00").with_break("12", "00", "13", "00").with_rate(50.0),
            entry("2025-01-11", "09:00", "11:30").with_rate(45.0).with_category("Support"),
            entry("2025-01-13", "22:00", "23:00"),
        ];
        let rates = RateBook::default().with_fallback(30.0);

        assert_eq!(entries.summarize(&rates), entries.summarize(&rates));
    }

    #[test]
    fn test_average_over_distinct_days() {
        let entries = vec![
            entry("2025-01-10", "09:00", "13:00"),
            entry("2025-01-10", "14:00", "16:00"),
            entry("2025-01-11", "09:00", "12:00"),
        ];

        let summary = entries.summarize(&RateBook::default());
        assert_eq!(summary.total_hours, 9.0);
        assert_eq!(summary.unique_days, 2);
        assert_eq!(summary.avg_hours_per_day, 4.5);
        assert_eq!(summary.total_amount, 0.0);
    }

    #[test]
    fn test_zero_duration_entries_still_count() {
        let entries = vec![entry("2025-01-10", "17:00", "09:00")];

        let summary = entries.summarize(&RateBook::default());
        assert_eq!(summary.unique_days, 1);
        assert_eq!(summary.by_date["2025-01-10"].entries, 1);
        assert_eq!(summary.total_hours, 0.0);
    }

    #[test]
    fn test_category_order_by_amount_then_name() {
        let entries = vec![
            entry("2025-01-10", "09:00", "10:00").with_rate(10.0).with_category("Réunion"),
            entry("2025-01-10", "10:00", "11:00").with_rate(10.0).with_category("Formation"),
            entry("2025-01-10", "11:00", "12:00").with_rate(90.0).with_category("Support"),
        ];

        let summary = entries.summarize(&RateBook::default());
        let order: Vec<&str> = summary.by_category.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(order, vec!["Support", "Formation", "Réunion"]);
    }

    #[test]
    fn test_client_rate_applies_in_summary() {
        let client = ClientRecord::new("u_test", "ACME", ClientKind::Client, Some(80.0));
        let mut e = entry("2025-01-10", "09:00", "11:00");
        e.client_id = Some(client.id.clone());

        let summary = aggregate(&[e], &RateBook::new([client]));
        assert_eq!(summary.total_amount, 160.0);
    }

    #[test]
    fn test_serialized_field_names() {
        let entries = vec![entry("2025-01-10", "09:00", "10:00")];
        let json = serde_json::to_value(entries.summarize(&RateBook::default())).unwrap();

        for key in ["totalHours", "totalAmount", "uniqueDays", "avgHoursPerDay", "byCategory", "byDate"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }
}
