#[cfg(test)]
mod tests {
    use heures::libs::client::ClientKind;
    use heures::libs::validate::{ingest, period_bound, ClientPayload, EntryPatch, NewWorkEntry, SignupRequest, UserPatch, ValidationError};
    use serde_json::json;

    fn payload(value: serde_json::Value) -> NewWorkEntry {
        serde_json::from_value(value).unwrap()
    }

    fn valid_json() -> serde_json::Value {
        json!({
            "userId": "u_1",
            "startDate": "2025-01-10",
            "startTime": "09:00",
            "endDate": "2025-01-10",
            "endTime": "17:00"
        })
    }

    #[test]
    fn test_valid_entry() {
        let entry = payload(valid_json()).validate().unwrap();
        assert_eq!(entry.user_id, "u_1");
        assert!(entry.id.starts_with("e_"));
        assert!(!entry.has_break);
        assert_eq!(entry.duration_hours(), 8.0);
    }

    #[test]
    fn test_supplied_id_is_kept() {
        let mut value = valid_json();
        value["id"] = json!("e_fixed");
        assert_eq!(payload(value).validate().unwrap().id, "e_fixed");
    }

    #[test]
    fn test_missing_field_is_reported() {
        let mut value = valid_json();
        value.as_object_mut().unwrap().remove("endTime");

        let error = payload(value).validate().unwrap_err();
        assert_eq!(error, ValidationError::Missing { field: "endTime" });
        assert_eq!(error.field(), Some("endTime"));
    }

    #[test]
    fn test_malformed_shapes_are_rejected() {
        let mut value = valid_json();
        value["startDate"] = json!("10/01/2025");
        assert_eq!(payload(value).validate().unwrap_err().field(), Some("startDate"));

        let mut value = valid_json();
        value["startTime"] = json!("9:00");
        assert_eq!(payload(value).validate().unwrap_err().field(), Some("startTime"));
    }

    #[test]
    fn test_impossible_date_passes_shape_check() {
        let mut value = valid_json();
        value["startDate"] = json!("2025-02-30");
        value["endDate"] = json!("2025-02-30");

        let entry = payload(value).validate().unwrap();
        assert_eq!(entry.duration_hours(), 0.0);
    }

    #[test]
    fn test_lenient_break_and_rate_fields() {
        let mut value = valid_json();
        value["hasBreak"] = json!(true);
        value["breakStartHour"] = json!(12);
        value["breakStartMin"] = json!("00");
        value["breakEndHour"] = json!("13");
        value["breakEndMin"] = json!(0);
        value["hourlyRate"] = json!("42,5");

        let entry = payload(value).validate().unwrap();
        assert_eq!(entry.break_start_hour.as_deref(), Some("12"));
        assert_eq!(entry.break_end_min.as_deref(), Some("0"));
        assert_eq!(entry.hourly_rate, Some(42.5));
        assert_eq!(entry.duration_hours(), 7.0);
    }

    #[test]
    fn test_break_component_too_long() {
        let mut value = valid_json();
        value["breakStartHour"] = json!("123");
        assert_eq!(payload(value).validate().unwrap_err().field(), Some("breakStartHour"));
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let mut value = valid_json();
        value["hourlyRate"] = json!(-10);
        assert_eq!(payload(value).validate().unwrap_err().field(), Some("hourlyRate"));
    }

    #[test]
    fn test_legacy_client_aliases() {
        let mut value = valid_json();
        value["employerId"] = json!("c_1");
        value["projectName"] = json!("ACME");

        let entry = payload(value).validate().unwrap();
        assert_eq!(entry.client_id.as_deref(), Some("c_1"));
        assert_eq!(entry.client_name.as_deref(), Some("ACME"));
    }

    #[test]
    fn test_patch_is_atomic() {
        let mut entry = payload(valid_json()).validate().unwrap();
        let original = entry.clone();

        let patch: EntryPatch = serde_json::from_value(json!({ "endTime": "18:00", "startDate": "bad" })).unwrap();
        assert!(patch.apply(&mut entry).is_err());
        assert_eq!(entry, original);

        let patch: EntryPatch = serde_json::from_value(json!({ "endTime": "18:00", "category": "Formation" })).unwrap();
        patch.apply(&mut entry).unwrap();
        assert_eq!(entry.end_time, "18:00");
        assert_eq!(entry.category_label(), "Formation");
        assert_eq!(entry.duration_hours(), 9.0);
    }

    #[test]
    fn test_patch_null_clears_and_absent_keeps() {
        let mut value = valid_json();
        value["hourlyRate"] = json!(50);
        value["location"] = json!({ "city": "Lyon" });
        value["comment"] = json!("on site");
        let mut entry = payload(value).validate().unwrap();

        let patch: EntryPatch = serde_json::from_value(json!({ "endTime": "18:00" })).unwrap();
        patch.apply(&mut entry).unwrap();
        assert_eq!(entry.hourly_rate, Some(50.0));
        assert_eq!(entry.location.as_ref().and_then(|l| l.city.as_deref()), Some("Lyon"));
        assert_eq!(entry.comment.as_deref(), Some("on site"));

        let patch: EntryPatch = serde_json::from_value(json!({ "hourlyRate": null, "location": null, "comment": null })).unwrap();
        patch.apply(&mut entry).unwrap();
        assert_eq!(entry.hourly_rate, None);
        assert_eq!(entry.location, None);
        assert_eq!(entry.comment, None);
        assert_eq!(entry.end_time, "18:00");

        let patch: EntryPatch = serde_json::from_value(json!({ "hourlyRate": "42,5" })).unwrap();
        patch.apply(&mut entry).unwrap();
        assert_eq!(entry.hourly_rate, Some(42.5));

        let patch: EntryPatch = serde_json::from_value(json!({ "hourlyRate": -1 })).unwrap();
        let err = patch.apply(&mut entry).unwrap_err();
        assert_eq!(err.field(), Some("hourlyRate"));
        assert_eq!(entry.hourly_rate, Some(42.5));
    }

    #[test]
    fn test_period_bound() {
        assert_eq!(period_bound("from", None).unwrap(), None);
        assert_eq!(period_bound("from", Some("  ".to_string())).unwrap(), None);
        assert_eq!(period_bound("from", Some(" 2025-01-05 ".to_string())).unwrap().as_deref(), Some("2025-01-05"));

        let err = period_bound("from", Some("2025-1-5".to_string())).unwrap_err();
        assert_eq!(err.field(), Some("from"));
        let err = period_bound("to", Some("31/01/2025".to_string())).unwrap_err();
        assert_eq!(err.field(), Some("to"));
    }

    #[test]
    fn test_ingest_keeps_valid_records() {
        let records = vec![
            valid_json(),
            json!({ "userId": "u_1", "startDate": "2025-01-10" }),
            json!("not an object"),
            valid_json(),
        ];

        let ingested = ingest(records);
        assert_eq!(ingested.entries.len(), 2);
        let skipped: Vec<usize> = ingested.skipped.iter().map(|(index, _)| *index).collect();
        assert_eq!(skipped, vec![1, 2]);
    }

    #[test]
    fn test_signup_validation() {
        let request: SignupRequest = serde_json::from_value(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "  Ada@Example.COM ",
            "password": "secret1"
        }))
        .unwrap();
        let signup = request.validate().unwrap();
        assert_eq!(signup.email, "ada@example.com");

        let short: SignupRequest = serde_json::from_value(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "password": "123"
        }))
        .unwrap();
        assert_eq!(short.validate().unwrap_err().field(), Some("password"));

        let bad_email: SignupRequest = serde_json::from_value(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada.example.com",
            "password": "secret1"
        }))
        .unwrap();
        assert_eq!(bad_email.validate().unwrap_err().field(), Some("email"));
    }

    #[test]
    fn test_user_patch_rejects_long_names() {
        let patch = UserPatch {
            first_name: Some("x".repeat(51)),
            ..Default::default()
        };
        assert_eq!(patch.validate().unwrap_err().field(), Some("firstName"));
    }

    #[test]
    fn test_client_payload() {
        let payload: ClientPayload = serde_json::from_value(json!({
            "name": " Audit ",
            "type": "activity",
            "defaultRate": "70"
        }))
        .unwrap();

        let record = payload.into_record("u_1").unwrap();
        assert_eq!(record.name, "Audit");
        assert_eq!(record.kind, ClientKind::Activity);
        assert_eq!(record.default_rate, Some(70.0));
        assert!(record.id.starts_with("c_"));

        let missing_name = ClientPayload::default();
        assert_eq!(missing_name.into_record("u_1").unwrap_err().field(), Some("name"));
    }
}
