#[cfg(test)]
mod tests {
    use heures::libs::entry::WorkEntry;
    use heures::libs::export::{write_entries_json, ExportFormat, Exporter};
    use heures::libs::invoice::{build_invoice, Invoice};
    use heures::libs::period::Period;
    use heures::libs::rate::RateBook;
    use heures::libs::validate::ingest;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ExportTestContext {
        temp_dir: TempDir,
        entries: Vec<WorkEntry>,
        invoice: Invoice,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let entries = vec![
                WorkEntry::new("u_test", "2025-01-10", "09:00", "2025-01-10", "17:00")
                    .with_break("12", "00", "13", "00")
                    .with_rate(50.0),
                WorkEntry::new("u_test", "2025-01-11", "09:00", "2025-01-11", "17:00")
                    .with_rate(50.0)
                    .with_category("Réunion"),
            ];
            let period = Period::new(Some("2025-01-01".to_string()), Some("2025-01-31".to_string()));
            let invoice = build_invoice(&entries, &RateBook::default(), None, period);
            ExportTestContext { temp_dir, entries, invoice }
        }
    }

    impl ExportTestContext {
        fn output(&self, name: &str) -> PathBuf {
            self.temp_dir.path().join(name)
        }
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_csv(ctx: &mut ExportTestContext) {
        let output_path = ctx.output("facture.csv");
        let exporter = Exporter::new(ExportFormat::Csv, output_path.clone());
        assert_eq!(exporter.export_invoice(&ctx.invoice).unwrap(), output_path);

        let bytes = std::fs::read(&output_path).unwrap();
        assert!(bytes.starts_with(b"\xEF\xBB\xBF"));

        let content = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Date;Heures;Taux;Montant;Catégorie");
        assert_eq!(lines[1], "2025-01-10;7.00;50.00;350.00;Standard");
        assert_eq!(lines[2], "2025-01-11;8.00;50.00;400.00;Réunion");
        assert_eq!(lines[3], "Total;15.00;;750.00;");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_json(ctx: &mut ExportTestContext) {
        let output_path = ctx.output("facture.json");
        Exporter::new(ExportFormat::Json, output_path.clone())
            .export_invoice(&ctx.invoice)
            .unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        let read_back: Invoice = serde_json::from_str(&content).unwrap();
        assert_eq!(read_back, ctx.invoice);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_excel(ctx: &mut ExportTestContext) {
        let output_path = ctx.output("facture.xlsx");
        Exporter::new(ExportFormat::Excel, output_path.clone())
            .export_invoice(&ctx.invoice)
            .unwrap();

        assert!(output_path.exists());
        assert!(std::fs::metadata(&output_path).unwrap().len() > 0);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_default_file_name(ctx: &mut ExportTestContext) {
        let exporter = Exporter::for_invoice(ExportFormat::Csv, None, &ctx.invoice);
        assert_eq!(exporter.output_path(), PathBuf::from("facture_2025-01-01_2025-01-31.csv").as_path());

        let unbounded = build_invoice(&ctx.entries, &RateBook::default(), None, Period::all());
        let exporter = Exporter::for_invoice(ExportFormat::Excel, None, &unbounded);
        assert_eq!(exporter.output_path(), PathBuf::from("facture_debut_fin.xlsx").as_path());
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_entries_json_can_be_imported(ctx: &mut ExportTestContext) {
        let output_path = ctx.output("entries.json");
        write_entries_json(&output_path, &ctx.entries).unwrap();

        let raw: Vec<serde_json::Value> = serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
        let ingested = ingest(raw);
        assert!(ingested.skipped.is_empty());
        assert_eq!(ingested.entries, ctx.entries);
    }
}
