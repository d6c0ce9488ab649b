use super::client::ClientRecord;
use super::entry::WorkEntry;
use super::formatter::{format_amount, format_hours, format_rate};
use super::invoice::Invoice;
use super::rate::RateBook;
use super::summary::Summary;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use prettytable::{format, row, Table};

/// Terminal tables for the CLI.
pub struct View {}

impl View {
    pub fn entries(entries: &[WorkEntry], rates: &RateBook) -> Result<()> {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        table.add_row(row!["ID", "DATE", "START", "END", "BREAK", "HOURS", "RATE", "CATEGORY", "CLIENT"]);
        for entry in entries {
            let pause = if entry.has_break {
                format!(
                    "{}:{}-{}:{}",
                    entry.break_start_hour.as_deref().unwrap_or("00"),
                    entry.break_start_min.as_deref().unwrap_or("00"),
                    entry.break_end_hour.as_deref().unwrap_or("00"),
                    entry.break_end_min.as_deref().unwrap_or("00")
                )
            } else {
                String::new()
            };
            table.add_row(row![
                entry.id,
                entry.start_date,
                entry.start_time,
                format!("{} {}", entry.end_date, entry.end_time),
                pause,
                r->format_hours(entry.duration_hours()),
                r->format_rate(rates.rate_for(entry)),
                entry.category_label(),
                entry.client_name.as_deref().or(entry.activity_name.as_deref()).unwrap_or("")
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn clients(clients: &[ClientRecord]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "TYPE", "DEFAULT RATE", "CITY", "SIRET"]);
        for client in clients {
            table.add_row(row![
                client.id,
                client.name,
                client.kind,
                r->client.default_rate.map(format_rate).unwrap_or_default(),
                client.city.as_deref().unwrap_or(""),
                client.siret.as_deref().unwrap_or("")
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn summary(summary: &Summary) -> Result<()> {
        let mut cards = Table::new();
        cards.add_row(row!["TOTAL HOURS", "TOTAL AMOUNT", "DAYS", "AVG / DAY"]);
        cards.add_row(row![
            format_hours(summary.total_hours),
            format_amount(summary.total_amount),
            summary.unique_days,
            format_hours(summary.avg_hours_per_day)
        ]);
        cards.printstd();

        msg_print!(Message::ByCategoryHeader, true);
        let mut categories = Table::new();
        categories.add_row(row!["CATEGORY", "ENTRIES", "HOURS", "AMOUNT"]);
        for bucket in &summary.by_category {
            categories.add_row(row![bucket.category, r->bucket.entries, r->format!("{:.1}", bucket.hours), r->format_amount(bucket.amount)]);
        }
        categories.printstd();

        msg_print!(Message::ByDateHeader, true);
        let mut dates = Table::new();
        dates.add_row(row!["DATE", "ENTRIES", "HOURS", "AMOUNT"]);
        for (date, day) in &summary.by_date {
            dates.add_row(row![date, r->day.entries, r->format_hours(day.hours), r->format_amount(day.amount)]);
        }
        dates.printstd();

        Ok(())
    }

    pub fn invoice(invoice: &Invoice) -> Result<()> {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        table.add_row(row!["DATE", "HOURS", "RATE", "AMOUNT", "CATEGORY"]);
        for line in &invoice.lines {
            table.add_row(row![
                line.date,
                r->format!("{:.2}", line.hours),
                r->format_rate(line.rate),
                r->format_amount(line.amount),
                line.category
            ]);
        }
        table.add_row(row![
            b->"Total",
            rb->format!("{:.2}", invoice.total_hours),
            "",
            rb->format_amount(invoice.total_amount),
            ""
        ]);
        table.printstd();

        Ok(())
    }

    pub fn categories(categories: &[String]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["CATEGORY", "DEFAULT"]);
        for name in categories {
            let default = if super::categories::is_default(name) { "yes" } else { "" };
            table.add_row(row![name, default]);
        }
        table.printstd();
        Ok(())
    }
}
