//! Formatter implementations and column layouts.

use serde::Serialize;

use crate::operations::{DayCount, Reconciliation, RoomAvailability, RoomSync};
use crate::{Error, Guest, Payment, Reservation, Result, Room};

use super::{OutputFormatter, Tabular};

/// Tab-separated rows under an uppercase header. Empty cells print as `-`.
pub struct TableFormatter;

impl<T: Tabular> OutputFormatter<T> for TableFormatter {
    fn format(&self, records: &[T]) -> Result<String> {
        let mut lines = Vec::with_capacity(records.len() + 1);
        lines.push(
            T::headers()
                .iter()
                .map(|h| h.to_uppercase())
                .collect::<Vec<_>>()
                .join("\t"),
        );
        for record in records {
            let cells: Vec<String> = record
                .row()
                .into_iter()
                .map(|cell| if cell.is_empty() { "-".to_string() } else { cell })
                .collect();
            lines.push(cells.join("\t"));
        }
        Ok(lines.join("\n"))
    }
}

/// Pretty-printed JSON array.
pub struct JsonFormatter;

impl<T: Serialize> OutputFormatter<T> for JsonFormatter {
    fn format(&self, records: &[T]) -> Result<String> {
        serde_json::to_string_pretty(records).map_err(|e| Error::Validation {
            field: "json_output".to_string(),
            message: format!("failed to serialize to JSON: {e}"),
        })
    }
}

fn opt(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

impl Tabular for Room {
    fn headers() -> &'static [&'static str] {
        &["id", "number", "type", "rate", "max_guests", "status", "description"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.room_number.clone(),
            self.room_type.clone(),
            self.rate_per_night.to_string(),
            self.max_guests.to_string(),
            self.status.to_string(),
            opt(self.description.as_deref()),
        ]
    }
}

impl Tabular for Guest {
    fn headers() -> &'static [&'static str] {
        &["id", "name", "contact", "email"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.full_name.clone(),
            self.contact_number.clone(),
            opt(self.email.as_deref()),
        ]
    }
}

impl Tabular for RoomAvailability {
    fn headers() -> &'static [&'static str] {
        &["room_id", "number", "type", "price", "max_guests", "status"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.room_id.to_string(),
            self.room_number.clone(),
            self.room_type.clone(),
            self.price.to_string(),
            self.max_guests.to_string(),
            self.status.to_string(),
        ]
    }
}

impl Tabular for Reservation {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "number",
            "room_id",
            "guest_id",
            "check_in",
            "check_out",
            "nights",
            "status",
            "total",
            "paid",
            "payment",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.number.to_string(),
            self.room_id.to_string(),
            self.guest_id.to_string(),
            self.check_in.to_string(),
            self.check_out.to_string(),
            self.nights.to_string(),
            self.status.to_string(),
            self.total.to_string(),
            self.amount_paid.to_string(),
            self.payment_status.to_string(),
        ]
    }
}

impl Tabular for Payment {
    fn headers() -> &'static [&'static str] {
        &["id", "reservation_id", "amount", "paid_at", "method", "note"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.reservation_id.to_string(),
            self.amount.to_string(),
            self.paid_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            opt(self.method.as_deref()),
            opt(self.note.as_deref()),
        ]
    }
}

impl Tabular for RoomSync {
    fn headers() -> &'static [&'static str] {
        &["room_id", "number", "previous", "current"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.room_id.to_string(),
            self.room_number.clone(),
            self.previous.to_string(),
            self.current.to_string(),
        ]
    }
}

impl Tabular for Reconciliation {
    fn headers() -> &'static [&'static str] {
        &["reservation_id", "previous_paid", "paid", "payment"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.reservation_id.to_string(),
            self.previous_amount_paid.to_string(),
            self.amount_paid.to_string(),
            self.payment_status.to_string(),
        ]
    }
}

impl Tabular for DayCount {
    fn headers() -> &'static [&'static str] {
        &["day", "count"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.label.clone(), self.count.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Money, RoomStatus};

    fn room() -> Room {
        Room {
            id: 7,
            room_number: "101".into(),
            room_type: "Deluxe".into(),
            rate_per_night: Money::new(12000, 2),
            max_guests: 2,
            status: RoomStatus::Booked,
            description: None,
            image_url: None,
        }
    }

    #[test]
    fn test_table_header_and_placeholder() {
        let out = TableFormatter.format(&[room()]).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID\tNUMBER\tTYPE\tRATE\tMAX_GUESTS\tSTATUS\tDESCRIPTION"
        );
        assert_eq!(lines.next().unwrap(), "7\t101\tDeluxe\t120.00\t2\tBOOKED\t-");
    }

    #[test]
    fn test_table_empty_has_header_only() {
        let out = TableFormatter.format(&Vec::<Room>::new()).unwrap();
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_json_is_structured() {
        let out = JsonFormatter.format(&[room()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["room_number"], "101");
        assert_eq!(value[0]["status"], "BOOKED");
    }

    #[test]
    fn test_rows_match_headers() {
        let day = DayCount {
            label: "2026-02-12".into(),
            count: 3,
        };
        assert_eq!(day.row().len(), DayCount::headers().len());
        assert_eq!(room().row().len(), Room::headers().len());

        let guest = Guest {
            id: 4,
            full_name: "Ada Lovelace".into(),
            email: None,
            contact_number: "0771".into(),
        };
        assert_eq!(guest.row(), ["4", "Ada Lovelace", "0771", ""]);
        assert_eq!(guest.row().len(), Guest::headers().len());
    }
}
