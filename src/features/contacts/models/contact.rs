use chrono::{DateTime, Utc};
use csv::StringRecord;
use sqlx::FromRow;
use uuid::Uuid;

/// Contact parsed from one CSV data row, not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub country_code: String,
    pub whatsapp_number: String,
    pub email: String,
    pub tags: String,
}

impl NewContact {
    /// Maps the six positional fields of a row. Returns `None` when the row
    /// has a different number of fields.
    pub fn from_record(record: &StringRecord) -> Option<Self> {
        let fields: Vec<&str> = record.iter().collect();
        let [first_name, last_name, country_code, whatsapp_number, email, tags] =
            <[&str; 6]>::try_from(fields).ok()?;

        Some(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            country_code: country_code.to_string(),
            whatsapp_number: whatsapp_number.to_string(),
            email: email.to_string(),
            tags: tags.to_string(),
        })
    }
}

/// Database model for contacts
#[derive(Debug, Clone, FromRow)]
pub struct Contact {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub country_code: String,
    pub whatsapp_number: String,
    pub email: String,
    pub tags: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record_maps_columns_in_order() {
        let record = StringRecord::from(vec!["Jane", "Doe", "+1", "5551234", "jane@x.com", "vip"]);
        let contact = NewContact::from_record(&record).unwrap();

        assert_eq!(contact.first_name, "Jane");
        assert_eq!(contact.last_name, "Doe");
        assert_eq!(contact.country_code, "+1");
        assert_eq!(contact.whatsapp_number, "5551234");
        assert_eq!(contact.email, "jane@x.com");
        assert_eq!(contact.tags, "vip");
    }

    #[test]
    fn test_from_record_rejects_wrong_width() {
        let short = StringRecord::from(vec!["Jane", "Doe", "+1"]);
        let long = StringRecord::from(vec!["a", "b", "c", "d", "e", "f", "g"]);

        assert!(NewContact::from_record(&short).is_none());
        assert!(NewContact::from_record(&long).is_none());
    }
}
