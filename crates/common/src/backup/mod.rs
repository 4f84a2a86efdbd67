//! Backup export and import
//!
//! A backup is a single JSON document holding the user's clients and bids
//! plus the export timestamp. Import validates the overall shape before
//! touching the database, so a corrupted file is rejected with a clear
//! message instead of a half-applied upsert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::models::{Bid, Client};
use crate::errors::{AppError, Result};

/// The on-disk backup format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupDocument {
    pub clients: Vec<Client>,
    pub bids: Vec<Bid>,
    pub exported_at: DateTime<Utc>,
}

impl BackupDocument {
    pub fn new(clients: Vec<Client>, bids: Vec<Bid>) -> Self {
        Self {
            clients,
            bids,
            exported_at: Utc::now(),
        }
    }
}

/// Checks that a backup file has the expected top-level shape: a JSON
/// object with `clients` and `bids` arrays. Runs before deserialization so
/// the error names the missing collection rather than a serde path.
pub fn validate_shape(value: &serde_json::Value) -> Result<()> {
    let object = value.as_object().ok_or_else(|| AppError::InvalidBackup {
        message: "arquivo de backup inválido ou corrompido".into(),
    })?;

    if !object.get("clients").map(|v| v.is_array()).unwrap_or(false) {
        return Err(AppError::InvalidBackup {
            message: "arquivo de backup inválido: lista de clientes ausente".into(),
        });
    }
    if !object.get("bids").map(|v| v.is_array()).unwrap_or(false) {
        return Err(AppError::InvalidBackup {
            message: "arquivo de backup inválido: lista de licitações ausente".into(),
        });
    }
    Ok(())
}

/// Validates the shape and deserializes into the typed document
pub fn parse(value: serde_json::Value) -> Result<BackupDocument> {
    validate_shape(&value)?;
    let document: BackupDocument =
        serde_json::from_value(value).map_err(|e| AppError::InvalidBackup {
            message: format!("arquivo de backup inválido: {e}"),
        })?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use uuid::Uuid;

    fn client_row(user_id: Uuid) -> Client {
        Client {
            id: Uuid::new_v4(),
            user_id,
            company_name: "Construtora Silva LTDA".into(),
            cnpj: Some("12.345.678/0001-90".into()),
            status: "active".into(),
            contact_person: None,
            email: Some("contato@silva.com.br".into()),
            phone: None,
            website: None,
            street: None,
            number: None,
            neighborhood: None,
            city: Some("Itajaí".into()),
            state: Some("SC".into()),
            zip_code: None,
            notes: None,
            created_at: Utc::now().fixed_offset(),
        }
    }

    fn bid_row(user_id: Uuid, client_id: Uuid) -> Bid {
        Bid {
            id: Uuid::new_v4(),
            user_id,
            client_id,
            title: "Pregão 42/2026".into(),
            status: "Disputa".into(),
            value: 150_000.0,
            deadline: NaiveDate::from_ymd_opt(2026, 9, 15),
            portal: Some("ComprasNet".into()),
            created_at: Utc::now().fixed_offset(),
            updated_at: Utc::now().fixed_offset(),
        }
    }

    #[test]
    fn shape_requires_object() {
        let err = validate_shape(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, AppError::InvalidBackup { .. }));
    }

    #[test]
    fn shape_requires_clients_array() {
        let err = validate_shape(&json!({ "bids": [] })).unwrap_err();
        match err {
            AppError::InvalidBackup { message } => assert!(message.contains("clientes")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn shape_requires_bids_array() {
        let err = validate_shape(&json!({ "clients": [] })).unwrap_err();
        match err {
            AppError::InvalidBackup { message } => assert!(message.contains("licitações")),
            other => panic!("unexpected error: {other:?}"),
        }

        // a non-array value is as bad as a missing one
        let err = validate_shape(&json!({ "clients": [], "bids": "x" })).unwrap_err();
        assert!(matches!(err, AppError::InvalidBackup { .. }));
    }

    #[test]
    fn empty_collections_are_a_valid_backup() {
        let value = json!({
            "clients": [],
            "bids": [],
            "exported_at": "2026-08-29T12:00:00Z"
        });
        validate_shape(&value).unwrap();
        let document = parse(value).unwrap();
        assert!(document.clients.is_empty());
        assert!(document.bids.is_empty());
    }

    #[test]
    fn export_round_trips_through_parse_unchanged() {
        let user_id = Uuid::new_v4();
        let client = client_row(user_id);
        let bid = bid_row(user_id, client.id);
        let document = BackupDocument::new(vec![client], vec![bid]);

        // importing a file you just exported must reproduce the same rows
        let file = serde_json::to_value(&document).unwrap();
        let parsed = parse(file).unwrap();
        assert_eq!(parsed, document);
    }

    #[test]
    fn malformed_rows_fail_after_shape_check() {
        let value = json!({
            "clients": [{ "bogus": true }],
            "bids": [],
            "exported_at": "2026-08-29T12:00:00Z"
        });
        // shape is fine, row content is not
        validate_shape(&value).unwrap();
        let err = parse(value).unwrap_err();
        assert!(matches!(err, AppError::InvalidBackup { .. }));
    }
}
