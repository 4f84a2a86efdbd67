//! Data access layer
//!
//! All queries are scoped to the authenticated user. Write payloads are
//! explicit structs so callers can never smuggle server-managed columns
//! (ids, owners, timestamps) through a request body.

use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use uuid::Uuid;
use validator::Validate;

use super::models::{
    client, event, profile, Bid, BidActiveModel, BidColumn,
    BidEntity, Client, ClientActiveModel, ClientColumn, ClientDocument, ClientDocumentActiveModel,
    ClientDocumentColumn, ClientDocumentEntity, ClientEntity, ClientHistory,
    ClientHistoryActiveModel, ClientHistoryColumn, ClientHistoryEntity, Event, EventActiveModel,
    EventColumn, EventEntity, Profile, ProfileActiveModel, ProfileEntity,
};
use super::DbPool;
use crate::errors::{AppError, Result};
use crate::pipeline::BidStatus;

/// Accepts a JSON number, a numeric string, or a blank string (treated as
/// zero) for monetary fields. Forms submit blank when the field is untouched.
fn deserialize_money<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(Raw::Num(n)) => Ok(n),
        Some(Raw::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(0.0)
            } else {
                trimmed.parse().map_err(serde::de::Error::custom)
            }
        }
    }
}

/// Client write payload. Presence of `id` selects update over insert.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClientPayload {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 500))]
    pub company_name: String,
    pub cnpj: Option<String>,
    #[serde(default = "default_client_status")]
    pub status: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<String>,
}

fn default_client_status() -> String {
    client::DEFAULT_STATUS.to_string()
}

/// Bid write payload. Presence of `id` selects update over insert.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BidPayload {
    pub id: Option<Uuid>,
    pub client_id: Uuid,
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_money")]
    pub value: f64,
    pub deadline: Option<NaiveDate>,
    pub portal: Option<String>,
}

/// Agenda event write payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EventPayload {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub event_time: Option<NaiveTime>,
    #[serde(default = "default_event_type")]
    pub event_type: String,
    pub client_id: Option<Uuid>,
}

fn default_event_type() -> String {
    event::DEFAULT_EVENT_TYPE.to_string()
}

/// Profile write payload; the row is keyed by the caller's user id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfilePayload {
    pub company_name: Option<String>,
    pub cnpj: Option<String>,
    pub email_contact: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub representative_name: Option<String>,
    pub representative_cpf: Option<String>,
    pub bank_name: Option<String>,
    pub bank_agency: Option<String>,
    pub bank_account: Option<String>,
    pub pix_key: Option<String>,
}

/// Document write payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DocumentPayload {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    pub expiration_date: NaiveDate,
}

/// Counts returned by a backup import
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ImportCounts {
    pub clients: usize,
    pub bids: usize,
}

/// Repository for all persisted entities
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    // ----- clients -----

    /// All clients for a user with their documents, ordered by company name
    pub async fn list_clients(&self, user_id: Uuid) -> Result<Vec<(Client, Vec<ClientDocument>)>> {
        let rows = ClientEntity::find()
            .filter(ClientColumn::UserId.eq(user_id))
            .order_by_asc(ClientColumn::CompanyName)
            .find_with_related(ClientDocumentEntity)
            .all(self.pool.reader())
            .await?;
        Ok(rows)
    }

    pub async fn get_client(&self, user_id: Uuid, id: Uuid) -> Result<Client> {
        ClientEntity::find_by_id(id)
            .filter(ClientColumn::UserId.eq(user_id))
            .one(self.pool.reader())
            .await?
            .ok_or_else(|| AppError::ClientNotFound { id: id.to_string() })
    }

    /// Insert or update depending on whether the payload carries an id
    pub async fn save_client(&self, user_id: Uuid, payload: ClientPayload) -> Result<Client> {
        payload.validate().map_err(|e| AppError::Validation {
            message: e.to_string(),
            field: None,
        })?;
        if payload.company_name.trim().is_empty() {
            return Err(AppError::MissingField {
                field: "company_name".into(),
            });
        }

        match payload.id {
            Some(id) => {
                let existing = self.get_client(user_id, id).await?;
                let mut model: ClientActiveModel = existing.into();
                model.company_name = Set(payload.company_name);
                model.cnpj = Set(payload.cnpj);
                model.status = Set(payload.status);
                model.contact_person = Set(payload.contact_person);
                model.email = Set(payload.email);
                model.phone = Set(payload.phone);
                model.website = Set(payload.website);
                model.street = Set(payload.street);
                model.number = Set(payload.number);
                model.neighborhood = Set(payload.neighborhood);
                model.city = Set(payload.city);
                model.state = Set(payload.state);
                model.zip_code = Set(payload.zip_code);
                model.notes = Set(payload.notes);
                Ok(model.update(self.pool.writer()).await?)
            }
            None => {
                let model = ClientActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user_id),
                    company_name: Set(payload.company_name),
                    cnpj: Set(payload.cnpj),
                    status: Set(payload.status),
                    contact_person: Set(payload.contact_person),
                    email: Set(payload.email),
                    phone: Set(payload.phone),
                    website: Set(payload.website),
                    street: Set(payload.street),
                    number: Set(payload.number),
                    neighborhood: Set(payload.neighborhood),
                    city: Set(payload.city),
                    state: Set(payload.state),
                    zip_code: Set(payload.zip_code),
                    notes: Set(payload.notes),
                    created_at: Set(Utc::now().fixed_offset()),
                };
                Ok(model.insert(self.pool.writer()).await?)
            }
        }
    }

    /// Removes the client; documents and history rows cascade
    pub async fn delete_client(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        let client = self.get_client(user_id, id).await?;
        client.delete(self.pool.writer()).await?;
        Ok(())
    }

    // ----- client documents -----

    pub async fn list_documents(
        &self,
        user_id: Uuid,
        client_id: Uuid,
    ) -> Result<Vec<ClientDocument>> {
        // ownership gate before exposing child rows
        self.get_client(user_id, client_id).await?;

        let rows = ClientDocumentEntity::find()
            .filter(ClientDocumentColumn::ClientId.eq(client_id))
            .order_by_asc(ClientDocumentColumn::ExpirationDate)
            .all(self.pool.reader())
            .await?;
        Ok(rows)
    }

    pub async fn add_document(
        &self,
        user_id: Uuid,
        client_id: Uuid,
        payload: DocumentPayload,
    ) -> Result<ClientDocument> {
        self.get_client(user_id, client_id).await?;

        payload.validate().map_err(|e| AppError::Validation {
            message: e.to_string(),
            field: None,
        })?;
        if payload.title.trim().is_empty() {
            return Err(AppError::MissingField {
                field: "title".into(),
            });
        }

        let model = ClientDocumentActiveModel {
            id: Set(Uuid::new_v4()),
            client_id: Set(client_id),
            title: Set(payload.title),
            expiration_date: Set(payload.expiration_date),
            created_at: Set(Utc::now().fixed_offset()),
        };
        Ok(model.insert(self.pool.writer()).await?)
    }

    pub async fn delete_document(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        let doc = ClientDocumentEntity::find_by_id(id)
            .one(self.pool.reader())
            .await?
            .ok_or_else(|| AppError::DocumentNotFound { id: id.to_string() })?;

        self.get_client(user_id, doc.client_id).await?;
        doc.delete(self.pool.writer()).await?;
        Ok(())
    }

    // ----- client history -----

    /// Interaction log in chronological order
    pub async fn list_history(&self, user_id: Uuid, client_id: Uuid) -> Result<Vec<ClientHistory>> {
        self.get_client(user_id, client_id).await?;

        let rows = ClientHistoryEntity::find()
            .filter(ClientHistoryColumn::ClientId.eq(client_id))
            .order_by_asc(ClientHistoryColumn::CreatedAt)
            .all(self.pool.reader())
            .await?;
        Ok(rows)
    }

    pub async fn append_history(
        &self,
        user_id: Uuid,
        client_id: Uuid,
        content: String,
    ) -> Result<ClientHistory> {
        self.get_client(user_id, client_id).await?;

        if content.trim().is_empty() {
            return Err(AppError::MissingField {
                field: "content".into(),
            });
        }

        let model = ClientHistoryActiveModel {
            id: Set(Uuid::new_v4()),
            client_id: Set(client_id),
            user_id: Set(user_id),
            content: Set(content),
            created_at: Set(Utc::now().fixed_offset()),
        };
        Ok(model.insert(self.pool.writer()).await?)
    }

    // ----- bids -----

    /// All bids for a user with their client, soonest deadline first
    pub async fn list_bids(&self, user_id: Uuid) -> Result<Vec<(Bid, Option<Client>)>> {
        let rows = BidEntity::find()
            .filter(BidColumn::UserId.eq(user_id))
            .order_by_asc(BidColumn::Deadline)
            .find_also_related(ClientEntity)
            .all(self.pool.reader())
            .await?;
        Ok(rows)
    }

    pub async fn get_bid(&self, user_id: Uuid, id: Uuid) -> Result<Bid> {
        BidEntity::find_by_id(id)
            .filter(BidColumn::UserId.eq(user_id))
            .one(self.pool.reader())
            .await?
            .ok_or_else(|| AppError::BidNotFound { id: id.to_string() })
    }

    /// Insert or update depending on whether the payload carries an id.
    /// The client must belong to the caller.
    pub async fn save_bid(&self, user_id: Uuid, payload: BidPayload) -> Result<Bid> {
        payload.validate().map_err(|e| AppError::Validation {
            message: e.to_string(),
            field: None,
        })?;
        if payload.title.trim().is_empty() {
            return Err(AppError::MissingField {
                field: "title".into(),
            });
        }
        let deadline = payload.deadline.ok_or_else(|| AppError::MissingField {
            field: "deadline".into(),
        })?;
        self.get_client(user_id, payload.client_id).await?;

        let status = payload
            .status
            .unwrap_or_else(|| BidStatus::DEFAULT.as_str().to_string());
        let now = Utc::now().fixed_offset();

        match payload.id {
            Some(id) => {
                let existing = self.get_bid(user_id, id).await?;
                let mut model: BidActiveModel = existing.into();
                model.client_id = Set(payload.client_id);
                model.title = Set(payload.title);
                model.status = Set(status);
                model.value = Set(payload.value);
                model.deadline = Set(Some(deadline));
                model.portal = Set(payload.portal);
                model.updated_at = Set(now);
                Ok(model.update(self.pool.writer()).await?)
            }
            None => {
                let model = BidActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user_id),
                    client_id: Set(payload.client_id),
                    title: Set(payload.title),
                    status: Set(status),
                    value: Set(payload.value),
                    deadline: Set(Some(deadline)),
                    portal: Set(payload.portal),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                Ok(model.insert(self.pool.writer()).await?)
            }
        }
    }

    /// Moves a bid to a new pipeline status. Returns the bid and whether a
    /// write happened; moving onto the current status is a no-op.
    pub async fn update_bid_status(
        &self,
        user_id: Uuid,
        id: Uuid,
        status: BidStatus,
    ) -> Result<(Bid, bool)> {
        let existing = self.get_bid(user_id, id).await?;
        if status.matches(&existing.status) {
            return Ok((existing, false));
        }

        let mut model: BidActiveModel = existing.into();
        model.status = Set(status.as_str().to_string());
        model.updated_at = Set(Utc::now().fixed_offset());
        let updated = model.update(self.pool.writer()).await?;
        Ok((updated, true))
    }

    pub async fn delete_bid(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        let bid = self.get_bid(user_id, id).await?;
        bid.delete(self.pool.writer()).await?;
        Ok(())
    }

    // ----- agenda events -----

    /// Events in chronological order
    pub async fn list_events(&self, user_id: Uuid) -> Result<Vec<Event>> {
        let rows = EventEntity::find()
            .filter(EventColumn::UserId.eq(user_id))
            .order_by_asc(EventColumn::EventDate)
            .order_by_asc(EventColumn::EventTime)
            .all(self.pool.reader())
            .await?;
        Ok(rows)
    }

    pub async fn create_event(&self, user_id: Uuid, payload: EventPayload) -> Result<Event> {
        self.validate_event(user_id, &payload).await?;

        let model = EventActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            client_id: Set(payload.client_id),
            title: Set(payload.title),
            description: Set(payload.description),
            event_date: Set(payload.event_date),
            event_time: Set(event_time_or_default(payload.event_time)),
            event_type: Set(payload.event_type),
            created_at: Set(Utc::now().fixed_offset()),
        };
        Ok(model.insert(self.pool.writer()).await?)
    }

    pub async fn update_event(
        &self,
        user_id: Uuid,
        id: Uuid,
        payload: EventPayload,
    ) -> Result<Event> {
        self.validate_event(user_id, &payload).await?;

        let existing = EventEntity::find_by_id(id)
            .filter(EventColumn::UserId.eq(user_id))
            .one(self.pool.reader())
            .await?
            .ok_or_else(|| AppError::EventNotFound { id: id.to_string() })?;

        let mut model: EventActiveModel = existing.into();
        model.client_id = Set(payload.client_id);
        model.title = Set(payload.title);
        model.description = Set(payload.description);
        model.event_date = Set(payload.event_date);
        model.event_time = Set(event_time_or_default(payload.event_time));
        model.event_type = Set(payload.event_type);
        Ok(model.update(self.pool.writer()).await?)
    }

    pub async fn delete_event(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        let event = EventEntity::find_by_id(id)
            .filter(EventColumn::UserId.eq(user_id))
            .one(self.pool.reader())
            .await?
            .ok_or_else(|| AppError::EventNotFound { id: id.to_string() })?;
        event.delete(self.pool.writer()).await?;
        Ok(())
    }

    async fn validate_event(&self, user_id: Uuid, payload: &EventPayload) -> Result<()> {
        payload.validate().map_err(|e| AppError::Validation {
            message: e.to_string(),
            field: None,
        })?;
        if payload.title.trim().is_empty() {
            return Err(AppError::MissingField {
                field: "title".into(),
            });
        }
        if let Some(client_id) = payload.client_id {
            self.get_client(user_id, client_id).await?;
        }
        Ok(())
    }

    // ----- profile -----

    /// The caller's profile, if one has been saved
    pub async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>> {
        Ok(ProfileEntity::find_by_id(user_id)
            .one(self.pool.reader())
            .await?)
    }

    /// Creates or replaces the caller's profile row
    pub async fn save_profile(&self, user_id: Uuid, payload: ProfilePayload) -> Result<Profile> {
        let now = Utc::now().fixed_offset();
        let existing = self.get_profile(user_id).await?;
        let theme = existing
            .as_ref()
            .map(|p| p.theme.clone())
            .unwrap_or_else(|| profile::DEFAULT_THEME.to_string());

        let model = ProfileActiveModel {
            id: Set(user_id),
            company_name: Set(payload.company_name),
            cnpj: Set(payload.cnpj),
            email_contact: Set(payload.email_contact),
            phone: Set(payload.phone),
            website: Set(payload.website),
            street: Set(payload.street),
            number: Set(payload.number),
            neighborhood: Set(payload.neighborhood),
            city: Set(payload.city),
            state: Set(payload.state),
            zip_code: Set(payload.zip_code),
            representative_name: Set(payload.representative_name),
            representative_cpf: Set(payload.representative_cpf),
            bank_name: Set(payload.bank_name),
            bank_agency: Set(payload.bank_agency),
            bank_account: Set(payload.bank_account),
            pix_key: Set(payload.pix_key),
            theme: Set(theme),
            updated_at: Set(now),
        };

        match existing {
            Some(_) => Ok(model.update(self.pool.writer()).await?),
            None => Ok(model.insert(self.pool.writer()).await?),
        }
    }

    /// Updates only the display-mode preference, creating the row if needed
    pub async fn update_theme(&self, user_id: Uuid, theme: String) -> Result<Profile> {
        match self.get_profile(user_id).await? {
            Some(existing) => {
                let mut model: ProfileActiveModel = existing.into();
                model.theme = Set(theme);
                model.updated_at = Set(Utc::now().fixed_offset());
                Ok(model.update(self.pool.writer()).await?)
            }
            None => {
                let mut payload_model: ProfileActiveModel =
                    ProfilePayload::default().into_active_model(user_id);
                payload_model.theme = Set(theme);
                Ok(payload_model.insert(self.pool.writer()).await?)
            }
        }
    }

    // ----- backup -----

    /// Every client and bid owned by the user
    pub async fn export_backup(&self, user_id: Uuid) -> Result<(Vec<Client>, Vec<Bid>)> {
        let clients = ClientEntity::find()
            .filter(ClientColumn::UserId.eq(user_id))
            .all(self.pool.reader())
            .await?;
        let bids = BidEntity::find()
            .filter(BidColumn::UserId.eq(user_id))
            .all(self.pool.reader())
            .await?;
        Ok((clients, bids))
    }

    /// Upserts backup rows by primary key. Imported rows are re-owned by the
    /// caller regardless of the user id recorded in the file. Ids that
    /// already exist under another account are rejected before any write, as
    /// are bids pointing at clients the caller does not own; the conflict
    /// clauses themselves only overwrite rows the caller owns.
    pub async fn import_backup(
        &self,
        user_id: Uuid,
        clients: Vec<Client>,
        bids: Vec<Bid>,
    ) -> Result<ImportCounts> {
        let counts = ImportCounts {
            clients: clients.len(),
            bids: bids.len(),
        };

        let imported_clients: HashSet<Uuid> = clients.iter().map(|c| c.id).collect();

        if !clients.is_empty() {
            let foreign = ClientEntity::find()
                .filter(ClientColumn::Id.is_in(imported_clients.iter().copied()))
                .filter(ClientColumn::UserId.ne(user_id))
                .all(self.pool.reader())
                .await?;
            if !foreign.is_empty() {
                return Err(AppError::BackupRejected {
                    collection: "clients".into(),
                    message: format!("{} rows belong to another account", foreign.len()),
                });
            }
        }

        if !bids.is_empty() {
            let bid_ids: Vec<Uuid> = bids.iter().map(|b| b.id).collect();
            let foreign = BidEntity::find()
                .filter(BidColumn::Id.is_in(bid_ids))
                .filter(BidColumn::UserId.ne(user_id))
                .all(self.pool.reader())
                .await?;
            if !foreign.is_empty() {
                return Err(AppError::BackupRejected {
                    collection: "bids".into(),
                    message: format!("{} rows belong to another account", foreign.len()),
                });
            }

            let referenced: Vec<Uuid> = bids
                .iter()
                .map(|b| b.client_id)
                .filter(|id| !imported_clients.contains(id))
                .collect::<HashSet<_>>()
                .into_iter()
                .collect();
            let owned_clients: HashSet<Uuid> = if referenced.is_empty() {
                HashSet::new()
            } else {
                ClientEntity::find()
                    .filter(ClientColumn::Id.is_in(referenced))
                    .filter(ClientColumn::UserId.eq(user_id))
                    .all(self.pool.reader())
                    .await?
                    .into_iter()
                    .map(|c| c.id)
                    .collect()
            };
            if let Some(orphan) = unowned_client_ref(&bids, &imported_clients, &owned_clients) {
                return Err(AppError::BackupRejected {
                    collection: "bids".into(),
                    message: format!("client {orphan} is not owned by the importer"),
                });
            }
        }

        if !clients.is_empty() {
            let models: Vec<ClientActiveModel> = clients
                .into_iter()
                .map(|mut c| {
                    c.user_id = user_id;
                    c.into()
                })
                .collect();

            ClientEntity::insert_many(models)
                .on_conflict(client_import_conflict(user_id))
                .exec(self.pool.writer())
                .await
                .map_err(|e| AppError::BackupRejected {
                    collection: "clients".into(),
                    message: e.to_string(),
                })?;
        }

        if !bids.is_empty() {
            let models: Vec<BidActiveModel> = bids
                .into_iter()
                .map(|mut b| {
                    b.user_id = user_id;
                    b.into()
                })
                .collect();

            BidEntity::insert_many(models)
                .on_conflict(bid_import_conflict(user_id))
                .exec(self.pool.writer())
                .await
                .map_err(|e| AppError::BackupRejected {
                    collection: "bids".into(),
                    message: e.to_string(),
                })?;
        }

        Ok(counts)
    }
}

/// Conflict clause for client import: `DO UPDATE` applies only when the
/// colliding row already belongs to the importer. A row inserted by another
/// account between the ownership pre-check and the write is left untouched.
fn client_import_conflict(user_id: Uuid) -> OnConflict {
    OnConflict::column(ClientColumn::Id)
        .update_columns([
            ClientColumn::CompanyName,
            ClientColumn::Cnpj,
            ClientColumn::Status,
            ClientColumn::ContactPerson,
            ClientColumn::Email,
            ClientColumn::Phone,
            ClientColumn::Website,
            ClientColumn::Street,
            ClientColumn::Number,
            ClientColumn::Neighborhood,
            ClientColumn::City,
            ClientColumn::State,
            ClientColumn::ZipCode,
            ClientColumn::Notes,
        ])
        .action_and_where(Expr::col((ClientEntity, ClientColumn::UserId)).eq(user_id))
        .to_owned()
}

/// Conflict clause for bid import, ownership-guarded like the client one
fn bid_import_conflict(user_id: Uuid) -> OnConflict {
    OnConflict::column(BidColumn::Id)
        .update_columns([
            BidColumn::ClientId,
            BidColumn::Title,
            BidColumn::Status,
            BidColumn::Value,
            BidColumn::Deadline,
            BidColumn::Portal,
            BidColumn::UpdatedAt,
        ])
        .action_and_where(Expr::col((BidEntity, BidColumn::UserId)).eq(user_id))
        .to_owned()
}

/// A saved event always carries a time; missing input stores midnight, on
/// create and update alike
fn event_time_or_default(time: Option<NaiveTime>) -> NaiveTime {
    time.unwrap_or(NaiveTime::MIN)
}

/// First bid client reference that is neither in the imported client set nor
/// among the importer's existing clients
fn unowned_client_ref(
    bids: &[Bid],
    imported_clients: &HashSet<Uuid>,
    owned_clients: &HashSet<Uuid>,
) -> Option<Uuid> {
    bids.iter()
        .map(|b| b.client_id)
        .find(|id| !imported_clients.contains(id) && !owned_clients.contains(id))
}

impl ProfilePayload {
    fn into_active_model(self, user_id: Uuid) -> ProfileActiveModel {
        ProfileActiveModel {
            id: Set(user_id),
            company_name: Set(self.company_name),
            cnpj: Set(self.cnpj),
            email_contact: Set(self.email_contact),
            phone: Set(self.phone),
            website: Set(self.website),
            street: Set(self.street),
            number: Set(self.number),
            neighborhood: Set(self.neighborhood),
            city: Set(self.city),
            state: Set(self.state),
            zip_code: Set(self.zip_code),
            representative_name: Set(self.representative_name),
            representative_cpf: Set(self.representative_cpf),
            bank_name: Set(self.bank_name),
            bank_agency: Set(self.bank_agency),
            bank_account: Set(self.bank_account),
            pix_key: Set(self.pix_key),
            theme: Set(profile::DEFAULT_THEME.to_string()),
            updated_at: Set(Utc::now().fixed_offset()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_accepts_blank_string_as_zero() {
        let payload: BidPayload = serde_json::from_value(serde_json::json!({
            "client_id": Uuid::new_v4(),
            "title": "Pregão 42/2026",
            "value": "",
            "deadline": "2026-09-15"
        }))
        .unwrap();
        assert_eq!(payload.value, 0.0);
    }

    #[test]
    fn money_accepts_number_and_numeric_string() {
        let payload: BidPayload = serde_json::from_value(serde_json::json!({
            "client_id": Uuid::new_v4(),
            "title": "Pregão",
            "value": 1500.5,
            "deadline": "2026-09-15"
        }))
        .unwrap();
        assert_eq!(payload.value, 1500.5);

        let payload: BidPayload = serde_json::from_value(serde_json::json!({
            "client_id": Uuid::new_v4(),
            "title": "Pregão",
            "value": "250.75",
            "deadline": "2026-09-15"
        }))
        .unwrap();
        assert_eq!(payload.value, 250.75);
    }

    #[test]
    fn money_defaults_to_zero_when_absent() {
        let payload: BidPayload = serde_json::from_value(serde_json::json!({
            "client_id": Uuid::new_v4(),
            "title": "Pregão",
            "deadline": "2026-09-15"
        }))
        .unwrap();
        assert_eq!(payload.value, 0.0);
    }

    #[test]
    fn client_payload_defaults_status_to_prospect() {
        let payload: ClientPayload = serde_json::from_value(serde_json::json!({
            "company_name": "Construtora Silva LTDA"
        }))
        .unwrap();
        assert_eq!(payload.status, "prospect");
        assert!(payload.id.is_none());
    }

    #[test]
    fn event_payload_defaults_type() {
        let payload: EventPayload = serde_json::from_value(serde_json::json!({
            "title": "Reunião de abertura",
            "event_date": "2026-09-01"
        }))
        .unwrap();
        assert_eq!(payload.event_type, "reuniao");
        assert!(payload.event_time.is_none());
    }

    #[test]
    fn missing_event_time_stores_midnight() {
        assert_eq!(event_time_or_default(None), NaiveTime::MIN);
        let nine_thirty = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        assert_eq!(event_time_or_default(Some(nine_thirty)), nine_thirty);
    }

    #[test]
    fn import_conflict_clause_updates_only_importer_rows() {
        use sea_orm::sea_query::{PostgresQueryBuilder, Query, QueryStatementWriter};

        let user_id = Uuid::new_v4();
        let insert = Query::insert()
            .into_table(ClientEntity)
            .columns([ClientColumn::Id, ClientColumn::UserId])
            .values_panic([Expr::value(Uuid::new_v4()), Expr::value(user_id)])
            .on_conflict(client_import_conflict(user_id))
            .to_owned();
        let sql = insert.to_string(PostgresQueryBuilder);
        assert!(sql.contains("ON CONFLICT"), "{sql}");
        assert!(sql.contains("DO UPDATE"), "{sql}");
        assert!(sql.contains(r#""clients"."user_id" ="#), "{sql}");

        let insert = Query::insert()
            .into_table(BidEntity)
            .columns([BidColumn::Id, BidColumn::UserId])
            .values_panic([Expr::value(Uuid::new_v4()), Expr::value(user_id)])
            .on_conflict(bid_import_conflict(user_id))
            .to_owned();
        let sql = insert.to_string(PostgresQueryBuilder);
        assert!(sql.contains("DO UPDATE"), "{sql}");
        assert!(sql.contains(r#""bids"."user_id" ="#), "{sql}");
    }

    fn backup_bid(client_id: Uuid) -> Bid {
        Bid {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            client_id,
            title: "Pregão".into(),
            status: "Triagem".into(),
            value: 0.0,
            deadline: None,
            portal: None,
            created_at: Utc::now().fixed_offset(),
            updated_at: Utc::now().fixed_offset(),
        }
    }

    #[test]
    fn imported_bids_must_reference_owned_or_imported_clients() {
        let in_file = Uuid::new_v4();
        let already_owned = Uuid::new_v4();
        let foreign = Uuid::new_v4();
        let imported = HashSet::from([in_file]);
        let owned = HashSet::from([already_owned]);

        let ok = vec![backup_bid(in_file), backup_bid(already_owned)];
        assert_eq!(unowned_client_ref(&ok, &imported, &owned), None);

        let bad = vec![backup_bid(in_file), backup_bid(foreign)];
        assert_eq!(unowned_client_ref(&bad, &imported, &owned), Some(foreign));
    }
}
