//! User/company profile entity
//!
//! One row per user, keyed by the user's id. Holds the business data used
//! to fill generated documents, plus the display-mode preference.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Primary key = user id from the auth provider
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "Text", nullable)]
    pub company_name: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub cnpj: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub email_contact: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub phone: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub website: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub street: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub number: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub neighborhood: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub city: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub state: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub zip_code: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub representative_name: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub representative_cpf: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub bank_name: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub bank_agency: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub bank_account: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub pix_key: Option<String>,

    /// light | dark | system
    #[sea_orm(column_type = "Text")]
    pub theme: String,

    pub updated_at: DateTimeWithTimeZone,
}

/// Default display-mode preference
pub const DEFAULT_THEME: &str = "system";

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
