//! Bid (opportunity) entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bids")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Owning client
    pub client_id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    /// Pipeline status, stored as text. The fixed set lives in
    /// `pipeline::BidStatus`; legacy rows may carry other strings.
    #[sea_orm(column_type = "Text")]
    pub status: String,

    /// Monetary estimate; blank form input is coerced to zero
    #[sea_orm(column_type = "Double")]
    pub value: f64,

    pub deadline: Option<Date>,

    /// Originating procurement portal
    #[sea_orm(column_type = "Text", nullable)]
    pub portal: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
