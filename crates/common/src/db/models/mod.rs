//! SeaORM entity models

pub mod bid;
pub mod client;
pub mod client_document;
pub mod client_history;
pub mod event;
pub mod profile;

pub use bid::{
    ActiveModel as BidActiveModel, Column as BidColumn, Entity as BidEntity, Model as Bid,
};
pub use client::{
    ActiveModel as ClientActiveModel, Column as ClientColumn, Entity as ClientEntity,
    Model as Client,
};
pub use client_document::{
    ActiveModel as ClientDocumentActiveModel, Column as ClientDocumentColumn,
    Entity as ClientDocumentEntity, Model as ClientDocument,
};
pub use client_history::{
    ActiveModel as ClientHistoryActiveModel, Column as ClientHistoryColumn,
    Entity as ClientHistoryEntity, Model as ClientHistory,
};
pub use event::{
    ActiveModel as EventActiveModel, Column as EventColumn, Entity as EventEntity, Model as Event,
};
pub use profile::{
    ActiveModel as ProfileActiveModel, Column as ProfileColumn, Entity as ProfileEntity,
    Model as Profile,
};
