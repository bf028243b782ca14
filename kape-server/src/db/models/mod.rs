//! Typed store documents
//!
//! 每个实体一个显式的记录类型，在存储边界 deserialize-or-reject：
//! 不符合类型的文档直接被拒绝，而不是作为任意字段继续流转。

pub mod inventory;
pub mod order;
pub mod serde_helpers;
pub mod settings;
pub mod user;

pub use inventory::{InventoryItem, InventoryItemCreate, InventoryItemUpdate};
pub use order::OrderDoc;
pub use settings::{StoreSettings, StoreSettingsUpdate};
pub use user::{UserCreate, UserDoc, UserRole, UserView};
