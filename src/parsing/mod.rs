//! Response parsers shared between endpoint groups.
//!
//! Each parser takes the `<result>` element of a response and returns typed data. Any missing
//! element or attribute is reported as an error; parsers never fill in defaults.
use serde::Serialize;

use crate::{Element, Result};

pub mod assets;
pub mod contact_list;
pub mod contract_items;
pub mod contracts;
pub mod industry_jobs;
pub mod kills;
pub mod orders;
pub mod wallet_journal;
pub mod wallet_transactions;

pub use assets::{parse_assets, Asset, AssetLocation};
pub use contact_list::{parse_contact_list, Contact, ContactLists};
pub use contract_items::{parse_contract_items, ContractItem, ItemAction};
pub use contracts::{parse_contracts, Contract};
pub use industry_jobs::{
    parse_industry_jobs, BlueprintType, IndustryJob, JobInput, JobMultipliers, JobOutput,
};
pub use kills::{parse_kills, Attacker, Kill, KillItem, Victim};
pub use orders::{parse_market_orders, MarketOrder, OrderType};
pub use wallet_journal::{parse_wallet_journal, JournalEntry, JournalParty, Tax};
pub use wallet_transactions::{parse_wallet_transactions, Transaction};

/// An id/name pair referring to another in-game entity.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRef {
    pub id: i64,
    pub name: String,
}

impl EntityRef {
    pub(crate) fn from_attrs(row: &Element, id: &str, name: &str) -> Result<Self> {
        Ok(EntityRef {
            id: row.attr_i64(id)?,
            name: row.attr_str(name)?,
        })
    }
}
