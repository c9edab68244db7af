//! Wallet transactions.
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::EntityRef;
use crate::{Element, Result};

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub timestamp: DateTime<Utc>,
    pub id: i64,
    pub journal_id: i64,
    pub quantity: i64,
    #[serde(rename = "type")]
    pub item_type: EntityRef,
    pub price: f64,
    pub client: EntityRef,
    pub station: EntityRef,
    /// `buy` or `sell`.
    pub action: String,
    /// `personal` or `corporation`.
    #[serde(rename = "for")]
    pub transaction_for: String,
    /// The corporation member who made the transaction. Not reported for character keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub char: Option<EntityRef>,
}

/// Parse wallet transactions, sorted by ascending transaction id.
pub fn parse_wallet_transactions(result: &Element) -> Result<Vec<Transaction>> {
    let mut transactions = result
        .rowset()?
        .rows()
        .map(parse_transaction)
        .collect::<Result<Vec<_>>>()?;
    transactions.sort_by_key(|transaction| transaction.id);
    Ok(transactions)
}

fn parse_transaction(row: &Element) -> Result<Transaction> {
    let char = match row.attr("characterID") {
        Some(_) => Some(EntityRef::from_attrs(row, "characterID", "characterName")?),
        None => None,
    };

    Ok(Transaction {
        timestamp: row.attr_ts("transactionDateTime")?,
        id: row.attr_i64("transactionID")?,
        journal_id: row.attr_i64("journalTransactionID")?,
        quantity: row.attr_i64("quantity")?,
        item_type: EntityRef::from_attrs(row, "typeID", "typeName")?,
        price: row.attr_f64("price")?,
        client: EntityRef::from_attrs(row, "clientID", "clientName")?,
        station: EntityRef::from_attrs(row, "stationID", "stationName")?,
        action: row.attr_str("transactionType")?,
        transaction_for: row.attr_str("transactionFor")?,
        char,
    })
}
