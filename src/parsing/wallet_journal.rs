//! Wallet journals.
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::EntityRef;
use crate::{Element, Error, Result};

/// One side of a journal entry.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalParty {
    pub id: i64,
    pub name: String,
    /// Type id of the party (character, corporation, ...).
    #[serde(rename = "type")]
    pub kind: i64,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tax {
    pub taxer_id: i64,
    pub amount: f64,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    pub timestamp: DateTime<Utc>,
    pub id: i64,
    /// Reference type, e.g. bounty prize or market transaction.
    pub type_id: i64,
    pub party_1: JournalParty,
    pub party_2: JournalParty,
    pub arg: EntityRef,
    pub amount: f64,
    pub balance: f64,
    pub reason: String,
    /// Only reported on taxed entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<Tax>,
}

/// Parse a wallet journal, sorted by ascending ref id.
pub fn parse_wallet_journal(result: &Element) -> Result<Vec<JournalEntry>> {
    let mut entries = result
        .rowset()?
        .rows()
        .map(parse_entry)
        .collect::<Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.id);
    Ok(entries)
}

fn parse_entry(row: &Element) -> Result<JournalEntry> {
    let tax = match (
        row.attr_opt_i64("taxReceiverID")?,
        row.attr_opt_f64("taxAmount")?,
    ) {
        (Some(taxer_id), Some(amount)) => Some(Tax { taxer_id, amount }),
        (None, None) => None,
        // A taxed entry reports both attributes.
        (Some(_), None) => return Err(missing_attribute(row, "taxAmount")),
        (None, Some(_)) => return Err(missing_attribute(row, "taxReceiverID")),
    };

    Ok(JournalEntry {
        timestamp: row.attr_ts("date")?,
        id: row.attr_i64("refID")?,
        type_id: row.attr_i64("refTypeID")?,
        party_1: JournalParty {
            id: row.attr_i64("ownerID1")?,
            name: row.attr_str("ownerName1")?,
            kind: row.attr_i64("owner1TypeID")?,
        },
        party_2: JournalParty {
            id: row.attr_i64("ownerID2")?,
            name: row.attr_str("ownerName2")?,
            kind: row.attr_i64("owner2TypeID")?,
        },
        arg: EntityRef::from_attrs(row, "argID1", "argName1")?,
        amount: row.attr_f64("amount")?,
        balance: row.attr_f64("balance")?,
        reason: row.attr_str("reason")?,
        tax,
    })
}

fn missing_attribute(row: &Element, attribute: &str) -> Error {
    Error::MissingAttribute {
        element: row.tag().to_owned(),
        attribute: attribute.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::{Element, Error};

    use super::parse_wallet_journal;

    #[test]
    fn parses_and_sorts_entries() {
        let result = Element::parse(
            r#"<result>
                 <rowset name="entries" key="refID" columns="date,refID,refTypeID,ownerName1,ownerID1,ownerName2,ownerID2,argName1,argID1,amount,balance,reason,owner1TypeID,owner2TypeID">
                   <row date="2011-03-28 17:26:56" refID="3945523563" refTypeID="85" ownerName1="CONCORD" ownerID1="1000125" ownerName2="Pilot" ownerID2="185437312" argName1="Jita" argID1="30000142" amount="72255.00" balance="123456789.33" reason="11019:1," owner1TypeID="2" owner2TypeID="1377" />
                   <row date="2011-03-28 16:26:56" refID="3945523562" refTypeID="37" ownerName1="Pilot" ownerID1="185437312" ownerName2="Corp" ownerID2="98000001" argName1="" argID1="0" amount="-500.00" balance="123384534.33" reason="DESC: withdrawal" owner1TypeID="1377" owner2TypeID="2" taxReceiverID="98000001" taxAmount="12.50" />
                 </rowset>
               </result>"#,
        )
        .unwrap();

        let entries = parse_wallet_journal(&result).unwrap();
        assert_eq!(
            entries.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![3945523562, 3945523563]
        );

        let withdrawal = &entries[0];
        assert_eq!(withdrawal.amount, -500.0);
        assert_eq!(withdrawal.party_2.kind, 2);
        let tax = withdrawal.tax.as_ref().unwrap();
        assert_eq!(tax.taxer_id, 98000001);
        assert_eq!(tax.amount, 12.5);

        let bounty = &entries[1];
        assert_eq!(bounty.type_id, 85);
        assert_eq!(bounty.arg.name, "Jita");
        assert_eq!(bounty.party_1.name, "CONCORD");
        assert_eq!(bounty.tax, None);
        assert_eq!(
            bounty.timestamp,
            Utc.with_ymd_and_hms(2011, 3, 28, 17, 26, 56).unwrap()
        );
    }

    #[test]
    fn one_sided_tax_is_an_error() {
        let result = Element::parse(
            r#"<result>
                 <rowset name="entries" key="refID">
                   <row date="2011-03-28 16:26:56" refID="3945523562" refTypeID="37" ownerName1="Pilot" ownerID1="185437312" ownerName2="Corp" ownerID2="98000001" argName1="" argID1="0" amount="-500.00" balance="123384534.33" reason="" owner1TypeID="1377" owner2TypeID="2" taxAmount="12.50" />
                 </rowset>
               </result>"#,
        )
        .unwrap();

        assert!(matches!(
            parse_wallet_journal(&result),
            Err(Error::MissingAttribute { element, attribute })
                if element == "row" && attribute == "taxReceiverID"
        ));
    }
}
