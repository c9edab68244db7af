//! Contract lists.
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{Element, Result};

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contract {
    pub id: i64,
    pub issuer: i64,
    pub issuer_corp: i64,
    pub assignee: i64,
    pub acceptor: i64,
    /// Start station id.
    pub start: i64,
    /// End station id.
    pub end: i64,
    /// `ItemExchange`, `Courier`, `Auction` or `Loan`.
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    /// Issued on behalf of the corporation.
    pub corp: bool,
    pub availability: String,
    pub issued: DateTime<Utc>,
    pub expired: Option<DateTime<Utc>>,
    pub accepted: Option<DateTime<Utc>>,
    pub completed: Option<DateTime<Utc>>,
    pub days: i64,
    pub price: f64,
    pub reward: f64,
    pub collateral: f64,
    pub buyout: f64,
    pub volume: f64,
    pub title: String,
}

/// Parse contracts keyed by contract id.
pub fn parse_contracts(result: &Element) -> Result<HashMap<i64, Contract>> {
    let mut contracts = HashMap::new();
    for row in result.rowset()?.rows() {
        let contract = Contract {
            id: row.attr_i64("contractID")?,
            issuer: row.attr_i64("issuerID")?,
            issuer_corp: row.attr_i64("issuerCorpID")?,
            assignee: row.attr_i64("assigneeID")?,
            acceptor: row.attr_i64("acceptorID")?,
            start: row.attr_i64("startStationID")?,
            end: row.attr_i64("endStationID")?,
            kind: row.attr_str("type")?,
            status: row.attr_str("status")?,
            corp: row.attr_flag("forCorp")?,
            availability: row.attr_str("availability")?,
            issued: row.attr_ts("dateIssued")?,
            expired: row.attr_opt_ts("dateExpired")?,
            accepted: row.attr_opt_ts("dateAccepted")?,
            completed: row.attr_opt_ts("dateCompleted")?,
            days: row.attr_i64("numDays")?,
            price: row.attr_f64("price")?,
            reward: row.attr_f64("reward")?,
            collateral: row.attr_f64("collateral")?,
            buyout: row.attr_f64("buyout")?,
            volume: row.attr_f64("volume")?,
            title: row.attr_str("title")?,
        };
        contracts.insert(contract.id, contract);
    }
    Ok(contracts)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::{Element, Error};

    use super::parse_contracts;

    const CONTRACTS: &str = r#"<result>
        <rowset name="contractList" key="contractID" columns="contractID,issuerID,issuerCorpID,assigneeID,acceptorID,startStationID,endStationID,type,status,title,forCorp,availability,dateIssued,dateExpired,dateAccepted,numDays,dateCompleted,price,reward,collateral,buyout,volume">
          <row contractID="5966" issuerID="154416088" issuerCorpID="154683985" assigneeID="0" acceptorID="0" startStationID="60014917" endStationID="60014917" type="ItemExchange" status="Outstanding" title="" forCorp="0" availability="Public" dateIssued="2010-02-23 11:28:00" dateExpired="2010-03-24 11:28:00" dateAccepted="" numDays="0" dateCompleted="" price="5000.00" reward="0.00" collateral="0.00" buyout="0.00" volume="0.01" />
          <row contractID="5968" issuerID="154416088" issuerCorpID="154683985" assigneeID="154683985" acceptorID="0" startStationID="60003760" endStationID="60003760" type="Courier" status="Completed" title="Freight" forCorp="1" availability="Private" dateIssued="2010-02-25 11:33:00" dateExpired="2010-03-26 11:33:00" dateAccepted="2010-02-25 12:00:00" numDays="7" dateCompleted="2010-02-26 10:00:00" price="0.00" reward="1000000.00" collateral="50000000.00" buyout="0.00" volume="3000" />
        </rowset>
      </result>"#;

    #[test]
    fn parses_contracts() {
        let contracts = parse_contracts(&Element::parse(CONTRACTS).unwrap()).unwrap();
        assert_eq!(contracts.len(), 2);

        let exchange = &contracts[&5966];
        assert_eq!(exchange.kind, "ItemExchange");
        assert!(!exchange.corp);
        assert_eq!(exchange.price, 5000.0);
        assert_eq!(exchange.accepted, None);
        assert_eq!(exchange.completed, None);
        assert_eq!(
            exchange.issued,
            Utc.with_ymd_and_hms(2010, 2, 23, 11, 28, 0).unwrap()
        );

        let courier = &contracts[&5968];
        assert!(courier.corp);
        assert_eq!(courier.days, 7);
        assert_eq!(courier.collateral, 50_000_000.0);
        assert_eq!(
            courier.completed,
            Some(Utc.with_ymd_and_hms(2010, 2, 26, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn missing_rowset_is_an_error() {
        let result = Element::parse("<result></result>").unwrap();
        assert!(matches!(
            parse_contracts(&result),
            Err(Error::MissingElement(tag)) if tag == "rowset"
        ));
    }
}
