//! Market orders.
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{constants::OrderStatus, Element, Result};

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Buy,
    Sell,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketOrder {
    pub id: i64,
    pub char_id: i64,
    pub station_id: i64,
    pub amount: i64,
    pub amount_left: i64,
    pub status: OrderStatus,
    pub type_id: i64,
    pub range: i64,
    pub account_key: i64,
    /// Duration in days.
    pub duration: i64,
    pub escrow: f64,
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: OrderType,
    /// When the order was issued.
    pub timestamp: DateTime<Utc>,
}

/// Parse market orders keyed by order id.
pub fn parse_market_orders(result: &Element) -> Result<HashMap<i64, MarketOrder>> {
    let mut orders = HashMap::new();
    for row in result.rowset()?.rows() {
        let order = MarketOrder {
            id: row.attr_i64("orderID")?,
            char_id: row.attr_i64("charID")?,
            station_id: row.attr_i64("stationID")?,
            amount: row.attr_i64("volEntered")?,
            amount_left: row.attr_i64("volRemaining")?,
            status: OrderStatus::from_code(row.attr_i64("orderState")?)?,
            type_id: row.attr_i64("typeID")?,
            range: row.attr_i64("range")?,
            account_key: row.attr_i64("accountKey")?,
            duration: row.attr_i64("duration")?,
            escrow: row.attr_f64("escrow")?,
            price: row.attr_f64("price")?,
            kind: if row.attr_flag("bid")? {
                OrderType::Buy
            } else {
                OrderType::Sell
            },
            timestamp: row.attr_ts("issued")?,
        };
        orders.insert(order.id, order);
    }
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use crate::{constants::OrderStatus, Element};

    use super::{parse_market_orders, OrderType};

    #[test]
    fn parses_orders() {
        let result = Element::parse(
            r#"<result>
                 <rowset name="orders" key="orderID" columns="orderID,charID,stationID,volEntered,volRemaining,minVolume,orderState,typeID,range,accountKey,duration,escrow,price,bid,issued">
                   <row orderID="2579890411" charID="91397530" stationID="60011866" volEntered="2120" volRemaining="2120" minVolume="1" orderState="0" typeID="3689" range="32767" accountKey="1000" duration="90" escrow="0.00" price="5100.00" bid="0" issued="2012-08-17 16:34:28" />
                   <row orderID="2584848036" charID="91397530" stationID="60012550" volEntered="1" volRemaining="0" minVolume="1" orderState="2" typeID="17843" range="-1" accountKey="1001" duration="3" escrow="150.50" price="250000.00" bid="1" issued="2012-08-24 19:28:56" />
                 </rowset>
               </result>"#,
        )
        .unwrap();

        let orders = parse_market_orders(&result).unwrap();
        let sell = &orders[&2579890411];
        assert_eq!(sell.kind, OrderType::Sell);
        assert_eq!(sell.status, OrderStatus::Active);
        assert_eq!(sell.range, 32767);

        let buy = &orders[&2584848036];
        assert_eq!(buy.kind, OrderType::Buy);
        assert_eq!(buy.status, OrderStatus::Expired);
        assert_eq!(buy.amount_left, 0);
        assert_eq!(buy.escrow, 150.5);
        assert_eq!(buy.account_key, 1001);
    }
}
