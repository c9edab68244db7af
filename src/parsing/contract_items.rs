//! Items of a single contract.
use serde::Serialize;

use crate::{Element, Result};

/// Whether the issuer offers an item or asks for it.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemAction {
    Offered,
    Requested,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractItem {
    pub id: i64,
    pub type_id: i64,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_quantity: Option<i64>,
    pub singleton: bool,
    pub action: ItemAction,
}

/// Parse the items of a contract, in response order.
pub fn parse_contract_items(result: &Element) -> Result<Vec<ContractItem>> {
    result
        .rowset()?
        .rows()
        .map(|row| -> Result<ContractItem> {
            Ok(ContractItem {
                id: row.attr_i64("recordID")?,
                type_id: row.attr_i64("typeID")?,
                quantity: row.attr_i64("quantity")?,
                raw_quantity: row.attr_opt_i64("rawQuantity")?,
                singleton: row.attr_flag("singleton")?,
                action: if row.attr_flag("included")? {
                    ItemAction::Offered
                } else {
                    ItemAction::Requested
                },
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::Element;

    use super::{parse_contract_items, ItemAction};

    #[test]
    fn parses_offered_and_requested_items() {
        let result = Element::parse(
            r#"<result>
                 <rowset name="itemList" key="recordID" columns="recordID,typeID,quantity,rawQuantity,singleton,included">
                   <row recordID="600515136" typeID="12345" quantity="1" rawQuantity="-1" singleton="1" included="1" />
                   <row recordID="600515137" typeID="233" quantity="100" singleton="0" included="0" />
                 </rowset>
               </result>"#,
        )
        .unwrap();

        let items = parse_contract_items(&result).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 600515136);
        assert_eq!(items[0].raw_quantity, Some(-1));
        assert!(items[0].singleton);
        assert_eq!(items[0].action, ItemAction::Offered);
        assert_eq!(items[1].raw_quantity, None);
        assert_eq!(items[1].quantity, 100);
        assert_eq!(items[1].action, ItemAction::Requested);
    }
}
