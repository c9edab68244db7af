//! Contact lists and standings.
use std::collections::HashMap;

use serde::Serialize;

use crate::{Element, Result};

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub standing: f64,
    /// Only personal contact lists report watchlist membership.
    pub in_watchlist: Option<bool>,
}

/// Contact lists keyed by contact id.
///
/// Corporation keys return `corp` and `alliance` lists; `personal` is filled only for
/// character keys.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactLists {
    pub personal: HashMap<i64, Contact>,
    pub corp: HashMap<i64, Contact>,
    pub alliance: HashMap<i64, Contact>,
}

/// Parse contact lists. Rowsets other than the three known lists are skipped.
pub fn parse_contact_list(result: &Element) -> Result<ContactLists> {
    let mut lists = ContactLists::default();

    for (name, rowset) in result.rowsets().iter() {
        let list = match name {
            "contactList" => &mut lists.personal,
            "corporateContactList" => &mut lists.corp,
            "allianceContactList" => &mut lists.alliance,
            other => {
                log::debug!(target: "evelink", rowset = other; "skipping unknown contact list");
                continue;
            }
        };

        for row in rowset.rows() {
            let in_watchlist = row.attr("inWatchlist").map(|value| value == "True");
            let contact = Contact {
                id: row.attr_i64("contactID")?,
                name: row.attr_str("contactName")?,
                standing: row.attr_f64("standing")?,
                in_watchlist,
            };
            list.insert(contact.id, contact);
        }
    }

    Ok(lists)
}

#[cfg(test)]
mod tests {
    use crate::Element;

    use super::parse_contact_list;

    #[test]
    fn splits_lists_by_rowset_name() {
        let result = Element::parse(
            r#"<result>
                 <rowset name="corporateContactList" key="contactID" columns="contactID,contactName,standing">
                   <row contactID="797400947" contactName="CCP Garthagk" standing="-10" />
                 </rowset>
                 <rowset name="allianceContactList" key="contactID" columns="contactID,contactName,standing">
                   <row contactID="3010913" contactName="Dudes" standing="5" />
                   <row contactID="3010914" contactName="Buddies" standing="10" />
                 </rowset>
               </result>"#,
        )
        .unwrap();

        let lists = parse_contact_list(&result).unwrap();
        assert!(lists.personal.is_empty());
        assert_eq!(lists.corp.len(), 1);
        assert_eq!(lists.corp[&797400947].name, "CCP Garthagk");
        assert_eq!(lists.corp[&797400947].standing, -10.0);
        assert_eq!(lists.corp[&797400947].in_watchlist, None);
        assert_eq!(lists.alliance.len(), 2);
        assert_eq!(lists.alliance[&3010914].standing, 10.0);
    }

    #[test]
    fn reads_watchlist_flag() {
        let result = Element::parse(
            r#"<result>
                 <rowset name="contactList">
                   <row contactID="1" contactName="A" standing="0" inWatchlist="True" />
                   <row contactID="2" contactName="B" standing="0" inWatchlist="False" />
                 </rowset>
               </result>"#,
        )
        .unwrap();
        let lists = parse_contact_list(&result).unwrap();
        assert_eq!(lists.personal[&1].in_watchlist, Some(true));
        assert_eq!(lists.personal[&2].in_watchlist, Some(false));
    }
}
