//! Kill logs.
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::EntityRef;
use crate::{Element, Result};

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Victim {
    pub id: i64,
    pub name: String,
    pub corp: EntityRef,
    pub alliance: EntityRef,
    pub faction: EntityRef,
    pub damage: i64,
    pub ship_type_id: i64,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attacker {
    pub id: i64,
    pub name: String,
    pub corp: EntityRef,
    pub alliance: EntityRef,
    pub faction: EntityRef,
    pub sec_status: f64,
    pub damage: i64,
    pub final_blow: bool,
    pub weapon_type_id: i64,
    pub ship_type_id: i64,
}

/// An item fitted to or carried by the victim's ship.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KillItem {
    pub type_id: i64,
    pub flag: i64,
    pub dropped: i64,
    pub destroyed: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contents: Vec<KillItem>,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kill {
    pub id: i64,
    pub system_id: i64,
    pub time: DateTime<Utc>,
    pub moon_id: i64,
    pub victim: Victim,
    /// Keyed by character id. NPC attackers all share id 0.
    pub attackers: HashMap<i64, Attacker>,
    pub items: Vec<KillItem>,
}

/// Parse a kill log keyed by kill id.
pub fn parse_kills(result: &Element) -> Result<HashMap<i64, Kill>> {
    let mut kills = HashMap::new();
    for row in result.rowset()?.rows() {
        let kill = parse_kill(row)?;
        kills.insert(kill.id, kill);
    }
    Ok(kills)
}

fn parse_kill(row: &Element) -> Result<Kill> {
    let victim = row.child("victim")?;
    let rowsets = row.rowsets();

    let mut attackers = HashMap::new();
    for attacker in rowsets.get("attackers")?.rows() {
        let attacker = parse_attacker(attacker)?;
        attackers.insert(attacker.id, attacker);
    }

    Ok(Kill {
        id: row.attr_i64("killID")?,
        system_id: row.attr_i64("solarSystemID")?,
        time: row.attr_ts("killTime")?,
        moon_id: row.attr_i64("moonID")?,
        victim: Victim {
            id: victim.attr_i64("characterID")?,
            name: victim.attr_str("characterName")?,
            corp: EntityRef::from_attrs(victim, "corporationID", "corporationName")?,
            alliance: EntityRef::from_attrs(victim, "allianceID", "allianceName")?,
            faction: EntityRef::from_attrs(victim, "factionID", "factionName")?,
            damage: victim.attr_i64("damageTaken")?,
            ship_type_id: victim.attr_i64("shipTypeID")?,
        },
        attackers,
        items: parse_items(rowsets.get("items")?)?,
    })
}

fn parse_attacker(row: &Element) -> Result<Attacker> {
    Ok(Attacker {
        id: row.attr_i64("characterID")?,
        name: row.attr_str("characterName")?,
        corp: EntityRef::from_attrs(row, "corporationID", "corporationName")?,
        alliance: EntityRef::from_attrs(row, "allianceID", "allianceName")?,
        faction: EntityRef::from_attrs(row, "factionID", "factionName")?,
        sec_status: row.attr_f64("securityStatus")?,
        damage: row.attr_i64("damageDone")?,
        final_blow: row.attr_flag("finalBlow")?,
        weapon_type_id: row.attr_i64("weaponTypeID")?,
        ship_type_id: row.attr_i64("shipTypeID")?,
    })
}

fn parse_items(rowset: &Element) -> Result<Vec<KillItem>> {
    rowset
        .rows()
        .map(|row| -> Result<KillItem> {
            // Containers list their contents in nested rowsets.
            let mut contents = Vec::new();
            for nested in row.find_all("rowset") {
                contents.extend(parse_items(nested)?);
            }
            Ok(KillItem {
                type_id: row.attr_i64("typeID")?,
                flag: row.attr_i64("flag")?,
                dropped: row.attr_i64("qtyDropped")?,
                destroyed: row.attr_i64("qtyDestroyed")?,
                contents,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::{Element, Error};

    use super::parse_kills;

    const KILL_LOG: &str = r#"<result>
        <rowset name="kills" key="killID" columns="killID,solarSystemID,killTime,moonID">
          <row killID="15640545" solarSystemID="30001160" killTime="2011-02-24 21:04:00" moonID="0">
            <victim characterID="150080271" characterName="Pilot 333" corporationID="1000127" corporationName="Guristas" allianceID="0" allianceName="" factionID="0" factionName="" damageTaken="21344" shipTypeID="603" />
            <rowset name="attackers" columns="characterID,characterName,corporationID,corporationName,allianceID,allianceName,factionID,factionName,securityStatus,damageDone,finalBlow,weaponTypeID,shipTypeID">
              <row characterID="935091361" characterName="ShipSlayer" corporationID="224588600" corporationName="Shadows" allianceID="1354830081" allianceName="Goonswarm" factionID="0" factionName="" securityStatus="-1.9" damageDone="3543" finalBlow="1" weaponTypeID="2905" shipTypeID="24700" />
              <row characterID="0" characterName="" corporationID="1000127" corporationName="Guristas" allianceID="0" allianceName="" factionID="0" factionName="" securityStatus="0" damageDone="17801" finalBlow="0" weaponTypeID="23328" shipTypeID="23328" />
            </rowset>
            <rowset name="items" columns="typeID,flag,qtyDropped,qtyDestroyed">
              <row typeID="1319" flag="0" qtyDropped="0" qtyDestroyed="1" />
              <row typeID="11489" flag="5" qtyDropped="1" qtyDestroyed="0">
                <rowset name="items" columns="typeID,flag,qtyDropped,qtyDestroyed">
                  <row typeID="34" flag="0" qtyDropped="500" qtyDestroyed="0" />
                </rowset>
              </row>
            </rowset>
          </row>
        </rowset>
      </result>"#;

    #[test]
    fn parses_kill_log() {
        let kills = parse_kills(&Element::parse(KILL_LOG).unwrap()).unwrap();
        let kill = &kills[&15640545];

        assert_eq!(kill.system_id, 30001160);
        assert_eq!(kill.time, Utc.with_ymd_and_hms(2011, 2, 24, 21, 4, 0).unwrap());
        assert_eq!(kill.victim.name, "Pilot 333");
        assert_eq!(kill.victim.corp.name, "Guristas");
        assert_eq!(kill.victim.damage, 21344);

        assert_eq!(kill.attackers.len(), 2);
        let slayer = &kill.attackers[&935091361];
        assert_eq!(slayer.alliance.name, "Goonswarm");
        assert_eq!(slayer.sec_status, -1.9);
        assert!(slayer.final_blow);
        assert!(!kill.attackers[&0].final_blow);

        assert_eq!(kill.items.len(), 2);
        assert!(kill.items[0].contents.is_empty());
        assert_eq!(kill.items[1].contents.len(), 1);
        assert_eq!(kill.items[1].contents[0].dropped, 500);
    }

    #[test]
    fn missing_victim_is_an_error() {
        let result = Element::parse(
            r#"<result><rowset name="kills">
                 <row killID="1" solarSystemID="2" killTime="2011-02-24 21:04:00" moonID="0">
                   <rowset name="attackers" /><rowset name="items" />
                 </row>
               </rowset></result>"#,
        )
        .unwrap();
        assert!(matches!(
            parse_kills(&result),
            Err(Error::MissingElement(tag)) if tag == "victim"
        ));
    }
}
