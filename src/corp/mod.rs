//! Wrappers around the `/corp/` endpoints.
use std::collections::HashMap;

use crate::{
    api::{Params, Transport},
    constants::{PermissionEntity, PosState, GRANTABLE_ROWSETS, ROLE_ROWSETS},
    parsing::{
        parse_assets, parse_contact_list, parse_contract_items, parse_contracts,
        parse_industry_jobs, parse_kills, parse_market_orders, parse_wallet_journal,
        parse_wallet_transactions, AssetLocation, ContactLists, Contract, ContractItem,
        EntityRef, IndustryJob, JournalEntry, Kill, MarketOrder, Transaction,
    },
    Element, Result,
};

mod models;

pub use models::*;

/// A client for the corporation endpoints of the EVE API.
///
/// A corporation API key is required; see [`ApiConfig::from_key`](crate::ApiConfig::from_key).
///
/// # Examples
/// ```no_run
/// # use evelink::{ApiConfig, Corp};
/// let corp = Corp::new(ApiConfig::from_key(1234, "verification-code").to_api()?);
/// for (key, wallet) in corp.wallet_info()? {
///     println!("{key}: {}", wallet.balance);
/// }
/// # Ok::<(), evelink::Error>(())
/// ```
pub struct Corp<T> {
    transport: T,
}

impl<T: Transport> Corp<T> {
    /// Create a client that sends its requests through `transport`.
    pub fn new(transport: T) -> Self {
        Corp { transport }
    }

    fn get(&self, path: &str, params: Params) -> Result<Element> {
        self.transport.get(path, &params)
    }

    /// Industry jobs keyed by job id.
    pub fn industry_jobs(&self) -> Result<HashMap<i64, IndustryJob>> {
        let result = self.get("corp/IndustryJobs", Params::new())?;
        parse_industry_jobs(&result).inspect(|jobs| {
            log::trace!(target: "evelink", count = jobs.len(); "parsed industry jobs");
        })
    }

    /// The corporation's standings towards NPC agents, corporations and factions.
    ///
    /// This is *only* NPC standings. Player standings are returned by [`Corp::contacts`].
    pub fn npc_standings(&self) -> Result<NpcStandings> {
        let result = self.get("corp/Standings", Params::new())?;
        let rowsets = result.child("corporationNPCStandings")?.rowsets();

        let standings = |rowset_name: &str| -> Result<HashMap<i64, Standing>> {
            let mut standings = HashMap::new();
            for row in rowsets.get(rowset_name)?.rows() {
                let standing = Standing {
                    id: row.attr_i64("fromID")?,
                    name: row.attr_str("fromName")?,
                    standing: row.attr_f64("standing")?,
                };
                standings.insert(standing.id, standing);
            }
            Ok(standings)
        };

        Ok(NpcStandings {
            agents: standings("agents")?,
            corps: standings("NPCCorporations")?,
            factions: standings("factions")?,
        })
    }

    /// Recent kills keyed by kill id.
    ///
    /// Pass `before_kill` to only list kills before that kill id, for paging.
    pub fn kills(&self, before_kill: Option<i64>) -> Result<HashMap<i64, Kill>> {
        let params = optional_params([("beforeKillID", before_kill.map(|id| id.to_string()))]);
        let result = self.get("corp/KillLog", params)?;
        parse_kills(&result).inspect(|kills| {
            log::trace!(target: "evelink", count = kills.len(); "parsed kills");
        })
    }

    /// Wallet divisions keyed by account key.
    pub fn wallet_info(&self) -> Result<HashMap<i64, Wallet>> {
        let result = self.get("corp/AccountBalance", Params::new())?;

        let mut wallets = HashMap::new();
        for row in result.rowset()?.rows() {
            let wallet = Wallet {
                balance: row.attr_f64("balance")?,
                id: row.attr_i64("accountID")?,
                key: row.attr_i64("accountKey")?,
            };
            wallets.insert(wallet.key, wallet);
        }
        log::trace!(target: "evelink", count = wallets.len(); "parsed wallets");
        Ok(wallets)
    }

    /// Wallet journal entries, oldest first.
    ///
    /// `before_id` walks the journal backwards from that ref id; `limit` caps the row count.
    pub fn wallet_journal(
        &self,
        before_id: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<JournalEntry>> {
        let result = self.get("corp/WalletJournal", paging_params(before_id, limit))?;
        parse_wallet_journal(&result).inspect(|entries| {
            log::trace!(target: "evelink", count = entries.len(); "parsed wallet journal entries");
        })
    }

    /// Wallet transactions, oldest first.
    ///
    /// `before_id` walks the list backwards from that transaction id; `limit` caps the row
    /// count.
    pub fn wallet_transactions(
        &self,
        before_id: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<Transaction>> {
        let result = self.get("corp/WalletTransactions", paging_params(before_id, limit))?;
        parse_wallet_transactions(&result).inspect(|transactions| {
            log::trace!(target: "evelink", count = transactions.len(); "parsed wallet transactions");
        })
    }

    /// Buy and sell orders keyed by order id.
    pub fn orders(&self) -> Result<HashMap<i64, MarketOrder>> {
        let result = self.get("corp/MarketOrders", Params::new())?;
        parse_market_orders(&result).inspect(|orders| {
            log::trace!(target: "evelink", count = orders.len(); "parsed market orders");
        })
    }

    /// Corporation assets grouped by top-level location id.
    ///
    /// Containers list their items in [`Asset::contents`](crate::parsing::Asset::contents),
    /// recursively. Items inside a container inherit the container's location.
    pub fn assets(&self) -> Result<HashMap<i64, AssetLocation>> {
        let result = self.get("corp/AssetList", Params::new())?;
        parse_assets(&result).inspect(|locations| {
            log::trace!(target: "evelink", count = locations.len(); "parsed asset locations");
        })
    }

    /// Faction warfare statistics.
    ///
    /// The API answers with an error, returned as [`Error::Api`](crate::Error::Api), if the
    /// corporation is not enrolled in faction warfare.
    pub fn faction_warfare_stats(&self) -> Result<FactionWarfareStats> {
        let result = self.get("corp/FacWarStats", Params::new())?;

        Ok(FactionWarfareStats {
            faction: EntityRef {
                id: result.child_i64("factionID")?,
                name: result.child_str("factionName")?,
            },
            start_ts: result.child_ts("enlisted")?,
            pilots: result.child_i64("pilots")?,
            kills: WarfareTally {
                yesterday: result.child_i64("killsYesterday")?,
                week: result.child_i64("killsLastWeek")?,
                total: result.child_i64("killsTotal")?,
            },
            points: WarfareTally {
                yesterday: result.child_i64("victoryPointsYesterday")?,
                week: result.child_i64("victoryPointsLastWeek")?,
                total: result.child_i64("victoryPointsTotal")?,
            },
        })
    }

    /// Items included in the given contract.
    pub fn contract_items(&self, contract_id: i64) -> Result<Vec<ContractItem>> {
        let params = Params::from([("contractID".to_owned(), contract_id.to_string())]);
        let result = self.get("corp/ContractItems", params)?;
        parse_contract_items(&result).inspect(|items| {
            log::trace!(target: "evelink", count = items.len(); "parsed contract items");
        })
    }

    /// Contracts keyed by contract id.
    pub fn contracts(&self) -> Result<HashMap<i64, Contract>> {
        let result = self.get("corp/Contracts", Params::new())?;
        parse_contracts(&result).inspect(|contracts| {
            log::trace!(target: "evelink", count = contracts.len(); "parsed contracts");
        })
    }

    /// Character and corporation shareholders, each keyed by shareholder id.
    pub fn shareholders(&self) -> Result<Shareholders> {
        let result = self.get("corp/Shareholders", Params::new())?;
        let rowsets = result.rowsets();

        let mut shareholders = Shareholders::default();
        for row in rowsets.get("characters")?.rows() {
            let holder = CharacterShareholder {
                id: row.attr_i64("shareholderID")?,
                name: row.attr_str("shareholderName")?,
                corp: EntityRef::from_attrs(
                    row,
                    "shareholderCorporationID",
                    "shareholderCorporationName",
                )?,
                shares: row.attr_i64("shares")?,
            };
            shareholders.char.insert(holder.id, holder);
        }
        for row in rowsets.get("corporations")?.rows() {
            let holder = CorpShareholder {
                id: row.attr_i64("shareholderID")?,
                name: row.attr_str("shareholderName")?,
                shares: row.attr_i64("shares")?,
            };
            shareholders.corp.insert(holder.id, holder);
        }
        log::trace!(target: "evelink",
                    characters = shareholders.char.len(),
                    corporations = shareholders.corp.len();
                    "parsed shareholders");
        Ok(shareholders)
    }

    /// The corporation's and its alliance's contact lists.
    pub fn contacts(&self) -> Result<ContactLists> {
        let result = self.get("corp/ContactList", Params::new())?;
        parse_contact_list(&result)
    }

    /// Titles keyed by title id.
    pub fn titles(&self) -> Result<HashMap<i64, Title>> {
        let result = self.get("corp/Titles", Params::new())?;

        let mut titles = HashMap::new();
        for row in result.rowset()?.rows() {
            let rowsets = row.rowsets();
            let roles = |rowset_name: &str| -> Result<HashMap<i64, Role>> {
                let mut roles = HashMap::new();
                for role_row in rowsets.get(rowset_name)?.rows() {
                    let role = Role {
                        id: role_row.attr_i64("roleID")?,
                        name: role_row.attr_str("roleName")?,
                        description: role_row.attr_str("roleDescription")?,
                    };
                    roles.insert(role.id, role);
                }
                Ok(roles)
            };

            let title = Title {
                id: row.attr_i64("titleID")?,
                name: row.attr_str("titleName")?,
                roles: ROLE_ROWSETS.try_map(roles)?,
                can_grant: GRANTABLE_ROWSETS.try_map(roles)?,
            };
            titles.insert(title.id, title);
        }
        log::trace!(target: "evelink", count = titles.len(); "parsed titles");
        Ok(titles)
    }

    /// Starbases (POSes) keyed by item id.
    pub fn starbases(&self) -> Result<HashMap<i64, Starbase>> {
        let result = self.get("corp/StarbaseList", Params::new())?;

        let mut starbases = HashMap::new();
        for row in result.rowset()?.rows() {
            let starbase = Starbase {
                id: row.attr_i64("itemID")?,
                type_id: row.attr_i64("typeID")?,
                location_id: row.attr_i64("locationID")?,
                moon_id: row.attr_i64("moonID")?,
                state: PosState::from_code(row.attr_i64("state")?)?,
                state_ts: row.attr_opt_ts("stateTimestamp")?,
                online_ts: row.attr_opt_ts("onlineTimestamp")?,
                standings_owner_id: row.attr_i64("standingOwnerID")?,
            };
            starbases.insert(starbase.id, starbase);
        }
        log::trace!(target: "evelink", count = starbases.len(); "parsed starbases");
        Ok(starbases)
    }

    /// Settings, permissions and fuel of one starbase.
    pub fn starbase_details(&self, starbase_id: i64) -> Result<StarbaseDetails> {
        let params = Params::from([("itemID".to_owned(), starbase_id.to_string())]);
        let result = self.get("corp/StarbaseDetail", params)?;

        let general = result.child("generalSettings")?;
        let combat = result.child("combatSettings")?;

        let mut fuel = HashMap::new();
        for row in result.rowset()?.rows() {
            fuel.insert(row.attr_i64("typeID")?, row.attr_i64("quantity")?);
        }

        Ok(StarbaseDetails {
            state: PosState::from_code(result.child_i64("state")?)?,
            state_ts: result.child_opt_ts("stateTimestamp")?,
            online_ts: result.child_opt_ts("onlineTimestamp")?,
            permissions: StarbasePermissions {
                fuel: fuel_bay_permissions(general.child_i64("usageFlags")?)?,
                deploy: deploy_permissions(general.child_i64("deployFlags")?)?,
                forcefield: ForcefieldPermissions {
                    corp: general.child("allowCorporationMembers")?.text() == "1",
                    alliance: general.child("allowAllianceMembers")?.text() == "1",
                },
            },
            combat: combat_settings(combat)?,
            fuel,
        })
    }

    /// Corporation members keyed by character id.
    ///
    /// Logon times, location, ship and roles are only requested and returned when `extended`
    /// is set.
    pub fn members(&self, extended: bool) -> Result<HashMap<i64, Member>> {
        let params = Params::from([(
            "extended".to_owned(),
            if extended { "1" } else { "0" }.to_owned(),
        )]);
        let result = self.get("corp/MemberTracking", params)?;

        let mut members = HashMap::new();
        for row in result.rowset()?.rows() {
            let activity = if extended {
                Some(member_activity(row)?)
            } else {
                None
            };
            let member = Member {
                id: row.attr_i64("characterID")?,
                name: row.attr_str("name")?,
                join_ts: row.attr_ts("startDateTime")?,
                // Rarely carries a meaningful value.
                base: EntityRef::from_attrs(row, "baseID", "base")?,
                title: row.attr_str("title")?,
                extended: activity,
            };
            members.insert(member.id, member);
        }
        log::trace!(target: "evelink", count = members.len(); "parsed members");
        Ok(members)
    }

    /// Player-owned outposts keyed by station id. Starbases are listed by [`Corp::starbases`].
    pub fn stations(&self) -> Result<HashMap<i64, Station>> {
        let result = self.get("corp/OutpostList", Params::new())?;

        let mut stations = HashMap::new();
        for row in result.rowset()?.rows() {
            let station = Station {
                id: row.attr_i64("stationID")?,
                owner_id: row.attr_i64("ownerID")?,
                name: row.attr_str("stationName")?,
                system_id: row.attr_i64("solarSystemID")?,
                docking_fee_per_volume: row.attr_f64("dockingCostPerShipVolume")?,
                office_fee: row.attr_i64("officeRentalCost")?,
                type_id: row.attr_i64("stationTypeID")?,
                reprocessing: Reprocessing {
                    efficiency: row.attr_f64("reprocessingEfficiency")?,
                    cut: row.attr_f64("reprocessingStationTake")?,
                },
                standing_owner_id: row.attr_i64("standingOwnerID")?,
            };
            stations.insert(station.id, station);
        }
        log::trace!(target: "evelink", count = stations.len(); "parsed stations");
        Ok(stations)
    }
}

/// Build query parameters, leaving out the ones without a value.
fn optional_params<const N: usize>(params: [(&str, Option<String>); N]) -> Params {
    params
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name.to_owned(), value)))
        .collect()
}

fn paging_params(before_id: Option<i64>, limit: Option<u32>) -> Params {
    optional_params([
        ("fromID", before_id.map(|id| id.to_string())),
        ("rowCount", limit.map(|limit| limit.to_string())),
    ])
}

/// Decode `usageFlags`: two 2-bit fields, view above take.
fn fuel_bay_permissions(usage_flags: i64) -> Result<FuelBayPermissions> {
    Ok(FuelBayPermissions {
        view: PermissionEntity::from_flags(usage_flags, 2)?,
        take: PermissionEntity::from_flags(usage_flags, 0)?,
    })
}

/// Decode `deployFlags`: four 2-bit fields, from anchor in the high bits down to offline.
fn deploy_permissions(deploy_flags: i64) -> Result<DeployPermissions> {
    Ok(DeployPermissions {
        anchor: PermissionEntity::from_flags(deploy_flags, 6)?,
        unanchor: PermissionEntity::from_flags(deploy_flags, 4)?,
        online: PermissionEntity::from_flags(deploy_flags, 2)?,
        offline: PermissionEntity::from_flags(deploy_flags, 0)?,
    })
}

fn combat_settings(settings: &Element) -> Result<CombatSettings> {
    // The API reports fewer hostility settings than the game offers.
    let enabled = |element: &Element| element.attr("enabled") != Some("0");
    let threshold = |element: &Element| -> Result<ThresholdSetting> {
        Ok(ThresholdSetting {
            threshold: element.attr_f64("standing")? / 100.0,
            enabled: enabled(element),
        })
    };

    Ok(CombatSettings {
        standings_owner_id: settings.child("useStandingsFrom")?.attr_i64("ownerID")?,
        hostility: Hostility {
            standing: threshold(settings.child("onStandingDrop")?)?,
            sec_status: threshold(settings.child("onStatusDrop")?)?,
            aggression: ToggleSetting {
                enabled: enabled(settings.child("onAggression")?),
            },
            war: ToggleSetting {
                enabled: enabled(settings.child("onCorporationWar")?),
            },
        },
    })
}

fn member_activity(row: &Element) -> Result<MemberActivity> {
    // "Not available" is reported as ship type -1 with an empty name.
    let ship_type_id = row.attr_i64("shipTypeID")?;
    let ship_type_name = row.attr_str("shipType")?;

    Ok(MemberActivity {
        logon_ts: row.attr_opt_ts("logonDateTime")?,
        logoff_ts: row.attr_opt_ts("logoffDateTime")?,
        location: EntityRef::from_attrs(row, "locationID", "location")?,
        ship_type: ShipType {
            id: (ship_type_id > 0).then_some(ship_type_id),
            name: (!ship_type_name.is_empty()).then_some(ship_type_name),
        },
        roles: row.attr_i64("roles")?,
        can_grant: row.attr_i64("grantableRoles")?,
    })
}
