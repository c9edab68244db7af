//! Asset lists.
use std::collections::HashMap;

use serde::Serialize;

use crate::{Element, Result};

/// An inventory item. Containers carry their own items in `contents`.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Asset {
    pub id: i64,
    pub item_type_id: i64,
    /// Items inside a container inherit the container's location.
    pub location_id: i64,
    /// Where in its location the item is, e.g. a hangar or cargo slot.
    pub location_flag: i64,
    pub quantity: i64,
    pub packaged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<Vec<Asset>>,
}

/// Top-level assets that share a location (typically a solar system or station).
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetLocation {
    pub location_id: i64,
    pub contents: Vec<Asset>,
}

/// Parse an asset list, grouping top-level items by location id.
pub fn parse_assets(result: &Element) -> Result<HashMap<i64, AssetLocation>> {
    let items = parse_rows(result.rowset()?, None)?;

    let mut locations: HashMap<i64, AssetLocation> = HashMap::new();
    for item in items {
        locations
            .entry(item.location_id)
            .or_insert_with(|| AssetLocation {
                location_id: item.location_id,
                contents: Vec::new(),
            })
            .contents
            .push(item);
    }
    Ok(locations)
}

fn parse_rows(rowset: &Element, parent_location: Option<i64>) -> Result<Vec<Asset>> {
    rowset
        .rows()
        .map(|row| parse_row(row, parent_location))
        .collect()
}

fn parse_row(row: &Element, parent_location: Option<i64>) -> Result<Asset> {
    let location_id = match (row.attr_opt_i64("locationID")?, parent_location) {
        (Some(location_id), _) | (None, Some(location_id)) => location_id,
        // Top-level rows must name their location.
        (None, None) => row.attr_i64("locationID")?,
    };

    let contents = row
        .find("rowset")
        .map(|contents| parse_rows(contents, Some(location_id)))
        .transpose()?;

    Ok(Asset {
        id: row.attr_i64("itemID")?,
        item_type_id: row.attr_i64("typeID")?,
        location_id,
        location_flag: row.attr_i64("flag")?,
        quantity: row.attr_i64("quantity")?,
        packaged: row.require_attr("singleton")? == "0",
        raw_quantity: row.attr_opt_i64("rawQuantity")?,
        contents,
    })
}
