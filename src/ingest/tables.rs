//! Mapping-table persistence.
//!
//! One JSON object per relation, key → list of strings. The harvest stage
//! writes the two geo tables, the index stage the three Latin tables; the
//! graph stage loads all five back into one [`CrossIndex`]. The derived
//! tables are never persisted.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::index::{CrossIndex, MappingTable};

/// scientific → book names.
pub const LAT_BOOK_FILE: &str = "lat-book.json";

/// scientific → vernacular names.
pub const LAT_VERN_FILE: &str = "lat-vern.json";

/// vernacular → scientific names.
pub const VERN_LAT_FILE: &str = "vern-lat.json";

/// vernacular → cantons.
pub const VERN_CANTON_FILE: &str = "vern-canton.json";

/// vernacular → localities.
pub const VERN_LOC_FILE: &str = "vern-loc.json";

/// Write one table as a JSON object.
pub fn save_table(path: impl AsRef<Path>, table: &MappingTable) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(table)?;
    fs::write(path, json)
        .map_err(|e| Error::invalid_input(format!("Failed to write table {:?}: {}", path, e)))
}

/// Read one table back from a JSON object.
pub fn load_table(path: impl AsRef<Path>) -> Result<MappingTable> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| Error::invalid_input(format!("Failed to read table {:?}: {}", path, e)))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::parse(format!("Malformed table {:?}: {}", path, e)))
}

/// Save the two geo tables produced by the harvest stage.
pub fn save_geo_tables(dir: impl AsRef<Path>, index: &CrossIndex) -> Result<()> {
    let dir = dir.as_ref();
    save_table(dir.join(VERN_CANTON_FILE), &index.vern_canton)?;
    save_table(dir.join(VERN_LOC_FILE), &index.vern_loc)
}

/// Save the three Latin tables produced by the index stage.
pub fn save_latin_tables(dir: impl AsRef<Path>, index: &CrossIndex) -> Result<()> {
    let dir = dir.as_ref();
    save_table(dir.join(LAT_BOOK_FILE), &index.lat_book)?;
    save_table(dir.join(LAT_VERN_FILE), &index.lat_vern)?;
    save_table(dir.join(VERN_LAT_FILE), &index.vern_lat)
}

/// Load all five tables from one directory.
pub fn load_index(dir: impl AsRef<Path>) -> Result<CrossIndex> {
    let dir = dir.as_ref();
    Ok(CrossIndex {
        lat_book: load_table(dir.join(LAT_BOOK_FILE))?,
        lat_vern: load_table(dir.join(LAT_VERN_FILE))?,
        vern_lat: load_table(dir.join(VERN_LAT_FILE))?,
        vern_canton: load_table(dir.join(VERN_CANTON_FILE))?,
        vern_loc: load_table(dir.join(VERN_LOC_FILE))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::ScientificName;

    #[test]
    fn table_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = MappingTable::new();
        table.append("Viburnum_lantana", "Schneeball");
        table.append("Viburnum_lantana", "Wolliger Schneeball");

        let path = dir.path().join(LAT_BOOK_FILE);
        save_table(&path, &table).unwrap();
        let back = load_table(&path).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn missing_table_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(dir.path().join(VERN_LOC_FILE)).unwrap_err();
        assert!(err.to_string().contains(VERN_LOC_FILE));
    }

    #[test]
    fn malformed_table_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(VERN_CANTON_FILE);
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        let err = load_table(&path).unwrap_err();
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn index_round_trips_through_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let lantana = ScientificName::from_latin("Viburnum lantana").unwrap();
        let mut index = CrossIndex::new();
        index.add_book_name(&lantana, "Schneeball");
        index.add_vernacular(&lantana, "Schnääball");
        index.add_canton("Schnääball", "Bern");
        index.add_locality("Schnääball", "Wädenswil");

        save_latin_tables(dir.path(), &index).unwrap();
        save_geo_tables(dir.path(), &index).unwrap();
        let back = load_index(dir.path()).unwrap();

        assert_eq!(back.lat_book, index.lat_book);
        assert_eq!(back.lat_vern, index.lat_vern);
        assert_eq!(back.vern_lat, index.vern_lat);
        assert_eq!(back.vern_canton, index.vern_canton);
        assert_eq!(back.vern_loc, index.vern_loc);
    }
}
