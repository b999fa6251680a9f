//! Property records and the input schema
//!
//! The header is fixed at load time. Columns the enrichment understands are
//! held in typed fields; every other column is kept in a passthrough map so
//! the output can be written back as a superset of the input.

use crate::error::{EnrichError, EnrichResult};
use hs_common::Coordinate;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Record key used when the input has no `property_id` value
pub const UNKNOWN_PROPERTY_ID: &str = "unknown";

const PROPERTY_ID: &str = "property_id";
const LATITUDE: &str = "latitude";
const LONGITUDE: &str = "longitude";
const ADDRESS: &str = "address";
const FULL_STREET_LINE: &str = "full_street_line";
const STREET: &str = "street";
const UNIT: &str = "unit";
const CITY: &str = "city";
const STATE: &str = "state";
const ZIP_CODE: &str = "zip_code";

const KNOWN_COLUMNS: [&str; 10] = [
    PROPERTY_ID,
    LATITUDE,
    LONGITUDE,
    ADDRESS,
    FULL_STREET_LINE,
    STREET,
    UNIT,
    CITY,
    STATE,
    ZIP_CODE,
];

const ADDRESS_COLUMNS: [&str; 6] = [ADDRESS, FULL_STREET_LINE, STREET, CITY, STATE, ZIP_CODE];

/// Input header and the capabilities it implies
#[derive(Debug, Clone, Serialize)]
pub struct RecordSchema {
    columns: Vec<String>,
    has_coordinates: bool,
    has_address: bool,
}

impl RecordSchema {
    /// Build a schema from the header row
    ///
    /// Names are kept as written. Known columns are matched with surrounding
    /// whitespace ignored, so ` latitude ` still counts as `latitude`.
    ///
    /// Fails with [`EnrichError::MissingSchema`] when the header offers neither
    /// a coordinate pair nor any address column, and with
    /// [`EnrichError::DuplicateColumn`] on repeated names.
    pub fn from_headers<I, S>(headers: I) -> EnrichResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = headers.into_iter().map(Into::into).collect();

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.trim()) {
                return Err(EnrichError::DuplicateColumn(column.clone()));
            }
        }

        let has = |name: &str| seen.contains(name);
        let has_coordinates = has(LATITUDE) && has(LONGITUDE);
        let has_address = ADDRESS_COLUMNS.into_iter().any(has);

        if !has_coordinates && !has_address {
            return Err(EnrichError::MissingSchema(columns.join(", ")));
        }

        Ok(Self {
            columns,
            has_coordinates,
            has_address,
        })
    }

    /// Input columns in file order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_coordinates(&self) -> bool {
        self.has_coordinates
    }

    pub fn has_address(&self) -> bool {
        self.has_address
    }
}

/// Columns the enrichment reads; `None` when the column is absent from the input
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KnownFields {
    pub property_id: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub address: Option<String>,
    pub full_street_line: Option<String>,
    pub street: Option<String>,
    pub unit: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

impl KnownFields {
    fn slot_mut(&mut self, column: &str) -> Option<&mut Option<String>> {
        match column {
            PROPERTY_ID => Some(&mut self.property_id),
            LATITUDE => Some(&mut self.latitude),
            LONGITUDE => Some(&mut self.longitude),
            ADDRESS => Some(&mut self.address),
            FULL_STREET_LINE => Some(&mut self.full_street_line),
            STREET => Some(&mut self.street),
            UNIT => Some(&mut self.unit),
            CITY => Some(&mut self.city),
            STATE => Some(&mut self.state),
            ZIP_CODE => Some(&mut self.zip_code),
            _ => None,
        }
    }

    fn get(&self, column: &str) -> Option<&str> {
        let slot = match column {
            PROPERTY_ID => &self.property_id,
            LATITUDE => &self.latitude,
            LONGITUDE => &self.longitude,
            ADDRESS => &self.address,
            FULL_STREET_LINE => &self.full_street_line,
            STREET => &self.street,
            UNIT => &self.unit,
            CITY => &self.city,
            STATE => &self.state,
            ZIP_CODE => &self.zip_code,
            _ => return None,
        };
        slot.as_deref()
    }
}

/// Where a record can be located, decided from its own fields
#[derive(Debug, Clone, PartialEq)]
pub enum RecordLocation {
    /// Both latitude and longitude present and valid
    Coordinate(Coordinate),
    /// No coordinates, but enough address parts to geocode
    Address(String),
    /// Coordinate fields present but unusable
    Malformed(String),
    /// Nothing to locate the record with
    Missing,
}

/// One input row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRecord {
    /// Zero-based data row index in the input
    pub row_index: usize,
    /// Typed view of the known columns
    pub known: KnownFields,
    /// Every other column, by name
    pub extra: HashMap<String, String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl PropertyRecord {
    /// Build a record from values aligned with `schema.columns()`
    ///
    /// Missing trailing values are treated as blank.
    pub fn from_values<I, S>(row_index: usize, schema: &RecordSchema, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut known = KnownFields::default();
        let mut extra = HashMap::new();
        let mut values = values.into_iter();

        for column in schema.columns() {
            let value: String = values.next().map(Into::into).unwrap_or_default();
            match known.slot_mut(column.trim()) {
                Some(slot) => *slot = Some(value),
                None => {
                    extra.insert(column.clone(), value);
                }
            }
        }

        Self {
            row_index,
            known,
            extra,
        }
    }

    /// Value of any input column
    pub fn field(&self, column: &str) -> Option<&str> {
        let key = column.trim();
        if KNOWN_COLUMNS.contains(&key) {
            self.known.get(key)
        } else {
            self.extra.get(column).map(String::as_str)
        }
    }

    /// Values in schema order, copied
    pub fn values(&self, schema: &RecordSchema) -> Vec<String> {
        schema
            .columns()
            .iter()
            .map(|c| self.field(c).unwrap_or_default().to_string())
            .collect()
    }

    /// Record key, `"unknown"` when blank or absent
    pub fn property_id(&self) -> &str {
        non_blank(&self.known.property_id).unwrap_or(UNKNOWN_PROPERTY_ID)
    }

    /// Free-text address for geocoding and display
    ///
    /// An `address` column wins. Otherwise `full_street_line`, or `street`
    /// plus `unit`, followed by city, state and zip code, joined with ", ".
    pub fn address(&self) -> Option<String> {
        if let Some(address) = non_blank(&self.known.address) {
            return Some(address.to_string());
        }

        let street = match non_blank(&self.known.full_street_line) {
            Some(line) => Some(line.to_string()),
            None => non_blank(&self.known.street).map(|street| match non_blank(&self.known.unit) {
                Some(unit) => format!("{} {}", street, unit),
                None => street.to_string(),
            }),
        };

        let parts: Vec<String> = street
            .into_iter()
            .chain(
                [&self.known.city, &self.known.state, &self.known.zip_code]
                    .into_iter()
                    .filter_map(non_blank)
                    .map(str::to_string),
            )
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    /// Classify how this record can be located
    pub fn location(&self) -> RecordLocation {
        match (
            non_blank(&self.known.latitude),
            non_blank(&self.known.longitude),
        ) {
            (Some(lat), Some(lng)) => match Coordinate::parse(lat, lng) {
                Ok(coordinate) => RecordLocation::Coordinate(coordinate),
                Err(e) => RecordLocation::Malformed(e.to_string()),
            },
            _ => match self.address() {
                Some(address) => RecordLocation::Address(address),
                None => RecordLocation::Missing,
            },
        }
    }
}
