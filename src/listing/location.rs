use crate::ParseError;
use serde::Serialize;

/// District and street split out of a listing's location line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub district: String,
    pub street: String,
}

/// Splits a location line into district and street
///
/// The line has the shape `"<district-label> <district> ... <street-marker>
/// <street> <city-marker> <city>"`. The district is the second whitespace
/// token before the street marker; the street is the text between the
/// street marker and the city marker. A missing city marker means the
/// street runs to the end of the line.
///
/// # Example
///
/// ```
/// use kvartal::listing::parse_location;
///
/// let location = parse_location("р-н. Франківський вул. Повстанська м. Львів", "вул.", "м.").unwrap();
/// assert_eq!(location.district, "Франківський");
/// assert_eq!(location.street, "Повстанська");
/// ```
pub fn parse_location(raw: &str, street_marker: &str, city_marker: &str) -> Result<Location, ParseError> {
    let street_start = raw.find(street_marker).ok_or_else(|| ParseError::MissingMarker {
        marker: street_marker.to_string(),
        raw: raw.to_string(),
    })?;

    let district = raw[..street_start]
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| ParseError::MissingDistrict {
            raw: raw.to_string(),
        })?
        .to_string();

    let after_marker = &raw[street_start + street_marker.len()..];
    let street = match after_marker.find(city_marker) {
        Some(city_start) => &after_marker[..city_start],
        None => after_marker,
    };

    Ok(Location {
        district,
        street: street.trim().to_string(),
    })
}
