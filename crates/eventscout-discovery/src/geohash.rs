//! Geohash encoding for the `geoPoint` search parameter.

use crate::error::DiscoveryError;

const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";
const BITS_PER_CHAR: u32 = 5;

/// Encodes a coordinate as a geohash of exactly `precision` characters.
///
/// Bisects the longitude and latitude ranges alternately, longitude first,
/// emitting `1` when the coordinate lies in the upper half (inclusive of the
/// midpoint) and `0` otherwise. Every five bits select one base-32 symbol.
///
/// # Errors
///
/// Returns [`DiscoveryError::InvalidArgument`] if `lat` is outside
/// `[-90, 90]`, `lon` is outside `[-180, 180]` (NaN included), or
/// `precision` is zero.
pub fn encode(lat: f64, lon: f64, precision: usize) -> Result<String, DiscoveryError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(DiscoveryError::InvalidArgument(format!(
            "latitude {lat} is outside [-90, 90]"
        )));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(DiscoveryError::InvalidArgument(format!(
            "longitude {lon} is outside [-180, 180]"
        )));
    }
    if precision == 0 {
        return Err(DiscoveryError::InvalidArgument(
            "geohash precision must be positive".to_string(),
        ));
    }

    let mut lat_range = (-90.0_f64, 90.0_f64);
    let mut lon_range = (-180.0_f64, 180.0_f64);
    let mut hash = String::with_capacity(precision);
    let mut even_bit = true;
    let mut bits = 0u32;
    let mut index = 0usize;

    while hash.len() < precision {
        let (value, range) = if even_bit {
            (lon, &mut lon_range)
        } else {
            (lat, &mut lat_range)
        };
        let mid = (range.0 + range.1) / 2.0;
        index <<= 1;
        if value >= mid {
            index |= 1;
            range.0 = mid;
        } else {
            range.1 = mid;
        }
        even_bit = !even_bit;

        bits += 1;
        if bits == BITS_PER_CHAR {
            hash.push(char::from(BASE32[index]));
            bits = 0;
            index = 0;
        }
    }

    Ok(hash)
}
