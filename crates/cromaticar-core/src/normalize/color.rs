//! Color record normalization and RGB/hex conversion.

use std::fmt;

use tracing::warn;

use crate::error::{CatalogError, CatalogResult};
use crate::model::ColorRecord;
use crate::source::RawRecord;

const ID_KEYS: &[&str] = &["id", "id_cor"];
const NAME_KEYS: &[&str] = &["displayName", "nome_cor", "nome", "name"];
const HEX_KEYS: &[&str] = &["hexCode", "hex_code", "codigoHex"];
const RGB_KEYS: &[&str] = &["rgbTriple", "rgb_triple", "rgb"];
const CODE_KEYS: &[&str] = &["colorCode", "codigo_cor", "color_code"];
const BRAND_KEYS: &[&str] = &["brandName", "montadora", "brand_name", "brand"];
const MODEL_KEYS: &[&str] = &["modelName", "modelo", "model_name", "model"];
const YEAR_KEYS: &[&str] = &["modelYear", "ano", "model_year", "year"];
const CATEGORY_KEYS: &[&str] = &["category", "categoria", "type"];

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse a comma-separated `"r,g,b"` triple.
    ///
    /// Whitespace around components is ignored. Every component must be an
    /// integer within 0..=255.
    pub fn parse_triple(input: &str) -> CatalogResult<Self> {
        let parts: Vec<&str> = input.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(CatalogError::malformed(format!(
                "expected 3 rgb components in '{}', found {}",
                input,
                parts.len()
            )));
        }

        let mut channels = [0u8; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            let value: i64 = part.parse().map_err(|_| {
                CatalogError::malformed(format!("rgb component '{}' is not an integer", part))
            })?;
            *slot = u8::try_from(value).map_err(|_| {
                CatalogError::malformed(format!("rgb component {} is outside 0-255", value))
            })?;
        }

        Ok(Self {
            r: channels[0],
            g: channels[1],
            b: channels[2],
        })
    }

    /// Parse `#RRGGBB`, `RRGGBB` or the short `#RGB` form.
    pub fn parse_hex(input: &str) -> CatalogResult<Self> {
        let digits = input.trim().trim_start_matches('#');
        let malformed = || CatalogError::malformed(format!("'{}' is not a hex color", input));

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(malformed());
        }

        let expanded: String = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(malformed()),
        };

        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| malformed());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// `#RRGGBB`, uppercase.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// `r,g,b` without spaces.
    pub fn to_triple(self) -> String {
        format!("{},{},{}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Defaults derived from the request a record was fetched for.
///
/// Used only when the record carries no explicit value of its own.
#[derive(Debug, Clone, Default)]
pub struct ColorContext {
    pub brand_name: Option<String>,
    pub model_name: Option<String>,
    pub model_year: Option<i32>,
}

/// Normalize a raw color record with no contextual defaults.
pub fn normalize_color(raw: &RawRecord) -> CatalogResult<ColorRecord> {
    normalize_color_with(raw, &ColorContext::default())
}

/// Normalize a raw color record, filling vehicle fields from `context`
/// where the record is silent.
pub fn normalize_color_with(raw: &RawRecord, context: &ColorContext) -> CatalogResult<ColorRecord> {
    let id = raw.text(ID_KEYS).ok_or(CatalogError::MissingIdentifier)?;
    let (hex_code, rgb_triple) = resolve_color(&id, raw.text(HEX_KEYS), raw.text(RGB_KEYS))?;

    let color_code = raw.text(CODE_KEYS);
    let display_name = raw
        .text(NAME_KEYS)
        .or_else(|| color_code.clone())
        .unwrap_or_else(|| id.clone());

    let model_year = match raw.integer(YEAR_KEYS) {
        Some(year) => Some(i32::try_from(year).map_err(|_| {
            CatalogError::malformed(format!("model year {} of color {} is out of range", year, id))
        })?),
        None => context.model_year,
    };

    Ok(ColorRecord {
        id,
        display_name,
        hex_code,
        rgb_triple,
        color_code,
        brand_name: raw.text(BRAND_KEYS).or_else(|| context.brand_name.clone()),
        model_name: raw.text(MODEL_KEYS).or_else(|| context.model_name.clone()),
        model_year,
        category: raw.text(CATEGORY_KEYS),
    })
}

/// Settle the displayable color of a record.
///
/// The API's `rgb` field sometimes carries a hex string instead of a triple;
/// that form counts as a hex value, not a triple. An explicit hex wins over
/// one derived from the triple, and a broken `rgb` next to a good hex is
/// dropped. A malformed explicit hex, or a malformed `rgb` that is the only
/// color source, fails the record.
fn resolve_color(
    id: &str,
    hex: Option<String>,
    rgb: Option<String>,
) -> CatalogResult<(String, Option<String>)> {
    let explicit = hex.as_deref().map(Rgb::parse_hex).transpose()?;

    let (rgb_hex, triple) = match rgb.as_deref().map(parse_rgb_field) {
        Some(Ok(parsed)) => parsed,
        Some(Err(e)) if explicit.is_some() => {
            warn!(id, error = %e, "Dropping malformed rgb value; the record has a hex code");
            (None, None)
        }
        Some(Err(e)) => return Err(e),
        None => (None, None),
    };

    let color = explicit
        .or(rgb_hex)
        .or(triple)
        .ok_or_else(|| CatalogError::malformed(format!("color {} has neither a hex code nor an rgb triple", id)))?;

    Ok((color.to_hex(), triple.map(Rgb::to_triple)))
}

/// Read the `rgb` field as either a triple or a hex string.
fn parse_rgb_field(value: &str) -> CatalogResult<(Option<Rgb>, Option<Rgb>)> {
    if value.contains(',') {
        Ok((None, Some(Rgb::parse_triple(value)?)))
    } else {
        Ok((Some(Rgb::parse_hex(value)?), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn raw(value: Value) -> RawRecord {
        RawRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_hex_derived_from_rgb_triple() {
        let color = normalize_color(&raw(json!({ "id": "1", "rgb": "255,59,48" }))).unwrap();
        assert_eq!(color.hex_code, "#FF3B30");
        assert_eq!(color.rgb_triple, Some("255,59,48".to_string()));
    }

    #[test]
    fn test_triple_round_trips_through_hex() {
        for (r, g, b) in [(0, 0, 0), (255, 255, 255), (1, 128, 254), (16, 15, 160)] {
            let triple = format!("{}, {},{}", r, g, b);
            let color = normalize_color(&raw(json!({ "id": 9, "rgbTriple": triple }))).unwrap();
            let decoded = Rgb::parse_hex(&color.hex_code).unwrap();
            assert_eq!((decoded.r, decoded.g, decoded.b), (r, g, b));
        }
    }

    #[test]
    fn test_out_of_range_component_is_malformed() {
        let err = normalize_color(&raw(json!({ "id": 1, "rgb": "256,0,0" }))).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedColor(_)));

        let err = normalize_color(&raw(json!({ "id": 1, "rgb": "-1,0,0" }))).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedColor(_)));
    }

    #[test]
    fn test_non_integer_component_is_malformed() {
        let err = normalize_color(&raw(json!({ "id": 1, "rgb": "12,abc,3" }))).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedColor(_)));

        let err = normalize_color(&raw(json!({ "id": 1, "rgb": "1.5,2,3" }))).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedColor(_)));

        let err = normalize_color(&raw(json!({ "id": 1, "rgb": "1,2" }))).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedColor(_)));
    }

    #[test]
    fn test_missing_both_identifiers() {
        let err = normalize_color(&raw(json!({ "nome_cor": "Prata", "rgb": "192,192,192" }))).unwrap_err();
        assert!(matches!(err, CatalogError::MissingIdentifier));

        let err = normalize_color(&raw(json!({ "id": "", "rgb": "1,1,1" }))).unwrap_err();
        assert!(matches!(err, CatalogError::MissingIdentifier));
    }

    #[test]
    fn test_legacy_identifier_accepted() {
        let color = normalize_color(&raw(json!({
            "id_cor": 17,
            "nome_cor": "Branco Summit",
            "codigo_cor": "GAZ",
            "rgb": "250,250,250"
        })))
        .unwrap();
        assert_eq!(color.id, "17");
        assert_eq!(color.display_name, "Branco Summit");
        assert_eq!(color.color_code, Some("GAZ".to_string()));
        assert_eq!(color.hex_code, "#FAFAFA");
    }

    #[test]
    fn test_explicit_hex_wins_over_derived() {
        let color = normalize_color(&raw(json!({
            "id": 1,
            "codigoHex": "#ff0000",
            "rgb": "0,0,255"
        })))
        .unwrap();
        assert_eq!(color.hex_code, "#FF0000");
        assert_eq!(color.rgb_triple, Some("0,0,255".to_string()));
    }

    #[test]
    fn test_rgb_field_holding_hex() {
        let color = normalize_color(&raw(json!({ "id_cor": 4, "rgb": "#666" }))).unwrap();
        assert_eq!(color.hex_code, "#666666");
        assert_eq!(color.rgb_triple, None);
    }

    #[test]
    fn test_malformed_explicit_hex_fails() {
        let err = normalize_color(&raw(json!({ "id": 1, "hexCode": "#GG0000", "rgb": "1,2,3" }))).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedColor(_)));
    }

    #[test]
    fn test_bad_rgb_ignored_when_hex_present() {
        let color = normalize_color(&raw(json!({ "id": 1, "hexCode": "#FF3B30", "rgb": "300,0,0" }))).unwrap();
        assert_eq!(color.hex_code, "#FF3B30");
        assert_eq!(color.rgb_triple, None);

        let err = normalize_color(&raw(json!({ "id": 1, "rgb": "300,0,0" }))).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedColor(_)));
    }

    #[test]
    fn test_no_color_at_all_fails() {
        let err = normalize_color(&raw(json!({ "id": 1, "nome_cor": "Preto" }))).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedColor(_)));
    }

    #[test]
    fn test_both_conventions_merge_field_by_field() {
        let color = normalize_color(&raw(json!({
            "id": "abc",
            "id_cor": 99,
            "nome_cor": "Azul Eclipse",
            "brandName": "Volkswagen",
            "modelo": "Polo",
            "ano": "2022",
            "categoria": "Metálico",
            "rgb": "20,40,120"
        })))
        .unwrap();
        assert_eq!(color.id, "abc");
        assert_eq!(color.display_name, "Azul Eclipse");
        assert_eq!(color.brand_name, Some("Volkswagen".to_string()));
        assert_eq!(color.model_name, Some("Polo".to_string()));
        assert_eq!(color.model_year, Some(2022));
        assert_eq!(color.category, Some("Metálico".to_string()));
    }

    #[test]
    fn test_camel_key_preferred_when_both_present() {
        let color = normalize_color(&raw(json!({
            "id": 1,
            "displayName": "Cinza Graphite",
            "nome_cor": "Cinza Grafite",
            "rgb": "102,102,102"
        })))
        .unwrap();
        assert_eq!(color.display_name, "Cinza Graphite");
    }

    #[test]
    fn test_explicit_vehicle_fields_win_over_context() {
        let context = ColorContext {
            brand_name: Some("Ford".to_string()),
            model_name: Some("Ranger".to_string()),
            model_year: Some(2020),
        };
        let color = normalize_color_with(
            &raw(json!({ "id": 1, "rgb": "1,2,3", "montadora": "Fiat" })),
            &context,
        )
        .unwrap();
        assert_eq!(color.brand_name, Some("Fiat".to_string()));
        assert_eq!(color.model_name, Some("Ranger".to_string()));
        assert_eq!(color.model_year, Some(2020));
    }

    #[test]
    fn test_display_name_falls_back_to_code_then_id() {
        let color = normalize_color(&raw(json!({ "id": 5, "codigo_cor": "WA8555", "rgb": "0,0,0" }))).unwrap();
        assert_eq!(color.display_name, "WA8555");

        let color = normalize_color(&raw(json!({ "id": 5, "rgb": "0,0,0" }))).unwrap();
        assert_eq!(color.display_name, "5");
    }

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Rgb::parse_hex("#FF3B30").unwrap(), Rgb { r: 255, g: 59, b: 48 });
        assert_eq!(Rgb::parse_hex("ff3b30").unwrap(), Rgb { r: 255, g: 59, b: 48 });
        assert_eq!(Rgb::parse_hex("#abc").unwrap().to_hex(), "#AABBCC");
        assert!(Rgb::parse_hex("#12345").is_err());
        assert!(Rgb::parse_hex("#ÿÿÿ").is_err());
    }
}
