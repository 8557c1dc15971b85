//! Country name and code resolution
//!
//! Source tables key countries inconsistently (UN long names, WHO short
//! names, bare ISO3 codes). The resolver maps any of those to a canonical
//! ISO3 code; rows that fail to resolve are dropped by the loaders.

use crate::panel::CountryCode;
use std::collections::HashMap;

/// Resolve a country name or ISO3 code to a canonical code
///
/// Returns None for aggregates ("World", "Africa"), footnote rows, and
/// anything else not in the table.
pub trait CountryResolver {
    fn resolve(&self, name_or_code: &str) -> Option<CountryCode>;
}

/// ISO3 code followed by the names it appears under across the source
/// tables (WHO short name first, then UN and legacy variants)
const COUNTRY_TABLE: &[(&str, &[&str])] = &[
    ("AFG", &["Afghanistan"]),
    ("AGO", &["Angola"]),
    ("BDI", &["Burundi"]),
    ("BEN", &["Benin"]),
    ("BFA", &["Burkina Faso"]),
    ("BGD", &["Bangladesh"]),
    ("BOL", &["Bolivia", "Bolivia (Plurinational State of)"]),
    ("BRA", &["Brazil"]),
    ("BWA", &["Botswana"]),
    ("CAF", &["Central African Republic"]),
    ("CIV", &["Cote d'Ivoire", "C\u{f4}te d'Ivoire", "Ivory Coast"]),
    ("CMR", &["Cameroon"]),
    ("COD", &[
        "Democratic Republic of the Congo",
        "DR Congo",
        "Congo, Dem. Rep.",
    ]),
    ("COG", &["Congo", "Republic of the Congo", "Congo, Rep."]),
    ("COL", &["Colombia"]),
    ("COM", &["Comoros"]),
    ("CPV", &["Cabo Verde", "Cape Verde"]),
    ("DJI", &["Djibouti"]),
    ("ERI", &["Eritrea"]),
    ("ETH", &["Ethiopia"]),
    ("GAB", &["Gabon"]),
    ("GHA", &["Ghana"]),
    ("GIN", &["Guinea"]),
    ("GMB", &["Gambia", "The Gambia"]),
    ("GNB", &["Guinea-Bissau"]),
    ("GNQ", &["Equatorial Guinea"]),
    ("GTM", &["Guatemala"]),
    ("GUY", &["Guyana"]),
    ("HND", &["Honduras"]),
    ("HTI", &["Haiti"]),
    ("IDN", &["Indonesia"]),
    ("IND", &["India"]),
    ("KEN", &["Kenya"]),
    ("KHM", &["Cambodia"]),
    ("LAO", &["Lao People's Democratic Republic", "Lao PDR", "Laos"]),
    ("LBR", &["Liberia"]),
    ("MDG", &["Madagascar"]),
    ("MLI", &["Mali"]),
    ("MMR", &["Myanmar", "Burma"]),
    ("MOZ", &["Mozambique"]),
    ("MRT", &["Mauritania"]),
    ("MWI", &["Malawi"]),
    ("NAM", &["Namibia"]),
    ("NER", &["Niger"]),
    ("NGA", &["Nigeria"]),
    ("NIC", &["Nicaragua"]),
    ("NPL", &["Nepal"]),
    ("PAK", &["Pakistan"]),
    ("PAN", &["Panama"]),
    ("PER", &["Peru"]),
    ("PHL", &["Philippines"]),
    ("PNG", &["Papua New Guinea"]),
    ("PRK", &[
        "Democratic People's Republic of Korea",
        "Korea, Dem. People's Rep.",
        "North Korea",
    ]),
    ("RWA", &["Rwanda"]),
    ("SDN", &["Sudan"]),
    ("SEN", &["Senegal"]),
    ("SLB", &["Solomon Islands"]),
    ("SLE", &["Sierra Leone"]),
    ("SOM", &["Somalia"]),
    ("SSD", &["South Sudan"]),
    ("SWZ", &["Eswatini", "Swaziland"]),
    ("TCD", &["Chad"]),
    ("TGO", &["Togo"]),
    ("THA", &["Thailand"]),
    ("TLS", &["Timor-Leste", "East Timor"]),
    ("TZA", &["United Republic of Tanzania", "Tanzania"]),
    ("UGA", &["Uganda"]),
    ("VEN", &["Venezuela", "Venezuela (Bolivarian Republic of)"]),
    ("VNM", &["Viet Nam", "Vietnam"]),
    ("VUT", &["Vanuatu"]),
    ("YEM", &["Yemen"]),
    ("ZAF", &["South Africa"]),
    ("ZMB", &["Zambia"]),
    ("ZWE", &["Zimbabwe"]),
];

/// Table-backed resolver covering malaria-endemic countries and the
/// naming variants seen in the input tables
#[derive(Debug, Clone)]
pub struct TableResolver {
    by_key: HashMap<String, CountryCode>,
}

impl TableResolver {
    pub fn builtin() -> Self {
        let mut by_key = HashMap::new();
        for (code, names) in COUNTRY_TABLE {
            by_key.insert(code.to_lowercase(), code.to_string());
            for name in *names {
                by_key.insert(name.to_lowercase(), code.to_string());
            }
        }
        Self { by_key }
    }
}

impl CountryResolver for TableResolver {
    fn resolve(&self, name_or_code: &str) -> Option<CountryCode> {
        let key = name_or_code.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        self.by_key.get(&key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_name() {
        let resolver = TableResolver::builtin();
        assert_eq!(resolver.resolve("Nigeria"), Some("NGA".to_string()));
        assert_eq!(resolver.resolve("DR Congo"), Some("COD".to_string()));
        assert_eq!(
            resolver.resolve("United Republic of Tanzania"),
            Some("TZA".to_string())
        );
    }

    #[test]
    fn test_resolve_by_code() {
        let resolver = TableResolver::builtin();
        assert_eq!(resolver.resolve("NGA"), Some("NGA".to_string()));
        assert_eq!(resolver.resolve("cod"), Some("COD".to_string()));
    }

    #[test]
    fn test_resolve_trims_and_ignores_case() {
        let resolver = TableResolver::builtin();
        assert_eq!(resolver.resolve("  viet nam "), Some("VNM".to_string()));
    }

    #[test]
    fn test_unresolved_returns_none() {
        let resolver = TableResolver::builtin();
        assert_eq!(resolver.resolve("World"), None);
        assert_eq!(resolver.resolve("Sub-Saharan Africa"), None);
        assert_eq!(resolver.resolve(""), None);
    }
}
