//! Issuer catalog: per-issuer number patterns, CVV lengths, and Luhn flags.
//!
//! The catalog is declaration-ordered and classification is
//! first-match-wins, so debit sub-brands (Visa Electron, Maestro,
//! Dankort, ...) are listed before the broader credit brands whose
//! patterns would otherwise swallow them. The built-in table is frozen
//! configuration: constructed once, never mutated.
//!
//! The catalog also defines the wire format shared with client-side
//! mirror scripts: a JSON object mapping issuer name to
//! `{pattern, cvvLength, luhn}`, in catalog order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names of the built-in issuers, usable as allow-list entries and as
/// explicit issuer overrides.
pub mod issuer {
    /// Visa Electron debit cards.
    pub const ELECTRON: &str = "Visa Electron";
    /// Maestro debit cards.
    pub const MAESTRO: &str = "Maestro";
    /// Forbrugsforeningen (Denmark).
    pub const FBF: &str = "Forbrugsforeningen";
    /// Dankort debit cards (Denmark).
    pub const DANKORT: &str = "Dankort";
    /// Visa credit cards.
    pub const VISA: &str = "Visa";
    /// Mastercard credit cards.
    pub const MASTERCARD: &str = "Mastercard";
    /// American Express.
    pub const AMEX: &str = "American Express";
    /// Carte Blanche.
    pub const CARTE_BLANCHE: &str = "Carte Blanche";
    /// Diners Club.
    pub const DINERS: &str = "Diners Club";
    /// BC Global.
    pub const BC_GLOBAL: &str = "BC Global";
    /// Discover.
    pub const DISCOVER: &str = "Discover";
    /// Insta Payment.
    pub const INSTA_PAY: &str = "Insta Payment";
    /// JCB (Japan).
    pub const JCB: &str = "JCB";
    /// Voyager fleet cards.
    pub const VOYAGER: &str = "Voyager";
    /// Korean Local cards.
    pub const KOREAN_LOCAL: &str = "Korean Local";
    /// Solo debit cards (UK, discontinued).
    pub const SOLO: &str = "Solo";
    /// Switch debit cards (UK, discontinued).
    pub const SWITCH_CARD: &str = "Switch Card";
    /// Laser debit cards (Ireland, discontinued).
    pub const LASER: &str = "Laser";
    /// UnionPay (China). The one built-in issuer without Luhn.
    pub const UNIONPAY: &str = "Union Pay";
}

/// Validation rules for one issuer.
///
/// The number pattern is anchored and matches the full digit-only card
/// number, length constraints included. `cvv_lengths` is the set of
/// accepted CVV digit counts and `luhn` says whether the checksum must
/// additionally hold (some card families use other check-digit schemes).
#[derive(Debug, Clone)]
pub struct CardSpec {
    pattern: Regex,
    cvv_lengths: Vec<u8>,
    luhn: bool,
}

impl CardSpec {
    /// Compiles a spec from its pattern source.
    ///
    /// Fails if the pattern is not a valid regular expression.
    pub fn new(pattern: &str, cvv_lengths: &[u8], luhn: bool) -> Result<Self, CatalogError> {
        let pattern = Regex::new(pattern).map_err(|source| CatalogError::BadPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern,
            cvv_lengths: cvv_lengths.to_vec(),
            luhn,
        })
    }

    /// Returns true if the normalized number matches this issuer's pattern.
    #[inline]
    pub fn matches(&self, number: &str) -> bool {
        self.pattern.is_match(number)
    }

    /// The pattern source, as shared with the client mirror.
    #[inline]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Accepted CVV digit counts for this issuer.
    #[inline]
    pub fn cvv_lengths(&self) -> &[u8] {
        &self.cvv_lengths
    }

    /// Whether the Luhn checksum applies to this issuer's numbers.
    #[inline]
    pub const fn requires_luhn(&self) -> bool {
        self.luhn
    }
}

/// Errors building a catalog or parsing its wire form.
#[derive(Debug)]
pub enum CatalogError {
    /// A number pattern failed to compile.
    BadPattern {
        /// The offending pattern source.
        pattern: String,
        /// The regex compile error.
        source: regex::Error,
    },
    /// The wire JSON could not be parsed.
    Wire(serde_json::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadPattern { pattern, source } => {
                write!(f, "invalid card pattern {:?}: {}", pattern, source)
            }
            Self::Wire(err) => write!(f, "invalid catalog wire data: {}", err),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BadPattern { source, .. } => Some(source),
            Self::Wire(err) => Some(err),
        }
    }
}

/// An ordered issuer table.
///
/// Iteration yields entries in declaration order; a number matching
/// more than one pattern classifies as the earliest entry.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<(String, CardSpec)>,
}

// Debit cards come first: their patterns are narrower than the credit
// brands that share the same leading digits.
static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    let table: &[(&str, &str, &[u8], bool)] = &[
        (
            issuer::ELECTRON,
            r"^(?:417500|4026\d{2}|4917\d{2}|4913\d{2}|4508\d{2}|4844\d{2})\d{10}$",
            &[3],
            true,
        ),
        (
            issuer::MAESTRO,
            r"^(5018|5020|5038|6304|6759|6761|6763)[0-9]{8,15}$",
            &[3],
            true,
        ),
        (issuer::FBF, r"^600[0-9]{13}$", &[3], true),
        (issuer::DANKORT, r"^5019[0-9]{12}$", &[3], true),
        (issuer::VISA, r"^4[0-9]{12}([0-9]{3})?$", &[3], true),
        (issuer::MASTERCARD, r"^(5[0-5]|2[2-7])[0-9]{14}$", &[3], true),
        (issuer::AMEX, r"^3[47][0-9]{13}$", &[3, 4], true),
        (issuer::CARTE_BLANCHE, r"^389[0-9]{11}$", &[3], true),
        (issuer::DINERS, r"^3(?:0[0-5]|[68][0-9])[0-9]{11}$", &[3], true),
        (issuer::BC_GLOBAL, r"^(6541|6556)[0-9]{12}$", &[3], true),
        (
            issuer::DISCOVER,
            r"^(?:65[4-9][0-9]{13}|64[4-9][0-9]{13}|6011[0-9]{12}|622(?:12[6-9]|1[3-9][0-9]|[2-8][0-9][0-9]|9[01][0-9]|92[0-5])[0-9]{10})$",
            &[3],
            true,
        ),
        (issuer::INSTA_PAY, r"^63[7-9][0-9]{13}$", &[3], true),
        (issuer::JCB, r"^(3[0-9]{4}|2131|1800)[0-9]{11}$", &[3], true),
        (issuer::VOYAGER, r"^8699[0-9]{11}$", &[3], true),
        (issuer::KOREAN_LOCAL, r"^9[0-9]{15}$", &[3], true),
        (
            issuer::SOLO,
            r"^(6334[5-9][0-9]|6767[0-9]{2})\d{10}(\d{2,3})?$",
            &[3],
            true,
        ),
        (
            issuer::SWITCH_CARD,
            r"^(?:(4903|4905|4911|4936|6333|6759)[0-9]{12}|(4903|4905|4911|4936|6333|6759)[0-9]{14}|(4903|4905|4911|4936|6333|6759)[0-9]{15}|564182[0-9]{10}|564182[0-9]{12}|564182[0-9]{13}|633110[0-9]{10}|633110[0-9]{12}|633110[0-9]{13})$",
            &[3],
            true,
        ),
        (issuer::LASER, r"^(6304|6706|6709|6771)[0-9]{12,15}$", &[3], true),
        (issuer::UNIONPAY, r"^(62|88)[0-9]{14,17}$", &[3], false),
    ];

    let entries = table
        .iter()
        .map(|&(name, pattern, cvv, luhn)| {
            let spec = CardSpec::new(pattern, cvv, luhn).unwrap();
            (name.to_string(), spec)
        })
        .collect();
    Catalog { entries }
});

impl Catalog {
    /// The built-in issuer table.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Builds a catalog from explicit entries, preserving their order.
    pub fn from_entries(entries: Vec<(String, CardSpec)>) -> Self {
        Self { entries }
    }

    /// Looks up an issuer by name.
    pub fn lookup(&self, name: &str) -> Option<&CardSpec> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, spec)| spec)
    }

    /// Restricts the catalog to the allow-listed issuer names.
    ///
    /// Declaration order is preserved. An empty allow-list keeps every
    /// entry; allow-list names with no catalog counterpart are silently
    /// skipped rather than rejected.
    pub fn restrict(&self, allowed: &[&str]) -> Catalog {
        if allowed.is_empty() {
            return self.clone();
        }
        let entries = self
            .entries
            .iter()
            .filter(|(name, _)| allowed.contains(&name.as_str()))
            .cloned()
            .collect();
        Catalog { entries }
    }

    /// Iterates entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CardSpec)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the catalog to its wire form: a JSON object mapping
    /// issuer name to `{pattern, cvvLength, luhn}`, in catalog order.
    ///
    /// This is the payload handed to client-side mirror scripts so that
    /// browser and server classify identically.
    pub fn to_wire_json(&self) -> Result<String, CatalogError> {
        let mut map = serde_json::Map::with_capacity(self.entries.len());
        for (name, spec) in &self.entries {
            let wire = WireSpec {
                pattern: spec.pattern().to_string(),
                cvv_length: spec.cvv_lengths.clone(),
                luhn: spec.luhn,
            };
            let value = serde_json::to_value(wire).map_err(CatalogError::Wire)?;
            map.insert(name.clone(), value);
        }
        serde_json::to_string(&map).map_err(CatalogError::Wire)
    }

    /// Rebuilds a catalog from its wire form, recompiling each pattern.
    ///
    /// Entry order follows the JSON object order.
    pub fn from_wire_json(json: &str) -> Result<Catalog, CatalogError> {
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).map_err(CatalogError::Wire)?;
        let mut entries = Vec::with_capacity(map.len());
        for (name, value) in map {
            let wire: WireSpec = serde_json::from_value(value).map_err(CatalogError::Wire)?;
            let spec = CardSpec::new(&wire.pattern, &wire.cvv_length, wire.luhn)?;
            entries.push((name, spec));
        }
        Ok(Catalog { entries })
    }
}

/// One catalog entry on the wire.
#[derive(Debug, Serialize, Deserialize)]
struct WireSpec {
    pattern: String,
    #[serde(rename = "cvvLength")]
    cvv_length: Vec<u8>,
    luhn: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_size_and_order() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 19);

        let names: Vec<&str> = catalog.iter().map(|(n, _)| n).collect();
        // Debit brands precede the credit brands sharing their prefixes
        let electron = names.iter().position(|&n| n == issuer::ELECTRON).unwrap();
        let visa = names.iter().position(|&n| n == issuer::VISA).unwrap();
        assert!(electron < visa);
        let dankort = names.iter().position(|&n| n == issuer::DANKORT).unwrap();
        let mastercard = names.iter().position(|&n| n == issuer::MASTERCARD).unwrap();
        assert!(dankort < mastercard);
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::builtin();
        assert!(catalog.lookup(issuer::VISA).is_some());
        assert!(catalog.lookup("No Such Card").is_none());
    }

    #[test]
    fn test_spec_flags() {
        let catalog = Catalog::builtin();
        let amex = catalog.lookup(issuer::AMEX).unwrap();
        assert_eq!(amex.cvv_lengths(), &[3, 4]);
        assert!(amex.requires_luhn());

        let unionpay = catalog.lookup(issuer::UNIONPAY).unwrap();
        assert!(!unionpay.requires_luhn());
    }

    #[test]
    fn test_pattern_matching() {
        let catalog = Catalog::builtin();
        let visa = catalog.lookup(issuer::VISA).unwrap();
        assert!(visa.matches("4111111111111111"));
        assert!(visa.matches("4222222222222")); // 13 digits
        assert!(!visa.matches("411111111111111")); // 15 digits
        assert!(!visa.matches("5500000000000004"));
    }

    #[test]
    fn test_restrict_preserves_order() {
        let catalog = Catalog::builtin();
        let subset = catalog.restrict(&[issuer::MASTERCARD, issuer::ELECTRON]);
        let names: Vec<&str> = subset.iter().map(|(n, _)| n).collect();
        // Catalog order, not allow-list order
        assert_eq!(names, vec![issuer::ELECTRON, issuer::MASTERCARD]);
    }

    #[test]
    fn test_restrict_empty_keeps_all() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.restrict(&[]).len(), catalog.len());
    }

    #[test]
    fn test_restrict_skips_unknown_names() {
        // Unknown allow-list names are skipped, not rejected
        let catalog = Catalog::builtin();
        let subset = catalog.restrict(&["Not A Card", issuer::VISA]);
        assert_eq!(subset.len(), 1);
        assert!(subset.lookup(issuer::VISA).is_some());
    }

    #[test]
    fn test_bad_pattern() {
        let err = CardSpec::new("[", &[3], true).unwrap_err();
        assert!(matches!(err, CatalogError::BadPattern { .. }));
    }

    #[test]
    fn test_wire_round_trip() {
        let catalog = Catalog::builtin();
        let json = catalog.to_wire_json().unwrap();
        let rebuilt = Catalog::from_wire_json(&json).unwrap();

        assert_eq!(rebuilt.len(), catalog.len());
        let original: Vec<&str> = catalog.iter().map(|(n, _)| n).collect();
        let round_tripped: Vec<&str> = rebuilt.iter().map(|(n, _)| n).collect();
        assert_eq!(original, round_tripped);

        let amex = rebuilt.lookup(issuer::AMEX).unwrap();
        assert_eq!(amex.cvv_lengths(), &[3, 4]);
        assert!(!rebuilt.lookup(issuer::UNIONPAY).unwrap().requires_luhn());
    }

    #[test]
    fn test_wire_field_names() {
        let json = Catalog::builtin().to_wire_json().unwrap();
        assert!(json.contains("\"pattern\""));
        assert!(json.contains("\"cvvLength\""));
        assert!(json.contains("\"luhn\""));
    }

    #[test]
    fn test_wire_rejects_garbage() {
        assert!(Catalog::from_wire_json("not json").is_err());
        assert!(Catalog::from_wire_json(r#"{"Visa": {"pattern": "["}}"#).is_err());
    }
}
