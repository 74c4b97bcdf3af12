//! Locale / Market catalog
//!
//! Immutable lookup service translating public locales (`en-GB`) into the
//! internal language codes used by the catalog collections (`eng_gbr`),
//! brands into brand codes, and (brand, language) pairs into market ids.
//!
//! Internal language codes are always handled lowercased.

mod tables;

use std::collections::HashMap;
use thiserror::Error;

/// The global English language, terminal element of every fallback chain.
pub const GLOBAL_ENGLISH: &str = "eng_glo";

/// Locale resolution errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Unsupported brand: {0}")]
    UnsupportedBrand(String),
}

/// One row of the market table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketEntry {
    pub name: &'static str,
    pub market_id: &'static str,
    pub brand: &'static str,
    pub shortcut: &'static str,
    pub language: &'static str,
}

/// Number display conventions of a language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericFormat {
    pub shortcut: &'static str,
    /// Thousands separator, empty when digits are not grouped
    pub thousands: &'static str,
    pub decimal: &'static str,
}

/// Static locale, brand and market tables
#[derive(Debug, Clone)]
pub struct LocaleCatalog {
    languages: HashMap<&'static str, &'static str>,
    brands: HashMap<&'static str, &'static str>,
    markets: &'static [MarketEntry],
    numeric: HashMap<String, NumericFormat>,
}

impl Default for LocaleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl LocaleCatalog {
    /// Catalog backed by the built-in tables
    pub fn standard() -> Self {
        Self {
            languages: tables::LANGUAGES.iter().copied().collect(),
            brands: tables::BRANDS.iter().copied().collect(),
            markets: tables::MARKETS,
            numeric: tables::NUMERIC_FORMATS
                .iter()
                .map(|(lang, fmt)| (lang.to_lowercase(), *fmt))
                .collect(),
        }
    }

    /// Map a public locale (exact, case-sensitive key) to its internal language code
    pub fn map_locale(&self, locale: &str) -> Result<String, LocaleError> {
        self.languages
            .get(locale)
            .map(|lang| lang.to_lowercase())
            .ok_or_else(|| LocaleError::UnsupportedLocale(locale.to_string()))
    }

    /// Reverse lookup: the last public locale (table order) mapping to `lang`
    pub fn unmap_locale(&self, lang: &str) -> Option<&'static str> {
        tables::LANGUAGES
            .iter()
            .rev()
            .find(|(_, internal)| internal.eq_ignore_ascii_case(lang))
            .map(|(public, _)| *public)
    }

    /// Brand code (`systemair` -> `SYS`)
    pub fn map_brand(&self, brand: &str) -> Result<&'static str, LocaleError> {
        self.brands
            .get(brand.to_lowercase().as_str())
            .copied()
            .ok_or_else(|| LocaleError::UnsupportedBrand(brand.to_string()))
    }

    /// Market id for a brand and internal language.
    ///
    /// Falls back to the brand itself when no market row matches.
    pub fn map_market(&self, brand: &str, lang: &str) -> String {
        self.markets
            .iter()
            .find(|m| m.brand.eq_ignore_ascii_case(brand) && m.language.eq_ignore_ascii_case(lang))
            .map(|m| m.market_id.to_string())
            .unwrap_or_else(|| brand.to_string())
    }

    /// Distinct languages served by a market, in table order
    pub fn languages_for_market(&self, market: &str) -> Vec<&'static str> {
        let mut langs: Vec<&'static str> = Vec::new();
        for entry in self.markets.iter().filter(|m| m.market_id.eq_ignore_ascii_case(market)) {
            if !langs.contains(&entry.language) {
                langs.push(entry.language);
            }
        }
        langs
    }

    /// Ordered languages to consult for `lang`, ending in global English
    pub fn fallback_chain(&self, lang: &str) -> Vec<String> {
        let lang = lang.to_lowercase();
        let chain: &[&str] = match lang.as_str() {
            GLOBAL_ENGLISH => &[GLOBAL_ENGLISH],
            "deu_che" => &["deu_che", "deu_deu", GLOBAL_ENGLISH],
            "ita_che" => &["ita_che", "ita_ita", GLOBAL_ENGLISH],
            "fra_che" => &["fra_che", "fra_fra", GLOBAL_ENGLISH],
            "ukr_ukr" => &["ukr_ukr", "rus_rus", GLOBAL_ENGLISH],
            other => return vec![other.to_string(), GLOBAL_ENGLISH.to_string()],
        };
        chain.iter().map(|l| l.to_string()).collect()
    }

    pub fn numeric_format(&self, lang: &str) -> Option<NumericFormat> {
        self.numeric.get(&lang.to_lowercase()).copied()
    }

    pub fn markets(&self) -> &'static [MarketEntry] {
        self.markets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_locale_maps_to_its_literal_code() {
        let catalog = LocaleCatalog::standard();
        for (public, internal) in tables::LANGUAGES {
            assert_eq!(catalog.map_locale(public).unwrap(), internal.to_lowercase());
        }
        assert_eq!(catalog.map_locale("fr-CH").unwrap(), "fra_che");
        assert_eq!(catalog.map_locale("de-AT").unwrap(), "deu_deu");
        assert_eq!(catalog.map_locale("hr-HR").unwrap(), "eng_glo");
        assert_eq!(catalog.map_locale("ru-KZ").unwrap(), "rus_rus");
    }

    #[test]
    fn unknown_locales_are_rejected() {
        let catalog = LocaleCatalog::standard();
        for locale in ["xx-XX", "en-gb", "EN-GB", "", "de"] {
            assert_eq!(
                catalog.map_locale(locale),
                Err(LocaleError::UnsupportedLocale(locale.to_string()))
            );
        }
    }

    #[test]
    fn fallback_chains_follow_the_table() {
        let catalog = LocaleCatalog::standard();
        assert_eq!(catalog.fallback_chain("eng_glo"), vec!["eng_glo"]);
        assert_eq!(
            catalog.fallback_chain("fra_che"),
            vec!["fra_che", "fra_fra", "eng_glo"]
        );
        assert_eq!(
            catalog.fallback_chain("deu_che"),
            vec!["deu_che", "deu_deu", "eng_glo"]
        );
        assert_eq!(
            catalog.fallback_chain("ita_che"),
            vec!["ita_che", "ita_ita", "eng_glo"]
        );
        assert_eq!(
            catalog.fallback_chain("ukr_ukr"),
            vec!["ukr_ukr", "rus_rus", "eng_glo"]
        );
        assert_eq!(catalog.fallback_chain("swe_swe"), vec!["swe_swe", "eng_glo"]);
    }

    #[test]
    fn fallback_chains_end_in_global_english_without_duplicates() {
        let catalog = LocaleCatalog::standard();
        for (public, _) in tables::LANGUAGES {
            let lang = catalog.map_locale(public).unwrap();
            let chain = catalog.fallback_chain(&lang);
            assert_eq!(chain.last().map(String::as_str), Some(GLOBAL_ENGLISH));
            assert_eq!(chain[0], lang);
            let mut seen = chain.clone();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), chain.len(), "duplicate in chain for {lang}");
        }
    }

    #[test]
    fn market_lookup_matches_exactly_or_returns_brand() {
        let catalog = LocaleCatalog::standard();
        assert_eq!(catalog.map_market("systemair", "deu_deu"), "MARKET-670");
        assert_eq!(catalog.map_market("Systemair", "FRA_CHE"), "MARKET-685");
        assert_eq!(catalog.map_market("frico", "swe_swe"), "MARKET-041");
        assert_eq!(catalog.map_market("tekadoor", "eng_glo"), "tekadoor");
        assert_eq!(catalog.map_market("nobody", "eng_glo"), "nobody");
    }

    #[test]
    fn brands_and_reverse_locales() {
        let catalog = LocaleCatalog::standard();
        assert_eq!(catalog.map_brand("Systemair"), Ok("SYS"));
        assert_eq!(catalog.map_brand("tekadoor"), Ok("TK"));
        assert!(matches!(
            catalog.map_brand("acme"),
            Err(LocaleError::UnsupportedBrand(_))
        ));
        assert_eq!(catalog.unmap_locale("eng_gbr"), Some("en-GB"));
        assert_eq!(catalog.unmap_locale("eng_glo"), Some("hr-HR"));
        assert_eq!(catalog.unmap_locale("xxx_xxx"), None);
    }

    #[test]
    fn market_languages_are_distinct_and_ordered() {
        let catalog = LocaleCatalog::standard();
        assert_eq!(
            catalog.languages_for_market("market-685"),
            vec!["deu_CHE", "fra_CHE", "ita_CHE"]
        );
        assert_eq!(catalog.languages_for_market("MARKET-965"), vec!["eng_GLO"]);
        assert!(catalog.languages_for_market("MARKET-000").is_empty());
    }

    #[test]
    fn numeric_formats_are_case_insensitive() {
        let catalog = LocaleCatalog::standard();
        let de = catalog.numeric_format("deu_deu").unwrap();
        assert_eq!((de.thousands, de.decimal), (".", ","));
        let ch = catalog.numeric_format("DEU_CHE").unwrap();
        assert_eq!((ch.thousands, ch.decimal), ("'", "."));
        assert!(catalog.numeric_format("xxx").is_none());
    }
}
