//! Literal lookup tables for locales, brands, markets and number formats

use super::{MarketEntry, NumericFormat};

/// Public locale to internal language code.
pub(super) const LANGUAGES: &[(&str, &str)] = &[
    ("az-AZ", "aze_AZE"),
    ("bg-BG", "bul_BGR"),
    ("cs-CZ", "ces_CZE"),
    ("da-DK", "dan_DNK"),
    ("de-AT", "deu_DEU"),
    ("de-CH", "deu_CHE"),
    ("de-DE", "deu_DEU"),
    ("el-GR", "ell_GRC"),
    ("en", "eng_GLO"),
    ("en-AE", "eng_GLO"),
    ("en-CA", "eng_CAN"),
    ("en-GB", "eng_GBR"),
    ("en-HK", "eng_GLO"),
    ("en-IE", "eng_GLO"),
    ("en-IN", "eng_IND"),
    ("en-KE", "eng_GLO"),
    ("en-MY", "eng_MYS"),
    ("en-QA", "eng_GLO"),
    ("en-RS", "eng_GLO"),
    ("en-SA", "eng_GLO"),
    ("en-SG", "eng_GLO"),
    ("en-US", "eng_USA"),
    ("en-ZA", "eng_GLO"),
    ("es-ES", "spa_ESP"),
    ("es-MX", "spa_MEX"),
    ("es-PE", "spa_PER"),
    ("et-EE", "est_EST"),
    ("fi-FI", "fin_FIN"),
    ("fr-BE", "fra_FRA"),
    ("fr-CA", "fra_CAN"),
    ("fr-CH", "fra_CHE"),
    ("fr-FR", "fra_FRA"),
    ("fr-MA", "fra_FRA"),
    ("hr-HR", "eng_GLO"),
    ("hu-HU", "hun_HUN"),
    ("it-CH", "ita_CHE"),
    ("it-IT", "ita_ITA"),
    ("ka-GE", "kat_GEO"),
    ("lt-LT", "lit_LTU"),
    ("lv-LV", "lav_LVA"),
    ("nl-BE", "nld_NLD"),
    ("nl-NL", "nld_NLD"),
    ("no-NO", "nor_NOR"),
    ("pl-PL", "pol_POL"),
    ("pt-PT", "por_PRT"),
    ("ro-RO", "ron_ROU"),
    ("ru-BY", "rus_RUS"),
    ("ru-KZ", "rus_RUS"),
    ("ru-RU", "rus_RUS"),
    ("sk-SK", "slk_SVK"),
    ("sl-SI", "slv_SVN"),
    ("sv-SE", "swe_SWE"),
    ("tr-TR", "tur_TUR"),
    ("uk-UA", "ukr_UKR"),
];

/// Brand name to brand code.
pub(super) const BRANDS: &[(&str, &str)] = &[
    ("frico", "FRI"),
    ("systemair", "SYS"),
    ("fantech", "FAN"),
    ("menerga", "MEN"),
    ("tekadoor", "TK"),
];

pub(super) const MARKETS: &[MarketEntry] = &[
    MarketEntry {
        name: "Systemair Global (005) - EN",
        market_id: "MARKET-005",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Frico Global (040) - EN/ZW",
        market_id: "MARKET-040",
        brand: "frico",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Frico Sweden (041) - SV/SE",
        market_id: "MARKET-041",
        brand: "frico",
        shortcut: "sv",
        language: "swe_SWE",
    },
    MarketEntry {
        name: "Systemair SE (115) - SV/SE",
        market_id: "MARKET-115",
        brand: "systemair",
        shortcut: "sv",
        language: "swe_SWE",
    },
    MarketEntry {
        name: "Systemair TW (225) - EN/TW",
        market_id: "MARKET-225",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair IN (240) - EN/IN",
        market_id: "MARKET-240",
        brand: "systemair",
        shortcut: "eni",
        language: "eng_IND",
    },
    MarketEntry {
        name: "Systemair AE (250) - EN/AE",
        market_id: "MARKET-250",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair GR (260) - EL/GR",
        market_id: "MARKET-260",
        brand: "systemair",
        shortcut: "gr",
        language: "ell_GRC",
    },
    MarketEntry {
        name: "Frico Netherland (280) - NL/NL",
        market_id: "MARKET-280",
        brand: "frico",
        shortcut: "nl",
        language: "nld_NLD",
    },
    MarketEntry {
        name: "Systemair PE (285) - ES/PE",
        market_id: "MARKET-285",
        brand: "systemair",
        shortcut: "spe",
        language: "spa_PER",
    },
    MarketEntry {
        name: "Systemair ZA (290) - EN/ZA",
        market_id: "MARKET-290",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair UK (300) - EN/GB",
        market_id: "MARKET-300",
        brand: "systemair",
        shortcut: "eng",
        language: "eng_GBR",
    },
    MarketEntry {
        name: "Systemair LT (310) - LT/LT",
        market_id: "MARKET-310",
        brand: "systemair",
        shortcut: "lt",
        language: "lit_LTU",
    },
    MarketEntry {
        name: "Systemair IT (325) - IT/IT",
        market_id: "MARKET-325",
        brand: "systemair",
        shortcut: "it",
        language: "ita_ITA",
    },
    MarketEntry {
        name: "Frico Italy (326) - IT/IT",
        market_id: "MARKET-326",
        brand: "frico",
        shortcut: "it",
        language: "ita_ITA",
    },
    MarketEntry {
        name: "Systemair MY (330) - EN/MY",
        market_id: "MARKET-330",
        brand: "systemair",
        shortcut: "enm",
        language: "eng_MYS",
    },
    MarketEntry {
        name: "Systemair RS (350) - EN/RS",
        market_id: "MARKET-350",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair HR (360) - HR/HR",
        market_id: "MARKET-360",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Menerga Global (380) - DE/DE",
        market_id: "MARKET-380",
        brand: "menerga",
        shortcut: "de",
        language: "deu_DEU",
    },
    MarketEntry {
        name: "Menerga Global (380) - EN/DE",
        market_id: "MARKET-380",
        brand: "menerga",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Frico France (410) - FR/FR",
        market_id: "MARKET-410",
        brand: "frico",
        shortcut: "fr",
        language: "fra_FRA",
    },
    MarketEntry {
        name: "Frico Norway (420) - NO/NO",
        market_id: "MARKET-420",
        brand: "frico",
        shortcut: "no",
        language: "nor_NOR",
    },
    MarketEntry {
        name: "Frico Germany (435) - DE/DE",
        market_id: "MARKET-435",
        brand: "frico",
        shortcut: "de",
        language: "deu_DEU",
    },
    MarketEntry {
        name: "Systemair FI (440) - FI/FI",
        market_id: "MARKET-440",
        brand: "systemair",
        shortcut: "fi",
        language: "fin_FIN",
    },
    MarketEntry {
        name: "Frico DK (445) - DA/DK",
        market_id: "MARKET-445",
        brand: "frico",
        shortcut: "da",
        language: "dan_DNK",
    },
    MarketEntry {
        name: "Systemair NO (450) - NO/NO",
        market_id: "MARKET-450",
        brand: "systemair",
        shortcut: "no",
        language: "nor_NOR",
    },
    MarketEntry {
        name: "Fantech Canada (460) - EN/CA",
        market_id: "MARKET-460",
        brand: "fantech",
        shortcut: "enc",
        language: "eng_CAN",
    },
    MarketEntry {
        name: "Fantech Canada (460) - FR/CA",
        market_id: "MARKET-460",
        brand: "fantech",
        shortcut: "frc",
        language: "fra_CAN",
    },
    MarketEntry {
        name: "Systemair CA (461) - EN/CA",
        market_id: "MARKET-461",
        brand: "systemair",
        shortcut: "enc",
        language: "eng_CAN",
    },
    MarketEntry {
        name: "Systemair CA (461) - FR/CA",
        market_id: "MARKET-461",
        brand: "systemair",
        shortcut: "frc",
        language: "fra_CAN",
    },
    MarketEntry {
        name: "Frico Canada (462) - EN/CA",
        market_id: "MARKET-462",
        brand: "frico",
        shortcut: "enc",
        language: "eng_CAN",
    },
    MarketEntry {
        name: "Frico Canada (462) - FR/CA",
        market_id: "MARKET-462",
        brand: "frico",
        shortcut: "frc",
        language: "fra_CAN",
    },
    MarketEntry {
        name: "Systemair PL (470) - PL/PL",
        market_id: "MARKET-470",
        brand: "systemair",
        shortcut: "pl",
        language: "pol_POL",
    },
    MarketEntry {
        name: "Frico Poland (471) - PL/PL",
        market_id: "MARKET-471",
        brand: "frico",
        shortcut: "pl",
        language: "pol_POL",
    },
    MarketEntry {
        name: "Systemair FR (480) - FR/FR",
        market_id: "MARKET-480",
        brand: "systemair",
        shortcut: "fr",
        language: "fra_FRA",
    },
    MarketEntry {
        name: "Systemair CZ (490) - CS/CZ",
        market_id: "MARKET-490",
        brand: "systemair",
        shortcut: "cs",
        language: "ces_CZE",
    },
    MarketEntry {
        name: "Frico Czech Republic (491) - CS/CZ",
        market_id: "MARKET-491",
        brand: "frico",
        shortcut: "cs",
        language: "ces_CZE",
    },
    MarketEntry {
        name: "Systemair SK (500) - SK/SK",
        market_id: "MARKET-500",
        brand: "systemair",
        shortcut: "sk",
        language: "slk_SVK",
    },
    MarketEntry {
        name: "Frico Slovakia (501) - SK/SK",
        market_id: "MARKET-501",
        brand: "frico",
        shortcut: "sk",
        language: "slk_SVK",
    },
    MarketEntry {
        name: "Systemair MX (535) - ES/MX",
        market_id: "MARKET-535",
        brand: "systemair",
        shortcut: "smx",
        language: "spa_MEX",
    },
    MarketEntry {
        name: "Systemair US (540) - EN/US",
        market_id: "MARKET-540",
        brand: "systemair",
        shortcut: "enu",
        language: "eng_USA",
    },
    MarketEntry {
        name: "Fantech US (541) - EN/US",
        market_id: "MARKET-541",
        brand: "fantech",
        shortcut: "enu",
        language: "eng_USA",
    },
    MarketEntry {
        name: "Frico USA (542) - EN/US",
        market_id: "MARKET-542",
        brand: "frico",
        shortcut: "enu",
        language: "eng_USA",
    },
    MarketEntry {
        name: "Systemair SI (610) - SL/SI",
        market_id: "MARKET-610",
        brand: "systemair",
        shortcut: "sl",
        language: "slv_SVN",
    },
    MarketEntry {
        name: "Systemair BG (625) - BG/BG",
        market_id: "MARKET-625",
        brand: "systemair",
        shortcut: "bg",
        language: "bul_BGR",
    },
    MarketEntry {
        name: "Systemair PT (635) - PT/PT",
        market_id: "MARKET-635",
        brand: "systemair",
        shortcut: "pt",
        language: "por_PRT",
    },
    MarketEntry {
        name: "Systemair ES (645) - ES/ES",
        market_id: "MARKET-645",
        brand: "systemair",
        shortcut: "sp",
        language: "spa_ESP",
    },
    MarketEntry {
        name: "Frico Spain (646) - ES/ES",
        market_id: "MARKET-646",
        brand: "frico",
        shortcut: "sp",
        language: "spa_ESP",
    },
    MarketEntry {
        name: "Systemair IE (655) - EN/IE",
        market_id: "MARKET-655",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair SG (660) - EN/SG",
        market_id: "MARKET-660",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair HK (665) - EN/HK",
        market_id: "MARKET-665",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair DE (670) - DE/DE",
        market_id: "MARKET-670",
        brand: "systemair",
        shortcut: "de",
        language: "deu_DEU",
    },
    MarketEntry {
        name: "Systemair AT (680) - DE/AT",
        market_id: "MARKET-680",
        brand: "systemair",
        shortcut: "de",
        language: "deu_DEU",
    },
    MarketEntry {
        name: "Systemair CH (685) - DE/CH",
        market_id: "MARKET-685",
        brand: "systemair",
        shortcut: "des",
        language: "deu_CHE",
    },
    MarketEntry {
        name: "Systemair CH (685) - FR/CH",
        market_id: "MARKET-685",
        brand: "systemair",
        shortcut: "frs",
        language: "fra_CHE",
    },
    MarketEntry {
        name: "Systemair CH (685) - IT/CH",
        market_id: "MARKET-685",
        brand: "systemair",
        shortcut: "its",
        language: "ita_CHE",
    },
    MarketEntry {
        name: "Systemair NL (695) - NL/NL",
        market_id: "MARKET-695",
        brand: "systemair",
        shortcut: "nl",
        language: "nld_NLD",
    },
    MarketEntry {
        name: "Systemair BE (700) - FR/BE",
        market_id: "MARKET-700",
        brand: "systemair",
        shortcut: "fr",
        language: "fra_FRA",
    },
    MarketEntry {
        name: "Systemair BE (700) - NL/BE",
        market_id: "MARKET-700",
        brand: "systemair",
        shortcut: "nl",
        language: "nld_NLD",
    },
    MarketEntry {
        name: "Systemair EE (730) - ET/EE",
        market_id: "MARKET-730",
        brand: "systemair",
        shortcut: "et",
        language: "est_EST",
    },
    MarketEntry {
        name: "Systemair LV (740) - LV/LV",
        market_id: "MARKET-740",
        brand: "systemair",
        shortcut: "lv",
        language: "lav_LVA",
    },
    MarketEntry {
        name: "Systemair BY (746) - RU/BY",
        market_id: "MARKET-746",
        brand: "systemair",
        shortcut: "ru",
        language: "rus_RUS",
    },
    MarketEntry {
        name: "Systemair TR (760) - TR/TR",
        market_id: "MARKET-760",
        brand: "systemair",
        shortcut: "tr",
        language: "tur_TUR",
    },
    MarketEntry {
        name: "Systemair DK (770) - DA/DK",
        market_id: "MARKET-770",
        brand: "systemair",
        shortcut: "da",
        language: "dan_DNK",
    },
    MarketEntry {
        name: "Systemair HU (790) - HU/HU",
        market_id: "MARKET-790",
        brand: "systemair",
        shortcut: "hu",
        language: "hun_HUN",
    },
    MarketEntry {
        name: "Systemair RO (795) - RO/RO",
        market_id: "MARKET-795",
        brand: "systemair",
        shortcut: "ro",
        language: "ron_ROU",
    },
    MarketEntry {
        name: "Systemair KZ (905) - RU/KZ",
        market_id: "MARKET-905",
        brand: "systemair",
        shortcut: "ru",
        language: "rus_RUS",
    },
    MarketEntry {
        name: "Systemair RU (920) - RU/RU",
        market_id: "MARKET-920",
        brand: "systemair",
        shortcut: "ru",
        language: "rus_RUS",
    },
    MarketEntry {
        name: "Frico Russia (921) - RU/RU",
        market_id: "MARKET-921",
        brand: "frico",
        shortcut: "ru",
        language: "rus_RUS",
    },
    MarketEntry {
        name: "Systemair GE (925) - KA/GE",
        market_id: "MARKET-925",
        brand: "systemair",
        shortcut: "ka",
        language: "kat_GEO",
    },
    MarketEntry {
        name: "Systemair UA (930) - UK/UA",
        market_id: "MARKET-930",
        brand: "systemair",
        shortcut: "uk",
        language: "ukr_UKR",
    },
    MarketEntry {
        name: "Systemair AZ (935) - AZ/AZ",
        market_id: "MARKET-935",
        brand: "systemair",
        shortcut: "az",
        language: "aze_AZE",
    },
    MarketEntry {
        name: "Systemair QA (950) - EN/QA",
        market_id: "MARKET-950",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair SA (955) - EN/SA",
        market_id: "MARKET-955",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair MA (960) - FR/MA",
        market_id: "MARKET-960",
        brand: "systemair",
        shortcut: "fr",
        language: "fra_FRA",
    },
    MarketEntry {
        name: "Systemair EA (965) - EN/MW",
        market_id: "MARKET-965",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair EA (965) - EN/RW",
        market_id: "MARKET-965",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair EA (965) - EN/TZ",
        market_id: "MARKET-965",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair EA (965) - EN/BI",
        market_id: "MARKET-965",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair EA (965) - EN/RE",
        market_id: "MARKET-965",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair EA (965) - EN/ER",
        market_id: "MARKET-965",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair EA (965) - EN/MG",
        market_id: "MARKET-965",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair EA (965) - EN/MZ",
        market_id: "MARKET-965",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair EA (965) - EN/SO",
        market_id: "MARKET-965",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair EA (965) - EN/ZW",
        market_id: "MARKET-965",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair EA (965) - EN/DJ",
        market_id: "MARKET-965",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair EA (965) - EN/KE",
        market_id: "MARKET-965",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair EA (965) - EN/MU",
        market_id: "MARKET-965",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair EA (965) - EN/SC",
        market_id: "MARKET-965",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair EA (965) - EN/UG",
        market_id: "MARKET-965",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair EA (965) - EN/KM",
        market_id: "MARKET-965",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
    MarketEntry {
        name: "Systemair EA (965) - EN/ET",
        market_id: "MARKET-965",
        brand: "systemair",
        shortcut: "en",
        language: "eng_GLO",
    },
];

pub(super) const NUMERIC_FORMATS: &[(&str, NumericFormat)] = &[
    (
        "eng_GLO",
        NumericFormat {
            shortcut: "en",
            thousands: ",",
            decimal: ".",
        },
    ),
    (
        "deu_DEU",
        NumericFormat {
            shortcut: "de",
            thousands: ".",
            decimal: ",",
        },
    ),
    (
        "fra_FRA",
        NumericFormat {
            shortcut: "fr",
            thousands: "",
            decimal: ",",
        },
    ),
    (
        "bul_BGR",
        NumericFormat {
            shortcut: "bg",
            thousands: ".",
            decimal: ",",
        },
    ),
    (
        "ces_CZE",
        NumericFormat {
            shortcut: "cs",
            thousands: ".",
            decimal: ",",
        },
    ),
    (
        "dan_DNK",
        NumericFormat {
            shortcut: "da",
            thousands: ".",
            decimal: ",",
        },
    ),
    (
        "deu_CHE",
        NumericFormat {
            shortcut: "des",
            thousands: "'",
            decimal: ".",
        },
    ),
    (
        "ell_GRC",
        NumericFormat {
            shortcut: "gr",
            thousands: ".",
            decimal: ",",
        },
    ),
    (
        "eng_CAN",
        NumericFormat {
            shortcut: "enc",
            thousands: "",
            decimal: ".",
        },
    ),
    (
        "eng_GBR",
        NumericFormat {
            shortcut: "eng",
            thousands: ",",
            decimal: ".",
        },
    ),
    (
        "eng_IND",
        NumericFormat {
            shortcut: "eni",
            thousands: ",",
            decimal: ".",
        },
    ),
    (
        "spa_CHL",
        NumericFormat {
            shortcut: "scl",
            thousands: ".",
            decimal: ",",
        },
    ),
    (
        "spa_MEX",
        NumericFormat {
            shortcut: "smx",
            thousands: ",",
            decimal: ".",
        },
    ),
    (
        "est_EST",
        NumericFormat {
            shortcut: "et",
            thousands: "",
            decimal: ".",
        },
    ),
    (
        "fin_FIN",
        NumericFormat {
            shortcut: "fi",
            thousands: "",
            decimal: ",",
        },
    ),
    (
        "fra_BEL",
        NumericFormat {
            shortcut: "frb",
            thousands: ".",
            decimal: ",",
        },
    ),
    (
        "fra_CAN",
        NumericFormat {
            shortcut: "frc",
            thousands: "",
            decimal: ".",
        },
    ),
    (
        "fra_CHE",
        NumericFormat {
            shortcut: "frs",
            thousands: "'",
            decimal: ".",
        },
    ),
    (
        "hrv_HRV",
        NumericFormat {
            shortcut: "hr",
            thousands: ".",
            decimal: ",",
        },
    ),
    (
        "hun_HUN",
        NumericFormat {
            shortcut: "hu",
            thousands: "",
            decimal: ".",
        },
    ),
    (
        "ita_CHE",
        NumericFormat {
            shortcut: "its",
            thousands: "'",
            decimal: ".",
        },
    ),
    (
        "ita_ITA",
        NumericFormat {
            shortcut: "it",
            thousands: ".",
            decimal: ",",
        },
    ),
    (
        "lit_LTU",
        NumericFormat {
            shortcut: "lt",
            thousands: "",
            decimal: ",",
        },
    ),
    (
        "lav_LVA",
        NumericFormat {
            shortcut: "lv",
            thousands: "",
            decimal: ",",
        },
    ),
    (
        "eng_MYS",
        NumericFormat {
            shortcut: "enm",
            thousands: ".",
            decimal: ",",
        },
    ),
    (
        "nld_NLD",
        NumericFormat {
            shortcut: "nl",
            thousands: ".",
            decimal: ",",
        },
    ),
    (
        "nor_NOR",
        NumericFormat {
            shortcut: "no",
            thousands: "",
            decimal: ",",
        },
    ),
    (
        "pol_POL",
        NumericFormat {
            shortcut: "pl",
            thousands: "",
            decimal: ",",
        },
    ),
    (
        "por_PRT",
        NumericFormat {
            shortcut: "pt",
            thousands: "",
            decimal: ",",
        },
    ),
    (
        "rus_RUS",
        NumericFormat {
            shortcut: "ru",
            thousands: "",
            decimal: ",",
        },
    ),
    (
        "slv_SVN",
        NumericFormat {
            shortcut: "sl",
            thousands: ".",
            decimal: ",",
        },
    ),
    (
        "srp_SRB",
        NumericFormat {
            shortcut: "sr",
            thousands: ".",
            decimal: ",",
        },
    ),
    (
        "swe_SWE",
        NumericFormat {
            shortcut: "sv",
            thousands: "",
            decimal: ",",
        },
    ),
    (
        "tur_TUR",
        NumericFormat {
            shortcut: "tr",
            thousands: ".",
            decimal: ",",
        },
    ),
    (
        "slk_SVK",
        NumericFormat {
            shortcut: "sk",
            thousands: ".",
            decimal: ",",
        },
    ),
    (
        "spa_ESP",
        NumericFormat {
            shortcut: "sp",
            thousands: ".",
            decimal: ",",
        },
    ),
    (
        "eng_USA",
        NumericFormat {
            shortcut: "enu",
            thousands: ",",
            decimal: ".",
        },
    ),
    (
        "spa_PER",
        NumericFormat {
            shortcut: "spe",
            thousands: ".",
            decimal: ",",
        },
    ),
    (
        "zho_CHN",
        NumericFormat {
            shortcut: "chn",
            thousands: ",",
            decimal: ".",
        },
    ),
    (
        "ron_ROU",
        NumericFormat {
            shortcut: "ro",
            thousands: "",
            decimal: ",",
        },
    ),
    (
        "aze_AZE",
        NumericFormat {
            shortcut: "az",
            thousands: ".",
            decimal: ",",
        },
    ),
    (
        "kat_GEO",
        NumericFormat {
            shortcut: "ka",
            thousands: ".",
            decimal: ",",
        },
    ),
    (
        "ukr_UKR",
        NumericFormat {
            shortcut: "uk",
            thousands: ".",
            decimal: ",",
        },
    ),
];
