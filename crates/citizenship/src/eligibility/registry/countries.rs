use super::{CountryMetadata, CountryStatus};

pub(super) const JAMAICA_DESCENT_RULES: &str = include_str!("../../../rules/jm-cbd-v1.json");

pub(super) fn standard_countries() -> Vec<CountryMetadata> {
    vec![
        CountryMetadata {
            code: "jm".to_string(),
            name: "Jamaica".to_string(),
            flag: "🇯🇲".to_string(),
            short_description: "Visa-free access to 80+ countries. The right to live, work, and own property in the Caribbean.".to_string(),
            status: CountryStatus::Active,
            visa_free_countries: Some(83),
            benefits: vec![
                "Visa-free travel to 80+ countries".to_string(),
                "Right to live and work in Jamaica".to_string(),
                "Property ownership rights".to_string(),
                "Pass citizenship to children".to_string(),
            ],
        },
        CountryMetadata {
            code: "it".to_string(),
            name: "Italy".to_string(),
            flag: "🇮🇹".to_string(),
            short_description: "EU citizenship. Live anywhere in Europe. Pass it down forever."
                .to_string(),
            status: CountryStatus::ComingSoon,
            visa_free_countries: Some(188),
            benefits: vec![
                "Full EU citizenship".to_string(),
                "Live and work in any EU country".to_string(),
                "Access to EU healthcare and education".to_string(),
                "No generational limit".to_string(),
            ],
        },
        CountryMetadata {
            code: "pl".to_string(),
            name: "Poland".to_string(),
            flag: "🇵🇱".to_string(),
            short_description: "EU passport. Deep roots. A growing economy.".to_string(),
            status: CountryStatus::ComingSoon,
            visa_free_countries: Some(182),
            benefits: vec![
                "Full EU citizenship".to_string(),
                "Live and work in any EU country".to_string(),
                "Strong economy with opportunities".to_string(),
                "Rich cultural heritage".to_string(),
            ],
        },
    ]
}
