use log::error;
use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BrandColors {
    pub primary: String,
    pub accent: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Provider {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    pub colors: BrandColors,
}

const CATALOG_JSON: &str = include_str!("../assets/providers.json");

pub static PROVIDERS: Lazy<Vec<Provider>> = Lazy::new(|| parse_catalog(CATALOG_JSON));

pub fn parse_catalog(raw: &str) -> Vec<Provider> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        error!("Failed to parse provider catalog: {}", e);
        Vec::new()
    })
}

pub fn find_provider(id: &str) -> Option<&'static Provider> {
    PROVIDERS.iter().find(|provider| provider.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_has_unique_ids() {
        assert!(!PROVIDERS.is_empty());
        let mut ids: Vec<&str> = PROVIDERS.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), PROVIDERS.len());
    }

    #[test]
    fn finds_providers_by_id() {
        let att = find_provider("att").expect("att is in the catalog");
        assert_eq!(att.name, "AT&T Fiber");
        assert!(find_provider("not-a-provider").is_none());
    }

    #[test]
    fn tagline_is_optional() {
        let parsed = parse_catalog(
            r##"[{"id": "hughesnet", "name": "HughesNet", "colors": {"primary": "#005eb8", "accent": "#fff"}}]"##,
        );
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].tagline, "");
    }

    #[test]
    fn broken_catalog_is_empty() {
        assert!(parse_catalog("{ not json").is_empty());
    }
}
