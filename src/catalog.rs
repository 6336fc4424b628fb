use crate::model::Country;
use anyhow::{Context, Result, bail};
use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Country list shipped with the binary, used when no catalog path is
/// configured.
const BUILTIN_CATALOG: &str = include_str!("../assets/countries.json");

/// Immutable, ordered list of selectable countries, loaded once at startup.
pub struct Catalog {
    countries: Vec<Country>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Load the catalog from `path`, or the built-in list when none is
    /// given. Failure here is fatal for the process; there is nothing to
    /// pick from without a catalog.
    pub fn load(path: Option<&Path>) -> Result<Catalog> {
        let catalog = match path {
            Some(path) => {
                debug!("loading catalog from {:?}", path);
                let content = fs::read_to_string(path)
                    .with_context(|| format!("reading catalog {:?}", path))?;
                Self::from_json(&content)
                    .with_context(|| format!("parsing catalog {:?}", path))?
            }
            None => Self::from_json(BUILTIN_CATALOG).context("parsing built-in catalog")?,
        };
        info!("catalog: loaded {} countries", catalog.len());
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Catalog> {
        let countries: Vec<Country> = serde_json::from_str(json)?;

        let mut by_id = HashMap::with_capacity(countries.len());
        for (index, country) in countries.iter().enumerate() {
            if by_id.insert(country.id.clone(), index).is_some() {
                bail!("duplicate country id {:?}", country.id);
            }
        }

        Ok(Catalog { countries, by_id })
    }

    pub fn get(&self, id: &str) -> Option<&Country> {
        self.by_id.get(id).map(|&index| &self.countries[index])
    }

    /// Countries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Country> {
        self.countries.iter()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_in_order() {
        let catalog = Catalog::from_json(
            r#"[
                {"id": "us", "label": "United States"},
                {"id": "uk", "label": "United Kingdom", "icon": "flags/gb.svg"}
            ]"#,
        )
        .unwrap();

        let labels: Vec<&str> = catalog.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["United States", "United Kingdom"]);
    }

    #[test]
    fn looks_up_by_id() {
        let catalog =
            Catalog::from_json(r#"[{"id": "fr", "label": "France"}]"#).unwrap();
        assert_eq!(catalog.get("fr").unwrap().label, "France");
        assert!(catalog.get("zz").is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = Catalog::from_json(
            r#"[{"id": "fr", "label": "France"}, {"id": "fr", "label": "France again"}]"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn icon_defaults_to_flag_path() {
        let catalog = Catalog::from_json(
            r#"[
                {"id": "fr", "label": "France"},
                {"id": "uk", "label": "United Kingdom", "icon": "flags/gb.svg"}
            ]"#,
        )
        .unwrap();
        assert_eq!(catalog.get("fr").unwrap().icon_ref(), "flags/fr.svg");
        assert_eq!(catalog.get("uk").unwrap().icon_ref(), "flags/gb.svg");
    }

    #[test]
    fn builtin_catalog_parses_with_unique_ids() {
        let catalog = Catalog::load(None).unwrap();
        assert!(catalog.len() > 50);
        assert!(catalog.get("us").is_some());
        assert!(catalog.get("uk").is_some());
    }
}
