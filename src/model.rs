use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Country {
    pub id: String,            // Stable short code (e.g. "us"), unique in the catalog
    pub label: String,         // Display name
    #[serde(default)]
    pub icon: Option<String>,  // Presentation asset override
}

impl Country {
    #[cfg(test)]
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            icon: None,
        }
    }

    /// Reference to the flag asset shown next to the label. Catalog records
    /// may carry an explicit path; otherwise it is derived from the id.
    pub fn icon_ref(&self) -> String {
        match &self.icon {
            Some(path) => path.clone(),
            None => format!("flags/{}.svg", self.id),
        }
    }
}
