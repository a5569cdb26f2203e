use serde::{Deserialize, Serialize};

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> String;
}

// Configuration abstracts config options for the catalog service
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub branch_id: String,
    pub service_name: String,
    pub version: String,
    pub description: String,
    pub search_page_size: usize,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            service_name: "Catálogo Service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Microservicio para gestión del catálogo de libros".to_string(),
            search_page_size: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new("test");
        assert_eq!("test", config.branch_id.as_str());
        assert_eq!("Catálogo Service", config.service_name.as_str());
        assert_eq!(env!("CARGO_PKG_VERSION"), config.version.as_str());
        assert_eq!(100, config.search_page_size);
    }
}
