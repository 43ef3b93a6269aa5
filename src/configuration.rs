use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub portal: PortalSettings,
    pub report: ReportSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

/// Where and what to scrape on the disclosure portal.
#[derive(Debug, Clone, Deserialize)]
pub struct PortalSettings {
    pub list_url: String,
    pub detail_url: String,
    pub menu_no: String,
    pub search_keyword: String,
    pub publish_year: String,
    /// Pages scraped when the server fills its company cache.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub list_page_depth: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub page_depth: u32,
    pub targets: Vec<String>,
    pub markdown_path: String,
    pub pdf_path: String,
    pub font_path: String,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {e}"))
    })?;
    let configuration_directory = base_path.join("configuration");

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
