use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub organization: Organization,
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub pdf: PdfSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Organization {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportSettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Column width for descriptions and party names in the console table
    #[serde(default = "default_description_width")]
    pub description_width: usize,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            description_width: default_description_width(),
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PdfSettings {
    #[serde(default = "default_converter")]
    pub converter: String,
    /// Extra flags passed before the input and output paths
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for PdfSettings {
    fn default() -> Self {
        Self {
            converter: default_converter(),
            args: Vec::new(),
        }
    }
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_description_width() -> usize {
    18
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_converter() -> String {
    "wkhtmltopdf".to_string()
}
