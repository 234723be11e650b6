use crate::dump::*;

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
    #[serde(rename = "format")]
    pub format: Option<String>,
    #[serde(rename = "includeHeaders")]
    pub include_headers: Option<bool>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ItemSource {
    #[serde(rename = "filePath")]
    pub file_path: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DumpConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "itemSources", default)]
    pub item_sources: Vec<ItemSource>,
    #[serde(rename = "limit")]
    pub limit: Option<usize>,
}

pub fn read_config(path: &str) -> DumpResult<DumpConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: {:?}", contents);
    let config: DumpConfig = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

/// Reads a reference export, with the line endings normalized to `\n`.
pub fn read_reference(path: &str) -> DumpResult<String> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    Ok(normalize_newlines(&contents))
}

pub fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config() {
        let config: DumpConfig =
            serde_json::from_str(r#"{"itemSources": [{"filePath": "a.xml"}]}"#).unwrap();
        assert_eq!(config.output_settings, OutputSettings::default());
        assert_eq!(config.item_sources[0].file_path, "a.xml");
        assert_eq!(config.limit, None);
    }

    #[test]
    fn full_config() {
        let js = r#"{
            "outputSettings": {"outputPath": "out/dump.tsv", "format": "tsv", "includeHeaders": false},
            "itemSources": [{"filePath": "a.xml"}, {"filePath": "b.xml"}],
            "limit": 5
        }"#;
        let config: DumpConfig = serde_json::from_str(js).unwrap();
        assert_eq!(
            config.output_settings,
            OutputSettings {
                output_path: Some("out/dump.tsv".to_string()),
                format: Some("tsv".to_string()),
                include_headers: Some(false),
            }
        );
        assert_eq!(config.item_sources.len(), 2);
        assert_eq!(config.limit, Some(5));
    }

    #[test]
    fn newlines() {
        assert_eq!(normalize_newlines("a,b\r\nc,d\r\n"), "a,b\nc,d\n");
    }
}
