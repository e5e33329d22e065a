use serde::{Deserialize, Serialize};

/// One carousel entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoItem {
    /// Alt text / label
    pub title: String,
    /// Navigation target when the logo is activated
    pub link_url: String,
    /// Image source
    pub logo_image_url: String,
}

/// One selectable entry of the source dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceOption {
    pub key: String,
    pub text: String,
}

impl DataSourceOption {
    pub fn from_name(name: &str) -> Self {
        Self {
            key: name.to_string(),
            text: name.to_string(),
        }
    }
}

/// OData collection envelope: `{ "value": [...] }`
#[derive(Debug, Deserialize)]
pub(crate) struct ODataCollection<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// Entry of the list directory
#[derive(Debug, Clone, Deserialize)]
pub struct SourceRecord {
    #[serde(rename = "Title", default)]
    pub name: String,
}

/// Hyperlink field value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkField {
    #[serde(rename = "Url", default)]
    pub url: String,
}

/// Raw list item as returned by the list store
#[derive(Debug, Clone, Deserialize)]
pub struct LogoRecord {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "LinkUrl", default, deserialize_with = "nullable")]
    pub link_url: LinkField,
    #[serde(rename = "LogoUrl", default, deserialize_with = "nullable")]
    pub logo_image_url: String,
}

/// Treat an explicit JSON `null` like an absent field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<LogoRecord> for LogoItem {
    fn from(record: LogoRecord) -> Self {
        Self {
            title: record.title,
            link_url: record.link_url.url,
            logo_image_url: record.logo_image_url,
        }
    }
}

impl From<SourceRecord> for DataSourceOption {
    fn from(record: SourceRecord) -> Self {
        Self::from_name(&record.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_items_payload() {
        let json = r#"{
            "value": [
                {"Title": "Contoso", "LinkUrl": {"Url": "https://contoso.com", "Description": "Contoso"}, "LogoUrl": "https://cdn/contoso.png"},
                {"Title": "Fabrikam", "LinkUrl": null, "LogoUrl": null}
            ]
        }"#;
        let parsed: ODataCollection<LogoRecord> = serde_json::from_str(json).unwrap();
        let items: Vec<LogoItem> = parsed.value.into_iter().map(LogoItem::from).collect();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].link_url, "https://contoso.com");
        assert_eq!(items[0].logo_image_url, "https://cdn/contoso.png");
        // Missing fields stay in the list as empty strings
        assert_eq!(items[1].title, "Fabrikam");
        assert_eq!(items[1].link_url, "");
        assert_eq!(items[1].logo_image_url, "");
    }

    #[test]
    fn test_parse_sources_payload() {
        let json = r#"{"value": [{"Title": "Documents"}, {"Title": "Partner Logos"}]}"#;
        let parsed: ODataCollection<SourceRecord> = serde_json::from_str(json).unwrap();
        let options: Vec<DataSourceOption> =
            parsed.value.into_iter().map(DataSourceOption::from).collect();

        assert_eq!(options[1].key, "Partner Logos");
        assert_eq!(options[1].text, "Partner Logos");
    }

    #[test]
    fn test_missing_value_is_empty() {
        let parsed: ODataCollection<SourceRecord> = serde_json::from_str("{}").unwrap();
        assert!(parsed.value.is_empty());
    }
}
