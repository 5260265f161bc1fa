use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// IANA name, e.g. `Europe/London`. `None` until configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub updated_at: String,
}
