use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Provider {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_contact_fields_are_omitted() {
        let raw = r#"{"id":1,"name":"Sarah","email":"sarah@example.com","bio":"b","specialties":["Reiki","Meditation"],"verified":true}"#;
        let p: Provider = serde_json::from_str(raw).unwrap();
        assert_eq!(p.specialties, vec!["Reiki", "Meditation"]);
        let back = serde_json::to_value(&p).unwrap();
        assert!(back.get("phone").is_none());
    }
}
