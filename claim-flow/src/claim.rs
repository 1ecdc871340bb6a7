use serde::{Deserialize, Serialize};

/// A read-only insurance claim record.
///
/// Field names follow the bundled dataset's JSON keys, including its
/// `Device` capitalisation and the `puchasedate` spelling. Every field is
/// free text shown as-is; nothing here is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    #[serde(rename = "claimID")]
    pub claim_id: String,
    #[serde(rename = "Device", alias = "device")]
    pub device: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub serial: String,
    pub value: String,
    #[serde(rename = "puchasedate", alias = "purchaseDate")]
    pub purchase_date: String,
    pub issue: String,
    pub cause: String,
    pub date: String,
    pub time: String,
    pub status: String,
}

impl Claim {
    /// Case-insensitive identifier comparison used by every lookup.
    ///
    /// Simple lowercase folding, no Unicode normalisation.
    pub fn matches_id(&self, id: &str) -> bool {
        self.claim_id.to_lowercase() == id.to_lowercase()
    }

    /// One-line summary shown under the claim header
    pub fn headline(&self) -> String {
        format!("{} • Submitted {} at {}", self.device, self.date, self.time)
    }
}

#[cfg(test)]
pub(crate) fn sample_claim(id: &str) -> Claim {
    Claim {
        claim_id: id.to_string(),
        device: "iPhone 14 Pro".to_string(),
        device_type: "Smartphone".to_string(),
        serial: "F2LZK9QWN72J".to_string(),
        value: "$999".to_string(),
        purchase_date: "2023-02-14".to_string(),
        issue: "Cracked screen".to_string(),
        cause: "Accidental drop".to_string(),
        date: "2024-05-02".to_string(),
        time: "14:30".to_string(),
        status: "Under Review".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_id_ignores_case() {
        let claim = sample_claim("ABC123");
        assert!(claim.matches_id("abc123"));
        assert!(claim.matches_id("AbC123"));
        assert!(!claim.matches_id("abc1234"));
        assert!(!claim.matches_id(" abc123"));
    }

    #[test]
    fn test_deserialize_dataset_keys() {
        let json = r#"{
            "claimID": "ABC123",
            "Device": "Pixel 8",
            "type": "Smartphone",
            "serial": "SN1",
            "value": "$699",
            "puchasedate": "2024-01-01",
            "issue": "Screen",
            "cause": "Drop",
            "date": "2024-02-01",
            "time": "10:00",
            "status": "Open"
        }"#;
        let claim: Claim = serde_json::from_str(json).unwrap();
        assert_eq!(claim.device, "Pixel 8");
        assert_eq!(claim.purchase_date, "2024-01-01");
        assert_eq!(claim.device_type, "Smartphone");
    }

    #[test]
    fn test_deserialize_accepts_camel_case_aliases() {
        let json = r#"{
            "claimID": "A1",
            "device": "Kindle",
            "type": "E-reader",
            "serial": "K1",
            "value": "$99",
            "purchaseDate": "2021-03-03",
            "issue": "Battery",
            "cause": "Wear",
            "date": "2024-02-01",
            "time": "10:00",
            "status": "Open"
        }"#;
        let claim: Claim = serde_json::from_str(json).unwrap();
        assert_eq!(claim.device, "Kindle");
        assert_eq!(claim.purchase_date, "2021-03-03");
    }

    #[test]
    fn test_headline() {
        let claim = sample_claim("ABC123");
        assert_eq!(
            claim.headline(),
            "iPhone 14 Pro • Submitted 2024-05-02 at 14:30"
        );
    }
}
