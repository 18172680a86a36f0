use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub id: i64,
    pub name: String,
    #[serde(rename = "localizedName")]
    pub localized_name: String,
    pub logo: String,
}

impl League {
    /// Name shown as the card title. Falls back to the canonical name when
    /// the API sends an empty localized name.
    pub fn display_name(&self) -> &str {
        if self.localized_name.trim().is_empty() {
            &self.name
        } else {
            &self.localized_name
        }
    }

    pub fn id_badge(&self) -> String {
        format!("ID: {}", self.id)
    }
}

/// Envelope returned by the popular leagues endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PopularLeaguesResponse {
    #[serde(default)]
    pub status: Option<String>,
    pub response: PopularLeagues,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PopularLeagues {
    pub popular: Vec<League>,
}

impl PopularLeaguesResponse {
    pub fn into_leagues(self) -> Vec<League> {
        self.response.popular
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_popular_response() {
        let json = r#"{
            "status": "success",
            "response": {
                "popular": [
                    {"id": 47, "name": "Premier League", "localizedName": "Premier League", "logo": "https://images.fotmob.com/image_resources/logo/leaguelogo/47.png"},
                    {"id": 87, "name": "LaLiga", "localizedName": "LaLiga", "logo": "https://images.fotmob.com/image_resources/logo/leaguelogo/87.png"}
                ]
            }
        }"#;

        let parsed: PopularLeaguesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status.as_deref(), Some("success"));

        let leagues = parsed.into_leagues();
        assert_eq!(leagues.len(), 2);
        assert_eq!(leagues[0].id, 47);
        assert_eq!(leagues[1].localized_name, "LaLiga");
    }

    #[test]
    fn test_parse_without_status() {
        let json = r#"{"response": {"popular": []}}"#;
        let parsed: PopularLeaguesResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.status.is_none());
        assert!(parsed.into_leagues().is_empty());
    }

    #[test]
    fn test_parse_missing_popular_fails() {
        let json = r#"{"status": "success", "response": {}}"#;
        assert!(serde_json::from_str::<PopularLeaguesResponse>(json).is_err());
    }

    #[test]
    fn test_league_serializes_with_wire_names() {
        let league = League {
            id: 1,
            name: "Serie A".to_string(),
            localized_name: "Serie A".to_string(),
            logo: "https://example.com/55.png".to_string(),
        };
        let value = serde_json::to_value(&league).unwrap();
        assert_eq!(value["localizedName"], "Serie A");
        assert!(value.get("localized_name").is_none());
    }

    #[test]
    fn test_display_name_falls_back() {
        let league = League {
            id: 9,
            name: "Eredivisie".to_string(),
            localized_name: "  ".to_string(),
            logo: String::new(),
        };
        assert_eq!(league.display_name(), "Eredivisie");
        assert_eq!(league.id_badge(), "ID: 9");
    }
}
