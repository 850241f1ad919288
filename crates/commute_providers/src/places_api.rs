use serde::Deserialize;

use crate::google_api::{GoogleApiError, PLACES_AUTOCOMPLETE_API_URL, get_json};

#[derive(Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
struct Prediction {
    description: String,
}

/// Address suggestions for partially typed input.
#[derive(Clone)]
pub struct GooglePlacesClient {
    api_key: String,
    url: String,
    client: reqwest::Client,
}

impl GooglePlacesClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            url: PLACES_AUTOCOMPLETE_API_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn autocomplete(&self, input: &str) -> Result<Vec<String>, GoogleApiError> {
        let response: AutocompleteResponse = get_json(
            &self.client,
            &self.url,
            &self.api_key,
            &[("input", input.to_string())],
        )
        .await?;

        into_suggestions(response)
    }
}

fn into_suggestions(response: AutocompleteResponse) -> Result<Vec<String>, GoogleApiError> {
    match response.status.as_str() {
        "OK" | "ZERO_RESULTS" => Ok(response
            .predictions
            .into_iter()
            .map(|prediction| prediction.description)
            .collect()),
        _ => Err(GoogleApiError::Status(response.status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_suggestions() {
        let response: AutocompleteResponse = serde_json::from_str(
            r#"{
                "status": "OK",
                "predictions": [
                    { "description": "350 5th Ave, New York, NY 10118, USA" },
                    { "description": "350 5th St, Brooklyn, NY, USA" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            into_suggestions(response).unwrap(),
            vec![
                "350 5th Ave, New York, NY 10118, USA".to_string(),
                "350 5th St, Brooklyn, NY, USA".to_string()
            ]
        );
    }

    #[test]
    fn test_zero_results_is_empty() {
        let response: AutocompleteResponse =
            serde_json::from_str(r#"{ "status": "ZERO_RESULTS" }"#).unwrap();
        assert!(into_suggestions(response).unwrap().is_empty());
    }

    #[test]
    fn test_denied() {
        let response: AutocompleteResponse =
            serde_json::from_str(r#"{ "status": "REQUEST_DENIED" }"#).unwrap();
        assert!(into_suggestions(response).is_err());
    }
}
