//! CLI Commands

pub mod add;
pub mod config;
pub mod projects;

use serde::de::DeserializeOwned;

/// API client
pub struct ApiClient {
    pub base_url: String,
    pub token: Option<String>,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
            client: reqwest::Client::new(),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.get(&url);

        if let Some(token) = &self.token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let resp = req.send().await.map_err(|e| e.to_string())?;
        let json: serde_json::Value = resp.json().await.map_err(|e| e.to_string())?;
        Self::unwrap_payload(json)
    }

    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, String> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.post(&url).json(body);

        if let Some(token) = &self.token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let resp = req.send().await.map_err(|e| e.to_string())?;
        let json: serde_json::Value = resp.json().await.map_err(|e| e.to_string())?;
        Self::unwrap_payload(json)
    }

    /// Responses arrive wrapped in `{success, message, payload}`; failures
    /// carry the user-facing message and no payload.
    fn unwrap_payload<T: DeserializeOwned>(json: serde_json::Value) -> Result<T, String> {
        if json.get("success").and_then(|v| v.as_bool()) == Some(false) {
            let message = json
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("Request failed");
            return Err(message.to_string());
        }
        match json.get("payload") {
            Some(payload) => serde_json::from_value(payload.clone()).map_err(|e| e.to_string()),
            None => Err("No payload in response".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unwrap_payload_extracts_value() {
        let body = json!({ "success": true, "message": "Success", "payload": [1, 2, 3] });
        let payload: Vec<u32> = ApiClient::unwrap_payload(body).unwrap();
        assert_eq!(payload, vec![1, 2, 3]);
    }

    #[test]
    fn unwrap_payload_surfaces_failure_message() {
        let body = json!({ "success": false, "message": "Project not found" });
        let err = ApiClient::unwrap_payload::<serde_json::Value>(body).unwrap_err();
        assert_eq!(err, "Project not found");
    }
}
