//! HTTP implementation of the notification gateway.
//!
//! # Responsibility
//! - Issue the portal's REST calls with a blocking `reqwest` client.
//! - Decode bodies into domain records and classify failures.
//!
//! # Invariants
//! - Every request uses the configured timeout.
//! - Non-2xx responses are never decoded.
//! - Log lines carry endpoint, status and timing only, never payload text.

use super::{GatewayError, GatewayResult, NotificationGateway, NotificationPage};
use crate::config::SyncConfig;
use crate::model::dashboard::DashboardStats;
use crate::model::notification::NotificationId;
use log::{debug, warn};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Instant;

const NOTIFICATIONS_ENDPOINT: &str = "notifications";
const ACK_ENDPOINT: &str = "notification_read";
const STATS_ENDPOINT: &str = "dashboard_stats";

#[derive(Deserialize)]
struct AckResponse {
    #[serde(default)]
    success: bool,
}

/// Blocking REST client for `/api/notifications` and `/api/dashboard/stats`.
#[derive(Debug, Clone)]
pub struct HttpNotificationGateway {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpNotificationGateway {
    /// Builds a gateway from validated config.
    ///
    /// # Errors
    /// - Returns `Transport` when the HTTP client cannot be constructed.
    pub fn new(config: &SyncConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(ACCEPT, "application/json");
        match self.auth_token.as_deref() {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }

    fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> GatewayResult<T> {
        let started_at = Instant::now();
        let result = self
            .authorize(request)
            .send()
            .map_err(|err| GatewayError::Transport(err.to_string()))
            .and_then(|response| read_body(endpoint, response))
            .and_then(|body| decode_json(body.as_str()));

        match &result {
            Ok(_) => debug!(
                "event=http_request module=gateway status=ok endpoint={} duration_ms={}",
                endpoint,
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=http_request module=gateway status=error endpoint={} duration_ms={} error_code={} error={}",
                endpoint,
                started_at.elapsed().as_millis(),
                err.code(),
                err
            ),
        }
        result
    }
}

impl NotificationGateway for HttpNotificationGateway {
    fn fetch_page(&self, per_page: u32) -> GatewayResult<NotificationPage> {
        let url = format!("{}/api/notifications?per_page={per_page}", self.base_url);
        self.execute(NOTIFICATIONS_ENDPOINT, self.client.get(url))
    }

    fn acknowledge_read(&self, id: NotificationId) -> GatewayResult<()> {
        let url = format!("{}/api/notifications/{id}/read", self.base_url);
        let ack: AckResponse = self.execute(ACK_ENDPOINT, self.client.post(url))?;
        if ack.success {
            Ok(())
        } else {
            Err(GatewayError::Rejected(id))
        }
    }

    fn fetch_dashboard_stats(&self) -> GatewayResult<DashboardStats> {
        let url = format!("{}/api/dashboard/stats", self.base_url);
        self.execute(STATS_ENDPOINT, self.client.get(url))
    }
}

fn read_body(endpoint: &'static str, response: Response) -> GatewayResult<String> {
    let status = response.status();
    if !status.is_success() {
        return Err(GatewayError::Status {
            endpoint,
            code: status.as_u16(),
        });
    }
    response
        .text()
        .map_err(|err| GatewayError::Transport(err.to_string()))
}

pub(crate) fn decode_json<T: DeserializeOwned>(body: &str) -> GatewayResult<T> {
    serde_json::from_str(body).map_err(|err| GatewayError::Malformed(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{decode_json, AckResponse};
    use crate::gateway::{GatewayError, NotificationPage};
    use crate::model::notification::NotificationKind;

    #[test]
    fn decodes_page_envelope_with_paging_keys() {
        let body = r#"{
            "notifications": [{
                "id": 3,
                "title": "Grade posted",
                "message": "Algebra: 5",
                "type": "success",
                "is_read": false,
                "is_important": true,
                "requires_action": false,
                "created_at": "2024-01-10T11:00:00",
                "action_url": null,
                "action_text": null
            }],
            "has_next": true,
            "has_prev": false,
            "page": 1,
            "pages": 4
        }"#;
        let page: NotificationPage = decode_json(body).expect("page should decode");
        assert_eq!(page.notifications.len(), 1);
        assert_eq!(page.notifications[0].kind, NotificationKind::Success);
        assert!(page.has_next);
        assert_eq!(page.pages, Some(4));
    }

    #[test]
    fn missing_notifications_key_is_malformed() {
        let err = decode_json::<NotificationPage>(r#"{"page": 1}"#)
            .expect_err("envelope without list must fail");
        assert!(matches!(err, GatewayError::Malformed(_)));
    }

    #[test]
    fn ack_without_success_key_counts_as_refusal() {
        let ack: AckResponse = decode_json("{}").expect("empty ack object should decode");
        assert!(!ack.success);
    }
}
