//! Lead and campaign operations built on the connection.
//!
//! A thin enumeration of fixed-path REST endpoints; every operation maps one
//! domain intent to a `get`/`post` through the authenticated pipeline and
//! interprets the normalized records.

use marketo_domain::{LeadRecord, LeadUpdateStatus, MarketoConfig, MarketoError, Result};
use serde_json::{json, Value};

use crate::connection::Connection;

/// High-level Marketo client carrying the lead and campaign operations.
#[derive(Clone)]
pub struct MarketoClient {
    connection: Connection,
}

impl MarketoClient {
    /// Create a client for `https://{instance}.mktorest.com`.
    pub fn new(config: MarketoConfig) -> Result<Self> {
        Ok(Self { connection: Connection::new(config)? })
    }

    /// Wrap an existing connection (clones share its token cache).
    pub fn with_connection(connection: Connection) -> Self {
        Self { connection }
    }

    /// Borrow the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Look up a lead by its prefixed Munchkin cookie.
    ///
    /// The instance prefix is stripped locally before querying; a cookie
    /// without the prefix fails with `InvalidCookie` and never reaches the
    /// network.
    pub async fn lead_by_cookie(&self, cookie: &str) -> Result<Option<LeadRecord>> {
        let bare = self.connection.strip_cookie(cookie)?;
        let records = self
            .connection
            .get("leads.json", &[("filterType", "cookie"), ("filterValues", bare.as_str())])
            .await?;
        Ok(records.into_iter().next())
    }

    /// Fetch a lead by its Marketo ID.
    pub async fn lead_by_id(&self, lead_id: i64) -> Result<Vec<LeadRecord>> {
        self.connection.get(&format!("lead/{lead_id}.json"), &[]).await
    }

    /// Look up a lead by email address.
    pub async fn lead_by_email(&self, email: &str) -> Result<Option<LeadRecord>> {
        let records = self
            .connection
            .get("leads.json", &[("filterType", "email"), ("filterValues", email)])
            .await?;
        Ok(records.into_iter().next())
    }

    /// Create or update a lead, matching on the email field.
    ///
    /// Returns the server-assigned lead ID and disposition from the first
    /// response record.
    pub async fn update_lead(&self, lead: &Value) -> Result<LeadUpdateStatus> {
        let body = json!({ "lookupField": "email", "input": [lead] });
        let records = self.connection.post("leads.json", &[], &body).await?;

        let first = records.into_iter().next().ok_or_else(|| {
            MarketoError::InvalidResponse("lead update returned no result records".to_string())
        })?;
        serde_json::from_value(Value::Object(first))
            .map_err(|err| MarketoError::InvalidResponse(format!("lead update status: {err}")))
    }

    /// Attach a Munchkin cookie to the lead on the remote server.
    pub async fn associate_lead(&self, lead_id: i64, cookie: &str) -> Result<()> {
        self.connection
            .post(&format!("leads/{lead_id}/associate.json"), &[("cookie", cookie)], &Value::Null)
            .await?;
        Ok(())
    }

    /// Trigger a smart campaign for a single lead.
    pub async fn request_campaign(&self, lead_id: i64, campaign_id: i64) -> Result<()> {
        let body = json!({ "input": { "leads": [{ "id": lead_id }] } });
        self.connection
            .post(&format!("campaigns/{campaign_id}/trigger.json"), &[], &body)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const INSTANCE: &str = "082-XYZ-116";
    const COOKIE_PREFIX: &str = "id:082-XYZ-116&token:";

    fn client(server: &MockServer) -> MarketoClient {
        let config = MarketoConfig::new("client-id", "client-secret", INSTANCE);
        let connection =
            Connection::with_base_url(config, server.uri()).expect("connection");
        MarketoClient::with_connection(connection)
    }

    async fn mount_identity(server: &MockServer, expected: u64) {
        Mock::given(method("GET"))
            .and(path("/identity/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok1",
                "expires_in": 3600
            })))
            .expect(expected)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn lead_by_cookie_queries_with_bare_value() {
        let server = MockServer::start().await;
        mount_identity(&server, 1).await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/leads.json"))
            .and(query_param("filterType", "cookie"))
            .and(query_param("filterValues", "561-HYG-937&token=6D0A"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": [{"id": 1, "email": "a@b.com"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let cookie = format!("{COOKIE_PREFIX}561-HYG-937&token=6D0A");
        let lead = client.lead_by_cookie(&cookie).await.expect("lead").expect("present");

        assert_eq!(lead["id"], serde_json::json!(1));
    }

    #[tokio::test]
    async fn lead_by_cookie_rejects_unprefixed_cookie_locally() {
        let server = MockServer::start().await;
        mount_identity(&server, 0).await;

        let client = client(&server);
        let err = client.lead_by_cookie("561-HYG-937&token=6D0A").await.expect_err("must fail");

        assert!(matches!(err, MarketoError::InvalidCookie(_)));
    }

    #[tokio::test]
    async fn lead_by_email_returns_none_when_absent() {
        let server = MockServer::start().await;
        mount_identity(&server, 1).await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/leads.json"))
            .and(query_param("filterType", "email"))
            .and(query_param("filterValues", "nobody@b.com"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": []})),
            )
            .mount(&server)
            .await;

        let client = client(&server);
        let lead = client.lead_by_email("nobody@b.com").await.expect("lookup");

        assert!(lead.is_none());
    }

    #[tokio::test]
    async fn lead_by_id_hits_the_lead_path() {
        let server = MockServer::start().await;
        mount_identity(&server, 1).await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/lead/7.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": [{"id": 7}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let records = client.lead_by_id(7).await.expect("records");

        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn update_lead_parses_id_and_status() {
        let server = MockServer::start().await;
        mount_identity(&server, 1).await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/leads.json"))
            .and(body_json(serde_json::json!({
                "lookupField": "email",
                "input": [{"email": "a@b.com", "firstName": "Ada"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": [{"id": 42, "status": "updated"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let lead = serde_json::json!({"email": "a@b.com", "firstName": "Ada"});
        let status = client.update_lead(&lead).await.expect("status");

        assert_eq!(status, LeadUpdateStatus { id: 42, status: "updated".to_string() });
    }

    #[tokio::test]
    async fn update_lead_with_empty_result_is_an_invalid_response() {
        let server = MockServer::start().await;
        mount_identity(&server, 1).await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/leads.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": []})),
            )
            .mount(&server)
            .await;

        let client = client(&server);
        let err = client
            .update_lead(&serde_json::json!({"email": "a@b.com"}))
            .await
            .expect_err("must fail");

        assert!(matches!(err, MarketoError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn associate_lead_sends_cookie_as_query_param() {
        let server = MockServer::start().await;
        mount_identity(&server, 1).await;

        let cookie = format!("{COOKIE_PREFIX}abc");
        Mock::given(method("POST"))
            .and(path("/rest/v1/leads/7/associate.json"))
            .and(query_param("cookie", cookie.as_str()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        client.associate_lead(7, &cookie).await.expect("associate");
    }

    #[tokio::test]
    async fn request_campaign_posts_the_lead_list() {
        let server = MockServer::start().await;
        mount_identity(&server, 1).await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/campaigns/99/trigger.json"))
            .and(body_json(serde_json::json!({
                "input": {"leads": [{"id": 7}]}
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        client.request_campaign(7, 99).await.expect("trigger");
    }
}
