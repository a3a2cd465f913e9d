//! `reqwest` implementation of the record API gateway.

use async_trait::async_trait;
use his_core::chart::NewChartRecord;
use his_core::command::Credentials;
use his_core::error::Result;
use his_core::gateway::{AdminEntity, ApiAck, LoginResponse, RemoteGateway};
use his_core::patient::AssignmentUpdate;
use reqwest::{Client, Response};
use serde_json::Value;

/// Talks to the record API over HTTP.
///
/// Requests carry no timeout: a call runs until the server answers or the
/// connection fails.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Creates a gateway rooted at `base_url` (no trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turns non-success statuses into transport errors.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        tracing::warn!("[Gateway] {} returned {}", response.url().path(), status);
        Ok(response.error_for_status()?)
    }
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        tracing::debug!("[Gateway] POST /login for {}", credentials.id);
        let response = self
            .client
            .post(self.url("/login"))
            .json(credentials)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn fetch_metadata(&self) -> Result<Value> {
        tracing::debug!("[Gateway] GET /meta-data");
        let response = self.client.get(self.url("/meta-data")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn save_chart(&self, record: &NewChartRecord) -> Result<ApiAck> {
        tracing::debug!(
            "[Gateway] POST /Chart for patient {} by {}",
            record.patient_id,
            record.doctor_id
        );
        let response = self
            .client
            .post(self.url("/Chart"))
            .json(record)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn chart_history(&self, patient_id: &str) -> Result<Value> {
        tracing::debug!("[Gateway] GET /Chart?patientId={}", patient_id);
        let response = self
            .client
            .get(self.url("/Chart"))
            .query(&[("patientId", patient_id)])
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn list_charts(&self) -> Result<Value> {
        tracing::debug!("[Gateway] GET /Chart");
        let response = self.client.get(self.url("/Chart")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete_chart(&self, chart_id: &str) -> Result<()> {
        tracing::debug!("[Gateway] DELETE /Chart/{}", chart_id);
        let response = self
            .client
            .delete(self.url(&format!("/Chart/{}", chart_id)))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn admin_create(&self, entity: AdminEntity, body: &Value) -> Result<()> {
        let path = format!("/admin/{}", entity.path());
        tracing::debug!("[Gateway] POST {}", path);
        let response = self.client.post(self.url(&path)).json(body).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update_patient_assignment(&self, update: &AssignmentUpdate) -> Result<()> {
        tracing::debug!(
            "[Gateway] PUT /admin/patient {} -> {}",
            update.id,
            update.in_charge_id
        );
        let response = self
            .client
            .put(self.url("/admin/patient"))
            .json(update)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves exactly one HTTP response and hands back the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if request_complete(&raw) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).into_owned()
        });

        (format!("http://{}/BlockTeam-Data", addr), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let (base_url, server) =
            serve_once("200 OK", r#"{"success":true,"role":"doctor"}"#).await;
        let gateway = HttpGateway::new(base_url);

        let response = gateway
            .login(&Credentials::new("doc1", "x"))
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.role.as_deref(), Some("doctor"));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /BlockTeam-Data/login HTTP/1.1"));
        assert!(request.contains(r#""id":"doc1""#));
        assert!(request.contains(r#""password":"x""#));
    }

    #[tokio::test]
    async fn test_history_filters_by_patient() {
        let (base_url, server) = serve_once("200 OK", r#"[{"patientId":"p-1"}]"#).await;
        let gateway = HttpGateway::new(base_url);

        let history = gateway.chart_history("p-1").await.unwrap();

        assert_eq!(history, json!([{"patientId": "p-1"}]));
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /BlockTeam-Data/Chart?patientId=p-1 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_save_chart_sends_signed_record() {
        let (base_url, server) = serve_once("200 OK", r#"{"success":true}"#).await;
        let gateway = HttpGateway::new(base_url);
        let record = NewChartRecord::signed(json!({"a": "stable"}), "doc1", "p-1");

        let ack = gateway.save_chart(&record).await.unwrap();

        assert!(ack.success);
        let request = server.await.unwrap();
        assert!(request.starts_with("POST /BlockTeam-Data/Chart HTTP/1.1"));
        assert!(request.contains(r#""signature":"Signed by doc1""#));
    }

    #[tokio::test]
    async fn test_delete_chart_uses_id_path() {
        let (base_url, server) = serve_once("200 OK", "{}").await;
        let gateway = HttpGateway::new(format!("{}/", base_url));

        gateway.delete_chart("42").await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("DELETE /BlockTeam-Data/Chart/42 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_error_status_is_transport_error() {
        let (base_url, _server) = serve_once("500 Internal Server Error", "{}").await;
        let gateway = HttpGateway::new(base_url);

        let err = gateway
            .admin_create(AdminEntity::Department, &json!({"name": "IM"}))
            .await
            .unwrap_err();

        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let gateway = HttpGateway::new(format!("http://{}", addr));

        let err = gateway.fetch_metadata().await.unwrap_err();

        assert!(err.is_transport());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let gateway = HttpGateway::new("http://example.test/api/");
        assert_eq!(gateway.url("/login"), "http://example.test/api/login");
    }
}
