//! Demo-request notification emails via the Resend HTTP API.

use super::store::DemoRequest;
use crate::config::ConvergeConfig;
use serde::Serialize;
use std::time::Duration;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: String,
    html: String,
    text: String,
}

pub struct Notifier {
    http: reqwest::Client,
    api_key: Option<String>,
    from: String,
    to: String,
}

impl Notifier {
    pub fn new(config: &ConvergeConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            api_key: config.resend_api_key.clone(),
            from: config.from_email.clone(),
            to: config.notify_email.clone(),
        }
    }

    /// Send the notification for a stored request. Callers treat failures as
    /// non-fatal; this returns the error only so they can log it.
    pub async fn notify_demo_request(&self, request: &DemoRequest) -> Result<(), reqwest::Error> {
        let Some(api_key) = &self.api_key else {
            tracing::debug!(id = %request.id, "No Resend API key configured, skipping notification");
            return Ok(());
        };

        let body = SendEmailRequest {
            from: &self.from,
            to: &self.to,
            subject: format!("New Demo Request: {}", request.name),
            html: render_html(request),
            text: render_text(request),
        };

        self.http
            .post(RESEND_ENDPOINT)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        tracing::info!(id = %request.id, "Notification email sent");
        Ok(())
    }
}

fn render_html(request: &DemoRequest) -> String {
    format!(
        "<h2>New Demo Request</h2>\
         <p>Someone requested a demo on converge.zone:</p>\
         <table style=\"border-collapse: collapse; margin: 20px 0;\">\
         <tr><td style=\"padding: 8px; border: 1px solid #ddd; font-weight: bold;\">Name</td>\
         <td style=\"padding: 8px; border: 1px solid #ddd;\">{name}</td></tr>\
         <tr><td style=\"padding: 8px; border: 1px solid #ddd; font-weight: bold;\">Email</td>\
         <td style=\"padding: 8px; border: 1px solid #ddd;\">\
         <a href=\"mailto:{email}\">{email}</a></td></tr>\
         <tr><td style=\"padding: 8px; border: 1px solid #ddd; font-weight: bold;\">Request ID</td>\
         <td style=\"padding: 8px; border: 1px solid #ddd; font-family: monospace;\">{id}</td></tr>\
         </table>",
        name = escape_html(&request.name),
        email = escape_html(&request.email),
        id = request.id,
    )
}

fn render_text(request: &DemoRequest) -> String {
    format!(
        "New Demo Request\n\nName: {}\nEmail: {}\nRequest ID: {}",
        request.name, request.email, request.id
    )
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::store::RequestStatus;
    use chrono::Utc;

    fn sample_request() -> DemoRequest {
        DemoRequest {
            id: "abc123".to_string(),
            name: "Ada <script>".to_string(),
            email: "ada@example.com".to_string(),
            created_at: Utc::now(),
            status: RequestStatus::Pending,
            source: "website".to_string(),
        }
    }

    #[test]
    fn test_html_escapes_user_input() {
        let html = render_html(&sample_request());
        assert!(html.contains("Ada &lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_text_body_contains_fields() {
        let text = render_text(&sample_request());
        assert!(text.contains("ada@example.com"));
        assert!(text.contains("abc123"));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_a_noop() {
        let notifier = Notifier::new(&crate::config::ConvergeConfig::default());
        assert!(notifier.notify_demo_request(&sample_request()).await.is_ok());
    }
}
