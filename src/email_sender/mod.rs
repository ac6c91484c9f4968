use crate::config::{Credentials, DeliveryConfig};
use crate::errors::SendError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, warn};

const MAILGUN_BASE_URL: &str = "https://api.mailgun.net/v3";

#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to_email: String,
    pub to_name: String,
    pub subject: String,
    pub body: String,
}

/// Proof of acceptance returned by the provider.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SendReceipt {
    pub message_id: String,
    pub accepted_at: DateTime<Utc>,
}

#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, SendError>;
}

#[derive(Debug, Deserialize)]
struct MailgunResponse {
    id: String,
    #[allow(dead_code)]
    message: String,
}

/// Mailgun HTTP transport: form post against the messages endpoint with
/// basic auth, tracking enabled and a per-run campaign tag.
pub struct MailgunTransport {
    client: Client,
    api_key: String,
    domain: String,
    from_email: String,
    from_name: String,
}

impl MailgunTransport {
    pub fn new(credentials: &Credentials) -> Result<Self, SendError> {
        let api_key = credentials
            .mailgun_api_key
            .clone()
            .ok_or_else(|| SendError::Rejected("missing Mailgun API key".to_string()))?;

        debug!("Created Mailgun transport for domain {}", credentials.mailgun_domain);
        Ok(Self {
            client: Client::new(),
            api_key,
            domain: credentials.mailgun_domain.clone(),
            from_email: credentials.from_email.clone(),
            from_name: credentials.from_name.clone(),
        })
    }
}

#[async_trait]
impl EmailTransport for MailgunTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, SendError> {
        let url = format!("{}/{}/messages", MAILGUN_BASE_URL, self.domain);
        debug!("Preparing email for {}: {}", email.to_email, email.subject);

        let mut form_data = HashMap::new();
        form_data.insert("from", format!("{} <{}>", self.from_name, self.from_email));
        form_data.insert("to", format!("{} <{}>", email.to_name, email.to_email));
        form_data.insert("subject", email.subject.clone());
        form_data.insert("text", email.body.clone());
        form_data.insert("o:tracking", "yes".to_string());
        form_data.insert("o:tracking-opens", "yes".to_string());
        form_data.insert(
            "o:tag",
            format!("campaign-{}", Utc::now().format("%Y-%m")),
        );

        let response = self
            .client
            .post(&url)
            .basic_auth("api", Some(&self.api_key))
            .form(&form_data)
            .send()
            .await?;

        debug!("Mailgun response status: {}", response.status());

        if response.status().is_success() {
            let parsed: MailgunResponse = response.json().await?;
            Ok(SendReceipt {
                message_id: parsed.id,
                accepted_at: Utc::now(),
            })
        } else {
            let error_text = response.text().await.unwrap_or_default();
            error!("Mailgun API error: {}", error_text);
            Err(SendError::Rejected(error_text))
        }
    }
}

/// Bounded retry wrapper around a transport. Fixed backoff between attempts;
/// the last error is carried into the terminal failure.
pub async fn send_with_retries(
    transport: &dyn EmailTransport,
    email: &OutgoingEmail,
    config: &DeliveryConfig,
) -> Result<SendReceipt, SendError> {
    let attempts = config.max_retries.max(1);
    let mut last_error = String::new();

    for attempt in 1..=attempts {
        match transport.send(email).await {
            Ok(receipt) => return Ok(receipt),
            Err(e) => {
                warn!(
                    "Send attempt {}/{} to {} failed: {}",
                    attempt, attempts, email.to_email, e
                );
                last_error = e.to_string();
                if attempt < attempts {
                    tokio::time::sleep(Duration::from_millis(config.retry_backoff_ms)).await;
                }
            }
        }
    }

    Err(SendError::RetriesExhausted {
        attempts,
        last_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FlakyTransport {
        calls: AtomicU32,
        succeed_on: u32,
    }

    #[async_trait]
    impl EmailTransport for FlakyTransport {
        async fn send(&self, _email: &OutgoingEmail) -> Result<SendReceipt, SendError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call >= self.succeed_on {
                Ok(SendReceipt {
                    message_id: format!("msg-{call}"),
                    accepted_at: Utc::now(),
                })
            } else {
                Err(SendError::Rejected("temporary".to_string()))
            }
        }
    }

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            to_email: "jane@acme.com".to_string(),
            to_name: "Jane Doe".to_string(),
            subject: "subject".to_string(),
            body: "body".to_string(),
        }
    }

    fn delivery_config() -> DeliveryConfig {
        DeliveryConfig {
            delay_between_prospects_ms: 0,
            max_retries: 3,
            retry_backoff_ms: 1,
            min_personalization_score: 0.3,
        }
    }

    #[tokio::test]
    async fn retries_until_success() {
        let transport = FlakyTransport {
            calls: AtomicU32::new(0),
            succeed_on: 2,
        };
        let receipt = send_with_retries(&transport, &email(), &delivery_config())
            .await
            .unwrap();
        assert_eq!(receipt.message_id, "msg-2");
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn exhausted_retries_report_attempt_count() {
        let transport = FlakyTransport {
            calls: AtomicU32::new(0),
            succeed_on: 10,
        };
        let err = send_with_retries(&transport, &email(), &delivery_config())
            .await
            .unwrap_err();
        match err {
            SendError::RetriesExhausted { attempts, .. } => assert_eq!(attempts, 3),
            other => panic!("expected RetriesExhausted, got {other:?}"),
        }
        assert_eq!(transport.calls.load(Ordering::SeqCst), 3);
    }
}
