//! Email notification delivery via SMTP.
//!
//! [`SmtpNotifier`] wraps the `lettre` async SMTP transport to send
//! plain-text confirmation emails. Configuration is loaded from environment
//! variables; if `SMTP_HOST` is not set, [`EmailConfig::from_env`] returns
//! `None` and the log-only notifier should be used instead.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use planner_core::types::EntityId;
use planner_db::models::trip::Trip;
use planner_db::PersistenceGateway;

use crate::notifier::{Notifier, NotifyError, Recipient};

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@planner.local";

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpTls {
    /// Plain connection upgraded with STARTTLS.
    StartTls,
    /// Implicit TLS from the first byte (usually port 465).
    Tls,
    /// No encryption at all. Only for local catchers such as Mailpit.
    None,
}

impl SmtpTls {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "starttls" => Some(Self::StartTls),
            "tls" => Some(Self::Tls),
            "none" | "off" => Some(Self::None),
            _ => None,
        }
    }
}

/// Configuration for the SMTP notifier.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// Connection security (defaults to STARTTLS).
    pub smtp_tls: SmtpTls,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
    /// Base URL of the web app hosting the confirmation pages. Emails omit
    /// links when unset.
    pub public_app_url: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured.
    ///
    /// | Variable         | Required | Default                  |
    /// |------------------|----------|--------------------------|
    /// | `SMTP_HOST`      | yes      | -                        |
    /// | `SMTP_PORT`      | no       | `587`                    |
    /// | `SMTP_TLS`       | no       | `starttls`               |
    /// | `SMTP_FROM`      | no       | `noreply@planner.local`  |
    /// | `SMTP_USER`      | no       | -                        |
    /// | `SMTP_PASSWORD`  | no       | -                        |
    /// | `PUBLIC_APP_URL` | no       | -                        |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        let smtp_tls = match std::env::var("SMTP_TLS") {
            Ok(raw) => SmtpTls::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "Unknown SMTP_TLS value, using starttls");
                SmtpTls::StartTls
            }),
            Err(_) => SmtpTls::StartTls,
        };
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            smtp_tls,
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            public_app_url: std::env::var("PUBLIC_APP_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
        })
    }
}

// ---------------------------------------------------------------------------
// Message content
// ---------------------------------------------------------------------------

/// Subject and plain-text body of one email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
}

fn app_link(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

/// Email asking the owner to confirm a new trip.
pub fn owner_confirmation_email(trip: &Trip, public_app_url: Option<&str>) -> EmailContent {
    let mut body = format!(
        "Hello, {}!\n\nYour trip to {} starting on {} needs to be confirmed.\n",
        trip.owner_name,
        trip.destination,
        trip.starts_at.format("%Y-%m-%d"),
    );
    if let Some(base) = public_app_url {
        body.push_str(&format!(
            "\nConfirm it here: {}\n",
            app_link(base, &format!("trips/{}/confirm", trip.id))
        ));
    }
    EmailContent {
        subject: "Confirm your trip".to_string(),
        body,
    }
}

/// Email inviting a participant to confirm their place on a trip.
pub fn participant_invitation_email(
    recipient: &Recipient,
    trip: &Trip,
    public_app_url: Option<&str>,
) -> EmailContent {
    let mut body = format!(
        "Hello, {}!\n\n{} invited you to a trip to {} from {} to {}.\n",
        recipient.name,
        trip.owner_name,
        trip.destination,
        trip.starts_at.format("%Y-%m-%d"),
        trip.ends_at.format("%Y-%m-%d"),
    );
    if let Some(base) = public_app_url {
        body.push_str(&format!(
            "\nConfirm your place here: {}\n",
            app_link(base, &format!("participants/{}/confirm", recipient.participant_id))
        ));
    }
    EmailContent {
        subject: "Confirm your trip invitation".to_string(),
        body,
    }
}

// ---------------------------------------------------------------------------
// SmtpNotifier
// ---------------------------------------------------------------------------

/// Sends confirmation emails via SMTP.
///
/// Loads the trip through the gateway for every call so messages reflect
/// the latest committed destination and dates.
pub struct SmtpNotifier {
    config: EmailConfig,
    gateway: Arc<dyn PersistenceGateway>,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotifier {
    /// Build the notifier and its pooled SMTP transport.
    ///
    /// No connection is opened until the first message is sent.
    pub fn new(config: EmailConfig, gateway: Arc<dyn PersistenceGateway>) -> Result<Self, NotifyError> {
        let mut builder = match config.smtp_tls {
            SmtpTls::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            }
            SmtpTls::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?,
            SmtpTls::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host),
        }
        .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            config,
            gateway,
        })
    }

    fn public_app_url(&self) -> Option<&str> {
        self.config.public_app_url.as_deref()
    }

    async fn send(&self, name: &str, email: &str, content: EmailContent) -> Result<(), NotifyError> {
        let to = Mailbox::new(Some(name.to_string()), email.parse::<Address>()?);
        let message = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to)
            .subject(content.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(content.body)
            .map_err(|e| NotifyError::Build(e.to_string()))?;

        self.transport.send(message).await?;
        Ok(())
    }

    async fn invite(&self, recipient: &Recipient, trip: &Trip) -> Result<(), NotifyError> {
        let content = participant_invitation_email(recipient, trip, self.public_app_url());
        self.send(&recipient.name, &recipient.email, content).await?;
        tracing::info!(
            trip_id = %trip.id,
            participant_id = %recipient.participant_id,
            "Participant invitation email sent"
        );
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_owner_confirmation(&self, trip_id: EntityId) -> Result<(), NotifyError> {
        let trip = self.gateway.get_trip(trip_id).await?;
        let content = owner_confirmation_email(&trip, self.public_app_url());
        self.send(&trip.owner_name, &trip.owner_email, content).await?;
        tracing::info!(%trip_id, "Owner confirmation email sent");
        Ok(())
    }

    async fn send_participant_confirmation(
        &self,
        recipient: &Recipient,
        trip_id: EntityId,
    ) -> Result<(), NotifyError> {
        let trip = self.gateway.get_trip(trip_id).await?;
        self.invite(recipient, &trip).await
    }

    async fn send_participants_confirmation(
        &self,
        recipients: &[Recipient],
        trip_id: EntityId,
    ) -> Result<(), NotifyError> {
        let trip = self.gateway.get_trip(trip_id).await?;

        // One bad address must not stop the rest of the batch.
        let mut failed = 0;
        for recipient in recipients {
            if let Err(e) = self.invite(recipient, &trip).await {
                failed += 1;
                tracing::warn!(
                    error = %e,
                    %trip_id,
                    participant_id = %recipient.participant_id,
                    "Failed to send participant invitation email"
                );
            }
        }

        if failed > 0 {
            return Err(NotifyError::Partial {
                failed,
                total: recipients.len(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
