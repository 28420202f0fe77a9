use async_trait::async_trait;
use shared_types::{ApplicationNotification, EmailReceipt, NotifyResponse};

use crate::config::Settings;

// --- Delivery ---

/// Outbound email. One call sends one message to one recipient.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<EmailReceipt, String>;
}

/// Sends through the Mailgun messages API.
pub struct MailgunMailer {
    client: reqwest::Client,
    api_key: String,
    domain: String,
    from: String,
}

impl MailgunMailer {
    pub fn from_settings(settings: &Settings) -> Result<Self, String> {
        let api_key = settings
            .mailgun_api_key
            .clone()
            .ok_or("MAILGUN_API_KEY is not configured")?;
        let domain = settings
            .mailgun_domain
            .clone()
            .ok_or("MAILGUN_DOMAIN is not configured")?;
        let from = settings
            .mailgun_from
            .clone()
            .unwrap_or_else(|| format!("{} <noreply@{}>", settings.app_name, domain));

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            domain,
            from,
        })
    }
}

#[async_trait]
impl Mailer for MailgunMailer {
    #[tracing::instrument(skip(self, html))]
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<EmailReceipt, String> {
        let url = format!("https://api.mailgun.net/v3/{}/messages", self.domain);

        let response = self
            .client
            .post(&url)
            .basic_auth("api", Some(&self.api_key))
            .form(&[
                ("from", self.from.as_str()),
                ("to", to),
                ("subject", subject),
                ("html", html),
            ])
            .send()
            .await
            .map_err(|e| format!("Mailgun request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("Mailgun API error ({}): {}", status, body));
        }

        let receipt = response
            .json::<EmailReceipt>()
            .await
            .map_err(|e| format!("Unreadable Mailgun response: {}", e))?;

        tracing::info!(to, subject, id = ?receipt.id, "Email sent successfully");
        Ok(receipt)
    }
}

/// Stand-in used when the `mailgun` feature is off: logs and reports the
/// message as skipped.
pub struct LogMailer;

pub const SKIPPED_MESSAGE: &str = "Email delivery is disabled; message skipped";

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, _html: &str) -> Result<EmailReceipt, String> {
        tracing::info!(to, subject, "email delivery disabled, skipping send");
        Ok(EmailReceipt {
            id: None,
            message: SKIPPED_MESSAGE.to_string(),
        })
    }
}

// --- Application notifications ---

pub fn admin_subject(n: &ApplicationNotification) -> String {
    format!("New {} Application: {}", n.kind.label(), n.applicant_name)
}

pub fn applicant_subject(n: &ApplicationNotification, app_name: &str) -> String {
    format!("Application Received - {} at {}", n.position, app_name)
}

/// Alert the admin inbox, then confirm to the applicant. Either failure
/// aborts with the provider's error text.
pub async fn send_application_emails(
    mailer: &dyn Mailer,
    settings: &Settings,
    n: &ApplicationNotification,
) -> Result<NotifyResponse, String> {
    tracing::info!(kind = n.kind.as_str(), applicant = %n.applicant_name, "processing application notification");

    let admin_email = mailer
        .send(
            &settings.notify_admin_email,
            &admin_subject(n),
            &templates::admin_alert_html(n, &settings.app_name),
        )
        .await?;

    let applicant_email = mailer
        .send(
            &n.applicant_email,
            &applicant_subject(n, &settings.app_name),
            &templates::applicant_confirmation_html(n, &settings.app_name, &settings.notify_admin_email),
        )
        .await?;

    Ok(NotifyResponse {
        success: true,
        admin_email,
        applicant_email,
    })
}

// --- Webhook verification ---

pub fn verify_webhook_signature(
    signing_key: &str,
    timestamp: &str,
    token: &str,
    signature: &str,
) -> bool {
    use hmac::{Hmac, Mac};
    type HmacSha256 = Hmac<sha2::Sha256>;

    if signing_key.is_empty() {
        return false;
    }
    let Ok(mut mac) = HmacSha256::new_from_slice(signing_key.as_bytes()) else {
        return false;
    };
    mac.update(timestamp.as_bytes());
    mac.update(token.as_bytes());

    let Ok(signature) = hex::decode(signature) else {
        return false;
    };
    mac.verify_slice(&signature).is_ok()
}


// --- Email templates ---

mod templates {
    use shared_types::ApplicationNotification;

    fn escape(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            match ch {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#39;"),
                _ => out.push(ch),
            }
        }
        out
    }

    pub fn admin_alert_html(n: &ApplicationNotification, app_name: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif;">
  <div style="max-width: 600px; margin: 0 auto;">
    <h1 style="color: #6366f1;">New {kind} Application</h1>
    <div style="background: #f8fafc; padding: 20px; border-radius: 8px; margin: 20px 0;">
      <h2 style="margin-top: 0; color: #334155;">Applicant Details</h2>
      <p><strong>Name:</strong> {name}</p>
      <p><strong>Email:</strong> {email}</p>
      <p><strong>Phone:</strong> {phone}</p>
      <p><strong>Position:</strong> {position}</p>
      <p><strong>College:</strong> {college}</p>
    </div>
    <p style="color: #64748b;">Log in to the admin dashboard to review this application.</p>
    <p style="color: #94a3b8; font-size: 12px;">This is an automated notification from {app_name}.</p>
  </div>
</body>
</html>"#,
            kind = n.kind.label(),
            name = escape(&n.applicant_name),
            email = escape(&n.applicant_email),
            phone = escape(&n.phone),
            position = escape(&n.position),
            college = escape(&n.college),
            app_name = escape(app_name),
        )
    }

    pub fn applicant_confirmation_html(
        n: &ApplicationNotification,
        app_name: &str,
        contact_email: &str,
    ) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif;">
  <div style="max-width: 600px; margin: 0 auto;">
    <h1 style="color: #6366f1;">Thank You for Applying!</h1>
    <p>Dear {name},</p>
    <p>We have received your {kind} application for the <strong>{position}</strong> position at {app_name}.</p>
    <div style="background: #f8fafc; padding: 20px; border-radius: 8px; margin: 20px 0;">
      <h3 style="margin-top: 0; color: #334155;">What's Next?</h3>
      <ul style="color: #475569;">
        <li>Our team will review your application carefully</li>
        <li>If shortlisted, we'll contact you within 7-10 business days</li>
        <li>Keep an eye on your email for updates</li>
      </ul>
    </div>
    <p>If you have any questions, reach out to us at {contact}</p>
    <p>Best regards,<br><strong>{app_name} Team</strong></p>
  </div>
</body>
</html>"#,
            name = escape(&n.applicant_name),
            kind = n.kind.as_str(),
            position = escape(&n.position),
            app_name = escape(app_name),
            contact = escape(contact_email),
        )
    }
}
