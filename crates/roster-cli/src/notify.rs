use anyhow::{anyhow, Context as _, Result};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use roster_config::{EmailConfig, EmailTls};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub const LOGO_CONTENT_ID: &str = "logo";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailBody {
    pub text: String,
    pub html: String,
}

/// Result of a notification attempt. Failures never propagate past `notify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyOutcome {
    pub sent: bool,
    pub message: String,
}

impl NotifyOutcome {
    pub fn sent(message: impl Into<String>) -> Self {
        Self {
            sent: true,
            message: message.into(),
        }
    }

    pub fn not_sent(message: impl Into<String>) -> Self {
        Self {
            sent: false,
            message: message.into(),
        }
    }
}

/// Sends the exported files to the configured recipients.
pub fn notify(
    config: &EmailConfig,
    files: &[&Path],
    subject: &str,
    body: &EmailBody,
) -> NotifyOutcome {
    if config.to.is_empty() {
        return NotifyOutcome::not_sent("no recipient configured");
    }
    if config.credentials().is_none() {
        return NotifyOutcome::not_sent("no credentials configured");
    }
    if config.smtp_host.is_none() {
        return NotifyOutcome::not_sent("no mail relay configured");
    }

    match EmailNotifier::from_config(config) {
        Ok(notifier) => notifier.deliver(&config.to, files, subject, body),
        Err(err) => NotifyOutcome::not_sent(format!("invalid mail settings: {err:#}")),
    }
}

pub struct EmailNotifier<T> {
    from: Mailbox,
    logo: Option<PathBuf>,
    transport: T,
}

impl EmailNotifier<SmtpTransport> {
    pub fn from_config(config: &EmailConfig) -> Result<Self> {
        let host = config
            .smtp_host
            .as_deref()
            .ok_or_else(|| anyhow!("email.smtp_host is not set"))?;
        let (username, password) = config
            .credentials()
            .ok_or_else(|| anyhow!("email credentials are not set"))?;

        let mut builder = match config.tls {
            EmailTls::Tls => SmtpTransport::relay(host).context("invalid email.smtp_host")?,
            EmailTls::StartTls => {
                SmtpTransport::starttls_relay(host).context("invalid email.smtp_host")?
            }
            EmailTls::None => SmtpTransport::builder_dangerous(host),
        };

        if let Some(port) = config.smtp_port {
            builder = builder.port(port);
        }
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Some(Duration::from_secs(seconds)));
        }
        builder = builder.credentials(Credentials::new(
            username.to_string(),
            password.to_string(),
        ));

        let from = sender(config, username)?;
        Ok(Self::new(from, config.logo.clone(), builder.build()))
    }
}

impl<T> EmailNotifier<T>
where
    T: Transport,
    T::Error: std::fmt::Display,
{
    pub fn new(from: Mailbox, logo: Option<PathBuf>, transport: T) -> Self {
        Self {
            from,
            logo,
            transport,
        }
    }

    pub fn deliver(
        &self,
        recipients: &[String],
        files: &[&Path],
        subject: &str,
        body: &EmailBody,
    ) -> NotifyOutcome {
        match self.try_deliver(recipients, files, subject, body) {
            Ok(attached) => NotifyOutcome::sent(format!(
                "email sent to {} with {attached} attachment(s)",
                recipients.join(", ")
            )),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "email notification failed");
                NotifyOutcome::not_sent(format!("{err:#}"))
            }
        }
    }

    fn try_deliver(
        &self,
        recipients: &[String],
        files: &[&Path],
        subject: &str,
        body: &EmailBody,
    ) -> Result<usize> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(subject);
        for raw in recipients {
            let mailbox: Mailbox = raw
                .parse()
                .with_context(|| format!("invalid recipient {raw}"))?;
            builder = builder.to(mailbox);
        }

        let mut parts = MultiPart::mixed().multipart(self.body_part(body));
        let mut attached = 0;
        for path in files {
            match attachment(path) {
                Ok(part) => {
                    parts = parts.singlepart(part);
                    attached += 1;
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %format!("{err:#}"), "skipping attachment");
                }
            }
        }

        let message = builder.multipart(parts).context("build email")?;
        self.transport
            .send(&message)
            .map_err(|err| anyhow!("transport error: {err}"))?;
        debug!(recipients = recipients.len(), attached, "email sent");
        Ok(attached)
    }

    fn body_part(&self, body: &EmailBody) -> MultiPart {
        let logo = self.logo.as_deref().and_then(|path| match inline_logo(path) {
            Ok(part) => Some(part),
            Err(err) => {
                warn!(path = %path.display(), error = %format!("{err:#}"), "skipping logo");
                None
            }
        });

        match logo {
            Some(logo) => {
                let html = format!(
                    "<p><img src=\"cid:{LOGO_CONTENT_ID}\" alt=\"logo\" height=\"64\"></p>{}",
                    body.html
                );
                MultiPart::alternative()
                    .singlepart(SinglePart::plain(body.text.clone()))
                    .multipart(
                        MultiPart::related()
                            .singlepart(SinglePart::html(html))
                            .singlepart(logo),
                    )
            }
            None => MultiPart::alternative_plain_html(body.text.clone(), body.html.clone()),
        }
    }
}

fn sender(config: &EmailConfig, username: &str) -> Result<Mailbox> {
    match config.from.as_deref() {
        Some(from) => from
            .parse()
            .with_context(|| format!("invalid email.from {from}")),
        None => username
            .parse()
            .map_err(|_| anyhow!("email.from is not set and the SMTP user is not an address")),
    }
}

fn attachment(path: &Path) -> Result<SinglePart> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("attachment path has no file name"))?;
    Ok(Attachment::new(filename).body(bytes, content_type_for(path)?))
}

fn inline_logo(path: &Path) -> Result<SinglePart> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok(Attachment::new_inline(LOGO_CONTENT_ID.to_string()).body(bytes, content_type_for(path)?))
}

fn content_type_for(path: &Path) -> Result<ContentType> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let mime = match extension.as_deref() {
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("csv") => "text/csv; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    };
    ContentType::parse(mime).map_err(|err| anyhow!("invalid content type {mime}: {err}"))
}
