//! Delivery backends.

use crate::message::{MailFormat, MailMessage};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MessageBuilder};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use parking_lot::Mutex;
use perseus_conf::MailSettings;
use perseus_core::{Error, Result};

/// A mail delivery mechanism.
#[async_trait]
pub trait MailBackend: Send + Sync {
	async fn deliver(&self, message: &MailMessage) -> Result<()>;
}

/// Build the backend named in the settings: `smtp`, `console`, or
/// `memory`.
pub fn backend_from_settings(settings: &MailSettings) -> Result<Box<dyn MailBackend>> {
	match settings.backend.as_str() {
		"smtp" => Ok(Box::new(SmtpBackend::new(
			&settings.smtp_host,
			settings.smtp_port,
		)?)),
		"console" => Ok(Box::new(ConsoleBackend)),
		"memory" => Ok(Box::new(MemoryBackend::new())),
		other => Err(Error::Mail(format!("unknown mail backend '{other}'"))),
	}
}

/// Delivery over SMTP via `lettre`.
pub struct SmtpBackend {
	transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpBackend {
	pub fn new(host: &str, port: u16) -> Result<Self> {
		let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
			.map_err(|e| Error::Mail(format!("SMTP relay setup failed: {e}")))?
			.port(port)
			.build();
		Ok(Self { transport })
	}
}

#[async_trait]
impl MailBackend for SmtpBackend {
	async fn deliver(&self, message: &MailMessage) -> Result<()> {
		let email = to_lettre(message)?;
		self.transport
			.send(email)
			.await
			.map_err(|e| Error::Mail(e.to_string()))?;
		Ok(())
	}
}

/// Prints each message to stdout. The development default.
pub struct ConsoleBackend;

#[async_trait]
impl MailBackend for ConsoleBackend {
	async fn deliver(&self, message: &MailMessage) -> Result<()> {
		println!("--- mail ---");
		println!("From: {}", message.from);
		println!("To: {}", message.to.join(", "));
		if !message.cc.is_empty() {
			println!("Cc: {}", message.cc.join(", "));
		}
		println!("Subject: {}", message.subject);
		println!();
		println!("{}", message.body);
		println!("------------");
		Ok(())
	}
}

/// Records delivered messages in memory. For tests.
#[derive(Default)]
pub struct MemoryBackend {
	sent: Mutex<Vec<MailMessage>>,
}

impl MemoryBackend {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn sent(&self) -> Vec<MailMessage> {
		self.sent.lock().clone()
	}
}

#[async_trait]
impl MailBackend for MemoryBackend {
	async fn deliver(&self, message: &MailMessage) -> Result<()> {
		self.sent.lock().push(message.clone());
		Ok(())
	}
}

fn parse_mailbox(address: &str) -> Result<Mailbox> {
	address
		.parse()
		.map_err(|e| Error::Mail(format!("invalid address '{address}': {e}")))
}

fn to_lettre(message: &MailMessage) -> Result<Message> {
	let mut builder = MessageBuilder::new()
		.from(parse_mailbox(&message.from)?)
		.subject(&message.subject);
	for to in &message.to {
		builder = builder.to(parse_mailbox(to)?);
	}
	for cc in &message.cc {
		builder = builder.cc(parse_mailbox(cc)?);
	}
	for bcc in &message.bcc {
		builder = builder.bcc(parse_mailbox(bcc)?);
	}
	if let Some(reply_to) = &message.reply_to {
		builder = builder.reply_to(parse_mailbox(reply_to)?);
	}
	let content_type = match message.format {
		MailFormat::Plain => ContentType::TEXT_PLAIN,
		MailFormat::Html => ContentType::TEXT_HTML,
	};
	builder
		.header(content_type)
		.body(message.body.clone())
		.map_err(|e| Error::Mail(e.to_string()))
}
