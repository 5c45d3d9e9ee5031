pub mod mail_service;

pub use mail_service::{HttpMailSender, LogMailSender, MailSender, MailService, OutboundMessage, Recipient};
