use crate::tools::email::Error::{
    CantConnectToSmtpServer, CantSendMessage, MissingEmailSenderAddress, MissingEmailSenderName,
    MissingSmtpLogin, MissingSmtpPassword,
};
use crate::tools::env_args::{retrieve_arg_value, retrieve_expected_arg_value};
use crate::tools::log_message_and_return;
use mail_send::SmtpClientBuilder;
use mail_send::mail_builder::MessageBuilder;
use thiserror::Error;

type Result<T, E = Error> = std::result::Result<T, E>;

const EMAIL_SENDER_NAME_ARG: &str = "--email-sender-name";
const EMAIL_SENDER_ADDRESS_ARG: &str = "--email-sender-address";
const SMTP_SERVER_ARG: &str = "--smtp-server";
const SMTP_PORT_ARG: &str = "--smtp-port";
pub const SMTP_LOGIN_ARG: &str = "--smtp-login";
const SMTP_PASSWORD_ARG: &str = "--smtp-password";
const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;

pub async fn send_email(recipients: &[&str], subject: &str, text_body: &str) -> Result<()> {
    let message = create_message(recipients, subject, text_body)?;
    create_smtp_client_and_send_email(message).await
}

async fn create_smtp_client_and_send_email(message: MessageBuilder<'_>) -> Result<()> {
    let smtp_server = retrieve_smtp_server();
    let smtp_port = retrieve_smtp_port();
    let smtp_login = retrieve_expected_arg_value(SMTP_LOGIN_ARG, MissingSmtpLogin)?;
    let smtp_password = retrieve_expected_arg_value(SMTP_PASSWORD_ARG, MissingSmtpPassword)?;
    let smtp_client = SmtpClientBuilder::new(smtp_server, smtp_port)
        .implicit_tls(false)
        .credentials((smtp_login, smtp_password))
        .connect()
        .await;

    smtp_client
        .map_err(log_message_and_return(
            "Couldn't connect to SMTP server",
            CantConnectToSmtpServer,
        ))?
        .send(message)
        .await
        .map_err(log_message_and_return(
            "Couldn't send message",
            CantSendMessage,
        ))
}

fn create_message<'a>(
    recipients: &'a [&str],
    subject: &'a str,
    text_body: &'a str,
) -> Result<MessageBuilder<'a>> {
    let sender_name =
        retrieve_expected_arg_value(EMAIL_SENDER_NAME_ARG, MissingEmailSenderName)?;
    let sender_address =
        retrieve_expected_arg_value(EMAIL_SENDER_ADDRESS_ARG, MissingEmailSenderAddress)?;

    Ok(MessageBuilder::new()
        .from((sender_name, sender_address))
        .to(Vec::from(recipients))
        .subject(subject)
        .text_body(text_body))
}

fn retrieve_smtp_server() -> String {
    retrieve_arg_value(SMTP_SERVER_ARG).unwrap_or(DEFAULT_SMTP_SERVER.to_owned())
}

fn retrieve_smtp_port() -> u16 {
    retrieve_arg_value(SMTP_PORT_ARG)
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(DEFAULT_SMTP_PORT)
}

#[derive(Debug, PartialEq, Error)]
pub enum Error {
    #[error("Missing email sender name")]
    MissingEmailSenderName,
    #[error("Missing email sender address")]
    MissingEmailSenderAddress,
    #[error("Missing SMTP login")]
    MissingSmtpLogin,
    #[error("Missing SMTP password")]
    MissingSmtpPassword,
    #[error("Can't connect to SMTP server")]
    CantConnectToSmtpServer,
    #[error("Can't send message")]
    CantSendMessage,
}
