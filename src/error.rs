use crate::mailchimp_client;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("mailchimp client error: {0}")]
    MailchimpClient(#[from] mailchimp_client::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
