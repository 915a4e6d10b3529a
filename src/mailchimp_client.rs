use md5::{Digest, Md5};
use reqwest::{header::AUTHORIZATION, Client, StatusCode, Url};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;

use crate::config::MailchimpSecrets;

/// The Mailchimp member id: lowercase hex MD5 of the lowercased email address.
/// Mailchimp addresses members this way so the digest can't be swapped for anything stronger.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub struct SubscriberHash(String);

impl SubscriberHash {
    pub fn derive(email: &str) -> Self {
        let digest = Md5::digest(email.to_lowercase().as_bytes());
        SubscriberHash(hex::encode(digest))
    }
}

impl AsRef<str> for SubscriberHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Status and JSON body of a Mailchimp member response.
#[derive(Debug)]
pub struct MemberResponse {
    pub status: StatusCode,
    pub body: Value,
}

#[derive(Debug)]
pub struct MailchimpClient {
    pub http_client: Client,
    base_url: Option<Url>,
}

impl MailchimpClient {
    /// `base_url` replaces `https://<dc>.api.mailchimp.com`, if given.
    /// No timeout is set on the underlying client.
    pub fn new(base_url: Option<&str>) -> Result<Self> {
        let base_url = base_url
            .map(|url| Url::parse(url).map_err(|e| Error::UrlParsing(e.to_string())))
            .transpose()?;

        let http_client = Client::builder().build()?;

        Ok(MailchimpClient {
            http_client,
            base_url,
        })
    }

    /// `{base}/3.0/lists/{list_id}/members/{subscriber_hash}`
    pub fn member_url(
        &self,
        secrets: &MailchimpSecrets,
        subscriber_hash: &SubscriberHash,
    ) -> Result<Url> {
        let base = match &self.base_url {
            Some(url) => url.as_str().trim_end_matches('/').to_string(),
            None => format!("https://{}.api.mailchimp.com", secrets.data_center()),
        };
        let url = format!(
            "{base}/3.0/lists/{}/members/{subscriber_hash}",
            secrets.list_id
        );

        Url::parse(&url).map_err(|e| Error::UrlParsing(e.to_string()))
    }

    /// Creates or updates the member. A non-2xx status is NOT an error here, the caller decides
    /// what to do with it. Fails if the request can't be sent or the body isn't JSON.
    pub async fn upsert_member(
        &self,
        secrets: &MailchimpSecrets,
        subscriber_hash: &SubscriberHash,
        payload: &ContactUpsertPayload<'_>,
    ) -> Result<MemberResponse> {
        let url = self.member_url(secrets, subscriber_hash)?;

        let resp = self
            .http_client
            .put(url)
            .header(AUTHORIZATION, auth_header(secrets))
            .json(payload)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.json::<Value>().await?;

        Ok(MemberResponse { status, body })
    }

    pub async fn tag_member(
        &self,
        secrets: &MailchimpSecrets,
        subscriber_hash: &SubscriberHash,
        tags: &TagsPayload<'_>,
    ) -> Result<()> {
        let mut url = self.member_url(secrets, subscriber_hash)?;
        url.path_segments_mut()
            .map_err(|_| Error::UrlParsing("member url cannot be a base".to_string()))?
            .push("tags");

        self.http_client
            .post(url)
            .header(AUTHORIZATION, auth_header(secrets))
            .json(tags)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

fn auth_header(secrets: &MailchimpSecrets) -> String {
    format!("apikey {}", secrets.api_key().expose_secret())
}

// ###################################
// ->   PAYLOADS
// ###################################
#[derive(Debug, Serialize)]
pub struct ContactUpsertPayload<'a> {
    pub email_address: &'a str,
    pub status_if_new: &'static str,
    pub merge_fields: MergeFields<'a>,
}

/// Absent values go out as empty strings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct MergeFields<'a> {
    pub fname: &'a str,
    pub lname: &'a str,
    pub phone: &'a str,
    pub mmerge5: &'a str,
    pub mmerge6: &'a str,
    pub mmerge7: &'a str,
}

#[derive(Debug, Serialize)]
pub struct TagsPayload<'a> {
    pub tags: Vec<Tag<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Tag<'a> {
    pub name: &'a str,
    pub status: TagStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagStatus {
    Active,
}

impl<'a> TagsPayload<'a> {
    pub fn active(name: &'a str) -> Self {
        TagsPayload {
            tags: vec![Tag {
                name,
                status: TagStatus::Active,
            }],
        }
    }
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("url parsing error: {0}")]
    UrlParsing(String),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
