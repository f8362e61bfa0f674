use async_trait::async_trait;
use jiff::tz::TimeZone;
use jiff::{Span, Timestamp, Zoned};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Time zone every issued token is reported in.
pub const TOKEN_TIME_ZONE: &str = "Europe/Moscow";

/// Prefix of the object storage key a token blob is archived under.
pub const OBS_KEY_PREFIX: &str = "gigachat-token/";

/// Suffix of the object storage key a token blob is archived under.
pub const OBS_KEY_SUFFIX: &str = ".json";

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid upstream token: {0}")]
    Invalid(String),
    #[error("Expiry {0} is outside the supported range")]
    ExpiryOutOfRange(i64),
    #[error("Time zone lookup failed: {0}")]
    TimeZone(String),
}

/// Token payload as returned by the upstream OAuth endpoint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RawAccessToken {
    #[validate(length(min = 1, message = "access_token must not be empty"))]
    pub access_token: String,
    #[serde(default)]
    #[validate(range(min = 1, message = "minutes_valid must be a positive integer"))]
    pub minutes_valid: Option<i32>,
    /// Expiry in milliseconds since the Unix epoch.
    pub expires_at: i64,
}

impl RawAccessToken {
    /// Validates the raw fields and computes the derived timestamps.
    ///
    /// `default_minutes_valid` is used when the upstream omitted the validity duration.
    pub fn derive(
        self,
        default_minutes_valid: i32,
        obs_key: String,
    ) -> Result<AccessToken, TokenError> {
        self.validate()
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        let minutes_valid = self.minutes_valid.unwrap_or(default_minutes_valid);
        if minutes_valid <= 0 {
            return Err(TokenError::Invalid(
                "minutes_valid must be a positive integer".to_string(),
            ));
        }

        let expires = expires_from_epoch_millis(self.expires_at)?;
        let released = minutes_before(&expires, minutes_valid)?;

        Ok(AccessToken {
            token: self.access_token,
            minutes_valid,
            released,
            expires,
            obs_key,
        })
    }
}

/// A temporary access token to the GigaChat API, ready to be archived and returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AccessToken {
    #[schema(example = "eyJjdHkiOiJqd3QiLCJlbmMiOiJBMjU2Q0JDLUhTNTEyIi...")]
    token: String,
    #[schema(example = 30, minimum = 1)]
    minutes_valid: i32,
    #[serde(serialize_with = "serialize_iso8601")]
    #[schema(value_type = String, format = DateTime, example = "2023-11-15T00:43:20+03:00")]
    released: Zoned,
    #[serde(serialize_with = "serialize_iso8601")]
    #[schema(value_type = String, format = DateTime, example = "2023-11-15T01:13:20+03:00")]
    expires: Zoned,
    #[schema(example = "gigachat-token/0b6a4f1e-2a57-4a5e-9d0b-3f3c1f8f6e2d.json")]
    obs_key: String,
}

impl AccessToken {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn minutes_valid(&self) -> i32 {
        self.minutes_valid
    }

    pub fn released(&self) -> &Zoned {
        &self.released
    }

    pub fn expires(&self) -> &Zoned {
        &self.expires
    }

    pub fn obs_key(&self) -> &str {
        &self.obs_key
    }

    /// UTF-8 JSON document archived in object storage.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Storage key for the token issued under the given correlation identifier.
pub fn obs_key_for(rq_uid: Uuid) -> String {
    format!("{OBS_KEY_PREFIX}{rq_uid}{OBS_KEY_SUFFIX}")
}

/// Truncates to whole seconds and localizes to [`TOKEN_TIME_ZONE`].
pub fn expires_from_epoch_millis(millis: i64) -> Result<Zoned, TokenError> {
    // Floor division, so a negative remainder never rounds towards zero.
    let seconds = millis.div_euclid(1000);
    let timestamp =
        Timestamp::from_second(seconds).map_err(|_| TokenError::ExpiryOutOfRange(millis))?;
    let tz = token_time_zone()?;
    Ok(timestamp.to_zoned(tz))
}

/// Wall-clock subtraction of `minutes`, keeping the time zone of `moment`.
pub fn minutes_before(moment: &Zoned, minutes: i32) -> Result<Zoned, TokenError> {
    let span = Span::new()
        .try_minutes(i64::from(minutes))
        .map_err(|e| TokenError::Invalid(e.to_string()))?;
    let local = moment
        .datetime()
        .checked_sub(span)
        .map_err(|e| TokenError::Invalid(e.to_string()))?;
    local
        .to_zoned(moment.time_zone().clone())
        .map_err(|e| TokenError::TimeZone(e.to_string()))
}

/// `YYYY-MM-DDTHH:MM:SS+HH:MM`, the representation stored in audit rows and returned to callers.
pub fn format_iso8601(moment: &Zoned) -> String {
    moment.strftime("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

fn serialize_iso8601<S>(moment: &Zoned, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_iso8601(moment))
}

fn token_time_zone() -> Result<TimeZone, TokenError> {
    TimeZone::get(TOKEN_TIME_ZONE).map_err(|e| TokenError::TimeZone(e.to_string()))
}

/// Issues tokens from the upstream OAuth endpoint.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Requests a fresh token, tagging the call with `rq_uid`.
    async fn request_token(&self, rq_uid: Uuid) -> Result<RawAccessToken, ProviderError>;
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Upstream rejected the token request with status {status}")]
    Rejected {
        status: u16,
        body: serde_json::Value,
    },
    #[error("Upstream responded with unexpected status {status}")]
    Unexpected { status: u16 },
    #[error("Upstream response could not be decoded: {0}")]
    Malformed(String),
    #[error("Upstream request failed: {0}")]
    Transport(#[source] anyhow::Error),
}
