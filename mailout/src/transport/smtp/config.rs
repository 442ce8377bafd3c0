//! Module dedicated to the SMTP transport configuration.

use std::{
    fmt,
    marker::PhantomData,
    ops::{Deref, DerefMut},
    result,
    time::Duration,
};

use mail_send::Credentials;
use secret::Secret;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// The SMTP transport configuration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SmtpConfig {
    /// The SMTP server host name.
    pub host: String,

    /// The SMTP server host port.
    pub port: u16,

    /// The SMTP encryption protocol to use.
    ///
    /// Supported encryption: SSL/TLS, STARTTLS or none. Absent means
    /// a cleartext session.
    #[serde(default, deserialize_with = "some_bool_or_kind")]
    pub encryption: Option<SmtpEncryptionKind>,

    /// The SMTP server login.
    ///
    /// Usually, the login is either the email address or its left
    /// part (before @).
    pub login: String,

    /// The SMTP server authentication configuration.
    pub auth: SmtpAuthConfig,

    /// Whether to accept invalid TLS certificates.
    pub insecure: Option<bool>,

    /// The SMTP session timeout, in seconds.
    ///
    /// Zero or absent keeps the underlying client default.
    pub timeout: Option<u64>,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: 25,
            encryption: None,
            login: String::new(),
            auth: SmtpAuthConfig::default(),
            insecure: None,
            timeout: None,
        }
    }
}

impl SmtpConfig {
    /// Return `true` if SSL/TLS or STARTTLS is enabled.
    pub fn is_encryption_enabled(&self) -> bool {
        matches!(
            self.encryption.as_ref(),
            Some(SmtpEncryptionKind::Tls) | Some(SmtpEncryptionKind::StartTls),
        )
    }

    /// Return `true` if STARTTLS is enabled.
    pub fn is_start_tls_encryption_enabled(&self) -> bool {
        matches!(self.encryption.as_ref(), Some(SmtpEncryptionKind::StartTls))
    }

    /// Return `true` if invalid TLS certificates are accepted.
    pub fn insecure(&self) -> bool {
        self.insecure.unwrap_or_default()
    }

    /// Returns the configured timeout, when set and non-zero.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Builds the SMTP credentials, when authentication is enabled.
    pub async fn credentials(&self) -> Result<Option<Credentials<String>>> {
        match &self.auth {
            SmtpAuthConfig::None => Ok(None),
            SmtpAuthConfig::Passwd(passwd) => {
                let passwd = passwd.get().await.map_err(Error::GetPasswdError)?;
                let passwd = passwd.lines().next().ok_or(Error::GetPasswdEmptyError)?;
                Ok(Some(Credentials::new(self.login.clone(), passwd.to_owned())))
            }
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SmtpEncryptionKind {
    #[serde(alias = "ssl")]
    Tls,
    #[serde(alias = "starttls")]
    StartTls,
    #[default]
    None,
}

impl fmt::Display for SmtpEncryptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tls => write!(f, "SSL/TLS"),
            Self::StartTls => write!(f, "StartTLS"),
            Self::None => write!(f, "None"),
        }
    }
}

impl From<bool> for SmtpEncryptionKind {
    fn from(value: bool) -> Self {
        if value {
            Self::Tls
        } else {
            Self::None
        }
    }
}

/// The SMTP authentication configuration.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SmtpAuthConfig {
    /// No authentication.
    #[default]
    None,

    /// The password authentication mechanism.
    #[serde(alias = "password")]
    Passwd(PasswordConfig),
}

/// The password configuration.
///
/// The password itself stays behind a [`Secret`], which resolves it
/// from a raw string, a shell command or a keyring entry.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordConfig(#[serde(skip_serializing_if = "Secret::is_empty")] pub Secret);

impl Deref for PasswordConfig {
    type Target = Secret;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PasswordConfig {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

fn some_bool_or_kind<'de, D>(
    deserializer: D,
) -> result::Result<Option<SmtpEncryptionKind>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SomeBoolOrKind(PhantomData<fn() -> Option<SmtpEncryptionKind>>);

    impl<'de> de::Visitor<'de> for SomeBoolOrKind {
        type Value = Option<SmtpEncryptionKind>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("some or none")
        }

        fn visit_some<D>(self, deserializer: D) -> result::Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct BoolOrKind(PhantomData<fn() -> SmtpEncryptionKind>);

            impl<'de> de::Visitor<'de> for BoolOrKind {
                type Value = SmtpEncryptionKind;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("boolean or string")
                }

                fn visit_bool<E>(self, v: bool) -> result::Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    Ok(v.into())
                }

                fn visit_str<E>(self, v: &str) -> result::Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    Deserialize::deserialize(de::value::StrDeserializer::new(v))
                }
            }

            deserializer
                .deserialize_any(BoolOrKind(PhantomData))
                .map(Option::Some)
        }
    }

    deserializer.deserialize_option(SomeBoolOrKind(PhantomData))
}
