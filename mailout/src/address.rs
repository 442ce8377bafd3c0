//! Module dedicated to email addresses.
//!
//! The core concept of this module is the [`Address`] structure,
//! which represents a validated email address, and the
//! [`Recipients`] structure, which collects raw recipient inputs
//! before validation.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use mail_builder::headers::address::EmailAddress;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Matches a bare email address: a local part free of at signs and
/// spaces, then the at sign, then a domain made of letters, digits,
/// dots and hyphens.
static ADDR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("^[^@ ]+@[A-Za-z0-9.-]+$").unwrap());

/// Matches the display name form `Display Name <user@domain>`.
static NAMED_ADDR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("^(.*)<(.+)>$").unwrap());

/// Check the syntactic validity of the given bare email address.
pub fn is_valid(addr: impl AsRef<str>) -> bool {
    ADDR_REGEX.is_match(addr.as_ref())
}

/// The email address.
///
/// An address is composed of an optional display name and an email
/// address.
#[derive(Clone, Debug, Default, Eq, Serialize, Deserialize)]
pub struct Address {
    pub name: Option<String>,
    pub addr: String,
}

impl Address {
    /// Builds a new address from an optional display name and an
    /// email address, without validating them.
    pub fn new(name: Option<impl ToString>, addr: impl ToString) -> Self {
        Self {
            name: name.map(|name| name.to_string()),
            addr: addr.to_string(),
        }
    }

    /// Parses and validates an address from the given string.
    ///
    /// Accepts either a bare address `user@domain` or the display
    /// name form `Display Name <user@domain>`.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self> {
        let raw = raw.as_ref().trim();

        let (name, addr) = match NAMED_ADDR_REGEX.captures(raw) {
            Some(caps) => {
                let name = caps[1].trim();
                let name = (!name.is_empty()).then(|| name.to_owned());
                (name, caps[2].trim().to_owned())
            }
            None => (None, raw.to_owned()),
        };

        if !ADDR_REGEX.is_match(&addr) {
            return Err(Error::ParseAddressError(raw.to_owned()));
        }

        Ok(Self { name, addr })
    }
}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr.hash(state);
    }
}

/// Two addresses are considered equal when their email addresses are
/// equal, whatever their display names.
impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.addr == other.addr
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} <{}>", self.addr),
            None => write!(f, "{}", self.addr),
        }
    }
}

impl From<&Address> for mail_builder::headers::address::Address<'static> {
    fn from(addr: &Address) -> Self {
        mail_builder::headers::address::Address::Address(EmailAddress {
            name: addr.name.clone().map(Into::into),
            email: addr.addr.clone().into(),
        })
    }
}

/// The ordered list of raw recipient candidates.
///
/// Candidates are collected as given and validated all at once by
/// [`Recipients::parse`]. A comma-joined string is split and cleaned
/// of empty entries, whereas explicit lists keep one candidate per
/// entry.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Recipients(Vec<String>);

impl Recipients {
    /// Validates all candidates and returns them as addresses.
    ///
    /// Fails on the first invalid candidate: either every candidate
    /// is valid or none of them is usable.
    pub fn parse(&self) -> Result<Vec<Address>> {
        self.0.iter().map(Address::parse).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<&str> for Recipients {
    fn from(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
        )
    }
}

impl From<String> for Recipients {
    fn from(raw: String) -> Self {
        raw.as_str().into()
    }
}

impl From<&String> for Recipients {
    fn from(raw: &String) -> Self {
        raw.as_str().into()
    }
}

impl<S: ToString> From<Vec<S>> for Recipients {
    fn from(raws: Vec<S>) -> Self {
        Self(raws.iter().map(|raw| raw.to_string().trim().to_owned()).collect())
    }
}

impl<S: ToString> From<&[S]> for Recipients {
    fn from(raws: &[S]) -> Self {
        Self(raws.iter().map(|raw| raw.to_string().trim().to_owned()).collect())
    }
}

impl<S: ToString, const N: usize> From<[S; N]> for Recipients {
    fn from(raws: [S; N]) -> Self {
        Self(raws.iter().map(|raw| raw.to_string().trim().to_owned()).collect())
    }
}
