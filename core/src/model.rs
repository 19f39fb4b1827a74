use crate::error::{ErrorCode, SocnetError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

pub const MINIMUM_AGE: u32 = 16;

/// Characters that would break the line-oriented snapshot format.
pub const RESERVED_CHARS: [char; 3] = [':', '\n', '\r'];

/// Anything the graph engine can store. Identity is the name.
pub trait Vertex {
    fn name(&self) -> &str;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("age {} is below the minimum of {}", .age, MINIMUM_AGE)]
    Underage { age: u32 },
    #[error("invalid name {name:?}: must be non-empty and free of ':' and line breaks")]
    InvalidName { name: String },
}

impl SocnetError for AccountError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::InvalidArgument
    }
}

fn validate_name(name: &str) -> Result<(), AccountError> {
    if name.is_empty() || name.contains(&RESERVED_CHARS[..]) {
        return Err(AccountError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct User {
    lastname: String,
    firstname: String,
    age: u32,
    name: String,
}

impl User {
    pub fn new(
        lastname: impl Into<String>,
        firstname: impl Into<String>,
        age: u32,
    ) -> Result<Self, AccountError> {
        let lastname = lastname.into();
        let firstname = firstname.into();
        validate_name(&lastname)?;
        validate_name(&firstname)?;
        if age < MINIMUM_AGE {
            return Err(AccountError::Underage { age });
        }
        let name = format!("{} {}", lastname, firstname);
        Ok(Self {
            lastname,
            firstname,
            age,
            name,
        })
    }

    pub fn lastname(&self) -> &str {
        &self.lastname
    }

    pub fn firstname(&self) -> &str {
        &self.firstname
    }

    pub fn age(&self) -> u32 {
        self.age
    }
}

impl Vertex for User {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.firstname, self.lastname, self.age)
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    name: String,
}

impl Page {
    pub fn new(name: impl Into<String>) -> Result<Self, AccountError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self { name })
    }
}

impl Vertex for Page {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    User,
    Page,
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::User => f.write_str("user"),
            AccountKind::Page => f.write_str("page"),
        }
    }
}

/// A vertex of the social graph, tagged with its kind.
#[derive(Debug, Clone)]
pub enum Account {
    User(User),
    Page(Page),
}

impl Account {
    pub fn kind(&self) -> AccountKind {
        match self {
            Account::User(_) => AccountKind::User,
            Account::Page(_) => AccountKind::Page,
        }
    }

    pub fn as_user(&self) -> Option<&User> {
        match self {
            Account::User(u) => Some(u),
            Account::Page(_) => None,
        }
    }

    pub fn as_page(&self) -> Option<&Page> {
        match self {
            Account::Page(p) => Some(p),
            Account::User(_) => None,
        }
    }
}

impl Vertex for Account {
    fn name(&self) -> &str {
        match self {
            Account::User(u) => u.name(),
            Account::Page(p) => p.name(),
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Account::User(u) => u.fmt(f),
            Account::Page(p) => p.fmt(f),
        }
    }
}

impl From<User> for Account {
    fn from(value: User) -> Self {
        Account::User(value)
    }
}

impl From<Page> for Account {
    fn from(value: Page) -> Self {
        Account::Page(value)
    }
}

macro_rules! identity_by_name {
    ($($ty:ty),*) => {$(
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.name() == other.name()
            }
        }

        impl Eq for $ty {}

        impl Hash for $ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.name().hash(state);
            }
        }

        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $ty {
            fn cmp(&self, other: &Self) -> Ordering {
                self.name().cmp(other.name())
            }
        }
    )*};
}

identity_by_name!(User, Page, Account);

/// A directed edge between two vertex names. Ordered by (from, to).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Arc {
    pub from: String,
    pub to: String,
}

impl Arc {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for Arc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
