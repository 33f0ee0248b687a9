//! Sort keys for invoice listings
//!
//! Sort expressions use the `field:asc` / `field:desc` syntax; a bare field
//! sorts ascending.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field an invoice listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    InvoiceNumber,
    ClientName,
    Date,
    DueDate,
    Total,
    Status,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::InvoiceNumber => "invoiceNumber",
            SortKey::ClientName => "clientName",
            SortKey::Date => "date",
            SortKey::DueDate => "dueDate",
            SortKey::Total => "total",
            SortKey::Status => "status",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invoiceNumber" | "invoice_number" => Ok(SortKey::InvoiceNumber),
            "clientName" | "client_name" | "client" => Ok(SortKey::ClientName),
            "date" => Ok(SortKey::Date),
            "dueDate" | "due_date" => Ok(SortKey::DueDate),
            "total" => Ok(SortKey::Total),
            "status" => Ok(SortKey::Status),
            other => Err(format!("unknown sort field '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// A single-key sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Desc,
        }
    }

    /// Parse `field`, `field:asc` or `field:desc`
    pub fn parse(expr: &str) -> Result<Self, String> {
        let (field, direction) = match expr.split_once(':') {
            Some((field, "asc")) => (field, SortDirection::Asc),
            Some((field, "desc")) => (field, SortDirection::Desc),
            Some((_, other)) => return Err(format!("unknown sort direction '{}'", other)),
            None => (expr, SortDirection::Asc),
        };

        Ok(Self {
            key: field.trim().parse()?,
            direction,
        })
    }

    /// Same key, opposite direction
    pub fn reversed(self) -> Self {
        Self {
            key: self.key,
            direction: match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            },
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::desc(SortKey::Date)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}:{}", self.key.as_str(), direction)
    }
}

impl TryFrom<String> for SortSpec {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SortSpec> for String {
    fn from(spec: SortSpec) -> Self {
        spec.to_string()
    }
}
