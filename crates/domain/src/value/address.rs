use serde::{Deserialize, Serialize};

use super::check_not_blank;
use crate::error::Result;

/// Postal address of a building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    street: String,
    city: String,
    postal_code: Option<String>,
    country: Option<String>,
}

impl Address {
    pub fn new(street: impl Into<String>, city: impl Into<String>) -> Result<Self> {
        Ok(Self {
            street: check_not_blank("street", street)?,
            city: check_not_blank("city", city)?,
            postal_code: None,
            country: None,
        })
    }

    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.street, self.city)?;
        if let Some(code) = &self.postal_code {
            write!(f, " {code}")?;
        }
        if let Some(country) = &self.country {
            write!(f, ", {country}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_address() {
        let address = Address::new("1 Main St", "Springfield")
            .unwrap()
            .with_postal_code("12345");
        assert_eq!(address.to_string(), "1 Main St, Springfield 12345");
    }

    #[test]
    fn test_blank_street_rejected() {
        assert!(Address::new("  ", "Springfield").is_err());
    }
}
