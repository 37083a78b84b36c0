//! The person domain entity.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::ModelError;

/// A person as seen by application code.
///
/// The `id` is absent until the person is first saved; the repository assigns it
/// through [`Person::initialize`], which is the only way identity ever changes.
/// Only the credit limit is mutable after construction.
///
/// # Invariants
///
/// - `name` is never blank
/// - `credit_limit`, when present, is never negative
/// - once set, `id` never changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    id: Option<String>,
    name: String,
    birth_date: Option<NaiveDate>,
    credit_limit: Option<Decimal>,
    customer: bool,
}

impl Person {
    /// Create a person that has not been persisted yet.
    ///
    /// A `customer` flag of `None` is treated as `false`.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use person_store_shared::Person;
    /// use rust_decimal::Decimal;
    ///
    /// let person = Person::new(
    ///     "John",
    ///     NaiveDate::from_ymd_opt(1980, 12, 20),
    ///     Some(Decimal::from(1000)),
    ///     None,
    /// )
    /// .unwrap();
    ///
    /// assert!(person.id().is_none());
    /// assert!(!person.is_customer());
    /// ```
    pub fn new(
        name: impl Into<String>,
        birth_date: Option<NaiveDate>,
        credit_limit: Option<Decimal>,
        customer: Option<bool>,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        Self::validate_name(&name)?;
        if let Some(limit) = credit_limit {
            Self::validate_credit_limit(limit)?;
        }

        Ok(Self {
            id: None,
            name,
            birth_date,
            credit_limit,
            customer: customer.unwrap_or(false),
        })
    }

    /// Create a person with a known id, e.g. when rebuilding it from a stored document.
    pub fn with_id(
        id: impl Into<String>,
        name: impl Into<String>,
        birth_date: Option<NaiveDate>,
        credit_limit: Option<Decimal>,
        customer: Option<bool>,
    ) -> Result<Self, ModelError> {
        let mut person = Self::new(name, birth_date, credit_limit, customer)?;
        person.initialize(id)?;
        Ok(person)
    }

    /// Assign the identity of a persisted person.
    ///
    /// Initializing with the id the person already has is a no-op.
    ///
    /// # Errors
    ///
    /// * `ModelError::ValidationError` - If `id` is blank, or the person already has a
    ///   different id
    pub fn initialize(&mut self, id: impl Into<String>) -> Result<(), ModelError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ModelError::validation("Cannot initialize with empty id"));
        }

        match &self.id {
            Some(current) if *current != id => Err(ModelError::validation(format!(
                "Person is already initialized with id '{}', cannot change it to '{}'",
                current, id
            ))),
            Some(_) => Ok(()),
            None => {
                self.id = Some(id);
                Ok(())
            }
        }
    }

    /// Replace the credit limit.
    ///
    /// # Errors
    ///
    /// * `ModelError::ValidationError` - If `credit_limit` is negative
    pub fn update_credit_limit(&mut self, credit_limit: Decimal) -> Result<(), ModelError> {
        Self::validate_credit_limit(credit_limit)?;
        self.credit_limit = Some(credit_limit);
        Ok(())
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn credit_limit(&self) -> Option<Decimal> {
        self.credit_limit
    }

    pub fn is_customer(&self) -> bool {
        self.customer
    }

    /// Whether the person has been assigned an id by a save.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    fn validate_name(name: &str) -> Result<(), ModelError> {
        if name.trim().is_empty() {
            return Err(ModelError::validation("Person name is required"));
        }
        Ok(())
    }

    fn validate_credit_limit(credit_limit: Decimal) -> Result<(), ModelError> {
        if credit_limit < Decimal::ZERO {
            return Err(ModelError::validation(format!(
                "Credit limit cannot be negative: {}",
                credit_limit
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.id.as_deref().unwrap_or("-"), self.name)?;
        match self.birth_date {
            Some(date) => write!(f, " | {}", date)?,
            None => write!(f, " | -")?,
        }
        match self.credit_limit {
            Some(limit) => write!(f, " | {}", limit)?,
            None => write!(f, " | -")?,
        }
        write!(f, " | customer={}", self.customer)
    }
}
