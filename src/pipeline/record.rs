//! Raw customer records and typed customer inputs
//!
//! A `RawRecord` is the untyped attribute map every input surface produces
//! (form fields, wizard stages, uploaded CSV rows). The typed inputs in this
//! module convert into it so the aligner only ever sees one shape.

use std::fmt;

pub const INCOME: &str = "Income";
pub const MNT_WINES: &str = "MntWines";
pub const MNT_FRUITS: &str = "MntFruits";
pub const MNT_MEAT: &str = "MntMeatProducts";
pub const MNT_FISH: &str = "MntFishProducts";
pub const MNT_SWEETS: &str = "MntSweetProducts";
pub const MNT_GOLD: &str = "MntGoldProds";
pub const EDUCATION: &str = "Education";
pub const MARITAL_STATUS: &str = "Marital_Status";
pub const CUSTOMER_TENURE: &str = "Customer_Tenure";

/// A single attribute value as collected from the user
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Number(f64),
    Category(String),
    Missing,
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(v) => write!(f, "{}", v),
            RawValue::Category(s) => write!(f, "{}", s),
            RawValue::Missing => write!(f, ""),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Category(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Category(value)
    }
}

/// Attribute name to raw value mapping for one customer.
///
/// Field order is insertion order; inserting an existing name replaces its value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: Vec<(String, RawValue)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Numeric value of a field, if present and numeric
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.get(name) {
            Some(RawValue::Number(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = RawRecord::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

/// Anything that can be turned into a raw record and knows its customer's income
pub trait CustomerRecord {
    fn to_record(&self) -> RawRecord;
    fn income(&self) -> f64;
}

/// Amounts spent per product category
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spending {
    pub wines: f64,
    pub fruits: f64,
    pub meat: f64,
    pub fish: f64,
    pub sweets: f64,
    pub gold: f64,
}

impl Spending {
    fn write_into(&self, record: &mut RawRecord) {
        record.insert(MNT_WINES, self.wines);
        record.insert(MNT_FRUITS, self.fruits);
        record.insert(MNT_MEAT, self.meat);
        record.insert(MNT_FISH, self.fish);
        record.insert(MNT_SWEETS, self.sweets);
        record.insert(MNT_GOLD, self.gold);
    }
}

/// Single-record form input: income plus the six spending fields
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CustomerInput {
    pub income: f64,
    pub spending: Spending,
}

impl CustomerRecord for CustomerInput {
    fn to_record(&self) -> RawRecord {
        let mut record = RawRecord::new();
        record.insert(INCOME, self.income);
        self.spending.write_into(&mut record);
        record
    }

    fn income(&self) -> f64 {
        self.income
    }
}

/// Highest completed education level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Education {
    #[default]
    Graduation,
    PhD,
    HighSchool,
    Masters,
    Doctorate,
}

impl Education {
    pub const ALL: [Education; 5] = [
        Education::Graduation,
        Education::PhD,
        Education::HighSchool,
        Education::Masters,
        Education::Doctorate,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Education::Graduation => "Graduation",
            Education::PhD => "PhD",
            Education::HighSchool => "High School",
            Education::Masters => "Masters",
            Education::Doctorate => "Doctorate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaritalStatus {
    #[default]
    Single,
    Married,
    Divorced,
    Widowed,
}

impl MaritalStatus {
    pub const ALL: [MaritalStatus; 4] = [
        MaritalStatus::Single,
        MaritalStatus::Married,
        MaritalStatus::Divorced,
        MaritalStatus::Widowed,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::Single => "Single",
            MaritalStatus::Married => "Married",
            MaritalStatus::Divorced => "Divorced",
            MaritalStatus::Widowed => "Widowed",
        }
    }
}

/// Complete customer profile gathered by the wizard
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerProfile {
    pub income: f64,
    pub education: Education,
    pub marital_status: MaritalStatus,
    /// Days since the customer enrolled
    pub customer_tenure: u32,
    pub spending: Spending,
}

impl CustomerRecord for CustomerProfile {
    fn to_record(&self) -> RawRecord {
        let mut record = RawRecord::new();
        record.insert(INCOME, self.income);
        record.insert(EDUCATION, self.education.as_str());
        record.insert(MARITAL_STATUS, self.marital_status.as_str());
        record.insert(CUSTOMER_TENURE, self.customer_tenure as f64);
        self.spending.write_into(&mut record);
        record
    }

    fn income(&self) -> f64 {
        self.income
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_existing_field() {
        let mut record = RawRecord::new().with(INCOME, 1.0).with(EDUCATION, "PhD");
        record.insert(INCOME, 2.0);

        assert_eq!(record.len(), 2);
        assert_eq!(record.number(INCOME), Some(2.0));
        assert_eq!(record.iter().next().map(|(n, _)| n), Some(INCOME));
    }

    #[test]
    fn test_profile_record_carries_categorical_fields() {
        let profile = CustomerProfile {
            income: 40000.0,
            education: Education::HighSchool,
            marital_status: MaritalStatus::Widowed,
            customer_tenure: 12,
            spending: Spending::default(),
        };
        let record = profile.to_record();

        assert_eq!(
            record.get(EDUCATION),
            Some(&RawValue::Category("High School".to_string()))
        );
        assert_eq!(record.number(CUSTOMER_TENURE), Some(12.0));
        assert_eq!(record.len(), 10);
    }

    #[test]
    fn test_customer_input_has_seven_numeric_fields() {
        let input = CustomerInput {
            income: 1.0,
            spending: Spending {
                gold: 3.0,
                ..Default::default()
            },
        };
        let record = input.to_record();

        assert_eq!(record.len(), 7);
        assert!(record.iter().all(|(_, v)| matches!(v, RawValue::Number(_))));
        assert_eq!(record.number(MNT_GOLD), Some(3.0));
    }
}
