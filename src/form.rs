use crate::models::{Category, EntryPatch, NewCarbonEntry};

pub const DEFAULT_CATEGORY: &str = "transport";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please fill all fields")]
    MissingFields,
    #[error("Carbon amount must be a number")]
    InvalidAmount,
}

/// Raw text fields of the add-entry form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryForm {
    pub activity: String,
    pub category: String,
    pub carbon_amount: String,
    pub location: String,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self {
            activity: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            carbon_amount: String::new(),
            location: String::new(),
        }
    }
}

impl EntryForm {
    pub fn reset(&mut self) {
        *self = EntryForm::default();
    }

    /// Checks the fields and builds the create payload, stamped with the
    /// current time. Whitespace-only fields count as empty.
    pub fn validate(&self) -> Result<NewCarbonEntry, FormError> {
        let activity = self.activity.trim();
        let amount = self.carbon_amount.trim();
        let location = self.location.trim();
        if activity.is_empty() || amount.is_empty() || location.is_empty() {
            return Err(FormError::MissingFields);
        }
        let carbon_amount = parse_amount(amount)?;
        let category = match self.category.trim() {
            "" => Category::parse(DEFAULT_CATEGORY),
            name => Category::parse(name),
        };
        Ok(NewCarbonEntry::new(activity, category, carbon_amount, location))
    }
}

/// Amounts must be finite and non-negative.
pub fn parse_amount(raw: &str) -> Result<f64, FormError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(FormError::InvalidAmount),
    }
}

/// Optional fields of the update flow. Only supplied fields are sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatchForm {
    pub activity: Option<String>,
    pub category: Option<String>,
    pub carbon_amount: Option<String>,
    pub location: Option<String>,
}

impl PatchForm {
    pub fn validate(&self) -> Result<EntryPatch, FormError> {
        let non_empty = |field: &Option<String>| -> Result<Option<String>, FormError> {
            match field.as_deref().map(str::trim) {
                None => Ok(None),
                Some("") => Err(FormError::MissingFields),
                Some(v) => Ok(Some(v.to_string())),
            }
        };
        let patch = EntryPatch {
            activity: non_empty(&self.activity)?,
            category: non_empty(&self.category)?.map(|c| Category::parse(&c)),
            carbon_amount: non_empty(&self.carbon_amount)?
                .map(|a| parse_amount(&a))
                .transpose()?,
            location: non_empty(&self.location)?,
            latitude: None,
            longitude: None,
        };
        if patch.is_empty() {
            return Err(FormError::MissingFields);
        }
        Ok(patch)
    }
}
