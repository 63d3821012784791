use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::recipe::IngredientUnit;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryItem {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: IngredientUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
}

impl PantryItem {
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|d| d < today)
    }

    /// True when the item expires today or within the next `days` days.
    pub fn expires_within(&self, today: NaiveDate, days: i64) -> bool {
        self.expiry_date
            .map(|d| crate::days_until(today, d))
            .is_some_and(|left| (0..=days).contains(&left))
    }
}

#[derive(Validate, Clone, Debug)]
pub struct PantryInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub quantity: f64,
    pub unit: IngredientUnit,
    pub expiry_date: Option<NaiveDate>,
}

impl PantryInput {
    pub fn into_item(self, id: impl Into<String>) -> crate::Result<PantryItem> {
        self.validate()?;

        if !self.quantity.is_finite() {
            let mut errors = validator::ValidationErrors::new();
            errors.add(
                "quantity",
                validator::ValidationError::new("finite")
                    .with_message("Quantity must be a finite number".into()),
            );
            return Err(errors.into());
        }

        Ok(PantryItem {
            id: id.into(),
            name: self.name.trim().to_owned(),
            quantity: self.quantity,
            unit: self.unit,
            expiry_date: self.expiry_date,
        })
    }
}
