use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::Validate;

#[derive(
    EnumString,
    Display,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum IngredientUnit {
    G,
    Kg,
    Ml,
    L,
    Cup,
    Tbsp,
    Tsp,
    #[default]
    Piece,
    Pack,
    Can,
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum DietaryRestriction {
    #[strum(serialize = "Gluten-Free")]
    #[serde(rename = "Gluten-Free")]
    GlutenFree,
    #[strum(serialize = "Dairy-Free")]
    #[serde(rename = "Dairy-Free")]
    DairyFree,
    Vegetarian,
    Vegan,
    #[strum(serialize = "Nut-Free")]
    #[serde(rename = "Nut-Free")]
    NutFree,
    #[strum(serialize = "Low-Carb")]
    #[serde(rename = "Low-Carb")]
    LowCarb,
}

/// A recipe line item. `quantity` is free text: "1.5" and "to taste" are both
/// valid, only the numeric prefix is ever summed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(deserialize_with = "text_or_number")]
    pub quantity: String,
    #[serde(default)]
    pub unit: IngredientUnit,
}

/// Older documents store plain numbers, newer ones free text.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Quantity {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Quantity::deserialize(deserializer)? {
        Quantity::Text(text) => text,
        Quantity::Number(number) => number.to_string(),
    })
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>, unit: IngredientUnit) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            unit,
        }
    }

    /// Parses a "Quantity Unit Name" line such as `2 cup Rice`.
    ///
    /// A missing or non-numeric quantity becomes "1" and the whole line is
    /// kept as the name. An unknown unit falls back to `piece` and stays part
    /// of the name.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let mut parts = line.split_whitespace();
        let first = parts.next()?;

        let quantity = match first.parse::<f64>() {
            Ok(value) if value.is_finite() && value != 0.0 => first.to_owned(),
            _ => return Some(Self::new(line, "1", IngredientUnit::Piece)),
        };

        let rest = parts.collect::<Vec<_>>();
        let (unit, name_parts) = match rest.split_first() {
            Some((candidate, tail)) if !tail.is_empty() => {
                match candidate.parse::<IngredientUnit>() {
                    Ok(unit) => (unit, tail.to_vec()),
                    Err(_) => (IngredientUnit::Piece, rest.clone()),
                }
            }
            _ => (IngredientUnit::Piece, rest.clone()),
        };

        let name = if name_parts.is_empty() {
            line.to_owned()
        } else {
            name_parts.join(" ")
        };

        Some(Self::new(name, quantity, unit))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub meal_types: Vec<MealType>,
    #[serde(default)]
    pub prep_time_minutes: u32,
    #[serde(default)]
    pub cook_time_minutes: u32,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

fn default_servings() -> u32 {
    1
}

impl Recipe {
    pub fn total_time_minutes(&self) -> u32 {
        self.prep_time_minutes
            .saturating_add(self.cook_time_minutes)
    }

    pub fn is_classified_as(&self, meal_type: MealType) -> bool {
        self.meal_types.contains(&meal_type)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.trim().eq_ignore_ascii_case(tag))
    }

    pub fn satisfies(&self, restrictions: &[DietaryRestriction]) -> bool {
        restrictions.iter().all(|r| self.has_tag(r.as_ref()))
    }
}

#[derive(Validate, Clone, Debug, Default)]
pub struct RecipeInput {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
    pub meal_types: Vec<MealType>,
    pub prep_time_minutes: u32,
    pub cook_time_minutes: u32,
    #[validate(range(min = 1))]
    pub servings: u32,
}

impl RecipeInput {
    pub fn into_recipe(self, id: impl Into<String>) -> crate::Result<Recipe> {
        self.validate()?;

        let mut meal_types = self.meal_types;
        meal_types.sort();
        meal_types.dedup();

        Ok(Recipe {
            id: id.into(),
            title: self.title.trim().to_owned(),
            description: self.description.filter(|d| !d.trim().is_empty()),
            ingredients: self.ingredients,
            instructions: self
                .instructions
                .into_iter()
                .filter(|line| !line.trim().is_empty())
                .collect(),
            tags: self
                .tags
                .into_iter()
                .map(|t| t.trim().to_owned())
                .filter(|t| !t.is_empty())
                .collect(),
            meal_types,
            prep_time_minutes: self.prep_time_minutes,
            cook_time_minutes: self.cook_time_minutes,
            servings: self.servings,
            image: None,
        })
    }
}
