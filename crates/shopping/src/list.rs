use std::fmt::Write;

use crate::aggregation::ShoppingListItem;

/// A shopping list as displayed. Checked state lives here only and is never
/// written back to the application state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShoppingList {
    items: Vec<ShoppingListItem>,
}

impl From<Vec<ShoppingListItem>> for ShoppingList {
    fn from(items: Vec<ShoppingListItem>) -> Self {
        Self { items }
    }
}

impl ShoppingList {
    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn check(&mut self, name: &str) -> mealplanner_shared::Result<()> {
        self.item_mut(name)?.checked = true;
        Ok(())
    }

    pub fn uncheck(&mut self, name: &str) -> mealplanner_shared::Result<()> {
        self.item_mut(name)?.checked = false;
        Ok(())
    }

    /// Flips the item and returns its new state.
    pub fn toggle(&mut self, name: &str) -> mealplanner_shared::Result<bool> {
        let item = self.item_mut(name)?;
        item.checked = !item.checked;
        Ok(item.checked)
    }

    pub fn reset(&mut self) {
        for item in self.items.iter_mut() {
            item.checked = false;
        }
    }

    pub fn remaining(&self) -> impl Iterator<Item = &ShoppingListItem> {
        self.items.iter().filter(|item| !item.checked)
    }

    pub fn render_printable(&self) -> String {
        let mut out = String::from("Shopping List\n");

        if self.items.is_empty() {
            out.push_str("Nothing to buy.\n");
            return out;
        }

        for item in &self.items {
            let mark = if item.checked { "x" } else { " " };
            let _ = writeln!(
                out,
                "[{mark}] {} - {} {}",
                item.name, item.quantity, item.unit
            );
        }

        let _ = writeln!(
            out,
            "{} of {} items left",
            self.remaining().count(),
            self.items.len()
        );

        out
    }

    fn item_mut(&mut self, name: &str) -> mealplanner_shared::Result<&mut ShoppingListItem> {
        match self
            .items
            .iter_mut()
            .find(|item| item.name.eq_ignore_ascii_case(name.trim()))
        {
            Some(item) => Ok(item),
            None => mealplanner_shared::not_found!("shopping list item {name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use mealplanner_shared::recipe::IngredientUnit;

    use super::*;

    fn item(name: &str, quantity: &str, unit: IngredientUnit) -> ShoppingListItem {
        ShoppingListItem {
            name: name.to_owned(),
            quantity: quantity.to_owned(),
            unit,
            checked: false,
        }
    }

    fn list() -> ShoppingList {
        ShoppingList::from(vec![
            item("Milk", "1", IngredientUnit::L),
            item("Rice", "1", IngredientUnit::Cup),
        ])
    }

    #[test]
    fn test_toggle_and_reset() {
        let mut list = list();

        assert!(list.toggle("rice").unwrap());
        assert_eq!(list.remaining().count(), 1);
        assert!(!list.toggle("Rice").unwrap());

        list.check("milk").unwrap();
        list.check("rice").unwrap();
        assert_eq!(list.remaining().count(), 0);

        list.uncheck("milk").unwrap();
        assert_eq!(list.remaining().count(), 1);

        list.reset();
        assert_eq!(list.remaining().count(), 2);
    }

    #[test]
    fn test_unknown_item() {
        let mut list = list();
        let err = list.check("bread").unwrap_err();
        assert!(matches!(err, mealplanner_shared::Error::NotFound(_)));
    }

    #[test]
    fn test_render_printable() {
        let mut list = list();
        list.check("Milk").unwrap();

        let text = list.render_printable();
        assert_eq!(
            text,
            "Shopping List\n[x] Milk - 1 l\n[ ] Rice - 1 cup\n1 of 2 items left\n"
        );

        assert_eq!(
            ShoppingList::default().render_printable(),
            "Shopping List\nNothing to buy.\n"
        );
    }
}
