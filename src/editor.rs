//! # Order Editor
//!
//! The session-owned list of line-item drafts behind the order form.
//!
//! State transitions happen only through explicit methods ([`OrderEditor::add_draft`],
//! [`OrderEditor::remove_last_draft`], [`OrderEditor::set_field`],
//! [`OrderEditor::clear`]), and the rendering layer reads an owned
//! [`EditorSnapshot`] instead of reaching into the list.

use crate::model::LineItem;

/// One editable field of a draft.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftField {
    ProductId(String),
    /// Values below 1 are raised to 1.
    Quantity(u32),
    /// Negative or non-finite values become 0.0.
    UnitPrice(f64),
}

/// Ordered, mutable list of line-item drafts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderEditor {
    drafts: Vec<LineItem>,
}

impl OrderEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a blank draft (`""`, quantity 1, price 0.0).
    pub fn add_draft(&mut self) {
        self.drafts.push(LineItem::default());
    }

    /// Drops the last draft. Does nothing on an empty editor.
    pub fn remove_last_draft(&mut self) {
        self.drafts.pop();
    }

    /// Overwrites one field of the draft at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`. Drafts are addressed by the render loop over the
    /// current list, so an out-of-range index is a caller bug.
    pub fn set_field(&mut self, index: usize, field: DraftField) {
        let len = self.drafts.len();
        let draft = self
            .drafts
            .get_mut(index)
            .unwrap_or_else(|| panic!("draft index {index} out of range (len {len})"));

        match field {
            DraftField::ProductId(product_id) => draft.product_id = product_id,
            DraftField::Quantity(quantity) => draft.quantity = quantity.max(1),
            DraftField::UnitPrice(price) => {
                draft.unit_price = if price.is_finite() { price.max(0.0) } else { 0.0 };
            }
        }
    }

    /// Line total of the draft at `index`, recomputed from its current fields.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn total(&self, index: usize) -> f64 {
        self.drafts[index].total()
    }

    pub fn clear(&mut self) {
        self.drafts.clear();
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn drafts(&self) -> &[LineItem] {
        &self.drafts
    }

    /// Owned view of the current drafts for rendering.
    pub fn snapshot(&self) -> EditorSnapshot {
        let rows: Vec<DraftRow> = self
            .drafts
            .iter()
            .enumerate()
            .map(|(index, draft)| DraftRow {
                index,
                product_id: draft.product_id.clone(),
                quantity: draft.quantity,
                unit_price: draft.unit_price,
                total: draft.total(),
            })
            .collect();
        let grand_total = rows.iter().map(|row| row.total).sum();
        EditorSnapshot { rows, grand_total }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftRow {
    pub index: usize,
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorSnapshot {
    pub rows: Vec<DraftRow>,
    pub grand_total: f64,
}

impl std::fmt::Display for EditorSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "(no products, use `add` to start one)");
        }
        writeln!(
            f,
            "{:>3}  {:<20}  {:>8}  {:>10}  {:>12}",
            "#", "Product Name", "Quantity", "Price", "Total Amount"
        )?;
        for row in &self.rows {
            let name = if row.product_id.is_empty() {
                "<Enter Product>"
            } else {
                row.product_id.as_str()
            };
            writeln!(
                f,
                "{:>3}  {:<20}  {:>8}  {:>10.2}  {:>12.2}",
                row.index + 1,
                name,
                row.quantity,
                row.unit_price,
                row.total
            )?;
        }
        writeln!(f, "{:>61.2}", self.grand_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_appends_default_draft() {
        let mut editor = OrderEditor::new();
        editor.add_draft();
        editor.add_draft();

        assert_eq!(editor.len(), 2);
        assert_eq!(editor.drafts()[1], LineItem::new("", 1, 0.0));
    }

    #[test]
    fn test_remove_last_on_empty_is_noop() {
        let mut editor = OrderEditor::new();
        editor.remove_last_draft();
        assert!(editor.is_empty());
    }

    #[test]
    fn test_remove_last_keeps_earlier_drafts() {
        let mut editor = OrderEditor::new();
        editor.add_draft();
        editor.set_field(0, DraftField::ProductId("P1".into()));
        editor.add_draft();
        editor.remove_last_draft();

        assert_eq!(editor.len(), 1);
        assert_eq!(editor.drafts()[0].product_id, "P1");
    }

    #[test]
    fn test_set_field_clamps_to_widget_minimums() {
        let mut editor = OrderEditor::new();
        editor.add_draft();
        editor.set_field(0, DraftField::Quantity(0));
        editor.set_field(0, DraftField::UnitPrice(-4.0));
        assert_eq!(editor.drafts()[0].quantity, 1);
        assert_eq!(editor.drafts()[0].unit_price, 0.0);

        editor.set_field(0, DraftField::UnitPrice(f64::NAN));
        assert_eq!(editor.drafts()[0].unit_price, 0.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_set_field_out_of_range_panics() {
        let mut editor = OrderEditor::new();
        editor.add_draft();
        editor.set_field(1, DraftField::Quantity(2));
    }

    #[test]
    fn test_snapshot_reports_totals() {
        let mut editor = OrderEditor::new();
        editor.add_draft();
        editor.set_field(0, DraftField::ProductId("P1".into()));
        editor.set_field(0, DraftField::Quantity(2));
        editor.set_field(0, DraftField::UnitPrice(3.5));
        editor.add_draft();
        editor.set_field(1, DraftField::UnitPrice(1.25));

        let snapshot = editor.snapshot();
        assert_eq!(snapshot.rows.len(), 2);
        assert_eq!(snapshot.rows[0].total, 7.0);
        assert_eq!(snapshot.rows[1].total, 1.25);
        assert_eq!(snapshot.grand_total, 8.25);
        assert!(snapshot.to_string().contains("P1"));
    }

    #[test]
    fn test_clear_empties_editor() {
        let mut editor = OrderEditor::new();
        editor.add_draft();
        editor.add_draft();
        editor.clear();
        assert!(editor.is_empty());
        assert!(editor.snapshot().rows.is_empty());
    }

    proptest! {
        #[test]
        fn prop_add_then_remove_n_is_empty(n in 0usize..64) {
            let mut editor = OrderEditor::new();
            for _ in 0..n {
                editor.add_draft();
            }
            prop_assert_eq!(editor.len(), n);
            for _ in 0..n {
                editor.remove_last_draft();
            }
            prop_assert!(editor.is_empty());
        }

        #[test]
        fn prop_total_tracks_latest_fields(
            edits in proptest::collection::vec((0u32..1000, 0.0f64..10_000.0), 1..20)
        ) {
            let mut editor = OrderEditor::new();
            editor.add_draft();
            for (quantity, price) in edits {
                editor.set_field(0, DraftField::Quantity(quantity));
                editor.set_field(0, DraftField::UnitPrice(price));
                let draft = &editor.drafts()[0];
                prop_assert_eq!(editor.total(0), f64::from(draft.quantity) * draft.unit_price);
            }
        }
    }
}
