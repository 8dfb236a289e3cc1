use crate::shared::list_state::ListState;
use crate::shared::list_utils::{contains_folded, locale_cmp, Searchable, Sortable};
use contracts::domain::a002_supplier::aggregate::{fields, Supplier};
use leptos::prelude::*;
use std::cmp::Ordering;

/// Sort key of the address column
pub const ADDRESS_COLUMN: &str = "direccion";

impl Searchable for Supplier {
    fn matches_filter(&self, folded_query: &str) -> bool {
        contains_folded(&self.name, folded_query)
            || contains_folded(&self.email, folded_query)
            || self.phone.contains(folded_query)
    }
}

impl Sortable for Supplier {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            fields::NAME => locale_cmp(&self.name, &other.name),
            fields::PHONE => self.phone.cmp(&other.phone),
            fields::EMAIL => locale_cmp(&self.email, &other.email),
            ADDRESS_COLUMN => locale_cmp(
                &self.address_label().unwrap_or_default(),
                &other.address_label().unwrap_or_default(),
            ),
            _ => Ordering::Equal,
        }
    }
}

pub fn sort_by_name(items: &mut Vec<Supplier>) {
    items.sort_by(|a, b| locale_cmp(&a.name, &b.name));
}

pub fn create_state() -> RwSignal<ListState<Supplier>> {
    RwSignal::new(ListState::new(fields::NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_supplier::aggregate::SupplierId;

    fn supplier(id: i64, name: &str, phone: &str) -> Supplier {
        Supplier {
            id: SupplierId(id),
            name: name.into(),
            phone: phone.into(),
            email: format!("{}@proveedor.cl", id),
            address: None,
        }
    }

    #[test]
    fn test_search_matches_name_ignoring_accents_and_phone_digits() {
        let mut state = ListState::new(fields::NAME);
        state.replace_all(vec![
            supplier(1, "Lubricentro Ñuñoa", "+56911111111"),
            supplier(2, "Electromecánica Sur", "+56922222222"),
        ]);

        state.filter = "electromecanica".into();
        assert_eq!(state.visible()[0].id, SupplierId(2));

        state.filter = "9222".into();
        assert_eq!(state.visible().len(), 1);

        state.filter = "ñuñoa".into();
        assert_eq!(state.visible()[0].id, SupplierId(1));
    }

    #[test]
    fn test_name_order_is_case_insensitive() {
        let mut items = vec![supplier(1, "taller b", ""), supplier(2, "Taller A", "")];
        sort_by_name(&mut items);
        assert_eq!(items[0].id, SupplierId(2));
    }
}
