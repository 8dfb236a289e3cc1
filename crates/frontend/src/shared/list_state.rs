//! Screen-local copy of a backend collection.

use super::api::{ApiError, DeleteMessages, GlooTransport, RestClient, Transport};
use super::dialogs;
use super::list_utils::{filter_list, sort_list, Searchable, Sortable};
use super::reference::load_all;
use contracts::domain::common::{AggregateId, AggregateRoot};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;

/// Loaded records plus the display settings of one list screen
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<R> {
    pub items: Vec<R>,
    pub is_loaded: bool,
    pub filter: String,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl<R> ListState<R> {
    pub fn new(sort_field: &str) -> Self {
        Self {
            items: Vec::new(),
            is_loaded: false,
            filter: String::new(),
            sort_field: sort_field.to_string(),
            sort_ascending: true,
            error: None,
            notice: None,
        }
    }

    /// Record the outcome of a delete. Returns whether the list must be
    /// reloaded; a failure keeps `items` untouched and shows the message.
    pub fn finish_remove(&mut self, result: Result<(), String>, messages: &DeleteMessages) -> bool {
        match result {
            Ok(()) => {
                self.notice = Some(messages.deleted.to_string());
                self.error = None;
                true
            }
            Err(message) => {
                self.notice = None;
                self.error = Some(message);
                false
            }
        }
    }

    /// Flip direction on the current column, or switch to `field`
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_field = field.to_string();
            self.sort_ascending = true;
        }
    }
}

impl<R: AggregateRoot + Clone> ListState<R> {
    /// Replace the whole collection
    pub fn replace_all(&mut self, items: Vec<R>) {
        self.items = items;
        self.is_loaded = true;
    }

    /// Fold a successful create or update into the list without refetching.
    ///
    /// An edit replaces the entry with `edited` in place (dropping any
    /// duplicates of it) and is appended if it was not loaded; a create
    /// is appended.
    pub fn apply_mutation(&mut self, edited: Option<R::Id>, record: R) {
        let Some(id) = edited else {
            self.items.push(record);
            return;
        };
        let new_id = record.id();
        let mut slot = None;
        let mut kept = Vec::with_capacity(self.items.len());
        for item in self.items.drain(..) {
            let item_id = item.id();
            if item_id == Some(id) || (item_id.is_some() && item_id == new_id) {
                slot.get_or_insert(kept.len());
            } else {
                kept.push(item);
            }
        }
        match slot {
            Some(index) => kept.insert(index, record),
            None => kept.push(record),
        }
        self.items = kept;
    }

    pub fn find(&self, id: R::Id) -> Option<&R> {
        self.items.iter().find(|r| r.id() == Some(id))
    }
}

impl<R: Searchable + Sortable + Clone> ListState<R> {
    /// What the table shows: filtered, then sorted. Never mutates `items`.
    pub fn visible(&self) -> Vec<R> {
        let mut shown = filter_list(&self.items, &self.filter);
        sort_list(&mut shown, &self.sort_field, self.sort_ascending);
        shown
    }
}

/// Delete a record; `Ok` means the caller should reload the list.
pub async fn remove<R, T>(
    api: &RestClient<T>,
    id: R::Id,
    messages: &DeleteMessages,
) -> Result<(), String>
where
    R: AggregateRoot,
    T: Transport,
{
    api.delete(&R::collection_path(), &id.as_string())
        .await
        .map_err(|e: ApiError| {
            log::warn!("Error eliminando {} {}: {}", R::full_name(), id.as_string(), e);
            e.delete_message(messages)
        })
}

/// Reload `list` in the background; `arrange` orders the fresh items.
pub fn spawn_reload<R>(
    api: RestClient<GlooTransport>,
    list: RwSignal<ListState<R>>,
    arrange: fn(&mut Vec<R>),
) where
    R: AggregateRoot + DeserializeOwned + Clone + Send + Sync + 'static,
{
    spawn_local(async move {
        let mut items: Vec<R> = load_all(&api).await;
        arrange(&mut items);
        list.update(|l| l.replace_all(items));
    });
}

/// Ask, delete, then reload on success. Failures leave the list as is.
pub fn spawn_remove<R>(
    api: RestClient<GlooTransport>,
    list: RwSignal<ListState<R>>,
    id: R::Id,
    messages: &'static DeleteMessages,
    arrange: fn(&mut Vec<R>),
) where
    R: AggregateRoot + DeserializeOwned + Clone + Send + Sync + 'static,
{
    if !dialogs::confirm(messages.confirm) {
        return;
    }
    spawn_local(async move {
        let result = remove::<R, _>(&api, id, messages).await;
        let mut reload = false;
        list.update(|l| reload = l.finish_remove(result, messages));
        if reload {
            spawn_reload(api, list, arrange);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::FakeTransport;
    use contracts::domain::a002_supplier::aggregate::{Supplier, SupplierId};
    use serde_json::json;

    const MESSAGES: DeleteMessages = DeleteMessages {
        confirm: "¿Eliminar?",
        deleted: "Proveedor eliminado",
        dependency: "Tiene mantenciones asociadas",
        failed: "Error al eliminar",
    };

    fn supplier(id: i64, name: &str) -> Supplier {
        Supplier {
            id: SupplierId(id),
            name: name.into(),
            phone: "+56911111111".into(),
            email: "a@b.cl".into(),
            address: None,
        }
    }

    fn loaded() -> ListState<Supplier> {
        let mut state = ListState::new("nombre");
        state.replace_all(vec![supplier(1, "A"), supplier(2, "B"), supplier(3, "C")]);
        state
    }

    #[test]
    fn test_create_appends_exactly_one() {
        let mut state = loaded();
        state.apply_mutation(None, supplier(4, "D"));
        assert_eq!(state.items.len(), 4);
        assert_eq!(state.items[3], supplier(4, "D"));
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let mut state = loaded();
        state.apply_mutation(Some(SupplierId(2)), supplier(2, "B2"));
        let names: Vec<_> = state.items.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B2", "C"]);
    }

    #[test]
    fn test_edit_collapses_duplicates() {
        let mut state = loaded();
        state.items.push(supplier(2, "B-dup"));
        state.apply_mutation(Some(SupplierId(2)), supplier(2, "B2"));

        let matching: Vec<_> = state.items.iter().filter(|s| s.id == SupplierId(2)).collect();
        assert_eq!(matching, vec![&supplier(2, "B2")]);
        assert_eq!(state.items.len(), 3);
    }

    #[test]
    fn test_edit_of_unloaded_record_is_appended() {
        let mut state = loaded();
        state.apply_mutation(Some(SupplierId(9)), supplier(9, "Z"));
        assert_eq!(state.items.len(), 4);
        assert_eq!(state.find(SupplierId(9)).map(|s| s.name.as_str()), Some("Z"));
    }

    #[test]
    fn test_toggle_sort() {
        let mut state = loaded();
        state.toggle_sort("nombre");
        assert!(!state.sort_ascending);
        state.toggle_sort("email");
        assert_eq!(state.sort_field, "email");
        assert!(state.sort_ascending);
    }

    #[tokio::test]
    async fn test_remove_messages() {
        let fake = FakeTransport::new();
        fake.push_raw(204, Vec::new());
        fake.push_json(400, json!({"detail": "tiene mantenciones"}));
        fake.push_json(500, json!({}));
        let api = RestClient::new(fake.clone(), "http://api");

        assert_eq!(remove::<Supplier, _>(&api, SupplierId(1), &MESSAGES).await, Ok(()));
        assert_eq!(
            remove::<Supplier, _>(&api, SupplierId(1), &MESSAGES).await,
            Err("Tiene mantenciones asociadas".to_string())
        );
        assert_eq!(
            remove::<Supplier, _>(&api, SupplierId(1), &MESSAGES).await,
            Err("Error al eliminar".to_string())
        );
        assert_eq!(fake.requests()[0].url, "http://api/proveedores/1");
    }

    #[tokio::test]
    async fn test_dependency_failure_keeps_the_list() {
        let fake = FakeTransport::new();
        fake.push_json(400, json!({"code": "DEPENDENCY_ERROR"}));
        let api = RestClient::new(fake, "http://api");
        let mut state = loaded();
        let before = state.items.clone();

        let result = remove::<Supplier, _>(&api, SupplierId(2), &MESSAGES).await;
        let reload = state.finish_remove(result, &MESSAGES);

        assert!(!reload);
        assert_eq!(state.items, before);
        assert_eq!(state.error.as_deref(), Some("Tiene mantenciones asociadas"));
        assert_eq!(state.notice, None);
    }

    #[tokio::test]
    async fn test_successful_delete_requests_reload() {
        let fake = FakeTransport::new();
        fake.push_raw(204, Vec::new());
        let api = RestClient::new(fake, "http://api");
        let mut state = loaded();
        state.error = Some("anterior".into());

        let result = remove::<Supplier, _>(&api, SupplierId(2), &MESSAGES).await;
        assert!(state.finish_remove(result, &MESSAGES));
        assert_eq!(state.notice.as_deref(), Some("Proveedor eliminado"));
        assert_eq!(state.error, None);
    }
}
