use super::AggregateId;

/// Trait for aggregate roots exchanged with the backend.
///
/// Every record is owned by the backend; the client only reads it, builds
/// payloads for it and keeps it in screen-local lists.
pub trait AggregateRoot {
    /// Aggregate identifier type
    type Id: AggregateId;

    /// Record id; `None` for records a listing sent without their key
    fn id(&self) -> Option<Self::Id>;

    /// Aggregate index in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Backend collection name, also the REST path segment (e.g. "vehiculos")
    fn collection_name() -> &'static str;

    /// UI name of a single element (e.g. "Vehículo")
    fn element_name() -> &'static str;

    /// UI name of the list (e.g. "Vehículos")
    fn list_name() -> &'static str;

    /// Full aggregate name (e.g. "a001_vehiculos")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// REST path of the collection (e.g. "/vehiculos")
    fn collection_path() -> String {
        format!("/{}", Self::collection_name())
    }
}
