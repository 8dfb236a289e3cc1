pub mod a001_vehicle;
pub mod a002_supplier;
pub mod a004_maintenance;
pub mod a005_scheduled_maintenance;
