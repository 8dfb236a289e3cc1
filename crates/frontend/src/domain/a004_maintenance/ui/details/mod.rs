pub mod model;
pub mod view;
pub mod view_model;

pub use view::MaintenanceDetails;
pub use view_model::MaintenanceDetailsVm;
