pub mod notice;
pub mod page_header;
pub mod table;
pub mod ui;

pub use notice::Notices;
pub use page_header::PageHeader;
