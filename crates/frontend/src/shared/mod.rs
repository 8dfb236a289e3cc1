pub mod api;
pub mod api_utils;
pub mod artifact;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod dialogs;
pub mod export;
pub mod form;
pub mod icons;
pub mod list_state;
pub mod list_utils;
pub mod lookup;
pub mod reference;
pub mod services;

#[cfg(test)]
pub mod testing;
