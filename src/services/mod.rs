pub mod asset_fetch;
pub mod color_service;

pub use asset_fetch::AssetFetcher;
pub use color_service::ColorService;
