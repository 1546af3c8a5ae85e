pub mod refresh_views;

pub use refresh_views::RefreshMaterializedViewsUseCase;
