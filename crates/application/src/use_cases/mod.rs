pub mod refresh;

pub use refresh::RefreshMaterializedViewsUseCase;
