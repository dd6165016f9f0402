pub mod db;
pub mod templates;
pub mod wordpress;

pub use db::DbReportStore;
pub use templates::TemplateArticleGenerator;
pub use wordpress::WordPressAdapter;
