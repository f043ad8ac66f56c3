//! Core domain logic for NovaBoard.
//! Project records, CSV interchange, timeline layout and board use-cases.

pub mod codec;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod source;
pub mod summary;
pub mod timeline;

pub use codec::csv::{decode_projects, encode_projects, export_file_name, CSV_COLUMNS};
pub use config::{AppConfig, ConfigError, SummaryConfig};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::project::{
    Comment, Priority, Project, ProjectStatus, Subtask, UNASSIGNED_OWNER,
};
pub use repo::project_store::{ProjectStore, RepoError, RepoResult, SqliteProjectStore};
pub use service::board_service::{BoardError, BoardResult, LoadOrigin, LoadOutcome, ProjectBoard};
pub use service::query::{group_by_status, ProjectQuery, SortField, SortOrder, SortState};
pub use service::stats::{risk_radar, top_budgets, DashboardStats};
pub use source::{CsvSource, HostRecord, HostTableSource, ProjectSource, SourceError};
pub use summary::{
    build_summary_prompt, summarize_projects, ChatCompletionsClient, SummaryError,
    SummaryGenerator,
};
pub use timeline::{build_timeline, build_timeline_today, TimelineLayout, ZoomLevel};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
