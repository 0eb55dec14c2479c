pub mod summary;
pub mod timeline;

pub use self::summary::SummaryReport;
pub use self::timeline::TimelineReport;
