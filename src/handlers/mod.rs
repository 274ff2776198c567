mod health;
mod home;
mod reports;

pub use health::health;
pub use home::{HOME_MESSAGE, home};
pub use reports::{ReportQuery, generate_sarlaft_report};
