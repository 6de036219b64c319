pub mod chat_widget;
pub mod consent_banner;
pub mod db_info;
pub mod footer;
pub mod header;
pub mod rating_banner;

pub use chat_widget::ChatWidget;
pub use consent_banner::ConsentBanner;
pub use db_info::DbInfo;
pub use footer::Footer;
pub use header::Header;
pub use rating_banner::{RatingBanner, RatingStars};
