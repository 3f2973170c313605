pub mod feed;
pub mod logging;
