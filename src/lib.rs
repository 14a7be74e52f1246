pub mod config;
pub mod fetcher;
pub mod filter;
pub mod logger;
pub mod page;
pub mod post;
pub mod query_string;
pub mod server;
pub mod site;
pub mod site_config;
pub mod text_utils;
pub mod tokens;
pub mod view;
