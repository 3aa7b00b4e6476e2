pub mod listing_session;
