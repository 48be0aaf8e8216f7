pub mod mock_ws;
pub mod scripted_feed;
