mod caption;
mod features;
mod health;
mod save_caption;
mod upload;

pub use caption::generate_caption_handler;
pub use features::extract_features_handler;
pub use health::health_handler;
pub use save_caption::save_caption_handler;
pub use upload::upload_handler;

use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
