pub mod links;
pub mod qr;
pub mod short_code;

pub use links::{parse_web_url, LinkService, LinkSettings, LinkStats, RecordLayout};
pub use qr::{QrRenderer, QrServerClient};
pub use short_code::ShortCodeGenerator;
