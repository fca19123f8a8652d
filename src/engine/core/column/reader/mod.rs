pub mod decode;
pub mod view;

pub use decode::decode_page;
pub use view::PageView;
