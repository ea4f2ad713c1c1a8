pub mod draft;
pub mod jyutping;
pub mod phrase;
pub mod settings;
pub mod speech;
pub mod store;
pub mod unicode;
pub mod view;

pub use jyutping::romanize;
pub use phrase::{substitute, translate, Translation};
