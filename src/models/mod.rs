pub mod chat;
pub mod plan;
pub mod profile;
pub mod settings;
pub mod suggestion;
pub mod theme;

pub use chat::*;
pub use plan::*;
pub use profile::*;
pub use settings::*;
pub use suggestion::*;
pub use theme::*;
