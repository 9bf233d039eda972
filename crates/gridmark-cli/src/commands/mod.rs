//! Command implementations.

pub mod layout;
pub mod replay;
pub mod settings;
pub mod show;

pub use self::layout::execute_layout;
pub use self::replay::execute_replay;
pub use self::settings::execute_settings;
pub use self::show::execute_show;
