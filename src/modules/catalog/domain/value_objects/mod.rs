pub mod airing_day;
pub mod audio;
pub mod named_list;
pub mod season_name;
pub mod source_type;

pub use airing_day::AiringDay;
pub use audio::{AudioLanguage, AudioType};
pub use named_list::NamedList;
pub use season_name::SeasonName;
pub use source_type::SourceType;
